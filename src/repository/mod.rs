use std::{collections::HashMap, sync::Arc, time::Instant};

mod models;
pub use models::*;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    shared::TimeFilter,
    source::{self, RawTrip, SourceReader},
    traffic::{Buckets, Traffic, aggregate},
};

/// Stations, trips and the minute buckets built from them.
/// Nothing in here changes after loading.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    stations: Box<[Station]>,
    trips: Box<[Trip]>,
    buckets: Buckets,
    station_lookup: HashMap<Arc<str>, u32>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Depending on the size of the trip dump this can be a long blocking function.
    pub fn load(mut self, reader: &SourceReader) -> Result<Self, source::Error> {
        self.load_stations(reader)?;
        self.load_trips(reader)?;
        self.generate_buckets();
        Ok(self)
    }

    pub fn from_parts(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        let mut repository = Self::new();
        repository.set_stations(stations);
        repository.trips = trips.into();
        repository.generate_buckets();
        repository
    }

    fn load_stations(&mut self, reader: &SourceReader) -> Result<(), source::Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        let mut stations: Vec<Station> = Vec::new();
        reader.stream_stations(|(i, raw)| match Station::from_raw(raw) {
            Some(station) => stations.push(station),
            None => warn!("Skipping station {i} without short_name"),
        })?;
        self.set_stations(stations);
        debug!("Loading stations took {:?}", now.elapsed());
        Ok(())
    }

    fn set_stations(&mut self, mut stations: Vec<Station>) {
        let mut station_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        stations.iter_mut().enumerate().for_each(|(i, station)| {
            station.index = i as u32;
            if station_lookup.contains_key(&station.id) {
                warn!("Duplicate station id {}", station.id);
            } else {
                station_lookup.insert(station.id.clone(), i as u32);
            }
        });
        self.stations = stations.into();
        self.station_lookup = station_lookup;
    }

    fn load_trips(&mut self, reader: &SourceReader) -> Result<(), source::Error> {
        debug!("Loading trips...");
        let now = Instant::now();
        let skip_malformed = reader.config().skip_malformed_rows;
        let mut raw_trips: Vec<(usize, RawTrip)> = Vec::new();
        reader.stream_trips(|row| raw_trips.push(row))?;

        // Timestamp parsing dominates loading, order is kept by the indexed collect.
        let parsed: Vec<Result<Trip, source::Error>> = raw_trips
            .into_par_iter()
            .map(|(i, raw)| Trip::from_raw(i, raw))
            .collect();
        let mut trips: Vec<Trip> = Vec::with_capacity(parsed.len());
        for result in parsed {
            match result {
                Ok(trip) => trips.push(trip),
                Err(err) if skip_malformed => warn!("Skipping trip: {err}"),
                Err(err) => return Err(err),
            }
        }
        self.trips = trips.into();
        debug!("Loading {} trips took {:?}", self.trips.len(), now.elapsed());
        Ok(())
    }

    fn generate_buckets(&mut self) {
        debug!("Generating minute buckets...");
        let now = Instant::now();
        self.buckets = Buckets::build(&self.trips);
        debug!("Generating minute buckets took {:?}", now.elapsed());
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let index = self.station_lookup.get(id)?;
        Some(&self.stations[*index as usize])
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Fresh station counters for `filter`.
    pub fn traffic(&self, filter: TimeFilter) -> Traffic {
        aggregate(&self.buckets, &self.trips, &self.stations, filter)
    }
}
