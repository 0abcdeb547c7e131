use std::{collections::HashMap, sync::Arc};

use tracing::trace;

use crate::{
    repository::{Station, Trip},
    shared::{Coordinate, TimeFilter},
    traffic::Buckets,
};

/// Ratio reported for a station without traffic.
pub const NEUTRAL_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct StationTraffic {
    pub id: Arc<str>,
    pub coordinate: Coordinate,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    /// Share of departures in the station's traffic, `0.5` when idle.
    pub fn departure_ratio(&self) -> f64 {
        if self.total_traffic > 0 {
            self.departures as f64 / self.total_traffic as f64
        } else {
            NEUTRAL_RATIO
        }
    }
}

/// Per station counters for a single filter state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Traffic {
    filter: TimeFilter,
    stations: Box<[StationTraffic]>,
}

impl Traffic {
    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Same order as the stations the rollup was given.
    pub fn stations(&self) -> &[StationTraffic] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&StationTraffic> {
        self.stations.iter().find(|station| &*station.id == id)
    }

    pub fn max_total_traffic(&self) -> u32 {
        self.stations
            .iter()
            .map(|station| station.total_traffic)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Counts occurrences of each station id.
pub fn rollup<'a, I>(ids: I) -> HashMap<&'a str, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, u32> = HashMap::new();
    ids.into_iter()
        .for_each(|id| *counts.entry(id).or_default() += 1);
    counts
}

/// Counts departures by origin and arrivals by destination inside `filter`
/// and returns fresh counters for every station. Ids that match no station
/// are dropped.
pub fn aggregate(
    buckets: &Buckets,
    trips: &[Trip],
    stations: &[Station],
    filter: TimeFilter,
) -> Traffic {
    let departures = rollup(
        buckets
            .departures()
            .filter(filter)
            .filter_map(|&i| trips.get(i as usize))
            .map(|trip| &*trip.origin),
    );
    let arrivals = rollup(
        buckets
            .arrivals()
            .filter(filter)
            .filter_map(|&i| trips.get(i as usize))
            .map(|trip| &*trip.destination),
    );
    trace!(
        "Rolled up {} departure and {} arrival ids for {filter}",
        departures.len(),
        arrivals.len()
    );

    let stations = stations
        .iter()
        .map(|station| {
            let departures = departures.get(&*station.id).copied().unwrap_or(0);
            let arrivals = arrivals.get(&*station.id).copied().unwrap_or(0);
            StationTraffic {
                id: station.id.clone(),
                coordinate: station.coordinate,
                departures,
                arrivals,
                total_traffic: departures + arrivals,
            }
        })
        .collect();

    Traffic { filter, stations }
}

#[test]
fn rollup_counts_exact_ids() {
    let counts = rollup(["A", "B", "A", "a", ""]);
    assert_eq!(counts.get("A"), Some(&2));
    assert_eq!(counts.get("a"), Some(&1));
    assert_eq!(counts.get(""), Some(&1));
    assert_eq!(counts.get("C"), None);
}

#[test]
fn idle_station_is_balanced() {
    let station = StationTraffic {
        id: "A".into(),
        coordinate: Coordinate::default(),
        departures: 0,
        arrivals: 0,
        total_traffic: 0,
    };
    assert_eq!(station.departure_ratio(), NEUTRAL_RATIO);
}
