use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    shared::{Coordinate, MinuteOfDay, parse_timestamp},
    source::{self, RawStation, RawTrip},
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Station {
    pub index: u32,
    /// GBFS `short_name`, the key trips refer to.
    pub id: Arc<str>,
    pub name: Option<Arc<str>>,
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new(id: &str, coordinate: Coordinate) -> Self {
        Self {
            index: 0,
            id: id.into(),
            name: None,
            coordinate,
        }
    }

    /// `None` when the record has no `short_name`.
    pub(crate) fn from_raw(value: RawStation) -> Option<Self> {
        Some(Self {
            index: 0,
            id: value.short_name?.into(),
            name: value.name.map(|name| name.into()),
            coordinate: Coordinate::new(value.lat, value.lon),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub origin: Arc<str>,
    pub destination: Arc<str>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn new(
        origin: &str,
        destination: &str,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            started_at,
            ended_at,
        }
    }

    pub(crate) fn from_raw(row: usize, value: RawTrip) -> Result<Self, source::Error> {
        let started_at = parse(row, &value.started_at)?;
        let ended_at = parse(row, &value.ended_at)?;
        Ok(Self {
            origin: value.start_station_id.into(),
            destination: value.end_station_id.into(),
            started_at,
            ended_at,
        })
    }

    pub fn start_minute(&self) -> MinuteOfDay {
        MinuteOfDay::from_datetime(&self.started_at)
    }

    pub fn end_minute(&self) -> MinuteOfDay {
        MinuteOfDay::from_datetime(&self.ended_at)
    }
}

fn parse(row: usize, value: &str) -> Result<NaiveDateTime, source::Error> {
    parse_timestamp(value).ok_or_else(|| source::Error::MalformedTimestamp {
        row,
        value: value.to_string(),
    })
}
