use bikeflow::{
    encoding::{Encoding, FlowClass},
    repository::Station,
    shared::Coordinate,
    traffic::StationTraffic,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub id: String,
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.as_ref().map(|name| name.to_string()),
            coordinate: station.coordinate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTrafficDto {
    pub id: String,
    pub coordinate: Coordinate,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
    pub radius: f64,
    pub flow: FlowClass,
    pub departure_ratio: f64,
}

impl StationTrafficDto {
    pub fn from(station: &StationTraffic, encoding: &Encoding) -> Self {
        Self {
            id: station.id.to_string(),
            coordinate: station.coordinate,
            departures: station.departures,
            arrivals: station.arrivals,
            total_traffic: station.total_traffic,
            radius: encoding.radius(station),
            flow: encoding.flow(station),
            departure_ratio: station.departure_ratio(),
        }
    }
}
