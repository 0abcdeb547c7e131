use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    shared::{Project, ScreenPoint},
    traffic::{StationTraffic, Traffic},
};

/// Largest circle radius in pixels.
pub const RADIUS_RANGE_MAX: f64 = 25.0;

/// Square root scale from `[0, domain_max]` onto `[0, range_max]`, so circle
/// area grows linearly with traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range_max: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        Self {
            domain_max,
            range_max,
        }
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// A scale over an empty domain maps everything to 0.
    pub fn apply(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 || value.is_nan() {
            return 0.0;
        }
        let value = value.clamp(0.0, self.domain_max);
        self.range_max * (value / self.domain_max).sqrt()
    }
}

/// Departure ratio bucketed into three colour classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowClass {
    /// Mostly arrivals, ratio below 1/3.
    Arrivals,
    Balanced,
    /// Mostly departures, ratio of 2/3 and up.
    Departures,
}

impl FlowClass {
    pub fn quantize(ratio: f64) -> Self {
        if ratio.is_nan() {
            return FlowClass::Balanced;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        if ratio < 1.0 / 3.0 {
            FlowClass::Arrivals
        } else if ratio < 2.0 / 3.0 {
            FlowClass::Balanced
        } else {
            FlowClass::Departures
        }
    }

    /// `0`, `0.5` or `1`, the value the colour ramp is keyed on.
    pub const fn value(&self) -> f64 {
        match self {
            FlowClass::Arrivals => 0.0,
            FlowClass::Balanced => 0.5,
            FlowClass::Departures => 1.0,
        }
    }
}

/// Scales derived from one [`Traffic`] snapshot. Rebuild it for every new
/// snapshot, the radius domain follows the busiest station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    radius: SqrtScale,
}

impl Encoding {
    pub fn new(traffic: &Traffic) -> Self {
        Self {
            radius: SqrtScale::new(traffic.max_total_traffic() as f64, RADIUS_RANGE_MAX),
        }
    }

    pub fn radius_scale(&self) -> SqrtScale {
        self.radius
    }

    pub fn radius(&self, station: &StationTraffic) -> f64 {
        self.radius.apply(station.total_traffic as f64)
    }

    pub fn flow(&self, station: &StationTraffic) -> FlowClass {
        FlowClass::quantize(station.departure_ratio())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub id: Arc<str>,
    pub position: ScreenPoint,
    pub radius: f64,
    pub flow: FlowClass,
}

/// Everything the renderer needs to draw one circle per station.
pub fn markers<P: Project>(traffic: &Traffic, projector: &P) -> Vec<StationMarker> {
    let encoding = Encoding::new(traffic);
    traffic
        .stations()
        .iter()
        .map(|station| StationMarker {
            id: station.id.clone(),
            position: projector.project(&station.coordinate),
            radius: encoding.radius(station),
            flow: encoding.flow(station),
        })
        .collect()
}
