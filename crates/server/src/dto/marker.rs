use bikeflow::{encoding::StationMarker, shared::ScreenPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerDto {
    pub id: String,
    pub position: ScreenPoint,
    pub radius: f64,
    /// `0`, `0.5` or `1`, fed to the `--departure-ratio` colour mix.
    pub departure_ratio: f64,
}

impl MarkerDto {
    pub fn from(marker: &StationMarker) -> Self {
        Self {
            id: marker.id.to_string(),
            position: marker.position,
            radius: marker.radius,
            departure_ratio: marker.flow.value(),
        }
    }
}
