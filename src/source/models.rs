use serde::{Deserialize, Deserializer, Serialize, de};

/// One entry of a GBFS `station_information` feed. Extra fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawStation {
    pub short_name: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
}

/// One row of a monthly trip dump. Extra columns are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawTrip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: String,
    pub ended_at: String,
}

#[derive(Deserialize)]
pub(crate) struct StationsData {
    stations: Vec<RawStation>,
}

/// Either the GBFS envelope `{"data": {"stations": [...]}}` or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum StationsDocument {
    Envelope { data: StationsData },
    List(Vec<RawStation>),
}

impl StationsDocument {
    pub(crate) fn into_stations(self) -> Vec<RawStation> {
        match self {
            StationsDocument::Envelope { data } => data.stations,
            StationsDocument::List(stations) => stations,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(value) => value.trim().parse().map_err(de::Error::custom),
    }
}
