use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek},
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error;
use tracing::warn;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Trip row {row} has a malformed timestamp: {value}")]
    MalformedTimestamp { row: usize, value: String },
}

#[derive(Default, Debug, Clone)]
pub enum StationStorage {
    #[default]
    None,
    Json(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Default, Debug, Clone)]
pub enum TripStorage {
    #[default]
    None,
    Csv(PathBuf),
    Zip(PathBuf),
    CsvBytes(Arc<[u8]>),
    ZipBytes(Arc<[u8]>),
}

/// Hands already parsed station and trip records to the repository.
#[derive(Default, Debug, Clone)]
pub struct SourceReader {
    config: Config,
    stations: StationStorage,
    trips: TripStorage,
}

impl SourceReader {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stations_from_json<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.stations = StationStorage::Json(path.into());
        self
    }

    pub fn stations_from_bytes<B: Into<Arc<[u8]>>>(mut self, bytes: B) -> Self {
        self.stations = StationStorage::Bytes(bytes.into());
        self
    }

    /// Picks csv or zip from the file extension.
    pub fn trips_from_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        self.trips = if is_zip {
            TripStorage::Zip(path)
        } else {
            TripStorage::Csv(path)
        };
        self
    }

    pub fn trips_from_csv_bytes<B: Into<Arc<[u8]>>>(mut self, bytes: B) -> Self {
        self.trips = TripStorage::CsvBytes(bytes.into());
        self
    }

    pub fn trips_from_zip_bytes<B: Into<Arc<[u8]>>>(mut self, bytes: B) -> Self {
        self.trips = TripStorage::ZipBytes(bytes.into());
        self
    }

    pub fn stream_stations<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, RawStation)),
    {
        let stations = match &self.stations {
            StationStorage::None => return Ok(()),
            StationStorage::Json(path) => read_stations(BufReader::new(File::open(path)?))?,
            StationStorage::Bytes(bytes) => read_stations(&bytes[..])?,
        };
        stations.into_iter().enumerate().for_each(f);
        Ok(())
    }

    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, RawTrip)),
    {
        match &self.trips {
            TripStorage::None => Ok(()),
            TripStorage::Csv(path) => {
                stream_csv::<_, RawTrip, F>(File::open(path)?, &self.config, f)
            }
            TripStorage::Zip(path) => {
                stream_from_zip::<_, RawTrip, F>(File::open(path)?, &self.config, f)
            }
            TripStorage::CsvBytes(bytes) => {
                stream_csv::<_, RawTrip, F>(&bytes[..], &self.config, f)
            }
            TripStorage::ZipBytes(bytes) => {
                stream_from_zip::<_, RawTrip, F>(Cursor::new(&bytes[..]), &self.config, f)
            }
        }
    }
}

pub fn read_stations<R: Read>(reader: R) -> Result<Vec<RawStation>, self::Error> {
    let document: StationsDocument = serde_json::from_reader(reader)?;
    Ok(document.into_stations())
}

pub fn stream_csv<R, T, F>(reader: R, config: &Config, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::Reader::from_reader(reader);
    for (i, record) in reader.deserialize().enumerate() {
        match record {
            Ok(value) => f((i, value)),
            Err(err) if config.skip_malformed_rows => warn!("Skipping row {i}: {err}"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn stream_from_zip<R, T, F>(reader: R, config: &Config, f: F) -> Result<(), self::Error>
where
    R: Read + Seek,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut archive = ZipArchive::new(reader)?;
    let index = match &config.trips_file_name {
        Some(name) => archive
            .index_for_name(name)
            .ok_or(self::Error::FileNotFound(name.to_string()))?,
        None => first_csv_index(&mut archive)?,
    };
    let file = archive.by_index(index)?;
    stream_csv::<_, T, F>(file, config, f)
}

fn first_csv_index<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<usize, self::Error> {
    for i in 0..archive.len() {
        let name = archive.by_index(i)?.name().to_owned();
        if name.starts_with("__MACOSX") {
            continue;
        }
        if name.to_ascii_lowercase().ends_with(".csv") {
            return Ok(i);
        }
    }
    Err(self::Error::FileNotFound("*.csv".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIPS: &str = "\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id
r1,classic_bike,2024-03-01 11:40:12,2024-03-01 11:55:00,A32000,B32001
r2,electric_bike,2024-03-01 23:59:59.120,2024-03-02 00:10:00.000,B32001,
";

    #[test]
    fn stations_accept_envelope_and_strings() {
        let json = r#"{"data":{"stations":[
            {"short_name":"A32000","name":"Kendall","lat":"42.36","lon":-71.09,"capacity":19},
            {"name":"No code","lat":42.0,"lon":-71.0}
        ]}}"#;
        let stations = read_stations(json.as_bytes()).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].short_name.as_deref(), Some("A32000"));
        assert_eq!(stations[0].lat, 42.36);
        assert!(stations[1].short_name.is_none());
    }

    #[test]
    fn stations_accept_bare_list() {
        let json = r#"[{"short_name":"A","lat":1.5,"lon":"2.5"}]"#;
        let stations = read_stations(json.as_bytes()).unwrap();
        assert_eq!(stations[0].lon, 2.5);
    }

    #[test]
    fn stations_reject_non_numeric_coordinates() {
        let json = r#"[{"short_name":"A","lat":"north","lon":"2.5"}]"#;
        assert!(matches!(read_stations(json.as_bytes()), Err(Error::Json(_))));
    }

    #[test]
    fn trips_ignore_unknown_columns() {
        let reader = SourceReader::new().trips_from_csv_bytes(TRIPS.as_bytes().to_vec());
        let mut trips = Vec::new();
        reader.stream_trips(|(_, trip)| trips.push(trip)).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].start_station_id, "A32000");
        assert_eq!(trips[1].end_station_id, "");
    }

    #[test]
    fn broken_rows_fail_unless_skipped() {
        let csv = format!("{TRIPS}r3,classic_bike,2024-03-01 10:00:00\n");
        let reader = SourceReader::new().trips_from_csv_bytes(csv.as_bytes().to_vec());
        assert!(matches!(reader.stream_trips(|_| ()), Err(Error::Csv(_))));

        let reader = reader.with_config(Config {
            skip_malformed_rows: true,
            ..Default::default()
        });
        let mut count = 0;
        reader.stream_trips(|_| count += 1).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn empty_reader_streams_nothing() {
        let reader = SourceReader::new();
        let mut count = 0;
        reader.stream_stations(|_| count += 1).unwrap();
        reader.stream_trips(|_| count += 1).unwrap();
        assert_eq!(count, 0);
    }
}
