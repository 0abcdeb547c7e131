use std::io::{Cursor, Write};

use bikeflow::{
    repository::Repository,
    shared::{MinuteOfDay, TimeFilter},
    source::{self, Config, SourceReader},
};
use zip::{ZipWriter, write::SimpleFileOptions};

const STATIONS: &str = r#"{
  "last_updated": 1710000000,
  "data": {
    "stations": [
      {"station_id": "s1", "short_name": "A32000", "name": "Kendall T", "lat": "42.3625", "lon": "-71.0841"},
      {"station_id": "s2", "short_name": "M32006", "name": "MIT at Mass Ave", "lat": 42.3581, "lon": -71.0936},
      {"station_id": "s3", "name": "Depot", "lat": 42.0, "lon": -71.0}
    ]
  }
}"#;

const TRIPS: &str = "\
ride_id,rideable_type,started_at,ended_at,start_station_name,start_station_id,end_station_name,end_station_id,member_casual
r1,classic_bike,2024-03-01 08:02:11,2024-03-01 08:14:40,Kendall T,A32000,MIT at Mass Ave,M32006,member
r2,electric_bike,2024-03-02 08:30:00.512,2024-03-02 08:41:09.001,MIT at Mass Ave,M32006,Kendall T,A32000,casual
r3,classic_bike,2024-03-03 23:50:00,2024-03-04 00:20:00,Kendall T,A32000,,,member
";

fn zipped(name: &str, contents: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("__MACOSX/._trips.csv", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"junk").unwrap();
    writer.start_file(name, SimpleFileOptions::default()).unwrap();
    writer.write_all(contents.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[test]
fn load_from_bytes_test() {
    let reader = SourceReader::new()
        .stations_from_bytes(STATIONS.as_bytes().to_vec())
        .trips_from_csv_bytes(TRIPS.as_bytes().to_vec());
    let repository = Repository::new().load(&reader).unwrap();

    assert_eq!(repository.stations().len(), 2);
    assert_eq!(repository.trips().len(), 3);
    let kendall = repository.station_by_id("A32000").unwrap();
    assert_eq!(kendall.coordinate.latitude, 42.3625);
    assert_eq!(kendall.name.as_deref(), Some("Kendall T"));
    assert!(repository.station_by_id("s3").is_none());

    let trip = &repository.trips()[2];
    assert_eq!(trip.start_minute(), MinuteOfDay::from_hm("23:50").unwrap());
    assert_eq!(trip.end_minute(), MinuteOfDay::from_hm("00:20").unwrap());
    assert_eq!(&*trip.destination, "");

    let traffic = repository.traffic(TimeFilter::Any);
    let kendall = traffic.get("A32000").unwrap();
    assert_eq!((kendall.departures, kendall.arrivals), (2, 1));

    let morning = repository.traffic(TimeFilter::Around(MinuteOfDay::from_hm("08:00").unwrap()));
    let mit = morning.get("M32006").unwrap();
    assert_eq!((mit.departures, mit.arrivals), (1, 1));
}

#[test]
fn load_from_files_test() {
    let dir = tempfile::tempdir().unwrap();
    let stations_path = dir.path().join("stations.json");
    let trips_path = dir.path().join("202403-bluebikes-tripdata.zip");
    std::fs::write(&stations_path, STATIONS).unwrap();
    std::fs::write(&trips_path, zipped("202403-bluebikes-tripdata.csv", TRIPS)).unwrap();

    let reader = SourceReader::new()
        .stations_from_json(&stations_path)
        .trips_from_path(&trips_path);
    let repository = Repository::new().load(&reader).unwrap();
    assert_eq!(repository.stations().len(), 2);
    assert_eq!(repository.trips().len(), 3);
    assert_eq!(repository.buckets().departures().len(), 3);
    assert_eq!(repository.buckets().arrivals().len(), 3);
}

#[test]
fn named_zip_entry_must_exist() {
    let reader = SourceReader::new()
        .with_config(Config {
            trips_file_name: Some("missing.csv".into()),
            ..Default::default()
        })
        .trips_from_zip_bytes(zipped("trips.csv", TRIPS));
    let result = Repository::new().load(&reader);
    assert!(matches!(result, Err(source::Error::FileNotFound(name)) if name == "missing.csv"));
}

#[test]
fn malformed_timestamp_test() {
    let trips = format!("{TRIPS}r4,classic_bike,not a date,2024-03-01 09:00:00,,A32000,,M32006,member\n");
    let reader = SourceReader::new()
        .stations_from_bytes(STATIONS.as_bytes().to_vec())
        .trips_from_csv_bytes(trips.as_bytes().to_vec());
    let result = Repository::new().load(&reader);
    assert!(matches!(
        result,
        Err(source::Error::MalformedTimestamp { row: 3, ref value }) if value == "not a date"
    ));

    let reader = reader.with_config(Config {
        skip_malformed_rows: true,
        ..Default::default()
    });
    let repository = Repository::new().load(&reader).unwrap();
    assert_eq!(repository.trips().len(), 3);
}

#[test]
fn missing_file_test() {
    let reader = SourceReader::new().stations_from_json("/nonexistent/stations.json");
    assert!(matches!(
        Repository::new().load(&reader),
        Err(source::Error::Io(_))
    ));
}
