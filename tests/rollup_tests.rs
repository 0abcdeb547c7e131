use bikeflow::{
    encoding::{Encoding, FlowClass, markers},
    repository::{Repository, Station, Trip},
    shared::{Coordinate, MinuteOfDay, TimeFilter, Viewport},
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(minute: u16) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 12)
        .unwrap()
        .and_hms_opt((minute / 60) as u32, (minute % 60) as u32, 17)
        .unwrap()
}

fn station(id: &str) -> Station {
    Station::new(id, Coordinate::new(42.36, -71.09))
}

fn around(minute: u16) -> TimeFilter {
    TimeFilter::Around(MinuteOfDay::new(minute).unwrap())
}

/// Bucket 700 holds three departures from A, bucket 701 two arrivals at B.
fn late_morning() -> Repository {
    let mut trips = Vec::new();
    for _ in 0..3 {
        trips.push(Trip::new("A", "Z", at(700), at(1000)));
    }
    for _ in 0..2 {
        trips.push(Trip::new("Y", "B", at(300), at(701)));
    }
    Repository::from_parts(vec![station("A"), station("B"), station("C")], trips)
}

#[test]
fn window_includes_neighbouring_minutes() {
    let traffic = late_morning().traffic(around(700));
    let a = traffic.get("A").unwrap();
    let b = traffic.get("B").unwrap();
    assert_eq!((a.departures, a.arrivals, a.total_traffic), (3, 0, 3));
    assert_eq!((b.departures, b.arrivals, b.total_traffic), (0, 2, 2));
}

#[test]
fn unknown_stations_are_dropped() {
    let traffic = late_morning().traffic(TimeFilter::Any);
    assert_eq!(traffic.stations().len(), 3);
    assert!(traffic.get("Z").is_none());
    assert!(traffic.get("Y").is_none());
    let total: u32 = traffic.stations().iter().map(|s| s.total_traffic).sum();
    assert_eq!(total, 5);
}

#[test]
fn idle_station_keeps_zero_counters() {
    let repository = late_morning();
    for filter in [TimeFilter::Any, around(700), around(0)] {
        let c = repository.traffic(filter);
        let c = c.get("C").unwrap();
        assert_eq!((c.departures, c.arrivals, c.total_traffic), (0, 0, 0));
        assert_eq!(c.departure_ratio(), 0.5);
        assert_eq!(FlowClass::quantize(c.departure_ratio()), FlowClass::Balanced);
    }
}

#[test]
fn window_excludes_far_minutes() {
    let traffic = late_morning().traffic(around(840));
    let a = traffic.get("A").unwrap();
    let b = traffic.get("B").unwrap();
    assert_eq!(a.total_traffic, 0);
    assert_eq!(b.total_traffic, 0);
    assert_eq!(traffic.max_total_traffic(), 0);
}

#[test]
fn half_open_upper_bound() {
    let trips = vec![
        Trip::new("A", "B", at(640), at(650)),
        Trip::new("A", "B", at(759), at(759)),
        Trip::new("A", "B", at(760), at(760)),
    ];
    let repository = Repository::from_parts(vec![station("A"), station("B")], trips);
    let traffic = repository.traffic(around(700));
    assert_eq!(traffic.get("A").unwrap().departures, 2);
    assert_eq!(traffic.get("B").unwrap().arrivals, 2);
}

#[test]
fn midnight_window_wraps() {
    let trips = vec![
        Trip::new("A", "B", at(1379), at(1379)),
        Trip::new("A", "B", at(1380), at(1400)),
        Trip::new("A", "B", at(1439), at(5)),
        Trip::new("A", "B", at(59), at(59)),
        Trip::new("A", "B", at(60), at(61)),
    ];
    let repository = Repository::from_parts(vec![station("A"), station("B")], trips);
    let traffic = repository.traffic(around(0));
    assert_eq!(traffic.get("A").unwrap().departures, 3);
    assert_eq!(traffic.get("B").unwrap().arrivals, 3);
}

#[test]
fn totals_and_idempotence_for_every_filter() {
    let trips: Vec<Trip> = (0..1440u16)
        .step_by(7)
        .map(|minute| {
            let (origin, destination) = if minute % 2 == 0 { ("A", "B") } else { ("B", "C") };
            Trip::new(origin, destination, at(minute), at((minute + 33) % 1440))
        })
        .collect();
    let repository =
        Repository::from_parts(vec![station("A"), station("B"), station("C")], trips);

    let mut filters = vec![TimeFilter::Any];
    filters.extend((0..1440).step_by(37).map(around));
    for filter in filters {
        let first = repository.traffic(filter);
        let second = repository.traffic(filter);
        assert_eq!(first, second);
        for station in first.stations() {
            assert_eq!(station.total_traffic, station.departures + station.arrivals);
        }
    }
}

#[test]
fn any_counts_everything_once() {
    let repository = late_morning();
    let traffic = repository.traffic(TimeFilter::Any);
    assert_eq!(traffic.get("A").unwrap().departures, 3);
    assert_eq!(traffic.get("B").unwrap().arrivals, 2);
    assert_eq!(repository.buckets().departures().filter(TimeFilter::Any).count(), 5);
    assert_eq!(repository.buckets().arrivals().filter(TimeFilter::Any).count(), 5);
}

#[test]
fn radius_domain_follows_filter() {
    let trips = vec![
        Trip::new("A", "B", at(100), at(110)),
        Trip::new("A", "B", at(900), at(910)),
        Trip::new("A", "B", at(905), at(915)),
        Trip::new("B", "A", at(920), at(930)),
    ];
    let repository = Repository::from_parts(vec![station("A"), station("B")], trips);

    let all = repository.traffic(TimeFilter::Any);
    assert_eq!(Encoding::new(&all).radius_scale().domain_max(), 4.0);

    let evening = repository.traffic(around(910));
    let encoding = Encoding::new(&evening);
    assert_eq!(encoding.radius_scale().domain_max(), 3.0);
    let a = evening.get("A").unwrap();
    assert_eq!(encoding.radius(a), 25.0);
    assert_eq!(encoding.flow(a), FlowClass::Departures);

    let night = repository.traffic(around(100));
    let markers = markers(&night, &Viewport::default());
    let b = markers.iter().find(|marker| &*marker.id == "B").unwrap();
    assert_eq!(b.radius, 25.0);
    assert_eq!(b.flow, FlowClass::Arrivals);
}

#[test]
fn empty_repository_has_empty_traffic() {
    let traffic = Repository::new().traffic(TimeFilter::Any);
    assert!(traffic.is_empty());
    assert_eq!(traffic.max_total_traffic(), 0);
}
