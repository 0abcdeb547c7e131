use bikeflow::{
    repository::Repository,
    source::{self, SourceReader},
};
use reqwest::header::ACCEPT_ENCODING;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error("Fetching {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to read data: {0}")]
    Source(#[from] source::Error),
    #[error("Loading task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Where a data set comes from, a local path or an http(s) url.
#[derive(Debug, Clone)]
pub enum Location {
    Path(String),
    Url(String),
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Location::Url(value.to_string())
        } else {
            Location::Path(value.to_string())
        }
    }
}

impl Location {
    fn is_zip(&self) -> bool {
        let value = match self {
            Location::Path(value) | Location::Url(value) => value,
        };
        value.to_ascii_lowercase().ends_with(".zip")
    }
}

pub async fn load(stations: Location, trips: Location) -> Result<Repository, self::Error> {
    let now = Instant::now();
    let reader = SourceReader::new();
    let reader = match stations {
        Location::Path(path) => reader.stations_from_json(path),
        Location::Url(url) => reader.stations_from_bytes(fetch(&url).await?),
    };
    let reader = match &trips {
        Location::Path(path) => reader.trips_from_path(path),
        Location::Url(url) if trips.is_zip() => reader.trips_from_zip_bytes(fetch(url).await?),
        Location::Url(url) => reader.trips_from_csv_bytes(fetch(url).await?),
    };
    info!("Fetching data took {:?}", now.elapsed());

    let repository =
        tokio::task::spawn_blocking(move || Repository::new().load(&reader)).await??;
    info!(
        "Loaded {} stations and {} trips in {:?}",
        repository.stations().len(),
        repository.trips().len(),
        now.elapsed()
    );
    Ok(repository)
}

async fn fetch(url: &str) -> Result<Vec<u8>, self::Error> {
    let response = reqwest::Client::new()
        .get(url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let bytes = response.bytes().await.map_err(|source| Error::Fetch {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}
