mod stations;
mod traffic;

pub use stations::*;
pub use traffic::*;

use axum::http::StatusCode;
use bikeflow::shared::TimeFilter;
use std::{collections::HashMap, str::FromStr};

fn parse_param<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, StatusCode> {
    match params.get(key) {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST),
        None => Ok(default),
    }
}

/// `time` follows the slider contract, `-1` or absent means any time.
fn time_filter(params: &HashMap<String, String>) -> Result<TimeFilter, StatusCode> {
    let value: i32 = parse_param(params, "time", TimeFilter::SLIDER_ANY)?;
    TimeFilter::from_slider(value).ok_or(StatusCode::BAD_REQUEST)
}
