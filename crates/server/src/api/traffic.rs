use std::{collections::HashMap, sync::Arc};

use crate::{
    api::{parse_param, time_filter},
    dto::{MarkerDto, StationTrafficDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bikeflow::{
    encoding::{Encoding, markers},
    shared::{Coordinate, Viewport},
    traffic::Traffic,
};
use tracing::debug;

async fn current_traffic(state: &AppState, params: &HashMap<String, String>) -> Result<Traffic, StatusCode> {
    let filter = time_filter(params)?;
    let repository = state.repository.read().await;
    let traffic = repository
        .as_ref()
        .map(|repository| repository.traffic(filter))
        .unwrap_or_default();
    debug!("Rolled up {} stations for {filter}", traffic.stations().len());
    Ok(traffic)
}

pub async fn traffic(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let traffic = current_traffic(&state, &params).await?;
    let encoding = Encoding::new(&traffic);
    let result: Vec<_> = traffic
        .stations()
        .iter()
        .map(|station| StationTrafficDto::from(station, &encoding))
        .collect();
    Ok(Json(result).into_response())
}

pub async fn markers_in_view(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let viewport = viewport(&params)?;
    let traffic = current_traffic(&state, &params).await?;
    let result: Vec<_> = markers(&traffic, &viewport)
        .iter()
        .map(MarkerDto::from)
        .collect();
    Ok(Json(result).into_response())
}

fn viewport(params: &HashMap<String, String>) -> Result<Viewport, StatusCode> {
    let default = Viewport::default();
    let center = default.center();
    let (width, height) = default.size();
    let latitude = parse_param(params, "lat", center.latitude)?;
    let longitude = parse_param(params, "lon", center.longitude)?;
    let zoom = parse_param(params, "zoom", default.zoom())?;
    let width = parse_param(params, "width", width)?;
    let height = parse_param(params, "height", height)?;
    if !(latitude.is_finite() && longitude.is_finite() && zoom.is_finite()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(default
        .with_center(Coordinate::new(latitude, longitude))
        .with_zoom(zoom)
        .with_size(width, height))
}
