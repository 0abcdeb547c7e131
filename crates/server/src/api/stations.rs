use std::sync::Arc;

use crate::{dto::StationDto, state::AppState};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

pub async fn stations(State(state): State<Arc<AppState>>) -> Response {
    let repository = state.repository.read().await;
    let result: Vec<_> = repository
        .as_ref()
        .map(|repository| repository.stations().iter().map(StationDto::from).collect())
        .unwrap_or_default();
    Json(result).into_response()
}
