mod api;
mod dto;
mod loader;
mod state;

use crate::{loader::Location, state::AppState};
use axum::routing::get;
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 3 {
        error!("Usage: bikeflow-server <stations json> <trips csv|zip>");
        std::process::exit(1);
    }
    let stations = Location::from(args[1].as_str());
    let trips = Location::from(args[2].as_str());
    let port = match std::env::var("PORT") {
        Ok(value) => match value.parse() {
            Ok(port) => port,
            Err(err) => {
                error!("Invalid PORT {value}: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    let state = Arc::new(AppState::default());

    // Requests are answered with an empty map until this finishes. No retry on failure.
    let load_state = state.clone();
    tokio::spawn(async move {
        info!("Loading data...");
        match loader::load(stations, trips).await {
            Ok(repository) => {
                let _ = load_state.repository.write().await.replace(repository);
            }
            Err(err) => error!("Failed to load data: {err}"),
        }
    });

    let app = axum::Router::new()
        .route("/stations", get(api::stations))
        .route("/traffic", get(api::traffic))
        .route("/markers", get(api::markers_in_view))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
