//! Charging-station map API
//!
//! This library provides the HTTP surface over the station aggregation and
//! geo-ranking engine: the map and UI collaborators read the derived views
//! and push reference-point, filter and selection updates through it.

mod map;
mod stations;

use axum::{
    Router,
    routing::{get, post},
};
use chargemap_core::StationEngine;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(engine: StationEngine) -> Router {
    let shared_engine = Arc::new(Mutex::new(engine));
    Router::new()
        .route("/health", get(health_check))
        .route("/stations", get(stations::list_stations))
        .route("/stations/all", get(stations::list_all_stations))
        .route(
            "/stations/distribution",
            get(stations::get_power_distribution),
        )
        .route(
            "/stations/selected",
            get(stations::get_selected_station).delete(map::clear_selection),
        )
        .route("/stations/{station_id}/select", post(map::select_station))
        .route("/map/center", post(map::update_map_center))
        .route("/filter/min-power", post(map::update_power_filter))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_engine)
}
