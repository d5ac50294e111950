pub mod cache;
pub mod config;
pub mod credential;
pub mod error;
pub mod geonames;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod pt_br;
pub mod rate_limit;
pub mod state;

use axum::{Router, routing::get};
use std::sync::Arc;
use crate::handlers::{
    brazilian_search_handler, cities_handler, country_info_handler, health_handler,
    metrics_handler, search_handler, status_handler, timezone_handler,
};
use crate::state::AppState;

// all routes, with the shared state attached
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/v4/geonames/status", get(status_handler))
        .route("/api/v4/geonames/search", get(search_handler))
        .route("/api/v4/geonames/timezone", get(timezone_handler))
        .route("/api/v4/geonames/cities", get(cities_handler))
        .route("/api/v4/geonames/country-info", get(country_info_handler))
        .route("/api/v4/geonames/brazilian-search", get(brazilian_search_handler))
        .with_state(state)
}
