use axum::{Json, extract::{Query, State}};
use serde_json::Value;
use std::sync::Arc;
use super::fetch_gated;
use crate::error::ApiError;
use crate::geonames::UpstreamRequest;
use crate::models::{BrazilianSearchQuery, CitiesQuery, CountryQuery, SearchQuery, TimezoneQuery};
use crate::pt_br;
use crate::state::AppState;

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!("Geonames search for: {}", query.q);

    let req = UpstreamRequest::search(&query.q, query.max_rows, &query.lang, &query.style);
    fetch_gated(&state, req).await.map(Json)
}

pub async fn timezone_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimezoneQuery>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!("Geonames timezone for coordinates: {}, {}", query.lat, query.lng);

    fetch_gated(&state, UpstreamRequest::timezone(query.lat, query.lng)).await.map(Json)
}

pub async fn cities_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CitiesQuery>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(
        "Geonames cities in box N{} S{} E{} W{}",
        query.north, query.south, query.east, query.west
    );

    let req = UpstreamRequest::cities(query.north, query.south, query.east, query.west, &query.lang);
    fetch_gated(&state, req).await.map(Json)
}

pub async fn country_info_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountryQuery>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!("Geonames country info for: {}", query.country);

    fetch_gated(&state, UpstreamRequest::country_info(&query.country)).await.map(Json)
}

// Search in Portuguese, then localize the Brazilian hits
pub async fn brazilian_search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrazilianSearchQuery>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!("Brazilian Geonames search for: {}", query.q);

    let req = UpstreamRequest::search(&query.q, query.max_results, "pt", "medium");
    let result = fetch_gated(&state, req).await?;
    Ok(Json(pt_br::localize_search(result)))
}
