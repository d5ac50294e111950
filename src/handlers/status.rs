use axum::{Json, extract::State};
use std::sync::Arc;
use crate::models::StatusResponse;
use crate::state::AppState;

// Credential and quota state, republished as is
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    tracing::info!("Geonames status check");

    Json(StatusResponse {
        status: "OK",
        service: "Geonames Open Source Service",
        credential_status: state.credentials.validate(),
        rate_limiting: state.governor.usage_snapshot(),
        timestamp: chrono::Utc::now(),
    })
}
