use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use crate::geonames::UpstreamError;

// Failures a gated route can answer with. Upstream detail goes to the log only
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Geonames credentials not configured")]
    CredentialsMissing,
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Error contacting Geonames service")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CredentialsMissing => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "status": "KO",
            "detail": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

// Startup failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid Geonames url: {0}")]
    GeonamesUrl(#[from] url::ParseError),
    #[error("could not build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
