mod health;
mod metrics;
mod places;
mod status;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use places::{
    brazilian_search_handler, cities_handler, country_info_handler, search_handler,
    timezone_handler,
};
pub use status::status_handler;

use serde_json::Value;
use crate::cache::make_cache_key;
use crate::error::ApiError;
use crate::geonames::UpstreamRequest;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, RATE_LIMITED, REQUEST_TOTAL, UNAUTHORIZED};
use crate::state::AppState;

// Gate every upstream call: credentials, then cache, then quota, then Geonames
pub(crate) async fn fetch_gated(state: &AppState, req: UpstreamRequest) -> Result<Value, ApiError> {
    REQUEST_TOTAL.inc();

    let Some(username) = state.credentials.identity() else {
        UNAUTHORIZED.inc();
        return Err(ApiError::CredentialsMissing);
    };

    let cache_key = make_cache_key(&req);
    if let Some(body) = state.cache.get(&cache_key) {
        CACHE_HITS.inc();
        tracing::debug!(endpoint = req.endpoint, "cache hit");
        return Ok(body);
    }
    if state.cache.is_enabled() {
        CACHE_MISSES.inc();
    }

    if !state.governor.try_acquire() {
        RATE_LIMITED.inc();
        return Err(ApiError::RateLimited);
    }

    let body = state.geonames.fetch(&req, username).await?;
    state.cache.insert(cache_key, body.clone());
    Ok(body)
}
