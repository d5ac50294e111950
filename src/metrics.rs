use lazy_static::lazy_static;
use prometheus::{
    Counter, Encoder, Gauge, Histogram, TextEncoder, register_counter, register_gauge,
    register_histogram,
};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("geonames_requests_total", "Total number of gated requests").unwrap();
    pub static ref UPSTREAM_CALLS: Counter =
        register_counter!("geonames_upstream_calls_total", "Calls sent to Geonames").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("geonames_upstream_failures_total", "Failed calls to Geonames").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("geonames_rate_limited_total", "Requests rejected by the rate governor").unwrap();
    pub static ref UNAUTHORIZED: Counter =
        register_counter!("geonames_unauthorized_total", "Requests rejected for missing credentials").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("geonames_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("geonames_cache_misses_total", "Total cache misses").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "geonames_upstream_latency_seconds",
        "Geonames call latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("geonames_cache_size", "Current number of items in cache").unwrap();
}

// Text exposition of everything in the default registry
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
