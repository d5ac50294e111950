use clap::Parser;
use crate::rate_limit::{DEFAULT_REQUESTS_PER_HOUR, DEFAULT_REQUESTS_PER_MINUTE};

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "geonames-gateway")]
#[command(about = "Rate limited REST gateway for the Geonames gazetteer")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Geonames account name sent as `username` on every call
    #[arg(long, env = "GEONAMES_USERNAME")]
    pub geonames_username: Option<String>,

    // Geonames API base url
    #[arg(long, env = "GEONAMES_URL", default_value = "http://api.geonames.org")]
    pub geonames_url: String,

    // Max upstream calls in any rolling minute
    #[arg(long, env = "GEONAMES_REQUESTS_PER_MINUTE", default_value_t = DEFAULT_REQUESTS_PER_MINUTE)]
    pub requests_per_minute: u32,

    // Max upstream calls in any rolling hour
    #[arg(long, env = "GEONAMES_REQUESTS_PER_HOUR", default_value_t = DEFAULT_REQUESTS_PER_HOUR)]
    pub requests_per_hour: u32,

    // Cache TTL in seconds, 0 turns the cache off
    #[arg(short, long, env = "GEONAMES_CACHE_TTL", default_value_t = 30)]
    pub cache_ttl: u64,

    // Upstream request timeout in seconds
    #[arg(long, env = "GEONAMES_TIMEOUT", default_value_t = 10)]
    pub upstream_timeout: u64,
}
