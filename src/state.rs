use std::time::Duration;
use crate::cache::ResponseCache;
use crate::config::Args;
use crate::credential::CredentialGate;
use crate::error::ConfigError;
use crate::geonames::GeonamesClient;
use crate::rate_limit::RateGovernor;
// app's shared state, built once in main and handed to every route

pub struct AppState {
    pub geonames: GeonamesClient,
    pub credentials: CredentialGate,
    pub governor: RateGovernor,
    pub cache: ResponseCache,
}

impl AppState {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().build()?;
        let geonames = GeonamesClient::new(
            client,
            &args.geonames_url,
            Duration::from_secs(args.upstream_timeout),
        )?;

        Ok(Self {
            geonames,
            credentials: CredentialGate::new(args.geonames_username.clone()),
            governor: RateGovernor::new(args.requests_per_minute, args.requests_per_hour),
            cache: ResponseCache::new(Duration::from_secs(args.cache_ttl)),
        })
    }
}
