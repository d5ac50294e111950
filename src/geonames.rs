use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;
use crate::metrics::{UPSTREAM_CALLS, UPSTREAM_FAILURES, UPSTREAM_LATENCY};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("could not build url for {endpoint}: {source}")]
    Url {
        endpoint: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

// One Geonames call: endpoint + query params, without the username
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    pub fn search(q: &str, max_rows: u32, lang: &str, style: &str) -> Self {
        Self {
            endpoint: "searchJSON",
            params: vec![
                ("q", q.to_string()),
                ("maxRows", max_rows.to_string()),
                ("lang", lang.to_string()),
                ("style", style.to_string()),
            ],
        }
    }

    pub fn timezone(lat: f64, lng: f64) -> Self {
        Self {
            endpoint: "timezoneJSON",
            params: vec![("lat", lat.to_string()), ("lng", lng.to_string())],
        }
    }

    pub fn cities(north: f64, south: f64, east: f64, west: f64, lang: &str) -> Self {
        Self {
            endpoint: "citiesJSON",
            params: vec![
                ("north", north.to_string()),
                ("south", south.to_string()),
                ("east", east.to_string()),
                ("west", west.to_string()),
                ("lang", lang.to_string()),
            ],
        }
    }

    pub fn country_info(country: &str) -> Self {
        Self {
            endpoint: "countryInfoJSON",
            params: vec![("country", country.to_string())],
        }
    }
}

// Geonames HTTP client. Knows nothing about quotas or credentials state
pub struct GeonamesClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl GeonamesClient {
    pub fn new(client: reqwest::Client, base_url: &str, timeout: Duration) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn url_for(&self, req: &UpstreamRequest, username: &str) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.join(req.endpoint).map_err(|source| UpstreamError::Url {
            endpoint: req.endpoint,
            source,
        })?;
        url.query_pairs_mut()
            .extend_pairs(req.params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("username", username);
        Ok(url)
    }

    // Send the call and hand back the JSON body as is
    pub async fn fetch(&self, req: &UpstreamRequest, username: &str) -> Result<Value, UpstreamError> {
        let url = self.url_for(req, username)?;
        let endpoint = req.endpoint;

        UPSTREAM_CALLS.inc();
        let start_time = Instant::now();

        let result = self.client.get(url).timeout(self.timeout).send().await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        let outcome = match result {
            Ok(res) if res.status() == StatusCode::OK => res
                .json::<Value>()
                .await
                .map_err(|source| UpstreamError::Decode { endpoint, source }),
            Ok(res) => Err(UpstreamError::Status {
                endpoint,
                status: res.status(),
            }),
            Err(source) => Err(UpstreamError::Transport { endpoint, source }),
        };

        if let Err(e) = &outcome {
            UPSTREAM_FAILURES.inc();
            tracing::error!(endpoint, error = %e, "Geonames call failed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GeonamesClient {
        GeonamesClient::new(reqwest::Client::new(), base, Duration::from_secs(1))
            .expect("valid base url")
    }

    #[test]
    fn url_carries_params_and_username() {
        let url = client("http://api.geonames.org")
            .url_for(&UpstreamRequest::search("São Paulo", 5, "pt", "medium"), "demo")
            .expect("url");

        assert_eq!(url.path(), "/searchJSON");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "São Paulo".to_string()),
                ("maxRows".to_string(), "5".to_string()),
                ("lang".to_string(), "pt".to_string()),
                ("style".to_string(), "medium".to_string()),
                ("username".to_string(), "demo".to_string()),
            ]
        );
    }

    #[test]
    fn endpoints_map_to_geonames_paths() {
        let c = client("http://localhost:9000/");
        let path = |r: UpstreamRequest| c.url_for(&r, "u").expect("url").path().to_string();

        assert_eq!(path(UpstreamRequest::timezone(51.5, -0.12)), "/timezoneJSON");
        assert_eq!(path(UpstreamRequest::cities(1.0, 0.0, 1.0, 0.0, "en")), "/citiesJSON");
        assert_eq!(path(UpstreamRequest::country_info("GB")), "/countryInfoJSON");
    }

    #[test]
    fn base_path_is_kept() {
        let req = UpstreamRequest::country_info("GB");

        for base in ["http://proxy.local/geonames", "http://proxy.local/geonames/"] {
            let url = client(base).url_for(&req, "u").expect("url");
            assert_eq!(url.path(), "/geonames/countryInfoJSON");
        }
        let url = client("http://api.geonames.org").url_for(&req, "u").expect("url");
        assert_eq!(url.path(), "/countryInfoJSON");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(GeonamesClient::new(reqwest::Client::new(), "not a url", Duration::from_secs(1)).is_err());
    }
}
