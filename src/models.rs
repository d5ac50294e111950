use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::credential::ValidationResult;
use crate::rate_limit::UsageReport;

fn default_rows() -> u32 {
    10
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_style() -> String {
    "medium".to_string()
}

// GET /api/v4/geonames/search
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_rows")]
    pub max_rows: u32,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_style")]
    pub style: String,
}

// GET /api/v4/geonames/timezone
#[derive(Deserialize, Debug)]
pub struct TimezoneQuery {
    pub lat: f64,
    pub lng: f64,
}

// GET /api/v4/geonames/cities, a bounding box
#[derive(Deserialize, Debug)]
pub struct CitiesQuery {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    #[serde(default = "default_lang")]
    pub lang: String,
}

// GET /api/v4/geonames/country-info
#[derive(Deserialize, Debug)]
pub struct CountryQuery {
    pub country: String,
}

// GET /api/v4/geonames/brazilian-search
#[derive(Deserialize, Debug)]
pub struct BrazilianSearchQuery {
    pub q: String,
    #[serde(default = "default_rows")]
    pub max_results: u32,
}

// GET /api/v4/geonames/status
#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub credential_status: ValidationResult,
    pub rate_limiting: UsageReport,
    pub timestamp: DateTime<Utc>,
}
