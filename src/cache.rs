use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use crate::geonames::UpstreamRequest;
use crate::metrics::CACHE_SIZE;

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub body: Value,
    pub created_at: Instant,
}

// Upstream bodies by request, the username is not part of the key
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.is_enabled() {
            return None;
        }

        let fresh = self
            .entries
            .get(key)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.body.clone());

        if fresh.is_none() && self.entries.remove(key).is_some() {
            CACHE_SIZE.set(self.entries.len() as f64);
        }
        fresh
    }

    pub fn insert(&self, key: String, body: Value) {
        if !self.is_enabled() {
            return;
        }

        // sweep expired entries, keys are user input and never come back
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.created_at.elapsed() < ttl);

        self.entries.insert(key, CacheEntry {
            body,
            created_at: Instant::now(),
        });
        CACHE_SIZE.set(self.entries.len() as f64);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Create a cache key (hash of endpoint + query params)
pub fn make_cache_key(req: &UpstreamRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(req.endpoint);
    for (name, value) in &req.params {
        hasher.update([0u8]);
        hasher.update(name);
        hasher.update([b'=']);
        hasher.update(value);
    }
    format!("{:x}", hasher.finalize())
}
