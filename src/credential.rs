use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

pub const NOT_CONFIGURED: &str = "Geonames username not configured";

// Outcome of a validate() call, published on the status endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub last_checked: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// last validate() call, if any
#[derive(Debug, Clone, Copy)]
pub struct LastValidation {
    pub checked_at: DateTime<Utc>,
    pub outcome: bool,
}

// Holds the Geonames username for the lifetime of the process.
// Usability is decided by presence alone. Nothing here talks to Geonames.
pub struct CredentialGate {
    username: Option<String>,
    last: Mutex<Option<LastValidation>>,
}

impl CredentialGate {
    pub fn new(username: Option<String>) -> Self {
        Self {
            username,
            last: Mutex::new(None),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.identity().is_some()
    }

    // username to send upstream, None when missing or empty
    pub fn identity(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }

    pub fn validate(&self) -> ValidationResult {
        let is_valid = self.is_usable();
        let mut last = self.last.lock();

        // wall clock can step backwards; last_checked must not
        let mut checked_at = Utc::now();
        if let Some(prev) = last.as_ref() {
            checked_at = checked_at.max(prev.checked_at);
        }

        *last = Some(LastValidation {
            checked_at,
            outcome: is_valid,
        });

        ValidationResult {
            is_valid,
            last_checked: checked_at,
            error: (!is_valid).then(|| NOT_CONFIGURED.to_string()),
        }
    }

    pub fn last_validation(&self) -> Option<LastValidation> {
        *self.last.lock()
    }

    pub fn needs_rotation(&self) -> bool {
        false
    }

    pub fn rotate(&self) -> bool {
        tracing::info!("Credential rotation requested but not implemented yet");
        false
    }
}
