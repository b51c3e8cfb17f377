//! Google Books configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Google Books API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleBooksConfig {
    /// API key; the public quota applies when unset
    pub api_key: Option<Secret<String>>,

    /// Base URL of the `books/v1` API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GoogleBooksConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate Google Books configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidGoogleBooksUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}
