//! Search behaviour configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Paging and debounce settings for book search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Page size used when a request does not ask for one
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Quiet period before a typed query is searched, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SearchConfig {
    /// Get debounce as Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 || self.page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSize(self.max_page_size));
        }
        if self.debounce_ms > 10_000 {
            return Err(ValidationError::InvalidDebounce);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    40
}

fn default_debounce_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_page_size, 40);
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_size_above_max_is_invalid() {
        let config = SearchConfig {
            page_size: 50,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPageSize(40))
        ));
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let config = SearchConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
