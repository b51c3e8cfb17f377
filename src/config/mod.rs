//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOOKLENS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use booklens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod database;
mod error;
mod google_books;
mod search;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use google_books::GoogleBooksConfig;
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration with an in-memory review store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; reviews are kept in memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Google Books API configuration
    #[serde(default)]
    pub google_books: GoogleBooksConfig,

    /// Search paging and debounce
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BOOKLENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOKLENS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOOKLENS__DATABASE__URL=...` -> `database.url = ...`
    /// - `BOOKLENS__GOOGLE_BOOKS__API_KEY=...` -> `google_books.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOKLENS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.google_books.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
