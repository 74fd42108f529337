//! Client configuration.
//!
//! Use the builder methods to customize, or [`ClientConfig::from_env`] to
//! pick up overrides from the environment.
//!
//! # Example
//!
//! ```ignore
//! use folio::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_api_base_url("http://localhost:4000/api")
//!     .with_request_timeout_secs(10);
//! ```

use std::time::Duration;

use crate::api::DEFAULT_API_URL;
use crate::error::{FolioResult, SystemError};
use crate::reader::ReaderConfig;

/// Overrides the API base URL.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// Overrides the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "FOLIO_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the content API, without a trailing slash
    pub api_base_url: String,
    /// Per-request timeout (default: 30)
    pub request_timeout_secs: u64,
    /// Reader tuning
    pub reader: ReaderConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            reader: ReaderConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_reader(mut self, reader: ReaderConfig) -> Self {
        self.reader = reader;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Defaults overridden by `FOLIO_API_URL` and `FOLIO_TIMEOUT_SECS`.
    ///
    /// Blank values are ignored; a timeout that is not a positive integer
    /// is an error.
    pub fn from_env() -> FolioResult<Self> {
        let mut config = Self::default();

        if let Some(url) = non_blank_var(API_URL_ENV) {
            config = config.with_api_base_url(url);
        }

        if let Some(raw) = non_blank_var(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| SystemError::EnvironmentError {
                    variable: TIMEOUT_ENV.to_string(),
                    message: format!("expected a positive number of seconds, got '{}'", raw),
                })?;
            config = config.with_request_timeout_secs(secs);
        }

        Ok(config)
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
