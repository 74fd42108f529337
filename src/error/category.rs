//! Error category classification for unified error handling.
//!
//! Categories drive how an error is surfaced: the toast text shown to the
//! reader, the hint printed by the CLI, and whether a manual retry makes sense.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems talking to the content API.
    Network,

    /// Login, expired or missing session.
    Auth,

    /// The API answered with a 5xx.
    Server,

    /// The API answered with something we could not understand.
    Client,

    /// Invalid input (form validation, unknown content id).
    User,

    /// Filesystem problems (downloads, cache, credentials file).
    System,

    /// Missing or malformed configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if a manual retry (pull-to-refresh) is likely to succeed.
    ///
    /// Nothing in the client retries on its own; this only shapes the hint.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Client => "Unexpected response",
            ErrorCategory::User => "Invalid input",
            ErrorCategory::System => "Storage error",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and refresh",
            ErrorCategory::Auth => "Sign in again to continue",
            ErrorCategory::Server => "The service may be busy. Please refresh in a moment",
            ErrorCategory::Client => "Please update the app or report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check available storage and file permissions",
            ErrorCategory::Configuration => "Check the FOLIO_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
