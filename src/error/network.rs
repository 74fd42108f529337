//! Network-related error types.
//!
//! Errors raised while talking to the content API or fetching page images.

use std::fmt;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String, duration_secs: u64 },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Rate limited by server.
    RateLimited { retry_after_secs: Option<u64> },

    /// The body of a successful response could not be decoded.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::RateLimited { .. } => true,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For HTTP errors the server's own message wins when it sent one, since
    /// the API phrases login and validation failures for end users.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the server. Please check your internet connection.".to_string()
            }
            NetworkError::Timeout { operation, duration_secs } => {
                format!(
                    "The {} request timed out after {} seconds. Please try again.",
                    operation, duration_secs
                )
            }
            NetworkError::HttpStatus { status, message } => {
                if !message.trim().is_empty() {
                    return message.clone();
                }
                match *status {
                    400 => "The request was invalid. Please try again.".to_string(),
                    401 => "Your session has expired. Please sign in again.".to_string(),
                    403 => "You don't have access to this content.".to_string(),
                    404 => "The requested content was not found.".to_string(),
                    429 => "Too many requests. Please wait a moment and try again.".to_string(),
                    500..=599 => {
                        "The server is experiencing issues. Please try again later.".to_string()
                    }
                    _ => format!("The server returned an error (HTTP {}).", status),
                }
            }
            NetworkError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => format!(
                    "Too many requests. Please wait {} seconds before trying again.",
                    secs
                ),
                None => "Too many requests. Please wait a moment and try again.".to_string(),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an unexpected response from the server.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::RateLimited { .. } => "E_NET_RATE",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Map a transport-level [`HttpError`] for the given URL.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                operation: "HTTP".to_string(),
                duration_secs: DEFAULT_TIMEOUT_SECS,
            },
            HttpError::ServerError { status: 429, .. } => NetworkError::RateLimited {
                retry_after_secs: None,
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(message) | HttpError::Io(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }

    /// Report a timeout against the timeout the transport was actually built with.
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        match self {
            NetworkError::Timeout { operation, .. } => NetworkError::Timeout {
                operation,
                duration_secs: secs,
            },
            other => other,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation, duration_secs } => {
                write!(f, "{} timed out after {} seconds", operation, duration_secs)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
