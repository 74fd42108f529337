//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No session token available (user not logged in).
    NotAuthenticated,

    /// The server rejected the bearer token.
    SessionExpired,

    /// Login rejected (wrong email/password or bad OTP).
    InvalidCredentials { message: String },

    /// Paid content requested without an active subscription.
    AccessDenied { resource: Option<String> },

    /// Credentials could not be loaded from local storage.
    CredentialsLoadFailed { message: String },

    /// Credentials could not be written to local storage.
    CredentialsSaveFailed { message: String },
}

impl AuthError {
    /// Check if signing in again would resolve this error.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated
                | AuthError::SessionExpired
                | AuthError::CredentialsLoadFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::InvalidCredentials { message } => {
                if message.is_empty() {
                    "Invalid email or password.".to_string()
                } else {
                    message.clone()
                }
            }
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => format!("A subscription is required to open {}.", r),
                None => "A subscription is required for this content.".to_string(),
            },
            AuthError::CredentialsLoadFailed { .. } => {
                "Could not restore your session. Please sign in again.".to_string()
            }
            AuthError::CredentialsSaveFailed { .. } => {
                "Could not remember your session. You may need to sign in next time.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::AccessDenied { .. } => "E_AUTH_ACCESS",
            AuthError::CredentialsLoadFailed { .. } => "E_AUTH_CRED_LOAD",
            AuthError::CredentialsSaveFailed { .. } => "E_AUTH_CRED_SAVE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => write!(f, "Access denied to {}", r),
                None => write!(f, "Access denied"),
            },
            AuthError::CredentialsLoadFailed { message } => {
                write!(f, "Failed to load credentials: {}", message)
            }
            AuthError::CredentialsSaveFailed { message } => {
                write!(f, "Failed to save credentials: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
