//! Unified error type for the folio client.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::system::SystemError;
use crate::validation::ValidationErrors;

/// Unified error type for the folio client.
///
/// Every async effect converts whatever went wrong into one of these, and the
/// store turns [`FolioError::user_message`] into an error toast.
#[derive(Debug)]
pub enum FolioError {
    /// Network-related errors (connections, HTTP, malformed bodies).
    Network(NetworkError),

    /// Authentication/authorization errors.
    Auth(AuthError),

    /// Client-side form validation failed; nothing was sent.
    Validation(ValidationErrors),

    /// System/filesystem errors.
    System(SystemError),

    /// A content id, page or plan that does not exist locally.
    NotFound { what: String },

    /// The command line could not be understood.
    Usage { message: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<FolioError>,
        context: ErrorContext,
    },
}

impl FolioError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            FolioError::Network(NetworkError::HttpStatus { status, .. }) => match *status {
                401 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::User,
            },
            FolioError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            FolioError::Network(_) => ErrorCategory::Network,
            FolioError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::User
                }
            }
            FolioError::Validation(_) | FolioError::NotFound { .. } | FolioError::Usage { .. } => {
                ErrorCategory::User
            }
            FolioError::System(SystemError::EnvironmentError { .. }) => {
                ErrorCategory::Configuration
            }
            FolioError::System(_) => ErrorCategory::System,
            FolioError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if a manual retry is likely to help.
    pub fn is_retryable(&self) -> bool {
        match self {
            FolioError::Network(err) => err.is_retryable(),
            FolioError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message, suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            FolioError::Network(err) => err.user_message(),
            FolioError::Auth(err) => err.user_message(),
            FolioError::Validation(errors) => errors
                .first_message()
                .unwrap_or("Please check the form and try again.")
                .to_string(),
            FolioError::System(err) => err.user_message(),
            FolioError::NotFound { what } => format!("{} could not be found.", what),
            FolioError::Usage { message } => message.clone(),
            FolioError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FolioError::Network(err) => err.error_code(),
            FolioError::Auth(err) => err.error_code(),
            FolioError::Validation(_) => "E_VALIDATION",
            FolioError::System(err) => err.error_code(),
            FolioError::NotFound { .. } => "E_NOT_FOUND",
            FolioError::Usage { .. } => "E_USAGE",
            FolioError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        FolioError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            FolioError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &FolioError {
        match self {
            FolioError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error requires signing in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            FolioError::Auth(err) => err.requires_reauth(),
            FolioError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            FolioError::WithContext { error, .. } => error.requires_reauth(),
            _ => false,
        }
    }

    /// Shorthand for a [`FolioError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        FolioError::NotFound { what: what.into() }
    }
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolioError::Network(err) => write!(f, "{}", err),
            FolioError::Auth(err) => write!(f, "{}", err),
            FolioError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            FolioError::System(err) => write!(f, "{}", err),
            FolioError::NotFound { what } => write!(f, "Not found: {}", what),
            FolioError::Usage { message } => write!(f, "Usage: {}", message),
            FolioError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FolioError::Network(err) => Some(err),
            FolioError::Auth(err) => Some(err),
            FolioError::System(err) => Some(err),
            FolioError::Validation(_) | FolioError::NotFound { .. } | FolioError::Usage { .. } => {
                None
            }
            FolioError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for FolioError {
    fn from(err: NetworkError) -> Self {
        FolioError::Network(err)
    }
}

impl From<AuthError> for FolioError {
    fn from(err: AuthError) -> Self {
        FolioError::Auth(err)
    }
}

impl From<SystemError> for FolioError {
    fn from(err: SystemError) -> Self {
        FolioError::System(err)
    }
}

impl From<ValidationErrors> for FolioError {
    fn from(errors: ValidationErrors) -> Self {
        FolioError::Validation(errors)
    }
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        FolioError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
