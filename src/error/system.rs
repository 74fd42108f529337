//! System-related error types.
//!
//! Filesystem failures while saving downloads, measuring the cache or
//! persisting the session.

use std::fmt;
use std::path::PathBuf;

/// System-specific error variants.
#[derive(Debug, Clone)]
pub enum SystemError {
    /// File not found.
    FileNotFound { path: PathBuf },

    /// Permission denied for file/directory operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Failed to create directory.
    DirectoryCreationFailed { path: PathBuf, message: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine home directory.
    NoHomeDirectory,

    /// Could not determine cache directory.
    NoCacheDirectory,

    /// Environment variable not set or invalid.
    EnvironmentError { variable: String, message: String },
}

impl SystemError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::FileNotFound { path } => {
                format!("File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                format!("Permission denied: cannot {} '{}'.", operation, path.display())
            }
            SystemError::DirectoryCreationFailed { path, .. } => {
                format!("Failed to create directory '{}'.", path.display())
            }
            SystemError::IoError { operation, path, .. } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory.".to_string()
            }
            SystemError::NoCacheDirectory => {
                "Could not determine the cache directory.".to_string()
            }
            SystemError::EnvironmentError { variable, message } => {
                format!("Invalid value for {}: {}", variable, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "E_SYS_FILE_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::DirectoryCreationFailed { .. } => "E_SYS_DIR_CREATE",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::NoHomeDirectory => "E_SYS_NO_HOME",
            SystemError::NoCacheDirectory => "E_SYS_NO_CACHE",
            SystemError::EnvironmentError { .. } => "E_SYS_ENV",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::FileNotFound { path } => {
                write!(f, "File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied ({}) on '{}'", operation, path.display())
            }
            SystemError::DirectoryCreationFailed { path, message } => {
                write!(f, "Failed to create '{}': {}", path.display(), message)
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "{} '{}' failed: {}", operation, p.display(), message),
                None => write!(f, "{} failed: {}", operation, message),
            },
            SystemError::NoHomeDirectory => write!(f, "No home directory"),
            SystemError::NoCacheDirectory => write!(f, "No cache directory"),
            SystemError::EnvironmentError { variable, message } => {
                write!(f, "Environment variable {}: {}", variable, message)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error for the given path and operation.
pub fn classify_io_error(
    err: std::io::Error,
    path: Option<PathBuf>,
    operation: &str,
) -> SystemError {
    use std::io::ErrorKind;

    match (err.kind(), path) {
        (ErrorKind::NotFound, Some(path)) => SystemError::FileNotFound { path },
        (ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}
