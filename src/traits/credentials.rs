//! Credentials provider trait abstraction.
//!
//! The session token must survive app restarts; where it lives is behind
//! [`CredentialsProvider`] so tests can keep it in memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Credentials;

/// Credentials operation errors.
#[derive(Debug, Clone, Error)]
pub enum CredentialsError {
    #[error("Failed to load credentials: {0}")]
    LoadFailed(String),

    #[error("Failed to save credentials: {0}")]
    SaveFailed(String),

    #[error("Failed to clear credentials: {0}")]
    ClearFailed(String),

    #[error("Credentials error: {0}")]
    Other(String),
}

/// Trait for credentials storage and retrieval.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load credentials from storage.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Save credentials to storage.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    /// Clear all stored credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_display() {
        assert_eq!(
            CredentialsError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load credentials: read error"
        );
        assert_eq!(
            CredentialsError::SaveFailed("write error".to_string()).to_string(),
            "Failed to save credentials: write error"
        );
        assert_eq!(
            CredentialsError::ClearFailed("busy".to_string()).to_string(),
            "Failed to clear credentials: busy"
        );
    }
}
