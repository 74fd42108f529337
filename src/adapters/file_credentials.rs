//! File-based credentials provider adapter.

use async_trait::async_trait;
use std::path::Path;

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// File-based credentials provider backed by [`CredentialsManager`].
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
}

impl FileCredentialsProvider {
    /// Provider for `~/.folio/.credentials.json`.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new()
            .map(Self::with_manager)
            .ok_or_else(|| CredentialsError::Other("Failed to determine home directory".to_string()))
    }

    pub fn with_manager(manager: CredentialsManager) -> Self {
        Self { manager }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let creds = self.manager.load();
        if creds.is_empty() {
            Ok(None)
        } else {
            Ok(Some(creds))
        }
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        self.manager.save(creds)
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.manager.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, User};
    use tempfile::TempDir;

    fn provider(temp_dir: &TempDir) -> FileCredentialsProvider {
        FileCredentialsProvider::with_manager(CredentialsManager::with_path(
            temp_dir.path().join("creds.json"),
        ))
    }

    #[tokio::test]
    async fn test_load_nothing_stored() {
        let temp_dir = TempDir::new().unwrap();
        assert!(provider(&temp_dir).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let provider = provider(&temp_dir);
        let creds = Credentials::from_session(&Session {
            token: "abc".to_string(),
            user: User::default(),
        });

        provider.save(&creds).await.unwrap();
        assert_eq!(provider.load().await.unwrap(), Some(creds));

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
        assert!(!provider.credentials_path().exists());
    }
}
