//! In-memory credentials provider for testing.
//!
//! Provides a credentials provider that stores credentials in memory,
//! suitable for testing without file system access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::credentials::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// In-memory credentials provider for testing.
///
/// This provider stores credentials in memory, allowing tests to
/// verify credential operations without touching the file system.
///
/// # Example
///
/// ```ignore
/// use folio::adapters::mock::InMemoryCredentials;
/// use folio::traits::CredentialsProvider;
/// use folio::auth::Credentials;
///
/// let provider = InMemoryCredentials::new();
///
/// // Initially empty
/// assert!(provider.load().await?.is_none());
///
/// // Save credentials
/// let creds = Credentials {
///     token: Some("test-token".to_string()),
///     ..Default::default()
/// };
/// provider.save(&creds).await?;
///
/// // Load them back
/// let loaded = provider.load().await?.unwrap();
/// assert_eq!(loaded.token, Some("test-token".to_string()));
///
/// // Clear
/// provider.clear().await?;
/// assert!(provider.load().await?.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCredentials {
    /// Stored credentials
    credentials: Arc<Mutex<Option<Credentials>>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentials {
    /// Create a new in-memory credentials provider.
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(Mutex::new(None)),
            save_should_fail: Arc::new(Mutex::new(false)),
            load_should_fail: Arc::new(Mutex::new(false)),
            clear_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a provider with initial credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        Self {
            credentials: Arc::new(Mutex::new(Some(creds))),
            save_should_fail: Arc::new(Mutex::new(false)),
            load_should_fail: Arc::new(Mutex::new(false)),
            clear_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current credentials synchronously (for testing).
    pub fn get_credentials(&self) -> Option<Credentials> {
        self.credentials.lock().unwrap().clone()
    }

    /// Set credentials synchronously (for testing).
    pub fn set_credentials(&self, creds: Option<Credentials>) {
        *self.credentials.lock().unwrap() = creds;
    }
}

impl Default for InMemoryCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }

        *self.credentials.lock().unwrap() = Some(creds.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(CredentialsError::ClearFailed("Mock clear failure".to_string()));
        }

        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn creds(token: &str) -> Credentials {
        Credentials {
            token: Some(token.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_with_credentials() {
        let provider = InMemoryCredentials::with_credentials(creds("initial-token"));
        let loaded = provider.get_credentials().unwrap();
        assert_eq!(loaded.token, Some("initial-token".to_string()));
    }

    #[tokio::test]
    async fn test_load_empty() {
        let provider = InMemoryCredentials::default();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let provider = InMemoryCredentials::new();
        let saved = Credentials {
            token: Some("test-token".to_string()),
            user: Some(User {
                id: "user-123".to_string(),
                email: "reader@example.com".to_string(),
                name: None,
                avatar: None,
            }),
            saved_at: Some(1_700_000_000),
        };

        provider.save(&saved).await.unwrap();

        let loaded = provider.load().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_clear() {
        let provider = InMemoryCredentials::new();
        provider.save(&creds("test-token")).await.unwrap();
        assert!(provider.load().await.unwrap().is_some());

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failures() {
        let provider = InMemoryCredentials::new();
        provider.set_load_should_fail(true);
        provider.set_save_should_fail(true);
        provider.set_clear_should_fail(true);

        assert!(matches!(
            provider.load().await,
            Err(CredentialsError::LoadFailed(_))
        ));
        assert!(matches!(
            provider.save(&Credentials::default()).await,
            Err(CredentialsError::SaveFailed(_))
        ));
        assert!(matches!(
            provider.clear().await,
            Err(CredentialsError::ClearFailed(_))
        ));
    }

    #[test]
    fn test_clone_shares_state() {
        let provider = InMemoryCredentials::new();
        provider.set_credentials(Some(creds("shared-token")));

        let cloned = provider.clone();
        assert_eq!(
            cloned.get_credentials().unwrap().token,
            Some("shared-token".to_string())
        );

        provider.set_credentials(None);
        assert!(cloned.get_credentials().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_credentials() {
        let provider = InMemoryCredentials::new();
        provider.save(&creds("token-1")).await.unwrap();
        provider.save(&creds("token-2")).await.unwrap();

        let loaded = provider.load().await.unwrap().unwrap();
        assert_eq!(loaded.token, Some("token-2".to_string()));
    }
}
