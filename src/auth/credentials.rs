//! Credentials storage for the folio client.
//!
//! Stored as pretty JSON at `~/.folio/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{Session, User};
use crate::traits::CredentialsError;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".folio";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Persisted login state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token for API requests.
    pub token: Option<String>,
    /// The signed-in account.
    pub user: Option<User>,
    /// When the credentials were written, Unix seconds.
    pub saved_at: Option<i64>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a fresh login.
    pub fn from_session(session: &Session) -> Self {
        Self {
            token: Some(session.token.clone()),
            user: Some(session.user.clone()),
            saved_at: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// Check if the credentials carry a non-empty token.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Check if nothing at all is stored.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none() && self.saved_at.is_none()
    }

    /// Rebuild the session to restore on launch.
    pub fn session(&self) -> Option<Session> {
        if !self.has_token() {
            return None;
        }
        Some(Session {
            token: self.token.clone()?,
            user: self.user.clone().unwrap_or_default(),
        })
    }
}

/// Manages credential storage and retrieval on disk.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for `~/.folio/.credentials.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE)))
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be parsed.
    pub fn load(&self) -> Credentials {
        if !self.credentials_path.exists() {
            return Credentials::default();
        }

        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Could not open {}: {}", self.credentials_path.display(), e);
                return Credentials::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(creds) => creds,
            Err(e) => {
                tracing::warn!("Ignoring corrupt credentials file: {}", e);
                Credentials::default()
            }
        }
    }

    /// Save credentials, creating the parent directory if needed.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }

    /// Remove the credentials file. Succeeds if it never existed.
    pub fn clear(&self) -> Result<(), CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.credentials_path)
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> CredentialsManager {
        CredentialsManager::with_path(temp_dir.path().join(CREDENTIALS_DIR).join(CREDENTIALS_FILE))
    }

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "ada@example.com".to_string(),
                name: Some("Ada".to_string()),
                avatar: None,
            },
        }
    }

    #[test]
    fn test_default_is_empty() {
        let creds = Credentials::default();
        assert!(creds.is_empty());
        assert!(!creds.has_token());
        assert!(creds.session().is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_token() {
        let creds = Credentials {
            token: Some(String::new()),
            ..Credentials::default()
        };
        assert!(!creds.has_token());
        assert!(creds.session().is_none());
    }

    #[test]
    fn test_from_session_restores_session() {
        let creds = Credentials::from_session(&session());
        assert!(creds.has_token());
        assert!(creds.saved_at.is_some());
        assert_eq!(creds.session(), Some(session()));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert_eq!(manager.load(), Credentials::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let creds = Credentials::from_session(&session());

        manager.save(&creds).unwrap();
        assert!(manager.credentials_path().exists());
        assert_eq!(manager.load(), creds);
    }

    #[test]
    fn test_corrupt_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::create_dir_all(manager.credentials_path().parent().unwrap()).unwrap();
        fs::write(manager.credentials_path(), "{ not json").unwrap();
        assert_eq!(manager.load(), Credentials::default());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert!(manager.clear().is_ok());

        manager.save(&Credentials::from_session(&session())).unwrap();
        manager.clear().unwrap();
        assert!(!manager.credentials_path().exists());
    }
}
