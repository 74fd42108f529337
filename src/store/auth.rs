//! Auth slice: the current session.

use crate::models::{Session, User};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginPending,
    LoginFulfilled(Session),
    LoginRejected(String),
    /// Account created; the session arrives once the emailed code is verified.
    SignupFulfilled,
    /// Session rehydrated from stored credentials on launch.
    Restored(Session),
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSlice {
    pub session: Option<Session>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl AuthSlice {
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginPending => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::LoginFulfilled(session) | AuthAction::Restored(session) => {
                self.loading = false;
                self.error = None;
                self.session = Some(session);
                self.revision += 1;
            }
            AuthAction::SignupFulfilled => {
                self.loading = false;
                self.error = None;
            }
            AuthAction::LoginRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::Logout => {
                self.loading = false;
                self.error = None;
                if self.session.take().is_some() {
                    self.revision += 1;
                }
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}
