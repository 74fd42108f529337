//! Sign-in state: restore, login, logout and profile.

use bytes::Bytes;

use super::FolioApp;
use crate::auth::Credentials;
use crate::error::{AuthError, FolioError, FolioResult};
use crate::models::{Profile, Session};
use crate::store::{effects, AuthAction};
use crate::traits::{CredentialsError, CredentialsProvider, HttpClient};
use crate::validation::{LoginForm, OtpForm, ProfileForm, SignupForm};

fn load_failed(err: CredentialsError) -> FolioError {
    AuthError::CredentialsLoadFailed {
        message: err.to_string(),
    }
    .into()
}

fn save_failed(err: CredentialsError) -> FolioError {
    AuthError::CredentialsSaveFailed {
        message: err.to_string(),
    }
    .into()
}

impl<C: HttpClient, P: CredentialsProvider> FolioApp<C, P> {
    /// Rehydrate the session stored by a previous run.
    ///
    /// Returns whether a session was restored.
    pub async fn restore(&mut self) -> FolioResult<bool> {
        let stored = self.credentials.load().await.map_err(load_failed)?;
        let Some(session) = stored.and_then(|c| c.session()) else {
            tracing::debug!("No stored session");
            return Ok(false);
        };

        tracing::info!("Restored session for {}", session.user.email);
        self.api.set_auth_token(Some(session.token.clone()));
        self.store.dispatch(AuthAction::Restored(session));
        Ok(true)
    }

    /// Sign in and persist the session for the next launch.
    ///
    /// A failure to persist is logged but does not undo the login.
    pub async fn login(&mut self, email: &str, password: &str) -> FolioResult<Session> {
        let form = LoginForm::new(email, password);
        let session = effects::login(&mut self.store, &self.api, &form).await?;
        self.start_session(&session).await;
        Ok(session)
    }

    /// Create an account. Returns the server's note about the emailed code.
    pub async fn signup(&mut self, form: &SignupForm) -> FolioResult<String> {
        effects::signup(&mut self.store, &self.api, form).await
    }

    /// Confirm a new account with its emailed code and sign in, persisting
    /// the session like [`login`](Self::login).
    pub async fn verify_otp(&mut self, email: &str, otp: &str) -> FolioResult<Session> {
        let form = OtpForm::new(email, otp);
        let session = effects::verify_otp(&mut self.store, &self.api, &form).await?;
        self.start_session(&session).await;
        Ok(session)
    }

    async fn start_session(&mut self, session: &Session) {
        self.api.set_auth_token(Some(session.token.clone()));
        if let Err(e) = self
            .credentials
            .save(&Credentials::from_session(session))
            .await
        {
            tracing::warn!("Signed in but could not store the session: {}", e);
        }
    }

    /// Sign out locally and forget the stored session.
    pub async fn logout(&mut self) -> FolioResult<()> {
        effects::logout(&mut self.store);
        self.api.set_auth_token(None);
        self.credentials.clear().await.map_err(save_failed)
    }

    fn require_session(&self) -> FolioResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    /// Drop a session the server no longer accepts.
    pub(super) async fn expire_if_rejected(&mut self, err: &FolioError) {
        if !err.requires_reauth() || !self.is_authenticated() {
            return;
        }
        tracing::warn!("Session rejected by the server, signing out");
        self.store.dispatch(AuthAction::Logout);
        self.api.set_auth_token(None);
        if let Err(e) = self.credentials.clear().await {
            tracing::warn!("Could not clear stored session: {}", e);
        }
    }

    pub async fn refresh_profile(&mut self) -> FolioResult<Profile> {
        self.require_session()?;
        let result = effects::fetch_profile(&mut self.store, &self.api).await;
        if let Err(ref e) = result {
            self.expire_if_rejected(e).await;
        }
        result
    }

    pub async fn update_profile(&mut self, form: &ProfileForm) -> FolioResult<Profile> {
        self.require_session()?;
        let result = effects::update_profile(&mut self.store, &self.api, form).await;
        if let Err(ref e) = result {
            self.expire_if_rejected(e).await;
        }
        result
    }

    pub async fn upload_profile_image(
        &mut self,
        file_name: &str,
        data: impl Into<Bytes>,
    ) -> FolioResult<Profile> {
        self.require_session()?;
        let result =
            effects::upload_profile_image(&mut self.store, &self.api, file_name, data).await;
        if let Err(ref e) = result {
            self.expire_if_rejected(e).await;
        }
        result
    }
}
