//! Client-side store.
//!
//! One [`Store`] holds a slice per domain plus the toast queue. Every
//! mutation goes through [`Store::dispatch`], which routes the action to the
//! owning slice's reducer. Async work lives in [`effects`].
//!
//! Each slice carries a `revision` that is bumped whenever its data changes;
//! [`crate::selectors::Selectors`] memoizes on it.

pub mod auth;
pub mod content;
pub mod effects;
pub mod plans;
pub mod profile;
pub mod toast;

pub use auth::{AuthAction, AuthSlice};
pub use content::{ContentAction, ContentSlice};
pub use plans::{PlansAction, PlansSlice};
pub use profile::{ProfileAction, ProfileSlice};
pub use toast::{Toast, ToastKind, ToastQueue, DEFAULT_TOAST_LIFETIME_SECS};

/// Any action understood by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Content(ContentAction),
    Profile(ProfileAction),
    Plans(PlansAction),
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<ContentAction> for Action {
    fn from(action: ContentAction) -> Self {
        Action::Content(action)
    }
}

impl From<ProfileAction> for Action {
    fn from(action: ProfileAction) -> Self {
        Action::Profile(action)
    }
}

impl From<PlansAction> for Action {
    fn from(action: PlansAction) -> Self {
        Action::Plans(action)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub auth: AuthSlice,
    pub content: ContentSlice,
    pub profile: ProfileSlice,
    pub plans: PlansSlice,
    pub toasts: ToastQueue,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action to the store.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!("dispatch {}", action_name(&action));
        match action {
            Action::Auth(AuthAction::Logout) => {
                // Signed-out users see nothing that belonged to the account
                self.auth.reduce(AuthAction::Logout);
                self.profile.reduce(ProfileAction::Clear);
                self.content.reduce(ContentAction::Clear);
            }
            Action::Auth(action) => self.auth.reduce(action),
            Action::Content(action) => self.content.reduce(action),
            Action::Profile(action) => self.profile.reduce(action),
            Action::Plans(action) => self.plans.reduce(action),
        }
    }

    /// True while any slice has a request in flight.
    pub fn is_loading(&self) -> bool {
        self.auth.loading || self.content.loading || self.profile.loading || self.plans.loading
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Auth(a) => match a {
            AuthAction::LoginPending => "auth/login/pending",
            AuthAction::LoginFulfilled(_) => "auth/login/fulfilled",
            AuthAction::LoginRejected(_) => "auth/login/rejected",
            AuthAction::SignupFulfilled => "auth/signup/fulfilled",
            AuthAction::Restored(_) => "auth/restored",
            AuthAction::Logout => "auth/logout",
        },
        Action::Content(a) => match a {
            ContentAction::FetchPending => "content/fetch/pending",
            ContentAction::FetchFulfilled(_) => "content/fetch/fulfilled",
            ContentAction::FetchRejected(_) => "content/fetch/rejected",
            ContentAction::DetailFulfilled(_) => "content/detail/fulfilled",
            ContentAction::Clear => "content/clear",
        },
        Action::Profile(a) => match a {
            ProfileAction::FetchPending => "profile/fetch/pending",
            ProfileAction::FetchFulfilled(_) => "profile/fetch/fulfilled",
            ProfileAction::FetchRejected(_) => "profile/fetch/rejected",
            ProfileAction::UpdatePending => "profile/update/pending",
            ProfileAction::UpdateFulfilled(_) => "profile/update/fulfilled",
            ProfileAction::UpdateRejected(_) => "profile/update/rejected",
            ProfileAction::Clear => "profile/clear",
        },
        Action::Plans(a) => match a {
            PlansAction::FetchPending => "plans/fetch/pending",
            PlansAction::FetchFulfilled(_) => "plans/fetch/fulfilled",
            PlansAction::FetchRejected(_) => "plans/fetch/rejected",
        },
    }
}
