//! Async action creators.
//!
//! Each effect dispatches its pending action, calls the API and then
//! dispatches fulfilled or rejected. A rejection also raises an error toast
//! carrying the error's user message. Nothing is retried: a failed request
//! stays failed until the caller runs the effect again.

use bytes::Bytes;

use super::{
    Action, AuthAction, ContentAction, PlansAction, ProfileAction, Store,
};
use crate::api::ApiClient;
use crate::error::{FolioError, FolioResult};
use crate::models::{ContentItem, ContentKind, Plan, Profile, Session};
use crate::traits::HttpClient;
use crate::validation::{LoginForm, OtpForm, ProfileForm, SignupForm};

fn reject(store: &mut Store, operation: &str, err: &FolioError, to_action: fn(String) -> Action) {
    let message = err.user_message();
    tracing::warn!("{} failed [{}]: {}", operation, err.error_code(), err);
    store.dispatch(to_action(message.clone()));
    store.toasts.error(message);
}

/// Sign in. The form is checked before anything is sent.
pub async fn login<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    form: &LoginForm,
) -> FolioResult<Session> {
    form.validate()?;

    store.dispatch(AuthAction::LoginPending);
    match api.login(form.email.trim(), &form.password).await {
        Ok(session) => {
            tracing::info!("Signed in as {}", session.user.email);
            store.dispatch(AuthAction::LoginFulfilled(session.clone()));
            Ok(session)
        }
        Err(err) => {
            reject(store, "login", &err, |m| AuthAction::LoginRejected(m).into());
            Err(err)
        }
    }
}

/// Message shown after sign-up when the server sends none.
const SIGNUP_SENT: &str = "Check your email for the verification code";

/// Create an account. The session only exists once [`verify_otp`] succeeds.
pub async fn signup<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    form: &SignupForm,
) -> FolioResult<String> {
    form.validate()?;

    store.dispatch(AuthAction::LoginPending);
    match api
        .signup(form.name.trim(), form.email.trim(), &form.password)
        .await
    {
        Ok(message) => {
            tracing::info!("Account created for {}", form.email.trim());
            store.dispatch(AuthAction::SignupFulfilled);
            let message = if message.trim().is_empty() {
                SIGNUP_SENT.to_string()
            } else {
                message
            };
            store.toasts.info(message.clone());
            Ok(message)
        }
        Err(err) => {
            reject(store, "signup", &err, |m| AuthAction::LoginRejected(m).into());
            Err(err)
        }
    }
}

/// Confirm a new account with the emailed code, which signs the user in.
pub async fn verify_otp<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    form: &OtpForm,
) -> FolioResult<Session> {
    form.validate()?;

    store.dispatch(AuthAction::LoginPending);
    match api.verify_otp(form.email.trim(), form.otp.trim()).await {
        Ok(session) => {
            tracing::info!("Verified and signed in as {}", session.user.email);
            store.dispatch(AuthAction::LoginFulfilled(session.clone()));
            Ok(session)
        }
        Err(err) => {
            reject(store, "verify", &err, |m| AuthAction::LoginRejected(m).into());
            Err(err)
        }
    }
}

/// Sign out and drop account data from the store.
pub fn logout(store: &mut Store) {
    tracing::info!("Signed out");
    store.dispatch(AuthAction::Logout);
    store.toasts.info("You have been logged out");
}

pub async fn fetch_profile<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
) -> FolioResult<Profile> {
    store.dispatch(ProfileAction::FetchPending);
    match api.fetch_profile().await {
        Ok(profile) => {
            store.dispatch(ProfileAction::FetchFulfilled(profile.clone()));
            Ok(profile)
        }
        Err(err) => {
            reject(store, "fetch profile", &err, |m| {
                ProfileAction::FetchRejected(m).into()
            });
            Err(err)
        }
    }
}

/// Validate the edit-profile form, then save it.
///
/// Validation errors are returned as [`FolioError::Validation`] for inline
/// display; they never reach the network or the store.
pub async fn update_profile<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    form: &ProfileForm,
) -> FolioResult<Profile> {
    let update = form.validate()?;

    store.dispatch(ProfileAction::UpdatePending);
    match api.update_profile(&update).await {
        Ok(profile) => {
            store.dispatch(ProfileAction::UpdateFulfilled(profile.clone()));
            store.toasts.success("Profile updated");
            Ok(profile)
        }
        Err(err) => {
            reject(store, "update profile", &err, |m| {
                ProfileAction::UpdateRejected(m).into()
            });
            Err(err)
        }
    }
}

pub async fn upload_profile_image<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    file_name: &str,
    data: impl Into<Bytes>,
) -> FolioResult<Profile> {
    store.dispatch(ProfileAction::UpdatePending);
    match api.upload_profile_image(file_name, data).await {
        Ok(profile) => {
            store.dispatch(ProfileAction::UpdateFulfilled(profile.clone()));
            store.toasts.success("Profile picture updated");
            Ok(profile)
        }
        Err(err) => {
            reject(store, "upload profile image", &err, |m| {
                ProfileAction::UpdateRejected(m).into()
            });
            Err(err)
        }
    }
}

pub async fn fetch_content<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    kind: Option<ContentKind>,
) -> FolioResult<Vec<ContentItem>> {
    store.dispatch(ContentAction::FetchPending);
    match api.list_content(kind).await {
        Ok(items) => {
            tracing::debug!("Fetched {} content items", items.len());
            store.dispatch(ContentAction::FetchFulfilled(items.clone()));
            Ok(items)
        }
        Err(err) => {
            reject(store, "fetch content", &err, |m| {
                ContentAction::FetchRejected(m).into()
            });
            Err(err)
        }
    }
}

pub async fn fetch_content_detail<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
    id: &str,
) -> FolioResult<ContentItem> {
    store.dispatch(ContentAction::FetchPending);
    match api.content_detail(id).await {
        Ok(item) => {
            store.dispatch(ContentAction::DetailFulfilled(item.clone()));
            Ok(item)
        }
        Err(err) => {
            reject(store, "fetch content detail", &err, |m| {
                ContentAction::FetchRejected(m).into()
            });
            Err(err)
        }
    }
}

pub async fn fetch_plans<C: HttpClient>(
    store: &mut Store,
    api: &ApiClient<C>,
) -> FolioResult<Vec<Plan>> {
    store.dispatch(PlansAction::FetchPending);
    match api.list_plans().await {
        Ok(plans) => {
            store.dispatch(PlansAction::FetchFulfilled(plans.clone()));
            Ok(plans)
        }
        Err(err) => {
            reject(store, "fetch plans", &err, |m| PlansAction::FetchRejected(m).into());
            Err(err)
        }
    }
}

/// Load what the home screen shows: the whole library and the plans.
///
/// Both requests run concurrently and settle independently; the first error
/// is returned after both slices have been updated.
pub async fn fetch_home<C: HttpClient>(store: &mut Store, api: &ApiClient<C>) -> FolioResult<()> {
    store.dispatch(ContentAction::FetchPending);
    store.dispatch(PlansAction::FetchPending);

    let (content, plans) = futures::join!(api.list_content(None), api.list_plans());

    let content = match content {
        Ok(items) => {
            store.dispatch(ContentAction::FetchFulfilled(items));
            Ok(())
        }
        Err(err) => {
            reject(store, "fetch content", &err, |m| {
                ContentAction::FetchRejected(m).into()
            });
            Err(err)
        }
    };
    let plans = match plans {
        Ok(plans) => {
            store.dispatch(PlansAction::FetchFulfilled(plans));
            Ok(())
        }
        Err(err) => {
            reject(store, "fetch plans", &err, |m| PlansAction::FetchRejected(m).into());
            Err(err)
        }
    };
    content.and(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::NetworkError;
    use crate::store::ToastKind;
    use crate::traits::{HttpError, Response};
    use crate::validation::{Field, OTP_INVALID, USERNAME_TOO_SHORT};
    use std::sync::Arc;

    const BASE: &str = "https://api.test";

    fn api(http: &MockHttpClient) -> ApiClient<MockHttpClient> {
        ApiClient::new(Arc::new(http.clone()), BASE).with_auth("tok")
    }

    fn respond(http: &MockHttpClient, path: &str, status: u16, body: serde_json::Value) {
        http.set_response(
            &format!("{}{}", BASE, path),
            MockResponse::Success(Response::json_body(status, &body)),
        );
    }

    #[tokio::test]
    async fn test_login_fulfilled() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/auth/login",
            200,
            serde_json::json!({ "data": { "token": "new", "user": { "_id": "u1", "email": "a@b.co" } } }),
        );
        let mut store = Store::new();

        let session = login(&mut store, &api(&http), &LoginForm::new(" a@b.co ", "pw"))
            .await
            .unwrap();

        assert_eq!(session.token, "new");
        assert_eq!(store.auth.token(), Some("new"));
        assert!(!store.auth.loading);
        assert!(store.toasts.is_empty());

        let body: serde_json::Value =
            serde_json::from_str(http.get_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.co");
    }

    #[tokio::test]
    async fn test_login_invalid_form_never_sent() {
        let http = MockHttpClient::new();
        let mut store = Store::new();

        let err = login(&mut store, &api(&http), &LoginForm::new("not-an-email", ""))
            .await
            .unwrap_err();

        match err {
            FolioError::Validation(errors) => {
                assert!(errors.get(Field::Email).is_some());
                assert!(errors.get(Field::Password).is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(http.get_requests().is_empty());
        assert!(!store.auth.loading);
    }

    #[tokio::test]
    async fn test_signup_then_verify() {
        let http = MockHttpClient::new();
        respond(&http, "/auth/signup", 201, serde_json::json!({ "message": "" }));
        respond(
            &http,
            "/auth/verify",
            200,
            serde_json::json!({ "data": { "token": "verified", "user": { "_id": "u2", "email": "ada@example.com" } } }),
        );
        let mut store = Store::new();
        let api = ApiClient::new(Arc::new(http.clone()), BASE);
        let form = SignupForm {
            name: " Ada ".to_string(),
            email: "ada@example.com".to_string(),
            password: "password1".to_string(),
            confirm_password: "password1".to_string(),
        };

        let message = signup(&mut store, &api, &form).await.unwrap();
        assert_eq!(message, SIGNUP_SENT);
        assert!(!store.auth.is_authenticated());
        assert!(!store.auth.loading);
        assert_eq!(store.toasts.latest().unwrap().kind, ToastKind::Info);
        let body: serde_json::Value =
            serde_json::from_str(http.get_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ada");

        let session = verify_otp(&mut store, &api, &OtpForm::new("ada@example.com", "123456"))
            .await
            .unwrap();
        assert_eq!(session.token, "verified");
        assert_eq!(store.auth.token(), Some("verified"));
    }

    #[tokio::test]
    async fn test_signup_and_verify_validate_first() {
        let http = MockHttpClient::new();
        let mut store = Store::new();
        let api = api(&http);

        let mismatched = SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password1".to_string(),
            confirm_password: "password2".to_string(),
        };
        let err = signup(&mut store, &api, &mismatched).await.unwrap_err();
        assert!(matches!(err, FolioError::Validation(ref e) if e.get(Field::ConfirmPassword).is_some()));

        let err = verify_otp(&mut store, &api, &OtpForm::new("ada@example.com", "12ab"))
            .await
            .unwrap_err();
        match err {
            FolioError::Validation(errors) => assert_eq!(errors.get(Field::Otp), Some(OTP_INVALID)),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_profile_rejected_keeps_data_and_toasts() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/user/profile",
            200,
            serde_json::json!({ "data": { "_id": "u1", "name": "Ada" } }),
        );
        let mut store = Store::new();
        let api = api(&http);
        fetch_profile(&mut store, &api).await.unwrap();

        respond(
            &http,
            "/user/profile",
            500,
            serde_json::json!({ "message": "Database unavailable" }),
        );
        let err = fetch_profile(&mut store, &api).await.unwrap_err();

        assert!(matches!(
            err,
            FolioError::Network(NetworkError::HttpStatus { status: 500, .. })
        ));
        assert_eq!(store.profile.profile_data.as_ref().unwrap().name, "Ada");
        assert!(!store.profile.loading);
        let expected = err.user_message();
        assert_eq!(store.profile.error.as_deref(), Some(expected.as_str()));

        let toast = store.toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, expected);
    }

    #[tokio::test]
    async fn test_update_profile_validation_short_circuits() {
        let http = MockHttpClient::new();
        let mut store = Store::new();
        let form = ProfileForm {
            name: "Ada".to_string(),
            username: "ad".to_string(),
            email: "ada@example.com".to_string(),
        };

        let err = update_profile(&mut store, &api(&http), &form)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), USERNAME_TOO_SHORT);
        assert!(http.get_requests().is_empty());
        assert!(store.toasts.is_empty());
        assert!(store.profile.error.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_fulfilled() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/user/profile",
            200,
            serde_json::json!({ "data": { "_id": "u1", "name": "Ada L", "username": "ada_l" } }),
        );
        let mut store = Store::new();
        let form = ProfileForm {
            name: " Ada L ".to_string(),
            username: "ada_l".to_string(),
            email: "ada@example.com".to_string(),
        };

        let profile = update_profile(&mut store, &api(&http), &form).await.unwrap();
        assert_eq!(profile.username, "ada_l");
        assert_eq!(store.profile.profile_data, Some(profile));
        assert_eq!(store.toasts.latest().unwrap().kind, ToastKind::Success);

        let sent: serde_json::Value =
            serde_json::from_str(http.requests_with_method("PUT")[0].body.as_deref().unwrap())
                .unwrap();
        assert_eq!(sent["name"], "Ada L");
    }

    #[tokio::test]
    async fn test_fetch_content_and_detail() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/magazines/m2",
            200,
            serde_json::json!({ "data": { "_id": "m2", "name": "Two", "pages": ["p1", "p2"] } }),
        );
        respond(
            &http,
            "/magazines",
            200,
            serde_json::json!({ "data": [
                { "_id": "m1", "name": "One", "magzineType": "magazine" },
                { "_id": "m2", "name": "Two", "magzineType": "article" }
            ] }),
        );
        let mut store = Store::new();
        let api = api(&http);

        let items = fetch_content(&mut store, &api, None).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(store.content.items.len(), 2);

        let detail = fetch_content_detail(&mut store, &api, "m2").await.unwrap();
        assert_eq!(detail.pages.len(), 2);
        assert_eq!(store.content.items.len(), 2);
        assert_eq!(store.content.selected.as_ref().unwrap().pages.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_plans_transport_failure_is_terminal() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::Timeout(
            "deadline".to_string(),
        )));
        let mut store = Store::new();

        assert!(fetch_plans(&mut store, &api(&http)).await.is_err());

        // exactly one attempt
        assert_eq!(http.get_requests().len(), 1);
        assert!(store.plans.error.is_some());
        assert_eq!(store.toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_home_settles_both_slices() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/magazines",
            200,
            serde_json::json!({ "data": [{ "_id": "m1", "name": "Tech Weekly" }] }),
        );
        respond(&http, "/plans", 503, serde_json::json!({ "message": "Maintenance" }));
        let mut store = Store::new();

        let err = fetch_home(&mut store, &api(&http)).await.unwrap_err();

        assert!(matches!(
            err,
            FolioError::Network(NetworkError::HttpStatus { status: 503, .. })
        ));
        assert_eq!(store.content.items.len(), 1);
        assert!(!store.content.loading);
        assert!(!store.plans.loading);
        assert!(store.plans.error.is_some());
        assert_eq!(http.get_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_profile_image() {
        let http = MockHttpClient::new();
        respond(
            &http,
            "/user/profile/image",
            200,
            serde_json::json!({ "data": { "_id": "u1", "profileImage": "https://cdn.test/u1.jpg" } }),
        );
        let mut store = Store::new();

        upload_profile_image(&mut store, &api(&http), "me.jpg", vec![0xFFu8, 0xD8])
            .await
            .unwrap();

        assert_eq!(
            store.profile.profile_data.as_ref().unwrap().profile_image.as_deref(),
            Some("https://cdn.test/u1.jpg")
        );
    }

    #[test]
    fn test_logout_toasts() {
        let mut store = Store::new();
        logout(&mut store);
        assert_eq!(store.toasts.latest().unwrap().kind, ToastKind::Info);
    }
}
