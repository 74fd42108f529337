//! Typed endpoints of the content API.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{FolioResult, NetworkError};
use crate::models::{
    ApiEnvelope, ContentItem, ContentKind, ErrorBody, MessageBody, Plan, Profile, ProfileUpdate,
    Session,
};
use crate::traits::{Headers, HttpClient, HttpError, MultipartForm, Response};

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.folioreader.app/api";

/// Form field carrying the profile picture.
const PROFILE_IMAGE_FIELD: &str = "image";

/// Client for the content API.
pub struct ApiClient<C: HttpClient> {
    http: Arc<C>,
    base_url: String,
    auth_token: Option<String>,
    timeout_secs: u64,
}

impl<C: HttpClient> ApiClient<C> {
    /// Create a client for `base_url`. A trailing slash is ignored.
    pub fn new(http: Arc<C>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Request timeout the transport was built with, reported on timeouts.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set or clear the authentication token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared handle to the underlying transport.
    pub fn http(&self) -> Arc<C> {
        Arc::clone(&self.http)
    }

    /// Whether `url` points at this API, i.e. may be sent the bearer token.
    pub fn is_api_url(&self, url: &str) -> bool {
        url.strip_prefix(&self.base_url).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self, json_body: bool) -> Headers {
        let mut headers = Headers::new();
        if let Some(ref token) = self.auth_token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        if json_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    fn transport_error(&self, err: HttpError, url: &str) -> NetworkError {
        NetworkError::from_http(err, url).with_timeout_secs(self.timeout_secs)
    }

    /// Turn a non-2xx response into an error carrying the server's message.
    fn check_status(url: &str, response: Response) -> FolioResult<Response> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 429 {
            let retry_after_secs = retry_after_secs(&response.headers);
            tracing::warn!("{} rate limited (retry after {:?}s)", url, retry_after_secs);
            return Err(NetworkError::RateLimited { retry_after_secs }.into());
        }
        let message = ErrorBody::message_from(&response.body);
        tracing::warn!("{} returned {}: {}", url, response.status, message);
        Err(NetworkError::HttpStatus {
            status: response.status,
            message,
        }
        .into())
    }

    fn decode<T: DeserializeOwned>(url: &str, response: Response) -> FolioResult<T> {
        let response = Self::check_status(url, response)?;
        let envelope = ApiEnvelope::<T>::decode(&response.body).map_err(|e| {
            tracing::warn!("Malformed response from {}: {}", url, e);
            NetworkError::InvalidResponse {
                message: e.to_string(),
            }
        })?;
        Ok(envelope.data)
    }

    fn decode_message(url: &str, response: Response) -> FolioResult<String> {
        let response = Self::check_status(url, response)?;
        let body: MessageBody = serde_json::from_slice(&response.body).unwrap_or_default();
        Ok(body.message.unwrap_or_default())
    }

    async fn get_raw(&self, url: &str, headers: &Headers) -> FolioResult<Response> {
        tracing::debug!("GET {}", url);
        self.http
            .get(url, headers)
            .await
            .map_err(|e| self.transport_error(e, url).into())
    }

    async fn post_raw(&self, url: &str, body: &serde_json::Value) -> FolioResult<Response> {
        tracing::debug!("POST {}", url);
        self.http
            .post(url, &body.to_string(), &self.headers(true))
            .await
            .map_err(|e| self.transport_error(e, url).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FolioResult<T> {
        let url = self.url(path);
        let response = self.get_raw(&url, &self.headers(false)).await?;
        Self::decode(&url, response)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> FolioResult<T> {
        let url = self.url(path);
        let response = self.post_raw(&url, &body).await?;
        Self::decode(&url, response)
    }

    async fn post_for_message(&self, path: &str, body: serde_json::Value) -> FolioResult<String> {
        let url = self.url(path);
        let response = self.post_raw(&url, &body).await?;
        Self::decode_message(&url, response)
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> FolioResult<Session> {
        self.post_json(
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// POST /auth/signup
    ///
    /// Creates the account and triggers the OTP mail; the session comes from
    /// [`verify_otp`](Self::verify_otp).
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> FolioResult<String> {
        self.post_for_message(
            "/auth/signup",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    /// POST /auth/verify
    pub async fn verify_otp(&self, email: &str, otp: &str) -> FolioResult<Session> {
        self.post_json(
            "/auth/verify",
            serde_json::json!({ "email": email, "otp": otp }),
        )
        .await
    }

    /// POST /auth/forgot-password
    pub async fn forgot_password(&self, email: &str) -> FolioResult<String> {
        self.post_for_message(
            "/auth/forgot-password",
            serde_json::json!({ "email": email }),
        )
        .await
    }

    /// POST /auth/reset-password
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        password: &str,
    ) -> FolioResult<String> {
        self.post_for_message(
            "/auth/reset-password",
            serde_json::json!({ "email": email, "otp": otp, "password": password }),
        )
        .await
    }

    /// GET /user/profile
    pub async fn fetch_profile(&self) -> FolioResult<Profile> {
        self.get_json("/user/profile").await
    }

    /// PUT /user/profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> FolioResult<Profile> {
        let url = self.url("/user/profile");
        let body = serde_json::to_string(update)?;
        tracing::debug!("PUT {}", url);
        let response = self
            .http
            .put(&url, &body, &self.headers(true))
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        Self::decode(&url, response)
    }

    /// POST /user/profile/image (multipart, field `image`)
    pub async fn upload_profile_image(
        &self,
        file_name: &str,
        data: impl Into<Bytes>,
    ) -> FolioResult<Profile> {
        let url = self.url("/user/profile/image");
        let content_type = image::ImageFormat::from_path(file_name)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");
        let form = MultipartForm::new().file(PROFILE_IMAGE_FIELD, file_name, content_type, data);

        tracing::debug!("POST {} (multipart, {})", url, content_type);
        let response = self
            .http
            .post_multipart(&url, form, &self.headers(false))
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        Self::decode(&url, response)
    }

    /// GET /magazines, optionally filtered by `magzineType`.
    pub async fn list_content(&self, kind: Option<ContentKind>) -> FolioResult<Vec<ContentItem>> {
        let path = match kind {
            Some(kind) => format!(
                "/magazines?magzineType={}",
                urlencoding::encode(kind.as_str())
            ),
            None => "/magazines".to_string(),
        };
        self.get_json(&path).await
    }

    /// GET /magazines/{id}
    pub async fn content_detail(&self, id: &str) -> FolioResult<ContentItem> {
        self.get_json(&format!("/magazines/{}", urlencoding::encode(id)))
            .await
    }

    /// GET /plans
    pub async fn list_plans(&self) -> FolioResult<Vec<Plan>> {
        self.get_json("/plans").await
    }

    /// Download a document from an absolute URL. The bearer token is only
    /// sent when the URL belongs to this API.
    pub async fn download(&self, url: &str) -> FolioResult<Bytes> {
        let headers = if self.is_api_url(url) {
            self.headers(false)
        } else {
            Headers::new()
        };
        let response = self.get_raw(url, &headers).await?;
        let response = Self::check_status(url, response)?;
        tracing::info!("Downloaded {} bytes from {}", response.body.len(), url);
        Ok(response.body)
    }
}

/// Seconds from a numeric `Retry-After` header, matched case-insensitively.
fn retry_after_secs(headers: &Headers) -> Option<u64> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
        .and_then(|(_, value)| value.trim().parse().ok())
}
