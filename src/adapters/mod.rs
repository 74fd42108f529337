//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileCredentialsProvider`] - File-based credentials storage
//! - [`HttpImageLoader`] - Page image loading and dimension probing
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryCredentials`] - In-memory credential storage
//! - [`mock::MockImageLoader`] - Scripted page image sizes and failures

pub mod file_credentials;
pub mod http_image;
pub mod mock;
pub mod reqwest_http;

pub use file_credentials::FileCredentialsProvider;
pub use http_image::HttpImageLoader;
pub use mock::{InMemoryCredentials, MockHttpClient, MockImageLoader};
pub use reqwest_http::ReqwestHttpClient;
