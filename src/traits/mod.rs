//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, multipart)
//! - [`CredentialsProvider`] - Session credentials storage and retrieval
//! - [`ImageLoader`] - Page image loading for the reader

pub mod credentials;
pub mod http;
pub mod image;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{Headers, HttpClient, HttpError, MultipartForm, MultipartPart, Response};
pub use image::{ImageDimensions, ImageLoader};
