//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network dependencies or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryCredentials`] - In-memory credential storage
//! - [`MockImageLoader`] - Page image loader with scripted results

pub mod credentials;
pub mod http;
pub mod image;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use image::MockImageLoader;
