//! REST client for the content API.
//!
//! [`ApiClient`] is generic over [`HttpClient`](crate::traits::HttpClient)
//! so the store effects can be exercised against a mock transport.

pub mod client;

pub use client::{ApiClient, DEFAULT_API_URL};
