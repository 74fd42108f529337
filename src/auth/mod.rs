//! Session persistence.
//!
//! The bearer token issued at login is stored locally so it can be
//! re-attached to the API client on the next launch.

pub mod credentials;

pub use credentials::{Credentials, CredentialsManager};
