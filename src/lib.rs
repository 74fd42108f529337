//! folio - client core for a magazine, article and digest reader.
//!
//! The crate is headless: models and the API client, a reducer-style store
//! with async effects, memoized selectors, the continuous page reader and
//! offline storage. The `folio` binary is a thin CLI over [`app::FolioApp`].

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reader;
pub mod selectors;
pub mod storage;
pub mod store;
pub mod traits;
pub mod validation;
