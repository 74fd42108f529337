//! Application facade.
//!
//! [`FolioApp`] owns the API client, the store, the memoized selectors and
//! the credentials provider, and exposes the operations a screen would
//! trigger. Front ends (the CLI here) only talk to this type.

mod library;
mod session;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::selectors::Selectors;
use crate::store::Store;
use crate::traits::{CredentialsProvider, HttpClient};

pub struct FolioApp<C: HttpClient, P: CredentialsProvider> {
    api: ApiClient<C>,
    store: Store,
    selectors: Selectors,
    credentials: P,
    config: ClientConfig,
}

impl<C: HttpClient, P: CredentialsProvider> FolioApp<C, P> {
    pub fn new(http: Arc<C>, credentials: P, config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(http, config.api_base_url.clone())
                .with_timeout_secs(config.request_timeout_secs),
            store: Store::new(),
            selectors: Selectors::new(),
            credentials,
            config,
        }
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &P {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.auth.is_authenticated()
    }
}
