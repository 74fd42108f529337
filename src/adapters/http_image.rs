//! Page image loader backed by an [`HttpClient`].
//!
//! Downloads the image, reads its natural size with the `image` crate and
//! remembers the result per URL for the lifetime of the loader. This is the
//! client's image cache; nothing is kept across sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{FolioError, NetworkError};
use crate::traits::{Headers, HttpClient, ImageDimensions, ImageLoader};

/// Loads page images over HTTP.
pub struct HttpImageLoader<C: HttpClient> {
    client: Arc<C>,
    cache: Arc<Mutex<HashMap<String, ImageDimensions>>>,
    timeout_secs: u64,
}

impl<C: HttpClient> HttpImageLoader<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(HashMap::new())),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Number of images currently cached.
    pub fn cached_count(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn cached(&self, url: &str) -> Option<ImageDimensions> {
        self.cache.lock().ok().and_then(|c| c.get(url).copied())
    }

    fn remember(&self, url: &str, dims: ImageDimensions) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), dims);
        }
    }
}

impl<C: HttpClient> Clone for HttpImageLoader<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            cache: Arc::clone(&self.cache),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Read the natural dimensions of an encoded image without decoding pixels.
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions, FolioError> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| NetworkError::InvalidResponse {
            message: format!("undecodable image: {}", e),
        })?;
    Ok(ImageDimensions::new(width, height))
}

#[async_trait]
impl<C: HttpClient + 'static> ImageLoader for HttpImageLoader<C> {
    async fn load(&self, url: &str) -> Result<ImageDimensions, FolioError> {
        if let Some(dims) = self.cached(url) {
            return Ok(dims);
        }

        let response = self
            .client
            .get(url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, url).with_timeout_secs(self.timeout_secs))?;

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: String::new(),
            }
            .into());
        }

        let dims = decode_dimensions(&response.body)?;
        tracing::debug!("Loaded page image {} ({}x{})", url, dims.width, dims.height);
        self.remember(url, dims);
        Ok(dims)
    }
}
