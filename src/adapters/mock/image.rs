//! Mock image loader for reader tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{FolioError, NetworkError};
use crate::traits::{ImageDimensions, ImageLoader};

/// Image loader with scripted sizes and failures.
///
/// URLs without a scripted size resolve to `default_dimensions`. Every call
/// is recorded so tests can assert how often a page was requested.
#[derive(Debug, Clone)]
pub struct MockImageLoader {
    sizes: Arc<Mutex<HashMap<String, ImageDimensions>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    default_dimensions: ImageDimensions,
    delay: Option<Duration>,
}

impl MockImageLoader {
    /// Loader that answers every URL with a 1000x1414 page.
    pub fn new() -> Self {
        Self::with_default(ImageDimensions::new(1000, 1414))
    }

    pub fn with_default(default_dimensions: ImageDimensions) -> Self {
        Self {
            sizes: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_dimensions,
            delay: None,
        }
    }

    /// Sleep before answering, to keep loads in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_dimensions(&self, url: &str, dims: ImageDimensions) {
        self.sizes.lock().unwrap().insert(url.to_string(), dims);
    }

    pub fn fail(&self, url: &str) {
        self.failures.lock().unwrap().insert(url.to_string());
    }

    /// Every URL requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl Default for MockImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for MockImageLoader {
    async fn load(&self, url: &str) -> Result<ImageDimensions, FolioError> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failures.lock().unwrap().contains(url) {
            return Err(NetworkError::HttpStatus {
                status: 404,
                message: format!("no image at {}", url),
            }
            .into());
        }

        let dims = self
            .sizes
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(self.default_dimensions);
        Ok(dims)
    }
}
