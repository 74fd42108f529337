//! Image loader trait abstraction.
//!
//! The reader only needs to know that a page image is in the cache and what
//! its natural size is.

use async_trait::async_trait;

use crate::error::FolioError;

/// Natural pixel dimensions of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height over width, `None` for degenerate images.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.height as f64 / self.width as f64)
        }
    }
}

/// Trait for loading (and caching) remote page images.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load the image at `url` into the cache and report its dimensions.
    async fn load(&self, url: &str) -> Result<ImageDimensions, FolioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let a4 = ImageDimensions::new(1000, 1414);
        assert!((a4.aspect_ratio().unwrap() - 1.414).abs() < 1e-9);
        assert_eq!(ImageDimensions::new(0, 10).aspect_ratio(), None);
        assert_eq!(ImageDimensions::new(10, 0).aspect_ratio(), None);
    }
}
