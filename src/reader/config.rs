//! Reader tuning knobs.

/// A4 portrait, height over width.
pub const DEFAULT_ASPECT: f64 = 1.414;

/// Pages that must settle before the reader is shown.
pub const DEFAULT_INITIAL_WINDOW: usize = 3;

/// Pages prefetched past the visible one on every page change.
pub const DEFAULT_PREFETCH_AHEAD: usize = 3;

/// Smallest scrollbar thumb, in layout units.
pub const DEFAULT_MIN_THUMB: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderConfig {
    pub initial_window: usize,
    pub prefetch_ahead: usize,
    pub default_aspect: f64,
    pub min_thumb: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_window: DEFAULT_INITIAL_WINDOW,
            prefetch_ahead: DEFAULT_PREFETCH_AHEAD,
            default_aspect: DEFAULT_ASPECT,
            min_thumb: DEFAULT_MIN_THUMB,
        }
    }
}

impl ReaderConfig {
    pub fn with_initial_window(mut self, pages: usize) -> Self {
        self.initial_window = pages;
        self
    }

    pub fn with_prefetch_ahead(mut self, pages: usize) -> Self {
        self.prefetch_ahead = pages;
        self
    }

    /// Ignored unless finite and positive.
    pub fn with_default_aspect(mut self, aspect: f64) -> Self {
        if aspect.is_finite() && aspect > 0.0 {
            self.default_aspect = aspect;
        }
        self
    }

    pub fn with_min_thumb(mut self, min_thumb: f64) -> Self {
        self.min_thumb = min_thumb.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.initial_window, 3);
        assert_eq!(config.prefetch_ahead, 3);
        assert_eq!(config.default_aspect, 1.414);
        assert_eq!(config.min_thumb, 24.0);
    }

    #[test]
    fn test_builder_rejects_nonsense() {
        let config = ReaderConfig::default()
            .with_default_aspect(f64::NAN)
            .with_default_aspect(-1.0)
            .with_min_thumb(-5.0)
            .with_prefetch_ahead(5);
        assert_eq!(config.default_aspect, DEFAULT_ASPECT);
        assert_eq!(config.min_thumb, 0.0);
        assert_eq!(config.prefetch_ahead, 5);
    }
}
