//! Proportional scrollbar math.

/// Size and position of the scrollbar thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbMetrics {
    pub height: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrollbar {
    pub min_thumb: f64,
}

impl Scrollbar {
    pub fn new(min_thumb: f64) -> Self {
        Self { min_thumb }
    }

    /// `viewport² / content`, at least `min_thumb` and at most the viewport.
    fn thumb_height(&self, content: f64, viewport: f64) -> f64 {
        (viewport * viewport / content)
            .max(self.min_thumb)
            .min(viewport)
    }

    /// Thumb geometry, or `None` when everything fits in the viewport.
    pub fn metrics(&self, content: f64, viewport: f64, offset: f64) -> Option<ThumbMetrics> {
        if viewport <= 0.0 || content <= viewport {
            return None;
        }
        let height = self.thumb_height(content, viewport);
        let scrollable = content - viewport;
        let track = viewport - height;
        let progress = (offset / scrollable).clamp(0.0, 1.0);
        Some(ThumbMetrics {
            height,
            top: progress * track,
        })
    }

    /// Scroll offset for a dragged thumb position.
    pub fn offset_for_thumb(&self, content: f64, viewport: f64, thumb_top: f64) -> f64 {
        if viewport <= 0.0 || content <= viewport {
            return 0.0;
        }
        let height = self.thumb_height(content, viewport);
        let track = viewport - height;
        if track <= 0.0 {
            return 0.0;
        }
        let scrollable = content - viewport;
        (thumb_top.clamp(0.0, track) / track) * scrollable
    }
}
