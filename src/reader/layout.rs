//! Vertical layout of a paginated document.
//!
//! Every page is as wide as the screen; its height follows from the best
//! known aspect ratio (height / width). Until a page image reports its
//! natural size the default aspect is assumed, so the first measurement of a
//! page shifts everything below it once.

/// Positions of all pages in one continuous scroll column.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    screen_width: f64,
    default_aspect: f64,
    measured: Vec<Option<f64>>,
    /// `offsets[i]` is the top of page `i`; the last entry is the total height.
    offsets: Vec<f64>,
}

impl PageLayout {
    pub fn new(page_count: usize, screen_width: f64, default_aspect: f64) -> Self {
        let mut layout = Self {
            screen_width: screen_width.max(0.0),
            default_aspect,
            measured: vec![None; page_count],
            offsets: Vec::with_capacity(page_count + 1),
        };
        layout.recompute();
        layout
    }

    fn recompute(&mut self) {
        self.offsets.clear();
        let mut top = 0.0;
        self.offsets.push(top);
        for i in 0..self.measured.len() {
            top += self.page_height(i);
            self.offsets.push(top);
        }
    }

    pub fn page_count(&self) -> usize {
        self.measured.len()
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    /// Relayout for a new screen width (rotation, window resize).
    pub fn set_screen_width(&mut self, width: f64) {
        self.screen_width = width.max(0.0);
        self.recompute();
    }

    /// Best known aspect of a page.
    pub fn aspect(&self, index: usize) -> f64 {
        self.measured
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.default_aspect)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.measured.get(index), Some(Some(_)))
    }

    pub fn page_height(&self, index: usize) -> f64 {
        self.screen_width * self.aspect(index)
    }

    /// Top of a page; indices past the end clamp to the last page.
    pub fn offset_of(&self, index: usize) -> f64 {
        if self.measured.is_empty() {
            return 0.0;
        }
        self.offsets[index.min(self.measured.len() - 1)]
    }

    pub fn content_height(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// The page under the vertical centre of the viewport.
    pub fn page_at(&self, offset: f64, viewport: f64) -> usize {
        let count = self.measured.len();
        if count == 0 {
            return 0;
        }
        let centre = offset + viewport / 2.0;
        let after = self.offsets[..count].partition_point(|&top| top <= centre);
        after.saturating_sub(1).min(count - 1)
    }

    /// Record the natural size of a page image.
    ///
    /// Zero or non-finite sizes are ignored. Returns true when the layout
    /// changed.
    pub fn measure(&mut self, index: usize, width: f64, height: f64) -> bool {
        if index >= self.measured.len() {
            return false;
        }
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        let aspect = height / width;
        if self.measured[index] == Some(aspect) {
            return false;
        }
        self.measured[index] = Some(aspect);
        self.recompute();
        true
    }
}
