//! One open document in the reader.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::config::ReaderConfig;
use super::layout::PageLayout;
use super::prefetch::{PrefetchEvent, Prefetcher};
use super::scrollbar::{Scrollbar, ThumbMetrics};
use crate::traits::ImageLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Initial pages still loading; show a spinner.
    NotReady,
    Ready,
}

/// Reader state machine driven by scroll input and page load events.
pub struct ReaderSession<L: ImageLoader + 'static> {
    content_id: String,
    config: ReaderConfig,
    layout: PageLayout,
    scrollbar: Scrollbar,
    prefetcher: Prefetcher<L>,
    events: mpsc::UnboundedReceiver<PrefetchEvent>,
    state: ReaderState,
    settled: HashSet<usize>,
    failed: HashSet<usize>,
    initial_window: usize,
    current_page: usize,
    chrome_visible: bool,
    viewport_height: f64,
    offset: f64,
}

impl<L: ImageLoader + 'static> ReaderSession<L> {
    /// Open a document and start loading its initial window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        content_id: impl Into<String>,
        pages: Vec<String>,
        loader: Arc<L>,
        screen_width: f64,
        viewport_height: f64,
        config: ReaderConfig,
    ) -> Self {
        let layout = PageLayout::new(pages.len(), screen_width, config.default_aspect);
        let initial_window = config.initial_window.min(pages.len());
        let (prefetcher, events) = Prefetcher::new(loader, pages);

        let mut session = Self {
            content_id: content_id.into(),
            config,
            layout,
            scrollbar: Scrollbar::new(config.min_thumb),
            prefetcher,
            events,
            state: ReaderState::NotReady,
            settled: HashSet::new(),
            failed: HashSet::new(),
            initial_window,
            current_page: 0,
            chrome_visible: true,
            viewport_height: viewport_height.max(0.0),
            offset: 0.0,
        };
        session.prefetcher.request_range(0, initial_window);
        session.update_state();
        tracing::debug!(
            "Opened {} ({} pages, waiting for {})",
            session.content_id,
            session.page_count(),
            initial_window
        );
        session
    }

    fn update_state(&mut self) {
        if self.state == ReaderState::NotReady
            && (0..self.initial_window).all(|i| self.settled.contains(&i))
        {
            self.state = ReaderState::Ready;
            tracing::debug!("Reader ready for {}", self.content_id);
        }
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ReaderState::Ready
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    /// Zero-based index of the visible page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    pub fn is_requested(&self, index: usize) -> bool {
        self.prefetcher.is_requested(index)
    }

    /// Pages whose image failed to load. They keep the default height.
    pub fn failed_pages(&self) -> Vec<usize> {
        let mut failed: Vec<usize> = self.failed.iter().copied().collect();
        failed.sort_unstable();
        failed
    }

    /// Page counter text, 1-based.
    pub fn page_label(&self) -> String {
        if self.page_count() == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.current_page + 1, self.page_count())
    }

    fn max_offset(&self) -> f64 {
        (self.layout.content_height() - self.viewport_height).max(0.0)
    }

    /// Apply a load result. Returns true when the layout changed.
    pub fn apply(&mut self, event: PrefetchEvent) -> bool {
        let changed = match &event {
            PrefetchEvent::Loaded {
                index,
                width,
                height,
            } => {
                self.failed.remove(index);
                self.layout
                    .measure(*index, f64::from(*width), f64::from(*height))
            }
            PrefetchEvent::Failed { index, message } => {
                tracing::warn!(
                    "Page {} of {} failed to load: {}",
                    index + 1,
                    self.content_id,
                    message
                );
                self.failed.insert(*index);
                false
            }
        };
        self.settled.insert(event.index());
        if changed {
            self.offset = self.offset.min(self.max_offset());
            self.sync_current_page();
        }
        self.update_state();
        changed
    }

    /// Apply every event that has already arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next load result and apply it.
    ///
    /// Returns `None` once nothing more can arrive.
    pub async fn next_event(&mut self) -> Option<PrefetchEvent> {
        let event = self.events.recv().await?;
        self.apply(event.clone());
        Some(event)
    }

    /// Wait until the initial window has settled.
    pub async fn wait_ready(&mut self) {
        while !self.is_ready() {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }

    /// Requested pages whose load has not settled yet.
    pub fn pending_count(&self) -> usize {
        self.prefetcher.requested_count().saturating_sub(self.settled.len())
    }

    /// Wait until every requested page has settled.
    pub async fn wait_idle(&mut self) {
        while self.pending_count() > 0 {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }

    /// The user scrolled to `offset`.
    ///
    /// Hides the chrome for good. When the visible page changes the next
    /// pages are prefetched and the new page index is returned.
    pub fn on_scroll(&mut self, offset: f64) -> Option<usize> {
        self.chrome_visible = false;
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        };

        self.sync_current_page()
    }

    /// Recompute the page under the viewport centre after the offset or the
    /// page heights moved, prefetching ahead when it changed.
    fn sync_current_page(&mut self) -> Option<usize> {
        let page = self.layout.page_at(self.offset, self.viewport_height);
        if page == self.current_page {
            return None;
        }
        self.current_page = page;
        let queued = self
            .prefetcher
            .request_range(page + 1, self.config.prefetch_ahead);
        tracing::debug!("Page {} visible, queued {} more", page + 1, queued);
        Some(page)
    }

    /// Jump so that `page` sits at the top of the viewport.
    pub fn scroll_to_page(&mut self, page: usize) -> Option<usize> {
        self.on_scroll(self.layout.offset_of(page))
    }

    pub fn scrollbar(&self) -> Option<ThumbMetrics> {
        self.scrollbar.metrics(
            self.layout.content_height(),
            self.viewport_height,
            self.offset,
        )
    }

    /// Drag the scrollbar thumb to `thumb_top`, scrolling there in one step.
    /// Returns the new scroll offset.
    pub fn drag_thumb(&mut self, thumb_top: f64) -> f64 {
        let target = self.scrollbar.offset_for_thumb(
            self.layout.content_height(),
            self.viewport_height,
            thumb_top,
        );
        self.on_scroll(target);
        self.offset
    }

    /// New screen or viewport size.
    pub fn resize(&mut self, screen_width: f64, viewport_height: f64) {
        self.layout.set_screen_width(screen_width);
        self.viewport_height = viewport_height.max(0.0);
        self.offset = self.offset.min(self.max_offset());
        self.sync_current_page();
    }
}
