//! Fire-and-forget page image prefetching.
//!
//! Each requested page gets its own tokio task. Results come back as
//! [`PrefetchEvent`]s on an unbounded channel; there is no cancellation and
//! no limit on tasks in flight beyond what the loader itself imposes. A page
//! is only ever requested once per prefetcher.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::traits::ImageLoader;

/// Outcome of one page load.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefetchEvent {
    Loaded { index: usize, width: u32, height: u32 },
    Failed { index: usize, message: String },
}

impl PrefetchEvent {
    pub fn index(&self) -> usize {
        match self {
            PrefetchEvent::Loaded { index, .. } | PrefetchEvent::Failed { index, .. } => *index,
        }
    }
}

pub struct Prefetcher<L: ImageLoader + 'static> {
    loader: Arc<L>,
    urls: Vec<String>,
    requested: HashSet<usize>,
    tx: mpsc::UnboundedSender<PrefetchEvent>,
}

impl<L: ImageLoader + 'static> Prefetcher<L> {
    pub fn new(loader: Arc<L>, urls: Vec<String>) -> (Self, mpsc::UnboundedReceiver<PrefetchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                loader,
                urls,
                requested: HashSet::new(),
                tx,
            },
            rx,
        )
    }

    pub fn page_count(&self) -> usize {
        self.urls.len()
    }

    pub fn is_requested(&self, index: usize) -> bool {
        self.requested.contains(&index)
    }

    pub fn requested_count(&self) -> usize {
        self.requested.len()
    }

    /// Start loading one page. Returns false if the page does not exist or
    /// was already requested.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, index: usize) -> bool {
        let Some(url) = self.urls.get(index).cloned() else {
            return false;
        };
        if !self.requested.insert(index) {
            return false;
        }

        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        tracing::debug!("Prefetching page {} ({})", index, url);
        tokio::spawn(async move {
            let event = match loader.load(&url).await {
                Ok(dims) => PrefetchEvent::Loaded {
                    index,
                    width: dims.width,
                    height: dims.height,
                },
                Err(e) => PrefetchEvent::Failed {
                    index,
                    message: e.user_message(),
                },
            };
            // The reader may have been closed in the meantime
            let _ = tx.send(event);
        });
        true
    }

    /// Request `count` pages starting at `start`; returns how many were new.
    pub fn request_range(&mut self, start: usize, count: usize) -> usize {
        let end = start.saturating_add(count).min(self.urls.len());
        (start..end).filter(|&i| self.request(i)).count()
    }
}
