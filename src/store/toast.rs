//! Transient notifications.
//!
//! Toasts are kept until their lifetime runs out; callers pass `now` so
//! expiry is deterministic under test.

use chrono::{DateTime, Duration, Utc};

/// How long a toast stays on screen.
pub const DEFAULT_TOAST_LIFETIME_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        now - self.created_at >= lifetime
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    lifetime: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_lifetime(Duration::seconds(DEFAULT_TOAST_LIFETIME_SECS))
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Utc::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        tracing::debug!("toast[{}]: {}", kind.as_str(), message);
        self.prune(now);
        self.toasts.push(Toast {
            kind,
            message,
            created_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    /// Unexpired toasts, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<&Toast> {
        self.toasts
            .iter()
            .filter(|t| !t.is_expired(now, self.lifetime))
            .collect()
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let lifetime = self.lifetime;
        self.toasts.retain(|t| !t.is_expired(now, lifetime));
    }

    /// Most recently pushed toast, expired or not.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
