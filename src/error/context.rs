//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Content item involved, if any.
    pub content_id: Option<String>,

    /// API endpoint involved, if any.
    pub endpoint: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            content_id: None,
            endpoint: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the content id for this context.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Set the endpoint for this context.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref content_id) = self.content_id {
            parts.push(format!("content_id={}", content_id));
        }

        if let Some(ref endpoint) = self.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref content_id) = self.content_id {
            write!(f, " content={}", content_id)?;
        }

        if let Some(ref endpoint) = self.endpoint {
            write!(f, " endpoint={}", endpoint)?;
        }

        Ok(())
    }
}
