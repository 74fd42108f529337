//! Result type alias for folio operations.

use super::context::ErrorContext;
use super::folio_error::FolioError;

/// Type alias for Results using FolioError.
pub type FolioResult<T> = Result<T, FolioError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> FolioResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> FolioResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T> ResultExt<T> for FolioResult<T> {
    fn context(self, ctx: ErrorContext) -> FolioResult<T> {
        self.map_err(|e| e.with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> FolioResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn context(self, ctx: ErrorContext) -> FolioResult<T> {
        self.map_err(|e| FolioError::from(e).with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> FolioResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| FolioError::from(e).with_context(f()))
    }
}
