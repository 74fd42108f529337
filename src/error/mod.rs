//! Unified error handling for the folio client.
//!
//! - **Error Categories**: high-level classification for messaging decisions
//! - **Domain-specific Errors**: Network, Auth, System (plus form validation)
//! - **Unified Error Type**: `FolioError` consolidates all error types
//! - **Error Context**: operation/content/endpoint attached for logging
//! - **Result Type Alias**: `FolioResult<T>`
//!
//! Errors are caught at the effect boundary (see `store::effects`), turned
//! into a toast via [`FolioError::user_message`] and stored in the failing
//! slice's `error` field. Nothing is retried automatically.
//!
//! | Category | Description | Manual retry helps |
//! |----------|-------------|--------------------|
//! | Network | Connection, timeout | Yes |
//! | Auth | Missing or expired session | No (sign in) |
//! | Server | 5xx | Yes |
//! | Client | Undecodable response | No |
//! | User | Invalid input, unknown id | No |
//! | System | Filesystem | No |
//! | Configuration | Bad environment | No |

mod auth;
mod category;
mod context;
mod folio_error;
mod network;
mod result;
mod system;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use folio_error::FolioError;
pub use network::NetworkError;
pub use result::{FolioResult, ResultExt};
pub use system::{classify_io_error, SystemError};
