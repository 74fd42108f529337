//! Domain records mirrored from the content API.
//!
//! These are flat DTOs; relationships such as reviews are nested in the
//! payload rather than modeled separately.

pub mod content;
pub mod envelope;
pub mod plan;
pub mod user;

pub use content::{AccessTier, ContentItem, ContentKind, Review};
pub use envelope::{ApiEnvelope, ErrorBody, MessageBody};
pub use plan::{Plan, PlanFeature, UNAVAILABLE_FEATURE_MARKER};
pub use user::{Profile, ProfileUpdate, Session, User};
