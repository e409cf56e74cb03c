pub mod analytics;
pub mod content;
pub mod error;
pub mod plan;
pub mod service;
pub mod user;

pub use content::{Content, PlayOutcome};
pub use error::CatalogError;
pub use plan::{Plan, Quality};
pub use service::CatalogService;
pub use user::{User, WatchEvent};

/// Registry key for a subscription plan.
pub type PlanId = u32;
/// Registry key for a user account.
pub type UserId = u32;
/// Registry key for a catalog item, unique across movies and series.
pub type ContentId = u32;
