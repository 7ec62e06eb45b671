//! Business logic services for the application layer.

pub mod cached_user_service;
pub mod invalidation_service;

pub use cached_user_service::CachedUserService;
pub use invalidation_service::{UserCacheInvalidator, run_invalidation_worker};
