//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! cache calls. Services consume repository traits and provide a clean API
//! for the host application's authentication flow.
//!
//! # Available Services
//!
//! - [`services::cached_user_service::CachedUserService`] - Cache-backed user lookup
//! - [`services::invalidation_service::UserCacheInvalidator`] - Event-driven cache eviction
//! - [`provider::ProviderRegistry`] - Named driver selection and wiring

pub mod provider;
pub mod services;
