//! # Cached User Provider
//!
//! Cache-backed user lookup for authentication, with event-driven cache
//! invalidation. Wraps an authoritative "load user by id" database query in a
//! shared Redis cache and evicts the cached snapshot whenever the record is
//! mutated or deleted through the tracked data-access path.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - User entity, repository trait, change events
//! - **Application Layer** ([`application`]) - Cached lookup, invalidation, provider registry
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL store and Redis cache
//!
//! ## Consistency Model
//!
//! Snapshots live under the key `user_<id>` for a configurable TTL. Mutations
//! committed through [`domain::repositories::UserRepository`] emit a change
//! event that the invalidation worker turns into an eager eviction; mutations
//! that bypass that path (bulk updates, raw SQL) leave the snapshot to age
//! out via TTL. There is no single-flight guarantee for concurrent misses and
//! no ordering guarantee between a concurrent lookup and eviction.
//!
//! ## Wiring
//!
//! ```ignore
//! let config = cached_user_provider::config::load_from_env()?;
//!
//! let pool = Arc::new(PgPool::connect(&config.database_url).await?);
//! let cache = cache::connect_or_null(config.redis_url.as_deref(), config.cache_ttl_seconds).await;
//!
//! let (events_tx, events_rx) = mpsc::channel(config.event_queue_capacity);
//! tokio::spawn(run_invalidation_worker(events_rx, cache.clone()));
//!
//! let registry = ProviderRegistry::new();
//! let provider = registry.build(
//!     &config.provider_config(),
//!     &ProviderDeps { pool, cache, events: events_tx },
//! )?;
//!
//! let user = provider.retrieve_by_id(42).await?;
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`]. See the
//! [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::provider::{
        DRIVER_CACHED_DATABASE, DRIVER_DATABASE, ProviderConfig, ProviderDeps, ProviderRegistry,
        StoreUserProvider, UserProvider,
    };
    pub use crate::application::services::{
        CachedUserService, UserCacheInvalidator, run_invalidation_worker,
    };
    pub use crate::domain::entities::{User, UserPatch, user_cache_key};
    pub use crate::domain::repositories::UserRepository;
    pub use crate::domain::user_event::UserEvent;
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, NullCache, RedisCache, remember};
    pub use crate::infrastructure::persistence::PgUserRepository;
}
