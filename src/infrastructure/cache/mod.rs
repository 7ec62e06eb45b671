//! Caching layer for fast user lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, remember};

#[cfg(test)]
pub use service::MockCacheService;

use std::sync::Arc;

/// Connects to Redis when a URL is configured, falling back to [`NullCache`].
///
/// A connection failure degrades to uncached operation instead of aborting
/// startup; every lookup then goes to the authoritative store.
pub async fn connect_or_null(
    redis_url: Option<&str>,
    default_ttl_seconds: u64,
) -> Arc<dyn CacheService> {
    match redis_url {
        Some(url) => match RedisCache::connect(url, default_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        },
        None => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}
