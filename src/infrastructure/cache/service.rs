//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the shared key-value cache holding user snapshots.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting authentication (cache failures should degrade to store lookups).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the payload stored under a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    ///
    /// # Errors
    ///
    /// Should not return errors in production implementations. Errors are
    /// logged and treated as cache misses.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a payload under a key with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - The cache key
    /// - `payload` - The serialized snapshot to cache
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log
    /// errors and return `Ok(())` to avoid disrupting the request flow.
    async fn set(&self, key: &str, payload: &str, ttl_seconds: Option<usize>) -> CacheResult<()>;

    /// Removes a cached entry.
    ///
    /// Used by the invalidator when a user record is updated or deleted.
    /// Removing an absent key is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}

/// Combined get-or-compute convenience over a [`CacheService`].
///
/// Returns the cached payload when present; otherwise runs `compute`, stores
/// its result under `key` with the given TTL, and returns it. Not
/// single-flight: concurrent callers for the same key may each run `compute`.
pub async fn remember<F, Fut>(
    cache: &dyn CacheService,
    key: &str,
    ttl_seconds: Option<usize>,
    compute: F,
) -> CacheResult<String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = CacheResult<String>> + Send,
{
    if let Some(payload) = cache.get(key).await? {
        return Ok(payload);
    }

    let payload = compute().await?;
    cache.set(key, &payload, ttl_seconds).await?;

    Ok(payload)
}
