//! Cache-backed user lookup service.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::{User, user_cache_key};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Decorates a [`UserRepository`] lookup with a shared key-value cache.
///
/// Snapshots are stored as the JSON serialization of `Option<User>` under the
/// key `user_<id>`, with a fixed TTL. A live entry short-circuits the store
/// entirely; a miss delegates to the store and writes the result back.
///
/// # Consistency
///
/// The cached snapshot is only as fresh as the last eviction for its id.
/// Mutations observed by the invalidation path evict eagerly; anything else
/// (bulk updates, raw SQL) leaves the entry to age out via TTL. Concurrent
/// misses for one id may each query the store; there is no single-flight
/// guarantee.
///
/// # Cache Failures
///
/// Strictly fail-open: a cache read error falls back to the store and the
/// lookup still succeeds. Store errors always propagate and never leave a
/// partial cache write behind.
pub struct CachedUserService<R: UserRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    ttl_seconds: u64,
    cache_missing: bool,
}

impl<R: UserRepository> CachedUserService<R> {
    /// Creates a new cached lookup service.
    ///
    /// # Arguments
    ///
    /// - `repository` - the authoritative user store
    /// - `cache` - shared cache backend (must be cross-process for correctness
    ///   under multiple server processes)
    /// - `ttl_seconds` - snapshot lifetime
    /// - `cache_missing` - when true, a `None` lookup result is cached too,
    ///   shielding the store from repeated queries for invalid ids
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        ttl_seconds: u64,
        cache_missing: bool,
    ) -> Self {
        Self {
            repository,
            cache,
            ttl_seconds,
            cache_missing,
        }
    }

    /// Retrieves a user by primary key, cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataAccess`] if the cache misses and the store
    /// lookup fails. No cache entry is written in that case.
    pub async fn retrieve_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let key = user_cache_key(id);

        match self.cache.get(&key).await {
            Ok(Some(payload)) => match serde_json::from_str::<Option<User>>(&payload) {
                Ok(snapshot) => {
                    debug!("Cache HIT for {}", key);
                    return Ok(snapshot);
                }
                Err(e) => {
                    // Stale schema or manual edits; treat as a miss and overwrite.
                    warn!("Unreadable snapshot under {}: {}", key, e);
                }
            },
            Ok(None) => {
                debug!("Cache MISS for {}", key);
            }
            Err(e) => {
                // Fail open: authentication must not depend on the cache.
                error!("Cache error for {}: {}", key, e);
                return self.repository.find_by_id(id).await;
            }
        }

        let user = self.repository.find_by_id(id).await?;

        if user.is_some() || self.cache_missing {
            self.store_snapshot(&key, &user).await;
        }

        Ok(user)
    }

    async fn store_snapshot(&self, key: &str, user: &Option<User>) {
        let payload = match serde_json::to_string(user) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize snapshot for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set(key, &payload, Some(self.ttl_seconds as usize))
            .await
        {
            warn!("Failed to cache snapshot for {}: {}", key, e);
        }
    }
}
