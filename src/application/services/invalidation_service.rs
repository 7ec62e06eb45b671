//! Event-driven cache invalidation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::entities::{User, user_cache_key};
use crate::domain::user_event::UserEvent;
use crate::infrastructure::cache::CacheService;

/// Evicts cached user snapshots in response to record mutations.
///
/// Eviction is unconditional and idempotent: removing an absent key is a
/// silent no-op. A failed eviction is logged, never fatal; the entry still
/// expires via its TTL.
pub struct UserCacheInvalidator {
    cache: Arc<dyn CacheService>,
}

impl UserCacheInvalidator {
    /// Creates a new invalidator over the shared cache.
    pub fn new(cache: Arc<dyn CacheService>) -> Self {
        Self { cache }
    }

    /// Handles an update notification; only the id is used.
    pub async fn on_updated(&self, user: &User) {
        self.evict(user.id).await;
    }

    /// Handles a deletion notification.
    pub async fn on_deleted(&self, id: i64) {
        self.evict(id).await;
    }

    /// Dispatches a change notification to the matching eviction.
    pub async fn apply(&self, event: &UserEvent) {
        match event {
            UserEvent::Updated(user) => self.on_updated(user).await,
            UserEvent::Deleted { id } => self.on_deleted(*id).await,
        }
    }

    async fn evict(&self, id: i64) {
        let key = user_cache_key(id);

        match self.cache.delete(&key).await {
            Ok(()) => debug!("Evicted {}", key),
            Err(e) => {
                // The stale entry ages out via TTL.
                warn!("Failed to evict {}: {}", key, e);
            }
        }
    }
}

/// Drains user change events and evicts the matching cache entries.
///
/// Runs until every [`mpsc::Sender`] side of the channel is dropped. Spawn it
/// once next to the repositories that emit events:
///
/// ```ignore
/// let (tx, rx) = mpsc::channel(config.event_queue_capacity);
/// tokio::spawn(run_invalidation_worker(rx, cache.clone()));
/// ```
pub async fn run_invalidation_worker(
    mut rx: mpsc::Receiver<UserEvent>,
    cache: Arc<dyn CacheService>,
) {
    let invalidator = UserCacheInvalidator::new(cache);

    while let Some(event) = rx.recv().await {
        invalidator.apply(&event).await;
    }

    info!("Invalidation worker stopped (event channel closed)");
}
