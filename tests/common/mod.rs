#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;

use cached_user_provider::AppError;
use cached_user_provider::domain::entities::{User, UserPatch};
use cached_user_provider::domain::repositories::UserRepository;
use cached_user_provider::domain::user_event::UserEvent;
use cached_user_provider::infrastructure::cache::{CacheResult, CacheService};

pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn test_user(id: i64, name: &str) -> User {
    let now = Utc::now();
    User::new(
        id,
        format!("user{}@example.com", id),
        name.to_string(),
        "$argon2id$stub".to_string(),
        None,
        now,
        now,
    )
}

/// In-memory [`CacheService`] with real TTL expiry.
///
/// Entries expire against `tokio::time::Instant`, so paused-clock tests can
/// advance time deterministically. Unlike the production Redis backend this
/// is per-process; it is only suitable for single-process tests.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
    default_ttl: Duration,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_default_ttl(Duration::from_secs(86_400))
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Returns the live payload under `key`, if any, without touching expiry.
    pub fn peek(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).and_then(|(payload, deadline)| {
            match deadline {
                Some(d) if Instant::now() >= *d => None,
                _ => Some(payload.clone()),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some((_, Some(deadline))) if Instant::now() >= *deadline => {
                entries.remove(key);
                Ok(None)
            }
            Some((payload, _)) => Ok(Some(payload.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl_seconds: Option<usize>) -> CacheResult<()> {
        let ttl = ttl_seconds
            .map(|s| Duration::from_secs(s as u64))
            .unwrap_or(self.default_ttl);
        let deadline = Instant::now() + ttl;

        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), (payload.to_string(), Some(deadline)));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// In-memory [`UserRepository`] with query counting and change events.
///
/// `insert_direct` writes records without emitting an event, standing in for
/// bulk or raw-SQL mutations that bypass the tracked change path.
pub struct InMemoryUserStore {
    records: Mutex<HashMap<i64, User>>,
    find_calls: AtomicUsize,
    events: Option<mpsc::Sender<UserEvent>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            find_calls: AtomicUsize::new(0),
            events: None,
        }
    }

    pub fn with_events(events: mpsc::Sender<UserEvent>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            find_calls: AtomicUsize::new(0),
            events: Some(events),
        }
    }

    /// Number of `find_by_id` calls served so far.
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    /// Writes a record without emitting a change event.
    pub fn insert_direct(&self, user: User) {
        self.records.lock().unwrap().insert(user.id, user);
    }

    fn emit(&self, event: UserEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.try_send(event);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let updated = {
            let mut records = self.records.lock().unwrap();
            let user = records.get_mut(&id).ok_or(AppError::NotFound { id })?;

            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(password_hash) = patch.password_hash {
                user.password_hash = password_hash;
            }
            if let Some(verified_at) = patch.email_verified_at {
                user.email_verified_at = Some(verified_at);
            }
            user.updated_at = Utc::now();

            user.clone()
        };

        self.emit(UserEvent::Updated(updated.clone()));
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.records.lock().unwrap().remove(&id).is_some();
        if deleted {
            self.emit(UserEvent::Deleted { id });
        }
        Ok(deleted)
    }
}

/// Bundles a cached loader over the in-memory store and cache.
pub struct TestHarness {
    pub store: Arc<InMemoryUserStore>,
    pub cache: Arc<InMemoryCache>,
    pub events_rx: Option<mpsc::Receiver<UserEvent>>,
    pub events_tx: mpsc::Sender<UserEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            store: Arc::new(InMemoryUserStore::with_events(tx.clone())),
            cache: Arc::new(InMemoryCache::new()),
            events_rx: Some(rx),
            events_tx: tx,
        }
    }
}
