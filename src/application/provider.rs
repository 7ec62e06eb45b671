//! Authentication provider selection and wiring.
//!
//! The host application picks a user provider by driver name in its
//! configuration; the registry maps that name to a factory assembling the
//! provider from shared infrastructure. Caching is composition, not
//! inheritance: the `cached-database` driver wraps the plain store lookup in
//! [`CachedUserService`] behind the same [`UserProvider`] interface.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::services::CachedUserService;
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::domain::user_event::UserEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUserRepository;

/// Driver name for the uncached store lookup.
pub const DRIVER_DATABASE: &str = "database";
/// Driver name for the cache-backed lookup.
pub const DRIVER_CACHED_DATABASE: &str = "cached-database";

/// A user lookup capability selectable by driver name.
///
/// The single operation the authentication flow needs: resolve an identifier
/// to the user record, or `None` when no such user exists.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Retrieves a user by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataAccess`] on store failures.
    async fn retrieve_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

#[async_trait]
impl<R: UserRepository> UserProvider for CachedUserService<R> {
    async fn retrieve_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        CachedUserService::retrieve_by_id(self, id).await
    }
}

/// Uncached provider delegating straight to the user store.
pub struct StoreUserProvider<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> StoreUserProvider<R> {
    /// Creates a provider over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UserRepository> UserProvider for StoreUserProvider<R> {
    async fn retrieve_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }
}

/// Parameter block for assembling a provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Registered driver name, e.g. [`DRIVER_CACHED_DATABASE`].
    pub driver: String,
    /// Which table the user model lives in.
    pub table: String,
    /// Snapshot lifetime for the cached driver.
    pub cache_ttl_seconds: u64,
    /// Whether "no such user" results are cached too.
    pub cache_missing_users: bool,
}

/// Shared infrastructure handed to provider factories.
pub struct ProviderDeps {
    pub pool: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
    /// Change-event channel consumed by the invalidation worker.
    pub events: mpsc::Sender<UserEvent>,
}

/// Factory assembling a provider from its configuration and dependencies.
pub type ProviderFactory =
    Box<dyn Fn(&ProviderConfig, &ProviderDeps) -> Result<Arc<dyn UserProvider>, AppError> + Send + Sync>;

/// Registry of named provider drivers.
///
/// Ships with the [`DRIVER_DATABASE`] and [`DRIVER_CACHED_DATABASE`] drivers;
/// host applications may register additional ones under their own names.
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Creates a registry with the built-in drivers.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(DRIVER_DATABASE, Box::new(build_database_provider));
        registry.register(DRIVER_CACHED_DATABASE, Box::new(build_cached_provider));

        registry
    }

    /// Registers (or replaces) a driver under the given name.
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) {
        let name = name.into();
        debug!("Registered user provider driver '{}'", name);
        self.factories.insert(name, factory);
    }

    /// Assembles the provider selected by `config.driver`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownDriver`] if no factory is registered under
    /// that name, or whatever the factory itself fails with (typically
    /// [`AppError::Configuration`] for a bad table name).
    pub fn build(
        &self,
        config: &ProviderConfig,
        deps: &ProviderDeps,
    ) -> Result<Arc<dyn UserProvider>, AppError> {
        let factory = self
            .factories
            .get(&config.driver)
            .ok_or_else(|| AppError::UnknownDriver(config.driver.clone()))?;

        factory(config, deps)
    }

    /// Returns the registered driver names.
    pub fn drivers(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_database_provider(
    config: &ProviderConfig,
    deps: &ProviderDeps,
) -> Result<Arc<dyn UserProvider>, AppError> {
    let repository = Arc::new(PgUserRepository::new(
        deps.pool.clone(),
        &config.table,
        deps.events.clone(),
    )?);

    Ok(Arc::new(StoreUserProvider::new(repository)))
}

fn build_cached_provider(
    config: &ProviderConfig,
    deps: &ProviderDeps,
) -> Result<Arc<dyn UserProvider>, AppError> {
    let repository = Arc::new(PgUserRepository::new(
        deps.pool.clone(),
        &config.table,
        deps.events.clone(),
    )?);

    Ok(Arc::new(CachedUserService::new(
        repository,
        deps.cache.clone(),
        config.cache_ttl_seconds,
        config.cache_missing_users,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::NullCache;

    fn test_deps() -> ProviderDeps {
        let pool = PgPool::connect_lazy("postgres://localhost/test").unwrap();
        let (tx, _rx) = mpsc::channel(8);

        ProviderDeps {
            pool: Arc::new(pool),
            cache: Arc::new(NullCache::new()),
            events: tx,
        }
    }

    fn test_config(driver: &str) -> ProviderConfig {
        ProviderConfig {
            driver: driver.to_string(),
            table: "users".to_string(),
            cache_ttl_seconds: 86_400,
            cache_missing_users: false,
        }
    }

    #[tokio::test]
    async fn test_builtin_drivers_build() {
        let registry = ProviderRegistry::new();
        let deps = test_deps();

        assert!(registry.build(&test_config(DRIVER_DATABASE), &deps).is_ok());
        assert!(
            registry
                .build(&test_config(DRIVER_CACHED_DATABASE), &deps)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_unknown_driver_is_rejected() {
        let registry = ProviderRegistry::new();
        let deps = test_deps();

        let result = registry.build(&test_config("ldap"), &deps);

        assert!(matches!(result, Err(AppError::UnknownDriver(_))));
    }

    #[tokio::test]
    async fn test_bad_table_name_is_rejected() {
        let registry = ProviderRegistry::new();
        let deps = test_deps();

        let mut config = test_config(DRIVER_CACHED_DATABASE);
        config.table = "users; --".to_string();

        let result = registry.build(&config, &deps);

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_custom_driver_registration() {
        struct AlwaysEmpty;

        #[async_trait]
        impl UserProvider for AlwaysEmpty {
            async fn retrieve_by_id(&self, _id: i64) -> Result<Option<User>, AppError> {
                Ok(None)
            }
        }

        let mut registry = ProviderRegistry::new();
        registry.register(
            "empty",
            Box::new(|_, _| {
                let provider: Arc<dyn UserProvider> = Arc::new(AlwaysEmpty);
                Ok(provider)
            }),
        );

        let deps = test_deps();
        let provider = registry.build(&test_config("empty"), &deps).unwrap();

        assert!(provider.retrieve_by_id(1).await.unwrap().is_none());
        assert!(registry.drivers().contains(&"empty"));
    }
}
