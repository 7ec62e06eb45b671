//! Repository trait for user record data access.

use crate::domain::entities::{User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the authoritative user store.
///
/// The single-record lookup is the path the cached loader decorates; the
/// mutation operations are the tracked change path that emits invalidation
/// events after success.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by primary key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataAccess`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Partially updates a user record.
    ///
    /// Only fields present in [`UserPatch`] are modified. `None` fields are
    /// unchanged. Implementations emit [`crate::domain::user_event::UserEvent::Updated`]
    /// after a successful write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches `id`.
    /// Returns [`AppError::DataAccess`] on database errors.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    /// Deletes a user record.
    ///
    /// Returns `Ok(true)` if the user was found and deleted, `Ok(false)` if
    /// not found. Implementations emit
    /// [`crate::domain::user_event::UserEvent::Deleted`] after a successful
    /// deletion.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataAccess`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
