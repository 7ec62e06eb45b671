//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entities::{User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::domain::user_event::UserEvent;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, email, name, password_hash, email_verified_at, created_at, updated_at";

/// PostgreSQL repository for user records.
///
/// The backing table is chosen at construction time (the provider
/// configuration's `model` parameter), so queries are built at runtime with a
/// validated identifier rather than compile-time checked macros.
///
/// After every successful mutation the repository emits a [`UserEvent`] on a
/// bounded channel; the invalidation worker turns those into cache evictions.
/// Mutations performed outside this repository emit nothing and leave any
/// cached snapshot in place until its TTL.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
    table: String,
    events: mpsc::Sender<UserEvent>,
}

impl PgUserRepository {
    /// Creates a new repository over the given table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if `table` is not a plain SQL
    /// identifier (letters, digits, underscores, not starting with a digit).
    pub fn new(
        pool: Arc<PgPool>,
        table: &str,
        events: mpsc::Sender<UserEvent>,
    ) -> Result<Self, AppError> {
        if !is_valid_identifier(table) {
            return Err(AppError::configuration(format!(
                "invalid user table name '{}'",
                table
            )));
        }

        Ok(Self {
            pool,
            table: table.to_string(),
            events,
        })
    }

    /// Publishes a change notification, dropping it if the channel is full.
    fn emit(&self, event: UserEvent) {
        if let Err(e) = self.events.try_send(event) {
            warn!("User event dropped, invalidation deferred to TTL: {}", e);
        }
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*` only, since the table name is
/// interpolated into SQL text.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            USER_COLUMNS, self.table
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET email = COALESCE($2, email),
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash),
                email_verified_at = COALESCE($5, email_verified_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            self.table, USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(patch.email)
            .bind(patch.name)
            .bind(patch.password_hash)
            .bind(patch.email_verified_at)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AppError::NotFound { id })?;

        self.emit(UserEvent::Updated(user.clone()));

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            self.emit(UserEvent::Deleted { id });
        }

        Ok(deleted)
    }
}
