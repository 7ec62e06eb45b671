//! User mutation event model for asynchronous cache invalidation.

use crate::domain::entities::User;

/// A record-change notification emitted by the data-access layer.
///
/// Sent over a bounded channel after every successful update or deletion of a
/// user record, so that cache eviction is decoupled from the mutation itself.
/// Mutations that bypass the emitting repository (bulk statements, raw SQL)
/// produce no event; the corresponding cache entry then lives until its TTL.
///
/// # Usage Flow
///
/// 1. Repository commits the mutation
/// 2. Event is sent to the channel (non-blocking, dropped when full)
/// 3. Processed by [`crate::application::services::run_invalidation_worker`]
/// 4. The entry for [`User::cache_key`] is evicted
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A user record was updated; carries the post-mutation state.
    Updated(User),
    /// A user record was deleted; only the id survives.
    Deleted { id: i64 },
}

impl UserEvent {
    /// Returns the id of the affected user.
    ///
    /// Only the id participates in invalidation; the rest of the record is
    /// carried for observability.
    pub fn user_id(&self) -> i64 {
        match self {
            Self::Updated(user) => user.id,
            Self::Deleted { id } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_id_extraction() {
        let now = Utc::now();
        let user = User::new(
            42,
            "a@example.com".to_string(),
            "A".to_string(),
            "hash".to_string(),
            None,
            now,
            now,
        );

        assert_eq!(UserEvent::Updated(user).user_id(), 42);
        assert_eq!(UserEvent::Deleted { id: 7 }.user_id(), 7);
    }
}
