//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`User`] - An authenticatable user record
//! - [`UserPatch`] - Partial update for an existing user
//!
//! All entities include unit tests demonstrating their construction and usage.

pub mod user;

pub use user::{User, UserPatch, user_cache_key};
