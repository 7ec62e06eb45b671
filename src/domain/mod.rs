//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`user_event`] - Record-change notification model
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Invalidation Flow
//!
//! 1. A mutation commits through [`repositories::UserRepository`]
//! 2. A [`user_event::UserEvent`] is sent to an async channel
//! 3. [`crate::application::services::run_invalidation_worker`] drains the channel
//! 4. The matching cache entry is evicted

pub mod entities;
pub mod repositories;
pub mod user_event;
