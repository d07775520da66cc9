//! Generic single-writer store framework.
//!
//! This module provides the building blocks every collection in the dashboard
//! shares: one actor per collection, owning the records, reached through a
//! type-safe client.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that record types implement to be held by a store
//! - [`StoreActor`] - Generic actor that owns an ordered collection
//! - [`StoreClient`] - Type-safe handle for sending requests to the actor
//! - [`StoreHandle`] - Shared read operations for resource-specific stores
//! - [`FrameworkError`] - Plumbing errors (actor closed, not found)

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;

// Re-export core types for convenience
pub use actor::{LocalIdSource, StoreActor};
pub use client::StoreClient;
pub use client_trait::StoreHandle;
pub use entity::StoreEntity;
pub use error::FrameworkError;
pub use message::{Response, StoreRequest};
