//! # Framework Errors
//!
//! Errors raised by the store actor plumbing itself, independent of any
//! remote call.

use crate::model::EntityKey;

/// Errors that can occur within the store framework.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(EntityKey),
}
