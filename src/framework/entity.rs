//! # StoreEntity Trait
//!
//! The `StoreEntity` trait defines the contract that every record held by a
//! [`StoreActor`](crate::framework::StoreActor) must satisfy. It specifies the draft and patch
//! types for the record and the single lifecycle hook, [`StoreEntity::on_change`].
//!
//! # Architecture Note
//! Products, carts and orders share one actor implementation. Associated types keep the
//! payloads apart: a `Cart` takes a `CartPatch`, and the compiler rejects a `ProductPatch`.

use crate::model::EntityKey;
use std::fmt::Debug;

/// Trait that any record must implement to be held by a `StoreActor`.
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// The data required to synthesize a local-only record.
    type Draft: Send + Sync + Debug;

    /// The partial update applied by [`StoreEntity::apply_patch`].
    type Patch: Send + Sync + Debug;

    fn key(&self) -> EntityKey;

    /// Used by the actor when a record has to be re-keyed on insert.
    fn set_key(&mut self, key: EntityKey);

    /// Build a record from a draft under a key chosen by the actor.
    fn from_draft(key: EntityKey, draft: Self::Draft) -> Self;

    /// Merge a patch into the record. Fields the patch leaves out are kept.
    fn apply_patch(&mut self, patch: Self::Patch);

    // --- Lifecycle Hook ---

    /// Called by the actor after every insert, replace or patch, before the
    /// record becomes visible to readers. Derived fields are recomputed here.
    fn on_change(&mut self) {}
}
