//! # Generic Messages
//!
//! Message types exchanged between a [`StoreClient`](crate::framework::StoreClient)
//! and its [`StoreActor`](crate::framework::StoreActor).

use crate::framework::entity::StoreEntity;
use crate::framework::error::FrameworkError;
use crate::model::EntityKey;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a store actor.
///
/// Writes address a record by key. `Replace` and `Remove` produce the same
/// collection when applied twice. `Patch` is applied to the record as the actor
/// holds it when the message arrives, so a patch sent after a slow network call
/// lands on top of any write that happened meanwhile.
///
/// - **Snapshot / Get**: reads.
/// - **SetIfEmpty**: bulk load, applied only to an empty collection.
/// - **Insert**: append a record, re-keying it on id collision or on request.
/// - **Synthesize**: append a local-only record built from a draft.
/// - **Replace**: authoritative overwrite of an existing record.
/// - **Patch**: merge a partial update into an existing record.
/// - **Remove**: drop a record; missing keys are not an error.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Snapshot {
        respond_to: Response<Vec<T>>,
    },
    Get {
        key: EntityKey,
        respond_to: Response<Option<T>>,
    },
    SetIfEmpty {
        items: Vec<T>,
        respond_to: Response<bool>,
    },
    Insert {
        item: T,
        fresh_key: bool,
        respond_to: Response<T>,
    },
    Synthesize {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Replace {
        key: EntityKey,
        item: T,
        respond_to: Response<T>,
    },
    Patch {
        key: EntityKey,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Remove {
        key: EntityKey,
        respond_to: Response<Option<T>>,
    },
}
