//! # Generic Client
//!
//! This module defines the generic client for communicating with a store actor.

use crate::framework::entity::StoreEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{Response, StoreRequest};
use crate::model::EntityKey;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to a `StoreActor`.
///
/// Holds only the sender half of the channel, so cloning is cheap and every
/// clone talks to the same collection.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to })
            .await
    }

    pub async fn get(&self, key: EntityKey) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Get { key, respond_to })
            .await
    }

    /// Loads `items` only if the collection is empty. Returns whether it did.
    pub async fn set_if_empty(&self, items: Vec<T>) -> Result<bool, FrameworkError> {
        self.request(|respond_to| StoreRequest::SetIfEmpty { items, respond_to })
            .await
    }

    /// Appends `item`. With `fresh_key` set, or when the item's id is already
    /// taken, the actor assigns a new local key.
    pub async fn insert(&self, item: T, fresh_key: bool) -> Result<T, FrameworkError> {
        self.request(|respond_to| StoreRequest::Insert {
            item,
            fresh_key,
            respond_to,
        })
        .await
    }

    pub async fn synthesize(&self, draft: T::Draft) -> Result<T, FrameworkError> {
        self.request(|respond_to| StoreRequest::Synthesize { draft, respond_to })
            .await
    }

    pub async fn replace(&self, key: EntityKey, item: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| StoreRequest::Replace {
            key,
            item,
            respond_to,
        })
        .await
    }

    pub async fn patch(&self, key: EntityKey, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| StoreRequest::Patch {
            key,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn remove(&self, key: EntityKey) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Remove { key, respond_to })
            .await
    }
}
