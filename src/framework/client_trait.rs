//! # StoreHandle Trait
//!
//! Provides the read side shared by every resource store, built on top of a
//! generic [`StoreClient`].
use crate::framework::{FrameworkError, StoreClient, StoreEntity};
use crate::model::EntityKey;
use async_trait::async_trait;

/// Trait for resource-specific stores to inherit the standard read operations.
///
/// Implementors only say where their [`StoreClient`] is; `snapshot` and `get`
/// come for free.
#[async_trait]
pub trait StoreHandle<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Every record currently held, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().snapshot().await?)
    }

    /// Fetch a record by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: EntityKey) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().get(key).await?)
    }
}
