//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the single writer for one collection of
//! records. It implements the "Server" side of the Actor Model: messages are
//! processed one at a time, so the collection needs no lock.

use crate::framework::client::StoreClient;
use crate::framework::entity::StoreEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::StoreRequest;
use crate::model::EntityKey;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Hands out ids for local-only records.
///
/// Ids come from wall-clock milliseconds, are strictly increasing within the
/// source, and skip any id already present in the collection.
#[derive(Debug, Default)]
pub struct LocalIdSource {
    last: u64,
}

impl LocalIdSource {
    pub fn next<T: StoreEntity>(&mut self, taken: &[T]) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = now.max(self.last + 1);
        while taken.iter().any(|item| item.key().raw() == candidate) {
            candidate += 1;
        }
        self.last = candidate;
        candidate
    }
}

/// The generic actor that owns an ordered collection of records.
///
/// # Architecture Note
/// The actor owns the state (`items`) and the receiver end of the channel. Remote
/// calls never happen in here; the store clients await the gateway in their own task
/// and only send the reconciled result. A slow or hung request therefore never blocks
/// reads or unrelated writes.
///
/// # Usage Pattern
///
/// ```rust
/// use dashboard_store::framework::StoreActor;
/// use dashboard_store::model::{EntityKey, Product};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Product>::new(8);
///     let handle = tokio::spawn(actor.run());
///
///     client.set_if_empty(vec![Product::new(EntityKey::Remote(1), "Mascara", 9.99)]).await.unwrap();
///     assert_eq!(client.snapshot().await.unwrap().len(), 1);
///
///     drop(client);
///     handle.await.unwrap();
/// }
/// ```
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    items: Vec<T>,
    ids: LocalIdSource,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            items: Vec::new(),
            ids: LocalIdSource::default(),
        };
        (actor, StoreClient::new(sender))
    }

    fn position(&self, key: &EntityKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Cart" instead of "dashboard_store::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Snapshot { respond_to } => {
                    debug!(entity_type, size = self.items.len(), "Snapshot");
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                StoreRequest::Get { key, respond_to } => {
                    let item = self.position(&key).map(|idx| self.items[idx].clone());
                    debug!(entity_type, %key, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::SetIfEmpty { items, respond_to } => {
                    if self.items.is_empty() {
                        self.items = items;
                        self.items.iter_mut().for_each(|item| item.on_change());
                        info!(entity_type, size = self.items.len(), "Loaded");
                        let _ = respond_to.send(Ok(true));
                    } else {
                        debug!(entity_type, size = self.items.len(), "Load skipped, store not empty");
                        let _ = respond_to.send(Ok(false));
                    }
                }
                StoreRequest::Insert {
                    mut item,
                    fresh_key,
                    respond_to,
                } => {
                    let raw = item.key().raw();
                    let collides = self.items.iter().any(|existing| existing.key().raw() == raw);
                    if fresh_key || collides {
                        let key = EntityKey::Local(self.ids.next(&self.items));
                        debug!(entity_type, from = %item.key(), to = %key, "Re-keyed");
                        item.set_key(key);
                    }
                    item.on_change();
                    self.items.push(item.clone());
                    info!(entity_type, key = %item.key(), size = self.items.len(), "Inserted");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Synthesize { draft, respond_to } => {
                    debug!(entity_type, ?draft, "Synthesize");
                    let key = EntityKey::Local(self.ids.next(&self.items));
                    let mut item = T::from_draft(key, draft);
                    item.on_change();
                    self.items.push(item.clone());
                    info!(entity_type, %key, size = self.items.len(), "Synthesized");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Replace {
                    key,
                    mut item,
                    respond_to,
                } => match self.position(&key) {
                    Some(idx) => {
                        item.set_key(key);
                        item.on_change();
                        self.items[idx] = item.clone();
                        info!(entity_type, %key, "Replaced");
                        let _ = respond_to.send(Ok(item));
                    }
                    None => {
                        warn!(entity_type, %key, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(key)));
                    }
                },
                StoreRequest::Patch {
                    key,
                    patch,
                    respond_to,
                } => {
                    debug!(entity_type, %key, ?patch, "Patch");
                    match self.position(&key) {
                        Some(idx) => {
                            let item = &mut self.items[idx];
                            item.apply_patch(patch);
                            item.on_change();
                            info!(entity_type, %key, "Patched");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        None => {
                            warn!(entity_type, %key, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(key)));
                        }
                    }
                }
                StoreRequest::Remove { key, respond_to } => {
                    let removed = self.position(&key).map(|idx| self.items.remove(idx));
                    info!(entity_type, %key, removed = removed.is_some(), size = self.items.len(), "Removed");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.items.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cart, CartPatch, LineItem, LinePatch, Product, ProductDraft, ProductPatch};

    fn spawn<T: StoreEntity>() -> StoreClient<T> {
        let (actor, client) = StoreActor::<T>::new(16);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_set_if_empty_only_once() {
        let client = spawn::<Product>();

        let first = vec![Product::new(EntityKey::Remote(1), "Mascara", 9.99)];
        assert!(client.set_if_empty(first).await.unwrap());

        let second = vec![
            Product::new(EntityKey::Remote(2), "Lipstick", 12.0),
            Product::new(EntityKey::Remote(3), "Powder", 8.0),
        ];
        assert!(!client.set_if_empty(second).await.unwrap());

        let items = client.snapshot().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Mascara");
    }

    #[tokio::test]
    async fn test_insert_rekeys_on_collision() {
        let client = spawn::<Product>();
        client
            .set_if_empty(vec![Product::new(EntityKey::Remote(31), "Lamp", 20.0)])
            .await
            .unwrap();

        let inserted = client
            .insert(Product::new(EntityKey::Local(31), "Chair", 45.0), false)
            .await
            .unwrap();
        assert!(inserted.key.is_local());
        assert_ne!(inserted.key.raw(), 31);

        let kept = client
            .insert(Product::new(EntityKey::Local(32), "Desk", 90.0), false)
            .await
            .unwrap();
        assert_eq!(kept.key, EntityKey::Local(32));
        assert_eq!(client.snapshot().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_synthesized_keys_are_unique_and_increasing() {
        let client = spawn::<Product>();
        let a = client.synthesize(ProductDraft::default()).await.unwrap();
        let b = client.synthesize(ProductDraft::default()).await.unwrap();
        assert!(a.key.is_local() && b.key.is_local());
        assert!(b.key.raw() > a.key.raw());
    }

    #[tokio::test]
    async fn test_patch_missing_key_is_not_found() {
        let client = spawn::<Product>();
        let err = client
            .patch(EntityKey::Remote(9), ProductPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound(EntityKey::Remote(9)));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let client = spawn::<Product>();
        client
            .set_if_empty(vec![Product::new(EntityKey::Remote(1), "Mascara", 9.99)])
            .await
            .unwrap();

        assert!(client.remove(EntityKey::Remote(1)).await.unwrap().is_some());
        assert!(client.remove(EntityKey::Remote(1)).await.unwrap().is_none());
        assert!(client.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_totals_recomputed_on_load_and_patch() {
        let client = spawn::<Cart>();
        let mut stale = Cart::new(
            EntityKey::Remote(5),
            1,
            vec![LineItem::new(1, "Soap", 10.0, 2).with_discounted_price(9.0)],
        );
        stale.total = 999.0;
        client.set_if_empty(vec![stale]).await.unwrap();

        let loaded = client.get(EntityKey::Remote(5)).await.unwrap().unwrap();
        assert_eq!(loaded.total, 20.0);
        assert_eq!(loaded.discounted_total, 18.0);

        let patched = client
            .patch(
                EntityKey::Remote(5),
                CartPatch::Lines(vec![LinePatch::quantity(1, 3)]),
            )
            .await
            .unwrap();
        assert_eq!(patched.total, 30.0);
        assert_eq!(patched.discounted_total, 27.0);
    }
}
