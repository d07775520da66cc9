//! # Product Store
//!
//! High-level API over the `Product` collection. Every mutator talks to the
//! gateway first and then reconciles the store according to the key of the
//! record being changed.
//!
//! | Operation        | `Local` key        | `Remote` key, ok      | `Remote` key, 404 | other error |
//! |------------------|--------------------|-----------------------|-------------------|-------------|
//! | `update_product` | merge, no request  | overwrite with server | merge             | re-raise    |
//! | `delete_product` | remove, no request | remove                | remove            | re-raise    |
//!
//! `add_product` never fails on a gateway error: the product is kept locally
//! under a synthesized key.
use crate::framework::{StoreClient, StoreHandle};
use crate::gateway::Gateway;
use crate::model::{EntityKey, Product, ProductDraft, ProductPatch};
use crate::store::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct ProductStore {
    inner: StoreClient<Product>,
    gateway: Arc<dyn Gateway>,
}

impl ProductStore {
    pub fn new(inner: StoreClient<Product>, gateway: Arc<dyn Gateway>) -> Self {
        Self { inner, gateway }
    }

    /// Fetches the catalog and loads it if the store is still empty.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.gateway.list_products().await?;
        self.set_products(products).await?;
        Ok(self.inner.snapshot().await?)
    }

    /// Replaces the collection, but only when it is empty.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn set_products(&self, items: Vec<Product>) -> Result<bool, StoreError> {
        Ok(self.inner.set_if_empty(items).await?)
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        match self.gateway.create_product(&draft).await {
            Ok(mut created) => {
                // Remote creates are simulated; the echoed id is never readable later.
                created.key = EntityKey::Local(created.key.raw());
                let product = self.inner.insert(created, false).await?;
                info!(key = %product.key, "Product created");
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "Create failed, keeping product locally");
                Ok(self.inner.synthesize(draft).await?)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, key: EntityKey, patch: ProductPatch) -> Result<Product, StoreError> {
        let Some(id) = key.remote_id() else {
            debug!("Local product, no request sent");
            return Ok(self.inner.patch(key, patch).await?);
        };

        match self.gateway.replace_product(id, &patch).await {
            Ok(server) => Ok(self.inner.replace(key, server).await?),
            Err(e) if e.is_not_found() => {
                warn!("Remote does not know product, updating locally");
                Ok(self.inner.patch(key, patch).await?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the removed product, or `None` if it was already gone.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, key: EntityKey) -> Result<Option<Product>, StoreError> {
        if let Some(id) = key.remote_id() {
            match self.gateway.delete_product(id).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => warn!("Remote does not know product, removing locally"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(self.inner.remove(key).await?)
    }
}

#[async_trait]
impl StoreHandle<Product> for ProductStore {
    type Error = StoreError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::StoreActor;
    use crate::gateway::mock::{GatewayCall, MockGateway};
    use crate::gateway::GatewayError;

    fn setup() -> (ProductStore, Arc<MockGateway>) {
        let mock = Arc::new(MockGateway::new());
        let (actor, client) = StoreActor::<Product>::new(16);
        tokio::spawn(actor.run());
        (ProductStore::new(client, mock.clone()), mock)
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(EntityKey::Remote(1), "Mascara", 9.99),
            Product::new(EntityKey::Remote(2), "Eyeshadow", 19.99),
        ]
    }

    fn draft(title: &str) -> ProductDraft {
        ProductDraft {
            title: title.into(),
            price: 12.5,
            category: "furniture".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_only_fills_empty_store() {
        let (store, mock) = setup();
        mock.expect_list_products().return_ok(catalog());
        mock.expect_list_products()
            .return_ok(vec![Product::new(EntityKey::Remote(3), "Powder", 8.0)]);

        assert_eq!(store.load().await.unwrap().len(), 2);
        let again = store.load().await.unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].title, "Mascara");
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_product_keeps_server_record_locally() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_create_product()
            .return_ok(Product::new(EntityKey::Local(195), "Chair", 12.5));

        let product = store.add_product(draft("Chair")).await.unwrap();
        assert_eq!(product.key, EntityKey::Local(195));
        assert_eq!(store.snapshot().await.unwrap().len(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_product_falls_back_on_any_error() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_create_product()
            .return_err(GatewayError::Network("connection refused".into()));

        let product = store.add_product(draft("Chair")).await.unwrap();
        assert!(product.key.is_local());
        assert_eq!(product.title, "Chair");

        let items = store.snapshot().await.unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[..2].iter().all(|p| p.key.raw() != product.key.raw()));
    }

    #[tokio::test]
    async fn test_local_product_never_reaches_gateway() {
        let (store, mock) = setup();
        store
            .set_products(vec![Product::new(EntityKey::Local(31), "Lamp", 20.0)])
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(25.0),
            ..Default::default()
        };
        let updated = store.update_product(EntityKey::Local(31), patch).await.unwrap();
        assert_eq!(updated.price, 25.0);
        assert_eq!(updated.title, "Lamp");

        let removed = store.delete_product(EntityKey::Local(31)).await.unwrap();
        assert!(removed.is_some());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_with_server_record() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        let mut server = Product::new(EntityKey::Remote(1), "Mascara Pro", 11.0);
        server.category = "beauty".into();
        mock.expect_replace_product(1).return_ok(server);

        let patch = ProductPatch {
            title: Some("Mascara Pro".into()),
            ..Default::default()
        };
        let updated = store.update_product(EntityKey::Remote(1), patch).await.unwrap();
        assert_eq!(updated.key, EntityKey::Remote(1));
        assert_eq!(updated.price, 11.0);
        assert_eq!(updated.category, "beauty");
    }

    #[tokio::test]
    async fn test_update_not_found_merges_locally() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_replace_product(2).return_err(GatewayError::not_found());

        let patch = ProductPatch {
            price: Some(5.0),
            ..Default::default()
        };
        let updated = store.update_product(EntityKey::Remote(2), patch.clone()).await.unwrap();
        assert_eq!(updated.price, 5.0);
        assert_eq!(updated.title, "Eyeshadow");
        assert_eq!(mock.calls(), vec![GatewayCall::ReplaceProduct(2, patch)]);
    }

    #[tokio::test]
    async fn test_update_server_error_leaves_store_unchanged() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_replace_product(2).return_err(GatewayError::status(500, "boom"));

        let patch = ProductPatch {
            price: Some(5.0),
            ..Default::default()
        };
        let err = store.update_product(EntityKey::Remote(2), patch).await.unwrap_err();
        assert_eq!(err, StoreError::Gateway(GatewayError::status(500, "boom")));

        let kept = store.get(EntityKey::Remote(2)).await.unwrap().unwrap();
        assert_eq!(kept.price, 19.99);
    }

    #[tokio::test]
    async fn test_delete_not_found_removes_locally() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_delete_product(1).return_err(GatewayError::not_found());

        store.delete_product(EntityKey::Remote(1)).await.unwrap();
        let items = store.snapshot().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key, EntityKey::Remote(2));
    }

    #[tokio::test]
    async fn test_delete_network_error_keeps_product() {
        let (store, mock) = setup();
        store.set_products(catalog()).await.unwrap();
        mock.expect_delete_product(1)
            .return_err(GatewayError::Network("timed out".into()));

        assert!(store.delete_product(EntityKey::Remote(1)).await.is_err());
        assert_eq!(store.snapshot().await.unwrap().len(), 2);
    }
}
