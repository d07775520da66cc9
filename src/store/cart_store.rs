//! # Cart Store
//!
//! High-level API over the `Cart` collection.
//!
//! Line edits reach the actor as a [`CartPatch`] delta, applied against the
//! lines it holds when the message arrives, so concurrent edits of one cart
//! do not overwrite each other. For a remote cart the resulting
//! `(product id, quantity)` list is first sent as a merge request. The server
//! echo is not used, since the demo API drops details it was not sent. Totals
//! are recomputed by the actor after each change.
use crate::framework::{StoreClient, StoreEntity, StoreHandle};
use crate::gateway::{Gateway, LineRequest};
use crate::model::{Cart, CartPatch, EntityKey, IdPolicy, LineItem, LinePatch, Product};
use crate::store::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct CartStore {
    inner: StoreClient<Cart>,
    gateway: Arc<dyn Gateway>,
    policy: IdPolicy,
}

/// Builds a cart line from catalog details.
fn line_from_product(product: &Product, quantity: u32) -> LineItem {
    LineItem {
        id: product.key.raw(),
        title: product.title.clone(),
        price: product.price,
        quantity,
        discounted_price: product.discounted_price(),
        thumbnail: product.thumbnail.clone(),
    }
}

impl CartStore {
    pub fn new(inner: StoreClient<Cart>, gateway: Arc<dyn Gateway>, policy: IdPolicy) -> Self {
        Self {
            inner,
            gateway,
            policy,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Cart>, StoreError> {
        let carts = self.gateway.list_carts().await?;
        self.set_carts(carts).await?;
        Ok(self.inner.snapshot().await?)
    }

    /// Replaces the collection, but only when it is empty.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn set_carts(&self, items: Vec<Cart>) -> Result<bool, StoreError> {
        Ok(self.inner.set_if_empty(items).await?)
    }

    /// Creates a cart holding one product.
    ///
    /// Lines the remote returns without a discount are completed from the
    /// product catalog. Any gateway failure is returned and nothing is stored.
    #[instrument(skip(self))]
    pub async fn create_cart(&self, user_id: u64, product_id: u64, quantity: u32) -> Result<Cart, StoreError> {
        let request = [LineRequest {
            id: product_id,
            quantity,
        }];
        let mut cart = self.gateway.create_cart(user_id, &request).await?;

        for line in cart.products.iter_mut() {
            if line.discounted_price.is_some() {
                continue;
            }
            let product = self.gateway.get_product(line.id).await?;
            debug!(product_id = line.id, "Line completed from catalog");
            *line = line_from_product(&product, line.quantity);
        }

        // The remote echoes the same placeholder id for every new cart.
        let fresh_key = self.policy.is_cart_placeholder(cart.key.raw());
        cart.key = EntityKey::Local(cart.key.raw());
        let cart = self.inner.insert(cart, fresh_key).await?;
        info!(key = %cart.key, total = cart.total, "Cart created");
        Ok(cart)
    }

    /// Adds `quantity` units of a product, fetching its details if the cart
    /// does not hold it yet.
    #[instrument(skip(self))]
    pub async fn add_item(&self, key: EntityKey, product_id: u64, quantity: u32) -> Result<Cart, StoreError> {
        let cart = self.require(key).await?;
        let line = match cart.line(product_id) {
            Some(line) => {
                line.quantity
                    .checked_add(quantity)
                    .ok_or(StoreError::QuantityOverflow { product_id })?;
                LinePatch::quantity(product_id, quantity)
            }
            None => {
                let product = self.gateway.get_product(product_id).await?;
                line_from_product(&product, quantity).into()
            }
        };
        self.commit(cart, CartPatch::AddQuantity(line)).await
    }

    /// Sets the quantity of one line. A quantity of zero removes it.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, key: EntityKey, product_id: u64, quantity: u32) -> Result<Cart, StoreError> {
        let cart = self.require(key).await?;
        if cart.line(product_id).is_none() {
            debug!("Cart has no such line");
            return Ok(cart);
        }
        self.commit(
            cart,
            CartPatch::SetQuantity {
                id: product_id,
                quantity,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, key: EntityKey, product_id: u64) -> Result<Cart, StoreError> {
        self.update_quantity(key, product_id, 0).await
    }

    /// Sets the cart's lines to `lines`.
    ///
    /// Lines not listed, or listed with quantity zero, are dropped. Fields a
    /// patch leaves out are carried over from the existing line.
    #[instrument(skip(self))]
    pub async fn replace_lines(&self, key: EntityKey, lines: Vec<LinePatch>) -> Result<Cart, StoreError> {
        let cart = self.require(key).await?;
        self.commit(cart, CartPatch::Lines(lines)).await
    }

    /// Sends the lines `patch` leads to for a remote cart, then hands the
    /// patch to the actor, which applies it to the lines it holds by then.
    async fn commit(&self, cart: Cart, patch: CartPatch) -> Result<Cart, StoreError> {
        let key = cart.key;
        if let Some(id) = key.remote_id() {
            let mut next = cart;
            next.apply_patch(patch.clone());
            let request: Vec<LineRequest> = next.products.iter().map(LineRequest::from).collect();

            match self.gateway.replace_cart(id, &request).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => warn!("Remote does not know cart, updating locally"),
                Err(e) => return Err(e.into()),
            }
        }

        let cart = self.inner.patch(key, patch).await?;
        info!(key = %cart.key, total = cart.total, discounted_total = cart.discounted_total, "Cart updated");
        Ok(cart)
    }

    /// Returns the removed cart, or `None` if it was already gone.
    #[instrument(skip(self))]
    pub async fn delete_cart(&self, key: EntityKey) -> Result<Option<Cart>, StoreError> {
        if let Some(id) = key.remote_id() {
            match self.gateway.delete_cart(id).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => warn!("Remote does not know cart, removing locally"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(self.inner.remove(key).await?)
    }

    async fn require(&self, key: EntityKey) -> Result<Cart, StoreError> {
        self.inner.get(key).await?.ok_or(StoreError::NotFound(key))
    }
}

#[async_trait]
impl StoreHandle<Cart> for CartStore {
    type Error = StoreError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }
}
