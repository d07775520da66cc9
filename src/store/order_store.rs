//! # Order Store
//!
//! High-level API over the `Order` collection. Orders are carts seen from the
//! fulfilment side; the only thing an operator changes is the status, and the
//! remote never keeps it. The status held here is therefore the session's
//! source of truth and is overlaid on anything read back from the remote.
use crate::framework::{StoreClient, StoreHandle};
use crate::gateway::Gateway;
use crate::model::{EntityKey, Order, OrderPatch, OrderStatus, OrdersPage, User};
use crate::store::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// An order together with the user who placed it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub user: User,
}

#[derive(Clone)]
pub struct OrderStore {
    inner: StoreClient<Order>,
    gateway: Arc<dyn Gateway>,
}

impl OrderStore {
    pub fn new(inner: StoreClient<Order>, gateway: Arc<dyn Gateway>) -> Self {
        Self { inner, gateway }
    }

    /// Fetches the first page of orders.
    ///
    /// The store is only filled when empty, so the returned page lists the
    /// orders as held locally, statuses included. Paging counters come from
    /// the remote.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<OrdersPage, StoreError> {
        let page = self.gateway.list_orders().await?;
        self.set_orders(page.orders).await?;
        Ok(OrdersPage {
            orders: self.inner.snapshot().await?,
            total: page.total,
            skip: page.skip,
            limit: page.limit,
        })
    }

    /// Replaces the collection, but only when it is empty.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn set_orders(&self, items: Vec<Order>) -> Result<bool, StoreError> {
        Ok(self.inner.set_if_empty(items).await?)
    }

    /// Sets the status locally, then tells the remote if it knows the order.
    ///
    /// The remote call is best effort: its failure is logged and the local
    /// status stands.
    #[instrument(skip(self))]
    pub async fn update_status(&self, key: EntityKey, status: OrderStatus) -> Result<Order, StoreError> {
        let patch = OrderPatch {
            status: Some(status.clone()),
        };
        let order = self.inner.patch(key, patch).await?;
        info!(%key, status = %order.status, "Status updated");

        if let Some(id) = key.remote_id() {
            if let Err(e) = self.gateway.patch_order_status(id, &status).await {
                warn!(error = %e, "Remote status update failed, keeping local status");
            }
        }
        Ok(order)
    }

    /// The order as the remote has it, with the locally held status, and its
    /// user.
    #[instrument(skip(self))]
    pub async fn details(&self, key: EntityKey) -> Result<OrderDetails, StoreError> {
        let held = self.inner.get(key).await?;

        let order = match key.remote_id() {
            Some(id) => match self.gateway.get_order(id).await {
                Ok(mut order) => {
                    order.key = key;
                    if let Some(held) = held {
                        order.status = held.status;
                    }
                    order
                }
                Err(e) if e.is_not_found() => {
                    debug!("Remote does not know order, using local copy");
                    held.ok_or(StoreError::NotFound(key))?
                }
                Err(e) => return Err(e.into()),
            },
            None => held.ok_or(StoreError::NotFound(key))?,
        };

        let user = self.gateway.get_user(order.user_id).await?;
        Ok(OrderDetails { order, user })
    }
}

#[async_trait]
impl StoreHandle<Order> for OrderStore {
    type Error = StoreError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::StoreActor;
    use crate::gateway::mock::{GatewayCall, MockGateway};
    use crate::gateway::GatewayError;
    use crate::model::{Cart, LineItem};

    fn setup() -> (OrderStore, Arc<MockGateway>) {
        let mock = Arc::new(MockGateway::new());
        let (actor, client) = StoreActor::<Order>::new(16);
        tokio::spawn(actor.run());
        (OrderStore::new(client, mock.clone()), mock)
    }

    fn order(id: u64, status: OrderStatus) -> Order {
        let cart = Cart::new(
            EntityKey::Remote(id),
            4,
            vec![LineItem::new(1, "Soap", 10.0, 2).with_discounted_price(9.0)],
        );
        Order::from_cart(cart, status)
    }

    fn page(orders: Vec<Order>) -> OrdersPage {
        OrdersPage {
            total: 50,
            skip: 0,
            limit: 30,
            orders,
        }
    }

    fn user() -> User {
        User {
            id: 4,
            first_name: "Emily".into(),
            last_name: "Johnson".into(),
            email: "emily.johnson@x.dummyjson.com".into(),
        }
    }

    #[tokio::test]
    async fn test_status_survives_reload() {
        let (store, mock) = setup();
        mock.expect_list_orders()
            .return_ok(page(vec![order(1, OrderStatus::Pending)]));
        mock.expect_patch_order_status(1)
            .return_ok(order(1, OrderStatus::Pending));
        mock.expect_list_orders()
            .return_ok(page(vec![order(1, OrderStatus::Pending)]));

        store.load().await.unwrap();
        store
            .update_status(EntityKey::Remote(1), OrderStatus::Processing)
            .await
            .unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.total, 50);
        assert_eq!(reloaded.orders[0].status, OrderStatus::Processing);
        mock.verify();
    }

    #[tokio::test]
    async fn test_remote_status_failure_is_swallowed() {
        let (store, mock) = setup();
        store.set_orders(vec![order(1, OrderStatus::Pending)]).await.unwrap();
        mock.expect_patch_order_status(1)
            .return_err(GatewayError::Network("connection reset".into()));

        let updated = store
            .update_status(EntityKey::Remote(1), "shipped".into())
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Other("shipped".into()));
        assert_eq!(
            mock.calls(),
            vec![GatewayCall::PatchOrderStatus(1, OrderStatus::Other("shipped".into()))]
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let (store, mock) = setup();
        let err = store
            .update_status(EntityKey::Remote(3), OrderStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(EntityKey::Remote(3)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_details_overlay_local_status() {
        let (store, mock) = setup();
        store.set_orders(vec![order(1, OrderStatus::Cancelled)]).await.unwrap();
        mock.expect_get_order(1).return_ok(order(1, OrderStatus::Pending));
        mock.expect_get_user(4).return_ok(user());

        let details = store.details(EntityKey::Remote(1)).await.unwrap();
        assert_eq!(details.order.status, OrderStatus::Cancelled);
        assert_eq!(details.order.total, 20.0);
        assert_eq!(details.user.full_name(), "Emily Johnson");
    }

    #[tokio::test]
    async fn test_details_of_local_order_skips_order_request() {
        let (store, mock) = setup();
        let mut local = order(1, OrderStatus::Processing);
        local.key = EntityKey::Local(140);
        store.set_orders(vec![local]).await.unwrap();
        mock.expect_get_user(4).return_ok(user());

        let details = store.details(EntityKey::Local(140)).await.unwrap();
        assert_eq!(details.order.key, EntityKey::Local(140));
        assert_eq!(mock.calls(), vec![GatewayCall::GetUser(4)]);
    }
}
