/// Represents a customer order.
///
/// An order is a cart seen from the fulfilment side, with a client-held
/// [`OrderStatus`]. The remote API does not keep the status between reads, so
/// the value held by the store is the only durable copy for the session.
use crate::framework::StoreEntity;
use crate::model::{Cart, EntityKey, LineItem};
use crate::totals::summarize;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Fulfilment status.
///
/// Expected flow is `Pending → Processing → Completed`, with `Cancelled`
/// reachable from any non-terminal state. Transitions are not validated and
/// any operator-supplied value is kept as [`OrderStatus::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "processing" => OrderStatus::Processing,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub key: EntityKey,
    pub user_id: u64,
    pub products: Vec<LineItem>,
    pub total: f64,
    pub discounted_total: f64,
    pub total_products: usize,
    pub total_quantity: u32,
    pub status: OrderStatus,
}

impl Order {
    /// Relabels a cart as an order with the given status.
    pub fn from_cart(cart: Cart, status: OrderStatus) -> Self {
        Self {
            key: cart.key,
            user_id: cart.user_id,
            products: cart.products,
            total: cart.total,
            discounted_total: cart.discounted_total,
            total_products: cart.total_products,
            total_quantity: cart.total_quantity,
            status,
        }
    }
}

/// Payload for creating an order locally.
///
/// Orders only ever arrive from the remote, so no store synthesizes one; the
/// type exists for [`StoreEntity::Draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: u64,
    pub products: Vec<LineItem>,
    pub status: OrderStatus,
}

/// Updates an order can receive. Only the status is editable.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
}

impl StoreEntity for Order {
    type Draft = OrderDraft;
    type Patch = OrderPatch;

    fn key(&self) -> EntityKey {
        self.key
    }

    fn set_key(&mut self, key: EntityKey) {
        self.key = key;
    }

    fn from_draft(key: EntityKey, draft: OrderDraft) -> Self {
        let cart = Cart::new(key, draft.user_id, draft.products);
        Self::from_cart(cart, draft.status)
    }

    fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn on_change(&mut self) {
        let summary = summarize(&self.products);
        self.total = summary.totals.total;
        self.discounted_total = summary.totals.discounted_total;
        self.total_products = summary.total_products;
        self.total_quantity = summary.total_quantity;
    }
}

/// One page of the order listing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_any_string() {
        assert_eq!(OrderStatus::from("Completed"), OrderStatus::Completed);
        assert_eq!(
            OrderStatus::from("on hold"),
            OrderStatus::Other("on hold".into())
        );
        assert_eq!(String::from(OrderStatus::Other("on hold".into())), "on hold");
    }

    #[test]
    fn test_status_serde_is_a_plain_string() {
        let json = serde_json::to_value(OrderStatus::Processing).unwrap();
        assert_eq!(json, serde_json::json!("processing"));
        let back: OrderStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, OrderStatus::Processing);
    }

    #[test]
    fn test_from_cart_keeps_totals() {
        let cart = Cart::new(
            EntityKey::Remote(2),
            1,
            vec![LineItem::new(4, "Lamp", 12.0, 3)],
        );
        let order = Order::from_cart(cart, OrderStatus::Pending);
        assert_eq!(order.total, 36.0);
        assert_eq!(order.total_quantity, 3);
        assert!(!order.status.is_terminal());
    }
}
