//! Wire shapes of the remote API and their conversion into store records.
//!
//! The API is loose about types: discount fields may be missing, strings, or
//! numbers, and the line-level `discountedTotal` is a total for the whole
//! quantity. Everything is normalized here so the rest of the crate only sees
//! per-unit discounted prices.

use crate::model::{Cart, IdPolicy, LineItem, Order, OrderStatus, OrdersPage, Product};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub discount_percentage: Option<Value>,
}

impl WireProduct {
    pub fn into_product(self, policy: &IdPolicy) -> Product {
        Product {
            key: policy.product_key(self.id),
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            thumbnail: self.thumbnail,
            images: self.images,
            discount_percentage: self.discount_percentage.as_ref().and_then(Value::as_f64),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProductList {
    pub products: Vec<WireProduct>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLineItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub discount_percentage: Option<Value>,
    #[serde(default)]
    pub discounted_total: Option<Value>,
}

impl From<WireLineItem> for LineItem {
    fn from(wire: WireLineItem) -> Self {
        let from_percentage = wire
            .discount_percentage
            .as_ref()
            .and_then(Value::as_f64)
            .map(|pct| wire.price * (1.0 - pct / 100.0));
        let from_total = wire
            .discounted_total
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|_| wire.quantity > 0)
            .map(|total| total / f64::from(wire.quantity));

        LineItem {
            id: wire.id,
            title: wire.title,
            price: wire.price,
            quantity: wire.quantity,
            discounted_price: from_percentage.or(from_total),
            thumbnail: wire.thumbnail,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCart {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub products: Vec<WireLineItem>,
    #[serde(default)]
    pub status: Option<String>,
}

impl WireCart {
    /// Server-side totals are ignored; `Cart::new` recomputes them.
    pub fn into_cart(self, policy: &IdPolicy) -> Cart {
        Cart::new(
            policy.cart_key(self.id),
            self.user_id,
            self.products.into_iter().map(LineItem::from).collect(),
        )
    }

    pub fn into_order(mut self, policy: &IdPolicy) -> Order {
        let status = self.status.take().map(OrderStatus::from).unwrap_or_default();
        Order::from_cart(self.into_cart(policy), status)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCartList {
    pub carts: Vec<WireCart>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

impl WireCartList {
    pub fn into_orders_page(self, policy: &IdPolicy) -> OrdersPage {
        OrdersPage {
            orders: self
                .carts
                .into_iter()
                .map(|cart| cart.into_order(policy))
                .collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// A `(product id, quantity)` pair, the only line data the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRequest {
    pub id: u64,
    pub quantity: u32,
}

impl From<&LineItem> for LineRequest {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartBody<'a> {
    pub user_id: u64,
    pub products: &'a [LineRequest],
}

/// `merge: true` asks the API to merge rather than replace the line list.
#[derive(Debug, Serialize)]
pub struct ReplaceCartBody<'a> {
    pub merge: bool,
    pub products: &'a [LineRequest],
}

#[derive(Debug, Serialize)]
pub struct StatusBody<'a> {
    pub status: &'a str,
}
