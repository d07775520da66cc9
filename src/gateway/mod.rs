//! # Remote Resource Gateway
//!
//! Typed async operations over the fixed REST endpoints of the demo API.
//!
//! The [`Gateway`] trait is the seam between the store and the network:
//! [`HttpGateway`] talks to the real API, [`mock::MockGateway`] answers from an
//! expectation queue in tests. Every operation fails with a [`GatewayError`]
//! and nothing is retried here; the store decides what a failure means.
//!
//! Writes on the demo API are simulated. A successful `PUT` or `DELETE` is not
//! visible in later reads, so callers must never rely on write-then-read
//! consistency.

pub mod error;
pub mod http;
pub mod mock;
pub mod wire;

pub use error::*;
pub use http::HttpGateway;
pub use wire::LineRequest;

use crate::model::{Cart, Order, OrderStatus, OrdersPage, Product, ProductDraft, ProductPatch, User};
use async_trait::async_trait;

/// Remote operations consumed by the store.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    async fn get_product(&self, id: u64) -> Result<Product, GatewayError>;

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, GatewayError>;

    /// The patch type has no id field, so the payload never carries one.
    async fn replace_product(&self, id: u64, patch: &ProductPatch) -> Result<Product, GatewayError>;

    /// Echoes the deleted record.
    async fn delete_product(&self, id: u64) -> Result<Product, GatewayError>;

    async fn list_carts(&self) -> Result<Vec<Cart>, GatewayError>;

    async fn create_cart(&self, user_id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError>;

    /// Merge-style update of the cart's lines.
    async fn replace_cart(&self, id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError>;

    async fn delete_cart(&self, id: u64) -> Result<(), GatewayError>;

    async fn list_orders(&self) -> Result<OrdersPage, GatewayError>;

    async fn get_order(&self, id: u64) -> Result<Order, GatewayError>;

    /// Best effort: the remote does not keep the status across reads.
    async fn patch_order_status(&self, id: u64, status: &OrderStatus) -> Result<Order, GatewayError>;

    async fn get_user(&self, id: u64) -> Result<User, GatewayError>;
}
