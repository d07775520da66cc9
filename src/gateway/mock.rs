//! # Mock Gateway
//!
//! Utilities for testing the stores without a network.
//!
//! [`MockGateway`] answers each call from a queue of expectations, in order, and
//! records every call it receives. An unexpected call, or a call that does not
//! match the next expectation, panics the test.
//!
//! # Example
//! ```
//! use dashboard_store::gateway::mock::{GatewayCall, MockGateway};
//! use dashboard_store::gateway::{Gateway, GatewayError};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockGateway::new();
//! mock.expect_delete_product(3).return_err(GatewayError::not_found());
//!
//! let result = mock.delete_product(3).await;
//! assert!(result.unwrap_err().is_not_found());
//!
//! assert_eq!(mock.calls(), vec![GatewayCall::DeleteProduct(3)]);
//! mock.verify(); // Ensures all expectations were met
//! # }
//! ```

use crate::gateway::{Gateway, GatewayError, LineRequest};
use crate::model::{Cart, Order, OrderStatus, OrdersPage, Product, ProductDraft, ProductPatch, User};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::mem::discriminant;
use std::sync::{Arc, Mutex};

/// A call received by the mock, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    ListProducts,
    GetProduct(u64),
    CreateProduct(ProductDraft),
    ReplaceProduct(u64, ProductPatch),
    DeleteProduct(u64),
    ListCarts,
    CreateCart(u64, Vec<LineRequest>),
    ReplaceCart(u64, Vec<LineRequest>),
    DeleteCart(u64),
    ListOrders,
    GetOrder(u64),
    PatchOrderStatus(u64, OrderStatus),
    GetUser(u64),
}

impl GatewayCall {
    fn target(&self) -> Option<u64> {
        match self {
            GatewayCall::GetProduct(id)
            | GatewayCall::ReplaceProduct(id, _)
            | GatewayCall::DeleteProduct(id)
            | GatewayCall::ReplaceCart(id, _)
            | GatewayCall::DeleteCart(id)
            | GatewayCall::GetOrder(id)
            | GatewayCall::PatchOrderStatus(id, _)
            | GatewayCall::GetUser(id) => Some(*id),
            _ => None,
        }
    }

    /// Same operation on the same id. Payloads are not compared.
    fn matches(&self, other: &GatewayCall) -> bool {
        discriminant(self) == discriminant(other) && self.target() == other.target()
    }
}

/// A canned successful response.
#[derive(Debug, Clone)]
pub enum Reply {
    Product(Product),
    Products(Vec<Product>),
    Cart(Cart),
    Carts(Vec<Cart>),
    Order(Order),
    Orders(OrdersPage),
    User(User),
    Unit,
}

macro_rules! reply_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Reply {
            fn from(value: $ty) -> Self {
                Reply::$variant(value)
            }
        })*
    };
}

reply_from! {
    Product => Product,
    Vec<Product> => Products,
    Cart => Cart,
    Vec<Cart> => Carts,
    Order => Order,
    OrdersPage => Orders,
    User => User,
}

impl From<()> for Reply {
    fn from(_: ()) -> Self {
        Reply::Unit
    }
}

struct Expectation {
    call: GatewayCall,
    response: Result<Reply, GatewayError>,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A gateway with expectation tracking for fluent testing.
#[derive(Default)]
pub struct MockGateway {
    expectations: Queue,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<R> {
    call: GatewayCall,
    expectations: Queue,
    _reply: PhantomData<R>,
}

impl<R: Into<Reply>> ExpectationBuilder<R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value.into()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Reply, GatewayError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            call: self.call,
            response,
        });
    }
}

impl MockGateway {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn expect<R>(&self, call: GatewayCall) -> ExpectationBuilder<R> {
        ExpectationBuilder {
            call,
            expectations: self.expectations.clone(),
            _reply: PhantomData,
        }
    }

    pub fn expect_list_products(&self) -> ExpectationBuilder<Vec<Product>> {
        self.expect(GatewayCall::ListProducts)
    }

    pub fn expect_get_product(&self, id: u64) -> ExpectationBuilder<Product> {
        self.expect(GatewayCall::GetProduct(id))
    }

    pub fn expect_create_product(&self) -> ExpectationBuilder<Product> {
        self.expect(GatewayCall::CreateProduct(ProductDraft::default()))
    }

    pub fn expect_replace_product(&self, id: u64) -> ExpectationBuilder<Product> {
        self.expect(GatewayCall::ReplaceProduct(id, ProductPatch::default()))
    }

    pub fn expect_delete_product(&self, id: u64) -> ExpectationBuilder<Product> {
        self.expect(GatewayCall::DeleteProduct(id))
    }

    pub fn expect_list_carts(&self) -> ExpectationBuilder<Vec<Cart>> {
        self.expect(GatewayCall::ListCarts)
    }

    pub fn expect_create_cart(&self) -> ExpectationBuilder<Cart> {
        self.expect(GatewayCall::CreateCart(0, Vec::new()))
    }

    pub fn expect_replace_cart(&self, id: u64) -> ExpectationBuilder<Cart> {
        self.expect(GatewayCall::ReplaceCart(id, Vec::new()))
    }

    pub fn expect_delete_cart(&self, id: u64) -> ExpectationBuilder<()> {
        self.expect(GatewayCall::DeleteCart(id))
    }

    pub fn expect_list_orders(&self) -> ExpectationBuilder<OrdersPage> {
        self.expect(GatewayCall::ListOrders)
    }

    pub fn expect_get_order(&self, id: u64) -> ExpectationBuilder<Order> {
        self.expect(GatewayCall::GetOrder(id))
    }

    pub fn expect_patch_order_status(&self, id: u64) -> ExpectationBuilder<Order> {
        self.expect(GatewayCall::PatchOrderStatus(id, OrderStatus::default()))
    }

    pub fn expect_get_user(&self, id: u64) -> ExpectationBuilder<User> {
        self.expect(GatewayCall::GetUser(id))
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn answer(&self, call: GatewayCall) -> Result<Reply, GatewayError> {
        self.calls.lock().unwrap().push(call.clone());

        let mut exps = self.expectations.lock().unwrap();
        let expectation = exps.pop_front();
        drop(exps);

        match expectation {
            Some(exp) if exp.call.matches(&call) => exp.response,
            Some(exp) => panic!("Expected {:?}, received {:?}", exp.call, call),
            None => panic!("Unexpected request: {:?}", call),
        }
    }
}

macro_rules! expect_reply {
    ($result:expr, $variant:ident) => {
        match $result? {
            Reply::$variant(value) => Ok(value),
            other => panic!("Reply type mismatch: {:?}", other),
        }
    };
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        expect_reply!(self.answer(GatewayCall::ListProducts), Products)
    }

    async fn get_product(&self, id: u64) -> Result<Product, GatewayError> {
        expect_reply!(self.answer(GatewayCall::GetProduct(id)), Product)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, GatewayError> {
        expect_reply!(self.answer(GatewayCall::CreateProduct(draft.clone())), Product)
    }

    async fn replace_product(&self, id: u64, patch: &ProductPatch) -> Result<Product, GatewayError> {
        expect_reply!(
            self.answer(GatewayCall::ReplaceProduct(id, patch.clone())),
            Product
        )
    }

    async fn delete_product(&self, id: u64) -> Result<Product, GatewayError> {
        expect_reply!(self.answer(GatewayCall::DeleteProduct(id)), Product)
    }

    async fn list_carts(&self) -> Result<Vec<Cart>, GatewayError> {
        expect_reply!(self.answer(GatewayCall::ListCarts), Carts)
    }

    async fn create_cart(&self, user_id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError> {
        expect_reply!(
            self.answer(GatewayCall::CreateCart(user_id, lines.to_vec())),
            Cart
        )
    }

    async fn replace_cart(&self, id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError> {
        expect_reply!(self.answer(GatewayCall::ReplaceCart(id, lines.to_vec())), Cart)
    }

    async fn delete_cart(&self, id: u64) -> Result<(), GatewayError> {
        match self.answer(GatewayCall::DeleteCart(id))? {
            Reply::Unit => Ok(()),
            other => panic!("Reply type mismatch: {:?}", other),
        }
    }

    async fn list_orders(&self) -> Result<OrdersPage, GatewayError> {
        expect_reply!(self.answer(GatewayCall::ListOrders), Orders)
    }

    async fn get_order(&self, id: u64) -> Result<Order, GatewayError> {
        expect_reply!(self.answer(GatewayCall::GetOrder(id)), Order)
    }

    async fn patch_order_status(&self, id: u64, status: &OrderStatus) -> Result<Order, GatewayError> {
        expect_reply!(
            self.answer(GatewayCall::PatchOrderStatus(id, status.clone())),
            Order
        )
    }

    async fn get_user(&self, id: u64) -> Result<User, GatewayError> {
        expect_reply!(self.answer(GatewayCall::GetUser(id)), User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKey;

    #[tokio::test]
    async fn test_mock_gateway_with_expectations() {
        let mock = MockGateway::new();
        mock.expect_get_product(1)
            .return_ok(Product::new(EntityKey::Remote(1), "Mascara", 9.99));
        mock.expect_replace_product(1).return_err(GatewayError::not_found());

        let product = mock.get_product(1).await.unwrap();
        assert_eq!(product.title, "Mascara");

        let patch = ProductPatch {
            price: Some(5.0),
            ..Default::default()
        };
        let err = mock.replace_product(1, &patch).await.unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(
            mock.calls(),
            vec![GatewayCall::GetProduct(1), GatewayCall::ReplaceProduct(1, patch)]
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_unexpected_call_panics() {
        let mock = MockGateway::new();
        let _ = mock.list_carts().await;
    }

    #[tokio::test]
    #[should_panic(expected = "Expected")]
    async fn test_mismatched_id_panics() {
        let mock = MockGateway::new();
        mock.expect_delete_cart(4).return_ok(());
        let _ = mock.delete_cart(5).await;
    }
}
