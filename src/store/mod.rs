//! # Resource Stores
//!
//! Domain-specific wrappers around the generic [`StoreClient`](crate::framework::StoreClient)s.
//! This is the API a rendering layer calls.
//!
//! ## Optimistic update with fallback
//!
//! Every mutator awaits the gateway in the caller's task, then sends the
//! reconciled result to the collection's actor. What a failure means depends
//! on the record's [`EntityKey`](crate::model::EntityKey):
//!
//! - `Local` records never reach the network.
//! - A 404 from the remote means it never knew the record; the change is
//!   applied locally.
//! - Any other failure is returned and the store is left unchanged.
//!
//! Creating a product and updating an order's status are the exceptions: both
//! always keep the change locally.

pub mod cart_store;
pub mod error;
pub mod order_store;
pub mod product_store;

pub use cart_store::CartStore;
pub use error::StoreError;
pub use order_store::{OrderDetails, OrderStore};
pub use product_store::ProductStore;
