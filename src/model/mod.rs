//! Pure data structures implementing the [`StoreEntity`](crate::framework::StoreEntity) trait.

pub mod cart;
pub mod key;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use key::*;
pub use order::*;
pub use product::*;
pub use user::*;
