use crate::framework::FrameworkError;
use crate::gateway::GatewayError;
use crate::model::EntityKey;
use thiserror::Error;

/// Errors surfaced by the resource stores.
///
/// Gateway failures only reach the caller where the fallback policy says to
/// re-raise; in every such case the store is left unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Store communication error: {0}")]
    Framework(FrameworkError),

    #[error("Item not found: {0}")]
    NotFound(EntityKey),

    #[error("Quantity of product {product_id} would exceed {max}", max = u32::MAX)]
    QuantityOverflow { product_id: u64 },
}

impl From<FrameworkError> for StoreError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(key) => StoreError::NotFound(key),
            other => StoreError::Framework(other),
        }
    }
}
