use crate::config::StoreConfig;
use crate::framework::StoreActor;
use crate::gateway::Gateway;
use crate::model::{Cart, Order, Product};
use crate::store::{CartStore, OrderStore, ProductStore};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the dashboard's client-side store.
///
/// `DashboardSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the three store actors
/// - **Dependency Wiring**: Handing every store the same gateway and id policy
///
/// # Architecture
///
/// - **Product store**: the catalog
/// - **Cart store**: carts and their line items
/// - **Order store**: carts seen as orders, with client-held status
///
/// The stores do not talk to each other. A cart line is completed from the
/// gateway, not from the product store, since a cart may reference products
/// the catalog page never loaded.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::from_env()?;
/// let gateway = Arc::new(HttpGateway::new(&config.api, config.ids.clone())?);
/// let system = DashboardSystem::new(&config, gateway);
///
/// let products = system.product_store.load().await?;
/// system.product_store.delete_product(products[0].key).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DashboardSystem {
    pub product_store: ProductStore,
    pub cart_store: CartStore,
    pub order_store: OrderStore,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    /// Spawns one actor per collection and wraps each client in its store.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &StoreConfig, gateway: Arc<dyn Gateway>) -> Self {
        let buffer = config.store.buffer_size;

        let (product_actor, product_client) = StoreActor::<Product>::new(buffer);
        let (cart_actor, cart_client) = StoreActor::<Cart>::new(buffer);
        let (order_actor, order_client) = StoreActor::<Order>::new(buffer);

        let handles = vec![
            tokio::spawn(product_actor.run()),
            tokio::spawn(cart_actor.run()),
            tokio::spawn(order_actor.run()),
        ];

        Self {
            product_store: ProductStore::new(product_client, gateway.clone()),
            cart_store: CartStore::new(cart_client, gateway.clone(), config.ids.clone()),
            order_store: OrderStore::new(order_client, gateway),
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the stores closes the actors' channels; each actor finishes its
    /// queued messages and exits. Clones of the stores held elsewhere keep their
    /// actor alive, so every clone must be dropped before calling this.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_store);
        drop(self.cart_store);
        drop(self.order_store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
