use dashboard_store::config::StoreConfig;
use dashboard_store::forms::{CartItemForm, NewCartForm, ProductForm};
use dashboard_store::framework::StoreHandle;
use dashboard_store::gateway::HttpGateway;
use dashboard_store::lifecycle::{setup_tracing, DashboardSystem};
use dashboard_store::model::{OrderStatus, ProductPatch};
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(&config.logging.level);

    info!(base_url = %config.api.base_url, "Starting dashboard store");

    let gateway = HttpGateway::new(&config.api, config.ids.clone()).map_err(|e| e.to_string())?;
    let system = DashboardSystem::new(&config, Arc::new(gateway));

    // Catalog: load, add, edit the new product, delete a remote one
    let span = tracing::info_span!("catalog");
    async {
        let products = system.product_store.load().await.map_err(|e| e.to_string())?;
        info!(count = products.len(), "Catalog loaded");

        let form = ProductForm {
            title: "Walnut Side Table".into(),
            description: "Solid walnut, oiled finish".into(),
            price: "149.00".into(),
            category: "furniture".into(),
            thumbnail: "https://cdn.dummyjson.com/placeholder.png".into(),
        };
        let draft = form.to_draft().map_err(|e| e.to_string())?;
        let created = system
            .product_store
            .add_product(draft)
            .await
            .map_err(|e| e.to_string())?;
        info!(key = %created.key, "Product added");

        let patch = ProductPatch {
            price: Some(129.0),
            ..Default::default()
        };
        system
            .product_store
            .update_product(created.key, patch)
            .await
            .map_err(|e| e.to_string())?;

        if let Some(first) = products.first() {
            match system.product_store.delete_product(first.key).await {
                Ok(_) => info!(key = %first.key, "Product deleted"),
                Err(e) => error!(error = %e, "Delete failed"),
            }
        }

        let remaining = system.product_store.snapshot().await.map_err(|e| e.to_string())?;
        info!(count = remaining.len(), "Catalog after edits");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Carts: load, create one, add an item to it
    let span = tracing::info_span!("carts");
    async {
        let carts = system.cart_store.load().await.map_err(|e| e.to_string())?;
        info!(count = carts.len(), "Carts loaded");

        let form = NewCartForm {
            user_id: "1".into(),
            item: CartItemForm {
                product_id: "5".into(),
                quantity: "2".into(),
            },
        };
        let (user_id, line) = form.to_request().map_err(|e| e.to_string())?;
        let cart = match system.cart_store.create_cart(user_id, line.id, line.quantity).await {
            Ok(cart) => cart,
            Err(e) => {
                error!(error = %e, "Cart creation failed");
                return Ok(());
            }
        };

        let cart = system
            .cart_store
            .add_item(cart.key, 9, 1)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            key = %cart.key,
            total = cart.total,
            discounted_total = cart.discounted_total,
            "Cart ready"
        );
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Orders: load, move the first one along, show its details
    let span = tracing::info_span!("orders");
    async {
        let page = system.order_store.load().await.map_err(|e| e.to_string())?;
        info!(count = page.orders.len(), total = page.total, "Orders loaded");

        let Some(first) = page.orders.first() else {
            warn!("No orders to update");
            return Ok(());
        };
        system
            .order_store
            .update_status(first.key, OrderStatus::Processing)
            .await
            .map_err(|e| e.to_string())?;

        match system.order_store.details(first.key).await {
            Ok(details) => info!(
                key = %details.order.key,
                status = %details.order.status,
                user = %details.user.full_name(),
                "Order details"
            ),
            Err(e) => error!(error = %e, "Order details failed"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
