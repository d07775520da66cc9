//! HTTP implementation of the [`Gateway`] trait.

use crate::config::ApiConfig;
use crate::gateway::wire::{
    CreateCartBody, LineRequest, ReplaceCartBody, StatusBody, WireCart, WireCartList, WireProduct,
    WireProductList,
};
use crate::gateway::{Gateway, GatewayError};
use crate::model::{Cart, IdPolicy, Order, OrderStatus, OrdersPage, Product, ProductDraft, ProductPatch, User};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// JSON client for the demo REST API. No authentication header is sent.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    policy: IdPolicy,
}

impl HttpGateway {
    /// Build a gateway from configuration.
    pub fn new(config: &ApiConfig, policy: IdPolicy) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!(%method, %url, "Request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    /// Handle the HTTP response.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Remote rejected request");
            return Err(GatewayError::status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        let list: WireProductList = self.get("products").await?;
        Ok(list
            .products
            .into_iter()
            .map(|p| p.into_product(&self.policy))
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: u64) -> Result<Product, GatewayError> {
        let wire: WireProduct = self.get(&format!("products/{}", id)).await?;
        Ok(wire.into_product(&self.policy))
    }

    #[instrument(skip(self))]
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, GatewayError> {
        let wire: WireProduct = self.send(Method::POST, "products/add", Some(draft)).await?;
        Ok(wire.into_product(&self.policy))
    }

    #[instrument(skip(self))]
    async fn replace_product(&self, id: u64, patch: &ProductPatch) -> Result<Product, GatewayError> {
        let wire: WireProduct = self
            .send(Method::PUT, &format!("products/{}", id), Some(patch))
            .await?;
        Ok(wire.into_product(&self.policy))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: u64) -> Result<Product, GatewayError> {
        let wire: WireProduct = self
            .send::<_, ()>(Method::DELETE, &format!("products/{}", id), None)
            .await?;
        Ok(wire.into_product(&self.policy))
    }

    #[instrument(skip(self))]
    async fn list_carts(&self) -> Result<Vec<Cart>, GatewayError> {
        let list: WireCartList = self.get("carts").await?;
        Ok(list
            .carts
            .into_iter()
            .map(|c| c.into_cart(&self.policy))
            .collect())
    }

    #[instrument(skip(self))]
    async fn create_cart(&self, user_id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError> {
        let body = CreateCartBody {
            user_id,
            products: lines,
        };
        let wire: WireCart = self.send(Method::POST, "carts/add", Some(&body)).await?;
        Ok(wire.into_cart(&self.policy))
    }

    #[instrument(skip(self))]
    async fn replace_cart(&self, id: u64, lines: &[LineRequest]) -> Result<Cart, GatewayError> {
        let body = ReplaceCartBody {
            merge: true,
            products: lines,
        };
        let wire: WireCart = self
            .send(Method::PUT, &format!("carts/{}", id), Some(&body))
            .await?;
        Ok(wire.into_cart(&self.policy))
    }

    #[instrument(skip(self))]
    async fn delete_cart(&self, id: u64) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .send::<_, ()>(Method::DELETE, &format!("carts/{}", id), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<OrdersPage, GatewayError> {
        let list: WireCartList = self.get("carts").await?;
        Ok(list.into_orders_page(&self.policy))
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: u64) -> Result<Order, GatewayError> {
        let wire: WireCart = self.get(&format!("carts/{}", id)).await?;
        Ok(wire.into_order(&self.policy))
    }

    #[instrument(skip(self))]
    async fn patch_order_status(&self, id: u64, status: &OrderStatus) -> Result<Order, GatewayError> {
        let body = StatusBody {
            status: status.as_str(),
        };
        let wire: WireCart = self
            .send(Method::PATCH, &format!("carts/{}", id), Some(&body))
            .await?;
        Ok(wire.into_order(&self.policy))
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: u64) -> Result<User, GatewayError> {
        self.get(&format!("users/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: "https://dummyjson.com/".into(),
            timeout_secs: None,
        };
        let gateway = HttpGateway::new(&config, IdPolicy::default()).unwrap();
        assert_eq!(gateway.base_url(), "https://dummyjson.com");
        assert_eq!(gateway.url("products/3"), "https://dummyjson.com/products/3");
        assert_eq!(gateway.url("/carts/add"), "https://dummyjson.com/carts/add");
    }
}
