/// Represents a catalog item.
///
/// # Store Framework
/// This struct implements the [`StoreEntity`](crate::framework::StoreEntity) trait,
/// allowing it to be held by a [`StoreActor`](crate::framework::StoreActor).
///
/// See [`impl StoreEntity for Product`](#impl-StoreEntity-for-Product) for details on:
/// - Creation parameters ([`ProductDraft`])
/// - Update parameters ([`ProductPatch`])
use crate::framework::StoreEntity;
use crate::model::EntityKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub key: EntityKey,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub discount_percentage: Option<f64>,
}

impl Product {
    /// Creates a new Product with no description, media or discount.
    pub fn new(key: EntityKey, title: impl Into<String>, price: f64) -> Self {
        Self {
            key,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            thumbnail: None,
            images: Vec::new(),
            discount_percentage: None,
        }
    }

    /// Per-unit price after the catalog discount, if the product has one.
    pub fn discounted_price(&self) -> Option<f64> {
        self.discount_percentage
            .map(|pct| self.price * (1.0 - pct / 100.0))
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Partial update for a product.
///
/// There is deliberately no id field: the identifier travels in the URL only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl StoreEntity for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    fn key(&self) -> EntityKey {
        self.key
    }

    fn set_key(&mut self, key: EntityKey) {
        self.key = key;
    }

    fn from_draft(key: EntityKey, draft: ProductDraft) -> Self {
        Self {
            key,
            title: draft.title,
            price: draft.price,
            description: draft.description,
            category: draft.category,
            thumbnail: draft.thumbnail,
            images: draft.images,
            discount_percentage: None,
        }
    }

    /// Every field present in the patch overwrites; absent fields are kept.
    fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
    }
}
