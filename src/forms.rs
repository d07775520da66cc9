//! Input validation at the form boundary.
//!
//! Forms hold raw operator input as text. Converting one yields a typed draft,
//! patch or line request, or the first [`ValidationError`] found. The stores
//! never validate; anything that reaches them is taken as is.

use crate::gateway::LineRequest;
use crate::model::{Product, ProductDraft, ProductPatch};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(value)
}

fn number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    required(field, value)?
        .parse()
        .map_err(|_| ValidationError::InvalidValue {
            field,
            reason: format!("must be a number, got {:?}", value.trim()),
        })
}

fn positive_id(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    let id: u64 = number(field, value)?;
    if id == 0 {
        return Err(ValidationError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(id)
}

/// Add/edit form for a catalog product. Every field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub thumbnail: String,
}

impl ProductForm {
    /// Prefills the form for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone().unwrap_or_default(),
        }
    }

    pub fn to_draft(&self) -> Result<ProductDraft, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let price: f64 = number("price", &self.price)?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "price",
                reason: "must be at least 0".to_string(),
            });
        }
        let category = required("category", &self.category)?;
        let thumbnail = required("thumbnail", &self.thumbnail)?;

        Ok(ProductDraft {
            title: title.to_string(),
            price,
            description: description.to_string(),
            category: category.to_string(),
            thumbnail: Some(thumbnail.to_string()),
            images: Vec::new(),
        })
    }

    /// The edit-mode payload: every form field, no images, no id.
    pub fn to_patch(&self) -> Result<ProductPatch, ValidationError> {
        let draft = self.to_draft()?;
        Ok(ProductPatch {
            title: Some(draft.title),
            price: Some(draft.price),
            description: Some(draft.description),
            category: Some(draft.category),
            thumbnail: draft.thumbnail,
            images: None,
        })
    }
}

/// Product id and quantity typed into a cart card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItemForm {
    pub product_id: String,
    pub quantity: String,
}

impl CartItemForm {
    pub fn to_line(&self) -> Result<LineRequest, ValidationError> {
        let id = positive_id("product id", &self.product_id)?;
        let quantity: u32 = number("quantity", &self.quantity)?;
        if quantity == 0 {
            return Err(ValidationError::InvalidValue {
                field: "quantity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(LineRequest { id, quantity })
    }
}

/// The new-cart form: a user and the first line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCartForm {
    pub user_id: String,
    pub item: CartItemForm,
}

impl NewCartForm {
    /// Returns the user id and the first line.
    pub fn to_request(&self) -> Result<(u64, LineRequest), ValidationError> {
        let user_id = positive_id("user id", &self.user_id)?;
        Ok((user_id, self.item.to_line()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKey;

    fn filled() -> ProductForm {
        ProductForm {
            title: " Office Chair ".into(),
            description: "Ergonomic".into(),
            price: "49.5".into(),
            category: "furniture".into(),
            thumbnail: "https://cdn.example/chair.png".into(),
        }
    }

    #[test]
    fn test_product_form_builds_trimmed_draft() {
        let draft = filled().to_draft().unwrap();
        assert_eq!(draft.title, "Office Chair");
        assert_eq!(draft.price, 49.5);
        assert_eq!(draft.thumbnail.as_deref(), Some("https://cdn.example/chair.png"));
    }

    #[test]
    fn test_product_form_rejects_missing_and_negative() {
        let mut form = filled();
        form.category = "  ".into();
        assert_eq!(
            form.to_draft().unwrap_err(),
            ValidationError::MissingField { field: "category" }
        );

        let mut form = filled();
        form.price = "-1".into();
        assert!(matches!(
            form.to_draft(),
            Err(ValidationError::InvalidValue { field: "price", .. })
        ));

        let mut form = filled();
        form.price = "cheap".into();
        assert!(matches!(
            form.to_draft(),
            Err(ValidationError::InvalidValue { field: "price", .. })
        ));
    }

    #[test]
    fn test_edit_form_round_trips_product() {
        let mut product = Product::new(EntityKey::Remote(3), "Powder", 8.0);
        product.description = "Matte".into();
        product.category = "beauty".into();
        product.thumbnail = Some("powder.png".into());

        let patch = ProductForm::from_product(&product).to_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("Powder"));
        assert_eq!(patch.price, Some(8.0));
        assert_eq!(patch.images, None);
    }

    #[test]
    fn test_cart_forms() {
        let form = NewCartForm {
            user_id: "5".into(),
            item: CartItemForm {
                product_id: "12".into(),
                quantity: "3".into(),
            },
        };
        assert_eq!(form.to_request().unwrap(), (5, LineRequest { id: 12, quantity: 3 }));

        let empty = CartItemForm::default();
        assert_eq!(
            empty.to_line().unwrap_err(),
            ValidationError::MissingField { field: "product id" }
        );

        let zero = CartItemForm {
            product_id: "12".into(),
            quantity: "0".into(),
        };
        assert!(zero.to_line().is_err());
    }
}
