/// Represents a shopping cart and its line items.
///
/// # Store Framework
/// This struct implements the [`StoreEntity`](crate::framework::StoreEntity) trait.
/// Its [`on_change`](crate::framework::StoreEntity::on_change) hook recomputes the derived
/// totals, so a cart read from the store never carries stale totals.
use crate::framework::StoreEntity;
use crate::model::EntityKey;
use crate::totals::summarize;
use serde::{Deserialize, Serialize};

/// A product-quantity pair inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Id of the product this line refers to.
    pub id: u64,
    pub title: String,
    /// Unit price.
    pub price: f64,
    pub quantity: u32,
    /// Per-unit discounted price. Never a pre-multiplied total.
    pub discounted_price: Option<f64>,
    pub thumbnail: Option<String>,
}

impl LineItem {
    pub fn new(id: u64, title: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            quantity,
            discounted_price: None,
            thumbnail: None,
        }
    }

    pub fn with_discounted_price(mut self, price: f64) -> Self {
        self.discounted_price = Some(price);
        self
    }

    /// Discounted unit price, or the full unit price when no discount is known.
    pub fn effective_unit_price(&self) -> f64 {
        self.discounted_price.unwrap_or(self.price)
    }

    fn merge(&mut self, patch: LinePatch) {
        self.quantity = patch.quantity;
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(discounted) = patch.discounted_price {
            self.discounted_price = Some(discounted);
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
    }
}

/// The intended state of one line after an edit.
///
/// Only `id` and `quantity` are required; detail fields are merged over the
/// existing line and default to empty for a line the cart did not have yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePatch {
    pub id: u64,
    pub quantity: u32,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub thumbnail: Option<String>,
}

impl LinePatch {
    pub fn quantity(id: u64, quantity: u32) -> Self {
        Self {
            id,
            quantity,
            title: None,
            price: None,
            discounted_price: None,
            thumbnail: None,
        }
    }
}

impl From<LineItem> for LinePatch {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            quantity: item.quantity,
            title: Some(item.title),
            price: Some(item.price),
            discounted_price: item.discounted_price,
            thumbnail: item.thumbnail,
        }
    }
}

/// Replaces a line list with the intended one.
///
/// Lines absent from `patches` are dropped, as are lines whose intended
/// quantity is zero.
pub(crate) fn merge_lines(current: &[LineItem], patches: Vec<LinePatch>) -> Vec<LineItem> {
    patches
        .into_iter()
        .filter(|patch| patch.quantity > 0)
        .map(|patch| {
            let mut line = current
                .iter()
                .find(|line| line.id == patch.id)
                .cloned()
                .unwrap_or_else(|| LineItem::new(patch.id, "", 0.0, patch.quantity));
            line.merge(patch);
            line
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub key: EntityKey,
    pub user_id: u64,
    pub products: Vec<LineItem>,
    pub total: f64,
    pub discounted_total: f64,
    pub total_products: usize,
    pub total_quantity: u32,
}

impl Cart {
    /// Creates a cart with its derived fields already computed.
    pub fn new(key: EntityKey, user_id: u64, products: Vec<LineItem>) -> Self {
        let mut cart = Self {
            key,
            user_id,
            products,
            total: 0.0,
            discounted_total: 0.0,
            total_products: 0,
            total_quantity: 0,
        };
        cart.on_change();
        cart
    }

    pub fn line(&self, product_id: u64) -> Option<&LineItem> {
        self.products.iter().find(|line| line.id == product_id)
    }
}

/// Payload for creating a cart locally.
///
/// Carts are always created through the remote, so no store synthesizes one;
/// the type exists for [`StoreEntity::Draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct CartDraft {
    pub user_id: u64,
    pub products: Vec<LineItem>,
}

/// A change to a cart's lines.
///
/// The actor applies it against the lines it holds at that moment, so two
/// line edits racing on the same cart both land.
#[derive(Debug, Clone, PartialEq)]
pub enum CartPatch {
    /// The intended line list. See [`merge_lines`].
    Lines(Vec<LinePatch>),
    /// Adds `quantity` units to a line, saturating at `u32::MAX`. The patch
    /// details seed the line when the cart does not hold it.
    AddQuantity(LinePatch),
    /// Sets one line's quantity. Zero removes the line; a missing line is left alone.
    SetQuantity { id: u64, quantity: u32 },
}

impl StoreEntity for Cart {
    type Draft = CartDraft;
    type Patch = CartPatch;

    fn key(&self) -> EntityKey {
        self.key
    }

    fn set_key(&mut self, key: EntityKey) {
        self.key = key;
    }

    fn from_draft(key: EntityKey, draft: CartDraft) -> Self {
        Self::new(key, draft.user_id, draft.products)
    }

    fn apply_patch(&mut self, patch: CartPatch) {
        match patch {
            CartPatch::Lines(lines) => {
                self.products = merge_lines(&self.products, lines);
            }
            CartPatch::AddQuantity(patch) => {
                match self.products.iter_mut().find(|line| line.id == patch.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(patch.quantity),
                    None if patch.quantity > 0 => {
                        let mut line = LineItem::new(patch.id, "", 0.0, 0);
                        line.merge(patch);
                        self.products.push(line);
                    }
                    None => {}
                }
            }
            CartPatch::SetQuantity { id, quantity: 0 } => {
                self.products.retain(|line| line.id != id);
            }
            CartPatch::SetQuantity { id, quantity } => {
                if let Some(line) = self.products.iter_mut().find(|line| line.id == id) {
                    line.quantity = quantity;
                }
            }
        }
    }

    fn on_change(&mut self) {
        let summary = summarize(&self.products);
        self.total = summary.totals.total;
        self.discounted_total = summary.totals.discounted_total;
        self.total_products = summary.total_products;
        self.total_quantity = summary.total_quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        Cart::new(
            EntityKey::Remote(5),
            7,
            vec![
                LineItem::new(1, "Soap", 10.0, 2).with_discounted_price(9.0),
                LineItem::new(2, "Towel", 4.0, 1),
            ],
        )
    }

    #[test]
    fn test_new_cart_has_totals() {
        let cart = sample_cart();
        assert_eq!(cart.total, 24.0);
        assert_eq!(cart.discounted_total, 22.0);
        assert_eq!(cart.total_products, 2);
        assert_eq!(cart.total_quantity, 3);
    }

    #[test]
    fn test_quantity_patch_carries_line_details() {
        let mut cart = sample_cart();
        cart.apply_patch(CartPatch::Lines(vec![
            LinePatch::quantity(1, 5),
            LinePatch::quantity(2, 1),
        ]));
        cart.on_change();

        let soap = cart.line(1).unwrap();
        assert_eq!(soap.quantity, 5);
        assert_eq!(soap.title, "Soap");
        assert_eq!(soap.discounted_price, Some(9.0));
        assert_eq!(cart.total, 54.0);
        assert_eq!(cart.discounted_total, 49.0);
    }

    #[test]
    fn test_zero_quantity_and_omitted_lines_are_removed() {
        let mut cart = sample_cart();
        cart.apply_patch(CartPatch::Lines(vec![LinePatch::quantity(1, 0)]));
        cart.on_change();

        assert!(cart.products.is_empty());
        assert_eq!(cart.total, 0.0);
        assert_eq!(cart.total_quantity, 0);
    }

    #[test]
    fn test_new_line_takes_patch_details() {
        let mut cart = sample_cart();
        let mut lines: Vec<LinePatch> = cart
            .products
            .iter()
            .map(|line| LinePatch::quantity(line.id, line.quantity))
            .collect();
        lines.push(LineItem::new(9, "Candle", 6.0, 2).with_discounted_price(5.0).into());

        cart.apply_patch(CartPatch::Lines(lines));
        cart.on_change();

        assert_eq!(cart.products.len(), 3);
        assert_eq!(cart.products[2].title, "Candle");
        assert_eq!(cart.total, 36.0);
        assert_eq!(cart.discounted_total, 32.0);
    }

    #[test]
    fn test_add_quantity_increments_or_appends() {
        let mut cart = sample_cart();
        cart.apply_patch(CartPatch::AddQuantity(LinePatch::quantity(1, 3)));
        cart.apply_patch(CartPatch::AddQuantity(
            LineItem::new(9, "Candle", 6.0, 1).into(),
        ));
        cart.apply_patch(CartPatch::AddQuantity(
            LineItem::new(9, "Ignored", 99.0, 1).into(),
        ));
        cart.on_change();

        assert_eq!(cart.line(1).unwrap().quantity, 5);
        let candle = cart.line(9).unwrap();
        assert_eq!(candle.quantity, 2);
        assert_eq!(candle.title, "Candle");
        assert_eq!(candle.price, 6.0);
        assert_eq!(cart.total_quantity, 8);
    }

    #[test]
    fn test_add_quantity_saturates() {
        let mut cart = sample_cart();
        cart.apply_patch(CartPatch::AddQuantity(LinePatch::quantity(1, u32::MAX)));
        cart.on_change();

        assert_eq!(cart.line(1).unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_touches_one_line() {
        let mut cart = sample_cart();
        cart.apply_patch(CartPatch::SetQuantity { id: 2, quantity: 4 });
        cart.apply_patch(CartPatch::SetQuantity { id: 7, quantity: 4 });
        cart.on_change();
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.line(2).unwrap().quantity, 4);
        assert_eq!(cart.products.len(), 2);

        cart.apply_patch(CartPatch::SetQuantity { id: 1, quantity: 0 });
        cart.on_change();
        assert!(cart.line(1).is_none());
        assert_eq!(cart.total, 16.0);
    }
}
