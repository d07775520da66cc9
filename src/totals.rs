//! # Cart Totals
//!
//! Derived monetary totals for a collection of line items.
//!
//! The `total` and `discounted_total` fields on [`Cart`](crate::model::Cart) and
//! [`Order`](crate::model::Order) are never trusted from the wire. The store recomputes
//! them with [`recalc`] every time a line item changes, from the entity's
//! [`on_change`](crate::framework::StoreEntity::on_change) hook.
//!
//! ```rust
//! use dashboard_store::model::LineItem;
//! use dashboard_store::totals::recalc;
//!
//! let items = vec![LineItem::new(1, "Soap", 10.0, 2).with_discounted_price(9.0)];
//! let totals = recalc(&items);
//! assert_eq!(totals.total, 20.0);
//! assert_eq!(totals.discounted_total, 18.0);
//! ```

use crate::model::LineItem;
use serde::{Deserialize, Serialize};

/// Aggregate totals for a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total: f64,
    pub discounted_total: f64,
}

/// Sums `price × quantity` and `effective discounted price × quantity`.
///
/// A line without a discounted price contributes its full unit price.
pub fn recalc(items: &[LineItem]) -> CartTotals {
    items.iter().fold(CartTotals::default(), |acc, item| {
        let quantity = f64::from(item.quantity);
        CartTotals {
            total: acc.total + item.price * quantity,
            discounted_total: acc.discounted_total + item.effective_unit_price() * quantity,
        }
    })
}

/// Every field a cart or order derives from its lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineSummary {
    pub totals: CartTotals,
    pub total_products: usize,
    /// Sum of line quantities, saturating at `u32::MAX`.
    pub total_quantity: u32,
}

/// [`recalc`] plus the line and unit counts.
pub fn summarize(items: &[LineItem]) -> LineSummary {
    LineSummary {
        totals: recalc(items),
        total_products: items.len(),
        total_quantity: items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity)),
    }
}
