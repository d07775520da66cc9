//! Entity identity.
//!
//! Every record held by the store carries an [`EntityKey`] that says where the
//! record's identity comes from. Only `Remote` keys are ever sent to the
//! gateway; `Local` records exist for the current session only.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Provenance-tagged identifier shared by products, carts and orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", content = "id", rename_all = "lowercase")]
pub enum EntityKey {
    /// Known to the remote API.
    Remote(u64),
    /// Synthesized in this session, never persisted remotely.
    Local(u64),
}

impl EntityKey {
    /// The numeric id, regardless of origin.
    pub fn raw(&self) -> u64 {
        match self {
            EntityKey::Remote(id) | EntityKey::Local(id) => *id,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, EntityKey::Local(_))
    }

    /// The id to use on the wire, or `None` for local-only records.
    pub fn remote_id(&self) -> Option<u64> {
        match self {
            EntityKey::Remote(id) => Some(*id),
            EntityKey::Local(_) => None,
        }
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKey::Remote(id) => write!(f, "remote_{}", id),
            EntityKey::Local(id) => write!(f, "local_{}", id),
        }
    }
}

/// Classifies raw ids coming off the wire.
///
/// The thresholds mirror the id ranges of the public demo dataset. They are
/// not part of any documented contract and must be revisited if the dataset
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdPolicy {
    /// Highest product id served by the default product listing.
    pub product_remote_max: u64,
    /// Cart ids at or above this value never existed remotely.
    pub cart_local_min: u64,
    /// Id echoed by the API for every newly created cart.
    pub cart_placeholder_id: u64,
}

impl Default for IdPolicy {
    fn default() -> Self {
        Self {
            product_remote_max: 30,
            cart_local_min: 100,
            cart_placeholder_id: 51,
        }
    }
}

impl IdPolicy {
    pub fn product_key(&self, id: u64) -> EntityKey {
        if id > self.product_remote_max {
            EntityKey::Local(id)
        } else {
            EntityKey::Remote(id)
        }
    }

    pub fn cart_key(&self, id: u64) -> EntityKey {
        if id >= self.cart_local_min {
            EntityKey::Local(id)
        } else {
            EntityKey::Remote(id)
        }
    }

    pub fn is_cart_placeholder(&self, id: u64) -> bool {
        id == self.cart_placeholder_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_threshold() {
        let policy = IdPolicy::default();
        assert_eq!(policy.product_key(30), EntityKey::Remote(30));
        assert_eq!(policy.product_key(31), EntityKey::Local(31));
    }

    #[test]
    fn test_cart_threshold() {
        let policy = IdPolicy::default();
        assert_eq!(policy.cart_key(99), EntityKey::Remote(99));
        assert_eq!(policy.cart_key(100), EntityKey::Local(100));
        assert!(policy.is_cart_placeholder(51));
    }

    #[test]
    fn test_remote_id_only_for_remote_keys() {
        assert_eq!(EntityKey::Remote(4).remote_id(), Some(4));
        assert_eq!(EntityKey::Local(4).remote_id(), None);
        assert_eq!(EntityKey::Local(4).raw(), 4);
        assert_eq!(EntityKey::Local(4).to_string(), "local_4");
    }
}
