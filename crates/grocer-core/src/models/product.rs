//! Product offer model

use serde::{Deserialize, Serialize};

use super::Store;

/// One store's priced offer for a product, as returned by a price source.
///
/// Offers are ephemeral: they live only as long as the search results that
/// produced them. Adding one to the buy list takes a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier, unique within one search response
    pub id: String,
    pub name: String,
    pub store: Store,
    /// Current (already discounted) price in AUD
    pub price: f64,
    /// Unit label, e.g. "1L" or "Each"
    pub quantity: String,
    /// Discount in AUD, 0 when not on sale
    pub discount_amount: f64,
}

impl Product {
    /// Price before the discount was applied.
    #[must_use]
    pub fn original_price(&self) -> f64 {
        self.price + self.discount_amount
    }

    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_amount > 0.0
    }
}
