//! Buy-list item model

use serde::{Deserialize, Serialize};

use super::{Product, StoreStyle};

/// A line on the buy list.
///
/// Display and price fields are copied from the offer when the item is
/// created, so later searches never change what is already on the list.
/// `store` is a plain string: links shared by other users may carry store
/// names this build does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyListItem {
    /// Unique within the list
    pub id: String,
    /// Offer this item was created from; informational only
    pub product_id: String,
    pub name: String,
    pub store: String,
    pub price: f64,
    pub quantity: String,
    pub discount_amount: f64,
    /// Already collected; excluded from the running total
    #[serde(default)]
    pub is_taken: bool,
}

impl BuyListItem {
    /// Snapshot `product` into a new, not-yet-taken item with the given id.
    #[must_use]
    pub fn from_product(id: String, product: &Product) -> Self {
        Self {
            id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            store: product.store.to_string(),
            price: product.price,
            quantity: product.quantity.clone(),
            discount_amount: product.discount_amount,
            is_taken: false,
        }
    }

    /// What this item adds to the running total.
    #[must_use]
    pub fn payable(&self) -> f64 {
        if self.is_taken {
            0.0
        } else {
            self.price
        }
    }

    #[must_use]
    pub fn style(&self) -> StoreStyle {
        StoreStyle::for_store_name(&self.store)
    }
}
