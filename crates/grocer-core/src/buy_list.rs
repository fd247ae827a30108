//! The buy list: the single source of truth for chosen items during a session.

use std::collections::HashSet;

use crate::models::{BuyListItem, Product};
use crate::util::unix_timestamp_millis_now;

/// Ordered, in-memory buy list.
///
/// Every operation is total: removing or toggling an id that is not on the
/// list is a no-op, and adding always succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyListStore {
    items: Vec<BuyListItem>,
    last_stamp: i64,
}

impl BuyListStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with already validated items.
    ///
    /// Items whose id repeats an earlier one are dropped so ids stay unique.
    #[must_use]
    pub fn from_items(items: Vec<BuyListItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    tracing::debug!("Dropping buy list item with duplicate id {}", item.id);
                }
                fresh
            })
            .collect();

        Self {
            items,
            last_stamp: 0,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[BuyListItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BuyListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Append a snapshot of `product`, stamped with the current time.
    pub fn add(&mut self, product: &Product) -> &BuyListItem {
        self.add_at(product, unix_timestamp_millis_now())
    }

    /// Append a snapshot of `product` using `now_ms` for the item id.
    ///
    /// The stamp never repeats within this store and skips over ids already
    /// present (e.g. from a hydrated link), so the same offer can be added
    /// any number of times.
    pub fn add_at(&mut self, product: &Product, now_ms: i64) -> &BuyListItem {
        let mut stamp = now_ms.max(self.last_stamp.saturating_add(1));
        let mut id = format!("{}-{stamp}", product.id);
        while self.get(&id).is_some() {
            stamp += 1;
            id = format!("{}-{stamp}", product.id);
        }
        self.last_stamp = stamp;

        let index = self.items.len();
        self.items.push(BuyListItem::from_product(id, product));
        &self.items[index]
    }

    /// Remove the item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Flip the taken flag of the item with `id`. Returns whether it existed.
    pub fn toggle_taken(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.is_taken = !item.is_taken;
                true
            }
            None => false,
        }
    }

    /// Sum of prices of items not yet taken.
    ///
    /// Prices are already discounted, so the discount amount never enters the
    /// total.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(BuyListItem::payable).sum()
    }

    /// Sum of discounts on items not yet taken.
    #[must_use]
    pub fn savings(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| !item.is_taken)
            .map(|item| item.discount_amount)
            .sum()
    }

    #[must_use]
    pub fn taken_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_taken).count()
    }

    /// Notification shown after an item was added.
    #[must_use]
    pub fn added_notice(name: &str) -> String {
        format!("'{name}' added to list")
    }
}
