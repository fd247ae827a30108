//! Data models for Grocer

mod item;
mod product;
mod store;

pub use item::BuyListItem;
pub use product::Product;
pub use store::{Store, StoreStyle, UnknownStore};
