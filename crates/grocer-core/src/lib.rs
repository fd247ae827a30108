//! grocer-core - Core library for Grocer
//!
//! This crate contains the buy-list state engine, the URL fragment codec used
//! to persist and share a list, and the price source that produces offers.
//! Front-ends (CLI today) drive it through [`ListSession`].

pub mod buy_list;
pub mod codec;
pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod price_source;
pub mod session;
pub mod share;
pub mod toast;
pub mod util;

pub use buy_list::BuyListStore;
pub use error::{Error, Result};
pub use location::{FragmentHost, MemoryLocation};
pub use models::{BuyListItem, Product, Store};
pub use session::{ListSession, SessionPhase};
