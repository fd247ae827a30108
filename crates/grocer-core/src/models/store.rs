//! Supermarket chains and their display styling.
//!
//! Store names are validated in three places with different strictness:
//!
//! - [`Store::from_str`] is strict and only accepts the exact chain names.
//! - [`Store::coerce`] is used when sanitizing price-source offers and falls
//!   back to [`Store::Coles`] for anything unrecognised.
//! - Buy-list items keep the store as a free string so that shared links with
//!   unknown stores still load; [`StoreStyle::for_store_name`] then falls back
//!   to a neutral style at display time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supermarket chain an offer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    Coles,
    Woolworths,
    #[serde(rename = "ALDI")]
    Aldi,
    #[serde(rename = "IGA")]
    Iga,
}

/// Returned when a store name is not one of the known chains
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown store: {0}")]
pub struct UnknownStore(pub String);

impl Store {
    /// All known chains, in display order.
    pub const ALL: [Self; 4] = [Self::Coles, Self::Woolworths, Self::Aldi, Self::Iga];

    /// Canonical name as it appears in offers and shared links.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coles => "Coles",
            Self::Woolworths => "Woolworths",
            Self::Aldi => "ALDI",
            Self::Iga => "IGA",
        }
    }

    /// Map an untrusted store name onto a known chain, defaulting to Coles.
    #[must_use]
    pub fn coerce(name: &str) -> Self {
        name.parse().unwrap_or(Self::Coles)
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Store {
    type Err = UnknownStore;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|store| store.as_str() == s)
            .ok_or_else(|| UnknownStore(s.to_string()))
    }
}

/// Display styling for a store badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStyle {
    /// ANSI SGR foreground code for terminal output
    pub ansi_code: u8,
}

impl StoreStyle {
    /// Style used for store names that are not a known chain.
    pub const FALLBACK: Self = Self { ansi_code: 90 };

    #[must_use]
    pub const fn for_store(store: Store) -> Self {
        match store {
            Store::Coles => Self { ansi_code: 31 },
            Store::Woolworths => Self { ansi_code: 32 },
            Store::Aldi => Self { ansi_code: 34 },
            Store::Iga => Self { ansi_code: 33 },
        }
    }

    /// Look up the style for a free-form store name, never failing.
    #[must_use]
    pub fn for_store_name(name: &str) -> Self {
        name.parse::<Store>().map_or(Self::FALLBACK, Self::for_store)
    }

    /// Wrap `text` in this style's ANSI colour.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[{}m{text}\x1b[0m", self.ansi_code)
    }
}
