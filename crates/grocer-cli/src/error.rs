use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] grocer_core::Error),
    #[error(transparent)]
    PriceSource(#[from] grocer_core::price_source::PriceSourceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Search(String),
    #[error("No products found. Try another search!")]
    NoOffers,
    #[error("Offer {pick} does not exist; the search returned {available} offers")]
    PickOutOfRange { pick: usize, available: usize },
    #[error(transparent)]
    UnknownStore(#[from] grocer_core::models::UnknownStore),
    #[error("{field} must be a non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Your list is empty; there is nothing to share")]
    NothingToShare,
    #[error("Configuration error: {0}")]
    Config(String),
}
