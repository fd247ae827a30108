//! Price sources: anything that turns a search query into store offers.
//!
//! Offers leaving a price source are already sanitized (see [`sanitize`]), so
//! the buy list never sees unknown stores or negative prices from a search.

mod gemini;
pub mod sanitize;

use std::future::Future;

use thiserror::Error;

use crate::models::Product;

pub use gemini::GeminiPriceSource;
pub use sanitize::sanitize_offers;

/// Message shown in place of search results when a search fails
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch product prices. Please check your API key and try again.";

/// Errors from price source setup and requests
#[derive(Debug, Error)]
pub enum PriceSourceError {
    #[error("Price source is not configured. Set GEMINI_API_KEY.")]
    NotConfigured,
    #[error("Invalid price source configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Search query cannot be empty")]
    EmptyQuery,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Price source API error: {0}")]
    Api(String),
}

/// Produces offers for a free-text product query
pub trait PriceSource {
    fn fetch_offers(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, PriceSourceError>> + Send;
}

/// What the search results area shows after a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Offers(Vec<Product>),
    /// Human-readable failure shown instead of results
    Failed(String),
}

impl SearchResults {
    #[must_use]
    pub fn offers(&self) -> &[Product] {
        match self {
            Self::Offers(offers) => offers,
            Self::Failed(_) => &[],
        }
    }
}

/// Trim a raw query; blank queries are not searched.
pub fn normalize_query(query: &str) -> Result<String, PriceSourceError> {
    let query = query.trim();
    if query.is_empty() {
        Err(PriceSourceError::EmptyQuery)
    } else {
        Ok(query.to_string())
    }
}

/// Run a search, turning any failure into the user-facing message.
///
/// The detailed error is logged; the buy list is never touched.
pub async fn search<P: PriceSource>(source: &P, query: &str) -> SearchResults {
    let query = match normalize_query(query) {
        Ok(query) => query,
        Err(error) => return SearchResults::Failed(error.to_string()),
    };

    match source.fetch_offers(&query).await {
        Ok(offers) => {
            tracing::info!("Price source returned {} offers for '{}'", offers.len(), query);
            SearchResults::Offers(offers)
        }
        Err(error) => {
            tracing::error!("Error fetching product prices: {}", error);
            SearchResults::Failed(FETCH_FAILED_MESSAGE.to_string())
        }
    }
}
