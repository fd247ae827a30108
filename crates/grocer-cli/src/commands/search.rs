use grocer_core::config::GeminiConfig;
use grocer_core::price_source::{search, GeminiPriceSource, PriceSource, SearchResults};
use grocer_core::Product;

use crate::commands::common::{format_offer_lines, use_color};
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_search(query: &str, as_json: bool, config: &CliConfig) -> Result<(), CliError> {
    let source = price_source(config)?;
    let offers = search_offers(&source, query).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&offers)?);
        return Ok(());
    }

    if offers.is_empty() {
        eprintln!("{}", CliError::NoOffers);
        return Ok(());
    }

    println!("Results for '{}'", query.trim());
    for line in format_offer_lines(&offers, use_color()) {
        println!("{line}");
    }
    Ok(())
}

/// Gemini price source configured from the environment; a model saved in
/// the CLI config takes precedence over `GEMINI_MODEL`.
pub fn price_source(config: &CliConfig) -> Result<GeminiPriceSource, CliError> {
    let gemini = GeminiConfig::from_env()?.with_model_override(config.model.clone());
    let source = GeminiPriceSource::new(gemini)?;
    tracing::debug!("Searching with model {}", source.model());
    Ok(source)
}

/// Search and surface a failed search as a CLI error carrying the
/// user-facing message.
pub async fn search_offers<P: PriceSource>(source: &P, query: &str) -> Result<Vec<Product>, CliError> {
    match search(source, query).await {
        SearchResults::Offers(offers) => Ok(offers),
        SearchResults::Failed(message) => Err(CliError::Search(message)),
    }
}
