use grocer_core::price_source::PriceSource;
use grocer_core::{FragmentHost, ListSession, Product, Store};

use crate::commands::common::{open_session, print_session_url};
use crate::commands::search::{price_source, search_offers};
use crate::config::CliConfig;
use crate::error::CliError;

/// Offer typed on the command line by `grocer add-offer`
#[derive(Debug, Clone)]
pub struct ManualOffer {
    pub id: String,
    pub name: String,
    pub store: String,
    pub price: f64,
    pub quantity: String,
    pub discount: f64,
}

impl ManualOffer {
    /// Validate into a product. The store must be one of the known chains.
    pub fn into_product(self) -> Result<Product, CliError> {
        let id = required_text(&self.id, "Offer ID")?;
        let name = required_text(&self.name, "Product name")?;
        let store = self.store.parse::<Store>()?;
        let price = non_negative_amount("Price", self.price)?;
        let discount_amount = non_negative_amount("Discount", self.discount)?;

        Ok(Product {
            id,
            name,
            store,
            price,
            quantity: self.quantity.trim().to_string(),
            discount_amount,
        })
    }
}

pub async fn run_add(
    query: &str,
    pick: usize,
    url: Option<&str>,
    config: &CliConfig,
) -> Result<(), CliError> {
    let source = price_source(config)?;
    let mut session = open_session(url, config)?;
    let id = add_picked_offer(&source, query, pick, &mut session).await?;
    tracing::debug!("Added item {}", id);
    print_session_url(&session);
    Ok(())
}

pub fn run_add_offer(
    offer: ManualOffer,
    url: Option<&str>,
    config: &CliConfig,
) -> Result<(), CliError> {
    let product = offer.into_product()?;
    let mut session = open_session(url, config)?;
    session.add(&product);
    print_session_url(&session);
    Ok(())
}

/// Search `query` and add offer number `pick` (1-based) to the session.
pub async fn add_picked_offer<P, H>(
    source: &P,
    query: &str,
    pick: usize,
    session: &mut ListSession<H>,
) -> Result<String, CliError>
where
    P: PriceSource,
    H: FragmentHost,
{
    let offers = search_offers(source, query).await?;
    if offers.is_empty() {
        return Err(CliError::NoOffers);
    }

    let offer = pick
        .checked_sub(1)
        .and_then(|index| offers.get(index))
        .ok_or(CliError::PickOutOfRange {
            pick,
            available: offers.len(),
        })?;
    Ok(session.add(offer))
}

fn required_text(value: &str, field: &'static str) -> Result<String, CliError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CliError::EmptyField(field))
    } else {
        Ok(value.to_string())
    }
}

fn non_negative_amount(field: &'static str, value: f64) -> Result<f64, CliError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CliError::InvalidAmount { field, value })
    }
}
