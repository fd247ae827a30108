use std::io::{self, IsTerminal};

use grocer_core::models::StoreStyle;
use grocer_core::util::{format_aud, normalize_text_option};
use grocer_core::{BuyListItem, ListSession, MemoryLocation, Product};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

const NAME_WIDTH: usize = 32;
const STORE_WIDTH: usize = 10;

/// JSON shape of `grocer show --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<'a> {
    pub items: &'a [BuyListItem],
    pub total: f64,
    pub savings: f64,
    pub taken: usize,
    pub share_link: Option<String>,
}

/// The URL to work on: `--url`/`GROCER_URL`, or a fresh list at the
/// configured origin.
pub fn resolve_location(url: Option<&str>, config: &CliConfig) -> Result<MemoryLocation, CliError> {
    let url = normalize_text_option(url.map(str::to_string))
        .unwrap_or_else(|| format!("{}/", config.origin()));
    Ok(MemoryLocation::parse(&url)?)
}

pub fn open_session(
    url: Option<&str>,
    config: &CliConfig,
) -> Result<ListSession<MemoryLocation>, CliError> {
    Ok(ListSession::open(resolve_location(url, config)?))
}

/// Print the pending toast on stderr and the rewritten URL on stdout.
pub fn print_session_url(session: &ListSession<MemoryLocation>) {
    if let Some(message) = session.toast_message() {
        eprintln!("{message}");
    }
    println!("{}", session.host().href());
}

pub fn use_color() -> bool {
    io::stdout().is_terminal()
}

pub fn format_item_lines(items: &[BuyListItem], color: bool) -> Vec<String> {
    let id_width = items
        .iter()
        .map(|item| item.id.chars().count())
        .max()
        .unwrap_or(0);

    items
        .iter()
        .map(|item| {
            let name = truncate(&item.name, NAME_WIDTH);
            let store = styled_store(&item.store, item.style(), color);
            let price = format_aud(item.price);
            let mut line = format!(
                "{:<id_width$}  {name:<NAME_WIDTH$}  {store}  {:<8}  {price:>8}",
                item.id, item.quantity
            );
            if item.is_taken {
                line.push_str("  TAKEN");
            } else if item.discount_amount > 0.0 {
                line.push_str(&format!("  (Save {})", format_aud(item.discount_amount)));
            }
            line
        })
        .collect()
}

pub fn format_offer_lines(offers: &[Product], color: bool) -> Vec<String> {
    offers
        .iter()
        .enumerate()
        .map(|(index, offer)| {
            let name = truncate(&offer.name, NAME_WIDTH);
            let store = styled_store(
                offer.store.as_str(),
                StoreStyle::for_store(offer.store),
                color,
            );
            let price = format_aud(offer.price);
            let mut line = format!(
                "{:>2}. {store}  {name:<NAME_WIDTH$}  {:<8}  {price:>8}",
                index + 1,
                offer.quantity
            );
            if offer.is_discounted() {
                line.push_str(&format!(
                    "  was {}  SAVE {}",
                    format_aud(offer.original_price()),
                    format_aud(offer.discount_amount)
                ));
            }
            line
        })
        .collect()
}

pub fn format_total_line(total: f64) -> String {
    format!("Total (un-taken): {}", format_aud(total))
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

fn styled_store(name: &str, style: StoreStyle, color: bool) -> String {
    let padded = format!("{name:<STORE_WIDTH$}");
    if color {
        style.paint(&padded)
    } else {
        padded
    }
}
