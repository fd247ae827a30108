//! URL fragment codec for the buy list.
//!
//! A list is carried in the location fragment as
//! `list=<percent-encoded JSON array of items>`. Fragments are untrusted: they
//! can be hand-edited or arrive from any shared link, so decoding never fails
//! the caller beyond telling it whether the fragment should be cleared.

mod percent;
mod validate;

use serde_json::Value;
use thiserror::Error;

use crate::models::BuyListItem;

pub use percent::decode_strict;
pub use validate::{check_candidate, validate_candidates, Candidate, Rejection};

/// Marker that prefixes an encoded list in the fragment
pub const LIST_MARKER: &str = "list=";

/// Errors raised while decoding or encoding a list fragment
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed percent-encoding: {0}")]
    PercentEncoding(String),
    #[error("Malformed list JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of decoding a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// No fragment, no list marker, or nothing after the marker
    Absent,
    /// The payload parsed but was not an array
    NotAList,
    /// Validated items, in order, plus how many elements were dropped
    List {
        items: Vec<BuyListItem>,
        rejected: usize,
    },
}


/// Decode a location fragment (with or without the leading `#`).
///
/// An `Err` means the payload after the marker could not be parsed at all;
/// the caller should start empty and clear the fragment.
pub fn decode_fragment(fragment: Option<&str>) -> Result<Decoded, CodecError> {
    let Some(fragment) = fragment else {
        return Ok(Decoded::Absent);
    };
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let Some(payload) = fragment.strip_prefix(LIST_MARKER) else {
        return Ok(Decoded::Absent);
    };
    if payload.is_empty() {
        return Ok(Decoded::Absent);
    }

    let json = decode_strict(payload)?;
    let value: Value = serde_json::from_str(&json)?;

    let Value::Array(values) = value else {
        return Ok(Decoded::NotAList);
    };

    let (items, rejected) = validate_candidates(&values);
    Ok(Decoded::List { items, rejected })
}

/// Encode items into a fragment value (without the leading `#`).
///
/// Returns `None` for an empty list, meaning the fragment should be cleared.
pub fn encode_fragment(items: &[BuyListItem]) -> Result<Option<String>, CodecError> {
    if items.is_empty() {
        return Ok(None);
    }

    let json = serde_json::to_string(items)?;
    Ok(Some(format!("{LIST_MARKER}{}", urlencoding::encode(&json))))
}
