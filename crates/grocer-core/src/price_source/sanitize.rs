//! Coercion of raw price-source payloads into [`Product`] offers.
//!
//! Generated offers are loosely typed: prices arrive as numbers or strings,
//! stores may be invented, quantities may be missing. Everything is coerced
//! rather than rejected, except entries without an id or name.

use serde_json::{Map, Value};

use crate::models::{Product, Store};

/// Turn a decoded payload into offers.
///
/// A payload that is not an array yields no offers.
pub fn sanitize_offers(payload: Value) -> Vec<Product> {
    let Value::Array(entries) = payload else {
        tracing::warn!("Price source did not return an array for products");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .filter(|entry| is_present(entry.get("name")) && is_present(entry.get("id")))
        .map(sanitize_entry)
        .collect()
}

fn sanitize_entry(entry: &Map<String, Value>) -> Product {
    let text = |field: &str| entry.get(field).map(display_string).unwrap_or_default();

    Product {
        id: text("id"),
        name: text("name"),
        store: entry
            .get("store")
            .and_then(Value::as_str)
            .map_or(Store::Coles, Store::coerce),
        price: lenient_amount(entry.get("price")),
        quantity: if is_present(entry.get("quantity")) {
            text("quantity")
        } else {
            String::new()
        },
        discount_amount: lenient_amount(entry.get("discountAmount")),
    }
}

/// JavaScript-style truthiness of an optional field.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Non-negative amount from a number or a numeric-looking string; anything
/// else is 0.
fn lenient_amount(value: Option<&Value>) -> f64 {
    let amount = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_leading_float(text).unwrap_or(0.0),
        _ => 0.0,
    };

    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Parse the longest numeric prefix of `text`, e.g. `"3.50 AUD"` → 3.5.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    if !text[digits_start..end].bytes().any(|byte| byte.is_ascii_digit()) {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn well_formed_offer_passes_through() {
        let offers = sanitize_offers(json!([{
            "id": "w-123",
            "name": "a2 Milk Full Cream 2L",
            "store": "Woolworths",
            "price": 4.2,
            "quantity": "2L",
            "discountAmount": 0.5
        }]));

        assert_eq!(
            offers,
            vec![Product {
                id: "w-123".to_string(),
                name: "a2 Milk Full Cream 2L".to_string(),
                store: Store::Woolworths,
                price: 4.2,
                quantity: "2L".to_string(),
                discount_amount: 0.5,
            }]
        );
    }

    #[test]
    fn non_array_payload_yields_nothing() {
        assert!(sanitize_offers(json!({"products": []})).is_empty());
    }

    #[test]
    fn entries_without_id_or_name_are_dropped() {
        let offers = sanitize_offers(json!([
            {"id": "a", "name": "", "price": 1},
            {"name": "No id", "price": 1},
            "just a string",
            null,
            {"id": 7, "name": "Numeric id"}
        ]));

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id, "7");
        assert_eq!(offers[0].name, "Numeric id");
    }

    #[test]
    fn loose_fields_are_coerced() {
        let offers = sanitize_offers(json!([{
            "id": "x",
            "name": "Eggs",
            "store": "Costco",
            "price": "6.50 AUD",
            "discountAmount": "n/a"
        }]));

        let offer = &offers[0];
        assert_eq!(offer.store, Store::Coles);
        assert!((offer.price - 6.5).abs() < f64::EPSILON);
        assert_eq!(offer.quantity, "");
        assert!(offer.discount_amount.abs() < f64::EPSILON);
    }

    #[test]
    fn negative_amounts_become_zero() {
        let offers = sanitize_offers(json!([{
            "id": "x",
            "name": "Eggs",
            "store": "ALDI",
            "price": -2,
            "quantity": 12,
            "discountAmount": "-1"
        }]));

        assert!(offers[0].price.abs() < f64::EPSILON);
        assert!(offers[0].discount_amount.abs() < f64::EPSILON);
        assert_eq!(offers[0].quantity, "12");
        assert_eq!(offers[0].store, Store::Aldi);
    }

    #[test]
    fn parse_leading_float_handles_prefixes() {
        assert_eq!(parse_leading_float(" 3.5kg"), Some(3.5));
        assert_eq!(parse_leading_float("1e2"), Some(100.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
    }
}
