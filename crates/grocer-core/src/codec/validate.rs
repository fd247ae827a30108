//! Schema check for buy-list items decoded from untrusted fragments.
//!
//! Every element of a decoded array is checked on its own and turned into a
//! [`Candidate`]; the caller keeps the valid ones and drops the rest.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::BuyListItem;

/// Outcome of checking one decoded element
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Valid(BuyListItem),
    Rejected(Rejection),
}

/// Why an element was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The element is not a JSON object
    NotAnObject,
    /// A required field is missing or has the wrong JSON type
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// The id repeats one accepted earlier in the same list
    DuplicateId(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("element is not an object"),
            Self::WrongType { field, expected } => {
                write!(f, "field '{field}' is not a {expected}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate id '{id}'"),
        }
    }
}

/// Check a single decoded element against the buy-list item shape.
///
/// `store` only has to be a string; unknown chains are accepted here and
/// handled at display time. Unknown extra fields are ignored. `isTaken` never
/// causes a rejection: it is read with JavaScript truthiness and defaults to
/// `false`.
pub fn check_candidate(value: &Value) -> Candidate {
    let Some(object) = value.as_object() else {
        return Candidate::Rejected(Rejection::NotAnObject);
    };

    match item_from_object(object) {
        Ok(item) => Candidate::Valid(item),
        Err(rejection) => Candidate::Rejected(rejection),
    }
}

/// Check every element, keeping valid items in order.
///
/// Returns the accepted items and the number of rejected elements.
pub fn validate_candidates(values: &[Value]) -> (Vec<BuyListItem>, usize) {
    let mut seen = HashSet::new();
    let mut rejected = 0;

    let items = values
        .iter()
        .map(check_candidate)
        .map(|candidate| match candidate {
            Candidate::Valid(item) if !seen.insert(item.id.clone()) => {
                Candidate::Rejected(Rejection::DuplicateId(item.id))
            }
            other => other,
        })
        .filter_map(|candidate| match candidate {
            Candidate::Valid(item) => Some(item),
            Candidate::Rejected(reason) => {
                tracing::debug!("Dropping buy list entry from URL: {}", reason);
                rejected += 1;
                None
            }
        })
        .collect();

    (items, rejected)
}

fn item_from_object(object: &Map<String, Value>) -> Result<BuyListItem, Rejection> {
    Ok(BuyListItem {
        id: string_field(object, "id")?,
        product_id: string_field(object, "productId")?,
        name: string_field(object, "name")?,
        store: string_field(object, "store")?,
        price: number_field(object, "price")?,
        quantity: string_field(object, "quantity")?,
        discount_amount: number_field(object, "discountAmount")?,
        is_taken: object.get("isTaken").is_some_and(is_truthy),
    })
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String, Rejection> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(Rejection::WrongType {
            field,
            expected: "string",
        })
}

/// A finite JSON number. Literals outside the `f64` range (e.g. `1e400`)
/// reject only their own element.
fn number_field(object: &Map<String, Value>, field: &'static str) -> Result<f64, Rejection> {
    object
        .get(field)
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
        .ok_or(Rejection::WrongType {
            field,
            expected: "number",
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        // Out-of-range literals have no f64 value and read as infinity.
        Value::Number(number) => !number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_entry(id: &str) -> Value {
        json!({
            "id": id,
            "productId": "p1",
            "name": "Milk 2L",
            "store": "Coles",
            "price": 3.5,
            "quantity": "2L",
            "discountAmount": 0,
            "isTaken": false,
        })
    }

    #[test]
    fn test_valid_entry_is_accepted() {
        let Candidate::Valid(item) = check_candidate(&valid_entry("a")) else {
            panic!("expected valid candidate");
        };
        assert_eq!(item.id, "a");
        assert_eq!(item.store, "Coles");
        assert!(!item.is_taken);
    }

    #[test]
    fn test_non_object_is_rejected() {
        for value in [json!(null), json!(5), json!("item"), json!([1, 2])] {
            assert_eq!(
                check_candidate(&value),
                Candidate::Rejected(Rejection::NotAnObject)
            );
        }
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let mut entry = valid_entry("a");
        entry["price"] = json!("3.50");
        assert_eq!(
            check_candidate(&entry),
            Candidate::Rejected(Rejection::WrongType {
                field: "price",
                expected: "number",
            })
        );

        let mut entry = valid_entry("a");
        entry.as_object_mut().unwrap().remove("quantity");
        assert_eq!(
            check_candidate(&entry),
            Candidate::Rejected(Rejection::WrongType {
                field: "quantity",
                expected: "string",
            })
        );
    }

    #[test]
    fn test_unknown_store_is_accepted() {
        let mut entry = valid_entry("a");
        entry["store"] = json!("Costco");
        let Candidate::Valid(item) = check_candidate(&entry) else {
            panic!("unknown store should not be rejected");
        };
        assert_eq!(item.store, "Costco");
    }

    #[test]
    fn test_is_taken_uses_truthiness() {
        let cases = [
            (None, false),
            (Some(json!(true)), true),
            (Some(json!(false)), false),
            (Some(json!(null)), false),
            (Some(json!(1)), true),
            (Some(json!(0)), false),
            (Some(json!("yes")), true),
            (Some(json!("")), false),
            (Some(serde_json::from_str("1e400").unwrap()), true),
        ];

        for (raw, expected) in cases {
            let mut entry = valid_entry("a");
            let object = entry.as_object_mut().unwrap();
            object.remove("isTaken");
            if let Some(raw) = raw {
                object.insert("isTaken".to_string(), raw);
            }
            let Candidate::Valid(item) = check_candidate(&entry) else {
                panic!("isTaken must never cause rejection");
            };
            assert_eq!(item.is_taken, expected);
        }
    }

    #[test]
    fn test_validate_drops_invalid_and_duplicate_entries() {
        let mut broken = valid_entry("c");
        broken["name"] = json!(42);
        let values = vec![
            valid_entry("a"),
            broken,
            valid_entry("b"),
            valid_entry("a"),
            valid_entry("d"),
        ];

        let (items, rejected) = validate_candidates(&values);
        let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut entry = valid_entry("a");
        entry["colour"] = json!("blue");
        assert!(matches!(check_candidate(&entry), Candidate::Valid(_)));
    }
}
