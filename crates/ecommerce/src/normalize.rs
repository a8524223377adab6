//! Schema-driven normalization of a whole field mapping.

use branch_schema::FieldSchema;
use serde_json::{Map, Value};
use tracing::trace;

use crate::validate::validated_value;
use crate::value::is_meaningful;

/// Normalize `raw` against `schema` into a new mapping keyed by canonical
/// names.
///
/// Absent values and unrecognized keys are skipped, values failing their
/// type or validation rule are dropped. Nothing is reported back: an
/// omitted field is the expected outcome, not an error. When several raw
/// keys share a canonical name the last one decides: its accepted value, or
/// no field at all when it is dropped.
pub fn normalize<S>(raw: &Map<String, Value>, schema: &S) -> Map<String, Value>
where
    S: FieldSchema + ?Sized,
{
    normalize_entries(raw.iter(), schema)
}

/// [`normalize`] over an arbitrary sequence of entries.
pub fn normalize_entries<'a, I, S>(entries: I, schema: &S) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
    S: FieldSchema + ?Sized,
{
    let mut out = Map::new();
    for (key, value) in entries {
        if !is_meaningful(value) {
            continue;
        }
        let Some(descriptor) = schema.descriptor(key) else {
            continue;
        };
        let accepted = validated_value(value, descriptor).unwrap_or_else(|| {
            trace!(field = %key, "field dropped by validation");
            Value::Null
        });
        // A rejected value still takes its canonical slot, clearing earlier aliases
        out.insert(descriptor.canonical_name.to_string(), accepted);
    }
    out.retain(|_, value| !value.is_null());
    out
}

/// Present fields the schema does not recognize, forwarded verbatim.
pub fn custom_fields<S>(raw: &Map<String, Value>, schema: &S) -> Map<String, Value>
where
    S: FieldSchema + ?Sized,
{
    custom_entries(raw.iter(), schema)
}

/// [`custom_fields`] over an arbitrary sequence of entries.
pub fn custom_entries<'a, I, S>(entries: I, schema: &S) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
    S: FieldSchema + ?Sized,
{
    entries
        .into_iter()
        .filter(|(key, value)| is_meaningful(value) && !schema.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use branch_schema::{EVENT_FIELDS, PRODUCT_FIELDS};
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_renames_and_keeps_accepted_values() {
        let raw = as_map(json!({
            "order_id": "817286897056801",
            "affiliation": "affiliate.com",
            "revenue": 30,
            "currency": "USD",
        }));
        let out = normalize(&raw, &EVENT_FIELDS);
        assert_eq!(
            Value::Object(out),
            json!({
                "transaction_id": "817286897056801",
                "affiliation": "affiliate.com",
                "revenue": 30,
                "currency": "USD",
            })
        );
    }

    #[test]
    fn test_skips_absent_and_unknown() {
        let raw = as_map(json!({
            "coupon": null,
            "description": {},
            "search_query": [],
            "affiliation": "",
            "total": 30.0,
        }));
        let out = normalize(&raw, &EVENT_FIELDS);
        assert_eq!(Value::Object(out), json!({ "affiliation": "" }));
    }

    #[test]
    fn test_tax_validation() {
        let negative = normalize(&as_map(json!({ "tax": -5 })), &EVENT_FIELDS);
        assert!(negative.is_empty());

        let positive = normalize(&as_map(json!({ "tax": 5 })), &EVENT_FIELDS);
        assert_eq!(positive.get("tax"), Some(&json!(5)));
    }

    #[test]
    fn test_alias_collision_last_key_wins() {
        let raw = as_map(json!({ "sku": "A-1", "$sku": "B-2" }));
        let out = normalize(&raw, &PRODUCT_FIELDS);
        assert_eq!(out.get("$sku"), Some(&json!("B-2")));
        assert_eq!(out.len(), 1);

        let raw = as_map(json!({ "$product_category": "bogus", "category": "ELECTRONICS" }));
        let out = normalize(&raw, &PRODUCT_FIELDS);
        assert_eq!(out.get("$product_category"), Some(&json!("ELECTRONICS")));
    }

    #[test]
    fn test_dropped_alias_clears_earlier_value() {
        let raw = as_map(json!({ "quantity": 2, "$quantity": -1 }));
        assert!(normalize(&raw, &PRODUCT_FIELDS).is_empty());

        let raw = as_map(json!({ "category": "ELECTRONICS", "$product_category": "bogus" }));
        let out = normalize(&raw, &PRODUCT_FIELDS);
        assert!(out.get("$product_category").is_none());

        // Absent values are skipped before they can claim a slot
        let raw = as_map(json!({ "sku": "A-1", "$sku": null, "name": "shorts" }));
        let out = normalize(&raw, &PRODUCT_FIELDS);
        assert_eq!(Value::Object(out), json!({ "$sku": "A-1", "$product_name": "shorts" }));
    }

    #[test]
    fn test_key_order_follows_first_occurrence() {
        let raw = as_map(json!({ "sku": "A-1", "name": "shorts", "$sku": "B-2" }));
        let keys: Vec<_> = normalize(&raw, &PRODUCT_FIELDS).keys().cloned().collect();
        assert_eq!(keys, ["$sku", "$product_name"]);
    }

    #[test]
    fn test_input_untouched_and_idempotent() {
        let raw = as_map(json!({ "order_id": 7, "tax": -1, "total": 3 }));
        let before = raw.clone();
        let first = normalize(&raw, &EVENT_FIELDS);
        let second = normalize(&raw, &EVENT_FIELDS);
        assert_eq!(first, second);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_custom_fields() {
        let raw = as_map(json!({
            "order_id": "1",
            "total": 30.0,
            "checkout_id": "616727740",
            "empty": "",
            "gone": null,
            "nothing": [],
        }));
        let out = custom_fields(&raw, &EVENT_FIELDS);
        assert_eq!(
            Value::Object(out),
            json!({ "total": 30.0, "checkout_id": "616727740", "empty": "" })
        );
    }
}
