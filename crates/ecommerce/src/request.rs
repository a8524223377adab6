//! Ecommerce orchestration: splits an ecommerce payload into the three
//! serialized blocks of a Branch standard event.

use branch_schema::{FieldSchema, EVENT_FIELDS, PRODUCT_FIELDS};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::normalize::{custom_entries, normalize, normalize_entries};

/// Key holding the product list.
pub const PRODUCTS_KEY: &str = "products";

/// Context fields never forwarded in any block.
pub const CONTEXT_FIELDS: [&str; 3] = [
    "timestamp",
    "zaraz-test-mc__last_page_title",
    "__zarazEcommerce",
];

/// Normalized, not yet serialized, ecommerce blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EcommerceBlocks {
    pub event_data: Map<String, Value>,
    pub custom_data: Map<String, Value>,
    pub content_items: Vec<Map<String, Value>>,
}

impl EcommerceBlocks {
    pub fn from_payload(ecommerce: &Map<String, Value>) -> Self {
        Self::with_schemas(ecommerce, &EVENT_FIELDS, &PRODUCT_FIELDS)
    }

    /// Build the blocks against explicit scalar and product schemas.
    pub fn with_schemas<E, P>(
        ecommerce: &Map<String, Value>,
        event_schema: &E,
        product_schema: &P,
    ) -> Self
    where
        E: FieldSchema + ?Sized,
        P: FieldSchema + ?Sized,
    {
        let scalars = || {
            ecommerce.iter().filter(|(key, _)| {
                key.as_str() != PRODUCTS_KEY && !CONTEXT_FIELDS.contains(&key.as_str())
            })
        };

        let event_data = normalize_entries(scalars(), event_schema);
        let custom_data = custom_entries(scalars(), event_schema);

        let content_items: Vec<_> = match ecommerce.get(PRODUCTS_KEY) {
            Some(Value::Array(products)) => products
                .iter()
                .filter_map(|product| match product {
                    Value::Object(fields) => Some(normalize(fields, product_schema)),
                    // Index keys never match a product field
                    Value::Array(_) => Some(Map::new()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        debug!(
            event_fields = event_data.len(),
            custom_fields = custom_data.len(),
            content_items = content_items.len(),
            "ecommerce payload normalized"
        );

        Self {
            event_data,
            custom_data,
            content_items,
        }
    }

    pub fn serialize(self) -> EcommerceRequestData {
        let content_items =
            Value::Array(self.content_items.into_iter().map(Value::Object).collect());
        EcommerceRequestData {
            event_data: Value::Object(self.event_data).to_string(),
            custom_data: Value::Object(self.custom_data).to_string(),
            content_items: content_items.to_string(),
        }
    }
}

/// The three JSON text blocks sent as form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcommerceRequestData {
    pub event_data: String,
    pub custom_data: String,
    pub content_items: String,
}

impl EcommerceRequestData {
    /// Normalize and serialize an ecommerce payload. Never fails: malformed
    /// input degrades to empty blocks.
    pub fn from_payload(ecommerce: &Map<String, Value>) -> Self {
        EcommerceBlocks::from_payload(ecommerce).serialize()
    }

    /// Body fields in wire order.
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("event_data", self.event_data.as_str()),
            ("custom_data", self.custom_data.as_str()),
            ("content_items", self.content_items.as_str()),
        ]
    }
}
