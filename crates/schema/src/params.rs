//! Scalar Field Table: top-level ecommerce fields forwarded as `event_data`.

use crate::field::{FieldDescriptor, FieldTable, FieldType, Validation};

const STRING: &[FieldType] = &[FieldType::String];
const NUMBER: &[FieldType] = &[FieldType::Number];
const STRING_OR_NUMBER: &[FieldType] = &[FieldType::String, FieldType::Number];

static FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::new("order_id", "transaction_id", STRING_OR_NUMBER),
    FieldDescriptor::new("transaction_id", "transaction_id", STRING_OR_NUMBER),
    FieldDescriptor::new("affiliation", "affiliation", STRING),
    FieldDescriptor::new("revenue", "revenue", NUMBER),
    FieldDescriptor::new("shipping", "shipping", NUMBER),
    FieldDescriptor::new("tax", "tax", NUMBER).validated(Validation::Positive),
    FieldDescriptor::new("coupon", "coupon", STRING),
    FieldDescriptor::new("currency", "currency", STRING),
    FieldDescriptor::new("description", "description", STRING),
    FieldDescriptor::new("search_query", "search_query", STRING),
];

pub static EVENT_FIELDS: FieldTable = FieldTable::new("event_data", &FIELDS);
