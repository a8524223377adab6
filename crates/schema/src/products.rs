//! Product Field Table: per-product fields forwarded as `content_items`.
//!
//! Friendly aliases (`sku`, `price`, ...) and the `$`-prefixed wire names are
//! separate keys resolving to the same canonical name, so either spelling is
//! accepted on input and the wire name is always emitted.

use crate::field::{FieldDescriptor, FieldTable, FieldType, Validation};

const STRING: &[FieldType] = &[FieldType::String];
const NUMBER: &[FieldType] = &[FieldType::Number];
const BOOLEAN: &[FieldType] = &[FieldType::Boolean];
const STRING_OR_NUMBER: &[FieldType] = &[FieldType::String, FieldType::Number];
const ANY_STRUCTURED: &[FieldType] = &[FieldType::String, FieldType::Number, FieldType::Object];

pub const PRODUCT_CATEGORIES: &[&str] = &[
    "ANIMALS_AND_PET_SUPPLIES",
    "APPAREL_AND_ACCESSORIES",
    "ARTS_AND_ENTERTAINMENT",
    "BABY_AND_TODDLER",
    "BUSINESS_AND_INDUSTRIAL",
    "CAMERAS_AND_OPTICS",
    "ELECTRONICS",
    "FOOD_BEVERAGES_AND_TOBACCO",
    "FURNITURE",
    "HARDWARE",
    "HEALTH_AND_BEAUTY",
    "HOME_AND_GARDEN",
    "LUGGAGE_AND_BAGS",
    "MATURE",
    "MEDIA",
    "OFFICE_SUPPLIES",
    "RELIGIOUS_AND_CEREMONIAL",
    "SOFTWARE",
    "SPORTING_GOODS",
    "TOYS_AND_GAMES",
    "VEHICLES_AND_PARTS",
];

pub const CONTENT_SCHEMAS: &[&str] = &[
    "COMMERCE_AUCTION",
    "COMMERCE_BUSINESS",
    "COMMERCE_OTHER",
    "COMMERCE_PRODUCT",
    "COMMERCE_RESTAURANT",
    "COMMERCE_SERVICE",
    "COMMERCE_TRAVEL_FLIGHT",
    "COMMERCE_TRAVEL_HOTEL",
    "COMMERCE_TRAVEL_OTHER",
    "GAME_STATE",
    "MEDIA_IMAGE",
    "MEDIA_MIXED",
    "MEDIA_MUSIC",
    "MEDIA_OTHER",
    "MEDIA_VIDEO",
    "OTHER",
    "TEXT_ARTICLE",
    "TEXT_BLOG",
    "TEXT_OTHER",
    "TEXT_RECIPE",
    "TEXT_REVIEW",
    "TEXT_SEARCH_RESULTS",
    "TEXT_STORY",
    "TEXT_TECHNICAL_DOC",
];

const CATEGORY: Validation = Validation::OneOf(PRODUCT_CATEGORIES);

static FIELDS: [FieldDescriptor; 37] = [
    // Friendly aliases
    FieldDescriptor::new("sku", "$sku", STRING_OR_NUMBER),
    FieldDescriptor::new("category", "$product_category", STRING).validated(CATEGORY),
    FieldDescriptor::new("brand", "$product_brand", STRING),
    FieldDescriptor::new("name", "$product_name", STRING),
    FieldDescriptor::new("variant", "$product_variant", STRING),
    FieldDescriptor::new("price", "$price", STRING_OR_NUMBER),
    FieldDescriptor::new("quantity", "$quantity", STRING_OR_NUMBER).validated(Validation::Positive),
    // Wire names
    FieldDescriptor::new("$content_schema", "$content_schema", STRING)
        .validated(Validation::OneOf(CONTENT_SCHEMAS)),
    FieldDescriptor::new("$og_title", "$og_title", STRING),
    FieldDescriptor::new("$og_description", "$og_description", STRING),
    FieldDescriptor::new("$og_image_url", "$og_image_url", STRING),
    FieldDescriptor::new("$canonical_identifier", "$canonical_identifier", STRING),
    FieldDescriptor::new("$publicly_indexable", "$publicly_indexable", BOOLEAN),
    FieldDescriptor::new("$locally_indexable", "$locally_indexable", BOOLEAN),
    FieldDescriptor::new("$price", "$price", STRING_OR_NUMBER),
    FieldDescriptor::new("$quantity", "$quantity", NUMBER).validated(Validation::Positive),
    FieldDescriptor::new("$sku", "$sku", STRING_OR_NUMBER),
    FieldDescriptor::new("$product_name", "$product_name", STRING),
    FieldDescriptor::new("$product_brand", "$product_brand", STRING),
    FieldDescriptor::new("$product_category", "$product_category", STRING).validated(CATEGORY),
    FieldDescriptor::new("$product_variant", "$product_variant", STRING),
    FieldDescriptor::new("$rating_average", "$rating_average", STRING_OR_NUMBER),
    FieldDescriptor::new("$rating_count", "$rating_count", NUMBER).validated(Validation::Positive),
    FieldDescriptor::new("$rating_max", "$rating_max", STRING_OR_NUMBER),
    FieldDescriptor::new("$creation_timestamp", "$creation_timestamp", NUMBER)
        .validated(Validation::Date),
    FieldDescriptor::new("$exp_date", "$exp_date", NUMBER).validated(Validation::Date),
    FieldDescriptor::new("$keywords", "$keywords", ANY_STRUCTURED),
    FieldDescriptor::new("$address_street", "$address_street", STRING),
    FieldDescriptor::new("$address_city", "$address_city", STRING),
    FieldDescriptor::new("$address_region", "$address_region", STRING),
    FieldDescriptor::new("$address_country", "$address_country", STRING),
    FieldDescriptor::new("$address_postal_code", "$address_postal_code", STRING),
    FieldDescriptor::new("$latitude", "$latitude", NUMBER),
    FieldDescriptor::new("$longitude", "$longitude", NUMBER),
    FieldDescriptor::new("$image_captions", "$image_captions", ANY_STRUCTURED),
    FieldDescriptor::new("$condition", "$condition", STRING),
    FieldDescriptor::new("$custom_fields", "$custom_fields", ANY_STRUCTURED),
];

pub static PRODUCT_FIELDS: FieldTable = FieldTable::new("content_items", &FIELDS);
