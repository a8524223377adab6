//! Ecommerce field normalization: turns a loosely-typed ecommerce payload
//! into the `event_data`, `custom_data` and `content_items` blocks of a
//! Branch standard event.
//!
//! # Modules
//!
//! - [`value`]: presence test and dynamic-language value coercions
//! - [`validate`]: per-field type check, validation rules, coercion
//! - [`normalize`]: schema-driven filter/rename over a whole mapping
//! - [`request`]: ecommerce orchestration producing the three JSON blocks

pub mod normalize;
pub mod request;
pub mod validate;
pub mod value;

pub use normalize::{custom_fields, normalize};
pub use request::EcommerceRequestData;
pub use validate::validated_value;
pub use value::is_meaningful;
