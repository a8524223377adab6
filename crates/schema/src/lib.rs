//! Field Schema Registry: static, declarative tables describing how the
//! Branch API names and types the fields of standard events.
//!
//! # Modules
//!
//! - [`field`]: descriptor record, accepted type tags, validation rules
//! - [`events`]: event label → canonical Branch event name
//! - [`params`]: scalar ecommerce fields (`event_data`)
//! - [`products`]: product fields (`content_items`)

pub mod events;
pub mod field;
pub mod params;
pub mod products;

pub use events::{lookup_event, EventCategory, EventDescriptor};
pub use field::{FieldDescriptor, FieldSchema, FieldTable, FieldType, Validation};
pub use params::EVENT_FIELDS;
pub use products::PRODUCT_FIELDS;
