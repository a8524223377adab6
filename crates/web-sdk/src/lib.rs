//! Branch web SDK server-side support: builds Branch API requests for
//! pageview, identity, lifecycle, custom and ecommerce events, and keeps the
//! Branch identifier cookies on the client.
//!
//! # Modules
//!
//! - [`events`]: incoming event envelope
//! - [`cookies`]: Branch identifier cookies
//! - [`params`]: body params and user-data block shared by all requests
//! - [`handlers`]: one request builder per event kind
//! - [`dispatcher`]: routes events to handlers and hands requests to the client

pub mod cookies;
pub mod dispatcher;
pub mod events;
pub mod handlers;
pub mod params;

pub use dispatcher::{DispatchOutcome, DispatchStats, EventDispatcher, SkipReason};
pub use events::McEvent;
pub use handlers::EventHandler;
