pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{capture_client, CaptureClient, ClientHandle};
pub use config::BranchConfig;
pub use error::{BranchError, BranchResult};
pub use types::{BranchRequest, ClientContext, CookieScope, EventKind, Payload};
