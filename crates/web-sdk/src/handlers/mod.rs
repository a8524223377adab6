//! Request builders: one per event kind.
//!
//! Each handler implements [`EventHandler`] to turn an [`McEvent`] into the
//! [`BranchRequest`] expected by its Branch endpoint. Returning `Ok(None)`
//! means the event is not forwarded at all.

pub mod custom;
pub mod ecommerce;
pub mod identify;
pub mod lifecycle;
pub mod logout;
pub mod pageview;

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, EventKind};

use crate::events::McEvent;

pub use custom::CustomEventHandler;
pub use ecommerce::EcommerceHandler;
pub use identify::IdentifyHandler;
pub use lifecycle::LifecycleHandler;
pub use logout::LogoutHandler;
pub use pageview::PageviewHandler;

pub const PAGEVIEW_PATH: &str = "/v1/pageview";
pub const PROFILE_PATH: &str = "/v1/profile";
pub const LOGOUT_PATH: &str = "/v1/logout";
pub const STANDARD_EVENT_PATH: &str = "/v2/event/standard";
pub const CUSTOM_EVENT_PATH: &str = "/v2/event/custom";

/// Handler trait: builds the Branch request for one event kind.
pub trait EventHandler: Send + Sync {
    /// Event kind this handler is registered for.
    fn kind(&self) -> EventKind;

    /// Build the request for an event. May read and write client cookies.
    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>>;
}

/// The handler set for a configuration. Ecommerce is left out when disabled.
pub fn default_handlers(config: Arc<BranchConfig>) -> Vec<Arc<dyn EventHandler>> {
    let mut handlers: Vec<Arc<dyn EventHandler>> = vec![
        Arc::new(PageviewHandler::new(config.clone())),
        Arc::new(IdentifyHandler::new(config.clone())),
        Arc::new(LogoutHandler::new(config.clone())),
        Arc::new(LifecycleHandler::new(config.clone())),
        Arc::new(CustomEventHandler::new(config.clone())),
    ];
    if config.ecommerce {
        handlers.push(Arc::new(EcommerceHandler::new(config)));
    }
    handlers
}
