//! Logout handler: clears the developer identity and closes the Branch
//! session via `/v1/logout`.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, CookieScope, EventKind};
use tracing::debug;

use super::{EventHandler, LOGOUT_PATH};
use crate::cookies::IDENTITY;
use crate::events::McEvent;
use crate::params::{generic_body_params, user_agent};

pub struct LogoutHandler {
    config: Arc<BranchConfig>,
}

impl LogoutHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for LogoutHandler {
    fn kind(&self) -> EventKind {
        EventKind::Logout
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        client.set(IDENTITY, None, CookieScope::Infinite);

        let fields = generic_body_params(client, &self.config.branch_key);
        let request = BranchRequest::form_post(
            self.config.endpoint(LOGOUT_PATH),
            user_agent(client, &self.config),
            fields.iter().map(|(k, v)| (*k, v.as_str())),
        );
        debug!(event_id = %event.id, "logout request built");
        Ok(Some(request))
    }
}
