//! Identify handler: stores the developer identity and reports it via
//! `/v1/profile`.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, CookieScope, EventKind};
use tracing::{debug, warn};

use super::{EventHandler, PROFILE_PATH};
use crate::cookies::IDENTITY;
use crate::events::McEvent;
use crate::params::{generic_body_params, user_agent};

pub struct IdentifyHandler {
    config: Arc<BranchConfig>,
}

impl IdentifyHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for IdentifyHandler {
    fn kind(&self) -> EventKind {
        EventKind::Identify
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        let Some(identity) = event.text(IDENTITY) else {
            warn!(event_id = %event.id, "identify event without identity, not forwarded");
            return Ok(None);
        };
        client.set(IDENTITY, Some(identity.as_str()), CookieScope::Infinite);

        // The stored identity is already part of the generic params
        let fields = generic_body_params(client, &self.config.branch_key);

        let request = BranchRequest::form_post(
            self.config.endpoint(PROFILE_PATH),
            user_agent(client, &self.config),
            fields.iter().map(|(k, v)| (*k, v.as_str())),
        );
        debug!(event_id = %event.id, "identify request built");
        Ok(Some(request))
    }
}
