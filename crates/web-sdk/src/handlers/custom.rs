//! Custom event handler: forwards arbitrary named events to
//! `/v2/event/custom`.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, EventKind};
use serde_json::Value;
use tracing::{debug, warn};

use super::{EventHandler, CUSTOM_EVENT_PATH};
use crate::events::McEvent;
use crate::params::{user_agent, UserData};

const NAME_FIELD: &str = "custom_event_name";

pub struct CustomEventHandler {
    config: Arc<BranchConfig>,
}

impl CustomEventHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for CustomEventHandler {
    fn kind(&self) -> EventKind {
        EventKind::CustomEvent
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        let Some(name) = event.text(NAME_FIELD) else {
            warn!(event_id = %event.id, "custom event without name, not forwarded");
            return Ok(None);
        };

        let custom_data = Value::Object(event.payload_without(&["timestamp", NAME_FIELD])).to_string();
        let user_data = UserData::collect(client).to_json()?;

        let request = BranchRequest::form_post(
            self.config.endpoint(CUSTOM_EVENT_PATH),
            user_agent(client, &self.config),
            [
                ("name", name.as_str()),
                ("user_data", user_data.as_str()),
                ("custom_data", custom_data.as_str()),
                ("branch_key", self.config.branch_key.as_str()),
            ],
        );
        debug!(event_id = %event.id, name = %name, "custom event request built");
        Ok(Some(request))
    }
}
