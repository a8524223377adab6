//! Lifecycle handler: forwards named lifecycle events as Branch standard
//! events.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, EventKind, Payload};
use serde_json::Value;
use tracing::{debug, warn};

use super::{EventHandler, STANDARD_EVENT_PATH};
use crate::events::McEvent;
use crate::params::{user_agent, UserData};

const NAME_FIELD: &str = "lifecycle_event_name";
/// Fields lifted into `event_data`; everything else goes to `custom_data`.
const EVENT_DATA_FIELDS: [&str; 2] = ["transaction_id", "description"];

pub struct LifecycleHandler {
    config: Arc<BranchConfig>,
}

impl LifecycleHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for LifecycleHandler {
    fn kind(&self) -> EventKind {
        EventKind::LifecycleEvent
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        let Some(name) = event.text(NAME_FIELD) else {
            warn!(event_id = %event.id, "lifecycle event without name, not forwarded");
            return Ok(None);
        };

        let custom_data = Value::Object(event.payload_without(&[
            "timestamp",
            NAME_FIELD,
            EVENT_DATA_FIELDS[0],
            EVENT_DATA_FIELDS[1],
        ]))
        .to_string();
        let event_data: Payload = EVENT_DATA_FIELDS
            .iter()
            .filter_map(|key| event.payload.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect();
        let event_data = Value::Object(event_data).to_string();
        let user_data = UserData::collect(client).to_json()?;

        let request = BranchRequest::form_post(
            self.config.endpoint(STANDARD_EVENT_PATH),
            user_agent(client, &self.config),
            [
                ("name", name.as_str()),
                ("user_data", user_data.as_str()),
                ("custom_data", custom_data.as_str()),
                ("event_data", event_data.as_str()),
                ("branch_key", self.config.branch_key.as_str()),
            ],
        );
        debug!(event_id = %event.id, name = %name, "lifecycle request built");
        Ok(Some(request))
    }
}
