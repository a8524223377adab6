//! Ecommerce handler: maps ecommerce events onto Branch standard commerce
//! and content events.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, EventKind, Payload};
use branch_ecommerce::EcommerceRequestData;
use branch_schema::lookup_event;
use serde_json::Value;
use tracing::{debug, warn};

use super::{EventHandler, STANDARD_EVENT_PATH};
use crate::events::McEvent;
use crate::params::{user_agent, UserData};

/// Payload key carrying the ecommerce event label, e.g. "Product Added".
const LABEL_FIELD: &str = "name";
/// Payload key carrying the ecommerce fields and product list.
const ECOMMERCE_FIELD: &str = "ecommerce";

pub struct EcommerceHandler {
    config: Arc<BranchConfig>,
}

impl EcommerceHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for EcommerceHandler {
    fn kind(&self) -> EventKind {
        EventKind::Ecommerce
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        let label = event.payload.get(LABEL_FIELD).and_then(Value::as_str);
        let Some(descriptor) = label.and_then(lookup_event) else {
            warn!(
                event_id = %event.id,
                label = label.unwrap_or_default(),
                "unmapped ecommerce event, not forwarded"
            );
            return Ok(None);
        };

        let empty = Payload::new();
        let ecommerce = event
            .payload
            .get(ECOMMERCE_FIELD)
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        let data = EcommerceRequestData::from_payload(ecommerce);
        let user_data = UserData::collect(client).to_json()?;

        let mut fields = vec![
            ("name", descriptor.canonical_name),
            ("user_data", user_data.as_str()),
        ];
        fields.extend(data.form_fields());
        fields.push(("branch_key", self.config.branch_key.as_str()));

        let request = BranchRequest::form_post(
            self.config.endpoint(STANDARD_EVENT_PATH),
            user_agent(client, &self.config),
            fields,
        );
        debug!(
            event_id = %event.id,
            name = descriptor.canonical_name,
            category = ?descriptor.category,
            "ecommerce request built"
        );
        Ok(Some(request))
    }
}
