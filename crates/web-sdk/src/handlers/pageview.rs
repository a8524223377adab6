//! Pageview handler: opens a Branch web session via `/v1/pageview`.

use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, ClientHandle, EventKind};
use serde::Serialize;
use tracing::debug;

use super::{EventHandler, PAGEVIEW_PATH};
use crate::events::McEvent;
use crate::params::{generic_body_params, user_agent};

/// Page details carried in the `metadata` field.
#[derive(Debug, Serialize)]
struct PageMetadata<'a> {
    url: String,
    user_agent: &'a str,
    language: &'a str,
    screen_width: u32,
    screen_height: u32,
    title: &'a str,
}

pub struct PageviewHandler {
    config: Arc<BranchConfig>,
}

impl PageviewHandler {
    pub fn new(config: Arc<BranchConfig>) -> Self {
        Self { config }
    }
}

impl EventHandler for PageviewHandler {
    fn kind(&self) -> EventKind {
        EventKind::Pageview
    }

    fn build_request(
        &self,
        event: &McEvent,
        client: &dyn ClientHandle,
    ) -> Result<Option<BranchRequest>> {
        let ctx = client.context();
        let metadata = serde_json::to_string(&PageMetadata {
            url: ctx.href(),
            user_agent: &ctx.user_agent,
            language: &ctx.language,
            screen_width: ctx.screen_width,
            screen_height: ctx.screen_height,
            title: &ctx.title,
        })?;

        let mut fields = generic_body_params(client, &self.config.branch_key);
        fields.extend([
            ("source", "web-sdk".to_string()),
            ("feature", "journeys".to_string()),
            ("event", "pageview".to_string()),
            ("metadata", metadata),
            ("initial_referrer", ctx.referer.clone()),
            ("user_language", ctx.primary_language().to_string()),
        ]);

        let request = BranchRequest::form_post(
            self.config.endpoint(PAGEVIEW_PATH),
            user_agent(client, &self.config),
            fields.iter().map(|(k, v)| (*k, v.as_str())),
        );
        debug!(event_id = %event.id, url = %request.url, "pageview request built");
        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branch_core::{CaptureClient, ClientContext, CookieScope};
    use serde_json::Value;

    fn handler() -> PageviewHandler {
        PageviewHandler::new(Arc::new(BranchConfig {
            branch_key: "key_12345".into(),
            ..Default::default()
        }))
    }

    fn client() -> CaptureClient {
        CaptureClient::new(ClientContext {
            url: "http://127.0.0.1:1337".into(),
            user_agent: "Mozilla/5.0 (Macintosh)".into(),
            language: "en-GB".into(),
            screen_width: 2560,
            screen_height: 1080,
            referer: String::new(),
            title: "Zaraz \"Test\" /t Page".into(),
        })
    }

    #[test]
    fn test_pageview_request() {
        let client = client();
        let event = McEvent::new(EventKind::Pageview, Default::default());
        let request = handler().build_request(&event, &client).unwrap().unwrap();

        assert_eq!(request.url, "https://api2.branch.io/v1/pageview");
        assert_eq!(request.header("User-Agent"), Some("Mozilla/5.0 (Macintosh)"));
        assert_eq!(request.field("branch_key").as_deref(), Some("key_12345"));
        assert_eq!(request.field("source").as_deref(), Some("web-sdk"));
        assert_eq!(request.field("feature").as_deref(), Some("journeys"));
        assert_eq!(request.field("event").as_deref(), Some("pageview"));
        assert_eq!(request.field("initial_referrer").as_deref(), Some(""));
        assert_eq!(request.field("user_language").as_deref(), Some("en"));
        assert!(request.field("identity").is_none());

        let metadata: Value = serde_json::from_str(&request.field("metadata").unwrap()).unwrap();
        assert_eq!(metadata["url"], "http://127.0.0.1:1337/");
        assert_eq!(metadata["title"], "Zaraz \"Test\" /t Page");
        assert_eq!(metadata["screen_height"], 1080);
    }

    #[test]
    fn test_pageview_issues_cookies() {
        let client = client();
        let event = McEvent::new(EventKind::Pageview, Default::default());
        let request = handler().build_request(&event, &client).unwrap().unwrap();

        let session = client.cookie("session_id").unwrap();
        assert_eq!(session.scope, CookieScope::Session);
        assert_eq!(request.field("session_id"), Some(session.value));
        assert_eq!(client.cookie("identity_id").unwrap().value.len(), 14);
        assert_eq!(client.cookie("browser_fingerprint_id").unwrap().value.len(), 14);
    }
}
