//! Event dispatcher: routes incoming events to their handler, hands built
//! requests to the client, and keeps per-kind delivery counters.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use branch_core::{BranchConfig, BranchRequest, BranchResult, ClientHandle, EventKind};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::events::McEvent;
use crate::handlers::{default_handlers, EventHandler};

/// Why an event produced no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No handler is registered for the event kind.
    Unhandled,
    /// The handler declined the event (e.g. unmapped ecommerce label).
    NotForwarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent(BranchRequest),
    Skipped(SkipReason),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent(_))
    }

    pub fn request(&self) -> Option<&BranchRequest> {
        match self {
            DispatchOutcome::Sent(request) => Some(request),
            DispatchOutcome::Skipped(_) => None,
        }
    }
}

/// Per-kind aggregate counters.
#[derive(Debug, Clone)]
pub struct DispatchStats {
    pub kind: EventKind,
    pub sent: u64,
    pub skipped: u64,
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl DispatchStats {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            sent: 0,
            skipped: 0,
            last_sent_at: None,
        }
    }
}

/// Holds one handler per event kind and forwards built requests to the
/// client. Requests are fire-and-forget: nothing is awaited or retried.
pub struct EventDispatcher {
    handlers: HashMap<EventKind, Arc<dyn EventHandler>>,
    stats: DashMap<EventKind, DispatchStats>,
}

impl EventDispatcher {
    /// Validate the configuration and register the default handler set.
    pub fn new(config: BranchConfig) -> BranchResult<Self> {
        config.validate()?;
        let mut dispatcher = Self::empty();
        for handler in default_handlers(Arc::new(config)) {
            dispatcher.register(handler);
        }
        Ok(dispatcher)
    }

    /// A dispatcher with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            stats: DashMap::new(),
        }
    }

    /// Register a handler, replacing any existing one for the same kind.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        let kind = handler.kind();
        if self.handlers.insert(kind, handler).is_some() {
            debug!(%kind, "event handler replaced");
        }
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Dispatch a single event.
    pub fn dispatch(&self, event: &McEvent, client: &dyn ClientHandle) -> Result<DispatchOutcome> {
        let Some(handler) = self.handlers.get(&event.kind) else {
            debug!(event_id = %event.id, kind = %event.kind, "no handler registered");
            self.record(event.kind, false);
            return Ok(DispatchOutcome::Skipped(SkipReason::Unhandled));
        };

        match handler.build_request(event, client)? {
            Some(request) => {
                debug!(
                    event_id = %event.id,
                    kind = %event.kind,
                    url = %request.url,
                    "dispatching branch request"
                );
                client.fetch(request.clone());
                self.record(event.kind, true);
                Ok(DispatchOutcome::Sent(request))
            }
            None => {
                self.record(event.kind, false);
                Ok(DispatchOutcome::Skipped(SkipReason::NotForwarded))
            }
        }
    }

    /// Dispatch events in order, stopping at the first handler error.
    pub fn dispatch_batch(
        &self,
        events: &[McEvent],
        client: &dyn ClientHandle,
    ) -> Result<Vec<DispatchOutcome>> {
        let outcomes = events
            .iter()
            .map(|event| self.dispatch(event, client))
            .collect::<Result<Vec<_>>>()?;
        info!(
            event_count = events.len(),
            sent = outcomes.iter().filter(|o| o.is_sent()).count(),
            "dispatched event batch"
        );
        Ok(outcomes)
    }

    pub fn stats(&self, kind: EventKind) -> Option<DispatchStats> {
        self.stats.get(&kind).map(|s| s.clone())
    }

    pub fn all_stats(&self) -> Vec<DispatchStats> {
        self.stats.iter().map(|entry| entry.value().clone()).collect()
    }

    fn record(&self, kind: EventKind, sent: bool) {
        let mut stats = self
            .stats
            .entry(kind)
            .or_insert_with(|| DispatchStats::new(kind));
        if sent {
            stats.sent += 1;
            stats.last_sent_at = Some(Utc::now());
        } else {
            stats.skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branch_core::{capture_client, ClientContext};
    use serde_json::json;

    fn config() -> BranchConfig {
        BranchConfig {
            branch_key: "key_12345".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(EventDispatcher::new(BranchConfig::default()).is_err());
    }

    #[test]
    fn test_dispatch_sends_and_counts() {
        let dispatcher = EventDispatcher::new(config()).unwrap();
        let client = capture_client(ClientContext::default());

        let outcome = dispatcher
            .dispatch(&McEvent::new(EventKind::Pageview, Default::default()), client.as_ref())
            .unwrap();
        assert!(outcome.is_sent());
        assert_eq!(client.count(), 1);
        assert_eq!(client.requests()[0], *outcome.request().unwrap());

        let stats = dispatcher.stats(EventKind::Pageview).unwrap();
        assert_eq!(stats.sent, 1);
        assert!(stats.last_sent_at.is_some());
    }

    #[test]
    fn test_unmapped_ecommerce_skipped() {
        let dispatcher = EventDispatcher::new(config()).unwrap();
        let client = capture_client(ClientContext::default());

        let event = McEvent::from_json(EventKind::Ecommerce, json!({ "name": "Order Refunded" }));
        let outcome = dispatcher.dispatch(&event, client.as_ref()).unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped(SkipReason::NotForwarded));
        assert_eq!(client.count(), 0);
        assert_eq!(dispatcher.stats(EventKind::Ecommerce).unwrap().skipped, 1);
    }

    #[test]
    fn test_disabled_ecommerce_unhandled() {
        let dispatcher = EventDispatcher::new(BranchConfig {
            ecommerce: false,
            ..config()
        })
        .unwrap();
        assert!(!dispatcher.handles(EventKind::Ecommerce));

        let client = capture_client(ClientContext::default());
        let event = McEvent::from_json(EventKind::Ecommerce, json!({ "name": "Product Added" }));
        let outcome = dispatcher.dispatch(&event, client.as_ref()).unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped(SkipReason::Unhandled));
        assert_eq!(client.count(), 0);
    }

    #[test]
    fn test_batch() {
        let dispatcher = EventDispatcher::new(config()).unwrap();
        let client = capture_client(ClientContext::default());
        let events = vec![
            McEvent::new(EventKind::Pageview, Default::default()),
            McEvent::from_json(EventKind::Identify, json!({ "identity": "user-1" })),
            McEvent::from_json(EventKind::CustomEvent, json!({ "plan": "pro" })),
            McEvent::new(EventKind::Logout, Default::default()),
        ];

        let outcomes = dispatcher.dispatch_batch(&events, client.as_ref()).unwrap();
        assert_eq!(outcomes.iter().filter(|o| o.is_sent()).count(), 3);
        assert_eq!(client.count(), 3);
        assert_eq!(dispatcher.stats(EventKind::CustomEvent).unwrap().skipped, 1);
        assert_eq!(dispatcher.all_stats().len(), 4);
    }
}
