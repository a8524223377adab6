//! Client boundary: cookie storage and outbound fetch for the browser that
//! produced an event.
//!
//! Handlers accept a `&dyn ClientHandle` so the same request-building code
//! runs against a live edge runtime, the CLI relay, or an in-memory capture.

use crate::types::{BranchRequest, ClientContext, CookieScope};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-client capabilities a handler may use. `fetch` is fire-and-forget:
/// no result is awaited and nothing is retried.
pub trait ClientHandle: Send + Sync {
    fn context(&self) -> &ClientContext;

    fn get(&self, key: &str) -> Option<String>;

    /// Store a cookie. `None` clears it.
    fn set(&self, key: &str, value: Option<&str>, scope: CookieScope);

    fn fetch(&self, request: BranchRequest);
}

/// A stored cookie value with the scope it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub value: String,
    pub scope: CookieScope,
}

/// In-memory client that keeps a cookie jar and records every fetch.
#[derive(Default)]
pub struct CaptureClient {
    context: ClientContext,
    cookies: Mutex<HashMap<String, StoredCookie>>,
    requests: Mutex<Vec<BranchRequest>>,
}

impl CaptureClient {
    pub fn new(context: ClientContext) -> Self {
        Self {
            context,
            cookies: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Seed the jar with existing cookies.
    pub fn with_cookies<I, K, V>(self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        {
            let mut jar = self.cookies.lock().expect("cookie jar mutex poisoned");
            for (key, value) in cookies {
                jar.insert(
                    key.into(),
                    StoredCookie {
                        value: value.into(),
                        scope: CookieScope::default(),
                    },
                );
            }
        }
        self
    }

    pub fn cookie(&self, key: &str) -> Option<StoredCookie> {
        self.cookies
            .lock()
            .expect("cookie jar mutex poisoned")
            .get(key)
            .cloned()
    }

    pub fn cookies(&self) -> HashMap<String, StoredCookie> {
        self.cookies.lock().expect("cookie jar mutex poisoned").clone()
    }

    pub fn requests(&self) -> Vec<BranchRequest> {
        self.requests.lock().expect("request log mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().expect("request log mutex poisoned").len()
    }

    /// Drain recorded requests.
    pub fn take_requests(&self) -> Vec<BranchRequest> {
        std::mem::take(&mut *self.requests.lock().expect("request log mutex poisoned"))
    }
}

impl ClientHandle for CaptureClient {
    fn context(&self) -> &ClientContext {
        &self.context
    }

    fn get(&self, key: &str) -> Option<String> {
        self.cookie(key).map(|c| c.value).filter(|v| !v.is_empty())
    }

    fn set(&self, key: &str, value: Option<&str>, scope: CookieScope) {
        let mut jar = self.cookies.lock().expect("cookie jar mutex poisoned");
        jar.insert(
            key.to_string(),
            StoredCookie {
                value: value.unwrap_or_default().to_string(),
                scope,
            },
        );
    }

    fn fetch(&self, request: BranchRequest) {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .push(request);
    }
}

/// Convenience: create a capture client for tests and dry runs.
pub fn capture_client(context: ClientContext) -> Arc<CaptureClient> {
    Arc::new(CaptureClient::new(context))
}
