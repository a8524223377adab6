//! Branch identifier cookies.

use branch_core::{ClientHandle, CookieScope};
use rand::Rng;
use tracing::debug;

pub const IDENTITY_ID: &str = "identity_id";
pub const BROWSER_FINGERPRINT_ID: &str = "browser_fingerprint_id";
pub const SESSION_ID: &str = "session_id";
/// Developer identity set by identify and cleared by logout.
pub const IDENTITY: &str = "identity";

const MIN_BRANCH_NUMBER: u64 = 10_000_000_000_001;
const MAX_BRANCH_NUMBER: u64 = 20_000_000_000_000;

/// Random 14-digit identifier in the range Branch issues.
pub fn random_branch_number() -> String {
    rand::thread_rng()
        .gen_range(MIN_BRANCH_NUMBER..=MAX_BRANCH_NUMBER)
        .to_string()
}

/// Read a cookie, issuing and storing a fresh identifier when it is absent.
pub fn get_or_create_cookie(client: &dyn ClientHandle, key: &str, scope: CookieScope) -> String {
    if let Some(existing) = client.get(key) {
        return existing;
    }
    let issued = random_branch_number();
    client.set(key, Some(issued.as_str()), scope);
    debug!(cookie = key, ?scope, "issued branch identifier");
    issued
}

/// The three identifiers attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchIdentifiers {
    pub identity_id: String,
    pub browser_fingerprint_id: String,
    pub session_id: String,
    pub identity: Option<String>,
}

impl BranchIdentifiers {
    pub fn resolve(client: &dyn ClientHandle) -> Self {
        Self {
            identity_id: get_or_create_cookie(client, IDENTITY_ID, CookieScope::Infinite),
            browser_fingerprint_id: get_or_create_cookie(
                client,
                BROWSER_FINGERPRINT_ID,
                CookieScope::Infinite,
            ),
            session_id: get_or_create_cookie(client, SESSION_ID, CookieScope::Session),
            identity: client.get(IDENTITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branch_core::{CaptureClient, ClientContext};

    #[test]
    fn test_random_branch_number_shape() {
        for _ in 0..100 {
            let n = random_branch_number();
            assert_eq!(n.len(), 14);
            assert!(n.chars().all(|c| c.is_ascii_digit()));
            let v: u64 = n.parse().unwrap();
            assert!((MIN_BRANCH_NUMBER..=MAX_BRANCH_NUMBER).contains(&v));
        }
    }

    #[test]
    fn test_existing_cookie_kept() {
        let client = CaptureClient::new(ClientContext::default())
            .with_cookies([(IDENTITY_ID, "12345678901234")]);
        assert_eq!(
            get_or_create_cookie(&client, IDENTITY_ID, CookieScope::Infinite),
            "12345678901234"
        );
    }

    #[test]
    fn test_missing_cookie_issued_with_scope() {
        let client = CaptureClient::new(ClientContext::default());
        let ids = BranchIdentifiers::resolve(&client);

        assert_eq!(client.cookie(SESSION_ID).unwrap().value, ids.session_id);
        assert_eq!(client.cookie(SESSION_ID).unwrap().scope, CookieScope::Session);
        assert_eq!(client.cookie(IDENTITY_ID).unwrap().scope, CookieScope::Infinite);
        assert!(ids.identity.is_none());

        // Second resolve reuses the issued identifiers
        assert_eq!(BranchIdentifiers::resolve(&client), ids);
    }
}
