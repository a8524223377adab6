//! Body params and user-data block shared by every Branch request.

use branch_core::{BranchConfig, ClientHandle};
use serde::Serialize;

use crate::cookies::BranchIdentifiers;

pub const SDK: &str = "web";
pub const SDK_VERSION: &str = "2.71.0";

/// `sdk` body field, e.g. `web2.71.0`.
pub fn full_sdk_version() -> String {
    format!("{SDK}{SDK_VERSION}")
}

/// Ordered form fields for the v1 endpoints: SDK, key, the three identifiers
/// and the developer identity when one is set.
pub fn generic_body_params(client: &dyn ClientHandle, branch_key: &str) -> Vec<(&'static str, String)> {
    let ids = BranchIdentifiers::resolve(client);
    let mut params = vec![
        ("sdk", full_sdk_version()),
        ("branch_key", branch_key.to_string()),
        ("identity_id", ids.identity_id),
        ("browser_fingerprint_id", ids.browser_fingerprint_id),
        ("session_id", ids.session_id),
    ];
    if let Some(identity) = ids.identity {
        params.push(("identity", identity));
    }
    params
}

/// `user_data` block of the v2 event endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub http_origin: String,
    pub user_agent: String,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub http_referrer: String,
    pub browser_fingerprint_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_identity: Option<String>,
    pub sdk: &'static str,
    pub sdk_version: &'static str,
}

impl UserData {
    pub fn collect(client: &dyn ClientHandle) -> Self {
        let ids = BranchIdentifiers::resolve(client);
        let ctx = client.context();
        Self {
            http_origin: ctx.origin(),
            user_agent: ctx.user_agent.clone(),
            language: ctx.language.clone(),
            screen_width: ctx.screen_width,
            screen_height: ctx.screen_height,
            http_referrer: ctx.referer.clone(),
            browser_fingerprint_id: ids.browser_fingerprint_id,
            identity: ids.identity.clone(),
            developer_identity: ids.identity,
            sdk: SDK,
            sdk_version: SDK_VERSION,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `User-Agent` header value, falling back to the configured default.
pub fn user_agent<'a>(client: &'a dyn ClientHandle, config: &'a BranchConfig) -> &'a str {
    let ua = client.context().user_agent.as_str();
    if ua.is_empty() {
        &config.user_agent_fallback
    } else {
        ua
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branch_core::{CaptureClient, ClientContext};
    use serde_json::Value;

    fn client() -> CaptureClient {
        CaptureClient::new(ClientContext {
            url: "http://127.0.0.1:1337".into(),
            user_agent: "Mozilla/5.0".into(),
            language: "en-GB".into(),
            screen_width: 2560,
            screen_height: 1080,
            ..Default::default()
        })
        .with_cookies([
            ("identity_id", "12345678901234"),
            ("browser_fingerprint_id", "12345678901235"),
            ("session_id", "12345678901236"),
        ])
    }

    #[test]
    fn test_generic_params_order() {
        let params = generic_body_params(&client(), "key_12345");
        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            ["sdk", "branch_key", "identity_id", "browser_fingerprint_id", "session_id"]
        );
        assert_eq!(params[0].1, "web2.71.0");
        assert_eq!(params[3].1, "12345678901235");
    }

    #[test]
    fn test_generic_params_with_identity() {
        let client = client().with_cookies([("identity", "identity_12345")]);
        let params = generic_body_params(&client, "key_12345");
        assert_eq!(params.last().unwrap(), &("identity", "identity_12345".to_string()));
    }

    #[test]
    fn test_user_data_without_identity() {
        let json: Value = serde_json::from_str(&UserData::collect(&client()).to_json().unwrap()).unwrap();
        assert_eq!(json["http_origin"], "http://127.0.0.1:1337");
        assert_eq!(json["screen_width"], 2560);
        assert_eq!(json["browser_fingerprint_id"], "12345678901235");
        assert_eq!(json["sdk"], "web");
        assert_eq!(json["sdk_version"], "2.71.0");
        assert!(json.get("identity").is_none());
        assert!(json.get("developer_identity").is_none());
    }

    #[test]
    fn test_user_agent_fallback() {
        let config = BranchConfig::default();
        let anonymous = CaptureClient::new(ClientContext::default());
        assert_eq!(user_agent(&anonymous, &config), "branch-relay");
        assert_eq!(user_agent(&client(), &config), "Mozilla/5.0");
    }
}
