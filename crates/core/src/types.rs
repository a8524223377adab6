use serde::{Deserialize, Serialize};

/// Open key/value payload carried by every incoming event.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Event kinds the component listens for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Pageview,
    Identify,
    Logout,
    LifecycleEvent,
    CustomEvent,
    Ecommerce,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Pageview,
        EventKind::Identify,
        EventKind::Logout,
        EventKind::LifecycleEvent,
        EventKind::CustomEvent,
        EventKind::Ecommerce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Pageview => "pageview",
            EventKind::Identify => "identify",
            EventKind::Logout => "logout",
            EventKind::LifecycleEvent => "lifecycle_event",
            EventKind::CustomEvent => "custom_event",
            EventKind::Ecommerce => "ecommerce",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cookie lifetime requested when storing an identifier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CookieScope {
    #[default]
    Infinite,
    Page,
    Session,
}

/// Browser context of the client that produced an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientContext {
    pub url: String,
    pub user_agent: String,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub referer: String,
    pub title: String,
}

impl ClientContext {
    /// Normalized page URL. Falls back to the raw value when it does not parse.
    pub fn href(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.url.clone())
    }

    /// Scheme, host and port of the page URL.
    pub fn origin(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|_| self.url.clone())
    }

    /// Primary language subtag, e.g. `en` for `en-GB`.
    pub fn primary_language(&self) -> &str {
        self.language.split('-').next().unwrap_or_default()
    }
}

/// A fully built outbound request to the Branch API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    /// `application/x-www-form-urlencoded` body.
    pub body: String,
}

impl BranchRequest {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    /// Build a form POST from ordered body fields.
    pub fn form_post<'a, I>(url: impl Into<String>, user_agent: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        Self {
            url: url.into(),
            method: "POST".into(),
            headers: vec![
                ("Content-Type".into(), Self::CONTENT_TYPE.into()),
                ("User-Agent".into(), user_agent.into()),
            ],
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded body fields, in order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    /// First decoded body field with the given name.
    pub fn field(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}
