use serde::Deserialize;

use crate::error::{BranchError, BranchResult};

/// Component settings. Loaded from environment variables with the prefix
/// `BRANCH_MC__`; CLI flags override individual values.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchConfig {
    #[serde(default)]
    pub branch_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Forward ecommerce events. Other event kinds are always forwarded.
    #[serde(default = "default_ecommerce")]
    pub ecommerce: bool,
    /// Used as `User-Agent` when the client context carries none.
    #[serde(default = "default_user_agent_fallback")]
    pub user_agent_fallback: String,
}

fn default_api_base_url() -> String {
    "https://api2.branch.io".to_string()
}
fn default_ecommerce() -> bool {
    true
}
fn default_user_agent_fallback() -> String {
    "branch-relay".to_string()
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            branch_key: String::new(),
            api_base_url: default_api_base_url(),
            ecommerce: default_ecommerce(),
            user_agent_fallback: default_user_agent_fallback(),
        }
    }
}

impl BranchConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BRANCH_MC")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn validate(&self) -> BranchResult<()> {
        if self.branch_key.trim().is_empty() {
            return Err(BranchError::Config("branch_key must not be empty".into()));
        }
        url::Url::parse(&self.api_base_url).map_err(|e| {
            BranchError::Config(format!(
                "api_base_url '{}' is not a valid URL: {e}",
                self.api_base_url
            ))
        })?;
        Ok(())
    }

    /// Join an API path (e.g. `/v1/pageview`) onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}
