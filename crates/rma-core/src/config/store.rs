//! Ticket store connection configuration.

use serde::{Deserialize, Serialize};

/// REST store configuration.
///
/// No request timeout is configured on purpose: the transport default applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the REST store (e.g. `http://localhost:3001`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl StoreConfig {
    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_user_agent() -> String {
    concat!("rma-portal/", env!("CARGO_PKG_VERSION")).to_string()
}
