//! Configuration types for nzb-grab

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Library configuration
///
/// All fields have sensible defaults so `Config::default()` works out of the
/// box. Download-link construction reads `base_url`, `external_url`,
/// `use_local_url_for_api` and `api_key` at call time; it never mutates them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL the application itself is reachable at (default: "http://127.0.0.1:5076")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Externally visible URL, if the application is published under a
    /// different address (reverse proxy, port forward)
    #[serde(default)]
    pub external_url: Option<String>,

    /// Use the local base URL for API links even when an external URL is configured
    #[serde(default)]
    pub use_local_url_for_api: bool,

    /// API key appended to externally consumable download links
    ///
    /// When unset, API links are built without a key; rejecting
    /// unauthenticated API access is the embedding web layer's job.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout for proxied origin fetches in seconds (default: 30)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Path to the SQLite database file (default: "./nzb-grab.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            external_url: None,
            use_local_url_for_api: false,
            api_key: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            database_path: default_database_path(),
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// Checks that configured URLs parse and the fetch timeout is nonzero.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url '{}': {}", self.base_url, e),
            key: Some("base_url".to_string()),
        })?;

        if let Some(external) = &self.external_url {
            url::Url::parse(external).map_err(|e| Error::Config {
                message: format!("invalid external_url '{}': {}", external, e),
                key: Some("external_url".to_string()),
            })?;
        }

        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config {
                message: "fetch_timeout_secs must be greater than zero".to_string(),
                key: Some("fetch_timeout_secs".to_string()),
            });
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5076".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./nzb-grab.db")
}
