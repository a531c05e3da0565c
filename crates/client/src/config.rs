//! Client configuration.
//!
//! Usually built in code, but can also be read from TOML:
//!
//! ```toml
//! access_token = "..."
//! chunk_size = 4194304
//! max_chunks = 1024
//! ```

use std::path::Path;
use std::time::Duration;

use pcs_protocol::constants::{DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, MAX_BLOCK_COUNT};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth access token appended to every request.
    #[serde(default)]
    pub access_token: String,

    /// REST root; override to target a test server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Files up to this size are sent and fetched in one request; larger
    /// ones are staged and downloaded in chunks of this size.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    /// Most blocks a staged upload may use before the chunk size is doubled.
    #[serde(default = "default_max_chunks")]
    pub max_chunks: u64,

    /// Per-request timeout in seconds (0 = no timeout).
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

fn default_max_chunks() -> u64 {
    MAX_BLOCK_COUNT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_base_url(),
            chunk_size: default_chunk_size(),
            max_chunks: default_max_chunks(),
            timeout_secs: 0,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Rejects values the transfer pipelines cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.access_token.trim().is_empty() {
            return Err(Error::Config("access_token is empty".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than zero".into()));
        }
        if self.max_chunks == 0 {
            return Err(Error::Config("max_chunks must be greater than zero".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
