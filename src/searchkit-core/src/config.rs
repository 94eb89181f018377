use serde::{Deserialize, Serialize};

/// Configuration for one named connection to the search engine.
///
/// Immutable once resolved into a client; the base URL is derived exactly
/// once at client construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect over https instead of http.
    #[serde(default)]
    pub https: bool,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9200
}

fn default_timeout_ms() -> u64 {
    300_000
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            https: false,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ConnectionConfig {
    /// Base URL for this connection, e.g. `http://127.0.0.1:9200`.
    pub fn base_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}
