use serde::{Deserialize, Serialize};

use crate::reconciler::ReconcileConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub reconcile: ReconcileConfig,
}

/// qBittorrent WebUI connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the WebUI (e.g., "http://localhost:8080")
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Accept invalid TLS certificates for this connection only (default: false)
    #[serde(default)]
    pub insecure_tls: bool,
}

fn default_timeout() -> u32 {
    10
}

/// Sanitized config for logging (password redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: SanitizedServerConfig,
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedServerConfig {
    pub url: String,
    pub username: String,
    pub password_configured: bool,
    pub timeout_secs: u32,
    pub insecure_tls: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: SanitizedServerConfig {
                url: config.server.url.clone(),
                username: config.server.username.clone(),
                password_configured: !config.server.password.is_empty(),
                timeout_secs: config.server.timeout_secs,
                insecure_tls: config.server.insecure_tls,
            },
            reconcile: config.reconcile.clone(),
        }
    }
}
