//! Configuration schema for FeedTrack.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root config shared by the server, client, and CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedTrackConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Headroom on top of the model chain when waiting on the server.
const SERVER_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

impl FeedTrackConfig {
    /// How long a client waits on the server. A submission may walk every
    /// configured model, each bounded by `ai.request_timeout_secs`.
    pub fn server_request_timeout(&self) -> Duration {
        let models = self.ai.models.len().max(1) as u32;
        Duration::from_secs(self.ai.request_timeout_secs)
            .saturating_mul(models)
            .saturating_add(SERVER_TIMEOUT_SLACK)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_body_limit_bytes() -> usize {
    10 * 1024
}

/// Remote classification service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Literal API key; takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifiers tried first to last.
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            models: default_models(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AiConfig {
    /// Resolve the credential from config or the process environment.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        let explicit = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty());
        if let Some(key) = explicit {
            return Some(key.to_string());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_models() -> Vec<String> {
    [
        "gemini-1.5-flash",
        "gemini-1.5-flash-001",
        "gemini-1.5-flash-8b",
        "gemini-2.0-flash-exp",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Durable storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for the durable feedback log. Unset runs on the in-memory
    /// fallback store only.
    #[serde(default)]
    pub path: Option<String>,
}

/// Insight generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Number of most recent records fed to the aggregator.
    #[serde(default = "default_insight_window")]
    pub window: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            window: default_insight_window(),
        }
    }
}

fn default_insight_window() -> usize {
    50
}

/// Settings for the HTTP client and its offline mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:5000/api".to_string()
}

#[cfg(test)]
mod tests {
    use super::FeedTrackConfig;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn server_timeout_covers_the_whole_model_chain() {
        let mut config = FeedTrackConfig::default();
        assert_eq!(config.ai.models.len(), 4);
        assert_eq!(config.server_request_timeout(), Duration::from_secs(4 * 30 + 5));

        config.ai.models = vec!["only".to_string()];
        config.ai.request_timeout_secs = 2;
        assert_eq!(config.server_request_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn server_timeout_with_no_models_keeps_one_budget() {
        let mut config = FeedTrackConfig::default();
        config.ai.models.clear();
        config.ai.request_timeout_secs = 1;
        assert_eq!(config.server_request_timeout(), Duration::from_secs(6));
    }
}
