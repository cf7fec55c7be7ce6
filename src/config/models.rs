// src/config/models.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_LBAAS_TOPIC: &str = "f5_lbaas_process_on_controller";
pub const DEFAULT_CORE_PLUGIN_TOPIC: &str = "q-plugin";
pub const DEFAULT_L2POP_TOPIC: &str = "q-agent-notifier";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Identifier of this agent, sent with most plugin calls.
    pub host: String,

    #[serde(default = "default_topic")]
    pub topic: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_core_plugin_topic")]
    pub core_plugin_topic: String,

    #[serde(default = "default_core_plugin_version")]
    pub core_plugin_version: String,

    #[serde(default = "default_l2pop_topic")]
    pub l2pop_topic: String,

    pub transport: TransportConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base URL of the message bus gateway. Topics are appended as path segments.
    pub url: Url,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("host must not be empty");
        }

        for (name, topic) in [
            ("topic", &self.topic),
            ("core_plugin_topic", &self.core_plugin_topic),
            ("l2pop_topic", &self.l2pop_topic),
        ] {
            if topic.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }

        if self.transport.timeout_secs == 0 {
            bail!("transport.timeout_secs must be greater than zero");
        }

        match self.transport.url.scheme() {
            "http" | "https" => {}
            other => bail!("unsupported transport scheme: {}", other),
        }

        Ok(())
    }
}

fn default_topic() -> String {
    DEFAULT_LBAAS_TOPIC.to_string()
}

fn default_api_version() -> String {
    "1.0".to_string()
}

fn default_core_plugin_topic() -> String {
    DEFAULT_CORE_PLUGIN_TOPIC.to_string()
}

fn default_core_plugin_version() -> String {
    "1.1".to_string()
}

fn default_l2pop_topic() -> String {
    DEFAULT_L2POP_TOPIC.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AgentConfig {
        AgentConfig {
            host: "agent-1".to_string(),
            topic: default_topic(),
            api_version: default_api_version(),
            core_plugin_topic: default_core_plugin_topic(),
            core_plugin_version: default_core_plugin_version(),
            l2pop_topic: default_l2pop_topic(),
            transport: TransportConfig {
                url: Url::parse("http://127.0.0.1:9696/rpc/").unwrap(),
                timeout_secs: 60,
            },
            metrics: MetricsConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = sample();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = sample();
        config.transport.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = sample();
        config.transport.url = Url::parse("amqp://guest@localhost/").unwrap();
        assert!(config.validate().is_err());
    }
}
