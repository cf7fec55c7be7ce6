// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use std::path::Path;

/// Prefix of environment variables overriding file settings,
/// e.g. `LBAAS_AGENT_HOST` or `LBAAS_AGENT_TRANSPORT__TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "LBAAS_AGENT";

/// Load configuration from a file (YAML or JSON) with environment overrides
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<AgentConfig> {
    load_config_with_prefix(path, ENV_PREFIX).await
}

pub async fn load_config_with_prefix<P: AsRef<Path>>(path: P, env_prefix: &str) -> Result<AgentConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let format = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => FileFormat::Json,
    };

    let config: AgentConfig = config::Config::builder()
        .add_source(File::from_str(&contents, format))
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to parse config")?
        .try_deserialize()
        .context("Invalid config")?;

    config.validate()?;
    Ok(config)
}
