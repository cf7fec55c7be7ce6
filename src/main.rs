// src/main.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use lbaas_agent_rpc::{
    api::AgentApis,
    config::{load_config, AgentConfig},
    metrics::MetricsRegistry,
    rpc::RpcContext,
    transport::{HttpTransport, InstrumentedTransport, Transport},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lbaas_agent_rpc=debug".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "agent.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = load_config(&config_path).await?;

    let metrics_registry = MetricsRegistry::new()?;
    let transport = build_transport(&config, &metrics_registry)?;

    probe(&config, transport).await?;

    if config.metrics.enabled {
        debug!("RPC metrics:\n{}", metrics_registry.gather()?);
    }

    Ok(())
}

fn build_transport(config: &AgentConfig, registry: &MetricsRegistry) -> Result<Arc<dyn Transport>> {
    let http = HttpTransport::new(&config.transport).context("Failed to create HTTP transport")?;
    info!("Using message bus gateway at {}", config.transport.url);

    if config.metrics.enabled {
        Ok(Arc::new(InstrumentedTransport::new(http, registry.collector())))
    } else {
        Ok(Arc::new(http))
    }
}

/// Checks that the plugin answers this agent and reports what it would work on.
async fn probe(config: &AgentConfig, transport: Arc<dyn Transport>) -> Result<()> {
    let apis = AgentApis::from_config(config, transport, RpcContext::admin());
    info!(
        "Load balancer topic {} (v{}), core plugin topic {} (v{}), l2 population topic {}",
        apis.lbaas.topic(),
        apis.lbaas.version(),
        apis.core.topic(),
        apis.core.version(),
        apis.l2pop.update_topic()
    );

    let lbaas = &apis.lbaas;

    let active = lbaas
        .get_active_pool_ids()
        .await
        .context("get_active_pool_ids failed")?;
    let pending = lbaas
        .get_pending_pool_ids()
        .await
        .context("get_pending_pool_ids failed")?;

    info!(
        "Host {} has {} active and {} pending pools",
        config.host,
        active.len(),
        pending.len()
    );

    for pool_id in &pending {
        match lbaas.get_service_by_pool_id(pool_id, false).await {
            Ok(service) => info!(
                "Pool {}: vip={} members={} monitors={}",
                pool_id,
                service.vip.as_ref().and_then(|v| v.id.as_deref()).unwrap_or("-"),
                service.members.len(),
                service.health_monitors.len()
            ),
            Err(e) => warn!("Failed to fetch service for pool {}: {}", pool_id, e),
        }
    }

    Ok(())
}
