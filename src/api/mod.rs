mod l2pop;
mod lbaas;
mod plugin;
mod types;

pub use l2pop::{L2PopulationApi, L2POP_API_VERSION};
pub use lbaas::{LbaasAgentApi, LBAAS_API_VERSION};
pub use plugin::{CorePluginApi, CORE_PLUGIN_API_VERSION};
pub use types::*;

use crate::config::AgentConfig;
use crate::rpc::RpcContext;
use crate::transport::Transport;

/// The three plugin-facing clients an agent needs, sharing one transport.
#[derive(Clone)]
pub struct AgentApis<T> {
    pub lbaas: LbaasAgentApi<T>,
    pub core: CorePluginApi<T>,
    pub l2pop: L2PopulationApi<T>,
}

impl<T: Transport + Clone> AgentApis<T> {
    pub fn from_config(config: &AgentConfig, transport: T, context: RpcContext) -> Self {
        Self {
            lbaas: LbaasAgentApi::with_version(
                transport.clone(),
                &config.topic,
                &config.api_version,
                context,
                &config.host,
            ),
            core: CorePluginApi::with_version(
                transport.clone(),
                &config.core_plugin_topic,
                &config.core_plugin_version,
            ),
            l2pop: L2PopulationApi::new(transport, &config.l2pop_topic),
        }
    }
}
