// src/api/plugin.rs
use super::types::{DeviceDetails, DeviceStatus, TunnelSync};
use crate::rpc::{RpcContext, RpcMessage, RpcProxy};
use crate::transport::{Transport, TransportError};
use serde::de::IgnoredAny;

pub const CORE_PLUGIN_API_VERSION: &str = "1.1";

/// Queries an agent makes against the core network plugin.
///
/// Unlike [`LbaasAgentApi`](super::LbaasAgentApi) the context is supplied per call.
#[derive(Clone)]
pub struct CorePluginApi<T> {
    proxy: RpcProxy<T>,
}

impl<T: Transport> CorePluginApi<T> {
    pub fn new(transport: T, topic: impl Into<String>) -> Self {
        Self::with_version(transport, topic, CORE_PLUGIN_API_VERSION)
    }

    pub fn with_version(transport: T, topic: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            proxy: RpcProxy::new(transport, topic, version),
        }
    }

    pub fn topic(&self) -> &str {
        self.proxy.topic()
    }

    pub fn version(&self) -> &str {
        self.proxy.version()
    }

    pub async fn get_device_details(
        &self,
        context: &RpcContext,
        device: &str,
        agent_id: &str,
    ) -> Result<DeviceDetails, TransportError> {
        let message = RpcMessage::new("get_device_details")
            .arg("device", device)?
            .arg("agent_id", agent_id)?;
        self.proxy.call(context, message).await
    }

    pub async fn update_device_down(
        &self,
        context: &RpcContext,
        device: &str,
        agent_id: &str,
        host: Option<&str>,
    ) -> Result<DeviceStatus, TransportError> {
        let message = RpcMessage::new("update_device_down")
            .arg("device", device)?
            .arg("agent_id", agent_id)?
            .arg("host", host)?;
        self.proxy.call(context, message).await
    }

    pub async fn update_device_up(
        &self,
        context: &RpcContext,
        device: &str,
        agent_id: &str,
        host: Option<&str>,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_device_up")
            .arg("device", device)?
            .arg("agent_id", agent_id)?
            .arg("host", host)?;
        self.proxy.call::<IgnoredAny>(context, message).await?;
        Ok(())
    }

    pub async fn tunnel_sync(
        &self,
        context: &RpcContext,
        tunnel_ip: &str,
        tunnel_type: Option<&str>,
    ) -> Result<TunnelSync, TransportError> {
        let message = RpcMessage::new("tunnel_sync")
            .arg("tunnel_ip", tunnel_ip)?
            .arg("tunnel_type", tunnel_type)?;
        self.proxy.call(context, message).await
    }
}
