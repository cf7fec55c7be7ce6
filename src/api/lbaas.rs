// src/api/lbaas.rs
use super::types::*;
use crate::rpc::{RpcContext, RpcMessage, RpcProxy};
use crate::transport::{Transport, TransportError};
use serde::de::{DeserializeOwned, IgnoredAny};

pub const LBAAS_API_VERSION: &str = "1.0";

/// Agent side of the agent to plugin load-balancer API.
///
/// Topic, context and host are fixed at construction and reused for every
/// call. Optional arguments left as `None` are sent as explicit nulls so the
/// plugin always sees the full argument set of an operation.
#[derive(Clone)]
pub struct LbaasAgentApi<T> {
    proxy: RpcProxy<T>,
    context: RpcContext,
    host: String,
}

impl<T: Transport> LbaasAgentApi<T> {
    pub fn new(transport: T, topic: impl Into<String>, context: RpcContext, host: impl Into<String>) -> Self {
        Self::with_version(transport, topic, LBAAS_API_VERSION, context, host)
    }

    pub fn with_version(
        transport: T,
        topic: impl Into<String>,
        version: impl Into<String>,
        context: RpcContext,
        host: impl Into<String>,
    ) -> Self {
        Self {
            proxy: RpcProxy::new(transport, topic, version),
            context,
            host: host.into(),
        }
    }

    pub fn topic(&self) -> &str {
        self.proxy.topic()
    }

    pub fn version(&self) -> &str {
        self.proxy.version()
    }

    pub fn context(&self) -> &RpcContext {
        &self.context
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    async fn call<R: DeserializeOwned>(&self, message: RpcMessage) -> Result<R, TransportError> {
        self.proxy.call(&self.context, message).await
    }

    /// For notifications whose reply carries no meaning; any payload is accepted.
    async fn call_ignoring_reply(&self, message: RpcMessage) -> Result<(), TransportError> {
        self.call::<IgnoredAny>(message).await?;
        Ok(())
    }

    /// Ids of pools this agent should have deployed.
    pub async fn get_active_pool_ids(&self) -> Result<Vec<String>, TransportError> {
        let message = RpcMessage::new("get_active_pool_ids").arg("host", &self.host)?;
        self.call(message).await
    }

    /// Ids of pools with pending changes for this agent.
    pub async fn get_pending_pool_ids(&self) -> Result<Vec<String>, TransportError> {
        let message = RpcMessage::new("get_pending_pool_ids").arg("host", &self.host)?;
        self.call(message).await
    }

    pub async fn get_service_by_pool_id(
        &self,
        pool_id: &str,
        global_routed_mode: bool,
    ) -> Result<ServiceDescription, TransportError> {
        let message = RpcMessage::new("get_service_by_pool_id")
            .arg("pool_id", pool_id)?
            .arg("global_routed_mode", global_routed_mode)?
            .arg("host", &self.host)?;
        self.call(message).await
    }

    pub async fn create_port_on_subnet(
        &self,
        request: &CreatePortRequest,
    ) -> Result<Option<Port>, TransportError> {
        let message = RpcMessage::new("create_port_on_subnet")
            .args(request)?
            .arg("host", &self.host)?;
        self.call(message).await
    }

    pub async fn create_port_on_subnet_with_specific_ip(
        &self,
        request: &CreatePortWithIpRequest,
    ) -> Result<Option<Port>, TransportError> {
        let message = RpcMessage::new("create_port_on_subnet_with_specific_ip")
            .args(request)?
            .arg("host", &self.host)?;
        self.call(message).await
    }

    pub async fn get_port_by_name(&self, port_name: Option<&str>) -> Result<Vec<Port>, TransportError> {
        let message = RpcMessage::new("get_port_by_name").arg("port_name", port_name)?;
        self.call(message).await
    }

    pub async fn delete_port(
        &self,
        port_id: Option<&str>,
        mac_address: Option<&str>,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("delete_port")
            .arg("port_id", port_id)?
            .arg("mac_address", mac_address)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn delete_port_by_name(&self, port_name: Option<&str>) -> Result<(), TransportError> {
        let message = RpcMessage::new("delete_port_by_name").arg("port_name", port_name)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn allocate_fixed_address_on_subnet(
        &self,
        request: &AllocateAddressRequest,
    ) -> Result<Option<Port>, TransportError> {
        let message = RpcMessage::new("allocate_fixed_address_on_subnet")
            .args(request)?
            .arg("host", &self.host)?;
        self.call(message).await
    }

    pub async fn allocate_specific_fixed_address_on_subnet(
        &self,
        request: &AllocateSpecificAddressRequest,
    ) -> Result<Option<Port>, TransportError> {
        let message = RpcMessage::new("allocate_specific_fixed_address_on_subnet")
            .args(request)?
            .arg("host", &self.host)?;
        self.call(message).await
    }

    /// Releases addresses; with `auto_delete_port` the plugin also removes a port left without any.
    pub async fn deallocate_fixed_address_on_subnet(
        &self,
        request: &DeallocateAddressRequest,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("deallocate_fixed_address_on_subnet")
            .args(request)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn update_vip_status(
        &self,
        vip_id: Option<&str>,
        update: &StatusUpdate,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_vip_status")
            .arg("vip_id", vip_id)?
            .args(update)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn vip_destroyed(&self, vip_id: Option<&str>) -> Result<(), TransportError> {
        let message = RpcMessage::new("vip_destroyed")
            .arg("vip_id", vip_id)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn update_pool_status(
        &self,
        pool_id: Option<&str>,
        update: &StatusUpdate,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_pool_status")
            .arg("pool_id", pool_id)?
            .args(update)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn pool_destroyed(&self, pool_id: &str) -> Result<(), TransportError> {
        let message = RpcMessage::new("pool_destroyed")
            .arg("pool_id", pool_id)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn update_member_status(
        &self,
        member_id: Option<&str>,
        update: &StatusUpdate,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_member_status")
            .arg("member_id", member_id)?
            .args(update)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn member_destroyed(&self, member_id: &str) -> Result<(), TransportError> {
        let message = RpcMessage::new("member_destroyed")
            .arg("member_id", member_id)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn update_health_monitor_status(
        &self,
        pool_id: Option<&str>,
        health_monitor_id: Option<&str>,
        update: &StatusUpdate,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_health_monitor_status")
            .arg("pool_id", pool_id)?
            .arg("health_monitor_id", health_monitor_id)?
            .args(update)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn health_monitor_destroyed(
        &self,
        health_monitor_id: Option<&str>,
        pool_id: Option<&str>,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new("health_monitor_destroyed")
            .arg("health_monitor_id", health_monitor_id)?
            .arg("pool_id", pool_id)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }

    pub async fn update_pool_stats(&self, pool_id: &str, stats: &PoolStats) -> Result<(), TransportError> {
        let message = RpcMessage::new("update_pool_stats")
            .arg("pool_id", pool_id)?
            .arg("stats", stats)?
            .arg("host", &self.host)?;
        self.call_ignoring_reply(message).await
    }
}
