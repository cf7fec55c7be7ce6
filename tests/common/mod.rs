// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use lbaas_agent_rpc::api::*;
use lbaas_agent_rpc::rpc::{RpcContext, RpcMessage};
use lbaas_agent_rpc::transport::{InMemoryBus, Transport, TransportError};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOPIC: &str = "f5_lbaas_process_on_controller";
pub const HOST: &str = "agent-host-1";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub context: RpcContext,
    pub message: RpcMessage,
}

pub type Journal = Arc<Mutex<Vec<Recorded>>>;

/// Bus with one consumer on `topic` that records every message and answers with `reply`.
pub fn recording_bus(topic: &str, reply: Value) -> (Arc<InMemoryBus>, Journal) {
    let bus = Arc::new(InMemoryBus::new(Duration::from_secs(2)));
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));

    let sink = journal.clone();
    bus.register(topic, move |context, message| {
        let sink = sink.clone();
        let reply = reply.clone();
        async move {
            sink.lock().unwrap().push(Recorded { context, message });
            Ok(reply)
        }
    });

    (bus, journal)
}

pub fn last(journal: &Journal) -> Recorded {
    journal.lock().unwrap().last().cloned().expect("no message recorded")
}

/// Transport that fails every message with a copy of a fixed error.
pub struct FailingTransport {
    pub make_error: fn() -> TransportError,
    pub calls: Mutex<usize>,
}

impl FailingTransport {
    pub fn timing_out() -> Self {
        Self {
            make_error: || TransportError::Timeout,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Transport for FailingTransport {
    async fn call(&self, _: &RpcContext, _: &str, _: &RpcMessage) -> Result<Value, TransportError> {
        *self.calls.lock().unwrap() += 1;
        Err((self.make_error)())
    }

    async fn cast(&self, _: &RpcContext, _: &str, _: &RpcMessage) -> Result<(), TransportError> {
        *self.calls.lock().unwrap() += 1;
        Err((self.make_error)())
    }

    async fn fanout_cast(&self, _: &RpcContext, _: &str, _: &RpcMessage) -> Result<(), TransportError> {
        *self.calls.lock().unwrap() += 1;
        Err((self.make_error)())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Invokes every load-balancer operation once with fixed arguments.
pub async fn invoke_all<T: Transport>(api: &LbaasAgentApi<T>) -> Vec<(&'static str, Result<(), TransportError>)> {
    let update = StatusUpdate::new(EntityStatus::Active).with_description("ok");
    let stats = PoolStats {
        bytes_in: Some(100),
        ..Default::default()
    };

    vec![
        ("get_active_pool_ids", api.get_active_pool_ids().await.map(drop)),
        ("get_pending_pool_ids", api.get_pending_pool_ids().await.map(drop)),
        ("get_service_by_pool_id", api.get_service_by_pool_id("p1", false).await.map(drop)),
        (
            "create_port_on_subnet",
            api.create_port_on_subnet(&CreatePortRequest::default()).await.map(drop),
        ),
        (
            "create_port_on_subnet_with_specific_ip",
            api.create_port_on_subnet_with_specific_ip(&CreatePortWithIpRequest::default())
                .await
                .map(drop),
        ),
        ("get_port_by_name", api.get_port_by_name(Some("vip-port")).await.map(drop)),
        ("delete_port", api.delete_port(Some("port-1"), None).await),
        ("delete_port_by_name", api.delete_port_by_name(Some("vip-port")).await),
        (
            "allocate_fixed_address_on_subnet",
            api.allocate_fixed_address_on_subnet(&AllocateAddressRequest::default())
                .await
                .map(drop),
        ),
        (
            "allocate_specific_fixed_address_on_subnet",
            api.allocate_specific_fixed_address_on_subnet(&AllocateSpecificAddressRequest::default())
                .await
                .map(drop),
        ),
        (
            "deallocate_fixed_address_on_subnet",
            api.deallocate_fixed_address_on_subnet(&DeallocateAddressRequest::default()).await,
        ),
        ("update_vip_status", api.update_vip_status(Some("v1"), &update).await),
        ("vip_destroyed", api.vip_destroyed(Some("v1")).await),
        ("update_pool_status", api.update_pool_status(Some("p1"), &update).await),
        ("pool_destroyed", api.pool_destroyed("p1").await),
        ("update_member_status", api.update_member_status(Some("m1"), &update).await),
        ("member_destroyed", api.member_destroyed("m1").await),
        (
            "update_health_monitor_status",
            api.update_health_monitor_status(Some("p1"), Some("hm1"), &update).await,
        ),
        ("health_monitor_destroyed", api.health_monitor_destroyed(Some("hm1"), Some("p1")).await),
        ("update_pool_stats", api.update_pool_stats("p1", &stats).await),
    ]
}
