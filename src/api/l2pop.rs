// src/api/l2pop.rs
use super::types::FdbEntries;
use crate::rpc::{RpcContext, RpcMessage, RpcProxy};
use crate::transport::{Transport, TransportError};
use serde::Serialize;
use serde_json::Value;

pub const L2POP_API_VERSION: &str = "1.0";

/// Forwarding-database notifications sent to L2 agents.
///
/// Entries addressed to a host go to that host's queue; otherwise they are
/// broadcast to every agent listening on the update topic.
#[derive(Clone)]
pub struct L2PopulationApi<T> {
    proxy: RpcProxy<T>,
    update_topic: String,
}

impl<T: Transport> L2PopulationApi<T> {
    /// `topic` is the agent notifier base topic, e.g. `q-agent-notifier`.
    pub fn new(transport: T, topic: &str) -> Self {
        let update_topic = format!("{}-l2population-update", topic);
        Self {
            proxy: RpcProxy::new(transport, update_topic.clone(), L2POP_API_VERSION),
            update_topic,
        }
    }

    pub fn update_topic(&self) -> &str {
        &self.update_topic
    }

    pub fn host_topic(&self, host: &str) -> String {
        format!("{}.{}", self.update_topic, host)
    }

    async fn notify<E: Serialize + ?Sized>(
        &self,
        context: &RpcContext,
        method: &str,
        fdb_entries: &E,
        host: Option<&str>,
    ) -> Result<(), TransportError> {
        let message = RpcMessage::new(method).arg("fdb_entries", fdb_entries)?;
        match host {
            Some(host) => {
                let topic = self.host_topic(host);
                self.proxy.cast_to(context, &topic, message).await
            }
            None => {
                self.proxy
                    .fanout_cast_to(context, &self.update_topic, message)
                    .await
            }
        }
    }

    pub async fn add_fdb_entries(
        &self,
        context: &RpcContext,
        fdb_entries: &FdbEntries,
        host: Option<&str>,
    ) -> Result<(), TransportError> {
        self.notify(context, "add_fdb_entries", fdb_entries, host).await
    }

    pub async fn remove_fdb_entries(
        &self,
        context: &RpcContext,
        fdb_entries: &FdbEntries,
        host: Option<&str>,
    ) -> Result<(), TransportError> {
        self.notify(context, "remove_fdb_entries", fdb_entries, host).await
    }

    /// Update payloads (e.g. `chg_ip` maps) have no fixed schema.
    pub async fn update_fdb_entries(
        &self,
        context: &RpcContext,
        fdb_entries: &Value,
        host: Option<&str>,
    ) -> Result<(), TransportError> {
        self.notify(context, "update_fdb_entries", fdb_entries, host).await
    }
}
