// src/rpc/proxy.rs
use super::{RpcContext, RpcMessage};
use crate::transport::{Transport, TransportError};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed call helper bound to one topic and API version.
///
/// Stamps the version on outgoing messages, hands them to the transport and
/// decodes replies into the caller's type. Errors are returned unchanged.
#[derive(Clone)]
pub struct RpcProxy<T> {
    transport: T,
    topic: String,
    version: String,
}

impl<T: Transport> RpcProxy<T> {
    pub fn new(transport: T, topic: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            transport,
            topic: topic.into(),
            version: version.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn stamp(&self, message: RpcMessage) -> RpcMessage {
        if message.version.is_some() {
            message
        } else {
            message.with_version(self.version.clone())
        }
    }

    /// Sends `message` to the proxy's topic and decodes the reply.
    pub async fn call<R: DeserializeOwned>(
        &self,
        context: &RpcContext,
        message: RpcMessage,
    ) -> Result<R, TransportError> {
        let message = self.stamp(message);
        debug!(
            "call {} on topic {} args={:?}",
            message.method, self.topic, message.args
        );
        let reply = self.transport.call(context, &self.topic, &message).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// One-way send to `topic`, which may differ from the proxy's own.
    pub async fn cast_to(
        &self,
        context: &RpcContext,
        topic: &str,
        message: RpcMessage,
    ) -> Result<(), TransportError> {
        let message = self.stamp(message);
        debug!("cast {} on topic {}", message.method, topic);
        self.transport.cast(context, topic, &message).await
    }

    pub async fn fanout_cast_to(
        &self,
        context: &RpcContext,
        topic: &str,
        message: RpcMessage,
    ) -> Result<(), TransportError> {
        let message = self.stamp(message);
        debug!("fanout_cast {} on topic {}", message.method, topic);
        self.transport.fanout_cast(context, topic, &message).await
    }
}
