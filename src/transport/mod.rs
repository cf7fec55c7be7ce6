// src/transport/mod.rs
mod error;
mod http;
mod instrumented;
mod memory;

pub use error::TransportError;
pub use http::HttpTransport;
pub use instrumented::InstrumentedTransport;
pub use memory::{HandlerFuture, InMemoryBus, MessageHandler};

use crate::rpc::{RpcContext, RpcMessage};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Message bus capability the RPC clients are built on.
///
/// Implementations own delivery, timeouts and serialization; callers get
/// whatever reply or error the bus produces.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `message` to `topic` and waits for the correlated reply.
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError>;

    /// Sends `message` to one consumer of `topic` without waiting for a reply.
    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError>;

    /// Sends `message` to every consumer of `topic`.
    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError>;

    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError> {
        (**self).call(context, topic, message).await
    }

    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        (**self).cast(context, topic, message).await
    }

    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        (**self).fanout_cast(context, topic, message).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError> {
        (**self).call(context, topic, message).await
    }

    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        (**self).cast(context, topic, message).await
    }

    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        (**self).fanout_cast(context, topic, message).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
