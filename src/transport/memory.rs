// src/transport/memory.rs
use super::{Transport, TransportError};
use crate::rpc::{RpcContext, RpcMessage};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub type HandlerFuture = BoxFuture<'static, Result<Value, TransportError>>;
pub type MessageHandler = Arc<dyn Fn(RpcContext, RpcMessage) -> HandlerFuture + Send + Sync>;

/// In-process bus that routes messages to handlers registered per topic.
///
/// Calls and casts go to one consumer of the topic, chosen round robin;
/// fanout casts go to all of them.
pub struct InMemoryBus {
    consumers: DashMap<String, Vec<MessageHandler>>,
    counter: AtomicUsize,
    timeout: Duration,
}

impl InMemoryBus {
    pub fn new(timeout: Duration) -> Self {
        Self {
            consumers: DashMap::new(),
            counter: AtomicUsize::new(0),
            timeout,
        }
    }

    /// Adds a consumer for `topic`.
    pub fn register<F, Fut>(&self, topic: impl Into<String>, handler: F)
    where
        F: Fn(RpcContext, RpcMessage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, TransportError>> + Send + 'static,
    {
        let handler: MessageHandler =
            Arc::new(move |context: RpcContext, message: RpcMessage| -> HandlerFuture {
                Box::pin(handler(context, message))
            });
        let topic = topic.into();
        debug!("Registering consumer on topic {}", topic);
        self.consumers.entry(topic).or_default().push(handler);
    }

    /// Drops every consumer of `topic`. Returns whether any existed.
    pub fn unregister(&self, topic: &str) -> bool {
        self.consumers.remove(topic).is_some()
    }

    pub fn consumer_count(&self, topic: &str) -> usize {
        self.consumers.get(topic).map(|c| c.len()).unwrap_or(0)
    }

    fn select_consumer(&self, topic: &str) -> Result<MessageHandler, TransportError> {
        let consumers = self
            .consumers
            .get(topic)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| TransportError::Unroutable(topic.to_string()))?;

        let index = self.counter.fetch_add(1, Ordering::Relaxed) % consumers.len();
        Ok(consumers[index].clone())
    }

    fn deliver(topic: &str, handler: MessageHandler, context: RpcContext, message: RpcMessage) {
        let topic = topic.to_string();
        tokio::spawn(async move {
            let method = message.method.clone();
            if let Err(e) = handler(context, message).await {
                warn!("Cast of {} on topic {} failed: {}", method, topic, e);
            }
        });
    }
}

#[async_trait]
impl Transport for InMemoryBus {
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError> {
        let handler = self.select_consumer(topic)?;

        match timeout(self.timeout, handler(context.clone(), message.clone())).await {
            Ok(reply) => reply,
            Err(_) => Err(TransportError::Timeout),
        }
    }

    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let handler = self.select_consumer(topic)?;
        Self::deliver(topic, handler, context.clone(), message.clone());
        Ok(())
    }

    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let consumers = self
            .consumers
            .get(topic)
            .map(|c| c.value().clone())
            .unwrap_or_default();

        // Fanout to a topic nobody listens on is not an error on a real bus either.
        for handler in consumers {
            Self::deliver(topic, handler, context.clone(), message.clone());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
