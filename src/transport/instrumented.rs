// src/transport/instrumented.rs
use super::{Transport, TransportError};
use crate::metrics::{MetricsCollector, Timer};
use crate::rpc::{RpcContext, RpcMessage};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Holds the in-flight gauge up until dropped, including when the caller
/// abandons the request mid-flight.
struct InFlight<'a>(&'a MetricsCollector);

impl<'a> InFlight<'a> {
    fn start(metrics: &'a MetricsCollector) -> Self {
        metrics.request_started();
        Self(metrics)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.request_finished();
    }
}

/// Wraps a transport to record per-message metrics and log failures.
///
/// Results pass through untouched.
pub struct InstrumentedTransport<T> {
    inner: T,
    metrics: Arc<MetricsCollector>,
}

impl<T: Transport> InstrumentedTransport<T> {
    pub fn new(inner: T, metrics: Arc<MetricsCollector>) -> Self {
        Self { inner, metrics }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn observe<R>(
        &self,
        topic: &str,
        message: &RpcMessage,
        kind: &str,
        timer: Timer,
        result: &Result<R, TransportError>,
    ) {
        let outcome = match result {
            Ok(_) => "success",
            Err(e) => {
                warn!(
                    "{} {} on topic {} via {} failed: {}",
                    kind,
                    message.method,
                    topic,
                    self.inner.name(),
                    e
                );
                e.kind()
            }
        };

        self.metrics
            .record_request(topic, &message.method, kind, outcome, timer.elapsed());
    }
}

#[async_trait]
impl<T: Transport> Transport for InstrumentedTransport<T> {
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError> {
        let timer = Timer::new();
        let _in_flight = InFlight::start(&self.metrics);
        let result = self.inner.call(context, topic, message).await;
        self.observe(topic, message, "call", timer, &result);
        result
    }

    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let timer = Timer::new();
        let _in_flight = InFlight::start(&self.metrics);
        let result = self.inner.cast(context, topic, message).await;
        self.observe(topic, message, "cast", timer, &result);
        result
    }

    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let timer = Timer::new();
        let _in_flight = InFlight::start(&self.metrics);
        let result = self.inner.fanout_cast(context, topic, message).await;
        self.observe(topic, message, "fanout_cast", timer, &result);
        result
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
