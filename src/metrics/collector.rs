// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Instant;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    /// Text exposition of every registered metric.
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub struct MetricsCollector {
    pub rpc_requests_total: IntCounterVec,
    pub rpc_request_duration_seconds: HistogramVec,
    pub rpc_in_flight: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let rpc_requests_total = IntCounterVec::new(
            Opts::new("lbaas_rpc_requests_total", "Total number of RPC messages sent"),
            &["topic", "method", "kind", "outcome"],
        )?;
        registry.register(Box::new(rpc_requests_total.clone()))?;

        let rpc_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "lbaas_rpc_request_duration_seconds",
                "RPC round trip duration in seconds",
            ),
            &["topic", "method", "kind"],
        )?;
        registry.register(Box::new(rpc_request_duration_seconds.clone()))?;

        let rpc_in_flight = IntGauge::new("lbaas_rpc_in_flight", "RPC messages awaiting completion")?;
        registry.register(Box::new(rpc_in_flight.clone()))?;

        Ok(Self {
            rpc_requests_total,
            rpc_request_duration_seconds,
            rpc_in_flight,
        })
    }

    /// `outcome` is `"success"` or the failing error's kind.
    pub fn record_request(
        &self,
        topic: &str,
        method: &str,
        kind: &str,
        outcome: &str,
        duration: std::time::Duration,
    ) {
        self.rpc_requests_total
            .with_label_values(&[topic, method, kind, outcome])
            .inc();

        self.rpc_request_duration_seconds
            .with_label_values(&[topic, method, kind])
            .observe(duration.as_secs_f64());
    }

    pub fn request_started(&self) {
        self.rpc_in_flight.inc();
    }

    pub fn request_finished(&self) {
        self.rpc_in_flight.dec();
    }

    pub fn request_count(&self, topic: &str, method: &str, kind: &str, outcome: &str) -> u64 {
        self.rpc_requests_total
            .with_label_values(&[topic, method, kind, outcome])
            .get()
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
