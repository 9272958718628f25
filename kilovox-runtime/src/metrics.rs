//! Metrics instrumentation for runtime observability.

use std::time::Instant;

/// Durations the runtime records. Each variant owns its histogram key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedMetric {
    ModelRequest,
    CommandExecution,
    Turn,
}

impl TimedMetric {
    fn key(self) -> &'static str {
        match self {
            TimedMetric::ModelRequest => "model_request_latency",
            TimedMetric::CommandExecution => "command_execution_latency",
            TimedMetric::Turn => "turn_duration",
        }
    }
}

/// Increment completed-turn counter.
pub fn increment_turn_count() {
    metrics::counter!("turns_completed", 1);
}

/// RAII timer recording elapsed milliseconds on drop.
pub struct MetricTimer {
    start: Instant,
    metric: TimedMetric,
}

impl MetricTimer {
    pub fn new(metric: TimedMetric) -> Self {
        Self {
            start: Instant::now(),
            metric,
        }
    }
}

impl Drop for MetricTimer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!(self.metric.key(), duration_ms);
    }
}
