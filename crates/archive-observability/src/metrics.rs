//! In-memory implementation of `archive_core::traits::MetricsCollector`:
//! counters, histograms, and durations, keyed by name plus sorted labels.
//! No exporter is provided; this crate's job stops at collection.

use archive_core::traits::MetricsCollector;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct HistogramState {
    count: u64,
    sum: f64,
}

#[derive(Debug, Default)]
struct Registry {
    counters: HashMap<String, u64>,
    histograms: HashMap<String, HistogramState>,
    durations: HashMap<String, HistogramState>,
}

/// A process-local metrics registry safe to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    registry: Mutex<Registry>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str, labels: &[(&str, &str)]) -> String {
        let mut sorted = labels.to_vec();
        sorted.sort_unstable();
        let mut key = name.to_string();
        for (k, v) in sorted {
            key.push(';');
            key.push_str(k);
            key.push('=');
            key.push_str(v);
        }
        key
    }

    /// Current value of a counter, for tests and `/health`-adjacent
    /// diagnostics endpoints.
    pub fn counter_value(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        let registry = self.registry.lock().unwrap();
        registry.counters.get(&Self::key(name, labels)).copied().unwrap_or(0)
    }

    pub fn histogram_mean(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        let registry = self.registry.lock().unwrap();
        registry.histograms.get(&Self::key(name, labels)).map(|h| h.sum / h.count as f64)
    }
}

impl MetricsCollector for InMemoryMetrics {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        let mut registry = self.registry.lock().unwrap();
        *registry.counters.entry(Self::key(name, labels)).or_insert(0) += 1;
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let mut registry = self.registry.lock().unwrap();
        let entry = registry.histograms.entry(Self::key(name, labels)).or_default();
        entry.count += 1;
        entry.sum += value;
    }

    fn record_duration(&self, name: &str, duration: Duration, labels: &[(&str, &str)]) {
        let mut registry = self.registry.lock().unwrap();
        let entry = registry.durations.entry(Self::key(name, labels)).or_default();
        entry.count += 1;
        entry.sum += duration.as_secs_f64() * 1000.0;
    }
}
