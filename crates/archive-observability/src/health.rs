//! Aggregates the `HealthChecker` implementations exposed by the vector
//! index, the article store, and the search engine into one report.

use archive_core::{ComponentHealth, HealthStatus};
use archive_core::traits::HealthChecker;
use serde::Serialize;
use std::sync::Arc;

/// Overall system health: the worst status among its components, plus every
/// component's own report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub components: Vec<ComponentHealth>,
}

/// Runs a fixed set of `HealthChecker`s concurrently and folds their reports
/// into one `HealthReport`. A checker that errors is recorded as unhealthy
/// rather than dropped, so a crashed dependency is never silently omitted.
pub struct HealthAggregator {
    checkers: Vec<(String, Arc<dyn HealthChecker>)>,
}

impl HealthAggregator {
    pub fn new() -> Self {
        Self { checkers: Vec::new() }
    }

    pub fn register(&mut self, name: impl Into<String>, checker: Arc<dyn HealthChecker>) {
        self.checkers.push((name.into(), checker));
    }

    pub async fn check(&self) -> HealthReport {
        let mut components = Vec::with_capacity(self.checkers.len());
        for (name, checker) in &self.checkers {
            let component = match checker.check_health().await {
                Ok(health) => health,
                Err(err) => ComponentHealth {
                    component: name.clone(),
                    status: HealthStatus::Unhealthy { message: err.to_string() },
                    last_check: chrono::Utc::now(),
                    details: None,
                },
            };
            components.push(component);
        }

        let status = components.iter().fold(HealthStatus::Healthy, |worst, c| worse_of(worst, c.status.clone()));

        HealthReport { status, components }
    }
}

impl Default for HealthAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn worse_of(a: HealthStatus, b: HealthStatus) -> HealthStatus {
    use HealthStatus::*;
    match (a, b) {
        (Unhealthy { message }, _) | (_, Unhealthy { message }) => Unhealthy { message },
        (Degraded { message }, _) | (_, Degraded { message }) => Degraded { message },
        (Healthy, Healthy) => Healthy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::Result;
    use async_trait::async_trait;

    struct Always(HealthStatus);

    #[async_trait]
    impl HealthChecker for Always {
        async fn check_health(&self) -> Result<ComponentHealth> {
            Ok(ComponentHealth {
                component: "test".to_string(),
                status: self.0.clone(),
                last_check: chrono::Utc::now(),
                details: None,
            })
        }
    }

    #[tokio::test]
    async fn aggregate_status_is_the_worst_component() {
        let mut aggregator = HealthAggregator::new();
        aggregator.register("vector_index", Arc::new(Always(HealthStatus::Healthy)));
        aggregator.register(
            "article_store",
            Arc::new(Always(HealthStatus::Degraded { message: "slow disk".to_string() })),
        );

        let report = aggregator.check().await;
        assert!(matches!(report.status, HealthStatus::Degraded { .. }));
        assert_eq!(report.components.len(), 2);
    }

    #[tokio::test]
    async fn any_unhealthy_component_makes_the_whole_report_unhealthy() {
        let mut aggregator = HealthAggregator::new();
        aggregator.register("vector_index", Arc::new(Always(HealthStatus::Healthy)));
        aggregator.register(
            "article_store",
            Arc::new(Always(HealthStatus::Unhealthy { message: "connection refused".to_string() })),
        );

        let report = aggregator.check().await;
        assert!(report.status.is_unhealthy());
    }
}
