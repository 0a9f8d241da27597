//! `HealthChecker` adapters for dependencies that don't implement the trait
//! themselves. `ArticleStore` implements it directly (it owns the
//! connection); the vector index is a trait object with no health surface of
//! its own, so this wraps it in a checker that exercises `count`.

use archive_core::traits::HealthChecker;
use archive_core::{ComponentHealth, HealthStatus, Result};
use archive_vector::VectorIndex;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct VectorIndexHealthChecker {
    index: Arc<dyn VectorIndex>,
}

impl VectorIndexHealthChecker {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl HealthChecker for VectorIndexHealthChecker {
    async fn check_health(&self) -> Result<ComponentHealth> {
        let status = match self.index.count().await {
            Ok(_) => HealthStatus::Healthy,
            Err(err) => HealthStatus::Unhealthy { message: format!("vector index unreachable: {err}") },
        };

        Ok(ComponentHealth {
            component: "vector_index".to_string(),
            status,
            last_check: Utc::now(),
            details: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_vector::InMemoryVectorIndex;

    #[tokio::test]
    async fn a_reachable_index_reports_healthy() {
        let checker = VectorIndexHealthChecker::new(Arc::new(InMemoryVectorIndex::new()));
        let health = checker.check_health().await.unwrap();
        assert_eq!(health.component, "vector_index");
        assert!(matches!(health.status, HealthStatus::Healthy));
    }
}
