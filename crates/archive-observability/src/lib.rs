/// Health aggregation and metrics collection for the article search engine.
///
/// Structured logging is not reinvented here: every component calls the
/// `tracing` crate's macros directly, and the binaries wire up
/// `tracing-subscriber`'s `EnvFilter`. This crate covers the two concerns
/// that need shared state: rolling up component health checks, and an
/// in-memory metrics registry implementing `archive_core`'s collector trait.
pub mod health;
pub mod metrics;

pub use health::{HealthAggregator, HealthReport};
pub use metrics::InMemoryMetrics;
