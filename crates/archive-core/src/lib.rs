/// Core domain models and error types for the article search engine.
///
/// This crate has no dependency on any particular storage or embedding
/// backend; it defines the shared vocabulary (`Article`, `Chunk`, `DocId`,
/// `ArchiveError`) that the vector index, article store, and search engine
/// crates all build on.
pub mod doc_id;
pub mod error;
pub mod models;
pub mod traits;
pub mod values;

pub use doc_id::DocId;
pub use error::{ArchiveError, Result};
pub use models::{Article, AuthorStat, Chunk, ComponentHealth, HealthStatus, Pagination, SourceStat, StoreStats};

pub use chrono::{DateTime, Utc};
