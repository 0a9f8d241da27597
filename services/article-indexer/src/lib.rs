//! Library interface for the `article-indexer` service: the article store,
//! chunker, indexing orchestration, and HTTP surface, wired together by
//! `application::ServiceContainer`.

pub mod application;
pub mod chunking;
pub mod config;
pub mod health;
pub mod indexing_service;
pub mod infrastructure;
pub mod store;

pub use application::ServiceContainer;
pub use config::ServiceConfig;
pub use indexing_service::{IndexReport, IndexingService};
pub use store::{ArticleStore, NewArticle};
