//! `article-indexer` service entry point: loads configuration, assembles the
//! service container, and serves the HTTP API.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use article_indexer::application::ServiceContainer;
use article_indexer::config::ServiceConfig;
use article_indexer::infrastructure::http::HttpServer;

#[derive(Parser)]
#[command(name = "article-indexer")]
#[command(about = "Search and indexing core for a semantic article archive")]
struct Cli {
    /// Path to a TOML file overriding the engine's search/reranking defaults.
    #[arg(long)]
    config: Option<String>,

    /// HTTP server port, overriding ARTICLE_INDEXER_PORT and the config default.
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit structured JSON logs instead of the human-readable format.
    #[arg(long)]
    structured_logs: bool,

    /// Run a full index build against the article store and exit, instead of serving HTTP.
    #[arg(long)]
    build_index: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.structured_logs);

    info!("starting article-indexer");

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_env_with_engine_file(path)?,
        None => ServiceConfig::from_env()?,
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let container = Arc::new(ServiceContainer::new(&config).await.map_err(|e| {
        error!(error = %e, "failed to initialize service container");
        e
    })?);

    if cli.build_index {
        info!("running a full index build");
        let report = container.indexing_service.build().await?;
        info!(processed = report.articles_processed, failed = report.articles_failed, chunks = report.chunks_written, "index build complete");
        container.save_vector_index(&config.storage.vector_index_path).await?;
        return Ok(());
    }

    let server = HttpServer::new(config.server.clone(), container.app_state());

    info!(host = %config.server.host, port = config.server.port, "serving http api");
    if let Err(e) = server.start().await {
        error!(error = %e, "http server error");
        return Err(anyhow::anyhow!(e.to_string()));
    }

    info!("article-indexer stopped");
    Ok(())
}

fn init_logging(log_level: &str, structured: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("article_indexer={log_level},archive_core=info,archive_search=info,archive_vector=info,archive_observability=info")));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if structured {
        subscriber.with(fmt::layer().json().with_target(false).with_current_span(false)).init();
    } else {
        subscriber.with(fmt::layer().with_target(false)).init();
    }
}
