//! HTTP server setup: middleware stack, CORS, and graceful shutdown.

use std::net::SocketAddr;
use std::time::Duration;
use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::handlers::{create_router, AppState};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timeout_seconds: 300,
            enable_cors: true,
            cors_origins: vec![],
        }
    }
}

pub struct HttpServer {
    config: ServerConfig,
    app_state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, app_state: AppState) -> Self {
        Self { config, app_state }
    }

    pub fn build_router(&self) -> Router {
        let router = create_router(self.app_state.clone());

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.timeout_seconds)))
            .layer(middleware::from_fn(request_logging_middleware));

        let mut app = router.layer(middleware_stack);

        if self.config.enable_cors {
            app = app.layer(self.build_cors_layer());
        }

        app
    }

    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from((self.config.host.parse::<std::net::IpAddr>()?, self.config.port));
        let app = self.build_router();

        info!(%addr, "starting http server");
        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

        info!("http server stopped");
        Ok(())
    }

    fn build_cors_layer(&self) -> CorsLayer {
        let mut cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION]);

        if self.config.cors_origins.is_empty() {
            cors = cors.allow_origin(HeaderValue::from_static("*"));
        } else {
            let origins: Result<Vec<HeaderValue>, _> = self.config.cors_origins.iter().map(|origin| origin.parse()).collect();
            match origins {
                Ok(origins) => cors = cors.allow_origin(origins),
                Err(_) => {
                    warn!("invalid cors origins configured, allowing all origins");
                    cors = cors.allow_origin(HeaderValue::from_static("*"));
                }
            }
        }

        cors
    }
}

async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "request processed"
    );

    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate()).expect("failed to install signal handler").recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, starting graceful shutdown"),
        _ = terminate => info!("received sigterm, starting graceful shutdown"),
    }
}
