//! The axum HTTP surface: route handlers, middleware, and server setup.

pub mod handlers;
pub mod server;

pub use handlers::{create_router, AppState};
pub use server::{HttpServer, ServerConfig};
