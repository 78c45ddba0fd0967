//! HTTP API Layer
//!
//! Exposes the project and task services as a JSON-over-HTTP API (axum).
//! Caller identity arrives in the `X-User-Id` header.

pub mod error;
pub mod handler;
pub mod identity;
pub mod server;
pub mod types;

pub use handler::{router, AppState};
pub use server::{app, HttpServer, HttpServerConfig};
