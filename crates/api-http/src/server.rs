//! HTTP Server
//!
//! Binds the listener, applies the middleware stack and runs axum with
//! graceful shutdown bounded by a grace period.

use crate::error::ApiError;
use crate::handler::{router, AppState};
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::application::with_request_deadline;
use taskboard_core::error::AppError;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            request_timeout: Duration::from_secs(10),
            shutdown_grace: Duration::from_secs(20),
        }
    }
}

/// Router with the full middleware stack (deadline, tracing, CORS)
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    router(state)
        .layer(middleware::from_fn_with_state(request_timeout, enforce_deadline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Drops the handler future once `limit` elapses
///
/// The deadline is also handed to the services, which stop waiting on
/// inline event publishing before it so committed writes are acknowledged.
async fn enforce_deadline(State(limit): State<Duration>, req: Request, next: Next) -> Response {
    let deadline = Instant::now() + limit;
    match tokio::time::timeout_at(deadline, with_request_deadline(deadline, next.run(req))).await {
        Ok(response) => response,
        Err(_) => ApiError::from(AppError::Timeout(format!(
            "request exceeded {} ms",
            limit.as_millis()
        )))
        .into_response(),
    }
}

pub struct HttpServer {
    listener: TcpListener,
    app: Router,
    shutdown_grace: Duration,
}

impl HttpServer {
    pub async fn bind(config: HttpServerConfig, state: AppState) -> std::io::Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).await?;

        Ok(Self {
            listener,
            app: app(state, config.request_timeout),
            shutdown_grace: config.shutdown_grace,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    ///
    /// Requests still running after the grace period are abandoned.
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.listener.local_addr()?;
        info!(%addr, "HTTP server listening");

        let draining = Arc::new(Notify::new());
        let signal = {
            let draining = draining.clone();
            async move {
                shutdown.await;
                info!("Shutdown requested, draining in-flight requests");
                draining.notify_one();
            }
        };

        let server = axum::serve(self.listener, self.app)
            .with_graceful_shutdown(signal)
            .into_future();
        let grace = self.shutdown_grace;

        tokio::select! {
            result = server => result?,
            _ = async {
                draining.notified().await;
                tokio::time::sleep(grace).await;
            } => {
                warn!(grace_secs = grace.as_secs(), "Grace period elapsed, abandoning open requests");
            }
        }

        info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_becomes_gateway_timeout() {
        let slow = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .layer(middleware::from_fn_with_state(
                Duration::from_millis(20),
                enforce_deadline,
            ));

        let response = slow
            .oneshot(HttpRequest::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        use crate::identity::CallerId;

        let who = Router::new().route("/whoami", get(|CallerId(id): CallerId| async move { id }));

        let response = who
            .clone()
            .oneshot(HttpRequest::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = who
            .oneshot(
                HttpRequest::get("/whoami")
                    .header("X-User-Id", "  ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
