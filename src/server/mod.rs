//! # HTTP Server
//!
//! Thin axum front for the print pipeline. Three routes:
//!
//! | Route     | Method | Purpose                             |
//! |-----------|--------|-------------------------------------|
//! | `/health` | GET    | Readiness plus a capability listing |
//! | `/status` | GET    | Printer lock state                  |
//! | `/print`  | POST   | Render and deliver a block list     |

mod handlers;
mod state;

pub use state::{AppState, ServiceConfig};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use tower_http::trace::TraceLayer;

use crate::error::PaginitaError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/print", post(handlers::print))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>) -> Result<(), PaginitaError> {
    let addr = state.config.listen_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "listening on {} for printer {} ({})",
        addr,
        state.config.mac,
        state.config.model.name()
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{Deliverer, RetryPolicy};
    use crate::error::PaginitaError;
    use crate::font::{FallbackTypeface, FontProvider, FontSet};
    use crate::notify::NotificationSink;
    use crate::printer::{PrinterConfig, PrinterModel};
    use crate::transport::Transport;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    struct FixedFonts;
    impl FontProvider for FixedFonts {
        fn resolve(&self, size: u32, _bold: bool, _name: Option<&str>) -> FontSet {
            FontSet::new(Arc::new(FallbackTypeface::new(size)), None)
        }
    }

    struct OkTransport;
    impl Transport for OkTransport {
        fn send(&self, _payload: &[u8]) -> Result<(), PaginitaError> {
            Ok(())
        }
    }

    struct QuietSink;
    #[async_trait]
    impl NotificationSink for QuietSink {
        async fn notify(&self, _title: &str, _message: &str) -> Result<(), PaginitaError> {
            Ok(())
        }
    }

    fn app(mac: &str) -> Router {
        let policy = RetryPolicy {
            max_attempts: 1,
            backoff: Duration::from_millis(1),
            attempt_deadline: Duration::from_secs(5),
        };
        let state = Arc::new(AppState {
            config: ServiceConfig {
                mac: mac.to_string(),
                model: PrinterModel::A6,
                listen_addr: "127.0.0.1:0".to_string(),
                font_name: "DejaVu".to_string(),
                font_size: 24,
            },
            printer: PrinterConfig::for_model(PrinterModel::A6),
            fonts: Arc::new(FixedFonts),
            deliverer: Arc::new(Deliverer::new(
                Arc::new(OkTransport),
                Arc::new(QuietSink),
                policy,
            )),
        });
        router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok_when_configured() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["supported_blocks"][0], "text");
    }

    #[tokio::test]
    async fn health_reports_unconfigured_for_placeholder_mac() {
        let response = app("XX:XX:XX:XX:XX:XX")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "unconfigured");
    }

    #[tokio::test]
    async fn status_reports_idle_lock() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["busy"], false);
        assert_eq!(body["mac"], "AA:BB:CC:DD:EE:FF");
    }

    fn print_request(body: &str) -> Request<Body> {
        Request::post("/print")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn print_empty_blocks_is_bad_request() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(print_request(r#"{"blocks": []}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Field 'blocks' missing or empty");
    }

    #[tokio::test]
    async fn print_malformed_json_is_bad_request() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(print_request("{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn print_renders_and_delivers() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(print_request(
                r#"{"blocks": [{"type": "title", "text": "Hi"}, {"type": "separator"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "printed");
        assert_eq!(body["blocks_rendered"], 2);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn print_unknown_blocks_only_is_unprocessable() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(print_request(r#"{"blocks": [{"type": "bogus"}]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No block could be rendered");
        assert_eq!(
            body["warnings"][0],
            "Block #0: unknown type 'bogus', skipped"
        );
    }

    #[tokio::test]
    async fn print_mixed_blocks_reports_partial_warnings() {
        let response = app("AA:BB:CC:DD:EE:FF")
            .oneshot(print_request(
                r#"{"blocks": [{"type": "text", "text": "ok"}, {"type": "bogus"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["blocks_rendered"], 1);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }
}
