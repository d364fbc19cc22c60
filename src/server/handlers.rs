//! HTTP handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::{error, info};
use serde_json::json;

use crate::delivery::DeliveryOutcome;
use crate::layout::{compose, Block, PrintRequest};
use crate::protocol::encode;
use crate::transport::is_valid_mac;

use super::state::AppState;

/// GET /health
///
/// 200 when the service is ready to print, 503 when the printer MAC is
/// missing or still the placeholder. The body doubles as a capability
/// document for UIs.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let configured = is_valid_mac(&state.config.mac);
    let status = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = json!({
        "status": if configured { "ok" } else { "unconfigured" },
        "mac": state.config.mac,
        "model": state.config.model.name(),
        "font": state.config.font_name,
        "font_size": state.config.font_size,
        "supported_blocks": Block::supported_tags(),
        "endpoints": ["/health", "/status", "/print"],
    });
    (status, Json(body)).into_response()
}

/// GET /status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "busy": state.deliverer.lock().is_held(),
        "mac": state.config.mac,
    }))
}

/// POST /print
///
/// Renders the block list, encodes it and hands it to delivery. Render
/// warnings are returned in every response so a partially printed page is
/// never silent about what it dropped.
pub async fn print(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: PrintRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", e),
                &[],
            );
        }
    };

    if request.blocks.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Field 'blocks' missing or empty".to_string(),
            &[],
        );
    }

    let block_count = request.blocks.len();
    let ctx = state.render_context();
    let printer = state.printer;

    // Rendering is CPU plus possibly a blocking image fetch
    let render = tokio::task::spawn_blocking(move || {
        let (page, warnings) = compose(&request.blocks, &ctx);
        (page.map(|p| encode(&p, &printer)), warnings)
    })
    .await;

    let (job, warnings) = match render {
        Ok(result) => result,
        Err(e) => {
            error!("render worker panicked: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Rendering failed".to_string(),
                &[],
            );
        }
    };

    let Some(job) = job else {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No block could be rendered".to_string(),
            &warnings,
        );
    };

    info!(
        "print request: {} blocks, {} rows, {} bytes",
        block_count,
        job.height(),
        job.len()
    );

    match state.deliverer.deliver(job).await {
        DeliveryOutcome::Printed { attempts } => {
            info!("printed after {} attempt(s)", attempts);
            Json(json!({
                "status": "printed",
                "blocks_rendered": block_count - warnings.len(),
                "warnings": warnings,
            }))
            .into_response()
        }
        DeliveryOutcome::Busy => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Printer is busy with another job".to_string(),
            &warnings,
        ),
        DeliveryOutcome::Failed(classified) => {
            error!("delivery failed: {}", classified);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                classified.to_string(),
                &warnings,
            )
        }
    }
}

fn error_response(status: StatusCode, error: String, warnings: &[String]) -> Response {
    let body = if warnings.is_empty() {
        json!({ "error": error })
    } else {
        json!({ "error": error, "warnings": warnings })
    };
    (status, Json(body)).into_response()
}
