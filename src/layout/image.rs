//! Image block renderers.
//!
//! Fetches bytes from a URL or an inline base64 payload, decodes to
//! grayscale, and rescales to the print width preserving aspect ratio with
//! Lanczos3 resampling. Runs on the synchronous render path; callers invoke
//! it from a blocking worker, never directly on the async runtime.

use std::sync::OnceLock;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;

use crate::error::PaginitaError;
use crate::layout::schema::{ImageB64Block, ImageUrlBlock};
use crate::layout::{Canvas, RenderContext};

/// Timeout for fetching a remote image.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("paginita/", env!("CARGO_PKG_VERSION"));

/// Shared blocking HTTP client, created on first use from a blocking worker.
fn http_client() -> &'static reqwest::blocking::Client {
    static CLIENT: OnceLock<reqwest::blocking::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new())
    })
}

/// Render an image fetched over HTTP.
pub fn render_image_url(
    block: &ImageUrlBlock,
    ctx: &RenderContext,
) -> Result<Canvas, PaginitaError> {
    let url = block.url.trim();
    if url.is_empty() {
        return Err(PaginitaError::Render(
            "image_url block: missing 'url' field".to_string(),
        ));
    }

    let bytes = http_client()
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.bytes())
        .map_err(|e| PaginitaError::Render(format!("fetching '{}' failed: {}", url, e)))?;

    fit_to_width(&bytes, ctx.width)
}

/// Render an inline base64 image.
pub fn render_image_b64(
    block: &ImageB64Block,
    ctx: &RenderContext,
) -> Result<Canvas, PaginitaError> {
    let payload = block.image.trim();
    if payload.is_empty() {
        return Err(PaginitaError::Render(
            "image_b64 block: missing 'image' field".to_string(),
        ));
    }

    let bytes = BASE64
        .decode(payload.as_bytes())
        .map_err(|e| PaginitaError::Render(format!("invalid base64 image payload: {}", e)))?;

    fit_to_width(&bytes, ctx.width)
}

/// Decode to grayscale and rescale to the print width, nearest-integer
/// height, Lanczos3 resampling.
fn fit_to_width(bytes: &[u8], width: u32) -> Result<Canvas, PaginitaError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PaginitaError::Render(format!("undecodable image: {}", e)))?;
    let gray = decoded.to_luma8();

    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(PaginitaError::Render("image has zero dimensions".to_string()));
    }

    let new_height = ((h as f32 * width as f32 / w as f32).round() as u32).max(1);
    let resized = image::imageops::resize(&gray, width, new_height, FilterType::Lanczos3);

    Ok(Canvas::from_raw(width, new_height, resized.into_raw()))
}

// ============================================================================
// TESTS
// ============================================================================
