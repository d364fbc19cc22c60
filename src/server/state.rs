//! Shared server state.

use std::sync::Arc;

use crate::delivery::Deliverer;
use crate::font::FontProvider;
use crate::layout::RenderContext;
use crate::printer::{PrinterConfig, PrinterModel};

/// Service-level settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Printer Bluetooth MAC address.
    pub mac: String,
    pub model: PrinterModel,
    /// Address the HTTP server binds, e.g. `0.0.0.0:8080`.
    pub listen_addr: String,
    /// Default font family for blocks that do not name one.
    pub font_name: String,
    /// Default font size for blocks that do not set one.
    pub font_size: u32,
}

/// Everything the handlers share.
pub struct AppState {
    pub config: ServiceConfig,
    pub printer: PrinterConfig,
    pub fonts: Arc<dyn FontProvider>,
    pub deliverer: Arc<Deliverer>,
}

impl AppState {
    /// Render context for one incoming request.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(
            self.printer.width_dots as u32,
            self.config.font_size,
            Arc::clone(&self.fonts),
        )
    }
}
