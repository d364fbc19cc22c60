//! # Printer Configuration
//!
//! Hardware specifications for supported PeriPage thermal printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Paper |
//! |-------|--------------|-------|
//! | A6    | 384          | 57mm  |
//! | A6+   | 384          | 57mm  |
//! | A40   | 384          | 57mm (A40 firmware) |
//! | A40+  | 384          | 57mm (A40 firmware) |
//!
//! All currently supported models share the 384-dot print head; the model
//! matters for firmware-level handshakes, not for raster geometry.
//!
//! ## Usage
//!
//! ```
//! use paginita::printer::{PrinterConfig, PrinterModel};
//!
//! let config = PrinterConfig::for_model(PrinterModel::A6);
//! assert_eq!(config.width_dots, 384);
//! assert_eq!(config.width_bytes, 48);
//! ```

use serde::{Deserialize, Serialize};

/// PeriPage printer model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterModel {
    A6,
    A6p,
    A40,
    A40p,
}

impl PrinterModel {
    /// Parse a model string (CLI args, config). Case-insensitive; the `+`
    /// suffix and a trailing `p` are equivalent.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a6" => Ok(Self::A6),
            "a6+" | "a6p" => Ok(Self::A6p),
            "a40" => Ok(Self::A40),
            "a40+" | "a40p" => Ok(Self::A40p),
            _ => Err(format!(
                "Unknown printer model '{}'. Use A6, A6+, A40 or A40+",
                s
            )),
        }
    }

    /// Human-readable model name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::A6 => "A6",
            Self::A6p => "A6+",
            Self::A40 => "A40",
            Self::A40p => "A40+",
        }
    }
}

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// - **width_dots**: printable width in dots; every rendered canvas and every
///   raster row is exactly this wide
/// - **width_bytes**: width in bytes (`width_dots / 8`), the bytes-per-line
///   field of the raster header
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model
    pub model: PrinterModel,

    /// Print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterConfig {
    /// Shared print width of the PeriPage family in dots.
    pub const PRINT_WIDTH: u16 = 384;

    /// Configuration for a given model.
    pub const fn for_model(model: PrinterModel) -> Self {
        Self {
            model,
            width_dots: Self::PRINT_WIDTH,
            width_bytes: Self::PRINT_WIDTH / 8,
            dpi: 203,
        }
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::for_model(PrinterModel::A6)
    }
}

// ============================================================================
// TESTS
// ============================================================================
