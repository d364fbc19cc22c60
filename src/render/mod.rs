//! # Halftoning
//!
//! Converts 8-bit grayscale canvases into the 1-bit rows the printer
//! understands. One algorithm, no configuration: Floyd-Steinberg error
//! diffusion, which keeps both hard text edges and photo midtones usable
//! on thermal paper.

mod dither;

pub use dither::diffuse;
