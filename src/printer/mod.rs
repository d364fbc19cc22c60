//! Printer hardware configuration.

mod config;

pub use config::{PrinterConfig, PrinterModel};
