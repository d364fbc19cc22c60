//! # paginita
//!
//! Layout and print service for PeriPage thermal printers over Bluetooth
//! RFCOMM. Callers post an ordered list of declarative content blocks;
//! the service renders them to grayscale at the 384-dot print width,
//! dithers, encodes the printer byte stream and delivers it with retries.
//!
//! ## Pipeline
//!
//! ```text
//! POST /print → layout (blocks → Page) → render (dither)
//!             → protocol (byte stream) → delivery (lock, retry) → RFCOMM
//! ```
//!
//! ## Modules
//!
//! | Module      | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | [`layout`]  | Block schema, text/image rendering, composition  |
//! | [`font`]    | Typeface resolution, emoji fallback              |
//! | [`render`]  | Floyd-Steinberg halftoning                       |
//! | [`protocol`]| Printer command bytes and job encoding           |
//! | [`delivery`]| Printer lock, retries, failure notification      |
//! | [`transport`]| RFCOMM serial transport, error classification   |
//! | [`notify`]  | Home Assistant persistent notifications          |
//! | [`printer`] | Hardware configuration                           |
//! | [`server`]  | HTTP surface                                     |

pub mod delivery;
pub mod error;
pub mod font;
pub mod layout;
pub mod notify;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod server;
pub mod transport;

pub use error::PaginitaError;
pub use printer::{PrinterConfig, PrinterModel};
