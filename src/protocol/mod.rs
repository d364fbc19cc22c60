//! # Wire Protocol
//!
//! ESC/POS-style byte stream for the printer: a reset, one raster graphics
//! transfer covering the whole page, and a paper feed so the output clears
//! the tear bar. [`encode`] is the only entry point; it is deterministic
//! for a given page.

mod commands;
mod encode;

pub use commands::{feed, raster_header, reset, FEED_LINES};
pub use encode::{encode, EncodedJob};
