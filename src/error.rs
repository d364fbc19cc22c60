//! # Error Types
//!
//! This module defines error types used throughout the paginita library.

use thiserror::Error;

/// Main error type for paginita operations
#[derive(Debug, Error)]
pub enum PaginitaError {
    /// Per-block rendering errors (malformed input, undecodable image payload).
    /// Recoverable: the compositor downgrades these to warnings.
    #[error("Render error: {0}")]
    Render(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
