//! # Transport
//!
//! Moves encoded bytes to the printer. The only production implementation
//! is [`RfcommTransport`], which writes to a Bluetooth RFCOMM serial
//! device; the [`Transport`] trait exists so delivery and its tests can
//! swap in fakes.
//!
//! Transport failures carry raw OS flavour ("Host is down", "os error
//! 112"). [`classify`] folds them into a small set of conditions with
//! operator-readable messages.

mod rfcomm;

pub use rfcomm::{is_valid_mac, RfcommTransport};

use thiserror::Error;

use crate::error::PaginitaError;

/// Synchronous byte sink for encoded jobs.
///
/// `send` blocks for the duration of the transfer; callers run it on a
/// blocking worker thread.
pub trait Transport: Send + Sync {
    fn send(&self, payload: &[u8]) -> Result<(), PaginitaError>;
}

/// What actually went wrong, in words an operator can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("Printer unreachable. Is it switched on and in range?")]
    HostDown,

    #[error("Connection to the printer timed out")]
    Timeout,

    #[error("Printer connection busy. Another client may be connected")]
    Busy,

    #[error("Printer refused the connection")]
    Refused,

    #[error("No RFCOMM device found for the configured printer")]
    NotFound,

    #[error("Print failed: {0}")]
    Unknown(String),
}

/// Map a transport error onto a [`ClassifiedError`].
///
/// Matches on message substrings and the `os error N` codes that Linux
/// Bluetooth sockets produce. Anything unrecognized passes through as
/// [`ClassifiedError::Unknown`] with the original message.
pub fn classify(err: &PaginitaError) -> ClassifiedError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    if lower.contains("host is down") || lower.contains("os error 112") {
        ClassifiedError::HostDown
    } else if lower.contains("timed out") || lower.contains("os error 110") {
        ClassifiedError::Timeout
    } else if lower.contains("resource busy")
        || lower.contains("device or resource busy")
        || lower.contains("os error 16")
    {
        ClassifiedError::Busy
    } else if lower.contains("connection refused") || lower.contains("os error 111") {
        ClassifiedError::Refused
    } else if lower.contains("no such device") || lower.contains("os error 19") {
        ClassifiedError::NotFound
    } else {
        ClassifiedError::Unknown(message)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_err(msg: &str) -> PaginitaError {
        PaginitaError::Transport(msg.to_string())
    }

    #[test]
    fn classifies_by_substring() {
        let cases = [
            ("Host is down", ClassifiedError::HostDown),
            ("connection timed out", ClassifiedError::Timeout),
            ("Device or resource busy", ClassifiedError::Busy),
            ("Connection refused", ClassifiedError::Refused),
            ("No such device", ClassifiedError::NotFound),
        ];
        for (msg, expected) in cases {
            assert_eq!(classify(&transport_err(msg)), expected, "for '{}'", msg);
        }
    }

    #[test]
    fn classifies_by_os_error_code() {
        let cases = [
            (112, ClassifiedError::HostDown),
            (110, ClassifiedError::Timeout),
            (16, ClassifiedError::Busy),
            (111, ClassifiedError::Refused),
            (19, ClassifiedError::NotFound),
        ];
        for (code, expected) in cases {
            let err = transport_err(&format!("write failed (os error {})", code));
            assert_eq!(classify(&err), expected, "for os error {}", code);
        }
    }

    #[test]
    fn unrecognized_messages_pass_through() {
        let err = transport_err("the moon is in the wrong phase");
        match classify(&err) {
            ClassifiedError::Unknown(msg) => {
                assert!(msg.contains("moon"));
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify(&transport_err("CONNECTION REFUSED by peer")),
            ClassifiedError::Refused
        );
    }

    #[test]
    fn user_messages_do_not_leak_raw_errno() {
        assert_eq!(
            ClassifiedError::HostDown.to_string(),
            "Printer unreachable. Is it switched on and in range?"
        );
        assert!(!ClassifiedError::Timeout.to_string().contains("110"));
    }
}
