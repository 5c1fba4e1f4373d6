//! Boundary error kinds for the framing codec.
//!
//! Exactly two kinds cross the API boundary: [`DatagramError::PayloadTooLarge`]
//! from encoding and [`DatagramError::MalformedFrame`] from decoding. Decode
//! folds every internal fault into the single malformed kind so callers have
//! one error to handle per direction.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors produced by the datagram codec.
#[derive(Debug, Error)]
pub enum DatagramError {
    /// A value does not fit its slot: the body exceeds the maximum body size,
    /// or a header text field (charset name, frame id) exceeds its fixed slot.
    /// Raised by encoding only.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The input bytes do not form a valid frame. Raised by decoding only.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] MalformedReason),
}

/// Detail carried inside [`DatagramError::MalformedFrame`].
#[derive(Debug, Error)]
pub enum MalformedReason {
    /// Fewer bytes than the fixed header size.
    #[error("incomplete header: got {len} bytes, header is {header} bytes")]
    TruncatedHeader { len: usize, header: usize },

    /// The declared payload length disagrees with the bytes actually present
    /// after the header. `actual > declared` is tolerated only in padded mode;
    /// `actual < declared` is a truncated frame and never recoverable.
    #[error("length mismatch: header declares {declared} body bytes, buffer carries {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    /// A header text field did not decode in the frame charset.
    #[error("invalid header text: {0}")]
    HeaderText(#[from] FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_too_large_display() {
        let err = DatagramError::PayloadTooLarge { size: 100, max: 50 };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = DatagramError::MalformedFrame(MalformedReason::LengthMismatch {
            declared: 4,
            actual: 7,
        });
        let msg = err.to_string();
        assert!(msg.contains("declares 4"));
        assert!(msg.contains("carries 7"));
    }

    #[test]
    fn test_truncated_header_display() {
        let err: DatagramError = MalformedReason::TruncatedHeader {
            len: 12,
            header: crate::frame::HEADER_LEN,
        }
        .into();
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("56"));
    }
}
