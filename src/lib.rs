//! # datagram-wire
//!
//! Fixed-layout binary framing for variable-length payloads over
//! byte-oriented transports (stream or packet).
//!
//! This crate provides:
//! - The 56-byte header layout and frame size limits
//! - A [`Datagram`] model holding one decoded or to-be-encoded frame
//! - An [`Encoder`] and the [`decode`]/[`decode_padded`] pair, with a
//!   tolerance mode for padded packet transports
//! - A header-length probe for incremental stream reassembly
//!
//! No transport is implemented here; callers move the raw bytes.

pub mod codec;
pub mod convert;
pub mod error;
pub mod frame;
pub mod pool;

pub use codec::{decode, decode_padded, peek_declared_len, Encoder};
pub use error::{DatagramError, MalformedReason};
pub use frame::{Datagram, DatagramKind, HEADER_LEN};

/// Maximum size of a complete frame, header included (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Maximum body size: everything of [`MAX_FRAME_SIZE`] not taken by the header.
pub const MAX_BODY_SIZE: usize = MAX_FRAME_SIZE - frame::HEADER_LEN;
