//! Encoding and decoding of datagram frames.
//!
//! Encoding assembles a frame inside a pooled buffer and returns a
//! [`Datagram`] that owns freshly materialized bytes. Decoding validates the
//! header invariants and, in padded mode, tolerates trailing slack appended
//! by packet-oriented transports.

use bytes::{BufMut, Bytes};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::convert;
use crate::error::{DatagramError, MalformedReason};
use crate::frame::{
    Datagram, BODY_OFFSET, CHARSET_OFFSET, CHARSET_SLOT, HEADER_LEN, ID_OFFSET, ID_SLOT,
    KIND_OFFSET, LEN_OFFSET, VERSION_OFFSET,
};
use crate::pool;
use crate::MAX_BODY_SIZE;

/// Charset name stamped into the header of frames built by a default
/// [`Encoder`]. Rust strings are UTF-8, so this is the process default.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Generates the textual id stamped into a new frame's id slot.
///
/// A hyphenated UUID v4 is 36 bytes, comfortably inside the 40-byte slot.
fn new_frame_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds datagram frames.
///
/// The only configuration is the charset name written into the header text
/// slot; it defaults to [`DEFAULT_CHARSET`] and is injectable so callers (and
/// tests) are not at the mercy of a hidden process-wide value.
#[derive(Debug, Clone)]
pub struct Encoder {
    charset: String,
}

impl Encoder {
    /// Encoder using the default charset name.
    pub fn new() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Encoder stamping the given charset name into built frames.
    ///
    /// The name still has to fit the 10-byte header slot; a longer name makes
    /// every `encode` call fail with [`DatagramError::PayloadTooLarge`].
    pub fn with_charset(name: impl Into<String>) -> Self {
        Self {
            charset: name.into(),
        }
    }

    /// The charset name this encoder writes.
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Builds a frame around `body`.
    ///
    /// An empty `body` produces an empty frame (payload length 0, no body
    /// bytes after the header). Fails with
    /// [`DatagramError::PayloadTooLarge`] when the body exceeds
    /// [`MAX_BODY_SIZE`] or a header text field exceeds its slot; that is the
    /// only failure mode of encoding.
    pub fn encode(&self, body: &[u8], kind: u8, version: u8) -> Result<Datagram, DatagramError> {
        let body_len = body.len();
        if body_len > MAX_BODY_SIZE {
            warn!(body_len, max = MAX_BODY_SIZE, "refusing oversized body");
            return Err(DatagramError::PayloadTooLarge {
                size: body_len,
                max: MAX_BODY_SIZE,
            });
        }
        debug!(body_len, kind, version, "building datagram");

        // Pooled assembly buffer; the guard returns it on every exit path.
        let mut buf = pool::SHARED.acquire();

        buf.put_u8(version);
        buf.put_slice(&convert::u32_to_bytes(body_len as u32));
        buf.put_u8(kind);

        let charset_bytes = self.charset.as_bytes();
        if charset_bytes.len() > CHARSET_SLOT {
            return Err(DatagramError::PayloadTooLarge {
                size: charset_bytes.len(),
                max: CHARSET_SLOT,
            });
        }
        buf.put_slice(charset_bytes);
        buf.put_bytes(0, CHARSET_SLOT - charset_bytes.len());

        let id = new_frame_id();
        let id_bytes = id.as_bytes();
        if id_bytes.len() > ID_SLOT {
            return Err(DatagramError::PayloadTooLarge {
                size: id_bytes.len(),
                max: ID_SLOT,
            });
        }
        buf.put_slice(id_bytes);
        buf.put_bytes(0, ID_SLOT - id_bytes.len());
        let id_slot = Bytes::copy_from_slice(&buf[ID_OFFSET..ID_OFFSET + ID_SLOT]);

        if body_len != 0 {
            buf.put_slice(body);
        }

        // Fresh copy; the pooled buffer never outlives this call.
        let raw = Bytes::copy_from_slice(&buf);

        Ok(Datagram {
            raw,
            declared_len: body_len as u32,
            body: (body_len != 0).then(|| Bytes::copy_from_slice(body)),
            version,
            kind,
            charset: self.charset.clone(),
            id: id_slot,
        })
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a received frame, requiring an exact length match between the
/// header's declared payload length and the bytes present.
pub fn decode(data: &[u8]) -> Result<Datagram, DatagramError> {
    decode_frame(data, false)
}

/// Parses a received frame, tolerating trailing slack beyond the declared
/// payload length.
///
/// Packet-oriented transports may deliver a datagram padded past the frame's
/// end; the slack is cut off and the frame is parsed as if it had arrived
/// exact. A frame *shorter* than its declared length is truncated beyond
/// recovery and still fails.
pub fn decode_padded(data: &[u8]) -> Result<Datagram, DatagramError> {
    decode_frame(data, true)
}

fn decode_frame(data: &[u8], allow_trailing_slack: bool) -> Result<Datagram, DatagramError> {
    if data.len() < HEADER_LEN {
        return Err(MalformedReason::TruncatedHeader {
            len: data.len(),
            header: HEADER_LEN,
        }
        .into());
    }

    // Charset slot is read up to the first zero byte, not as the full fixed
    // slot: an embedded zero truncates the recovered name. Kept as-is for
    // wire compatibility with existing peers.
    let charset_slot = &data[CHARSET_OFFSET..CHARSET_OFFSET + CHARSET_SLOT];
    let charset_end = charset_slot
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(CHARSET_SLOT);
    let charset =
        String::from_utf8(charset_slot[..charset_end].to_vec()).map_err(MalformedReason::from)?;

    let version = data[VERSION_OFFSET];
    let kind = data[KIND_OFFSET];
    let declared = convert::u32_from_bytes(data, LEN_OFFSET);
    let actual = data.len() - HEADER_LEN;
    debug!(declared, actual, version, kind, charset = %charset, "parsing datagram");

    let raw = if actual > declared as usize {
        warn!(
            declared,
            actual, "frame carries more bytes than its header declares"
        );
        if !allow_trailing_slack {
            return Err(MalformedReason::LengthMismatch { declared, actual }.into());
        }
        Bytes::copy_from_slice(&data[..HEADER_LEN + declared as usize])
    } else if actual < declared as usize {
        return Err(MalformedReason::LengthMismatch { declared, actual }.into());
    } else {
        Bytes::copy_from_slice(data)
    };

    // Id slot comes back verbatim, trailing padding zeroes included. Encode
    // zero-pads the slot; decode does not trim it back. Existing asymmetry,
    // kept so peers agree on what the 40 bytes mean.
    let id = Bytes::copy_from_slice(&data[ID_OFFSET..ID_OFFSET + ID_SLOT]);

    let body = if declared == 0 {
        None
    } else {
        Some(Bytes::copy_from_slice(
            &raw[BODY_OFFSET..BODY_OFFSET + declared as usize],
        ))
    };

    Ok(Datagram {
        raw,
        declared_len: declared,
        body,
        version,
        kind,
        charset,
        id,
    })
}

/// Reads the declared payload length out of a (possibly partial) frame
/// without decoding it.
///
/// Returns `None` when fewer than [`HEADER_LEN`] bytes are present — the
/// header is incomplete and the caller should buffer more input before
/// attempting [`decode`]. Useful for incremental reassembly on stream
/// transports.
pub fn peek_declared_len(data: &[u8]) -> Option<u32> {
    if data.len() < HEADER_LEN {
        return None;
    }
    Some(convert::u32_from_bytes(data, LEN_OFFSET))
}
