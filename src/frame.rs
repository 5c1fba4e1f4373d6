//! Datagram header layout and the in-memory frame model.
//!
//! Frame layout (56-byte header + payload, all integers big-endian):
//!
//! ```text
//! +---------+-------------+------+--------------+-----------+---------+
//! | version | payload_len | kind | charset name | id        | body    |
//! | 1 byte  | 4 bytes     |1 byte| 10 bytes     | 40 bytes  | N bytes |
//! +---------+-------------+------+--------------+-----------+---------+
//! ```
//!
//! The charset name and id slots are zero-padded on the right. `payload_len`
//! is unsigned and equals the body length in bytes.

use bytes::Bytes;

/// Size of the fixed frame header in bytes (1+4+1+10+40 = 56).
pub const HEADER_LEN: usize = 56;

/// Offset of the version byte.
pub const VERSION_OFFSET: usize = 0;
/// Offset of the 4-byte payload length field.
pub const LEN_OFFSET: usize = 1;
/// Offset of the kind byte.
pub const KIND_OFFSET: usize = 5;
/// Offset of the charset-name slot.
pub const CHARSET_OFFSET: usize = 6;
/// Size of the charset-name slot in bytes.
pub const CHARSET_SLOT: usize = 10;
/// Offset of the frame-id slot.
pub const ID_OFFSET: usize = 16;
/// Size of the frame-id slot in bytes.
pub const ID_SLOT: usize = 40;
/// Offset of the first body byte.
pub const BODY_OFFSET: usize = HEADER_LEN;

/// Application-level interpretation of the kind byte.
///
/// The codec carries the byte without enforcing this enumeration; unknown
/// values pass through decode untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DatagramKind {
    /// Keep-alive probe.
    Heartbeat = 0,
    /// Application payload.
    Payload = 1,
    /// File transfer data.
    FileTransfer = 2,
    /// Acknowledgement.
    Ack = 3,
    /// Server-initiated push.
    Push = 4,
}

impl DatagramKind {
    /// Maps a kind byte to its known interpretation, if any.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(DatagramKind::Heartbeat),
            1 => Some(DatagramKind::Payload),
            2 => Some(DatagramKind::FileTransfer),
            3 => Some(DatagramKind::Ack),
            4 => Some(DatagramKind::Push),
            _ => None,
        }
    }
}

/// One datagram, decoded or about to be transmitted.
///
/// Constructed once by [`Encoder::encode`](crate::codec::Encoder::encode) or
/// [`decode`](crate::codec::decode) and immutable afterwards. Always owns its
/// bytes; nothing here aliases pool-managed storage.
#[derive(Debug, Clone)]
pub struct Datagram {
    /// The fully assembled frame, exactly as transmitted or received
    /// (after slack truncation in padded decode mode).
    pub raw: Bytes,
    /// Payload length as carried in the header.
    pub declared_len: u32,
    /// Frame body; `None` iff `declared_len` is 0.
    pub body: Option<Bytes>,
    /// Version byte, opaque to the codec.
    pub version: u8,
    /// Kind byte; see [`DatagramKind`] for the known values.
    pub kind: u8,
    /// Charset name governing the header text fields.
    pub charset: String,
    /// The 40-byte id slot. Zero-padded when built by encode; read back
    /// verbatim (trailing zeroes included) by decode.
    pub id: Bytes,
}

impl Datagram {
    /// Known interpretation of the kind byte, if any.
    pub fn kind(&self) -> Option<DatagramKind> {
        DatagramKind::from_byte(self.kind)
    }

    /// Whether this frame carries no body.
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// Total frame length in bytes (header + body).
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// The id slot rendered as text, for diagnostics. The underlying slot is
    /// left untouched; trailing zero bytes from the padding show up in the
    /// rendered string.
    pub fn id_text(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_len_matches_layout() {
        assert_eq!(HEADER_LEN, 1 + 4 + 1 + CHARSET_SLOT + ID_SLOT);
        assert_eq!(BODY_OFFSET, ID_OFFSET + ID_SLOT);
    }

    #[test]
    fn test_kind_from_byte() {
        assert_eq!(DatagramKind::from_byte(0), Some(DatagramKind::Heartbeat));
        assert_eq!(DatagramKind::from_byte(1), Some(DatagramKind::Payload));
        assert_eq!(DatagramKind::from_byte(2), Some(DatagramKind::FileTransfer));
        assert_eq!(DatagramKind::from_byte(3), Some(DatagramKind::Ack));
        assert_eq!(DatagramKind::from_byte(4), Some(DatagramKind::Push));
        assert_eq!(DatagramKind::from_byte(5), None);
        assert_eq!(DatagramKind::from_byte(255), None);
    }

    #[test]
    fn test_id_text_keeps_padding() {
        let mut slot = vec![0u8; ID_SLOT];
        slot[..2].copy_from_slice(b"ab");
        let frame = Datagram {
            raw: Bytes::new(),
            declared_len: 0,
            body: None,
            version: 1,
            kind: 0,
            charset: "UTF-8".to_string(),
            id: Bytes::from(slot),
        };
        let text = frame.id_text();
        assert_eq!(text.len(), ID_SLOT);
        assert!(text.starts_with("ab"));
        assert!(text.ends_with('\0'));
    }
}
