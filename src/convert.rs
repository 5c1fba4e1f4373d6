//! Big-endian conversion between `u32` and the wire representation of the
//! payload-length field.
//!
//! The length field is unsigned: values above `i32::MAX` are valid payload
//! lengths and must survive the round trip unchanged.

/// Writes a `u32` as four bytes, most significant byte first.
pub fn u32_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Reads four big-endian bytes starting at `offset` back into a `u32`.
///
/// Exact inverse of [`u32_to_bytes`] for every value in `0..=u32::MAX`.
/// Callers check `data.len() >= offset + 4` before calling; a shorter slice
/// panics here, which decode rules out up front by validating the header
/// length first.
pub fn u32_from_bytes(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero() {
        assert_eq!(u32_to_bytes(0), [0, 0, 0, 0]);
        assert_eq!(u32_from_bytes(&[0, 0, 0, 0], 0), 0);
    }

    #[test]
    fn test_byte_order_is_big_endian() {
        assert_eq!(u32_to_bytes(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(u32_from_bytes(&[1, 2, 3, 4], 0), 0x0102_0304);
    }

    #[test]
    fn test_values_above_signed_range() {
        // Payload length is unsigned; 0x8000_0000 and u32::MAX must not be
        // mangled by any sign extension.
        assert_eq!(u32_from_bytes(&u32_to_bytes(0x8000_0000), 0), 0x8000_0000);
        assert_eq!(u32_to_bytes(u32::MAX), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(u32_from_bytes(&[0xFF, 0xFF, 0xFF, 0xFF], 0), u32::MAX);
    }

    #[test]
    fn test_read_at_offset() {
        let data = [0xAA, 0xBB, 0x00, 0x00, 0x01, 0x02];
        assert_eq!(u32_from_bytes(&data, 2), 0x0000_0102);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(value: u32) {
            prop_assert_eq!(u32_from_bytes(&u32_to_bytes(value), 0), value);
        }
    }
}
