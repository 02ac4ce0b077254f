//! Low-level byte reading utilities

use encoding_rs::WINDOWS_1252;

/// Read a 3-byte big-endian number.
///
/// Record uids in the color and note databases are stored as 3-byte
/// big-endian values inside the 8-byte record list entries.
pub(crate) fn read_u24(bytes: &[u8]) -> u32 {
    debug_assert_eq!(bytes.len(), 3);
    (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2])
}

/// Decode Palm OS text up to the first NUL byte (or the whole slice if
/// none). The Palm character set is a Windows-1252 superset.
pub(crate) fn decode_palm_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let (text, _, _) = WINDOWS_1252.decode(&bytes[..end]);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u24_is_big_endian() {
        assert_eq!(read_u24(&[0x01, 0x02, 0x03]), 0x010203);
        assert_eq!(read_u24(&[0xFF, 0xFF, 0xFF]), 0x00FF_FFFF);
    }

    #[test]
    fn palm_text_stops_at_nul() {
        assert_eq!(decode_palm_text(b"hello\0junk"), "hello");
        assert_eq!(decode_palm_text(b"no terminator"), "no terminator");
        // 0xE9 is e-acute in Windows-1252
        assert_eq!(decode_palm_text(&[b'c', b'a', b'f', 0xE9, 0]), "café");
    }
}
