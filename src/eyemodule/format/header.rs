//! Image header decoding.
//!
//! Every image in the main database starts with a fixed 58-byte
//! big-endian header at its record data offset:
//!
//! ```text
//! [32 bytes] name, NUL terminated within the field
//! [ 1 byte ] version
//! [ 1 byte ] type
//! [ 4 bytes] first color record uid (0 = grayscale image)
//! [ 4 bytes] note uid (0 = no note)
//! [ 2 bytes] last scroll X
//! [ 2 bytes] last scroll Y
//! [ 4 bytes] created, seconds since 1904-01-01T00:00:00 UTC
//! [ 2 bytes] anchor X (0xFFFF = none)
//! [ 2 bytes] anchor Y (0xFFFF = none)
//! [ 2 bytes] width in pixels
//! [ 2 bytes] height in pixels
//! ```

use byteorder::{BigEndian, ByteOrder};

use crate::eyemodule::types::error::{EyemoduleError, Result};
use crate::eyemodule::types::models::{ImageHeader, PALM_EPOCH_UNIX_OFFSET};
use crate::eyemodule::utils;

/// Size of the fixed image header.
pub const IMAGE_HEADER_LEN: usize = 58;

const ANCHOR_UNSET: u16 = 0xFFFF;

/// Decode a 58-byte image header.
///
/// # Errors
/// Returns [`EyemoduleError::MalformedImageData`] if `bytes` is shorter
/// than 58 bytes.
pub fn parse(bytes: &[u8]) -> Result<ImageHeader> {
    if bytes.len() < IMAGE_HEADER_LEN {
        return Err(EyemoduleError::MalformedImageData(format!(
            "image header truncated: {} bytes, need {}",
            bytes.len(),
            IMAGE_HEADER_LEN
        )));
    }

    let created_raw = BigEndian::read_u32(&bytes[46..50]);
    // The raw count is unsigned seconds since 1904; widen before adding
    // the epoch offset so the shift to Unix time cannot overflow.
    let created = i64::from(created_raw) + PALM_EPOCH_UNIX_OFFSET;

    Ok(ImageHeader {
        name: utils::decode_palm_text(&bytes[..32]),
        version: bytes[32],
        image_type: bytes[33],
        first_color_record_id: nonzero(BigEndian::read_u32(&bytes[34..38])),
        note_id: nonzero(BigEndian::read_u32(&bytes[38..42])),
        last_scroll_x: BigEndian::read_u16(&bytes[42..44]),
        last_scroll_y: BigEndian::read_u16(&bytes[44..46]),
        created,
        anchor_x: anchor(BigEndian::read_u16(&bytes[50..52])),
        anchor_y: anchor(BigEndian::read_u16(&bytes[52..54])),
        width: BigEndian::read_u16(&bytes[54..56]),
        height: BigEndian::read_u16(&bytes[56..58]),
    })
}

fn nonzero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

fn anchor(value: u16) -> Option<u16> {
    (value != ANCHOR_UNSET).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Vec<u8> {
        let mut bytes = vec![0u8; IMAGE_HEADER_LEN];
        bytes[..7].copy_from_slice(b"Sunset\0");
        bytes[32] = 1; // version
        bytes[33] = 2; // type
        bytes[34..38].copy_from_slice(&0x00012345u32.to_be_bytes()); // color uid
        bytes[38..42].copy_from_slice(&0u32.to_be_bytes()); // no note
        bytes[42..44].copy_from_slice(&10u16.to_be_bytes());
        bytes[44..46].copy_from_slice(&20u16.to_be_bytes());
        bytes[46..50].copy_from_slice(&3_043_324_800u32.to_be_bytes());
        bytes[50..52].copy_from_slice(&0xFFFFu16.to_be_bytes()); // no anchor
        bytes[52..54].copy_from_slice(&7u16.to_be_bytes());
        bytes[54..56].copy_from_slice(&320u16.to_be_bytes());
        bytes[56..58].copy_from_slice(&240u16.to_be_bytes());
        bytes
    }

    #[test]
    fn decodes_all_fields() {
        let header = parse(&sample_header()).unwrap();
        assert_eq!(header.name, "Sunset");
        assert_eq!(header.version, 1);
        assert_eq!(header.image_type, 2);
        assert_eq!(header.first_color_record_id, Some(0x12345));
        assert_eq!(header.note_id, None);
        assert_eq!(header.last_scroll_x, 10);
        assert_eq!(header.last_scroll_y, 20);
        assert_eq!(header.anchor_x, None);
        assert_eq!(header.anchor_y, Some(7));
        assert_eq!(header.width, 320);
        assert_eq!(header.height, 240);
    }

    #[test]
    fn created_zero_is_the_palm_epoch() {
        let mut bytes = sample_header();
        bytes[46..50].copy_from_slice(&0u32.to_be_bytes());
        let header = parse(&bytes).unwrap();
        // 1904-01-01T00:00:00 UTC as Unix seconds
        assert_eq!(header.created, -2_082_844_800);
    }

    #[test]
    fn created_arithmetic_does_not_overflow_u32() {
        let mut bytes = sample_header();
        bytes[46..50].copy_from_slice(&u32::MAX.to_be_bytes());
        let header = parse(&bytes).unwrap();
        assert_eq!(header.created, i64::from(u32::MAX) - 2_082_844_800);
    }

    #[test]
    fn short_input_is_rejected() {
        let err = parse(&[0u8; 57]).unwrap_err();
        assert!(matches!(
            err,
            crate::eyemodule::types::error::EyemoduleError::MalformedImageData(_)
        ));
    }

    #[test]
    fn name_without_nul_uses_the_whole_field() {
        let mut bytes = sample_header();
        bytes[..32].copy_from_slice(&[b'x'; 32]);
        let header = parse(&bytes).unwrap();
        assert_eq!(header.name.len(), 32);
    }
}
