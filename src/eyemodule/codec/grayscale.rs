//! Nibble-packed grayscale codec.
//!
//! Grayscale payloads store two pixels per byte, 4 bits each, with 0
//! meaning white. Each nibble is expanded to 8 bits and inverted.

use crate::eyemodule::types::error::{EyemoduleError, Result};
use crate::eyemodule::types::models::DecodedImage;

/// Decode a nibble-packed grayscale payload into an 8-bit raster.
///
/// # Errors
/// Returns [`EyemoduleError::MalformedImageData`] unless the payload is
/// exactly `width * height / 2` bytes.
pub fn decode(payload: &[u8], width: u16, height: u16) -> Result<DecodedImage> {
    let pixel_count = width as usize * height as usize;
    let expected = pixel_count / 2;
    if payload.len() != expected {
        return Err(EyemoduleError::MalformedImageData(format!(
            "grayscale payload is {} bytes, expected {} for {}x{}",
            payload.len(),
            expected,
            width,
            height
        )));
    }

    let mut pixels = Vec::with_capacity(pixel_count);
    for &byte in payload {
        pixels.push(255 - (byte & 0xF0));
        pixels.push(255 - ((byte & 0x0F) << 4));
    }

    Ok(DecodedImage::Grayscale {
        width,
        height,
        pixels,
    })
}
