//! Interleaved 4:2:2 color codec.
//!
//! Color payloads are a fixed-size blob copied out of the color database:
//! the sensor always captures 320x240, so the blob is always
//! `320 * 240 * 2 + 24 * 4 = 153696` bytes regardless of the header's
//! declared dimensions. Pixel data is UYVY quads, two pixels per quad,
//! with non-pixel bookkeeping bytes interspersed at fixed positions.

use log::trace;

use crate::eyemodule::types::error::{EyemoduleError, Result};
use crate::eyemodule::types::models::DecodedImage;

/// Exact size of a color payload (320x240 at 2 bytes per pixel plus the
/// interspersed record bookkeeping).
pub const COLOR_PAYLOAD_LEN: usize = 153_696;

/// The payload is stitched from physical records; every 6404th byte
/// offset lands on a record boundary whose quad is bookkeeping, not
/// pixels.
const RECORD_BOUNDARY_STRIDE: usize = 6_404;

/// Decode a fixed-size color payload into an RGB raster.
///
/// The scan first unpacks the 4:2:2 quads into a YCbCr buffer, then runs
/// the BT.601 conversion as a separate pass.
///
/// # Errors
/// Returns [`EyemoduleError::MalformedImageData`] if the payload is not
/// exactly [`COLOR_PAYLOAD_LEN`] bytes, or if the unpacked sample count
/// does not match `width * height`.
pub fn decode(payload: &[u8], width: u16, height: u16) -> Result<DecodedImage> {
    if payload.len() != COLOR_PAYLOAD_LEN {
        return Err(EyemoduleError::MalformedImageData(format!(
            "color payload is {} bytes, expected {}",
            payload.len(),
            COLOR_PAYLOAD_LEN
        )));
    }

    let ycbcr = unpack_ycbcr(payload);
    let samples = ycbcr.len() / 3;
    let pixel_count = width as usize * height as usize;
    if samples != pixel_count {
        return Err(EyemoduleError::MalformedImageData(format!(
            "color payload unpacked to {} samples, header declares {}x{} = {}",
            samples, width, height, pixel_count
        )));
    }
    trace!("unpacked {} YCbCr samples for {}x{}", samples, width, height);

    let mut pixels = Vec::with_capacity(ycbcr.len());
    for sample in ycbcr.chunks_exact(3) {
        let (r, g, b) = ycbcr_to_rgb(sample[0], sample[1], sample[2]);
        pixels.push(r);
        pixels.push(g);
        pixels.push(b);
    }

    Ok(DecodedImage::Rgb {
        width,
        height,
        pixels,
    })
}

/// Unpack the UYVY quads into a row-major YCbCr buffer (3 bytes per
/// sample).
///
/// The first 4 bytes of the payload are non-pixel header data and are
/// skipped unconditionally; quads starting on a record boundary (offsets
/// divisible by 6404) are bookkeeping and contribute no samples. Each
/// remaining quad `U Y1 V Y2` yields the two samples `(Y1, U, V)` and
/// `(Y2, U, V)`.
fn unpack_ycbcr(payload: &[u8]) -> Vec<u8> {
    let mut ycbcr = Vec::with_capacity(payload.len() / 2 * 3);
    let mut pos = 4;
    while pos + 4 <= payload.len() {
        if pos % RECORD_BOUNDARY_STRIDE != 0 {
            let (u, y1, v, y2) = (payload[pos], payload[pos + 1], payload[pos + 2], payload[pos + 3]);
            ycbcr.extend_from_slice(&[y1, u, v, y2, u, v]);
        }
        pos += 4;
    }
    ycbcr
}

/// Convert one pixel from YCbCr to RGB (ITU-R BT.601, full range).
///
/// Fixed-point with coefficients scaled by 1024.
pub(crate) fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = i32::from(y);
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = (y + ((cr * 1436) >> 10)).clamp(0, 255) as u8;
    let g = (y - ((cb * 352 + cr * 731) >> 10)).clamp(0, 255) as u8;
    let b = (y + ((cb * 1815) >> 10)).clamp(0, 255) as u8;

    (r, g, b)
}
