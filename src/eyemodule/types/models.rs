//! Data structures representing decoded eyemodule database content.

/// Seconds from 1904-01-01T00:00:00 UTC (the Palm OS epoch) to the Unix
/// epoch. Creation timestamps in image headers count from the Palm epoch.
pub const PALM_EPOCH_UNIX_OFFSET: i64 = -2_082_844_800;

/// Decoded 58-byte image header from the main database.
///
/// All multi-byte fields are stored big-endian on disk; sentinel values
/// (`0` for the record ids, `0xFFFF` for the anchors) are mapped to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image name as shown in the on-device image list.
    pub name: String,
    pub version: u8,
    pub image_type: u8,
    /// Uid of the first color record in the color database.
    /// `None` means the image is grayscale and its pixels live in the
    /// main database, right after the header.
    pub first_color_record_id: Option<u32>,
    /// Uid of the attached note in the note database, if any.
    pub note_id: Option<u32>,
    pub last_scroll_x: u16,
    pub last_scroll_y: u16,
    /// Creation time in seconds since the Unix epoch (UTC). Stored on
    /// disk as seconds since 1904-01-01T00:00:00 UTC.
    pub created: i64,
    pub anchor_x: Option<u16>,
    pub anchor_y: Option<u16>,
    /// Width in pixels, word aligned on device (320 for color images).
    pub width: u16,
    /// Height in pixels (240 for color images).
    pub height: u16,
}

/// A decoded raster image.
///
/// Pixel buffers are row-major. Grayscale images carry one 8-bit sample
/// per pixel; color images carry three (R, G, B) after BT.601 conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedImage {
    Grayscale {
        width: u16,
        height: u16,
        pixels: Vec<u8>,
    },
    Rgb {
        width: u16,
        height: u16,
        pixels: Vec<u8>,
    },
}

impl DecodedImage {
    pub fn width(&self) -> u16 {
        match self {
            DecodedImage::Grayscale { width, .. } | DecodedImage::Rgb { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u16 {
        match self {
            DecodedImage::Grayscale { height, .. } | DecodedImage::Rgb { height, .. } => *height,
        }
    }

    /// The raw sample buffer: `width * height` bytes for grayscale,
    /// `width * height * 3` for color.
    pub fn pixels(&self) -> &[u8] {
        match self {
            DecodedImage::Grayscale { pixels, .. } | DecodedImage::Rgb { pixels, .. } => pixels,
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, DecodedImage::Rgb { .. })
    }
}
