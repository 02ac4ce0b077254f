//! Pixel codecs for the two eyemodule image formats.
//!
//! - [`grayscale`]: 4-bit nibble-packed, two pixels per byte
//! - [`color`]: interleaved UYVY 4:2:2 with record-boundary skip rules
//!
//! Both decoders validate payload size against the header's declared
//! dimensions and produce an owned [`DecodedImage`] raster.
//!
//! [`DecodedImage`]: crate::eyemodule::types::models::DecodedImage

pub mod color;
pub mod grayscale;
