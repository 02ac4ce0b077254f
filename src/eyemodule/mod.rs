//! Core eyemodule database reader module

pub mod catalog;
pub mod codec;
pub mod format;
pub mod types;
mod utils;

pub use catalog::ImageCatalog;
pub use types::error::{EyemoduleError, Result};
pub use types::models::{DecodedImage, ImageHeader};
