//! # eyemodule-reader
//!
//! A reader for the eyemodule handheld camera's PDB image databases
//! (`eyemoduleDB.pdb`, `eyemoduleVGADB.pdb`, `eyemoduleNoteDB.pdb`).
//! Recovers decoded raster images, per-image metadata, categories and
//! attached notes for archival and migration.
//!
//! Open an [`ImageCatalog`] over a backup directory, then query it:
//!
//! ```no_run
//! use eyemodule_reader::ImageCatalog;
//!
//! # fn main() -> eyemodule_reader::Result<()> {
//! let mut catalog = ImageCatalog::open("/backups/visor")?;
//! for nr in 0..catalog.image_count() {
//!     let header = catalog.get_header(Some(nr))?;
//!     let image = catalog.get_image(Some(nr))?;
//!     println!("{}: {}x{}", header.name, image.width(), image.height());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The catalog is strictly read-only; encoding the decoded rasters to an
//! on-disk image format is left to the caller.
pub mod eyemodule;

// Re-export the main types for convenience
pub use eyemodule::{
    catalog::ImageCatalog,
    types::{
        error::{EyemoduleError, Result},
        models::{DecodedImage, ImageHeader},
    },
};
