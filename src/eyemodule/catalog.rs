//! The high-level image catalog over the three eyemodule databases.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use crate::eyemodule::codec;
use crate::eyemodule::format::container::Container;
use crate::eyemodule::format::header::{self, IMAGE_HEADER_LEN};
use crate::eyemodule::format::index::{self, ImageIndex};
use crate::eyemodule::types::error::{EyemoduleError, Result};
use crate::eyemodule::types::models::{DecodedImage, ImageHeader};

/// Canonical filenames of the three databases inside a backup directory.
pub const MAIN_DB_NAME: &str = "eyemoduleDB.pdb";
pub const COLOR_DB_NAME: &str = "eyemoduleVGADB.pdb";
pub const NOTE_DB_NAME: &str = "eyemoduleNoteDB.pdb";

/// Read-only catalog over one eyemodule image collection.
///
/// Construction opens the three databases and builds all three indices
/// up front; no lookups are valid against a partially built catalog, so
/// any failure aborts construction and closes whatever was already
/// opened. After construction the indices are immutable. The navigation
/// cursor is the only mutable state.
///
/// Images are numbered by the ascending order of their data offsets in
/// the main database, starting at 0.
#[derive(Debug)]
pub struct ImageCatalog {
    main: Container,
    color: Container,
    note: Container,

    image_index: ImageIndex,
    color_index: HashMap<u32, u32>,
    note_index: HashMap<u32, u32>,

    /// Current image number for cursor-relative operations.
    cursor: usize,
}

impl ImageCatalog {
    /// Open the catalog from a directory holding the canonically named
    /// database trio (`eyemoduleDB.pdb`, `eyemoduleVGADB.pdb`,
    /// `eyemoduleNoteDB.pdb`).
    ///
    /// # Errors
    /// Returns an error if any database is missing, has a truncated
    /// preamble, or carries an inconsistent record list. No partially
    /// initialized catalog is ever returned.
    pub fn open(pdb_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = pdb_dir.as_ref();
        info!("Opening eyemodule databases in {}", dir.display());
        Self::from_paths(
            dir.join(MAIN_DB_NAME),
            dir.join(COLOR_DB_NAME),
            dir.join(NOTE_DB_NAME),
        )
    }

    /// Open the catalog from explicit paths to the three databases.
    pub fn from_paths(
        main_path: impl AsRef<Path>,
        color_path: impl AsRef<Path>,
        note_path: impl AsRef<Path>,
    ) -> Result<Self> {
        // Containers already opened are dropped (and their handles
        // closed) on any early return below.
        let main = Container::open(main_path)?;
        let color = Container::open(color_path)?;
        let note = Container::open(note_path)?;

        let image_index = ImageIndex::parse(&main)?;
        let color_index = index::parse_color_index(&color)?;
        let note_index = index::parse_note_index(&note)?;

        info!(
            "Catalog ready: {} images, {} color payloads, {} notes",
            image_index.len(),
            color_index.len(),
            note_index.len()
        );

        Ok(Self {
            main,
            color,
            note,
            image_index,
            color_index,
            note_index,
            cursor: 0,
        })
    }

    /// Number of images in the catalog.
    pub fn image_count(&self) -> usize {
        self.image_index.len()
    }

    /// Current image number.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Decode the header of an image.
    ///
    /// With `None`, reads at the cursor. With `Some(nr)`, an in-range
    /// number becomes the new cursor; an out-of-range number fails with
    /// [`EyemoduleError::OutOfRange`] and leaves the cursor untouched.
    pub fn get_header(&mut self, image_nr: Option<usize>) -> Result<ImageHeader> {
        let nr = self.resolve(image_nr)?;
        self.header_at(nr)
    }

    /// Decode the pixels of an image, dispatching to the color or
    /// grayscale codec based on its header.
    ///
    /// Cursor behavior matches [`get_header`](Self::get_header). Decode
    /// failures are local: they leave the indices and the cursor intact.
    pub fn get_image(&mut self, image_nr: Option<usize>) -> Result<DecodedImage> {
        let nr = self.resolve(image_nr)?;
        let offset = self.offset_at(nr)?;
        let header = self.header_at(nr)?;
        debug!(
            "Decoding image {}: '{}' {}x{} ({})",
            nr,
            header.name,
            header.width,
            header.height,
            if header.first_color_record_id.is_some() { "color" } else { "grayscale" }
        );

        if let Some(uid) = header.first_color_record_id {
            let payload_offset = self.color_index.get(&uid).copied().ok_or_else(|| {
                EyemoduleError::MalformedImageData(format!(
                    "image {} references color record uid {:#08x} which the color database does not contain",
                    nr, uid
                ))
            })?;
            let payload = self
                .color
                .read_at(u64::from(payload_offset), codec::color::COLOR_PAYLOAD_LEN)?;
            codec::color::decode(&payload, header.width, header.height)
        } else {
            let payload_len = header.width as usize * header.height as usize / 2;
            let payload = self
                .main
                .read_at(u64::from(offset) + IMAGE_HEADER_LEN as u64, payload_len)?;
            codec::grayscale::decode(&payload, header.width, header.height)
        }
    }

    /// Move the cursor forward by one. Returns the new image number, or
    /// `None` (cursor unchanged) when already at the last image.
    pub fn advance(&mut self) -> Option<usize> {
        if self.cursor + 1 < self.image_index.len() {
            self.cursor += 1;
            Some(self.cursor)
        } else {
            None
        }
    }

    /// Move the cursor back by one. Returns the new image number, or
    /// `None` (cursor unchanged) when already at image 0.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.cursor > 0 {
            self.cursor -= 1;
            Some(self.cursor)
        } else {
            None
        }
    }

    /// Category name of the numbered image. Does not move the cursor.
    pub fn category_of(&self, image_nr: usize) -> Result<&str> {
        self.image_index.category_of(image_nr)
    }

    /// Text of the note attached to the numbered image, or `None` if the
    /// image has no note. Does not move the cursor.
    ///
    /// # Errors
    /// A note id with no matching entry in the note database fails with
    /// [`EyemoduleError::MalformedImageData`].
    pub fn note_text_of(&self, image_nr: usize) -> Result<Option<String>> {
        let header = self.header_at(self.check_range(image_nr)?)?;
        let uid = match header.note_id {
            Some(uid) => uid,
            None => return Ok(None),
        };
        let offset = self.note_index.get(&uid).copied().ok_or_else(|| {
            EyemoduleError::MalformedImageData(format!(
                "image {} references note uid {:#08x} which the note database does not contain",
                image_nr, uid
            ))
        })?;
        let bytes = self.note.read_until_nul(u64::from(offset))?;
        Ok(Some(crate::eyemodule::utils::decode_palm_text(&bytes)))
    }

    /// Resolve an optional image number against the cursor, updating the
    /// cursor only when an explicit in-range number is given.
    fn resolve(&mut self, image_nr: Option<usize>) -> Result<usize> {
        match image_nr {
            None => Ok(self.cursor),
            Some(nr) => {
                let nr = self.check_range(nr)?;
                self.cursor = nr;
                Ok(nr)
            }
        }
    }

    fn check_range(&self, image_nr: usize) -> Result<usize> {
        if image_nr < self.image_index.len() {
            Ok(image_nr)
        } else {
            Err(EyemoduleError::OutOfRange {
                requested: image_nr,
                count: self.image_index.len(),
            })
        }
    }

    fn offset_at(&self, image_nr: usize) -> Result<u32> {
        self.image_index
            .offset_of(image_nr)
            .ok_or(EyemoduleError::OutOfRange {
                requested: image_nr,
                count: self.image_index.len(),
            })
    }

    fn header_at(&self, image_nr: usize) -> Result<ImageHeader> {
        let offset = self.offset_at(image_nr)?;
        let bytes = self.main.read_at(u64::from(offset), IMAGE_HEADER_LEN)?;
        header::parse(&bytes)
    }
}
