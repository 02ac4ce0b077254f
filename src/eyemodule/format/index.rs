//! Record list index builders for the three eyemodule databases.
//!
//! Each database carries a list of 8-byte record entries right after the
//! 78-byte preamble. The three databases use the same entry shape
//! (`u32 BE data offset, u8 attribute, 3-byte BE uid`) but index it
//! differently:
//!
//! - main: data offset → category id, plus the category name table
//! - color: uid → payload offset, one indexed record per 24 physical ones
//! - note: uid → payload offset, one-to-one

use std::collections::HashMap;
use std::io;

use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};

use crate::eyemodule::format::container::{Container, RECORD_ENTRY_LEN, RECORD_LIST_START};
use crate::eyemodule::types::error::{EyemoduleError, Result};
use crate::eyemodule::utils;

/// Each color image occupies 24 physical records; only the first carries
/// a meaningful uid, the other 23 are payload continuation records.
const COLOR_RECORDS_PER_IMAGE: u16 = 24;
/// Bytes to skip after an indexed color entry to reach the next one
/// (23 continuation entries x 8 bytes).
const COLOR_CONTINUATION_SPAN: u64 = 23 * RECORD_ENTRY_LEN as u64;

/// Category name slots are 16 bytes, NUL terminated within the slot.
const CATEGORY_SLOT_LEN: usize = 16;

/// Index over the main database: the authoritative image ordering plus
/// per-image category resolution.
///
/// An image's number is its position in the ascending, deduplicated list
/// of record data offsets. It is not a field stored in the database.
#[derive(Debug)]
pub struct ImageIndex {
    offsets: Vec<u32>,
    categories: HashMap<u32, u8>,
    category_names: Vec<String>,
}

impl ImageIndex {
    /// Build the index from the main database's record list and its
    /// appinfo category table.
    pub fn parse(container: &Container) -> Result<Self> {
        let count = container.record_count() as usize;
        let list = read_list_bytes(container, RECORD_LIST_START, count * RECORD_ENTRY_LEN)?;

        let mut categories = HashMap::with_capacity(count);
        for entry in list.chunks_exact(RECORD_ENTRY_LEN) {
            let data_offset = BigEndian::read_u32(&entry[..4]);
            // The category is the least significant four bits of the
            // attribute byte.
            let category_id = entry[4] & 0x0F;
            trace!("image record: offset {:#x}, category {}", data_offset, category_id);
            categories.insert(data_offset, category_id);
        }

        let mut offsets: Vec<u32> = categories.keys().copied().collect();
        offsets.sort_unstable();

        let category_names = parse_category_names(container, offsets.first().copied())?;
        debug!(
            "Image index built: {} images, {} categories",
            offsets.len(),
            category_names.len()
        );

        Ok(Self {
            offsets,
            categories,
            category_names,
        })
    }

    /// Number of images in the main database.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Data offset of the numbered image, if the number is in range.
    pub fn offset_of(&self, image_nr: usize) -> Option<u32> {
        self.offsets.get(image_nr).copied()
    }

    /// Resolve the numbered image's category name.
    ///
    /// A category id pointing past the name table is a hard error; it is
    /// never clamped.
    pub fn category_of(&self, image_nr: usize) -> Result<&str> {
        let offset = self
            .offsets
            .get(image_nr)
            .ok_or(EyemoduleError::OutOfRange {
                requested: image_nr,
                count: self.offsets.len(),
            })?;
        let category_id = self.categories[offset];
        self.category_names
            .get(category_id as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                EyemoduleError::MalformedContainer(format!(
                    "category id {} of image {} exceeds the {}-entry name table",
                    category_id,
                    image_nr,
                    self.category_names.len()
                ))
            })
    }
}

/// Read the category name table from the appinfo block.
///
/// Names live in 16-byte slots starting 2 bytes into the appinfo block.
/// Reading stops at the first empty slot, or once the read position would
/// reach the first image's data (the payload area bounds the table from
/// above; with no images at all, the file size does).
fn parse_category_names(container: &Container, first_image_offset: Option<u32>) -> Result<Vec<String>> {
    let bound = first_image_offset.map(u64::from).unwrap_or(container.len());
    let slot_len = CATEGORY_SLOT_LEN as u64;
    let mut names = Vec::new();
    let mut pos = u64::from(container.appinfo_offset()) + 2;

    while pos + slot_len < bound {
        let slot = container.read_at(pos, CATEGORY_SLOT_LEN)?;
        if slot[0] == 0 {
            break;
        }
        names.push(utils::decode_palm_text(&slot));
        pos += slot_len;
    }

    Ok(names)
}

/// Build the uid → payload-offset index of the color database.
///
/// Only every 24th record carries a valid indexed header, so the scan
/// strides: read one 8-byte entry, then advance past the 23 continuation
/// entries (184 bytes) to the next indexed one.
pub fn parse_color_index(container: &Container) -> Result<HashMap<u32, u32>> {
    let count = container.record_count();
    if count % COLOR_RECORDS_PER_IMAGE != 0 {
        return Err(EyemoduleError::MalformedContainer(format!(
            "{}: color record count {} is not a multiple of {}",
            container.path().display(),
            count,
            COLOR_RECORDS_PER_IMAGE
        )));
    }

    let mut index = HashMap::with_capacity((count / COLOR_RECORDS_PER_IMAGE) as usize);
    let mut pos = RECORD_LIST_START;
    for _ in (0..count).step_by(COLOR_RECORDS_PER_IMAGE as usize) {
        let entry = read_list_bytes(container, pos, RECORD_ENTRY_LEN)?;
        let data_offset = BigEndian::read_u32(&entry[..4]);
        let uid = utils::read_u24(&entry[5..8]);
        trace!("color record: uid {:#08x} -> offset {:#x}", uid, data_offset);
        index.insert(uid, data_offset);
        pos += RECORD_ENTRY_LEN as u64 + COLOR_CONTINUATION_SPAN;
    }

    debug!("Color index built: {} payloads", index.len());
    Ok(index)
}

/// Build the uid → payload-offset index of the note database. Every
/// record is indexed; there is no striding.
pub fn parse_note_index(container: &Container) -> Result<HashMap<u32, u32>> {
    let count = container.record_count() as usize;
    let list = read_list_bytes(container, RECORD_LIST_START, count * RECORD_ENTRY_LEN)?;

    let mut index = HashMap::with_capacity(count);
    for entry in list.chunks_exact(RECORD_ENTRY_LEN) {
        let data_offset = BigEndian::read_u32(&entry[..4]);
        let uid = utils::read_u24(&entry[5..8]);
        index.insert(uid, data_offset);
    }

    debug!("Note index built: {} notes", index.len());
    Ok(index)
}

/// Read record list bytes, reporting a list shorter than the preamble's
/// record count promises as a malformed container rather than plain I/O.
fn read_list_bytes(container: &Container, offset: u64, len: usize) -> Result<Vec<u8>> {
    container.read_at(offset, len).map_err(|e| match e {
        EyemoduleError::Io(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => {
            EyemoduleError::MalformedContainer(format!(
                "{}: record list truncated ({} bytes at offset {} not available for {} declared records)",
                container.path().display(),
                len,
                offset,
                container.record_count()
            ))
        }
        other => other,
    })
}
