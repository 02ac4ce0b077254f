//! Raw PDB container access.
//!
//! Every eyemodule database (main, color, note) is a Palm PDB file: a
//! 78-byte preamble, a list of 8-byte record entries, then the record
//! payloads. Only two preamble fields matter to this crate; the rest is
//! opaque.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};

use crate::eyemodule::types::error::{EyemoduleError, Result};

/// Byte offset of the appinfo-block pointer in the PDB preamble.
const APPINFO_OFFSET_FIELD: usize = 52;
/// Byte offset of the record count in the PDB preamble.
const RECORD_COUNT_FIELD: usize = 76;
/// The preamble is 78 bytes; the record list starts right after it.
pub const RECORD_LIST_START: u64 = 78;
/// Size of one record list entry: u32 data offset, u8 attribute, 3-byte uid.
pub const RECORD_ENTRY_LEN: usize = 8;

/// One open eyemodule database file.
///
/// Reads are offset-addressed: the backing file's seek position is taken
/// and released under a lock per call, so concurrent callers never observe
/// each other's cursor. Nothing is cached; every read hits the file.
#[derive(Debug)]
pub struct Container {
    file: Mutex<File>,
    path: PathBuf,
    len: u64,
    appinfo_offset: u32,
    record_count: u16,
}

impl Container {
    /// Open a container file and decode its generic preamble fields.
    ///
    /// # Errors
    /// - [`EyemoduleError::NotFound`] if the file does not exist
    /// - [`EyemoduleError::MalformedContainer`] if the preamble is truncated
    /// - [`EyemoduleError::Io`] for any other I/O failure
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                EyemoduleError::NotFound(path.to_path_buf())
            } else {
                EyemoduleError::Io(e)
            }
        })?;
        let len = file.metadata()?.len();

        let mut preamble = [0u8; RECORD_LIST_START as usize];
        file.read_exact(&mut preamble).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                EyemoduleError::MalformedContainer(format!(
                    "{}: truncated preamble ({} bytes, need {})",
                    path.display(),
                    len,
                    RECORD_LIST_START
                ))
            } else {
                EyemoduleError::Io(e)
            }
        })?;

        let appinfo_offset = BigEndian::read_u32(&preamble[APPINFO_OFFSET_FIELD..APPINFO_OFFSET_FIELD + 4]);
        let record_count = BigEndian::read_u16(&preamble[RECORD_COUNT_FIELD..RECORD_COUNT_FIELD + 2]);
        debug!(
            "Opened container {}: {} bytes, {} records, appinfo at {:#x}",
            path.display(),
            len,
            record_count,
            appinfo_offset
        );

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
            len,
            appinfo_offset,
            record_count,
        })
    }

    /// Offset of the appinfo block (category table for the main database).
    pub fn appinfo_offset(&self) -> u32 {
        self.appinfo_offset
    }

    /// Number of entries in the record list.
    pub fn record_count(&self) -> u16 {
        self.record_count
    }

    /// Total file size in bytes, captured at open.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Path this container was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read exactly `len` bytes at the absolute `offset`.
    pub fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        trace!("read_at {}: {} bytes @ {:#x}", self.path.display(), len, offset);
        let mut file = self.file.lock().map_err(|_| EyemoduleError::LockPoisoned)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a NUL-terminated byte string starting at the absolute `offset`.
    ///
    /// The terminator is not included. A blob that runs into end-of-file
    /// without a terminator yields the bytes read so far.
    pub fn read_until_nul(&self, offset: u64) -> Result<Vec<u8>> {
        let mut file = self.file.lock().map_err(|_| EyemoduleError::LockPoisoned)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut out = Vec::new();
        let mut chunk = [0u8; 64];
        loop {
            let n = file.read(&mut chunk)?;
            if n == 0 {
                return Ok(out);
            }
            if let Some(nul) = chunk[..n].iter().position(|&b| b == 0) {
                out.extend_from_slice(&chunk[..nul]);
                return Ok(out);
            }
            out.extend_from_slice(&chunk[..n]);
        }
    }
}
