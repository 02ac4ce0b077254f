//! File format parsing layer for eyemodule PDB databases.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw file I/O and the high-level
//! [`ImageCatalog`](crate::eyemodule::catalog::ImageCatalog).
//!
//! # Module Organization
//!
//! - [`container`]: Opens one PDB file and exposes offset-addressed reads
//! - [`index`]: Builds the image, color and note indices from record lists
//! - [`header`]: Decodes the fixed 58-byte per-image header
//!
//! # Architecture
//!
//! ```text
//! File Structure (each database):
//! ┌─────────────────┐
//! │  PDB Preamble   │ ← container::Container::open()
//! ├─────────────────┤
//! │  Record List    │ ← index::{ImageIndex::parse,
//! │  (8-byte        │          parse_color_index,
//! │   entries)      │          parse_note_index}
//! ├─────────────────┤
//! │  Record Data    │ ← header::parse() + codec decoding
//! │  (headers,      │
//! │   pixels, text) │
//! └─────────────────┘
//! ```

pub mod container;
pub mod header;
pub mod index;
