//! Custom error types for the eyemodule-reader crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Callers can match exhaustively: construction failures surface as
/// [`NotFound`](EyemoduleError::NotFound), [`Io`](EyemoduleError::Io) or
/// [`MalformedContainer`](EyemoduleError::MalformedContainer); per-image
/// failures as [`OutOfRange`](EyemoduleError::OutOfRange) or
/// [`MalformedImageData`](EyemoduleError::MalformedImageData).
#[derive(Debug, Error)]
pub enum EyemoduleError {
    /// A required container file does not exist.
    #[error("container file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An error originating from I/O operations (read/seek failures).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container preamble or record list is structurally invalid.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The requested image number is not a valid index into the catalog.
    #[error("image number {requested} out of range: catalog holds {count} images")]
    OutOfRange { requested: usize, count: usize },

    /// An image payload is inconsistent with its header, or a
    /// cross-container reference points at nothing.
    #[error("malformed image data: {0}")]
    MalformedImageData(String),

    /// A mutex lock was poisoned, indicating a panic in another thread
    /// holding the lock.
    #[error("a mutex lock was poisoned, indicating a panic in another thread holding the lock")]
    LockPoisoned,
}

/// A convenience `Result` type alias using the crate's `EyemoduleError` type.
pub type Result<T> = std::result::Result<T, EyemoduleError>;
