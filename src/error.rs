//! Error type shared by every layer of the reader.

use thiserror::Error;

/// Errors produced while opening an archive or reading from it.
///
/// None of these are retried internally: a corrupt or unsupported archive
/// stays corrupt, so every failure is handed straight back to the caller.
#[derive(Debug, Error)]
pub enum ZipError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The source could not report its length or reposition its cursor.
    #[error("source must support seeking")]
    NotSeekable,

    /// No end-of-central-directory record in the trailing search window.
    #[error("end of central directory signature not found")]
    SignatureNotFound,

    #[error("bad {record} signature: expected {expected:#010x}, found {found:#010x}")]
    BadSignature {
        record: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("unsupported compression method: {0}")]
    UnsupportedCompressionMethod(u16),

    /// The stream was released and can no longer be read.
    #[error("stream used after it was released")]
    UseAfterDispose,

    #[error("CRC-32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, ZipError>;

impl ZipError {
    /// Wrap into an `io::Error` for use inside `Read` implementations.
    ///
    /// Callers can get the original back through
    /// [`std::io::Error::get_ref`] and a downcast.
    pub(crate) fn into_io(self) -> std::io::Error {
        match self {
            ZipError::Io(err) => err,
            other => std::io::Error::other(other),
        }
    }
}
