//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures from any
//! source that implements [`Read`] and [`Seek`].
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. Read the Central Directory to get metadata for all files
//! 3. For extraction, read each file's Local File Header to find where
//!    its data begins
//!
//! Every step repositions the source with an absolute seek, so callers
//! must not interleave other reads on the same source.

use log::{debug, warn};
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

use crate::error::{Result, ZipError};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format, rounded up to 64 KiB.
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65536;

/// Measure the source and leave it positioned at its end.
///
/// Any failure here means the source cannot be navigated, which is
/// reported as [`ZipError::NotSeekable`] rather than a raw I/O error.
pub fn source_len<R: Seek>(source: &mut R) -> Result<u64> {
    source
        .seek(SeekFrom::End(0))
        .map_err(|_| ZipError::NotSeekable)
}

/// Find and parse the End of Central Directory record.
///
/// The EOCD is located at the end of the ZIP file. This function handles
/// both the simple case (no comment) and archives with comments by
/// searching backwards for the signature.
///
/// # Returns
///
/// A tuple of (EOCD record, offset of EOCD in file).
///
/// # Errors
///
/// [`ZipError::SignatureNotFound`] if the trailing window holds no EOCD
/// signature, which also covers archives whose trailer sits outside it.
pub fn find_eocd<R: Read + Seek>(
    source: &mut R,
    size: u64,
) -> Result<(EndOfCentralDirectory, u64)> {
    let eocd_size = EndOfCentralDirectory::SIZE as u64;

    // Optimization: First try the simple case where there's no comment.
    if size >= eocd_size {
        let offset = size - eocd_size;
        let mut buf = [0u8; EndOfCentralDirectory::SIZE];
        source.seek(SeekFrom::Start(offset))?;
        source.read_exact(&mut buf)?;

        if buf[0..4] == EndOfCentralDirectory::MAGIC && buf[20..22] == [0, 0] {
            let eocd = EndOfCentralDirectory::read(&mut Cursor::new(&buf[..]))?;
            return Ok((eocd, offset));
        }
    }

    let search_size = (MAX_COMMENT_SIZE + eocd_size).min(size);
    let search_start = size - search_size;

    let mut buf = vec![0u8; search_size as usize];
    source.seek(SeekFrom::Start(search_start))?;
    source.read_exact(&mut buf)?;

    let pos = locate_eocd(&buf).ok_or(ZipError::SignatureNotFound)?;
    let eocd = EndOfCentralDirectory::read(&mut Cursor::new(&buf[pos..]))?;
    Ok((eocd, search_start + pos as u64))
}

/// Scan `window` (the tail of the archive) backwards for the EOCD.
///
/// A candidate whose comment length runs exactly to the end of the window
/// wins, which skips signature bytes that merely appear inside the
/// comment. If no candidate lines up that way (for example when junk was
/// appended after the archive), the last signature in the window is used.
pub(crate) fn locate_eocd(window: &[u8]) -> Option<usize> {
    let last = window.len().checked_sub(EndOfCentralDirectory::SIZE)?;
    let mut fallback = None;

    for i in (0..=last).rev() {
        if window[i..i + 4] != EndOfCentralDirectory::MAGIC {
            continue;
        }

        let comment_len = u16::from_le_bytes([window[i + 20], window[i + 21]]) as usize;
        if comment_len == window.len() - i - EndOfCentralDirectory::SIZE {
            return Some(i);
        }
        fallback.get_or_insert(i);
    }

    fallback
}

/// Read exactly `eocd.total_entries` central directory headers starting at
/// `eocd.cd_offset`.
///
/// Records are assumed to be contiguous; there is no re-scanning for
/// signatures. The first bad record aborts the whole read.
pub fn read_central_directory<R: Read + Seek>(
    source: &mut R,
    eocd: &EndOfCentralDirectory,
) -> Result<Vec<CentralDirectoryHeader>> {
    if eocd.disk_number != 0 || eocd.disk_with_cd != 0 {
        warn!(
            "archive claims to span disks (disk {}, central directory on disk {}); reading as single-disk",
            eocd.disk_number, eocd.disk_with_cd
        );
    }

    source.seek(SeekFrom::Start(eocd.cd_offset as u64))?;

    let mut reader = BufReader::new(source);
    let mut headers = Vec::with_capacity(eocd.total_entries as usize);
    for _ in 0..eocd.total_entries {
        headers.push(CentralDirectoryHeader::read(&mut reader)?);
    }

    debug!(
        "read {} central directory records at offset {}",
        headers.len(),
        eocd.cd_offset
    );
    Ok(headers)
}

/// Read the Local File Header for an entry.
///
/// The Local File Header has variable-length fields (filename, extra
/// field) that may differ from the Central Directory entry, so the data
/// offset can only be learned by decoding it. On success the source is
/// positioned at the first byte of the entry's data, and that offset is
/// returned alongside the header.
pub fn read_local_header<R: Read + Seek>(
    source: &mut R,
    lfh_offset: u64,
) -> Result<(LocalFileHeader, u64)> {
    source.seek(SeekFrom::Start(lfh_offset))?;
    let header = LocalFileHeader::read(source)?;
    let data_offset = source.stream_position()?;
    Ok((header, data_offset))
}
