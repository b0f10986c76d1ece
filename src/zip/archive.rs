use log::{debug, trace, warn};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Result, ZipError};
use crate::io::BoundedReader;

use super::extractor::EntryReader;
use super::parser;
use super::structures::*;

/// Read-only index over a ZIP archive.
///
/// The archive owns whatever source it is given. Pass a `File` to hand
/// over ownership (it is closed when the archive is dropped, including
/// when [`new`](Self::new) fails), or `&mut File` to keep the file open
/// for the caller.
///
/// All reads go through the source's single cursor, so one archive must
/// be driven from one place at a time. [`extract`](Self::extract) borrows
/// the archive mutably for as long as its stream lives.
///
/// ## Example
///
/// ```no_run
/// use std::io::Read;
/// use tinyunzip::ZipArchive;
///
/// # fn main() -> tinyunzip::Result<()> {
/// let mut archive = ZipArchive::open_path("assets.zip")?;
/// for entry in archive.entries() {
///     println!("{} ({} bytes)", entry.file_name, entry.uncompressed_size);
/// }
///
/// let mut text = String::new();
/// archive.extract("readme.txt")?.read_to_string(&mut text)?;
/// # Ok(())
/// # }
/// ```
pub struct ZipArchive<R> {
    source: R,
    eocd: EndOfCentralDirectory,
    headers: Vec<CentralDirectoryHeader>,
    entries: Vec<ZipFileEntry>,
}

impl ZipArchive<File> {
    /// Open the file at `path` and index it. The file is owned by the
    /// archive and closed with it.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipArchive<R> {
    /// Locate the trailer and decode the whole central directory.
    ///
    /// Any bad or truncated record rejects the archive as a whole. Entry
    /// data is not touched.
    pub fn new(mut source: R) -> Result<Self> {
        let size = parser::source_len(&mut source)?;
        let (eocd, eocd_offset) = parser::find_eocd(&mut source, size)?;
        debug!(
            "found end of central directory at {}: {} entries, central directory at {}",
            eocd_offset, eocd.total_entries, eocd.cd_offset
        );

        let headers = parser::read_central_directory(&mut source, &eocd)?;
        let entries = headers.iter().map(ZipFileEntry::from).collect();

        Ok(Self {
            source,
            eocd,
            headers,
            entries,
        })
    }

    /// Stream the decompressed contents of the entry called `name`.
    ///
    /// Seeks to the entry's local file header to find where its data
    /// starts, then bounds the stream to the compressed size recorded in
    /// the central directory. The compression method is taken from the
    /// local header.
    ///
    /// Nothing is verified while reading; use [`EntryReader::verified`]
    /// to check size and CRC-32.
    pub fn extract(&mut self, name: &str) -> Result<EntryReader<'_, R>> {
        let index = self.index_of(name)?;
        let header = &self.headers[index];

        let (local, data_offset) =
            parser::read_local_header(&mut self.source, header.lfh_offset as u64)?;
        if local.compression_method != header.compression_method {
            warn!(
                "{}: local header method {} differs from central directory method {}; using local",
                name, local.compression_method, header.compression_method
            );
        }
        trace!(
            "{}: {}-byte local header at {}, {} compressed bytes at {}",
            name,
            local.encoded_len(),
            header.lfh_offset,
            header.compressed_size,
            data_offset
        );

        let method = CompressionMethod::from_u16(local.compression_method);
        let data = BoundedReader::at_current(&mut self.source, header.compressed_size as u64)?;
        EntryReader::new(&self.entries[index], method, data)
    }
}

impl<R> ZipArchive<R> {
    /// Entries in central directory order.
    pub fn entries(&self) -> &[ZipFileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The archive comment from the end of central directory record.
    pub fn comment(&self) -> &str {
        &self.eocd.comment
    }

    /// First entry named exactly `name`, if any.
    pub fn by_name(&self, name: &str) -> Option<&ZipFileEntry> {
        self.entries.iter().find(|e| e.file_name == name)
    }

    /// Like [`by_name`](Self::by_name), but a missing entry is an error.
    pub fn resolve(&self, name: &str) -> Result<&ZipFileEntry> {
        let index = self.index_of(name)?;
        Ok(&self.entries[index])
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Drop the archive, and with it the source if the archive owns one.
    pub fn close(self) {}

    /// Names are matched exactly and case-sensitively. Duplicate names
    /// resolve to the first one in central directory order.
    fn index_of(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.file_name == name)
            .ok_or_else(|| ZipError::EntryNotFound(name.to_string()))
    }
}
