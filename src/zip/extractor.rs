use flate2::read::DeflateDecoder;
use std::io::{self, Read};

use crate::error::{Result, ZipError};
use crate::io::{BoundedReader, ChecksumReader};

use super::structures::{CompressionMethod, ZipFileEntry};

enum Decoder<'a, R> {
    Stored(BoundedReader<'a, R>),
    Deflate(DeflateDecoder<BoundedReader<'a, R>>),
}

/// Decompressed view of one archive entry.
///
/// Holds a mutable borrow of the archive, so at most one entry can be
/// streamed at a time. Sizes and CRC are not verified unless the reader is
/// wrapped with [`verified`](Self::verified).
pub struct EntryReader<'a, R> {
    entry: &'a ZipFileEntry,
    method: CompressionMethod,
    decoder: Decoder<'a, R>,
}

impl<'a, R: Read> EntryReader<'a, R> {
    /// Choose the decoder for `method`. `data` must cover exactly the
    /// entry's compressed bytes.
    pub(crate) fn new(
        entry: &'a ZipFileEntry,
        method: CompressionMethod,
        data: BoundedReader<'a, R>,
    ) -> Result<Self> {
        let decoder = match method {
            // Stored bytes are already the uncompressed content
            CompressionMethod::Stored => Decoder::Stored(data),
            CompressionMethod::Deflate => Decoder::Deflate(DeflateDecoder::new(data)),
            CompressionMethod::Unknown(id) => return Err(ZipError::UnsupportedCompressionMethod(id)),
        };

        Ok(Self {
            entry,
            method,
            decoder,
        })
    }

    /// Wrap in a reader that fails at end of stream if the output does not
    /// match the entry's declared size and CRC-32.
    pub fn verified(self) -> ChecksumReader<Self> {
        let (crc, size) = (self.entry.crc32, self.entry.uncompressed_size);
        ChecksumReader::new(self, crc, size)
    }

    pub fn entry(&self) -> &'a ZipFileEntry {
        self.entry
    }

    /// Method taken from the local file header that was actually used.
    pub fn compression_method(&self) -> CompressionMethod {
        self.method
    }

    /// Compressed bytes pulled from the archive so far.
    pub fn compressed_position(&self) -> Result<u64> {
        self.data().position()
    }

    /// Detach from the archive's source. Further reads fail with
    /// [`ZipError::UseAfterDispose`].
    pub fn release(&mut self) {
        self.data_mut().release();
    }

    fn data(&self) -> &BoundedReader<'a, R> {
        match &self.decoder {
            Decoder::Stored(data) => data,
            Decoder::Deflate(inflater) => inflater.get_ref(),
        }
    }

    fn data_mut(&mut self) -> &mut BoundedReader<'a, R> {
        match &mut self.decoder {
            Decoder::Stored(data) => data,
            Decoder::Deflate(inflater) => inflater.get_mut(),
        }
    }
}

impl<R: Read> Read for EntryReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // The inflater may still hold buffered input after release
        if self.data().is_released() {
            return Err(ZipError::UseAfterDispose.into_io());
        }

        match &mut self.decoder {
            Decoder::Stored(data) => data.read(buf),
            Decoder::Deflate(inflater) => inflater.read(buf),
        }
    }
}
