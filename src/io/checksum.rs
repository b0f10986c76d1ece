use std::io::{self, Read};

use crc32fast::Hasher;

use crate::error::ZipError;

/// Pass-through reader that checks size and CRC-32 once the inner reader
/// reports end of stream.
///
/// The archive reader never verifies data on its own; this is the opt-in
/// way to do it. A mismatch is reported as an `io::Error` wrapping
/// [`ZipError::SizeMismatch`] or [`ZipError::ChecksumMismatch`].
pub struct ChecksumReader<R> {
    inner: R,
    hasher: Hasher,
    read: u64,
    expected_crc: u32,
    expected_size: u64,
    verified: bool,
}

impl<R: Read> ChecksumReader<R> {
    pub fn new(inner: R, expected_crc: u32, expected_size: u64) -> Self {
        Self {
            inner,
            hasher: Hasher::new(),
            read: 0,
            expected_crc,
            expected_size,
            verified: false,
        }
    }

    /// Bytes passed through so far.
    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn verify(&mut self) -> Result<(), ZipError> {
        if self.read != self.expected_size {
            return Err(ZipError::SizeMismatch {
                expected: self.expected_size,
                actual: self.read,
            });
        }
        let actual = self.hasher.clone().finalize();
        if actual != self.expected_crc {
            return Err(ZipError::ChecksumMismatch {
                expected: self.expected_crc,
                actual,
            });
        }
        Ok(())
    }
}

impl<R: Read> Read for ChecksumReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.read += n as u64;
        } else if !buf.is_empty() && !self.verified {
            self.verify().map_err(ZipError::into_io)?;
            self.verified = true;
        }
        Ok(n)
    }
}
