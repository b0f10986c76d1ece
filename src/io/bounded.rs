use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Result, ZipError};

/// Read-only window over `[start, start + len)` of a shared source.
///
/// The reader borrows the source rather than owning it, so dropping or
/// releasing it leaves the source open. Only forward reads are offered:
/// there is no `Seek` or `Write` implementation to misuse.
///
/// Reads are issued at the source's current cursor, which the constructors
/// place at `start`. Nothing else may move that cursor while the window is
/// being read; the `&mut` borrow makes sure of that.
#[derive(Debug)]
pub struct BoundedReader<'a, R> {
    source: Option<&'a mut R>,
    start: u64,
    len: u64,
    consumed: u64,
}

impl<'a, R: Read + Seek> BoundedReader<'a, R> {
    /// Seek `source` to `start` and bound reads to `len` bytes from there.
    pub fn new(source: &'a mut R, start: u64, len: u64) -> Result<Self> {
        source.seek(SeekFrom::Start(start))?;
        Ok(Self::from_parts(source, start, len))
    }

    /// Bound reads to `len` bytes from wherever the source currently is.
    pub fn at_current(source: &'a mut R, len: u64) -> Result<Self> {
        let start = source.stream_position()?;
        Ok(Self::from_parts(source, start, len))
    }
}

impl<'a, R> BoundedReader<'a, R> {
    fn from_parts(source: &'a mut R, start: u64, len: u64) -> Self {
        Self {
            source: Some(source),
            start,
            len,
            consumed: 0,
        }
    }

    /// Absolute offset of the first byte of the window.
    pub fn start(&self) -> Result<u64> {
        self.ensure_live()?;
        Ok(self.start)
    }

    /// Total length of the window.
    pub fn len(&self) -> Result<u64> {
        self.ensure_live()?;
        Ok(self.len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.len == 0)
    }

    /// Bytes consumed so far, relative to [`start`](Self::start).
    pub fn position(&self) -> Result<u64> {
        self.ensure_live()?;
        Ok(self.consumed)
    }

    /// Bytes left before the window is exhausted.
    pub fn remaining(&self) -> Result<u64> {
        self.ensure_live()?;
        Ok(self.len - self.consumed)
    }

    /// Detach from the source. Every later call fails with
    /// [`ZipError::UseAfterDispose`]; the source itself is untouched.
    pub fn release(&mut self) {
        self.source = None;
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.source.is_none() {
            return Err(ZipError::UseAfterDispose);
        }
        Ok(())
    }
}

impl<R: Read> Read for BoundedReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(source) = self.source.as_mut() else {
            return Err(ZipError::UseAfterDispose.into_io());
        };

        let remaining = self.len - self.consumed;
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = source.read(&mut buf[..want])?;
        self.consumed += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source() -> Cursor<Vec<u8>> {
        Cursor::new(b"0123456789abcdef".to_vec())
    }

    #[test]
    fn reads_are_clipped_to_the_window() {
        let mut src = source();
        let mut reader = BoundedReader::new(&mut src, 4, 6).unwrap();

        let mut buf = [0u8; 64];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"456789");
        assert_eq!(reader.position().unwrap(), 6);
        assert_eq!(reader.remaining().unwrap(), 0);
    }

    #[test]
    fn end_of_window_is_sticky() {
        let mut src = source();
        let mut reader = BoundedReader::new(&mut src, 14, 2).unwrap();

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"ef");

        let mut buf = [0u8; 8];
        for _ in 0..3 {
            assert_eq!(reader.read(&mut buf).unwrap(), 0);
        }
    }

    #[test]
    fn never_reads_past_the_window_even_if_source_has_more() {
        let mut src = source();
        {
            let mut reader = BoundedReader::new(&mut src, 0, 3).unwrap();
            let mut out = Vec::new();
            reader.read_to_end(&mut out).unwrap();
            assert_eq!(out, b"012");
        }
        assert_eq!(src.position(), 3);
    }

    #[test]
    fn at_current_starts_at_the_cursor() {
        let mut src = source();
        src.set_position(10);
        let mut reader = BoundedReader::at_current(&mut src, 3).unwrap();
        assert_eq!(reader.start().unwrap(), 10);

        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn zero_length_window_is_immediately_exhausted() {
        let mut src = source();
        let mut reader = BoundedReader::new(&mut src, 5, 0).unwrap();
        assert!(reader.is_empty().unwrap());
        assert_eq!(reader.read(&mut [0u8; 4]).unwrap(), 0);
    }

    #[test]
    fn short_source_ends_early_without_error() {
        let mut src = source();
        let mut reader = BoundedReader::new(&mut src, 12, 100).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"cdef");
        assert_eq!(reader.remaining().unwrap(), 96);
    }

    #[test]
    fn released_reader_rejects_every_operation() {
        let mut src = source();
        let mut reader = BoundedReader::new(&mut src, 0, 4).unwrap();
        reader.release();

        assert!(reader.is_released());
        assert!(matches!(reader.position(), Err(ZipError::UseAfterDispose)));
        assert!(matches!(reader.remaining(), Err(ZipError::UseAfterDispose)));
        assert!(matches!(reader.start(), Err(ZipError::UseAfterDispose)));
        assert!(matches!(reader.len(), Err(ZipError::UseAfterDispose)));
        assert!(matches!(reader.is_empty(), Err(ZipError::UseAfterDispose)));

        let err = reader.read(&mut [0u8; 4]).unwrap_err();
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<ZipError>());
        assert!(matches!(inner, Some(ZipError::UseAfterDispose)));
    }
}
