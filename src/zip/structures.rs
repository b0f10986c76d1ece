use byteorder::{LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::Read;

use crate::error::{Result, ZipError};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Read the leading 4-byte signature and compare it before anything else,
/// so a misaligned offset fails without consuming the rest of the record.
fn expect_signature<R: Read>(reader: &mut R, expected: u32, record: &'static str) -> Result<()> {
    let found = reader.read_u32::<LittleEndian>()?;
    if found != expected {
        return Err(ZipError::BadSignature {
            record,
            expected,
            found,
        });
    }
    Ok(())
}

fn read_bytes<R: Read>(reader: &mut R, len: u16) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Names and comments are decoded as UTF-8, with invalid sequences
/// replaced rather than rejected.
fn read_text<R: Read>(reader: &mut R, len: u16) -> Result<String> {
    if len == 0 {
        return Ok(String::new());
    }
    let bytes = read_bytes(reader, len)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// End of Central Directory (EOCD) - 22 bytes minimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment: String,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: u32 = 0x06054b50;
    pub const MAGIC: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];
    pub const SIZE: usize = 22;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        expect_signature(reader, Self::SIGNATURE, "end of central directory")?;

        let disk_number = reader.read_u16::<LittleEndian>()?;
        let disk_with_cd = reader.read_u16::<LittleEndian>()?;
        let disk_entries = reader.read_u16::<LittleEndian>()?;
        let total_entries = reader.read_u16::<LittleEndian>()?;
        let cd_size = reader.read_u32::<LittleEndian>()?;
        let cd_offset = reader.read_u32::<LittleEndian>()?;
        let comment_len = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            disk_number,
            disk_with_cd,
            disk_entries,
            total_entries,
            cd_size,
            cd_offset,
            comment: read_text(reader, comment_len)?,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryHeader {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub disk_number_start: u16,
    pub internal_attrs: u16,
    pub external_attrs: u32,
    pub lfh_offset: u32,
    pub file_name: String,
    pub extra_field: Vec<u8>,
    pub comment: String,
}

impl CentralDirectoryHeader {
    pub const SIGNATURE: u32 = 0x02014b50;
    pub const MIN_SIZE: usize = 46;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        expect_signature(reader, Self::SIGNATURE, "central directory")?;

        let version_made_by = reader.read_u16::<LittleEndian>()?;
        let version_needed = reader.read_u16::<LittleEndian>()?;
        let flags = reader.read_u16::<LittleEndian>()?;
        let compression_method = reader.read_u16::<LittleEndian>()?;
        let last_mod_time = reader.read_u16::<LittleEndian>()?;
        let last_mod_date = reader.read_u16::<LittleEndian>()?;
        let crc32 = reader.read_u32::<LittleEndian>()?;
        let compressed_size = reader.read_u32::<LittleEndian>()?;
        let uncompressed_size = reader.read_u32::<LittleEndian>()?;
        let file_name_length = reader.read_u16::<LittleEndian>()?;
        let extra_field_length = reader.read_u16::<LittleEndian>()?;
        let file_comment_length = reader.read_u16::<LittleEndian>()?;
        let disk_number_start = reader.read_u16::<LittleEndian>()?;
        let internal_attrs = reader.read_u16::<LittleEndian>()?;
        let external_attrs = reader.read_u32::<LittleEndian>()?;
        let lfh_offset = reader.read_u32::<LittleEndian>()?;

        // Variable fields follow in name, extra, comment order
        let file_name = read_text(reader, file_name_length)?;
        let extra_field = read_bytes(reader, extra_field_length)?;
        let comment = read_text(reader, file_comment_length)?;

        Ok(Self {
            version_made_by,
            version_needed,
            flags,
            compression_method,
            last_mod_time,
            last_mod_date,
            crc32,
            compressed_size,
            uncompressed_size,
            disk_number_start,
            internal_attrs,
            external_attrs,
            lfh_offset,
            file_name,
            extra_field,
            comment,
        })
    }
}

/// Local File Header (LFH) - 30 bytes
///
/// Decoding consumes the name and extra field too, so the reader is left
/// at the first byte of the entry's compressed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub file_name: String,
    pub extra_field: Vec<u8>,
}

impl LocalFileHeader {
    pub const SIGNATURE: u32 = 0x04034b50;
    pub const SIZE: usize = 30;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        expect_signature(reader, Self::SIGNATURE, "local file header")?;

        let version_needed = reader.read_u16::<LittleEndian>()?;
        let flags = reader.read_u16::<LittleEndian>()?;
        let compression_method = reader.read_u16::<LittleEndian>()?;
        let last_mod_time = reader.read_u16::<LittleEndian>()?;
        let last_mod_date = reader.read_u16::<LittleEndian>()?;
        let crc32 = reader.read_u32::<LittleEndian>()?;
        let compressed_size = reader.read_u32::<LittleEndian>()?;
        let uncompressed_size = reader.read_u32::<LittleEndian>()?;
        let file_name_length = reader.read_u16::<LittleEndian>()?;
        let extra_field_length = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            version_needed,
            flags,
            compression_method,
            last_mod_time,
            last_mod_date,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name_length,
            file_name: read_text(reader, file_name_length)?,
            extra_field: read_bytes(reader, extra_field_length)?,
        })
    }

    /// Total on-disk length of this header, variable fields included.
    pub fn encoded_len(&self) -> u64 {
        Self::SIZE as u64 + self.file_name_length as u64 + self.extra_field.len() as u64
    }
}

/// Decoded MS-DOS modification timestamp.
///
/// Fields are taken straight from the packed bits and are not range
/// checked, so a zeroed timestamp decodes to `1980-00-00 00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DosDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DosDateTime {
    pub fn from_dos(time: u16, date: u16) -> Self {
        Self {
            year: 1980 + (date >> 9),
            month: ((date >> 5) & 0x0F) as u8,
            day: (date & 0x1F) as u8,
            hour: (time >> 11) as u8,
            minute: ((time >> 5) & 0x3F) as u8,
            second: ((time & 0x1F) * 2) as u8,
        }
    }
}

impl fmt::Display for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Parsed ZIP file entry information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub comment: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    pub modified: DosDateTime,
}

impl ZipFileEntry {
    /// Directory entries end with '/'
    pub fn is_dir(&self) -> bool {
        self.file_name.ends_with('/')
    }

    /// Modification date as (year, month, day)
    pub fn mod_date(&self) -> (u16, u8, u8) {
        (self.modified.year, self.modified.month, self.modified.day)
    }

    /// Modification time as (hour, minute, second)
    pub fn mod_time(&self) -> (u8, u8, u8) {
        (self.modified.hour, self.modified.minute, self.modified.second)
    }
}

impl From<&CentralDirectoryHeader> for ZipFileEntry {
    fn from(header: &CentralDirectoryHeader) -> Self {
        Self {
            file_name: header.file_name.clone(),
            comment: header.comment.clone(),
            compression_method: CompressionMethod::from_u16(header.compression_method),
            compressed_size: header.compressed_size as u64,
            uncompressed_size: header.uncompressed_size as u64,
            crc32: header.crc32,
            modified: DosDateTime::from_dos(header.last_mod_time, header.last_mod_date),
        }
    }
}
