//! # tinyunzip
//!
//! A small read-only ZIP reader that lists an archive and streams single
//! entries out of it without loading the archive into memory.
//!
//! Only the archive's tail and central directory are read when it is
//! opened. Entry data is read on demand through a stream clipped to that
//! entry's bytes, so decompression can never run into a neighbouring
//! entry or the central directory.
//!
//! ## Features
//!
//! - Works on any `Read + Seek` source, owned or borrowed
//! - Support for STORED (uncompressed) and DEFLATE compression methods
//! - Entry metadata: sizes, CRC-32, DOS timestamp, comments
//! - Opt-in CRC-32 verification of extracted data
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use tinyunzip::ZipArchive;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut file = File::open("archive.zip")?;
//!
//!     // Borrowing the file leaves it open after the archive is gone
//!     let mut archive = ZipArchive::new(&mut file)?;
//!     for entry in archive.entries() {
//!         println!("{} {}", entry.modified, entry.file_name);
//!     }
//!
//!     let mut reader = archive.extract("docs/readme.txt")?.verified();
//!     io::copy(&mut reader, &mut io::stdout())?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use error::{Result, ZipError};
pub use io::{BoundedReader, ChecksumReader};
pub use zip::{CompressionMethod, DosDateTime, EntryReader, ZipArchive, ZipFileEntry};
