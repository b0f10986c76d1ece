//! ZIP archive parsing and extraction.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: On-disk records (EOCD, central directory and local file
//!   headers) with their decoders, plus the public entry type
//! - [`parser`]: Locating and decoding those records in a seekable source
//! - [`archive`]: The archive index and entry lookup
//! - [`extractor`]: The per-entry decompressing stream
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! The EOCD is read first (from the end of the file), then the Central
//! Directory, so listing never reads entry data.
//!
//! ## Supported Features
//!
//! - Single-disk archives (PKZIP APPNOTE compatible)
//! - STORED (no compression) method
//! - DEFLATE compression method
//!
//! ## Limitations
//!
//! - No ZIP64 or multi-disk archive support
//! - No encryption support
//! - Extra fields are kept as raw bytes and never interpreted
//! - No writing

mod archive;
mod extractor;
pub mod parser;
mod structures;

pub use archive::ZipArchive;
pub use extractor::EntryReader;
pub use structures::*;
