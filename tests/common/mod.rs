//! In-memory archive builder for integration tests.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

/// 13:25:56
pub const DOS_TIME: u16 = 0x6B3C;
/// 2025-01-15
pub const DOS_DATE: u16 = 0x5A2F;

/// One entry with full control over both header copies.
pub struct RawEntry<'a> {
    pub name: &'a str,
    pub payload: Vec<u8>,
    pub local_method: u16,
    pub central_method: u16,
    pub crc32: u32,
    pub uncompressed_size: u32,
    pub local_extra: &'a [u8],
    pub comment: &'a str,
}

impl<'a> RawEntry<'a> {
    pub fn stored(name: &'a str, data: &[u8]) -> Self {
        Self {
            name,
            payload: data.to_vec(),
            local_method: 0,
            central_method: 0,
            crc32: crc32fast::hash(data),
            uncompressed_size: data.len() as u32,
            local_extra: &[],
            comment: "",
        }
    }

    pub fn deflated(name: &'a str, data: &[u8]) -> Self {
        Self {
            payload: deflate(data),
            local_method: 8,
            central_method: 8,
            ..Self::stored(name, data)
        }
    }
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[derive(Default)]
pub struct ArchiveBuilder {
    data: Vec<u8>,
    central: Vec<u8>,
    count: u16,
    comment: Vec<u8>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(self, name: &str, data: &[u8]) -> Self {
        self.entry(RawEntry::stored(name, data))
    }

    pub fn deflated(self, name: &str, data: &[u8]) -> Self {
        self.entry(RawEntry::deflated(name, data))
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn entry(mut self, entry: RawEntry<'_>) -> Self {
        let lfh_offset = self.data.len() as u32;
        let compressed_size = entry.payload.len() as u32;

        let d = &mut self.data;
        put32(d, 0x04034b50);
        put16(d, 20);
        put16(d, 0);
        put16(d, entry.local_method);
        put16(d, DOS_TIME);
        put16(d, DOS_DATE);
        put32(d, entry.crc32);
        put32(d, compressed_size);
        put32(d, entry.uncompressed_size);
        put16(d, entry.name.len() as u16);
        put16(d, entry.local_extra.len() as u16);
        d.extend_from_slice(entry.name.as_bytes());
        d.extend_from_slice(entry.local_extra);
        d.extend_from_slice(&entry.payload);

        let c = &mut self.central;
        put32(c, 0x02014b50);
        put16(c, 20);
        put16(c, 20);
        put16(c, 0);
        put16(c, entry.central_method);
        put16(c, DOS_TIME);
        put16(c, DOS_DATE);
        put32(c, entry.crc32);
        put32(c, compressed_size);
        put32(c, entry.uncompressed_size);
        put16(c, entry.name.len() as u16);
        put16(c, 0);
        put16(c, entry.comment.len() as u16);
        put16(c, 0);
        put16(c, 0);
        put32(c, 0);
        put32(c, lfh_offset);
        c.extend_from_slice(entry.name.as_bytes());
        c.extend_from_slice(entry.comment.as_bytes());

        self.count += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.count;
        self.build_with_count(count)
    }

    /// Build with a trailer that declares `count` records.
    pub fn build_with_count(self, count: u16) -> Vec<u8> {
        let mut out = self.data;
        let cd_offset = out.len() as u32;
        out.extend_from_slice(&self.central);

        put32(&mut out, 0x06054b50);
        put16(&mut out, 0);
        put16(&mut out, 0);
        put16(&mut out, count);
        put16(&mut out, count);
        put32(&mut out, self.central.len() as u32);
        put32(&mut out, cd_offset);
        put16(&mut out, self.comment.len() as u16);
        out.extend_from_slice(&self.comment);
        out
    }
}

fn put16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}
