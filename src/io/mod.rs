mod bounded;
mod checksum;

pub use bounded::BoundedReader;
pub use checksum::ChecksumReader;
