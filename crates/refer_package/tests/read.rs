use std::io::Cursor;

use pretty_assertions::assert_eq;
use refer_package::error::Result;
use refer_package::{CompressionKind, PackageArchive, STRING_TABLE_TYPE};
use tracing_test::traced_test;

// "Hello World" compressed with zlib at the default level.
const ZLIB_HELLO_WORLD: [u8; 19] = [
    0x78, 0x9C, 0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x57, 0x08, 0xCF, 0x2F, 0xCA, 0x49, 0x01, 0x00,
    0x18, 0x0B, 0x04, 0x1D,
];

// "Hello World" as an internal-compression stream: a run of eight literals followed by a
// three byte literal tail.
const INTERNAL_HELLO_WORLD: [u8; 18] = [
    0x10, 0xFB, 0x00, 0x00, 0x0B, 0xE1, b'H', b'e', b'l', b'l', b'o', b' ', b'W', b'o', 0xFF,
    b'r', b'l', b'd',
];

struct PackageBuilder {
    data: Vec<u8>,
    records: Vec<(u64, u32, u32, u32, u16)>,
}

impl PackageBuilder {
    fn new() -> Self {
        PackageBuilder {
            data: Vec::new(),
            records: Vec::new(),
        }
    }

    fn add_resource(&mut self, instance: u64, stored: &[u8], decompressed: u32, code: u16) {
        let position = 72 + self.data.len() as u32;
        self.data.extend_from_slice(stored);
        self.records
            .push((instance, position, stored.len() as u32, decompressed, code));
    }

    fn build(self) -> Vec<u8> {
        let index_position = 72 + self.data.len() as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"DBPF");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 24]);
        bytes.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&index_position.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 20]);
        bytes.extend_from_slice(&0u64.to_le_bytes());

        bytes.extend_from_slice(&self.data);
        bytes.extend_from_slice(&0u32.to_le_bytes()); // index flags, skipped

        for (instance, position, stored, decompressed, code) in self.records {
            bytes.extend_from_slice(&STRING_TABLE_TYPE.to_le_bytes());
            bytes.extend_from_slice(&0u32.to_le_bytes());
            bytes.extend_from_slice(&((instance >> 32) as u32).to_le_bytes());
            bytes.extend_from_slice(&(instance as u32).to_le_bytes());
            bytes.extend_from_slice(&position.to_le_bytes());
            bytes.extend_from_slice(&stored.to_le_bytes());
            bytes.extend_from_slice(&decompressed.to_le_bytes());
            bytes.extend_from_slice(&code.to_le_bytes());
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }

        bytes
    }
}

#[traced_test]
#[test]
fn extract_entries_with_every_compression_scheme() -> Result<()> {
    let mut builder = PackageBuilder::new();
    builder.add_resource(0x1, b"Hello World", 11, 0x0000);
    builder.add_resource(0x2, &ZLIB_HELLO_WORLD, 11, 0x5A42);
    builder.add_resource(0x3, &INTERNAL_HELLO_WORLD, 11, 0xFFFF);

    let mut archive = PackageArchive::new(Cursor::new(builder.build()))?;
    assert_eq!(archive.len(), 3);

    let expected = [
        CompressionKind::Uncompressed,
        CompressionKind::Zlib,
        CompressionKind::Internal,
    ];

    for (index, kind) in expected.into_iter().enumerate() {
        let entry = *archive.by_index(index).unwrap();
        assert_eq!(entry.compression, kind);
        assert_eq!(archive.read_entry(&entry)?, b"Hello World");
    }

    Ok(())
}

#[traced_test]
#[test]
fn corrupt_entry_does_not_poison_the_archive() -> Result<()> {
    let mut builder = PackageBuilder::new();
    // Declares more output than the stream produces.
    builder.add_resource(0x1, &INTERNAL_HELLO_WORLD, 64, 0xFFFF);
    builder.add_resource(0x2, b"Hello World", 11, 0x0000);

    let mut archive = PackageArchive::new(Cursor::new(builder.build()))?;

    let bad = *archive.by_index(0).unwrap();
    assert!(archive.read_entry(&bad).is_err());

    // A failure on one resource leaves the others readable.
    let good = *archive.by_index(1).unwrap();
    assert_eq!(archive.read_entry(&good)?, b"Hello World");

    Ok(())
}
