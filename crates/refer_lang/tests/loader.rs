use std::io::Cursor;

use pretty_assertions::assert_eq;
use refer_lang::error::Result;
use refer_lang::{load_package_strings, EnglishHandler};
use refer_stbl::StringTable;
use tracing_test::traced_test;

const STRING_TABLE_TYPE: u32 = 0x220557DA;

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

    fn add_resource(&mut self, instance: u64, stored: &[u8]) {
        let position = 72 + self.data.len() as u32;
        self.data.extend_from_slice(stored);
        self.records.push((
            instance,
            position,
            stored.len() as u32,
            stored.len() as u32,
            0x0000,
        ));
    }

    fn add_table(&mut self, instance: u64, entries: &[(u32, &str)]) {
        let table: StringTable = entries
            .iter()
            .map(|(key, text)| (*key, (*text).to_owned()))
            .collect();
        self.add_resource(instance, &table.to_bytes().unwrap());
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
fn loads_and_indexes_the_handled_language() -> Result<()> {
    let mut builder = PackageBuilder::new();
    builder.add_table(
        0x0020_B4A4_C0E3_6B38,
        &[
            (1, "Plain text"),
            (2, "{F0.She}{M0.He} is happy"),
            (3, "Meet your {F0.Girl}{M0.Boy}friend"),
        ],
    );
    // A different game language; its instance prefix is not en-US.
    builder.add_table(0x0B20_B4A4_C0E3_6B38, &[(4, "Texte en français")]);

    let strings = load_package_strings(Cursor::new(builder.build()), &EnglishHandler)?;

    assert_eq!(strings.all.len(), 3);
    assert_eq!(strings.all.text(1), Some("Plain text"));
    assert_eq!(strings.all.text(4), None);

    // Only gendered strings are indexed separately, with the usage fix applied.
    assert_eq!(strings.gendered.len(), 2);
    assert!(strings.gendered.text(1).is_none());
    assert_eq!(strings.gendered.text(2), Some("{F0.She}{M0.He} is happy"));
    assert_eq!(
        strings.gendered.text(3),
        Some("Meet your {F0.Girlfriend}{M0.Boyfriend}")
    );

    Ok(())
}

#[traced_test]
#[test]
fn a_corrupt_resource_does_not_abort_the_batch() -> Result<()> {
    let mut builder = PackageBuilder::new();
    builder.add_resource(0x0000_0000_0000_0001, b"not a string table");
    builder.add_table(0x0000_0000_0000_0002, &[(1, "Still readable")]);

    let strings = load_package_strings(Cursor::new(builder.build()), &EnglishHandler)?;

    assert_eq!(strings.all.len(), 1);
    assert_eq!(strings.all.text(1), Some("Still readable"));

    Ok(())
}
