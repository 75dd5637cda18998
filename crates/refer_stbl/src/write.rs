//! Types for writing string table resources
//!

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use crate::error::Result;
use crate::types::StringTable;

impl StringTable {
    /// Encode this table into the STBL binary layout.
    ///
    /// Control characters in the text are escaped back to their two-character `\t`, `\r` and
    /// `\n` forms, so a write followed by [`StringTable::read`] yields the same table.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let escaped: Vec<(u32, String)> = self
            .iter()
            .map(|(key, text)| (*key, escape(text)))
            .collect();

        // Total text length the way the game counts it: every string's byte length plus one.
        let string_length: u32 = escaped
            .iter()
            .map(|(_, text)| text.len() as u32 + 1)
            .sum();

        writer.write_all(b"STBL")?;
        writer.write_u16::<LittleEndian>(5)?;
        writer.write_u8(0)?; // compressed flag
        writer.write_u64::<LittleEndian>(escaped.len() as u64)?;
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u32::<LittleEndian>(string_length)?;

        for (key, text) in escaped {
            writer.write_u32::<LittleEndian>(key)?;
            writer.write_u8(0)?; // flags
            writer.write_u16::<LittleEndian>(text.len() as u16)?;
            writer.write_all(text.as_bytes())?;
        }

        Ok(())
    }

    /// Encode this table into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}

fn escape(text: &str) -> String {
    text.replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
