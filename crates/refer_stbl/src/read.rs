//! Types for reading string table resources
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, ErrorKind, Read};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::StringTable;

impl StringTable {
    /// Decode a string table from a resource's decompressed bytes.
    ///
    /// ```
    /// fn list_entries(bytes: &[u8]) -> refer_stbl::error::Result<()> {
    ///     let table = refer_stbl::StringTable::read(bytes)?;
    ///
    ///     for (key, text) in &table {
    ///         println!("0x{key:08X}: {text}");
    ///     }
    ///
    ///     Ok(())
    /// }
    /// # list_entries(&[b'S', b'T', b'B', b'L', 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    /// ```
    pub fn read(bytes: &[u8]) -> Result<StringTable> {
        let mut reader = Cursor::new(bytes);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != b"STBL" {
            return Err(Error::InvalidFile);
        }

        let version = reader.read_u16::<LittleEndian>()?;
        if version != 5 {
            return Err(Error::UnsupportedVersion(version));
        }

        // Skip the 'compressed' byte, it's not used.
        reader.set_position(reader.position() + 1);

        let entry_count = reader.read_u64::<LittleEndian>()?;

        // Skip the two reserved bytes and the total string length.
        reader.set_position(reader.position() + 6);

        debug!(entry_count, "decoding a string table");

        let mut entries = StringTable::default();

        for entry_index in 0..entry_count {
            if reader.position() as usize >= bytes.len().saturating_sub(1) {
                return Err(Error::Truncated {
                    expected: entry_count,
                    found: entry_index,
                });
            }

            let (key, text) = match read_entry(&mut reader) {
                Ok(entry) => entry,
                // Data cut off mid-record is a truncated table, not a plain read failure.
                Err(Error::IOError(error)) if error.kind() == ErrorKind::UnexpectedEof => {
                    return Err(Error::Truncated {
                        expected: entry_count,
                        found: entry_index,
                    });
                }
                Err(error) => return Err(error),
            };

            entries.insert(key, unescape(&text));
        }

        Ok(entries)
    }
}

fn read_entry(reader: &mut Cursor<&[u8]>) -> Result<(u32, String)> {
    let key = reader.read_u32::<LittleEndian>()?;

    // Skip the flags byte.
    reader.set_position(reader.position() + 1);

    let text_len = reader.read_u16::<LittleEndian>()? as usize;

    let mut text_bytes = vec![0u8; text_len];
    reader.read_exact(&mut text_bytes)?;
    let text = String::from_utf8(text_bytes)?;

    Ok((key, text))
}

fn unescape(text: &str) -> String {
    text.replace("\\t", "\t")
        .replace("\\r", "\r")
        .replace("\\n", "\n")
}
