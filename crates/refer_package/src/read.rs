//! Types for reading package archives
//!

use binrw::BinRead;
use std::{
    fmt::{self, Debug},
    io::{Read, Seek, SeekFrom},
};
use tracing::debug;

use crate::{
    compression::{decompress, CompressionKind, DELETED_RECORD},
    error::{Error, Result},
    types::{IndexRecord, PackageHeader, INDEX_RECORD_SIZE},
};

/// Resource type id of localization string tables (STBL resources).
pub const STRING_TABLE_TYPE: u32 = 0x220557DA;

/// One string table resource found in a package's index.
///
/// Identity is the `(type_id, group_id, instance_id)` triple. Sizes already have the
/// compression flag bit masked off.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// The resource type; always [`STRING_TABLE_TYPE`] for entries produced by this reader
    pub type_id: u32,

    /// The resource group
    pub group_id: u32,

    /// The full 64-bit resource instance id
    pub instance_id: u64,

    /// The offset of the resource data from the start of the file
    pub file_position: u64,

    /// The size of the resource data as stored in the file
    pub stored_size: u32,

    /// The size of the resource data after decompression
    pub decompressed_size: u32,

    /// How the resource data was compressed
    pub compression: CompressionKind,
}

impl PackageEntry {
    /// The resource instance id as the upper-case, zero-padded hex string used for language
    /// filtering.
    pub fn instance_hex_id(&self) -> String {
        format!("{:016X}", self.instance_id)
    }
}

/// Package archive reader
///
/// Validates the container header and scans the index for string table resources without
/// decompressing any payloads. Payloads are pulled out individually with
/// [`PackageArchive::read_entry`].
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_string_tables(reader: impl Read + Seek) -> refer_package::error::Result<()> {
///     let mut package = refer_package::PackageArchive::new(reader)?;
///
///     for entry in package.entries().to_vec() {
///         let bytes = package.read_entry(&entry)?;
///         println!("{}: {} bytes", entry.instance_hex_id(), bytes.len());
///     }
///
///     Ok(())
/// }
/// ```
pub struct PackageArchive<R> {
    reader: R,
    header: PackageHeader,
    entries: Vec<PackageEntry>,
}

impl<R> Debug for PackageArchive<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PackageArchive({:#?})", self.entries)
    }
}

impl<R> PackageArchive<R> {
    /// Number of string table entries found in this package.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this package contains no string table entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The string table entries found in the index, in index order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Get an entry by its position in the index scan, if it's present.
    pub fn by_index(&self, index: usize) -> Option<&PackageEntry> {
        self.entries.get(index)
    }

    /// Get an entry by its resource instance id, if it's present.
    pub fn by_instance(&self, instance_id: u64) -> Option<&PackageEntry> {
        self.entries
            .iter()
            .find(|entry| entry.instance_id == instance_id)
    }

    /// The validated package header.
    pub fn header(&self) -> &PackageHeader {
        &self.header
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> PackageArchive<R> {
    /// Read a package archive, collecting the string table resources it contains.
    pub fn new(mut reader: R) -> Result<PackageArchive<R>> {
        let header = PackageHeader::read(&mut reader).map_err(|_| Error::InvalidArchive)?;

        if header.major_version != 2 || header.minor_version != 1 {
            return Err(Error::UnsupportedVersion {
                major: header.major_version,
                minor: header.minor_version,
            });
        }

        let entries = Self::scan_index(&mut reader, &header)?;

        Ok(PackageArchive {
            reader,
            header,
            entries,
        })
    }

    /// Read, decompress and return one entry's bytes.
    ///
    /// Fails when the decompressed output does not match the entry's declared decompressed
    /// size.
    pub fn read_entry(&mut self, entry: &PackageEntry) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(entry.file_position))?;

        let mut stored = vec![0u8; entry.stored_size as usize];
        self.reader.read_exact(&mut stored)?;

        decompress(&stored, entry.compression, entry.decompressed_size as usize)
    }

    fn scan_index(reader: &mut R, header: &PackageHeader) -> Result<Vec<PackageEntry>> {
        let index_start = header.index_start();
        let mut entries = Vec::new();

        for record_index in 0..header.entry_count {
            reader.seek(SeekFrom::Start(
                index_start + u64::from(record_index) * INDEX_RECORD_SIZE,
            ))?;

            let record = IndexRecord::read(reader)?;

            if record.type_id != STRING_TABLE_TYPE {
                continue;
            }

            if record.stored_size() == 0 {
                continue;
            }

            if record.compression_code == DELETED_RECORD {
                debug!(instance = record.instance_id(), "skipping deleted record");
                continue;
            }

            let Some(compression) = CompressionKind::from_code(record.compression_code) else {
                debug!(
                    instance = record.instance_id(),
                    code = record.compression_code,
                    "skipping record with unknown compression code"
                );
                continue;
            };

            entries.push(PackageEntry {
                type_id: record.type_id,
                group_id: record.group_id,
                instance_id: record.instance_id(),
                file_position: u64::from(record.file_position),
                stored_size: record.stored_size(),
                decompressed_size: record.decompressed_size(),
                compression,
            });
        }

        Ok(entries)
    }
}
