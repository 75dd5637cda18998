//! Base types for the structure of a package file.

use binrw::BinRead;

/// Package file header
///
/// Defines the header of a DBPF package file, which always starts with "DBPF" followed by the
/// major and minor version. All data is stored in little endian format. Only the fields this
/// reader consumes are mapped; the gaps are reserved bytes.
#[derive(BinRead, Debug, Copy, Clone, PartialEq)]
#[br(magic = b"DBPF", little)]
pub struct PackageHeader {
    /// The format's major version, expected to be 2
    pub major_version: u32,

    /// The format's minor version, expected to be 1
    pub minor_version: u32,

    /// The number of records in the index table, stored at offset 36
    #[br(pad_before = 24)]
    pub entry_count: u32,

    /// The low 32 bits of the index table position, stored at offset 40
    pub index_position_low: u32,

    /// The 64-bit index table position, stored at offset 64. When zero, the low 32-bit field
    /// is authoritative instead.
    #[br(pad_before = 20)]
    pub index_position: u64,
}

impl PackageHeader {
    /// The position of the first index record: the preferred index position plus a 4-byte skip
    /// for the index flags.
    pub fn index_start(&self) -> u64 {
        let position = if self.index_position != 0 {
            self.index_position
        } else {
            u64::from(self.index_position_low)
        };

        position + 4
    }
}

/// Package index record
///
/// Defines a fixed 32-byte entry in the package's index table.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[br(little)]
pub struct IndexRecord {
    /// The resource type this record points at
    pub type_id: u32,

    /// The resource group this record belongs to
    pub group_id: u32,

    /// The high 32 bits of the resource instance id
    pub instance_high: u32,

    /// The low 32 bits of the resource instance id
    pub instance_low: u32,

    /// The offset of the resource data from the start of the file
    pub file_position: u32,

    /// The size of the resource data in the file; the top bit is a compression flag, not part
    /// of the size
    pub stored_size_raw: u32,

    /// The size of the resource data after decompression; the top bit is masked off like the
    /// stored size
    pub decompressed_size_raw: u32,

    /// The compression code for the resource data
    pub compression_code: u16,

    /// Committed flag, unused by this reader
    pub committed: u16,
}

/// Size in bytes of one index record slot.
pub const INDEX_RECORD_SIZE: u64 = 32;

impl IndexRecord {
    /// The full 64-bit resource instance id.
    pub fn instance_id(&self) -> u64 {
        u64::from(self.instance_high) << 32 | u64::from(self.instance_low)
    }

    /// The stored size with the compression flag bit masked off.
    pub fn stored_size(&self) -> u32 {
        self.stored_size_raw & 0x7FFF_FFFF
    }

    /// The decompressed size with the top bit masked off.
    pub fn decompressed_size(&self) -> u32 {
        self.decompressed_size_raw & 0x7FFF_FFFF
    }
}
