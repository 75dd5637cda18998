//! This library handles locating and extracting string table resources from **package** files
//! used by *The Sims 4*.
//!
//! # Package Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **DBPF** container format used
//! by the game *The Sims 4*. A package file stores many typed resource blobs, each indexed by a
//! (type, group, instance) key triple. Package files are typically identified with the
//! `.package` extension.
//!
//! Only the parts of the format needed to pull localization string tables out of a package are
//! implemented: header validation, the index table, and per-resource decompression.
//!
//! ## File Structure
//!
//! A package file consists of a header, the resource data blobs, and an index table.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 0x46504244 ("DBPF")                               |
//! | 0x0004         | Major version          | 4 bytes: Fixed value 2                                     |
//! | 0x0008         | Minor version          | 4 bytes: Fixed value 1                                     |
//! | 0x0024         | Entry count            | 4 bytes: Number of index records                           |
//! | 0x0028         | Index position (low)   | 4 bytes: Low 32 bits of the index table position           |
//! | 0x0040         | Index position         | 8 bytes: 64-bit index table position                       |
//!
//! The true index start is the 64-bit index position when it is nonzero, otherwise the low
//! 32-bit field, plus a 4-byte skip for the index flags.
//!
//! ### Index Records
//!
//! Each index record is a fixed 32-byte slot:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Type ID                | 4 bytes: Resource type                                  |
//! | 0x0004         | Group ID               | 4 bytes: Resource group                                 |
//! | 0x0008         | Instance ID (high)     | 4 bytes: High 32 bits of the instance id                |
//! | 0x000C         | Instance ID (low)      | 4 bytes: Low 32 bits of the instance id                 |
//! | 0x0010         | File position          | 4 bytes: Offset of the resource data in the file        |
//! | 0x0014         | Stored size            | 4 bytes: Size in the file; the top bit is a flag        |
//! | 0x0018         | Decompressed size      | 4 bytes: Size after decompression                       |
//! | 0x001C         | Compression            | 2 bytes: Compression code, see below                    |
//! | 0x001E         | Committed              | 2 bytes: Unused by this reader                          |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.package`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression Codes**:
//!   - `0x0000`: None (stored as-is)
//!   - `0x5A42`: Zlib
//!   - `0xFFFF`: Internal (a byte-oriented LZ77 variant, see [`compression`])
//!   - `0xFFE0`: Deleted record (skipped by the index scan)
//!
//! Records with an unrecognized compression code are skipped by the index scan rather than
//! treated as fatal.

pub mod compression;
pub mod error;
pub mod read;
pub mod types;

pub use compression::CompressionKind;
pub use read::{PackageArchive, PackageEntry, STRING_TABLE_TYPE};
