//! # STBL Format Documentation
//!
//! This crate provides utilities to read and create the **STBL** string table format used by
//! the game *The Sims 4*. A string table is a custom binary format that maps 32-bit string
//! keys to localized UTF-8 text; the game ships one table per language inside its package
//! files.
//!
//! ## File Structure
//!
//! A STBL resource consists of a header followed by a list of entries.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "STBL"                                            |
//! | 0x0004         | Version                | 2 bytes: Fixed value 5                                     |
//! | 0x0006         | Compressed             | 1 byte: Unused by this reader                              |
//! | 0x0007         | Entry count            | 8 bytes: The number of entries in this table               |
//! | 0x000F         | Reserved               | 2 bytes: Unused                                            |
//! | 0x0011         | String length          | 4 bytes: Total text length, unused by this reader          |
//!
//! ### Entry List
//!
//! After the header, entries are stored sequentially. Each entry has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Key                    | 4 bytes: The string's 32-bit key                        |
//! | 0x0004         | Flags                  | 1 byte: Unused by this reader                           |
//! | 0x0005         | Length                 | 2 bytes: Number of text bytes that follow               |
//! | 0x0007         | Data                   | (Length) bytes: UTF-8 string                            |
//!
//! Decoded text carries the two-character escape sequences `\t`, `\r` and `\n`; the reader
//! unescapes them to real control characters, and the writer escapes them back.
//!
//! ## Additional Information
//!
//! - **Resource type id**: `0x220557DA` inside package files
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use types::StringTable;
