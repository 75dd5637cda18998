//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`std::string::FromUtf8Error`]
    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    /// File is an invalid string table
    #[error("invalid string table identifier, expected 'STBL'")]
    InvalidFile,

    /// The string table version is not the supported one
    #[error("unsupported string table version {0}, expected 5")]
    UnsupportedVersion(u16),

    /// The table declared more entries than the data holds
    #[error("string table ended after {found} of the {expected} entries its header declares")]
    Truncated {
        /// entry count declared by the header
        expected: u64,
        /// entries actually present
        found: u64,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
