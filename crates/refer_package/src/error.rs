//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is an invalid package archive
    #[error("file is not a valid package archive")]
    InvalidArchive,

    /// the package version pair is not the supported 2.1
    #[error("unsupported package version {major}.{minor}, expected 2.1")]
    UnsupportedVersion {
        /// major version found in the header
        major: u32,
        /// minor version found in the header
        minor: u32,
    },

    /// decompressed output did not match the declared size
    #[error("decompressed data is {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// size the index record declared
        expected: usize,
        /// size actually produced
        actual: usize,
    },

    /// the compressed stream is internally inconsistent
    #[error("invalid compression stream: {0}")]
    InvalidStream(&'static str),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
