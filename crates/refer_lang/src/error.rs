//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`refer_package::error::Error`]
    #[error(transparent)]
    PackageError(#[from] refer_package::error::Error),

    /// Transparent wrapper for [`refer_stbl::error::Error`]
    #[error(transparent)]
    StblError(#[from] refer_stbl::error::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// a template tag names an operation the token's type does not support
    #[error("the tag '{tag}' is not a known tag for a {token_kind} token")]
    UnsupportedTag {
        /// the tag text, without its braces or token index
        tag: String,
        /// the kind of token the tag was pointed at
        token_kind: &'static str,
    },

    /// a tag-shaped span survived the resolution pass
    #[error("found a tag that was never resolved")]
    UnresolvedTag,

    /// nested localized strings recursed past the depth limit
    #[error("nested localized strings recurse deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
