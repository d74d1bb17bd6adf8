//! Parse Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Callers of this crate treat any of
//! these as "the translation could not be parsed"; the variants exist for the
//! logs.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A parse error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading a file of a directory bundle failed.
    #[display("I/O error reading {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The bytes are not a readable zip archive.
    #[display("invalid archive")]
    InvalidArchive,
    /// Neither the archive nor the directory holds a metadata descriptor.
    #[display("missing metadata descriptor")]
    MissingMarker,
    /// A member referenced by the descriptor is absent.
    #[display("missing document: {_0}")]
    MissingDocument(#[error(not(source))] String),
    /// The XML of a document is too broken to process.
    #[display("malformed XML in {_0}")]
    MalformedXml(#[error(not(source))] String),
    /// A required element or attribute could not be found.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// The parsed content breaks a structural rule of the document model.
    #[display("inconsistent document: {_0}")]
    InvalidDocument(#[error(not(source))] String),
    /// The bundle holds no book documents at all.
    #[display("bundle contains no books")]
    NoBooks,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
