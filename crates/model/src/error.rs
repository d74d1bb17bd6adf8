//! Model Error Types
//!
//! Constructors of the document tree refuse to build anything that breaks its
//! structural invariants. The errors produced here are what the parser and
//! the deserializer surface when a document is inconsistent.

use derive_more::{Display, Error};

/// A model error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for model construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Verse and chapter numbers start at one.
    #[display("invalid {_0} number: 0")]
    InvalidNumber(#[error(not(source))] &'static str),
    /// A verse was given no text.
    #[display("verse {_0} has no text")]
    EmptyText(#[error(not(source))] u32),
    /// An identifier, book id or name was blank.
    #[display("empty {_0}")]
    Empty(#[error(not(source))] &'static str),
    /// Verse numbers must be strictly increasing within a chapter.
    #[display("verse {found} follows verse {previous}")]
    VerseOutOfOrder {
        /// The verse number seen before.
        previous: u32,
        /// The verse number that broke the ordering.
        found: u32,
    },
    /// The same chapter number appeared twice within one book.
    #[display("duplicate chapter {_0}")]
    DuplicateChapter(#[error(not(source))] u32),
    /// The same book id appeared twice within one translation.
    #[display("duplicate book {_0}")]
    DuplicateBook(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A document is either consistent or it isn't.
        false
    }
}
