//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong serving a request.
///
/// Every variant is either a "not found" or a "bad input" condition (see
/// [`is_not_found`](ErrorKind::is_not_found) and
/// [`is_bad_input`](ErrorKind::is_bad_input)), except [`Packaging`](ErrorKind::Packaging).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("translation not found: {_0}")]
    TranslationNotFound(#[error(not(source))] String),
    #[display("book {book} not found in translation {translation}")]
    BookNotFound {
        #[error(not(source))]
        translation: String,
        #[error(not(source))]
        book: String,
    },
    /// Numbers are kept as requested, since a well-formed number may be too
    /// large to ever exist.
    #[display("chapter {chapter} not found in book {book}")]
    ChapterNotFound {
        #[error(not(source))]
        book: String,
        #[error(not(source))]
        chapter: String,
    },
    #[display("verse {book} {chapter}:{verse} not found")]
    VerseNotFound {
        #[error(not(source))]
        book: String,
        #[error(not(source))]
        chapter: String,
        #[error(not(source))]
        verse: String,
    },
    #[display("invalid chapter number: {_0:?}")]
    InvalidChapterNumber(#[error(not(source))] String),
    #[display("invalid verse number: {_0:?}")]
    InvalidVerseNumber(#[error(not(source))] String),
    #[display("search query must not be empty")]
    EmptyQuery,
    /// Encoding the export archive failed.
    #[display("failed to package translation {_0}")]
    Packaging(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The cache is immutable; asking again gives the same answer.
        false
    }

    /// The requested translation, book, chapter or verse does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TranslationNotFound(_)
                | Self::BookNotFound { .. }
                | Self::ChapterNotFound { .. }
                | Self::VerseNotFound { .. }
        )
    }

    /// The request itself was malformed and was rejected before any lookup.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::InvalidChapterNumber(_) | Self::InvalidVerseNumber(_) | Self::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::TranslationNotFound("XX".into()), true, false)]
    #[case(ErrorKind::ChapterNotFound { book: "GEN".into(), chapter: "99".into() }, true, false)]
    #[case(ErrorKind::InvalidChapterNumber("um".into()), false, true)]
    #[case(ErrorKind::EmptyQuery, false, true)]
    #[case(ErrorKind::Packaging("KJA".into()), false, false)]
    fn test_classification(#[case] kind: ErrorKind, #[case] not_found: bool, #[case] bad_input: bool) {
        assert_eq!(kind.is_not_found(), not_found);
        assert_eq!(kind.is_bad_input(), bad_input);
        assert!(!kind.is_retryable());
    }
}
