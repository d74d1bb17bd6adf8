//! Substring search over a single translation.

use crate::error::{ErrorKind, Result};
use lectio_model::{Book, Chapter, Translation, Verse};
use serde::Serialize;
use std::fmt;
use tracing::instrument;

/// A search term that is known to be non-empty.
///
/// The term is used exactly as given: no trimming, case folding or
/// tokenizing, so `" "` is a valid (if odd) query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn new(query: impl Into<String>) -> Result<Self> {
        let query = query.into();
        if query.is_empty() {
            exn::bail!(ErrorKind::EmptyQuery);
        }
        Ok(Self(query))
    }

    /// Validate an optional request parameter; absent and empty are the same
    /// mistake.
    pub fn from_param(query: Option<&str>) -> Result<Self> {
        Self::new(query.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRef {
    pub number: u32,
}

/// One matching verse together with where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub book: BookRef,
    pub chapter: ChapterRef,
    pub verse: Verse,
}

impl Match {
    fn new(book: &Book, chapter: &Chapter, verse: &Verse) -> Self {
        Self {
            book: BookRef {
                id: book.id().to_string(),
                name: book.name().to_string(),
            },
            chapter: ChapterRef { number: chapter.number() },
            verse: verse.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: Query,
    pub total_results: usize,
    pub results: Vec<Match>,
}

/// Find every verse of `translation` whose text contains `query`.
///
/// Matching is case-sensitive substring containment; results are in document
/// order and a verse matches at most once.
#[instrument(skip_all, fields(translation = translation.identifier(), query = query.as_str()))]
pub fn search(translation: &Translation, query: &Query) -> SearchResults {
    let needle = query.as_str();
    let results: Vec<Match> = translation
        .books()
        .iter()
        .flat_map(|book| book.chapters().iter().map(move |chapter| (book, chapter)))
        .flat_map(|(book, chapter)| chapter.verses().iter().map(move |verse| (book, chapter, verse)))
        .filter(|(_, _, verse)| verse.text().contains(needle))
        .map(|(book, chapter, verse)| Match::new(book, chapter, verse))
        .collect();
    tracing::debug!(results = results.len(), "search complete");
    SearchResults {
        query: query.clone(),
        total_results: results.len(),
        results,
    }
}
