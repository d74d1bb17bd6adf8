use crate::error::{ErrorKind, Result};
use crate::export::{self, Archive};
use crate::search::{self, Query, SearchResults};
use exn::OptionExt;
use lectio_cache::TranslationCache;
use lectio_model::{Book, Chapter, Translation, Verse};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Listing entry for one loaded translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationSummary {
    pub identifier: String,
    pub name: String,
    pub abbreviation: String,
    pub books: usize,
}

/// The read-only operations exposed to callers.
///
/// Cheap to clone; every clone shares the same cache.
#[derive(Debug, Clone)]
pub struct Library {
    cache: Arc<TranslationCache>,
}

impl Library {
    pub fn new(cache: Arc<TranslationCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn list_identifiers(&self) -> Vec<String> {
        self.cache.list().into_iter().map(str::to_string).collect()
    }

    pub fn list_translations(&self) -> Vec<TranslationSummary> {
        self.cache
            .iter()
            .map(|(identifier, translation)| TranslationSummary {
                identifier: identifier.to_string(),
                name: translation.name().to_string(),
                abbreviation: translation.abbreviation().to_string(),
                books: translation.books().len(),
            })
            .collect()
    }

    pub fn get_translation(&self, identifier: &str) -> Result<Arc<Translation>> {
        self.cache
            .get(identifier)
            .ok_or_raise(|| ErrorKind::TranslationNotFound(identifier.to_string()))
    }

    pub fn get_book(&self, identifier: &str, book: &str) -> Result<Book> {
        let translation = self.get_translation(identifier)?;
        Ok(find_book(&translation, book)?.clone())
    }

    /// `chapter` is the raw request value; anything other than a positive
    /// decimal number is rejected before the cache is consulted.
    pub fn get_chapter(&self, identifier: &str, book: &str, chapter: &str) -> Result<Chapter> {
        let number = parse_number(chapter).ok_or_raise(|| ErrorKind::InvalidChapterNumber(chapter.to_string()))?;
        let translation = self.get_translation(identifier)?;
        Ok(find_chapter(find_book(&translation, book)?, number, chapter)?.clone())
    }

    pub fn get_verse(&self, identifier: &str, book: &str, chapter: &str, verse: &str) -> Result<Verse> {
        let chapter_number =
            parse_number(chapter).ok_or_raise(|| ErrorKind::InvalidChapterNumber(chapter.to_string()))?;
        let verse_number = parse_number(verse).ok_or_raise(|| ErrorKind::InvalidVerseNumber(verse.to_string()))?;
        let translation = self.get_translation(identifier)?;
        let found = find_chapter(find_book(&translation, book)?, chapter_number, chapter)?;
        verse_number
            .and_then(|number| found.verse(number))
            .cloned()
            .ok_or_raise(|| ErrorKind::VerseNotFound {
                book: book.to_string(),
                chapter: chapter.to_string(),
                verse: verse.to_string(),
            })
    }

    /// The query is validated first: a missing or empty query is bad input
    /// even for an unknown identifier.
    #[instrument(skip(self))]
    pub fn search(&self, identifier: &str, query: Option<&str>) -> Result<SearchResults> {
        let query = Query::from_param(query)?;
        let translation = self.get_translation(identifier)?;
        Ok(search::search(&translation, &query))
    }

    #[instrument(skip(self))]
    pub fn export_archive(&self, identifier: &str) -> Result<Archive> {
        let translation = self.get_translation(identifier)?;
        export::export_archive(&translation)
    }
}

fn find_book<'a>(translation: &'a Translation, book: &str) -> Result<&'a Book> {
    translation.book(book).ok_or_raise(|| ErrorKind::BookNotFound {
        translation: translation.identifier().to_string(),
        book: book.to_string(),
    })
}

fn find_chapter<'a>(book: &'a Book, number: Option<u32>, requested: &str) -> Result<&'a Chapter> {
    number.and_then(|number| book.chapter(number)).ok_or_raise(|| ErrorKind::ChapterNotFound {
        book: book.id().to_string(),
        chapter: requested.to_string(),
    })
}

/// Strictly ASCII digits, no sign, and not zero.
///
/// `None` means the value is not a number at all; `Some(None)` is a valid
/// number beyond `u32`, which can only ever be not found.
fn parse_number(value: &str) -> Option<Option<u32>> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match value.parse::<u32>() {
        Ok(0) => None,
        Ok(number) => Some(Some(number)),
        Err(_) => Some(None),
    }
}
