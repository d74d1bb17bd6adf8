use crate::Book;
use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One complete edition of the text, identified by a short code (`KJA`).
///
/// Built once, in a single pass, by whichever loader produced it and never
/// modified afterwards. There are no mutable accessors; sharing a translation
/// between threads only ever needs an [`Arc`](std::sync::Arc).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TranslationRepr")]
pub struct Translation {
    identifier: String,
    name: String,
    abbreviation: String,
    books: Vec<Book>,
}
impl Translation {
    /// Fails if the identifier is blank or two books share an id.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        books: Vec<Book>,
    ) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            exn::bail!(ErrorKind::Empty("identifier"));
        }
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id()) {
                exn::bail!(ErrorKind::DuplicateBook(book.id().to_string()));
            }
        }
        Ok(Self {
            identifier,
            name: name.into(),
            abbreviation: abbreviation.into(),
            books,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a book by its id. Ids are compared exactly (`GEN` is not `gen`).
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    pub fn verse_count(&self) -> usize {
        self.books.iter().map(Book::verse_count).sum()
    }
}

#[derive(Deserialize)]
struct TranslationRepr {
    identifier: String,
    name: String,
    abbreviation: String,
    books: Vec<Book>,
}
impl TryFrom<TranslationRepr> for Translation {
    type Error = ErrorKind;
    fn try_from(repr: TranslationRepr) -> std::result::Result<Self, Self::Error> {
        Translation::new(repr.identifier, repr.name, repr.abbreviation, repr.books).map_err(|e| (*e).clone())
    }
}
