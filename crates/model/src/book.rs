use crate::Chapter;
use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A book of a translation, identified by a short stable code (`GEN`, `JHN`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookRepr")]
pub struct Book {
    id: String,
    name: String,
    chapters: Vec<Chapter>,
}
impl Book {
    /// Builds a book from chapters in the order they were parsed.
    ///
    /// Chapter numbers must be unique. They are not re-sorted and gaps are
    /// left as they are.
    pub fn new(id: impl Into<String>, name: impl Into<String>, chapters: Vec<Chapter>) -> Result<Self> {
        let id = id.into();
        let name = name.into();
        if id.trim().is_empty() {
            exn::bail!(ErrorKind::Empty("book id"));
        }
        if name.trim().is_empty() {
            exn::bail!(ErrorKind::Empty("book name"));
        }
        let mut seen = HashSet::with_capacity(chapters.len());
        for chapter in &chapters {
            if !seen.insert(chapter.number()) {
                exn::bail!(ErrorKind::DuplicateChapter(chapter.number()));
            }
        }
        Ok(Self { id, name, chapters })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number() == number)
    }

    /// Total number of verses across every chapter.
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses().len()).sum()
    }
}

#[derive(Deserialize)]
struct BookRepr {
    id: String,
    name: String,
    chapters: Vec<Chapter>,
}
impl TryFrom<BookRepr> for Book {
    type Error = ErrorKind;
    fn try_from(repr: BookRepr) -> std::result::Result<Self, Self::Error> {
        Book::new(repr.id, repr.name, repr.chapters).map_err(|e| (*e).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verse;

    fn chapter(number: u32) -> Chapter {
        Chapter::new(number, vec![Verse::new(1, "text").unwrap()]).unwrap()
    }

    #[test]
    fn test_chapters_are_not_reordered() {
        let book = Book::new("PSA", "Psalms", vec![chapter(2), chapter(1), chapter(5)]).unwrap();
        let numbers: Vec<_> = book.chapters().iter().map(Chapter::number).collect();
        assert_eq!(numbers, vec![2, 1, 5]);
        assert_eq!(book.chapter(5).map(Chapter::number), Some(5));
        assert!(book.chapter(3).is_none());
        assert_eq!(book.verse_count(), 3);
    }

    #[test]
    fn test_duplicate_chapter() {
        let err = Book::new("GEN", "Genesis", vec![chapter(1), chapter(1)]).unwrap_err();
        assert_eq!(*err, ErrorKind::DuplicateChapter(1));
    }

    #[test]
    fn test_blank_id_and_name() {
        assert_eq!(*Book::new(" ", "Genesis", Vec::new()).unwrap_err(), ErrorKind::Empty("book id"));
        assert_eq!(*Book::new("GEN", "", Vec::new()).unwrap_err(), ErrorKind::Empty("book name"));
    }
}
