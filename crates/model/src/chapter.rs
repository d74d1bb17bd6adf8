use crate::Verse;
use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};

/// A numbered chapter holding its verses in ascending verse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChapterRepr")]
pub struct Chapter {
    number: u32,
    verses: Vec<Verse>,
}
impl Chapter {
    /// Builds a chapter from verses in the order they were parsed.
    ///
    /// The order is checked, never repaired: verse numbers must be strictly
    /// increasing, which also rules out duplicates.
    pub fn new(number: u32, verses: Vec<Verse>) -> Result<Self> {
        if number == 0 {
            exn::bail!(ErrorKind::InvalidNumber("chapter"));
        }
        for pair in verses.windows(2) {
            let (previous, found) = (pair[0].number(), pair[1].number());
            if found <= previous {
                exn::bail!(ErrorKind::VerseOutOfOrder { previous, found });
            }
        }
        Ok(Self { number, verses })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Look up a verse by its number.
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        // Verses are sorted, courtesy of the constructor.
        self.verses.binary_search_by_key(&number, Verse::number).ok().map(|i| &self.verses[i])
    }
}

#[derive(Deserialize)]
struct ChapterRepr {
    number: u32,
    verses: Vec<Verse>,
}
impl TryFrom<ChapterRepr> for Chapter {
    type Error = ErrorKind;
    fn try_from(repr: ChapterRepr) -> std::result::Result<Self, Self::Error> {
        Chapter::new(repr.number, repr.verses).map_err(|e| (*e).clone())
    }
}
