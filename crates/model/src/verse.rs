use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single numbered verse of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VerseRepr")]
pub struct Verse {
    number: u32,
    text: String,
}
impl Verse {
    /// Fails if `number` is zero or `text` is blank.
    pub fn new(number: u32, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if number == 0 {
            exn::bail!(ErrorKind::InvalidNumber("verse"));
        }
        if text.trim().is_empty() {
            exn::bail!(ErrorKind::EmptyText(number));
        }
        Ok(Self { number, text })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
impl Display for Verse {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.number, self.text)
    }
}

#[derive(Deserialize)]
struct VerseRepr {
    number: u32,
    text: String,
}
impl TryFrom<VerseRepr> for Verse {
    type Error = ErrorKind;
    fn try_from(repr: VerseRepr) -> std::result::Result<Self, Self::Error> {
        Verse::new(repr.number, repr.text).map_err(|e| (*e).clone())
    }
}
