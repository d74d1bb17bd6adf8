//! Document model for scripture translations.
//!
//! A [`Translation`] owns its [`Book`]s, which own their [`Chapter`]s, which
//! own their [`Verse`]s. Every level is validated on construction (including
//! when deserializing) and read-only afterwards:
//!
//! - book ids are unique within a translation,
//! - chapter numbers are unique within a book and kept in parsed order,
//! - verse numbers are strictly increasing within a chapter.
//!
//! Serializing with `serde` keeps the declared field names and the order of
//! every sequence, which is what consumers of the JSON form rely on.

mod book;
mod chapter;
pub mod error;
mod translation;
mod verse;

pub use crate::book::Book;
pub use crate::chapter::Chapter;
pub use crate::translation::Translation;
pub use crate::verse::Verse;
