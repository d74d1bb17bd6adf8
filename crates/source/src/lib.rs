//! Loading strategies for translations.
//!
//! A translation either arrives as a zipped bundle fetched from a remote
//! catalogue ([`RemoteSource`]) or already unpacked somewhere below a local
//! root directory ([`DirectorySource`]). Both sit behind the
//! [`TranslationSource`] trait and produce the exact same document model, so
//! everything downstream is oblivious to where a translation came from.

pub mod discover;
pub mod error;
pub mod strategy;

pub use crate::discover::{Discovery, discover};
#[cfg(feature = "mock")]
pub use crate::strategy::MockSource;
pub use crate::strategy::{Candidate, DirectorySource, IDENTIFIER_PLACEHOLDER, Location, RemoteSource, TranslationSource};
pub use lectio_parse::MARKER_FILE;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn TranslationSource + Send + Sync>;
