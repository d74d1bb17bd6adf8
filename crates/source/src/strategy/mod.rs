//! Source trait and implementations.
//!
//! This module defines the [`TranslationSource`] trait, which splits loading
//! into two steps: [`enumerate`](TranslationSource::enumerate) decides which
//! identifiers exist (and where), then [`load`](TranslationSource::load)
//! builds one translation at a time. Keeping the steps apart lets the caller
//! isolate failures per identifier while still treating a broken enumeration
//! as fatal.

mod directory;
#[cfg(feature = "mock")]
mod mock;
mod remote;

pub use self::directory::DirectorySource;
#[cfg(feature = "mock")]
pub use self::mock::MockSource;
pub use self::remote::{IDENTIFIER_PLACEHOLDER, RemoteSource};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use lectio_model::Translation;
use std::path::PathBuf;

/// Where the bundle of a [`Candidate`] lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Fetched over HTTP(S).
    Url(String),
    /// The discovered folder holding the marker file.
    Directory(PathBuf),
}

/// An identifier to be loaded, as produced by [`TranslationSource::enumerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub identifier: String,
    pub location: Location,
}
impl Candidate {
    pub fn new(identifier: impl Into<String>, location: Location) -> Self {
        Self { identifier: identifier.into(), location }
    }
}

/// Unified interface for the places translations are loaded from.
///
/// # Examples
///
/// ```no_run
/// use lectio_source::{TranslationSource, error::Result};
///
/// async fn first_translation_name(source: &dyn TranslationSource) -> Result<Option<String>> {
///     let Some(candidate) = source.enumerate().await?.into_iter().next() else {
///         return Ok(None);
///     };
///     let translation = source.load(&candidate).await?;
///     Ok(Some(translation.name().to_string()))
/// }
/// ```
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Name of the configured source, for logging.
    fn name(&self) -> &str;

    /// List the identifiers this source can load, in load order.
    ///
    /// An error here means the source as a whole is unusable (such as a
    /// missing root directory) and the load phase must not continue.
    /// Identifiers that merely turn out not to be translations are left out
    /// without an error.
    async fn enumerate(&self) -> Result<Vec<Candidate>>;

    /// Build the complete translation for one candidate.
    ///
    /// Never returns a partially populated translation: any failure while
    /// fetching or parsing fails the whole candidate.
    async fn load(&self, candidate: &Candidate) -> Result<Translation>;
}

/// Run a parser on the blocking pool; parsing a full translation is a few
/// hundred milliseconds of pure CPU work.
async fn parse_blocking<F>(identifier: &str, parse: F) -> Result<Translation>
where
    F: FnOnce() -> lectio_parse::error::Result<Translation> + Send + 'static,
{
    tokio::task::spawn_blocking(parse)
        .await
        .or_raise(|| ErrorKind::Task)?
        .or_raise(|| ErrorKind::Parse(identifier.to_string()))
}
