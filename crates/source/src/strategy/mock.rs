//! In-memory source for testing.

use super::{Candidate, Location, TranslationSource};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use lectio_model::Translation;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Entry {
    Loads(Translation),
    Fails(ErrorKind),
}

/// In-memory source for testing.
///
/// Serves prebuilt translations and scripted failures in insertion order, and
/// counts how many loads were attempted. Ideal for tests that need a
/// [`TranslationSource`] without filesystem or network dependencies.
///
/// # Examples
///
/// ```
/// use lectio_model::Translation;
/// use lectio_source::error::ErrorKind;
/// use lectio_source::{MockSource, TranslationSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MockSource::with_translations([Translation::new("KJA", "", "", Vec::new()).unwrap()])
///     .with_failure("XX", ErrorKind::NotFound("XX".to_string()));
/// let candidates = source.enumerate().await.unwrap();
/// assert_eq!(candidates.len(), 2);
/// assert!(source.load(&candidates[1]).await.is_err());
/// # }
/// ```
pub struct MockSource {
    name: String,
    entries: Vec<(String, Entry)>,
    missing_root: bool,
    loads: AtomicUsize,
}

impl MockSource {
    pub fn with_translations(translations: impl IntoIterator<Item = Translation>) -> Self {
        let entries = translations
            .into_iter()
            .map(|translation| (translation.identifier().to_string(), Entry::Loads(translation)))
            .collect();
        Self {
            name: "mock".to_string(),
            entries,
            missing_root: false,
            loads: AtomicUsize::new(0),
        }
    }

    /// Add an identifier whose load fails with `kind`.
    pub fn with_failure(mut self, identifier: impl Into<String>, kind: ErrorKind) -> Self {
        self.entries.push((identifier.into(), Entry::Fails(kind)));
        self
    }

    /// Make enumeration fail the way a missing root directory does.
    pub fn with_missing_root(mut self) -> Self {
        self.missing_root = true;
        self
    }

    /// Number of [`load`](TranslationSource::load) calls so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enumerate(&self) -> Result<Vec<Candidate>> {
        if self.missing_root {
            exn::bail!(ErrorKind::RootNotFound(PathBuf::from("/mock")));
        }
        Ok(self
            .entries
            .iter()
            .map(|(identifier, _)| Candidate::new(identifier.as_str(), Location::Url(format!("memory:{identifier}"))))
            .collect())
    }

    async fn load(&self, candidate: &Candidate) -> Result<Translation> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        // The first entry wins, should a test register one identifier twice.
        match self.entries.iter().find(|(identifier, _)| *identifier == candidate.identifier) {
            Some((_, Entry::Loads(translation))) => Ok(translation.clone()),
            Some((_, Entry::Fails(kind))) => exn::bail!(kind.clone()),
            None => exn::bail!(ErrorKind::NotFound(candidate.identifier.clone())),
        }
    }
}
