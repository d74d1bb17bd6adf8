use crate::error::{ErrorKind, Result};
use crate::report::LoadReport;
use exn::ResultExt;
use futures::{StreamExt, stream};
use lectio_model::Translation;
use lectio_source::{Candidate, TranslationSource};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Read-only mapping from identifier to fully loaded [`Translation`].
///
/// Built once by [`populate`](Self::populate) (or collected from an iterator
/// in tests), then shared behind an [`Arc`] for the rest of the process.
/// Nothing can be inserted after construction.
#[derive(Debug, Default, Clone)]
pub struct TranslationCache {
    translations: BTreeMap<String, Arc<Translation>>,
}

impl TranslationCache {
    /// Run the load phase against `source`.
    ///
    /// Candidates are loaded in the order the source enumerates them, with up
    /// to `concurrency` loads in flight (`0` is treated as `1`). Results are
    /// still folded in candidate order, so the report and the logs read the
    /// same regardless of concurrency.
    ///
    /// # Errors
    ///
    /// Only a failing enumeration (such as a missing root directory) is an
    /// error; it returns [`ErrorKind::Startup`] before anything is loaded.
    /// Failures of individual identifiers end up in [`LoadReport::failed`].
    #[instrument(skip_all, fields(source = source.name(), concurrency = concurrency))]
    pub async fn populate(source: &dyn TranslationSource, concurrency: usize) -> Result<(Self, LoadReport)> {
        let started = Instant::now();
        let candidates = source.enumerate().await.or_raise(|| ErrorKind::Startup)?;
        tracing::info!(candidates = candidates.len(), "starting load phase");

        let mut report = LoadReport::default();
        let (candidates, duplicates) = dedupe(candidates);
        for identifier in &duplicates {
            tracing::warn!(%identifier, "identifier listed more than once; loading first occurrence only");
        }
        report.duplicates = duplicates;

        let mut cache = Self::default();
        let mut results = stream::iter(candidates)
            .map(|candidate| async move {
                let result = source.load(&candidate).await;
                (candidate.identifier, result)
            })
            .buffered(concurrency.max(1));
        while let Some((identifier, result)) = results.next().await {
            match result {
                Ok(translation) => {
                    tracing::info!(
                        %identifier,
                        books = translation.books().len(),
                        verses = translation.verse_count(),
                        "loaded translation"
                    );
                    cache.translations.insert(identifier.clone(), Arc::new(translation));
                    report.loaded.push(identifier);
                },
                Err(err) => {
                    let error = err.raise(ErrorKind::Load(identifier.clone()));
                    tracing::warn!(%identifier, ?error, "failed to load translation; skipping");
                    report.failed.push((identifier, error));
                },
            }
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "load phase complete"
        );
        Ok((cache, report))
    }

    pub fn get(&self, identifier: &str) -> Option<Arc<Translation>> {
        self.translations.get(identifier).cloned()
    }

    /// Loaded identifiers, sorted.
    pub fn list(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Iterate over entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Translation>)> {
        self.translations.iter().map(|(identifier, translation)| (identifier.as_str(), translation))
    }
}

/// Each translation is stored under its own identifier; a later translation
/// with the same identifier replaces an earlier one.
impl FromIterator<Translation> for TranslationCache {
    fn from_iter<I: IntoIterator<Item = Translation>>(iter: I) -> Self {
        let translations = iter
            .into_iter()
            .map(|translation| (translation.identifier().to_string(), Arc::new(translation)))
            .collect();
        Self { translations }
    }
}

/// Split candidates into first occurrences (order kept) and the identifiers
/// of repeats.
fn dedupe(candidates: Vec<Candidate>) -> (Vec<Candidate>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if seen.insert(candidate.identifier.clone()) {
            unique.push(candidate);
        } else {
            duplicates.push(candidate.identifier);
        }
    }
    (unique, duplicates)
}
