use crate::error::Error;
use std::time::Duration;

/// Outcome of a load phase.
///
/// Failures never abort the load phase; they are collected here (and logged)
/// so the caller can decide whether a partially populated cache is good
/// enough to serve.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Identifiers now present in the cache, in load order.
    pub loaded: Vec<String>,
    /// Identifiers that failed to load, with the reason, in load order.
    pub failed: Vec<(String, Error)>,
    /// Identifiers the source listed more than once. The first occurrence was
    /// loaded (or failed) like any other; repeats were ignored.
    pub duplicates: Vec<String>,
    /// Wall-clock duration of the whole load phase.
    pub elapsed: Duration,
}
impl LoadReport {
    /// Returns `true` if every enumerated identifier was loaded. Duplicates
    /// don't count against this.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_identifiers(&self) -> impl Iterator<Item = &str> {
        self.failed.iter().map(|(identifier, _)| identifier.as_str())
    }
}
