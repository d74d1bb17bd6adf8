//! In-memory translation cache.
//!
//! The cache is the only state the service has: it is filled once at startup
//! by [`TranslationCache::populate`] and then only ever read. A translation is
//! either fully present or absent; a failed load never leaves anything behind.
//!
//! # Load phase
//! 1. The source enumerates its candidates. If that fails (the configured
//!    root directory doesn't exist, for instance) the load phase is aborted.
//! 2. Each candidate is loaded; successes are inserted, failures are logged
//!    and collected in the [`LoadReport`].

mod cache;
pub mod error;
mod report;

pub use crate::cache::TranslationCache;
pub use crate::report::LoadReport;
