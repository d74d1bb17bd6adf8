//! The read-only request layer.
//!
//! [`Library`] answers every question a caller can ask (list, look up, search,
//! export) from an already populated [`TranslationCache`](lectio_cache::TranslationCache).
//! Lookups never touch the network or disk; malformed input is rejected
//! before the cache is consulted.

pub mod error;
pub mod export;
pub mod search;
mod service;

pub use crate::export::Archive;
pub use crate::search::{Query, SearchResults};
pub use crate::service::{Library, TranslationSummary};
