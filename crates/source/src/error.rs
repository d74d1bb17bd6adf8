//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only [`ErrorKind::RootNotFound`] is fatal to a load phase. Everything else
//! concerns a single identifier and is isolated by the caller.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured root directory is missing or not a directory.
    #[display("root directory not found: {}", _0.display())]
    RootNotFound(#[error(not(source))] PathBuf),
    /// The remote catalogue has no bundle for the identifier.
    #[display("translation not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// The request never got a response (connection, TLS, body transfer).
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The remote catalogue answered with an unexpected status.
    #[display("unexpected status {status} from {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// HTTP status code of the response.
        status: u16,
    },
    /// Reading the local filesystem failed.
    #[display("I/O error: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The bundle was retrieved but could not be parsed.
    #[display("failed to parse translation {_0}")]
    Parse(#[error(not(source))] String),
    /// The strategy was misconfigured.
    #[display("invalid configuration: {_0}")]
    Config(#[error(not(source))] String),
    /// A candidate produced by one strategy was handed to another.
    #[display("unsupported location for {_0}")]
    UnsupportedLocation(#[error(not(source))] String),
    /// The blocking parse task panicked or was cancelled.
    #[display("background task failed")]
    Task,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Io(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
