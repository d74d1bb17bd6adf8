//! Layered configuration.
//!
//! Values are merged, later layers winning:
//!
//! 1. built-in defaults ([`Config::default`]);
//! 2. a config file: either the one passed explicitly, or `lectio.toml` in the
//!    platform config directory when it exists;
//! 3. environment variables prefixed with `LECTIO_`, nested keys separated by
//!    `__` (e.g. `LECTIO_SOURCE__ROOT=/srv/bibles`).
//!
//! ```toml
//! concurrency = 1
//!
//! [source]
//! kind = "directory"
//! root = "/srv/bibles"
//! marker = "metadata.xml"
//! ```

mod config;
pub mod error;

pub use crate::config::{Config, DEFAULT_FILE_NAME, ENV_PREFIX, SourceConfig};
