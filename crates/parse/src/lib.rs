//! Parsing of USX scripture bundles.
//!
//! A bundle is a folder holding a [`MARKER_FILE`] descriptor plus one USX
//! document per book. The same bundle can arrive zipped (fetched from a remote
//! catalogue) or already unpacked on disk, so there are two entrypoints that
//! share everything but file access:
//!
//! - [`parse_archive`] for the raw bytes of a zip archive, and
//! - [`parse_directory`] for the folder that holds the descriptor.
//!
//! Both either return a fully built [`Translation`](lectio_model::Translation)
//! or fail as a whole; nothing partial ever escapes.

mod archive;
mod bundle;
mod consts;
mod directory;
pub mod error;
mod metadata;
mod usx;
mod xml;

pub use crate::archive::parse_archive;
pub use crate::consts::{BOOK_EXTENSION, MARKER_FILE};
pub use crate::directory::{parse_directory, parse_directory_with_descriptor};
pub use crate::usx::parse_book;
