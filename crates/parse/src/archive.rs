//! Bundles packaged as zip archives.

use crate::bundle::{Bundle, assemble};
use crate::consts::{BOOK_EXTENSION, MARKER_FILE};
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use lectio_model::Translation;
use std::io::{Cursor, Read};
use tracing::instrument;
use zip::ZipArchive;

struct ArchiveBundle<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    /// Folder of the descriptor within the archive, with a trailing `/` (or empty).
    prefix: String,
}
impl<'a> ArchiveBundle<'a> {
    fn open(bytes: &'a [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes)).or_raise(|| ErrorKind::InvalidArchive)?;
        // Archives are often packed with a single top-level folder; the
        // shallowest descriptor wins.
        let descriptor = archive
            .file_names()
            .filter(|name| name.rsplit('/').next() == Some(MARKER_FILE))
            .min_by_key(|name| (name.matches('/').count(), name.to_string()))
            .ok_or_raise(|| ErrorKind::MissingMarker)?;
        let prefix = descriptor[..descriptor.len() - MARKER_FILE.len()].to_string();
        Ok(Self { archive, prefix })
    }
}
impl Bundle for ArchiveBundle<'_> {
    fn read_to_string(&mut self, relative: &str) -> Result<String> {
        let name = format!("{}{relative}", self.prefix);
        let mut member = self.archive.by_name(&name).or_raise(|| ErrorKind::MissingDocument(name.clone()))?;
        let mut content = String::new();
        member.read_to_string(&mut content).or_raise(|| ErrorKind::MalformedXml(name.clone()))?;
        Ok(content)
    }

    fn book_documents(&mut self) -> Result<Vec<String>> {
        let suffix = format!(".{BOOK_EXTENSION}");
        let mut documents: Vec<String> = self
            .archive
            .file_names()
            .filter_map(|name| name.strip_prefix(self.prefix.as_str()))
            .filter(|name| name.ends_with(&suffix))
            .map(str::to_string)
            .collect();
        documents.sort_by(|a, b| a.rsplit('/').next().cmp(&b.rsplit('/').next()).then_with(|| a.cmp(b)));
        Ok(documents)
    }
}

/// Parse a zipped bundle into a [`Translation`] stored under `identifier`.
#[instrument(skip(bytes), fields(archive_size = bytes.as_ref().len()))]
pub fn parse_archive(bytes: impl AsRef<[u8]>, identifier: &str) -> Result<Translation> {
    let mut bundle = ArchiveBundle::open(bytes.as_ref())?;
    assemble(&mut bundle, identifier, MARKER_FILE)
}
