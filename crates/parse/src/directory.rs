//! Bundles already unpacked into a directory.

use crate::bundle::{Bundle, assemble};
use crate::consts::{BOOK_EXTENSION, MARKER_FILE};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use lectio_model::Translation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

struct DirectoryBundle {
    root: PathBuf,
}
impl Bundle for DirectoryBundle {
    fn read_to_string(&mut self, relative: &str) -> Result<String> {
        let path = self.root.join(relative);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                exn::bail!(ErrorKind::MissingDocument(relative.to_string()))
            },
            Err(e) => Err(e).or_raise(|| ErrorKind::Io(path)),
        }
    }

    fn book_documents(&mut self) -> Result<Vec<String>> {
        let mut documents = Vec::new();
        let mut stack = vec![self.root.clone()];
        while let Some(current) = stack.pop() {
            let entries = fs::read_dir(&current).or_raise(|| ErrorKind::Io(current.clone()))?;
            for entry in entries {
                let entry = entry.or_raise(|| ErrorKind::Io(current.clone()))?;
                let path = entry.path();
                // Symlinked directories are not followed.
                let file_type = entry.file_type().or_raise(|| ErrorKind::Io(path.clone()))?;
                if file_type.is_dir() {
                    stack.push(path);
                } else if path.extension().is_some_and(|ext| ext == BOOK_EXTENSION)
                    && let Ok(relative) = path.strip_prefix(&self.root)
                {
                    documents.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }
        documents.sort_by(|a, b| a.rsplit('/').next().cmp(&b.rsplit('/').next()).then_with(|| a.cmp(b)));
        Ok(documents)
    }
}

/// Parse the bundle in `dir` (the folder holding the descriptor) into a
/// [`Translation`] stored under `identifier`.
pub fn parse_directory(dir: impl AsRef<Path>, identifier: &str) -> Result<Translation> {
    parse_directory_with_descriptor(dir, identifier, MARKER_FILE)
}

/// Like [`parse_directory`], for bundles whose descriptor is not named
/// [`MARKER_FILE`].
#[instrument(skip(dir), fields(path = %dir.as_ref().display()))]
pub fn parse_directory_with_descriptor(
    dir: impl AsRef<Path>,
    identifier: &str,
    descriptor: &str,
) -> Result<Translation> {
    let root = dir.as_ref().to_path_buf();
    if !root.join(descriptor).is_file() {
        exn::bail!(ErrorKind::MissingMarker);
    }
    assemble(&mut DirectoryBundle { root }, identifier, descriptor)
}
