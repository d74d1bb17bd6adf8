//! Finding the folder that actually holds a bundle.
//!
//! Translations dropped into a root directory are rarely laid out the same
//! way: `KJA/metadata.xml`, `KJA/bible/metadata.xml` and
//! `KJA/release/v2/metadata.xml` are all in the wild. [`discover`] walks one
//! identifier directory depth-first and reports the first folder containing
//! the marker file.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Outcome of searching one identifier directory for the marker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The first folder (depth-first, name order) holding the marker.
    Found(PathBuf),
    /// No folder holds the marker. Not an error: the directory just isn't a
    /// translation.
    NotFound,
}

async fn holds_marker(dir: &Path, marker: &str) -> bool {
    // Follows symlinks, so a linked descriptor still counts.
    fs::metadata(dir.join(marker)).await.is_ok_and(|m| m.is_file())
}

/// Immediate subdirectories of `dir`, sorted by name. Symlinked directories
/// are not followed, which keeps the walk free of cycles.
async fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.or_raise(|| ErrorKind::Io(dir.to_path_buf()))?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await.or_raise(|| ErrorKind::Io(dir.to_path_buf()))? {
        let file_type = entry.file_type().await.or_raise(|| ErrorKind::Io(entry.path()))?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Depth-first search of `dir` (itself included) for the first directory
/// containing `marker`. Siblings are visited in name order and the search
/// stops at the first match.
#[instrument(level = "debug", skip(dir), fields(path = %dir.display()))]
pub async fn discover(dir: &Path, marker: &str) -> Result<Discovery> {
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        if holds_marker(&current, marker).await {
            return Ok(Discovery::Found(current));
        }
        // Reversed, so that the first child in name order is popped first.
        stack.extend(subdirectories(&current).await?.into_iter().rev());
    }
    Ok(Discovery::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as sync_fs;

    fn touch(path: impl AsRef<Path>) {
        let path = path.as_ref();
        sync_fs::create_dir_all(path.parent().unwrap()).unwrap();
        sync_fs::write(path, b"<DBLMetadata/>").unwrap();
    }

    #[tokio::test]
    async fn test_marker_in_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("KJA/bible/metadata.xml"));
        let found = discover(&temp_dir.path().join("KJA"), "metadata.xml").await.unwrap();
        assert_eq!(found, Discovery::Found(temp_dir.path().join("KJA/bible")));
    }

    #[tokio::test]
    async fn test_marker_in_identifier_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("NVI/metadata.xml"));
        touch(temp_dir.path().join("NVI/nested/metadata.xml"));
        let found = discover(&temp_dir.path().join("NVI"), "metadata.xml").await.unwrap();
        assert_eq!(found, Discovery::Found(temp_dir.path().join("NVI")));
    }

    #[tokio::test]
    async fn test_first_match_in_name_order_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("ARA/b/metadata.xml"));
        touch(temp_dir.path().join("ARA/a/deeper/metadata.xml"));
        touch(temp_dir.path().join("ARA/c/metadata.xml"));
        let found = discover(&temp_dir.path().join("ARA"), "metadata.xml").await.unwrap();
        // Depth-first: everything under `a` is searched before `b`.
        assert_eq!(found, Discovery::Found(temp_dir.path().join("ARA/a/deeper")));
    }

    #[tokio::test]
    async fn test_no_marker() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("XX/notes/readme.txt"));
        let found = discover(&temp_dir.path().join("XX"), "metadata.xml").await.unwrap();
        assert_eq!(found, Discovery::NotFound);
    }

    #[tokio::test]
    async fn test_marker_must_be_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        sync_fs::create_dir_all(temp_dir.path().join("XX/metadata.xml")).unwrap();
        let found = discover(&temp_dir.path().join("XX"), "metadata.xml").await.unwrap();
        assert_eq!(found, Discovery::NotFound);
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = discover(&temp_dir.path().join("gone"), "metadata.xml").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Io(_)));
    }
}
