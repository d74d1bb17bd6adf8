//! Local directory source.
//!
//! Every immediate subdirectory of the root is a candidate translation named
//! after the directory. Which folder inside it holds the bundle is decided by
//! [`discover`](crate::discover).

use super::{Candidate, Location, TranslationSource, parse_blocking};
use crate::discover::{Discovery, discover};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use lectio_model::Translation;
use lectio_parse::{MARKER_FILE, parse_directory_with_descriptor};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Loads translations from bundles unpacked below a root directory.
///
/// # Examples
///
/// ```no_run
/// use lectio_source::{DirectorySource, TranslationSource};
///
/// # async fn example() -> lectio_source::error::Result<()> {
/// let source = DirectorySource::new("local", "/srv/bibles");
/// for candidate in source.enumerate().await? {
///     println!("{}", candidate.identifier);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    name: String,
    root: PathBuf,
    marker: String,
}
impl DirectorySource {
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
            marker: MARKER_FILE.to_string(),
        }
    }

    /// Look for bundles by a different descriptor file name.
    ///
    /// The marker is the descriptor: the file found by discovery is the one
    /// parsed for the translation's metadata and contents.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identifier directories directly below the root, sorted by name.
    async fn identifier_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        // Unlike deeper levels, the root itself is allowed to be a symlink.
        match fs::metadata(&self.root).await {
            Ok(metadata) if metadata.is_dir() => {},
            _ => exn::bail!(ErrorKind::RootNotFound(self.root.clone())),
        }
        let mut entries = fs::read_dir(&self.root).await.or_raise(|| ErrorKind::RootNotFound(self.root.clone()))?;
        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await.or_raise(|| ErrorKind::Io(self.root.clone()))? {
            let path = entry.path();
            if !fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(identifier) => dirs.push((identifier, path)),
                Err(name) => tracing::warn!(source = %self.name, ?name, "skipping directory with non UTF-8 name"),
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

#[async_trait]
impl TranslationSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(source = %self.name, root = %self.root.display()))]
    async fn enumerate(&self) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for (identifier, dir) in self.identifier_dirs().await? {
            match discover(&dir, &self.marker).await {
                Ok(Discovery::Found(path)) => {
                    tracing::debug!(%identifier, path = %path.display(), "discovered bundle");
                    candidates.push(Candidate::new(identifier, Location::Directory(path)));
                },
                Ok(Discovery::NotFound) => {
                    tracing::debug!(%identifier, marker = %self.marker, "no marker file; skipping directory");
                },
                // One unreadable directory must not hide the others.
                Err(error) => tracing::warn!(%identifier, ?error, "failed to search directory; skipping"),
            }
        }
        Ok(candidates)
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn load(&self, candidate: &Candidate) -> Result<Translation> {
        let Location::Directory(dir) = &candidate.location else {
            exn::bail!(ErrorKind::UnsupportedLocation(candidate.identifier.clone()));
        };
        let dir = dir.clone();
        let identifier = candidate.identifier.clone();
        let marker = self.marker.clone();
        parse_blocking(&candidate.identifier, move || {
            parse_directory_with_descriptor(dir, &identifier, &marker)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as sync_fs;

    const METADATA: &str = r#"<DBLMetadata>
        <identification><name>King James Atualizada</name><abbreviation>KJA</abbreviation></identification>
        <publications><publication><structure>
            <content role="GEN" src="GEN.usx"/>
            <content role="JHN" src="JHN.usx"/>
        </structure></publication></publications>
    </DBLMetadata>"#;
    const GENESIS: &str = r#"<usx><book code="GEN"/><para style="h">Gênesis</para><chapter number="1"/>
        <para style="p"><verse number="1"/>No princípio criou Deus os céus e a terra.<verse number="2"/>E a terra era sem forma e vazia.</para></usx>"#;
    const JOHN: &str = r#"<usx><book code="JHN"/><para style="h">João</para><chapter number="3"/>
        <para style="p"><verse number="16"/>Porque Deus amou o mundo de tal maneira.</para></usx>"#;

    fn write(path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        sync_fs::create_dir_all(path.parent().unwrap()).unwrap();
        sync_fs::write(path, content).unwrap();
    }

    fn bundle(dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        write(dir.join("metadata.xml"), METADATA);
        write(dir.join("GEN.usx"), GENESIS);
        write(dir.join("JHN.usx"), JOHN);
    }

    #[tokio::test]
    async fn test_enumerate() {
        let temp_dir = tempfile::tempdir().unwrap();
        bundle(temp_dir.path().join("KJA/bible"));
        bundle(temp_dir.path().join("ARA"));
        write(temp_dir.path().join("EMPTY/readme.txt"), "nothing here");
        write(temp_dir.path().join("stray-file.txt"), "not a directory");
        let source = DirectorySource::new("local", temp_dir.path());
        let candidates = source.enumerate().await.unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate::new("ARA", Location::Directory(temp_dir.path().join("ARA"))),
                Candidate::new("KJA", Location::Directory(temp_dir.path().join("KJA/bible"))),
            ]
        );
    }

    #[tokio::test]
    async fn test_enumerate_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("missing");
        let err = DirectorySource::new("local", &root).enumerate().await.unwrap_err();
        assert_eq!(*err, ErrorKind::RootNotFound(root));
    }

    #[tokio::test]
    async fn test_enumerate_root_is_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("file");
        write(&root, "oops");
        let err = DirectorySource::new("local", &root).enumerate().await.unwrap_err();
        assert_eq!(*err, ErrorKind::RootNotFound(root));
    }

    #[tokio::test]
    async fn test_custom_marker() {
        let temp_dir = tempfile::tempdir().unwrap();
        bundle(temp_dir.path().join("KJA/bible"));
        write(temp_dir.path().join("KJA/other/bundle.json"), "{}");
        let source = DirectorySource::new("local", temp_dir.path()).with_marker("bundle.json");
        let candidates = source.enumerate().await.unwrap();
        assert_eq!(candidates[0].location, Location::Directory(temp_dir.path().join("KJA/other")));
    }

    #[tokio::test]
    async fn test_load_custom_marker() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("KJA/bundle");
        write(dir.join("bundle.xml"), METADATA);
        write(dir.join("GEN.usx"), GENESIS);
        write(dir.join("JHN.usx"), JOHN);
        let source = DirectorySource::new("local", temp_dir.path()).with_marker("bundle.xml");
        let candidate = source.enumerate().await.unwrap().remove(0);
        assert_eq!(candidate.location, Location::Directory(dir));
        let translation = source.load(&candidate).await.unwrap();
        assert_eq!(translation.name(), "King James Atualizada");
        assert_eq!(translation.books().len(), 2);
    }

    #[tokio::test]
    async fn test_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        bundle(temp_dir.path().join("KJA/bible"));
        let source = DirectorySource::new("local", temp_dir.path());
        let candidate = source.enumerate().await.unwrap().remove(0);
        let translation = source.load(&candidate).await.unwrap();
        assert_eq!(translation.identifier(), "KJA");
        assert_eq!(translation.name(), "King James Atualizada");
        let chapter = translation.book("GEN").unwrap().chapter(1).unwrap();
        let numbers: Vec<_> = chapter.verses().iter().map(|v| v.number()).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_load_broken_bundle() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path().join("BAD/metadata.xml"), "<DBLMetadata><oops></DBLMetadata>");
        let source = DirectorySource::new("local", temp_dir.path());
        let candidate = source.enumerate().await.unwrap().remove(0);
        let err = source.load(&candidate).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Parse("BAD".to_string()));
    }

    #[tokio::test]
    async fn test_load_rejects_remote_candidate() {
        let source = DirectorySource::new("local", "/nonexistent");
        let candidate = Candidate::new("KJA", Location::Url("http://example.org/KJA.zip".to_string()));
        let err = source.load(&candidate).await.unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedLocation("KJA".to_string()));
    }
}
