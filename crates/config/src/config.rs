use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use lectio_source::{DirectorySource, IDENTIFIER_PLACEHOLDER, MARKER_FILE, RemoteSource, SourceHandle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "LECTIO_";
/// Name of the config file looked up in the platform config directory.
pub const DEFAULT_FILE_NAME: &str = "lectio.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of translations loaded at the same time.
    pub concurrency: usize,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: 1,
            source: SourceConfig::Directory {
                root: default_root(),
                marker: MARKER_FILE.to_string(),
            },
        }
    }
}

/// Where translations come from; exactly one strategy is active per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Bundles unpacked below `root`, one directory per identifier.
    Directory {
        root: PathBuf,
        #[serde(default = "default_marker")]
        marker: String,
    },
    /// Zipped bundles downloaded from `url_template`, with `{identifier}`
    /// substituted for each entry of `identifiers`.
    Remote {
        url_template: String,
        identifiers: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
}

fn default_marker() -> String {
    MARKER_FILE.to_string()
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lectio")
}

fn default_root() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("translations"))
        .unwrap_or_else(|| PathBuf::from("translations"))
}

impl Config {
    /// `lectio.toml` in the platform config directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(DEFAULT_FILE_NAME))
    }

    /// Assemble the configuration layers without extracting them.
    ///
    /// An explicit `file` must exist; the default file is only used when it
    /// does.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                figment = match path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => figment.merge(Toml::file(path)),
                    Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                    Some("json") => figment.merge(Json::file(path)),
                    _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
                };
            },
            None => {
                if let Some(path) = Self::default_path().filter(|path| path.is_file()) {
                    tracing::debug!(path = %path.display(), "using default config file");
                    figment = figment.merge(Toml::file(path));
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate the configuration.
    #[instrument(skip_all, fields(file = file.map(|path| path.display().to_string())))]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(file)?)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            exn::bail!(ErrorKind::Invalid("concurrency must be at least 1".to_string()));
        }
        self.source.validate()
    }
}

impl SourceConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Directory { .. } => "directory",
            Self::Remote { .. } => "remote",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Directory { marker, .. } => {
                if marker.trim().is_empty() {
                    exn::bail!(ErrorKind::Invalid("marker must not be empty".to_string()));
                }
            },
            Self::Remote {
                url_template,
                identifiers,
                timeout_secs,
            } => {
                if !url_template.contains(IDENTIFIER_PLACEHOLDER) {
                    exn::bail!(ErrorKind::Invalid(format!("url_template must contain {IDENTIFIER_PLACEHOLDER}")));
                }
                if identifiers.is_empty() {
                    exn::bail!(ErrorKind::Invalid("identifiers must not be empty".to_string()));
                }
                if identifiers.iter().any(|identifier| identifier.trim().is_empty()) {
                    exn::bail!(ErrorKind::Invalid("identifiers must not be blank".to_string()));
                }
                if *timeout_secs == Some(0) {
                    exn::bail!(ErrorKind::Invalid("timeout_secs must be at least 1".to_string()));
                }
            },
        }
        Ok(())
    }

    /// Construct the configured loading strategy.
    pub fn build(&self) -> Result<SourceHandle> {
        self.validate()?;
        Ok(match self {
            Self::Directory { root, marker } => {
                Arc::new(DirectorySource::new(self.kind(), root).with_marker(marker.as_str()))
            },
            Self::Remote {
                url_template,
                identifiers,
                timeout_secs,
            } => Arc::new(
                RemoteSource::new(
                    self.kind(),
                    url_template.as_str(),
                    identifiers.clone(),
                    timeout_secs.map(Duration::from_secs),
                )
                .or_raise(|| ErrorKind::Source)?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn load_str(file_name: &str, content: &str) -> Result<Config> {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(file_name);
        std::fs::write(&path, content).unwrap();
        // No environment layer.
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(&path)),
            Some("json") => figment.merge(Json::file(&path)),
            _ => figment.merge(Yaml::file(&path)),
        };
        Config::from_figment(figment)
    }

    #[rstest]
    #[case("lectio.toml", "concurrency = 2\n[source]\nkind = \"directory\"\nroot = \"/srv/bibles\"\n")]
    #[case("lectio.yaml", "concurrency: 2\nsource:\n  kind: directory\n  root: /srv/bibles\n")]
    #[case("lectio.json", r#"{"concurrency": 2, "source": {"kind": "directory", "root": "/srv/bibles"}}"#)]
    fn test_formats(#[case] file_name: &str, #[case] content: &str) {
        let config = load_str(file_name, content).unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(
            config.source,
            SourceConfig::Directory {
                root: PathBuf::from("/srv/bibles"),
                marker: MARKER_FILE.to_string(),
            }
        );
    }

    #[test]
    fn test_remote() {
        let config = load_str(
            "lectio.toml",
            r#"
            [source]
            kind = "remote"
            url_template = "https://example.org/bundles/{identifier}.zip"
            identifiers = ["KJA", "NVI"]
            timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.concurrency, 1);
        assert_eq!(
            config.source,
            SourceConfig::Remote {
                url_template: "https://example.org/bundles/{identifier}.zip".to_string(),
                identifiers: vec!["KJA".to_string(), "NVI".to_string()],
                timeout_secs: Some(30),
            }
        );
        let source = config.source.build().unwrap();
        assert_eq!(source.name(), "remote");
    }

    #[rstest]
    #[case("concurrency = 0")]
    #[case("[source]\nkind = \"directory\"\nroot = \"/srv\"\nmarker = \" \"")]
    #[case("[source]\nkind = \"remote\"\nurl_template = \"https://example.org/x.zip\"\nidentifiers = [\"KJA\"]")]
    #[case("[source]\nkind = \"remote\"\nurl_template = \"https://example.org/{identifier}.zip\"\nidentifiers = []")]
    #[case("[source]\nkind = \"remote\"\nurl_template = \"https://example.org/{identifier}.zip\"\nidentifiers = [\"\"]")]
    fn test_invalid(#[case] content: &str) {
        let err = load_str("lectio.toml", content).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)), "{err:?}");
    }

    #[test]
    fn test_unknown_kind() {
        let err = load_str("lectio.toml", "[source]\nkind = \"ftp\"").unwrap_err();
        assert_eq!(*err, ErrorKind::Extract);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectio.ini");
        std::fs::write(&path, "concurrency=1").unwrap();
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat(path));
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("lectio.toml", "concurrency = 2\n[source]\nkind = \"directory\"\nroot = \"/srv/file\"\n")?;
            jail.set_env("LECTIO_CONCURRENCY", "4");
            jail.set_env("LECTIO_SOURCE__ROOT", "/srv/env");
            let config = Config::load(Some(Path::new("lectio.toml"))).unwrap();
            assert_eq!(config.concurrency, 4);
            assert_eq!(
                config.source,
                SourceConfig::Directory {
                    root: PathBuf::from("/srv/env"),
                    marker: MARKER_FILE.to_string(),
                }
            );
            Ok(())
        });
    }

    #[test]
    fn test_build_directory_source() {
        let source = Config::default().source.build().unwrap();
        assert_eq!(source.name(), "directory");
    }
}
