//! Remote archive source.
//!
//! Bundles are fetched as zip archives from a URL template such as
//! `https://example.org/bundles/{identifier}.zip`. There is no retry and, unless
//! one is configured, no timeout beyond what the HTTP client does by default.

use super::{Candidate, Location, TranslationSource, parse_blocking};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use lectio_model::Translation;
use lectio_parse::parse_archive;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

/// Placeholder replaced by the translation identifier in URL templates.
pub const IDENTIFIER_PLACEHOLDER: &str = "{identifier}";

/// Loads translations by downloading zipped bundles.
///
/// # Examples
///
/// ```no_run
/// use lectio_source::RemoteSource;
///
/// # fn example() -> lectio_source::error::Result<()> {
/// let source = RemoteSource::new(
///     "catalogue",
///     "https://example.org/bundles/{identifier}.zip",
///     vec!["KJA".to_string(), "ARA".to_string()],
///     None,
/// )?;
/// assert_eq!(source.url_for("KJA"), "https://example.org/bundles/KJA.zip");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSource {
    name: String,
    client: Client,
    url_template: String,
    identifiers: Vec<String>,
}
impl RemoteSource {
    /// Create a remote source with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the template lacks the `{identifier}` placeholder
    /// or the HTTP client cannot be built.
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        identifiers: Vec<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("lectio/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().or_raise(|| ErrorKind::Config("unable to build HTTP client".to_string()))?;
        Self::with_client(name, url_template, identifiers, client)
    }

    /// Create a remote source around an existing HTTP client.
    pub fn with_client(
        name: impl Into<String>,
        url_template: impl Into<String>,
        identifiers: Vec<String>,
        client: Client,
    ) -> Result<Self> {
        let url_template = url_template.into();
        if !url_template.contains(IDENTIFIER_PLACEHOLDER) {
            exn::bail!(ErrorKind::Config(format!("URL template is missing {IDENTIFIER_PLACEHOLDER}")));
        }
        Ok(Self {
            name: name.into(),
            client,
            url_template,
            identifiers,
        })
    }

    pub fn url_for(&self, identifier: &str) -> String {
        self.url_template.replace(IDENTIFIER_PLACEHOLDER, identifier)
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, identifier: &str, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        match response.status() {
            StatusCode::NOT_FOUND => exn::bail!(ErrorKind::NotFound(identifier.to_string())),
            status if !status.is_success() => exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }),
            _ => {},
        }
        let bytes = response.bytes().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        tracing::debug!(size = bytes.len(), "fetched bundle");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TranslationSource for RemoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enumerate(&self) -> Result<Vec<Candidate>> {
        // Configured order is load order.
        Ok(self
            .identifiers
            .iter()
            .map(|identifier| Candidate::new(identifier.as_str(), Location::Url(self.url_for(identifier))))
            .collect())
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn load(&self, candidate: &Candidate) -> Result<Translation> {
        let Location::Url(url) = &candidate.location else {
            exn::bail!(ErrorKind::UnsupportedLocation(candidate.identifier.clone()));
        };
        let bytes = self.fetch(&candidate.identifier, url).await?;
        let identifier = candidate.identifier.clone();
        parse_blocking(&candidate.identifier, move || parse_archive(bytes, &identifier)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const METADATA: &str = r#"<DBLMetadata><identification><name>Nova Versão</name></identification></DBLMetadata>"#;
    const JOHN: &str = r#"<usx><book code="JHN"/><chapter number="3"/>
        <para style="p"><verse number="16"/>Porque Deus tanto amou o mundo</para></usx>"#;

    fn bundle() -> Vec<u8> {
        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, content) in [("NVI/metadata.xml", METADATA), ("NVI/JHN.usx", JOHN)] {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Answer exactly one request with a canned response and return the URL
    /// template pointing at it.
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            let head = format!("HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n", body.len());
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{address}/bundles/{{identifier}}.zip")
    }

    fn source(template: String, identifiers: &[&str]) -> RemoteSource {
        let client = Client::builder().no_proxy().build().unwrap();
        let identifiers = identifiers.iter().map(|s| s.to_string()).collect();
        RemoteSource::with_client("remote", template, identifiers, client).unwrap()
    }

    #[test]
    fn test_template_requires_placeholder() {
        let err = RemoteSource::new("remote", "https://example.org/bundle.zip", Vec::new(), None).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Config(_)));
    }

    #[tokio::test]
    async fn test_enumerate_keeps_configured_order() {
        let source = source("https://example.org/{identifier}.zip".to_string(), &["NVI", "ARA", "KJA"]);
        let candidates = source.enumerate().await.unwrap();
        let identifiers: Vec<_> = candidates.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["NVI", "ARA", "KJA"]);
        assert_eq!(candidates[1].location, Location::Url("https://example.org/ARA.zip".to_string()));
    }

    #[tokio::test]
    async fn test_load() {
        let template = serve_once("200 OK", bundle()).await;
        let source = source(template, &["NVI"]);
        let candidate = source.enumerate().await.unwrap().remove(0);
        let translation = source.load(&candidate).await.unwrap();
        assert_eq!(translation.identifier(), "NVI");
        assert_eq!(translation.name(), "Nova Versão");
        let verse = translation.book("JHN").unwrap().chapter(3).unwrap().verse(16).unwrap();
        assert_eq!(verse.text(), "Porque Deus tanto amou o mundo");
    }

    #[tokio::test]
    async fn test_load_not_found() {
        let template = serve_once("404 Not Found", Vec::new()).await;
        let source = source(template, &["XX"]);
        let candidate = source.enumerate().await.unwrap().remove(0);
        let err = source.load(&candidate).await.unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound("XX".to_string()));
    }

    #[tokio::test]
    async fn test_load_server_error() {
        let template = serve_once("500 Internal Server Error", Vec::new()).await;
        let source = source(template, &["XX"]);
        let candidate = source.enumerate().await.unwrap().remove(0);
        let err = source.load(&candidate).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_payload() {
        let template = serve_once("200 OK", b"definitely not a zip".to_vec()).await;
        let source = source(template, &["XX"]);
        let candidate = source.enumerate().await.unwrap().remove(0);
        let err = source.load(&candidate).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Parse("XX".to_string()));
    }
}
