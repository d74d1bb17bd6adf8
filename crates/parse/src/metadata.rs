//! Bundle descriptor (`metadata.xml`) parsing.

use crate::error::{ErrorKind, Result};
use crate::xml::{attribute, text};
use exn::ResultExt;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::instrument;

/// The parts of the descriptor the loader cares about.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Descriptor {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    /// Book documents in canonical order, relative to the descriptor.
    pub contents: Vec<String>,
}

#[instrument(level = "trace", skip(xml))]
pub(crate) fn parse(xml: &str, document: &str) -> Result<Descriptor> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut descriptor = Descriptor::default();
    loop {
        let event = reader.read_event().or_raise(|| ErrorKind::MalformedXml(document.to_string()))?;
        match event {
            Event::Start(element) => path.push(element.local_name().as_ref().to_vec()),
            Event::Empty(element) if element.local_name().as_ref() == b"content" => {
                // A descriptor may describe several publications that repeat
                // the same documents; only the first mention counts.
                if let Some(src) = attribute(&element, b"src", document)?
                    && !descriptor.contents.contains(&src)
                {
                    descriptor.contents.push(src);
                }
            },
            Event::End(_) => {
                path.pop();
            },
            Event::Text(content) => {
                let field = match path.as_slice() {
                    [.., parent, leaf] if parent == b"identification" && leaf == b"name" => &mut descriptor.name,
                    [.., parent, leaf] if parent == b"identification" && leaf == b"abbreviation" => {
                        &mut descriptor.abbreviation
                    },
                    _ => continue,
                };
                let value = text(&content, document)?;
                let value = value.trim();
                if field.is_none() && !value.is_empty() {
                    *field = Some(value.to_string());
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <DBLMetadata version="2.0">
              <identification>
                <name>Bíblia King James Atualizada</name>
                <abbreviation>KJA</abbreviation>
              </identification>
              <publications>
                <publication default="true">
                  <structure>
                    <content role="GEN" src="release/USX_1/GEN.usx"/>
                    <content role="JHN" src="release/USX_1/JHN.usx"/>
                  </structure>
                </publication>
                <publication>
                  <structure>
                    <content role="GEN" src="release/USX_1/GEN.usx"/>
                  </structure>
                </publication>
              </publications>
            </DBLMetadata>"#;
        let descriptor = parse(xml, "metadata.xml").unwrap();
        assert_eq!(descriptor.name.as_deref(), Some("Bíblia King James Atualizada"));
        assert_eq!(descriptor.abbreviation.as_deref(), Some("KJA"));
        assert_eq!(descriptor.contents, vec!["release/USX_1/GEN.usx", "release/USX_1/JHN.usx"]);
    }

    #[test]
    fn test_parse_minimal_descriptor() {
        let descriptor = parse("<DBLMetadata/>", "metadata.xml").unwrap();
        assert_eq!(descriptor, Descriptor::default());
    }

    #[test]
    fn test_parse_malformed_descriptor() {
        let err = parse("<DBLMetadata><identification></DBLMetadata>", "metadata.xml").unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedXml("metadata.xml".to_string()));
    }
}
