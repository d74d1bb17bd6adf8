//! Assembling a [`Translation`] from a bundle, wherever its files live.

use crate::error::{ErrorKind, Result};
use crate::{metadata, usx};
use exn::ResultExt;
use lectio_model::Translation;

/// Read access to the files of one bundle, addressed relative to the folder
/// holding the descriptor.
pub(crate) trait Bundle {
    fn read_to_string(&mut self, relative: &str) -> Result<String>;

    /// Every book document in the bundle, in file-name order. Only used when
    /// the descriptor does not list its contents.
    fn book_documents(&mut self) -> Result<Vec<String>>;
}

/// Normalize a descriptor `src` reference; rejects anything that could leave
/// the bundle folder.
pub(crate) fn normalize(relative: &str) -> Result<String> {
    let mut parts = Vec::new();
    for part in relative.split(['/', '\\']) {
        match part {
            "" | "." => {},
            ".." => exn::bail!(ErrorKind::MissingDocument(relative.to_string())),
            part => parts.push(part),
        }
    }
    if parts.is_empty() {
        exn::bail!(ErrorKind::MissingDocument(relative.to_string()));
    }
    Ok(parts.join("/"))
}

/// `descriptor` is the descriptor's file name relative to the bundle folder.
pub(crate) fn assemble(bundle: &mut impl Bundle, identifier: &str, descriptor: &str) -> Result<Translation> {
    let descriptor = metadata::parse(&bundle.read_to_string(descriptor)?, descriptor)?;
    let documents = match descriptor.contents.is_empty() {
        true => bundle.book_documents()?,
        false => descriptor.contents.iter().map(|src| normalize(src)).collect::<Result<Vec<_>>>()?,
    };
    if documents.is_empty() {
        exn::bail!(ErrorKind::NoBooks);
    }
    let mut books = Vec::with_capacity(documents.len());
    for document in &documents {
        let xml = bundle.read_to_string(document)?;
        books.push(usx::parse_book(&xml, document)?);
    }
    tracing::debug!(identifier, books = books.len(), "assembled bundle");
    let name = descriptor.name.unwrap_or_else(|| identifier.to_string());
    let abbreviation = descriptor.abbreviation.unwrap_or_else(|| identifier.to_string());
    Translation::new(identifier, name, abbreviation, books)
        .or_raise(|| ErrorKind::InvalidDocument(format!("translation {identifier}")))
}
