//! Packaging a translation for download.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use lectio_model::Translation;
use std::io::{Cursor, Write};
use tracing::instrument;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A finished export: a zip archive holding one JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// `{identifier}.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Serialize `translation` to JSON and wrap it in a single-member zip
/// archive; the member is named `{identifier}.json`.
#[instrument(skip_all, fields(translation = translation.identifier()))]
pub fn export_archive(translation: &Translation) -> Result<Archive> {
    let identifier = translation.identifier();
    let packaging = || ErrorKind::Packaging(identifier.to_string());

    let json = serde_json::to_vec(translation).or_raise(packaging)?;
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        zip.start_file(format!("{identifier}.json"), options).or_raise(packaging)?;
        zip.write_all(&json).or_raise(packaging)?;
        zip.finish().or_raise(packaging)?;
    }
    tracing::debug!(json_bytes = json.len(), archive_bytes = buffer.len(), "packaged translation");
    Ok(Archive {
        file_name: format!("{identifier}.zip"),
        bytes: buffer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectio_model::{Book, Chapter, Verse};
    use std::io::Read;

    #[test]
    fn test_export_single_member() {
        let chapter = Chapter::new(1, vec![Verse::new(1, "No princípio").unwrap()]).unwrap();
        let book = Book::new("GEN", "Gênesis", vec![chapter]).unwrap();
        let translation = Translation::new("KJA", "King James Atualizada", "KJA", vec![book]).unwrap();

        let archive = export_archive(&translation).unwrap();
        assert_eq!(archive.file_name, "KJA.zip");

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 1);
        let mut member = zip.by_index(0).unwrap();
        assert_eq!(member.name(), "KJA.json");
        let mut json = String::new();
        member.read_to_string(&mut json).unwrap();
        let decoded: Translation = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, translation);
    }
}
