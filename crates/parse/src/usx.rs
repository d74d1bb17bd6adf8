//! USX book document parsing.
//!
//! Chapters and verses in USX are milestones: `<chapter number="3"/>` and
//! `<verse number="16"/>` mark where something starts, and (from USX 3) an
//! `eid` milestone marks where it ends. Verse text is whatever character data
//! appears between the two, minus notes and heading paragraphs.

use crate::consts::{EXCLUDED_ELEMENTS, EXCLUDED_PARA_STYLES};
use crate::error::{ErrorKind, Result};
use crate::xml::{attribute, collapse_whitespace, leading_number, text};
use exn::{OptionExt, ResultExt};
use lectio_model::{Book, Chapter, Verse};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::instrument;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Header {
    Running,
    TableOfContents,
}

/// What the text inside an open element is used for.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Verse text, if a verse is open.
    Content,
    /// Ignored, along with everything nested inside.
    Excluded,
    /// Candidate for the display name of the book.
    Header(Header),
}

#[derive(Default)]
struct BookBuilder {
    code: Option<String>,
    running_header: String,
    toc_header: String,
    chapters: Vec<Chapter>,
    chapter: Option<(u32, Vec<Verse>)>,
    verse: Option<(u32, String)>,
}
impl BookBuilder {
    fn close_verse(&mut self) -> Result<()> {
        let Some((number, raw)) = self.verse.take() else {
            return Ok(());
        };
        let text = collapse_whitespace(&raw);
        if text.is_empty() {
            tracing::trace!(verse = number, "dropping verse without text");
            return Ok(());
        }
        let Some((_, verses)) = self.chapter.as_mut() else {
            exn::bail!(ErrorKind::InvalidDocument(format!("verse {number} outside of a chapter")));
        };
        let verse = Verse::new(number, text).or_raise(|| ErrorKind::InvalidDocument(format!("verse {number}")))?;
        verses.push(verse);
        Ok(())
    }

    fn close_chapter(&mut self) -> Result<()> {
        self.close_verse()?;
        if let Some((number, verses)) = self.chapter.take() {
            let chapter =
                Chapter::new(number, verses).or_raise(|| ErrorKind::InvalidDocument(format!("chapter {number}")))?;
            self.chapters.push(chapter);
        }
        Ok(())
    }

    fn open_chapter(&mut self, number: u32) -> Result<()> {
        self.close_chapter()?;
        self.chapter = Some((number, Vec::new()));
        Ok(())
    }

    /// Segments (`4a`, `4b`) share a number and continue the same verse,
    /// whether or not the previous segment was closed with an `eid`.
    fn open_verse(&mut self, number: u32) -> Result<()> {
        if let Some((open, raw)) = self.verse.as_mut()
            && *open == number
        {
            raw.push(' ');
            return Ok(());
        }
        self.close_verse()?;
        let Some((_, verses)) = self.chapter.as_mut() else {
            exn::bail!(ErrorKind::InvalidDocument(format!("verse {number} outside of a chapter")));
        };
        let raw = match verses.last().is_some_and(|last| last.number() == number) {
            true => verses.pop().map(|verse| format!("{} ", verse.text())).unwrap_or_default(),
            false => String::new(),
        };
        self.verse = Some((number, raw));
        Ok(())
    }

    fn finish(mut self) -> Result<Book> {
        self.close_chapter()?;
        let code = self.code.ok_or_raise(|| ErrorKind::MissingField("book code"))?;
        let name = [self.running_header, self.toc_header]
            .into_iter()
            .map(|header| collapse_whitespace(&header))
            .find(|header| !header.is_empty())
            .unwrap_or_else(|| code.clone());
        Book::new(code.as_str(), name, self.chapters).or_raise(|| ErrorKind::InvalidDocument(format!("book {code}")))
    }
}

fn frame_for(element: &BytesStart<'_>, document: &str) -> Result<Frame> {
    let name = element.local_name();
    if EXCLUDED_ELEMENTS.contains(&name.as_ref()) {
        return Ok(Frame::Excluded);
    }
    if name.as_ref() != b"para" {
        return Ok(Frame::Content);
    }
    let style = attribute(element, b"style", document)?.unwrap_or_default();
    Ok(match style.as_str() {
        "h" => Frame::Header(Header::Running),
        "toc1" => Frame::Header(Header::TableOfContents),
        s if EXCLUDED_PARA_STYLES.contains(&s) => Frame::Excluded,
        _ => Frame::Content,
    })
}

/// Handle a `<book>`, `<chapter>` or `<verse>` start tag (or milestone).
fn milestone(builder: &mut BookBuilder, element: &BytesStart<'_>, document: &str) -> Result<()> {
    match element.local_name().as_ref() {
        b"book" => {
            if builder.code.is_none() {
                builder.code = attribute(element, b"code", document)?.map(|code| code.trim().to_string());
            }
        },
        b"chapter" => match attribute(element, b"number", document)? {
            Some(number) => builder.open_chapter(leading_number("chapter", &number)?)?,
            // An `eid` milestone: the chapter ends, but we only know which
            // chapter comes next when it starts.
            None => builder.close_verse()?,
        },
        b"verse" => match attribute(element, b"number", document)? {
            Some(number) => builder.open_verse(leading_number("verse", &number)?)?,
            None => builder.close_verse()?,
        },
        _ => {},
    }
    Ok(())
}

/// Parse one USX document into a [`Book`].
///
/// `document` names the source (a path or archive member) for error messages.
#[instrument(level = "debug", skip(xml), fields(xml_size = xml.len()))]
pub fn parse_book(xml: &str, document: &str) -> Result<Book> {
    let mut reader = Reader::from_str(xml);
    let mut builder = BookBuilder::default();
    let mut stack: Vec<Frame> = Vec::new();
    loop {
        let event = reader.read_event().or_raise(|| ErrorKind::MalformedXml(document.to_string()))?;
        match event {
            Event::Start(element) => {
                milestone(&mut builder, &element, document)?;
                stack.push(frame_for(&element, document)?);
            },
            Event::Empty(element) => milestone(&mut builder, &element, document)?,
            Event::End(_) => {
                stack.pop();
            },
            Event::Text(content) => {
                let target = stack.iter().rev().find(|frame| **frame != Frame::Content).copied();
                match target {
                    Some(Frame::Excluded) => {},
                    Some(Frame::Header(Header::Running)) => builder.running_header += &text(&content, document)?,
                    Some(Frame::Header(Header::TableOfContents)) => builder.toc_header += &text(&content, document)?,
                    Some(Frame::Content) | None => {
                        if let Some((_, verse)) = builder.verse.as_mut() {
                            verse.push_str(&text(&content, document)?);
                        }
                    },
                }
            },
            Event::CData(content) => {
                if !stack.contains(&Frame::Excluded)
                    && let Some((_, verse)) = builder.verse.as_mut()
                {
                    verse.push_str(&String::from_utf8_lossy(&content));
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }
    builder.finish()
}
