//! Small helpers over `quick_xml` events.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use quick_xml::events::{BytesStart, BytesText};

/// Unescaped value of an attribute, if present.
pub(crate) fn attribute(element: &BytesStart<'_>, name: &[u8], document: &str) -> Result<Option<String>> {
    let malformed = || ErrorKind::MalformedXml(document.to_string());
    match element.try_get_attribute(name).or_raise(malformed)? {
        Some(attr) => Ok(Some(attr.unescape_value().or_raise(malformed)?.into_owned())),
        None => Ok(None),
    }
}

/// Unescaped content of a text node. Whitespace is kept as-is.
pub(crate) fn text(content: &BytesText<'_>, document: &str) -> Result<String> {
    Ok(content.unescape().or_raise(|| ErrorKind::MalformedXml(document.to_string()))?.into_owned())
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Leading decimal digits of a milestone number, so that ranges (`1-2`) and
/// segments (`4a`) resolve to the verse they start with.
pub(crate) fn leading_number(field: &'static str, value: &str) -> Result<u32> {
    let digits: String = value.trim().chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => exn::bail!(ErrorKind::ParseError { field, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("16", 16)]
    #[case(" 3 ", 3)]
    #[case("1-2", 1)]
    #[case("4a", 4)]
    fn test_leading_number(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(leading_number("verse", value).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("a1")]
    #[case("-1")]
    fn test_leading_number_invalid(#[case] value: &str) {
        let err = leading_number("verse", value).unwrap_err();
        assert_eq!(*err, ErrorKind::ParseError { field: "verse", value: value.to_string() });
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  In the\n   beginning\tGod "), "In the beginning God");
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
