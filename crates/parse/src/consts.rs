/// File whose presence marks a directory (or archive folder) as a bundle.
pub const MARKER_FILE: &str = "metadata.xml";
/// Extension of book documents, used when the descriptor lists none.
pub const BOOK_EXTENSION: &str = "usx";

/// Paragraph styles whose text is never part of a verse: identification,
/// headers, titles, section headings, references and speaker labels.
pub(crate) const EXCLUDED_PARA_STYLES: &[&str] = &[
    "ide", "h", "h1", "h2", "h3", "toc1", "toc2", "toc3", "toca1", "toca2", "toca3", "rem", "sts", "restore", "imt",
    "imt1", "imt2", "imt3", "is", "is1", "is2", "ip", "ipi", "im", "imi", "ipq", "imq", "ipr", "iq", "iq1", "iq2",
    "ib", "ili", "ili1", "ili2", "iot", "io", "io1", "io2", "iex", "imte", "ie", "mt", "mt1", "mt2", "mt3", "mt4",
    "mte", "mte1", "mte2", "cl", "cd", "ms", "ms1", "ms2", "ms3", "mr", "s", "s1", "s2", "s3", "s4", "sr", "r", "d",
    "sp", "sd", "sd1", "sd2",
];

/// Elements whose whole subtree is skipped.
pub(crate) const EXCLUDED_ELEMENTS: &[&[u8]] = &[b"note", b"figure", b"sidebar", b"periph", b"book"];
