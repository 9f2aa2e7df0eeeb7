//! GEDCOM text boundary: charset detection, parsing into a [`RecordTree`]
//! and serializing it back.

use std::io::Write;
use std::path::Path;

use crate::error::{Result, Rin2IdError};
use crate::tree::RecordTree;

pub mod charset;
mod parser;
mod writer;

pub use charset::{Charset, TextEncoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// Terminator of the first line in `text`, `Lf` when there is none.
    pub fn detect(text: &str) -> Self {
        match text.find(&['\r', '\n'][..]) {
            Some(pos) if text[pos..].starts_with("\r\n") => LineEnding::CrLf,
            Some(pos) if text[pos..].starts_with('\r') => LineEnding::Cr,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// A parsed file together with what is needed to write it back the same way.
#[derive(Debug, Clone)]
pub struct GedcomDocument {
    pub tree: RecordTree,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

impl GedcomDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Rin2IdError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let encoding = TextEncoding::detect(bytes);
        let text = encoding.decode(bytes)?;
        log::debug!("detected charset {} (bom: {})", encoding.charset, encoding.bom);

        let mut doc = Self::parse_str(&text)?;
        doc.encoding = encoding;
        Ok(doc)
    }

    /// Parse already-decoded text. The document is marked as UTF-8.
    pub fn parse_str(text: &str) -> Result<Self> {
        let tree = parser::parse_records(text)?;
        log::debug!("parsed {} records", tree.len());
        Ok(Self {
            tree,
            encoding: TextEncoding::UTF8,
            line_ending: LineEnding::detect(text),
        })
    }

    pub fn to_text(&self) -> String {
        writer::render_tree(&self.tree, self.line_ending)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoding.encode(&self.to_text())
    }

    /// Serialize into `out` in the document's charset and flush it.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.to_bytes())
            .and_then(|_| out.flush())
            .map_err(Rin2IdError::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending_detect() {
        assert_eq!(LineEnding::detect("0 HEAD\r\n0 TRLR"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("0 HEAD\r0 TRLR"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("0 HEAD\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("0 HEAD"), LineEnding::Lf);
    }

    #[test]
    fn test_round_trip_preserves_text() {
        let text = "0 HEAD\r\n1 CHAR UTF-8\r\n0 @I1@ INDI\r\n1 NAME Jöhn /Doe/\r\n0 TRLR\r\n";
        let doc = GedcomDocument::from_bytes(text.as_bytes()).unwrap();
        assert_eq!(doc.line_ending, LineEnding::CrLf);
        assert_eq!(doc.to_bytes(), text.as_bytes());
    }

    #[test]
    fn test_round_trip_preserves_latin1_and_bom_free() {
        let bytes = b"0 HEAD\n1 CHAR ANSI\n0 @I1@ INDI\n1 NAME Jos\xE9\n";
        let doc = GedcomDocument::from_bytes(bytes).unwrap();
        assert_eq!(doc.encoding.charset, Charset::Latin1);
        assert_eq!(doc.to_bytes(), bytes.to_vec());
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = GedcomDocument::from_bytes(b"0 HEAD\n3 X\n").unwrap_err();
        assert!(matches!(err, Rin2IdError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GedcomDocument::load(&dir.path().join("missing.ged")).unwrap_err();
        assert!(matches!(err, Rin2IdError::Io { .. }));
    }

    #[test]
    fn test_write_to() {
        let doc = GedcomDocument::parse_str("0 HEAD\n0 TRLR\n").unwrap();
        let mut out = Vec::new();
        doc.write_to(&mut out).unwrap();
        assert_eq!(out, b"0 HEAD\n0 TRLR\n");
    }
}
