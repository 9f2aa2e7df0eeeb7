//! Character set detection and conversion.
//!
//! Detection order: byte order mark, then a NUL byte among the first two bytes
//! (UTF-16 without BOM), then the `1 CHAR` line of the header record.
//! Single-byte charsets (ASCII, ANSEL, ANSI, IBMPC) are carried through as
//! Latin-1 so their bytes round-trip unchanged.

use std::fmt;

use crate::error::{Result, Rin2IdError};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// How many header lines are inspected for a `CHAR` declaration.
const HEADER_SCAN_LINES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Ascii => "ASCII",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// Map a GEDCOM `CHAR` value to a charset.
    fn from_declaration(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" | "UNICODE" => Charset::Utf8,
            "ASCII" => Charset::Ascii,
            _ => Charset::Latin1,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Charset of a file plus whether it started with a byte order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    pub charset: Charset,
    pub bom: bool,
}

impl TextEncoding {
    pub const UTF8: TextEncoding = TextEncoding {
        charset: Charset::Utf8,
        bom: false,
    };

    /// Detect the encoding of raw file bytes.
    pub fn detect(input: &[u8]) -> Self {
        if input.starts_with(UTF8_BOM) {
            return Self::with_bom(Charset::Utf8);
        }
        if input.starts_with(UTF16_LE_BOM) {
            return Self::with_bom(Charset::Utf16Le);
        }
        if input.starts_with(UTF16_BE_BOM) {
            return Self::with_bom(Charset::Utf16Be);
        }

        match input {
            [0x00, b, ..] if *b != 0x00 => return Self::without_bom(Charset::Utf16Be),
            [b, 0x00, ..] if *b != 0x00 => return Self::without_bom(Charset::Utf16Le),
            _ => {}
        }

        match declared_charset(input) {
            Some(value) => Self::without_bom(Charset::from_declaration(&value)),
            None => Self::UTF8,
        }
    }

    fn with_bom(charset: Charset) -> Self {
        Self { charset, bom: true }
    }

    fn without_bom(charset: Charset) -> Self {
        Self {
            charset,
            bom: false,
        }
    }

    /// Decode file bytes into text. The byte order mark, if any, is dropped.
    pub fn decode(&self, input: &[u8]) -> Result<String> {
        match self.charset {
            Charset::Utf8 => {
                let bytes = input.strip_prefix(UTF8_BOM).unwrap_or(input);
                String::from_utf8(bytes.to_vec()).map_err(|e| self.error(e.to_string()))
            }
            Charset::Utf16Le => self.decode_utf16(input, UTF16_LE_BOM, u16::from_le_bytes),
            Charset::Utf16Be => self.decode_utf16(input, UTF16_BE_BOM, u16::from_be_bytes),
            Charset::Ascii | Charset::Latin1 => Ok(input.iter().map(|&b| b as char).collect()),
        }
    }

    fn decode_utf16(
        &self,
        input: &[u8],
        bom: &[u8],
        unit: fn([u8; 2]) -> u16,
    ) -> Result<String> {
        let bytes = input.strip_prefix(bom).unwrap_or(input);
        if bytes.len() % 2 != 0 {
            return Err(self.error("odd number of bytes".to_string()));
        }

        let units = bytes.chunks_exact(2).map(|c| unit([c[0], c[1]]));
        char::decode_utf16(units)
            .collect::<std::result::Result<String, _>>()
            .map_err(|e| self.error(e.to_string()))
    }

    /// Encode text back into this charset, re-emitting the byte order mark if
    /// the input had one. Characters a single-byte charset cannot hold become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() + 3);
        match self.charset {
            Charset::Utf8 => {
                if self.bom {
                    out.extend_from_slice(UTF8_BOM);
                }
                out.extend_from_slice(text.as_bytes());
            }
            Charset::Utf16Le => {
                if self.bom {
                    out.extend_from_slice(UTF16_LE_BOM);
                }
                text.encode_utf16()
                    .for_each(|u| out.extend_from_slice(&u.to_le_bytes()));
            }
            Charset::Utf16Be => {
                if self.bom {
                    out.extend_from_slice(UTF16_BE_BOM);
                }
                text.encode_utf16()
                    .for_each(|u| out.extend_from_slice(&u.to_be_bytes()));
            }
            Charset::Ascii | Charset::Latin1 => {
                out.extend(text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')));
            }
        }
        out
    }

    fn error(&self, reason: String) -> Rin2IdError {
        Rin2IdError::Encoding {
            charset: self.charset.name(),
            reason,
        }
    }
}

/// Value of the first `1 CHAR` line inside the leading header record.
fn declared_charset(input: &[u8]) -> Option<String> {
    let mut seen_top_level = false;

    for raw in input
        .split(|&b| b == b'\n' || b == b'\r')
        .filter(|l| !l.is_empty())
        .take(HEADER_SCAN_LINES)
    {
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.trim_start_matches('\u{feff}').trim();

        let mut fields = line.splitn(3, ' ');
        let level = fields.next().unwrap_or("");
        let tag = fields.next().unwrap_or("");

        if level == "0" {
            if seen_top_level {
                break;
            }
            seen_top_level = true;
        } else if level == "1" && tag == "CHAR" {
            return fields.next().map(|v| v.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bom() {
        assert_eq!(
            TextEncoding::detect(b"\xEF\xBB\xBF0 HEAD\n"),
            TextEncoding::with_bom(Charset::Utf8)
        );
        assert_eq!(
            TextEncoding::detect(b"\xFF\xFE0\x00"),
            TextEncoding::with_bom(Charset::Utf16Le)
        );
        assert_eq!(
            TextEncoding::detect(b"\xFE\xFF\x000"),
            TextEncoding::with_bom(Charset::Utf16Be)
        );
    }

    #[test]
    fn test_detect_utf16_without_bom() {
        assert_eq!(TextEncoding::detect(b"0\x00 \x00").charset, Charset::Utf16Le);
        assert_eq!(TextEncoding::detect(b"\x000\x00 ").charset, Charset::Utf16Be);
    }

    #[test]
    fn test_detect_header_declaration() {
        let ansel = b"0 HEAD\n1 SOUR X\n1 CHAR ANSEL\n0 TRLR\n";
        assert_eq!(TextEncoding::detect(ansel).charset, Charset::Latin1);

        let utf8 = b"0 HEAD\r\n1 CHAR UTF-8\r\n0 TRLR\r\n";
        assert_eq!(TextEncoding::detect(utf8).charset, Charset::Utf8);

        let ascii = b"0 HEAD\n1 CHAR ASCII\n";
        assert_eq!(TextEncoding::detect(ascii).charset, Charset::Ascii);
    }

    #[test]
    fn test_char_outside_header_is_ignored() {
        let input = b"0 HEAD\n0 @I1@ INDI\n1 CHAR ANSEL\n";
        assert_eq!(TextEncoding::detect(input), TextEncoding::UTF8);
    }

    #[test]
    fn test_no_declaration_defaults_to_utf8() {
        assert_eq!(TextEncoding::detect(b"0 HEAD\n0 TRLR\n"), TextEncoding::UTF8);
        assert_eq!(TextEncoding::detect(b""), TextEncoding::UTF8);
    }

    #[test]
    fn test_latin1_bytes_survive() {
        let enc = TextEncoding::without_bom(Charset::Latin1);
        let input = b"1 NAME Jos\xE9 /M\xFCller/\n";
        let text = enc.decode(input).unwrap();
        assert_eq!(text, "1 NAME José /Müller/\n");
        assert_eq!(enc.encode(&text), input.to_vec());
        assert_eq!(enc.encode("\u{4e2d}"), b"?".to_vec());
    }

    #[test]
    fn test_utf16_le_with_bom_survives() {
        let enc = TextEncoding::with_bom(Charset::Utf16Le);
        let bytes = enc.encode("0 HEAD\n");
        assert!(bytes.starts_with(UTF16_LE_BOM));
        assert_eq!(TextEncoding::detect(&bytes), enc);
        assert_eq!(enc.decode(&bytes).unwrap(), "0 HEAD\n");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = TextEncoding::UTF8.decode(b"0 HEAD \xFF\n").unwrap_err();
        assert!(matches!(err, Rin2IdError::Encoding { charset: "UTF-8", .. }));
    }

    #[test]
    fn test_odd_utf16_is_an_error() {
        let enc = TextEncoding::without_bom(Charset::Utf16Le);
        assert!(enc.decode(b"0\x00 ").is_err());
    }
}
