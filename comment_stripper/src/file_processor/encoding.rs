//! Source decoding and line-ending handling
//!
//! Files are decoded as UTF-8, falling back to Latin-1 (ISO-8859-1), which
//! maps every byte to the code point of the same value and therefore never
//! fails. Line endings are normalized to `\n` before cleaning and restored
//! on write.

use serde::Serialize;

/// Text encoding a source file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode raw bytes, trying UTF-8 first
    pub fn decode(bytes: Vec<u8>) -> (String, SourceEncoding) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, SourceEncoding::Utf8),
            Err(err) => {
                let text = err.into_bytes().into_iter().map(char::from).collect();
                (text, SourceEncoding::Latin1)
            }
        }
    }

    /// Encode text in this encoding.
    ///
    /// Returns `None` for Latin-1 when the text holds a character above U+00FF.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            SourceEncoding::Utf8 => Some(text.as_bytes().to_vec()),
            SourceEncoding::Latin1 => text.chars().map(|ch| u8::try_from(ch).ok()).collect(),
        }
    }
}

/// Dominant line terminator of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "lf",
            LineEnding::CrLf => "crlf",
        }
    }

    /// CRLF when more lines end in `\r\n` than in a bare `\n`
    pub fn detect(text: &str) -> LineEnding {
        let newlines = text.matches('\n').count();
        let crlf = text.matches("\r\n").count();

        if crlf > newlines - crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Replace every `\r\n` with `\n`
    pub fn normalize(text: &str) -> String {
        if text.contains("\r\n") {
            text.replace("\r\n", "\n")
        } else {
            text.to_string()
        }
    }

    /// Convert `\n`-terminated text to this line ending
    pub fn apply(&self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}
