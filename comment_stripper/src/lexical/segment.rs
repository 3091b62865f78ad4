//! Classified slices of C# source text

use crate::utils::Span;
use std::fmt;

/// Lexical class of a scanned segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Anything that is not a literal or a comment
    Code,
    /// `@"..."` or `@$"..."`, quotes embedded as `""`
    VerbatimString,
    /// `"..."` with backslash escapes
    RegularString,
    /// `'...'` with backslash escapes
    CharLiteral,
    /// `/* ... */`
    BlockComment,
    /// `// ...` up to, not including, the newline
    LineComment,
    /// `/// ...` up to, not including, the newline
    DocComment,
}

impl SegmentKind {
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            SegmentKind::BlockComment | SegmentKind::LineComment | SegmentKind::DocComment
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            SegmentKind::VerbatimString | SegmentKind::RegularString | SegmentKind::CharLiteral
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Code => "code",
            SegmentKind::VerbatimString => "verbatim_string",
            SegmentKind::RegularString => "regular_string",
            SegmentKind::CharLiteral => "char_literal",
            SegmentKind::BlockComment => "block_comment",
            SegmentKind::LineComment => "line_comment",
            SegmentKind::DocComment => "doc_comment",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice borrowed from the scanned source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Segment<'a> {
    pub fn new(kind: SegmentKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Whether the segment survives comment stripping
    pub fn is_preserved(&self) -> bool {
        !self.kind.is_comment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(SegmentKind::DocComment.is_comment());
        assert!(SegmentKind::BlockComment.is_comment());
        assert!(!SegmentKind::Code.is_comment());
        assert!(SegmentKind::CharLiteral.is_literal());
        assert!(!SegmentKind::LineComment.is_literal());
        assert_eq!(SegmentKind::VerbatimString.to_string(), "verbatim_string");
    }
}
