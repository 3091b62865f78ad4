//! Character-scanning state machine for C# source text
//!
//! The scanner walks the input once, left to right, and splits it into
//! [`Segment`]s. At every position it tries, in order: verbatim string,
//! regular string, character literal, block comment, line comment. When an
//! opener has no matching terminator the opener is ordinary code and scanning
//! resumes at the next character. Consecutive code characters are merged into
//! a single `Code` segment, so concatenating every segment's text reproduces
//! the input exactly.
//!
//! All delimiters are ASCII, so the scanner works on bytes; multi-byte UTF-8
//! sequences never contain ASCII bytes and always end up inside one segment.

use super::segment::{Segment, SegmentKind};
use crate::utils::{Position, Span};

/// Iterator over the segments of a source string
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    offset: usize,
    position: Position,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            offset: 0,
            position: Position::start(),
        }
    }

    /// Byte offset of the next unscanned character
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Try every literal and comment form at `start`.
    ///
    /// Returns the kind and the exclusive end offset of the match.
    fn match_at(&self, start: usize) -> Option<(SegmentKind, usize)> {
        match self.bytes[start] {
            b'@' => {
                let quote = match (self.bytes.get(start + 1), self.bytes.get(start + 2)) {
                    (Some(b'"'), _) => start + 1,
                    (Some(b'$'), Some(b'"')) => start + 2,
                    _ => return None,
                };
                self.verbatim_end(quote + 1)
                    .map(|end| (SegmentKind::VerbatimString, end))
            }
            b'"' => self
                .escaped_end(start + 1, b'"')
                .map(|end| (SegmentKind::RegularString, end)),
            b'\'' => self
                .escaped_end(start + 1, b'\'')
                .map(|end| (SegmentKind::CharLiteral, end)),
            b'/' => match self.bytes.get(start + 1) {
                Some(b'*') => self.source[start + 2..]
                    .find("*/")
                    .map(|rel| (SegmentKind::BlockComment, start + 2 + rel + 2)),
                Some(b'/') => {
                    let kind = if self.bytes.get(start + 2) == Some(&b'/') {
                        SegmentKind::DocComment
                    } else {
                        SegmentKind::LineComment
                    };
                    Some((kind, self.line_end(start)))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// End of a verbatim string body starting at `from` (just past the opening quote).
    ///
    /// `""` embeds a quote. Without a closing quote, the last `""` pair is split
    /// and its first quote closes the literal; with no pair at all there is no match.
    fn verbatim_end(&self, from: usize) -> Option<usize> {
        let mut j = from;
        let mut last_pair = None;

        while j < self.bytes.len() {
            if self.bytes[j] == b'"' {
                if self.bytes.get(j + 1) == Some(&b'"') {
                    last_pair = Some(j);
                    j += 2;
                    continue;
                }
                return Some(j + 1);
            }
            j += 1;
        }

        last_pair.map(|pair| pair + 1)
    }

    /// End of a backslash-escaped literal body closed by `quote`.
    ///
    /// Raw newlines terminate the search without a match.
    fn escaped_end(&self, from: usize, quote: u8) -> Option<usize> {
        let mut j = from;

        while j < self.bytes.len() {
            match self.bytes[j] {
                b'\\' => match self.bytes.get(j + 1) {
                    Some(b'\n') | None => return None,
                    Some(_) => j += 2,
                },
                b'\n' => return None,
                b if b == quote => return Some(j + 1),
                _ => j += 1,
            }
        }

        None
    }

    /// Offset of the newline ending the line that contains `from`, or end of input
    fn line_end(&self, from: usize) -> usize {
        self.source[from..]
            .find('\n')
            .map(|rel| from + rel)
            .unwrap_or(self.bytes.len())
    }

    fn emit(&mut self, kind: SegmentKind, end: usize) -> Segment<'a> {
        let text = &self.source[self.offset..end];
        let start_position = self.position;
        let end_position = start_position.advance_str(text);

        self.offset = end;
        self.position = end_position;

        Segment::new(kind, text, Span::new(start_position, end_position))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        if let Some((kind, end)) = self.match_at(self.offset) {
            return Some(self.emit(kind, end));
        }

        // The current character is code; extend until the next successful match
        let mut end = self.offset + 1;
        while end < self.bytes.len() && self.match_at(end).is_none() {
            end += 1;
        }

        Some(self.emit(SegmentKind::Code, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(SegmentKind, &str)> {
        Scanner::new(source).map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn test_segments_cover_input() {
        let source = "var s = @\"a\"\"b\"; /* x */ char c = '\\''; // end\n/// doc";
        let rebuilt: String = Scanner::new(source).map(|s| s.text).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_line_and_doc_comments() {
        assert_eq!(
            kinds("int x; // set\n/// <summary>"),
            vec![
                (SegmentKind::Code, "int x; "),
                (SegmentKind::LineComment, "// set"),
                (SegmentKind::Code, "\n"),
                (SegmentKind::DocComment, "/// <summary>"),
            ]
        );
    }

    #[test]
    fn test_string_hides_comment_delimiters() {
        assert_eq!(
            kinds("s = \"// not /* a */ comment\";"),
            vec![
                (SegmentKind::Code, "s = "),
                (SegmentKind::RegularString, "\"// not /* a */ comment\""),
                (SegmentKind::Code, ";"),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_in_string_and_char() {
        assert_eq!(
            kinds(r#""a\"b" '\''"#),
            vec![
                (SegmentKind::RegularString, r#""a\"b""#),
                (SegmentKind::Code, " "),
                (SegmentKind::CharLiteral, r"'\''"),
            ]
        );
    }

    #[test]
    fn test_verbatim_string_keeps_backslashes_and_newlines() {
        let source = "@\"C:\\dir\\\n\"\"q\"\"\" x";
        assert_eq!(
            kinds(source),
            vec![
                (SegmentKind::VerbatimString, "@\"C:\\dir\\\n\"\"q\"\"\""),
                (SegmentKind::Code, " x"),
            ]
        );
    }

    #[test]
    fn test_interpolated_verbatim_prefix() {
        assert_eq!(
            kinds("@$\"{a}//\""),
            vec![(SegmentKind::VerbatimString, "@$\"{a}//\"")]
        );
    }

    #[test]
    fn test_block_comment_is_non_greedy_and_multiline() {
        assert_eq!(
            kinds("a /* one\ntwo */ b /* three */"),
            vec![
                (SegmentKind::Code, "a "),
                (SegmentKind::BlockComment, "/* one\ntwo */"),
                (SegmentKind::Code, " b "),
                (SegmentKind::BlockComment, "/* three */"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_falls_back_to_code() {
        assert_eq!(
            kinds("x = \"open // tail\ny"),
            vec![
                (SegmentKind::Code, "x = \"open "),
                (SegmentKind::LineComment, "// tail"),
                (SegmentKind::Code, "\ny"),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_falls_back_to_code() {
        assert_eq!(
            kinds("a /* never closed"),
            vec![(SegmentKind::Code, "a /* never closed")]
        );
    }

    #[test]
    fn test_unterminated_verbatim_splits_last_pair() {
        assert_eq!(
            kinds("@\"a\"\"b"),
            vec![
                (SegmentKind::VerbatimString, "@\"a\""),
                (SegmentKind::Code, "\"b"),
            ]
        );
    }

    #[test]
    fn test_slash_star_slash_is_not_a_comment() {
        assert_eq!(kinds("a /*/ b"), vec![(SegmentKind::Code, "a /*/ b")]);
    }

    #[test]
    fn test_spans_track_lines() {
        let segments: Vec<_> = Scanner::new("a\n  // c").collect();
        let comment = segments[1];

        assert_eq!(comment.kind, SegmentKind::LineComment);
        assert_eq!(comment.span.start.line, 2);
        assert_eq!(comment.span.start.column, 3);
        assert_eq!(comment.span.slice("a\n  // c"), "// c");
    }

    #[test]
    fn test_multibyte_text_stays_intact() {
        let source = "var é = \"ü\"; // ß";
        let rebuilt: String = Scanner::new(source)
            .filter(|s| s.is_preserved())
            .map(|s| s.text)
            .collect();
        assert_eq!(rebuilt, "var é = \"ü\"; ");
    }
}
