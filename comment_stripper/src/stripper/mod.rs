//! Comment removal for C# source text
//!
//! [`clean`] runs the full transformation:
//!
//! 1. drop every comment segment reported by the scanner, keeping code and
//!    literals byte-for-byte ([`strip_comments`]);
//! 2. sweep `///` documentation comments outside literals ([`strip_doc_comments`]);
//! 3. strip trailing whitespace from every line ([`trim_trailing_whitespace`]);
//! 4. collapse runs of three or more newlines into two ([`collapse_blank_lines`]).
//!
//! Steps 3 and 4 work on whole lines, including lines inside multi-line
//! verbatim strings.

mod stats;

pub use stats::StripStats;

use crate::lexical::{Scanner, SegmentKind};

/// Clean `content` and return the transformed text.
///
/// Idempotent for well-formed input. An unterminated `"` followed by a
/// multi-line `/* */` and a later `"` can classify differently on a second
/// pass, since the first pass removes the comment that kept the two quotes
/// apart.
pub fn clean(content: &str) -> String {
    let stripped = strip_comments(content);
    let swept = strip_doc_comments(&stripped);
    let trimmed = trim_trailing_whitespace(&swept);
    collapse_blank_lines(&trimmed)
}

/// Clean `content` and report what was removed
pub fn clean_with_stats(content: &str) -> (String, StripStats) {
    let mut stats = StripStats::default();
    let mut stripped = String::with_capacity(content.len());

    for segment in Scanner::new(content) {
        stats.record(segment.kind);
        if segment.is_preserved() {
            stripped.push_str(segment.text);
        }
    }

    let swept = strip_doc_comments(&stripped);
    let trimmed = trim_trailing_whitespace(&swept);
    let cleaned = collapse_blank_lines(&trimmed);

    stats.bytes_removed = content.len().saturating_sub(cleaned.len());
    (cleaned, stats)
}

/// Remove line, doc and block comments, keeping code and literals
pub fn strip_comments(text: &str) -> String {
    Scanner::new(text)
        .filter(|segment| segment.is_preserved())
        .map(|segment| segment.text)
        .collect()
}

/// Remove `///` comments only; other comments and all literals are kept
pub fn strip_doc_comments(text: &str) -> String {
    Scanner::new(text)
        .filter(|segment| segment.kind != SegmentKind::DocComment)
        .map(|segment| segment.text)
        .collect()
}

/// Strip trailing whitespace from each `\n`-separated line.
///
/// A trailing newline stays a trailing newline.
pub fn trim_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace every run of three or more newlines with exactly two
pub fn collapse_blank_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut newline_run = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                output.push(ch);
            }
        } else {
            newline_run = 0;
            output.push(ch);
        }
    }

    output
}
