//! Lexical classification of C# source text
//!
//! Splits source into code, literal and comment segments. Purely lexical:
//! no syntax tree is built and preprocessor directives are ordinary code.

pub mod scanner;
pub mod segment;

pub use scanner::Scanner;
pub use segment::{Segment, SegmentKind};

/// Scan `source` into its segments
pub fn scan(source: &str) -> Vec<Segment<'_>> {
    Scanner::new(source).collect()
}

/// Count segments by kind
pub fn count_kind(source: &str, kind: SegmentKind) -> usize {
    Scanner::new(source).filter(|s| s.kind == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_and_count() {
        let source = "a(); // x\nb(); // y\n/* z */";
        assert_eq!(scan(source).len(), 6);
        assert_eq!(count_kind(source, SegmentKind::LineComment), 2);
        assert_eq!(count_kind(source, SegmentKind::BlockComment), 1);
    }
}
