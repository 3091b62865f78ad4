use crate::lexical::SegmentKind;
use serde::Serialize;
use std::ops::AddAssign;

/// What a clean removed from one file, or from a whole run when summed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripStats {
    pub line_comments: usize,
    pub doc_comments: usize,
    pub block_comments: usize,
    pub literals_preserved: usize,
    pub bytes_removed: usize,
}

impl StripStats {
    pub(crate) fn record(&mut self, kind: SegmentKind) {
        match kind {
            SegmentKind::LineComment => self.line_comments += 1,
            SegmentKind::DocComment => self.doc_comments += 1,
            SegmentKind::BlockComment => self.block_comments += 1,
            SegmentKind::VerbatimString
            | SegmentKind::RegularString
            | SegmentKind::CharLiteral => self.literals_preserved += 1,
            SegmentKind::Code => {}
        }
    }

    pub fn comments_removed(&self) -> usize {
        self.line_comments + self.doc_comments + self.block_comments
    }

    /// True when the clean removed nothing at all
    pub fn is_empty(&self) -> bool {
        self.comments_removed() == 0 && self.bytes_removed == 0
    }
}

impl AddAssign for StripStats {
    fn add_assign(&mut self, other: Self) {
        self.line_comments += other.line_comments;
        self.doc_comments += other.doc_comments;
        self.block_comments += other.block_comments;
        self.literals_preserved += other.literals_preserved;
        self.bytes_removed += other.bytes_removed;
    }
}
