//! Byte-offset ranges and line/column conversion.
//!
//! The lexer hands out byte offsets (`TextSize`/`TextRange`, re-exported from
//! the `text-size` crate so offsets stay comparable across the lexer and the
//! parser); [`LineIndex`] converts an offset back to a [`Position`] only when
//! a diagnostic actually needs to be printed, so the hot path never pays for
//! line/column bookkeeping it doesn't use.

pub use text_size::{TextRange, TextSize};

use crate::base::Position;

/// A resolved line/column pair, 1-indexed line to match editor conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// Maps byte offsets into a source string back to line/column pairs.
///
/// Built once per parsed file from the newline positions; lookups are a
/// binary search over that table.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text
            .match_indices('\n')
            .map(|(i, _)| TextSize::from(i as u32))
            .collect();
        Self { newlines }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.newlines.partition_point(|&nl| nl < offset);
        let line_start = if line == 0 {
            TextSize::from(0)
        } else {
            self.newlines[line - 1] + TextSize::from(1)
        };
        LineCol {
            line: line + 1,
            column: u32::from(offset - line_start) as usize,
        }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let lc = self.line_col(offset);
        Position::new(lc.line, lc.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        let idx = LineIndex::new("ASAP2_VERSION 1 71\n/begin PROJECT");
        assert_eq!(idx.line_col(TextSize::from(0)), LineCol { line: 1, column: 0 });
    }

    #[test]
    fn second_line_after_newline() {
        let idx = LineIndex::new("abc\ndef");
        let lc = idx.line_col(TextSize::from(4));
        assert_eq!(lc, LineCol { line: 2, column: 0 });
    }

    #[test]
    fn column_within_line() {
        let idx = LineIndex::new("abc\ndefgh");
        let lc = idx.line_col(TextSize::from(7));
        assert_eq!(lc, LineCol { line: 2, column: 3 });
    }
}
