//! Offset to line/column conversion.
//!
//! Lines and columns are 1-indexed. Columns count characters, not bytes, so
//! that positions shown to users line up with what an editor displays.

use serde::Serialize;

/// A 1-indexed line/column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Precomputed line starts for a source text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Build an index over `source`
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter_map(|(i, b)| if b == b'\n' { Some(i + 1) } else { None }),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// Source text this index was built from
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Number of lines (a trailing newline does not open a new line)
    pub fn line_count(&self) -> usize {
        if self.source.is_empty() {
            return 0;
        }
        if self.source.ends_with('\n') {
            self.line_starts.len() - 1
        } else {
            self.line_starts.len()
        }
    }

    /// 1-indexed line containing `offset`
    #[inline]
    pub fn line_of(&self, offset: usize) -> u32 {
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }

    /// 1-indexed line/column of `offset`
    pub fn line_col(&self, offset: usize) -> LineCol {
        let offset = offset.min(self.source.len());
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize - 1];
        let column = self
            .source
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start) as u32
            + 1;
        LineCol { line, column }
    }

    /// Byte offset where the given 1-indexed line starts
    #[inline]
    pub fn line_start(&self, line: u32) -> Option<usize> {
        self.line_starts.get((line as usize).checked_sub(1)?).copied()
    }

    /// Text of the given 1-indexed line without its line terminator
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        if line as usize > self.line_count() {
            return None;
        }
        let start = self.line_start(line)?;
        let end = self
            .line_starts
            .get(line as usize)
            .copied()
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        let text = text.strip_suffix('\n').unwrap_or(text);
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Iterate `(line_number, text)` for every line
    pub fn lines(&self) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        (1..=self.line_count() as u32).filter_map(move |n| self.line_text(n).map(|t| (n, t)))
    }
}
