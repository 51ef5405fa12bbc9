//! Byte offset to line/column conversion for diagnostics.

use memchr::memchr_iter;
use serde::Serialize;

/// Zero-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Starting offset of each line of a source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|i| (i + 1) as u32));
        LineMap { line_starts }
    }

    /// Column is counted in characters, not bytes.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let character = source
            .get(start..clamped_end)
            .map(|slice| slice.chars().count() as u32)
            .unwrap_or(0);

        Position {
            line: line as u32,
            character,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
