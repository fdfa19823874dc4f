//! Byte spans and line maps for source locations.
//!
//! Spans are half-open `[start, end)` byte offsets into a single document.
//! `LineMap` answers line-level queries without re-scanning the document;
//! the engine uses it to classify caret positions (for example, whether the
//! caret sits on a line that contains nothing but whitespace).

use serde::Serialize;

/// A half-open byte span `[start, end)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Start offset (inclusive).
    pub start: u32,
    /// End offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span. `start` must not exceed `end`.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create an empty span (a caret position).
    pub const fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether this span covers zero bytes (a caret, not a range).
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the span in bytes.
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether `offset` falls inside the span. An empty span contains only
    /// its own position.
    pub const fn contains(&self, offset: u32) -> bool {
        if self.is_empty() {
            offset == self.start
        } else {
            self.start <= offset && offset < self.end
        }
    }

    /// Whether the two spans share at least one offset, or one is an empty
    /// span positioned inside (or touching) the other. Empty selections are
    /// common (a caret inside a member declaration still selects it).
    pub const fn intersects(&self, other: Span) -> bool {
        if other.is_empty() {
            self.start <= other.start && other.start <= self.end
        } else if self.is_empty() {
            other.start <= self.start && self.start <= other.end
        } else {
            self.start < other.end && other.start < self.end
        }
    }
}

/// Maps byte offsets to lines for a single document snapshot.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the first character of each line.
    line_starts: Vec<u32>,
    /// Total document length in bytes.
    len: u32,
}

impl LineMap {
    /// Build a line map from document text.
    pub fn build(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            line_starts,
            len: text.len() as u32,
        }
    }

    /// Number of lines in the document.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Zero-based line index containing `offset`. Offsets past the end of
    /// the document map to the last line.
    pub fn line_index(&self, offset: u32) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line as u32,
            Err(insert) => insert as u32 - 1,
        }
    }

    /// The span of a line, excluding its trailing newline.
    pub fn line_span(&self, line: u32) -> Span {
        let start = self.line_starts[line as usize];
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        Span::new(start, end)
    }

    /// Whether the line containing `offset` is blank (whitespace only).
    pub fn is_blank_line(&self, text: &str, offset: u32) -> bool {
        let span = self.line_span(self.line_index(offset));
        text[span.start as usize..span.end as usize]
            .chars()
            .all(char::is_whitespace)
    }
}
