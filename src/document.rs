//! In-memory text buffer with line/offset/range queries.
//!
//! Offsets and columns count Unicode scalar values, so a position never lands
//! inside a multi-byte character. A line's length excludes its terminator; the
//! terminator of every line but the last is addressed as the position one past
//! the final column.

use crate::types::{LineEnding, Position, Range};

#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
    chars: Vec<char>,
    /// Char offset where each line starts
    line_starts: Vec<usize>,
    /// Char count of each line, terminator excluded
    line_lengths: Vec<u32>,
    line_ending: LineEnding,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let line_ending = LineEnding::detect(&text);

        let mut line_starts = vec![0];
        let mut line_lengths = Vec::new();
        let mut start = 0usize;

        for (index, c) in chars.iter().enumerate() {
            if *c == '\n' {
                let mut end = index;
                if end > start && chars[end - 1] == '\r' {
                    end -= 1;
                }
                line_lengths.push((end - start) as u32);
                start = index + 1;
                line_starts.push(start);
            }
        }
        line_lengths.push((chars.len() - start) as u32);

        Self {
            text,
            chars,
            line_starts,
            line_lengths,
            line_ending,
        }
    }

    /// Same text, but synthesized terminators use `line_ending`.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn eol(&self) -> &'static str {
        self.line_ending.as_str()
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Length of `line` in characters, 0 for lines past the end.
    pub fn line_len(&self, line: u32) -> u32 {
        self.line_lengths.get(line as usize).copied().unwrap_or(0)
    }

    pub fn line_text(&self, line: u32) -> String {
        self.text_in(Range::new(
            Position::new(line, 0),
            Position::new(line, self.line_len(line)),
        ))
    }

    pub fn len_chars(&self) -> usize {
        self.chars.len()
    }

    pub fn end_position(&self) -> Position {
        let last = self.line_count() - 1;
        Position::new(last, self.line_len(last))
    }

    /// Whether `position` addresses a character or a line end of this document.
    pub fn is_valid(&self, position: Position) -> bool {
        position.line < self.line_count() && position.character <= self.line_len(position.line)
    }

    /// Char offset of `position`; columns past the line end clamp to it and
    /// lines past the end map to the document length.
    pub fn offset_at(&self, position: Position) -> usize {
        match self.line_starts.get(position.line as usize) {
            Some(start) => start + position.character.min(self.line_len(position.line)) as usize,
            None => self.chars.len(),
        }
    }

    /// Inverse of [`offset_at`](Self::offset_at); offsets inside a CRLF clamp
    /// to the end of that line.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let character = (offset - self.line_starts[line]) as u32;
        Position::new(line as u32, character.min(self.line_len(line as u32)))
    }

    pub fn text_in(&self, range: Range) -> String {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end);
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }

    /// Character at `position`, `None` at a line end or outside the document.
    pub fn char_at(&self, position: Position) -> Option<char> {
        if position.line >= self.line_count() || position.character >= self.line_len(position.line)
        {
            return None;
        }
        self.chars.get(self.offset_at(position)).copied()
    }

    /// End of `line` including its terminator: the start of the next line, or
    /// the end of the last line.
    pub fn line_end_including_break(&self, line: u32) -> Position {
        if line + 1 < self.line_count() {
            Position::new(line + 1, 0)
        } else {
            Position::new(line, self.line_len(line))
        }
    }

    /// Move `position` by a signed number of characters counted in offsets,
    /// so a CRLF terminator is two characters.
    pub fn shift(&self, position: Position, delta: isize) -> Position {
        let offset = self.offset_at(position) as isize + delta;
        self.position_at(offset.max(0) as usize)
    }
}
