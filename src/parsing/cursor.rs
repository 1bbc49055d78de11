//! Directional position arithmetic over a [`TextDocument`].
//!
//! A line end is one step regardless of the terminator, so the cursor moves
//! the way an editor caret does. Moves that leave the document yield
//! [`Position::OUT_OF_BOUNDS`].

use crate::document::TextDocument;
use crate::types::Position;

#[derive(Debug, Clone, Copy)]
pub struct TextCursor<'a> {
    doc: &'a TextDocument,
}

impl<'a> TextCursor<'a> {
    pub fn new(doc: &'a TextDocument) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &'a TextDocument {
        self.doc
    }

    /// Whether `position` is a character or line end inside the document.
    pub fn validate(&self, position: Position) -> bool {
        self.doc.is_valid(position)
    }

    /// Move `position` by `offset` steps. Positive offsets wrap from a line end
    /// to column 0 of the next line, negative ones from column 0 to the end of
    /// the previous line.
    pub fn move_by(&self, position: Position, offset: i64) -> Position {
        if !self.validate(position) {
            return Position::OUT_OF_BOUNDS;
        }

        let mut line = position.line;
        let mut character = position.character as i64 + offset;

        while character > self.doc.line_len(line) as i64 {
            if line + 1 >= self.doc.line_count() {
                return Position::OUT_OF_BOUNDS;
            }
            character -= self.doc.line_len(line) as i64 + 1;
            line += 1;
        }

        while character < 0 {
            if line == 0 {
                return Position::OUT_OF_BOUNDS;
            }
            line -= 1;
            character += self.doc.line_len(line) as i64 + 1;
        }

        Position::new(line, character as u32)
    }

    pub fn next(&self, position: Position) -> Position {
        self.move_by(position, 1)
    }

    pub fn previous(&self, position: Position) -> Position {
        self.move_by(position, -1)
    }

    /// Character under `position`; a line end reads as `'\n'`.
    pub fn char_at(&self, position: Position) -> Option<char> {
        if !self.validate(position) {
            return None;
        }
        Some(self.doc.char_at(position).unwrap_or('\n'))
    }
}
