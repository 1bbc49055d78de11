//! Nesting, quote and comment aware token search.
//!
//! Every boundary the resolver computes comes down to "find the next `X` that
//! is not inside brackets, a string or a comment". [`Scanner::find_token`] does
//! that in either direction over the document; the free functions at the
//! bottom do the same over plain strings.

use super::cursor::TextCursor;
use crate::document::TextDocument;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What to look for and how far.
#[derive(Debug, Clone, Copy)]
pub struct TokenSearch<'t> {
    pub candidates: &'t [&'t str],
    /// Forward searches stop at this position, backward ones before it
    pub boundary: Option<Position>,
    /// Test candidates after the depth update instead of before, so closing
    /// brackets can match at depth zero.
    pub anywhere: bool,
    pub direction: Direction,
}

impl<'t> TokenSearch<'t> {
    pub fn forward(candidates: &'t [&'t str]) -> Self {
        Self {
            candidates,
            boundary: None,
            anywhere: false,
            direction: Direction::Forward,
        }
    }

    pub fn backward(candidates: &'t [&'t str]) -> Self {
        Self {
            direction: Direction::Backward,
            ..Self::forward(candidates)
        }
    }

    pub fn until(mut self, boundary: Position) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn anywhere(mut self) -> Self {
        self.anywhere = true;
        self
    }
}

/// A candidate found at `position` (its first character).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'t> {
    pub position: Position,
    pub token: &'t str,
}

impl TokenMatch<'_> {
    /// Position just past the token. Tokens never span lines.
    pub fn end(&self) -> Position {
        Position::new(
            self.position.line,
            self.position.character + self.token.chars().count() as u32,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    cursor: TextCursor<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(doc: &'a TextDocument) -> Self {
        Self {
            cursor: TextCursor::new(doc),
        }
    }

    pub fn cursor(&self) -> TextCursor<'a> {
        self.cursor
    }

    /// Find the first candidate at depth zero outside strings and comments.
    ///
    /// Forward searches examine `start` itself; backward searches begin with
    /// the character before `start`. Returns `None` on reaching the boundary
    /// or the document edge.
    pub fn find_token<'t>(&self, start: Position, search: &TokenSearch<'t>) -> Option<TokenMatch<'t>> {
        let found = match search.direction {
            Direction::Forward => self.scan_forward(start, search),
            Direction::Backward => self.scan_backward(start, search),
        };
        if let Some(found) = &found {
            tracing::trace!("found '{}' at {}", found.token, found.position);
        }
        found
    }

    fn scan_forward<'t>(&self, start: Position, search: &TokenSearch<'t>) -> Option<TokenMatch<'t>> {
        let cursor = self.cursor;
        let mut position = start;
        let mut depth: i32 = 0;
        let mut quote: Option<char> = None;
        let mut in_block_comment = false;
        let mut line = LineChars::default();

        loop {
            if !cursor.validate(position) {
                return None;
            }
            if search.boundary.is_some_and(|boundary| position >= boundary) {
                return None;
            }

            let c = cursor.char_at(position)?;
            let next = cursor.char_at(cursor.next(position));

            if in_block_comment {
                if c == '*' && next == Some('/') {
                    in_block_comment = false;
                    position = cursor.move_by(position, 2);
                } else {
                    position = cursor.next(position);
                }
                continue;
            }

            if let Some(open) = quote {
                if c == '\\' {
                    position = cursor.move_by(position, 2);
                    continue;
                }
                if c == open {
                    quote = None;
                }
                position = cursor.next(position);
                continue;
            }

            if c == '/' && next == Some('/') {
                if position.line + 1 >= cursor.document().line_count() {
                    return None;
                }
                position = Position::new(position.line + 1, 0);
                continue;
            }
            if c == '/' && next == Some('*') {
                in_block_comment = true;
                position = cursor.move_by(position, 2);
                continue;
            }

            if !search.anywhere && depth == 0 {
                let chars = line.of(cursor.document(), position.line);
                if let Some(token) = candidate_at(chars, position, search.candidates) {
                    return Some(TokenMatch { position, token });
                }
            }

            depth += self.depth_change(position, c, Direction::Forward);

            if search.anywhere && depth == 0 {
                let chars = line.of(cursor.document(), position.line);
                if let Some(token) = candidate_at(chars, position, search.candidates) {
                    return Some(TokenMatch { position, token });
                }
            }

            if c == '"' || c == '\'' {
                quote = Some(c);
            }
            position = cursor.next(position);
        }
    }

    fn scan_backward<'t>(&self, start: Position, search: &TokenSearch<'t>) -> Option<TokenMatch<'t>> {
        let cursor = self.cursor;
        let mut position = cursor.previous(start);
        let mut depth: i32 = 0;
        let mut quote: Option<char> = None;
        let mut in_block_comment = false;
        let mut line = LineChars::default();
        let mut comment_line = u32::MAX;
        let mut comment_start: Option<u32> = None;

        loop {
            if !cursor.validate(position) {
                return None;
            }
            if search.boundary.is_some_and(|boundary| position < boundary) {
                return None;
            }

            if position.line != comment_line {
                comment_line = position.line;
                comment_start = line_comment_start(line.of(cursor.document(), position.line));
            }
            if comment_start.is_some_and(|column| position.character >= column)
                && position.character < cursor.document().line_len(position.line)
            {
                position = cursor.previous(position);
                continue;
            }

            let c = cursor.char_at(position)?;
            let previous = cursor.char_at(cursor.previous(position));

            if in_block_comment {
                if c == '*' && previous == Some('/') {
                    in_block_comment = false;
                    position = cursor.move_by(position, -2);
                } else {
                    position = cursor.previous(position);
                }
                continue;
            }

            if let Some(open) = quote {
                if c == open && previous != Some('\\') {
                    quote = None;
                }
                position = cursor.previous(position);
                continue;
            }

            if c == '/' && previous == Some('*') {
                in_block_comment = true;
                position = cursor.move_by(position, -2);
                continue;
            }

            if !search.anywhere && depth == 0 {
                let chars = line.of(cursor.document(), position.line);
                if let Some(token) = candidate_at(chars, position, search.candidates) {
                    return Some(TokenMatch { position, token });
                }
            }

            depth += self.depth_change(position, c, Direction::Backward);

            if search.anywhere && depth == 0 {
                let chars = line.of(cursor.document(), position.line);
                if let Some(token) = candidate_at(chars, position, search.candidates) {
                    return Some(TokenMatch { position, token });
                }
            }

            if c == '"' || c == '\'' {
                quote = Some(c);
            }
            position = cursor.previous(position);
        }
    }

    fn depth_change(&self, position: Position, c: char, direction: Direction) -> i32 {
        let change = match c {
            '(' | '[' | '<' => 1,
            ')' | ']' => -1,
            // `=>` is not a closing bracket
            '>' if self.cursor.char_at(self.cursor.previous(position)) == Some('=') => 0,
            '>' => -1,
            _ => 0,
        };
        match direction {
            Direction::Forward => change,
            Direction::Backward => -change,
        }
    }
}

/// Chars of the line a scan is on, rebuilt only when the line changes.
#[derive(Default)]
struct LineChars {
    line: Option<u32>,
    chars: Vec<char>,
}

impl LineChars {
    fn of(&mut self, doc: &TextDocument, line: u32) -> &[char] {
        if self.line != Some(line) {
            self.line = Some(line);
            self.chars = doc.line_text(line).chars().collect();
        }
        &self.chars
    }
}

/// The candidate starting at `position` on `chars`, its line. Words must not
/// touch identifier characters on either side.
fn candidate_at<'t>(chars: &[char], position: Position, candidates: &[&'t str]) -> Option<&'t str> {
    let column = position.character as usize;

    candidates.iter().copied().find(|candidate| {
        let len = candidate.chars().count();
        if len == 0 || column + len > chars.len() {
            return false;
        }
        if !chars[column..column + len].iter().copied().eq(candidate.chars()) {
            return false;
        }
        if candidate.starts_with(char::is_alphabetic) {
            let before = column.checked_sub(1).map(|i| chars[i]);
            let after = chars.get(column + len).copied();
            return !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char);
        }
        true
    })
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Column where a `//` comment starts on a line, ignoring string contents.
fn line_comment_start(chars: &[char]) -> Option<u32> {
    let mut quote: Option<char> = None;
    let mut in_block_comment = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if in_block_comment {
            if c == '*' && next == Some('/') {
                in_block_comment = false;
                i += 1;
            }
        } else if let Some(open) = quote {
            if c == '\\' {
                i += 1;
            } else if c == open {
                quote = None;
            }
        } else if c == '/' && next == Some('/') {
            return Some(i as u32);
        } else if c == '/' && next == Some('*') {
            in_block_comment = true;
            i += 1;
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        }
        i += 1;
    }
    None
}

/// Byte offsets of every `separator` at depth zero outside string and char
/// literals.
fn top_level_indices(text: &str, matches: impl Fn(&str, usize) -> Option<usize>) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous = '\0';

    for (index, c) in text.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            previous = c;
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '<' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '>' if previous != '=' => depth -= 1,
            _ => {}
        }

        if depth == 0 {
            if let Some(len) = matches(text, index) {
                found.push((index, len));
            }
        }
        previous = c;
    }
    found
}

fn split_at(text: &str, cuts: &[(usize, usize)]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, len) in cuts {
        parts.push(text[start..*index].trim().to_string());
        start = index + len;
    }
    parts.push(text[start..].trim().to_string());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Split on `separator` at depth zero, trimming and dropping empty pieces.
///
/// `( [ < {` nest; `"` and `'` literals may contain escaped quotes.
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let cuts = top_level_indices(text, |text, index| {
        text[index..]
            .starts_with(separator)
            .then_some(separator.len_utf8())
    });
    split_at(text, &cuts)
}

/// Byte offset of the first whole-word `word` at depth zero.
pub fn find_word_top_level(text: &str, word: &str) -> Option<usize> {
    top_level_indices(text, |text, index| word_at(text, index, word).then_some(word.len()))
        .first()
        .map(|(index, _)| *index)
}

/// Split on the whole word `word` at depth zero.
pub fn split_on_word(text: &str, word: &str) -> Vec<String> {
    let cuts = top_level_indices(text, |text, index| word_at(text, index, word).then_some(word.len()));
    split_at(text, &cuts)
}

fn word_at(text: &str, index: usize, word: &str) -> bool {
    if !text[index..].starts_with(word) {
        return false;
    }
    let before = text[..index].chars().next_back();
    let after = text[index + word.len()..].chars().next();
    !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
}

/// Byte offset of the bracket closing the one that opens `text`.
pub fn matching_close(text: &str) -> Option<usize> {
    let open = text.chars().next()?;
    let close = match open {
        '(' => ')',
        '[' => ']',
        '<' => '>',
        '{' => '}',
        _ => return None,
    };

    let mut depth = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}
