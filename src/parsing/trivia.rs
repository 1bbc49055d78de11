//! Leading trivia of a declaration: whitespace, comments, attribute blocks
//! and preprocessor lines.

use super::scanner::matching_close;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    DocComment,
    LineComment,
    BlockComment,
    Attribute,
    Directive,
}

/// One trivia element; `start..end` are byte offsets into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub start: usize,
    pub end: usize,
}

/// Split the trivia run at the start of `text`. Returns the elements and the
/// byte offset of the first character that is not trivia.
pub fn leading_trivia(text: &str) -> (Vec<Trivia>, usize) {
    let mut items = Vec::new();
    let mut index = 0;
    let mut line_start = true;

    while index < text.len() {
        let rest = &text[index..];
        let (kind, len) = if let Some(c) = rest.chars().next().filter(|c| c.is_whitespace()) {
            (TriviaKind::Whitespace, c.len_utf8())
        } else if rest.starts_with("///") && !rest.starts_with("////") {
            (TriviaKind::DocComment, line_len(rest))
        } else if rest.starts_with("//") {
            (TriviaKind::LineComment, line_len(rest))
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(end) => (TriviaKind::BlockComment, end + 4),
                None => break,
            }
        } else if rest.starts_with('[') {
            match matching_close(rest) {
                Some(end) => (TriviaKind::Attribute, end + 1),
                None => break,
            }
        } else if rest.starts_with('#') && line_start {
            (TriviaKind::Directive, line_len(rest))
        } else {
            break;
        };

        if kind == TriviaKind::Whitespace {
            line_start |= rest.starts_with('\n');
            match items.last_mut() {
                Some(Trivia {
                    kind: TriviaKind::Whitespace,
                    end,
                    ..
                }) => *end = index + len,
                _ => items.push(Trivia {
                    kind,
                    start: index,
                    end: index + len,
                }),
            }
        } else {
            line_start = false;
            items.push(Trivia {
                kind,
                start: index,
                end: index + len,
            });
        }
        index += len;
    }

    (items, index)
}

/// Length of the first line of `text`, terminator excluded.
fn line_len(text: &str) -> usize {
    let end = text.find('\n').unwrap_or(text.len());
    text[..end].strip_suffix('\r').map_or(end, str::len)
}

/// Attribute blocks and doc comment lines found in a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTrivia {
    pub attributes: Vec<String>,
    /// `///` lines with the marker stripped, in source order
    pub doc_lines: Vec<String>,
}

impl HeaderTrivia {
    /// Collect attributes and doc comment lines from a header.
    ///
    /// Headers are trivia apart from stray text left between declarations,
    /// which is skipped a line at a time.
    pub fn scan(header: &str) -> Self {
        let mut result = HeaderTrivia::default();
        let mut offset = 0;

        while offset < header.len() {
            let rest = &header[offset..];
            let (items, end) = leading_trivia(rest);
            for item in items {
                let text = &rest[item.start..item.end];
                match item.kind {
                    TriviaKind::Attribute => result.attributes.push(text.to_string()),
                    TriviaKind::DocComment => result.doc_lines.push(strip_doc_marker(text)),
                    TriviaKind::LineComment
                    | TriviaKind::BlockComment
                    | TriviaKind::Whitespace
                    | TriviaKind::Directive => {}
                }
            }
            if end >= rest.len() {
                break;
            }
            // non-trivia text: resume on the next line
            match rest[end..].find('\n') {
                Some(newline) => offset += end + newline + 1,
                None => break,
            }
        }

        result
    }

    /// Doc comment lines joined with `eol`.
    pub fn xml_comment(&self, eol: &str) -> Option<String> {
        (!self.doc_lines.is_empty()).then(|| self.doc_lines.join(eol))
    }
}

fn strip_doc_marker(line: &str) -> String {
    let content = line.strip_prefix("///").unwrap_or(line);
    content.strip_prefix(' ').unwrap_or(content).trim_end().to_string()
}

/// Text is blank or a single comment.
pub fn is_blank_or_comment(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return true;
    }
    trimmed.starts_with("/*") && trimmed.ends_with("*/") && trimmed[2..].find("*/") == Some(trimmed.len() - 4)
}
