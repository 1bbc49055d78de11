//! Boundary repair for field-style events.
//!
//! For `public event EventHandler Changed;` the oracle reports only the
//! declarator, so the body reads `Changed` and the header ends with
//! `public event EventHandler `. Repair extends the body over its terminator
//! and moves the declaration words back from the header into the body.

use super::patterns::{EVENT_WORD, TRAILING_KEYWORDS};
use super::trivia::leading_trivia;
use crate::document::TextDocument;
use crate::symbol::TextSpan;
use crate::types::{Position, Range};

/// Header and body of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries {
    pub header: Option<TextSpan>,
    pub body: TextSpan,
}

/// Return repaired boundaries for an event; already consistent input comes
/// back unchanged.
///
/// `limit` is where the next sibling starts. The body never grows past it,
/// so `event Action A, B;` leaves `B;` to the second declarator.
pub fn repair_event(doc: &TextDocument, boundaries: Boundaries, limit: Option<Position>) -> Boundaries {
    let Boundaries { header, body } = boundaries;
    let Some(body_range) = body.range else {
        return Boundaries { header, body };
    };

    let body_range = terminated_range(doc, body_range, &body.text, limit);

    let Some(header_span) = header else {
        return Boundaries {
            header: None,
            body: TextSpan::new(doc.text_in(body_range), body_range),
        };
    };
    let Some(header_range) = header_span.range else {
        return Boundaries {
            header: Some(header_span),
            body: TextSpan::new(doc.text_in(body_range), body_range),
        };
    };

    let header_text = &header_span.text;
    // comments and attributes may mention `event` too
    let (_, trivia_end) = leading_trivia(header_text);
    let declaration = &header_text[trivia_end..];
    let Some(event) = EVENT_WORD.find_iter(declaration).last() else {
        return Boundaries {
            header: Some(header_span),
            body: TextSpan::new(doc.text_in(body_range), body_range),
        };
    };

    let mut split = trivia_end + event.start();
    if let Some(run) = TRAILING_KEYWORDS.find(&declaration[..event.start()]) {
        split = trivia_end + run.start();
    }
    // whitespace directly after the split stays in the header
    let moved = &header_text[split..];
    split += moved.len() - moved.trim_start().len();

    tracing::debug!(
        "repairing event boundaries: moving '{}' into the body",
        header_text[split..].trim_end()
    );

    let kept_chars = header_text[..split].chars().count() as isize;
    let boundary = doc.shift(header_range.start, kept_chars);
    let body_range = Range::new(boundary, body_range.end);
    let header = (split > 0).then(|| {
        let range = Range::new(header_range.start, boundary);
        TextSpan::new(doc.text_in(range), range)
    });

    Boundaries {
        header,
        body: TextSpan::new(doc.text_in(body_range), body_range),
    }
}

/// Extend `range` over the `;` or `,` that ends the declarator when the
/// oracle left it out. Only whitespace may sit in between.
fn terminated_range(doc: &TextDocument, range: Range, text: &str, limit: Option<Position>) -> Range {
    let trimmed = text.trim_end();
    if trimmed.ends_with(';') || trimmed.ends_with('}') || trimmed.ends_with(',') {
        return range;
    }

    let within = |pos: Position| limit.is_none_or(|limit| pos <= limit);
    let mut pos = range.end;
    while within(pos) {
        match doc.char_at(pos) {
            Some(';' | ',') => {
                let end = doc.shift(pos, 1);
                if within(end) {
                    return Range::new(range.start, end);
                }
                break;
            }
            Some(c) if c.is_whitespace() => pos = doc.shift(pos, 1),
            Some(_) => break,
            None => {
                let next = doc.line_end_including_break(pos.line);
                if next == pos {
                    break;
                }
                pos = next;
            }
        }
    }
    range
}
