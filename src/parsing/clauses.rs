//! Implements lists, generic constraints and parameter lists located in the
//! document.

use super::scanner::{Scanner, TokenSearch, find_word_top_level, split_on_word, split_top_level};
use crate::types::{Position, Range};

const METHOD_BODY_OPEN: &[&str] = &["{", "=>", ";"];
const TYPE_BODY_OPEN: &[&str] = &["{", ";"];
const METHOD_CLAUSE_START: &[&str] = &[")"];
const TYPE_CLAUSE_START: &[&str] = &[":", "where"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clauses {
    pub implements: Vec<String>,
    pub constraints: Vec<String>,
    /// Just past the token that opens the body
    pub open_of_body: Option<Position>,
}

/// Split the text of a `: Base, IFace where T : new()` clause (without the
/// colon). Text starting with `where` has constraints only.
pub fn split_clause(text: &str) -> (Vec<String>, Vec<String>) {
    let text = text.trim();
    let (implements, constraints) = match find_word_top_level(text, "where") {
        Some(index) => (&text[..index], &text[index..]),
        None => (text, ""),
    };
    (split_top_level(implements, ','), split_on_word(constraints, "where"))
}

/// Locate the body-open token after `start` and the clauses before it.
///
/// Methods look for the `)` closing their parameter list and take what follows
/// as constraints; other declarations look for `:` or `where`.
pub fn extract(scanner: &Scanner<'_>, start: Position, end: Position, method: bool) -> Clauses {
    let body_open = if method { METHOD_BODY_OPEN } else { TYPE_BODY_OPEN };
    let Some(open) = scanner.find_token(start, &TokenSearch::forward(body_open).until(end)) else {
        return Clauses::default();
    };

    let mut clauses = Clauses {
        open_of_body: Some(open.end()),
        ..Default::default()
    };

    let search = if method {
        TokenSearch::forward(METHOD_CLAUSE_START).anywhere()
    } else {
        TokenSearch::forward(TYPE_CLAUSE_START)
    };
    let Some(found) = scanner.find_token(start, &search.until(open.position)) else {
        return clauses;
    };

    let clause_start = if found.token == "where" {
        found.position
    } else {
        found.end()
    };
    let text = scanner
        .cursor()
        .document()
        .text_in(Range::new(clause_start, open.position));

    let (implements, constraints) = split_clause(&text);
    if method {
        // a method has no base list; anything before `where` is not a clause
        clauses.constraints = constraints;
    } else {
        clauses.implements = implements;
        clauses.constraints = constraints;
    }
    clauses
}

/// Range of the bracketed list opened by the first depth-zero `open` after
/// `start`, brackets included.
pub fn bracketed_list(
    scanner: &Scanner<'_>,
    start: Position,
    end: Position,
    open: &'static str,
    close: &'static str,
) -> Option<Range> {
    let opening = [open];
    let found = scanner.find_token(start, &TokenSearch::forward(&opening).until(end))?;
    bracketed_list_at(scanner, found.position, end, close)
}

/// Like [`bracketed_list`] but the open bracket is taken as the first
/// occurrence of `open` regardless of nesting, for operator tokens such as
/// `<` that would otherwise count as brackets.
pub fn bracketed_list_plain(
    scanner: &Scanner<'_>,
    start: Position,
    end: Position,
    open: char,
    close: &'static str,
) -> Option<Range> {
    let cursor = scanner.cursor();
    let mut position = start;
    while cursor.validate(position) && position < end {
        if cursor.char_at(position) == Some(open) {
            return bracketed_list_at(scanner, position, end, close);
        }
        position = cursor.next(position);
    }
    None
}

fn bracketed_list_at(scanner: &Scanner<'_>, open_at: Position, end: Position, close: &'static str) -> Option<Range> {
    let closing = [close];
    let closed = scanner.find_token(open_at, &TokenSearch::forward(&closing).until(end).anywhere())?;
    Some(Range::new(open_at, closed.end()))
}

/// Positional parameter list of a record, if present: a `(` reached before
/// any `{`, `;` or `:` at depth zero.
pub fn record_parameters(scanner: &Scanner<'_>, start: Position, end: Position) -> Option<Range> {
    let found = scanner.find_token(start, &TokenSearch::forward(&["(", "{", ";", ":"]).until(end))?;
    if found.token != "(" {
        return None;
    }
    bracketed_list_at(scanner, found.position, end, ")")
}
