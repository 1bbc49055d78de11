//! Rebuilding source text from resolved symbols.

use crate::document::TextDocument;
use crate::error::{AnalysisError, AnalysisResult};
use crate::file::ParsedFile;
use crate::symbol::ParsedSymbol;
use crate::types::Range;
use std::path::Path;

/// Header, body and footer of one symbol.
pub fn render_symbol(symbol: &ParsedSymbol) -> String {
    let mut text = String::with_capacity(symbol.header_text().len() + symbol.body.text.len());
    text.push_str(symbol.header_text());
    text.push_str(&symbol.body.text);
    text.push_str(symbol.footer_text());
    text
}

/// The full file text: preamble, every top-level symbol, trailer.
pub fn reassemble(file: &ParsedFile) -> String {
    let mut text = file.preamble.text.clone();
    for member in &file.members {
        text.push_str(&render_symbol(member));
    }
    if let Some(trailer) = &file.trailer {
        text.push_str(&trailer.text);
    }
    text
}

/// Rebuild a container's body from its own declaration head, its members and
/// its closing text.
///
/// Unlike [`render_symbol`] this goes through every nested member, so it only
/// reproduces the body when members tile it without gaps or overlaps.
pub fn reassemble_body(doc: &TextDocument, symbol: &ParsedSymbol) -> String {
    let (Some(range), Some(open)) = (symbol.body.range, symbol.open_of_body) else {
        return symbol.body.text.clone();
    };

    let stitched: Vec<&ParsedSymbol> = symbol
        .members
        .iter()
        .filter(|member| member.body.range.is_some())
        .collect();
    let Some(end) = stitched.last().and_then(|member| member.end_position()) else {
        return symbol.body.text.clone();
    };

    let mut text = doc.text_in(Range::new(range.start, open));
    for member in stitched {
        text.push_str(member.header_text());
        text.push_str(&reassemble_body(doc, member));
        text.push_str(member.footer_text());
    }
    text.push_str(&doc.text_in(Range::new(end, range.end)));
    text
}

/// 1-based number of the first line where `actual` differs from `expected`.
pub fn first_difference(expected: &str, actual: &str) -> Option<u32> {
    if expected == actual {
        return None;
    }
    let mut expected_lines = expected.split_inclusive('\n');
    let mut actual_lines = actual.split_inclusive('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return Some(line),
        }
    }
}

/// Check that `file` reassembles to `source`.
pub fn verify_round_trip(path: &Path, source: &str, file: &ParsedFile) -> AnalysisResult<()> {
    match first_difference(source, &reassemble(file)) {
        None => Ok(()),
        Some(line) => Err(AnalysisError::RoundTripMismatch {
            path: path.to_path_buf(),
            line,
        }),
    }
}
