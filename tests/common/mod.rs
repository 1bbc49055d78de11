#![allow(dead_code)]

use cstitch::config::ParsingConfig;
use cstitch::{LineEnding, OracleKind, OracleSymbol, ParsedFile, Position, Range, TextDocument};

/// Source text plus helpers that derive oracle ranges by needle search.
///
/// Needles are written with `\n`; they are converted to the fixture's line
/// ending so the same test can run against LF and CRLF text.
pub struct Fixture {
    pub source: String,
    pub doc: TextDocument,
    eol: &'static str,
}

impl Fixture {
    pub fn new(source: &str) -> Self {
        Self::with_line_ending(source, LineEnding::Lf)
    }

    pub fn with_line_ending(source: &str, line_ending: LineEnding) -> Self {
        let eol = line_ending.as_str();
        let source = source.replace('\n', eol);
        Self {
            doc: TextDocument::new(source.clone()),
            source,
            eol,
        }
    }

    fn needle(&self, needle: &str) -> String {
        needle.replace('\n', self.eol)
    }

    pub fn position(&self, byte: usize) -> Position {
        self.doc.position_at(self.source[..byte].chars().count())
    }

    fn byte_of(&self, position: Position) -> usize {
        let offset = self.doc.offset_at(position);
        self.source
            .char_indices()
            .nth(offset)
            .map_or(self.source.len(), |(index, _)| index)
    }

    /// Range of `needle`, which must occur exactly once.
    pub fn range(&self, needle: &str) -> Range {
        let needle = self.needle(needle);
        let matches: Vec<usize> = self.source.match_indices(&needle).map(|(i, _)| i).collect();
        assert_eq!(matches.len(), 1, "needle {needle:?} must be unique");
        Range::new(self.position(matches[0]), self.position(matches[0] + needle.len()))
    }

    /// From the unique `start` needle through the first `end` needle after it.
    pub fn span(&self, start: &str, end: &str) -> Range {
        let begin = self.range(start).start;
        let from = self.byte_of(begin);
        let end = self.needle(end);
        let at = self.source[from..]
            .find(&end)
            .unwrap_or_else(|| panic!("needle {end:?} not found"));
        Range::new(begin, self.position(from + at + end.len()))
    }

    /// Oracle symbol over `range` whose selection is the first `selection`
    /// needle at or after the range start.
    pub fn symbol(&self, kind: OracleKind, name: &str, detail: &str, range: Range, selection: &str) -> OracleSymbol {
        let from = self.byte_of(range.start);
        let at = from
            + self.source[from..]
                .find(selection)
                .unwrap_or_else(|| panic!("selection {selection:?} not found"));
        let selection_range = Range::new(self.position(at), self.position(at + selection.len()));
        OracleSymbol::new(name, detail, kind, range, selection_range)
    }

    /// Shorthand for a single-line declaration whose name is its selection.
    pub fn member(&self, kind: OracleKind, name: &str, decl: &str) -> OracleSymbol {
        self.symbol(kind, name, name, self.range(decl), name)
    }

    pub fn parse(&self, symbols: Vec<OracleSymbol>) -> ParsedFile {
        ParsedFile::parse(&self.doc, symbols, &ParsingConfig::default()).expect("file should resolve")
    }

    pub fn text(&self, range: Range) -> String {
        self.doc.text_in(range)
    }
}

/// Wraps `members` in a class declared as `class {name}\n{\n...}` at the top
/// of the source. Returns the fixture and the class symbol.
pub fn class_with(name: &str, body: &str, members: impl FnOnce(&Fixture) -> Vec<OracleSymbol>) -> (Fixture, OracleSymbol) {
    let source = format!("class {name}\n{{\n{body}}}\n");
    let fixture = Fixture::new(&source);
    let children = members(&fixture);
    // the closing brace ends the line before the final empty one
    let end = fixture.doc.shift(fixture.doc.end_position(), -1);
    let class = fixture
        .symbol(OracleKind::Class, name, name, Range::new(Position::new(0, 0), end), name)
        .with_children(children);
    (fixture, class)
}
