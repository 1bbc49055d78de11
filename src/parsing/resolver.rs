//! Symbol resolution: turns oracle symbols into fully attributed
//! [`ParsedSymbol`]s with exact header, body and footer boundaries.
//!
//! Siblings are processed in range order. Each symbol's header starts where
//! the previous sibling ended (footer end, else body end), so headers,
//! bodies and footers of a sibling list tile the parent's body without gaps.

use super::classify::{Classification, classify};
use super::clauses;
use super::context::ParentContext;
use super::declaration;
use super::event_repair::{Boundaries, repair_event};
use super::naming;
use super::parameters::{Parameter, parse_parameter_list};
use super::scanner::{Scanner, TokenSearch};
use super::trivia::{HeaderTrivia, is_blank_or_comment, leading_trivia};
use crate::document::TextDocument;
use crate::error::{ParseError, ParseResult};
use crate::oracle::OracleSymbol;
use crate::symbol::{AccessModifier, ParsedSymbol, SymbolFlags, SymbolType, TextSpan};
use crate::types::{LineEnding, Position, Range};
use tracing::{debug, warn};

pub struct SymbolResolver<'a> {
    doc: &'a TextDocument,
    scanner: Scanner<'a>,
    /// Joins the lines of XML doc comments
    eol: &'static str,
}

/// Where a symbol sits among its siblings.
#[derive(Debug, Clone, Copy)]
struct Placement {
    header_start: Position,
    /// Start of the next sibling or the parent's closing brace
    limit: Option<Position>,
    is_last: bool,
}

/// Clause and parameter data gathered after the boundaries are known.
#[derive(Default)]
struct Signature {
    implements: Vec<String>,
    constraints: Vec<String>,
    parameters: Vec<Parameter>,
    open_of_body: Option<Position>,
    /// Record positional list; children declared inside it are synthesized
    positional: Option<Range>,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(doc: &'a TextDocument) -> Self {
        Self {
            doc,
            scanner: Scanner::new(doc),
            eol: doc.eol(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.eol = line_ending.as_str();
        self
    }

    /// Resolve a file's top-level symbols.
    ///
    /// Returns where the first top-level header starts (everything before it
    /// is the file preamble) and the resolved symbols.
    pub fn resolve_top_level(&self, symbols: &[OracleSymbol]) -> ParseResult<(Position, Vec<ParsedSymbol>)> {
        let Some(first) = symbols.iter().map(|symbol| symbol.range.start).min() else {
            return Ok((self.doc.end_position(), Vec::new()));
        };
        let header_start = self.first_header_start(first);
        let members = self.resolve_siblings(symbols, None, 0, header_start)?;
        Ok((header_start, members))
    }

    /// Start of the first top-level header: the line after the nearest
    /// preceding `;`, `{` or `}`, or the document start.
    pub fn first_header_start(&self, first: Position) -> Position {
        let search = TokenSearch::backward(&[";", "{", "}"]).anywhere();
        let Some(found) = self.scanner.find_token(first, &search) else {
            return Position::new(0, 0);
        };

        let after = found.end();
        let line_end = Position::new(after.line, self.doc.line_len(after.line));
        if self.doc.text_in(Range::new(after, line_end)).trim().is_empty() {
            self.doc.line_end_including_break(after.line).min(first)
        } else {
            after
        }
    }

    /// Resolve one sibling list. `header_start` is where the first sibling's
    /// header begins.
    pub fn resolve_siblings<'s>(
        &self,
        symbols: impl IntoIterator<Item = &'s OracleSymbol>,
        parent: Option<&ParentContext>,
        depth: usize,
        header_start: Position,
    ) -> ParseResult<Vec<ParsedSymbol>> {
        let mut ordered: Vec<&OracleSymbol> = symbols.into_iter().collect();
        ordered.sort_by_key(|symbol| symbol.range.start);

        let mut events: Vec<&str> = Vec::new();
        let mut classified = Vec::with_capacity(ordered.len());
        for symbol in ordered {
            let prefix = self.declaration_prefix(symbol);
            match classify(symbol, parent, &prefix, &events)? {
                Classification::Skip => {
                    debug!("skipping event accessor '{}'", symbol.name);
                }
                Classification::Symbol(symbol_type) => {
                    if symbol_type == SymbolType::Event {
                        events.push(symbol.name.as_str());
                    }
                    classified.push((symbol, symbol_type));
                }
            }
        }

        // primary constructors own no text, so they never take the closing footer
        let last = classified
            .iter()
            .rposition(|(_, symbol_type)| *symbol_type != SymbolType::PrimaryConstructor)
            .unwrap_or(usize::MAX);
        // where each sibling's text must stop at the latest
        let limits: Vec<Option<Position>> = (0..classified.len())
            .map(|index| match classified.get(index + 1) {
                Some((next, _)) => Some(next.range.start),
                None => parent.map(|parent| self.parent_close(parent)),
            })
            .collect();

        let mut header_start = header_start;
        let mut members = Vec::with_capacity(classified.len());
        for (index, (symbol, symbol_type)) in classified.into_iter().enumerate() {
            let place = Placement {
                header_start,
                limit: limits[index],
                is_last: index == last,
            };
            let parsed = self.resolve_symbol(symbol, symbol_type, parent, depth, place)?;
            if let Some(end) = parsed.end_position() {
                header_start = end;
            }
            members.push(parsed);
        }
        Ok(members)
    }

    fn resolve_symbol(
        &self,
        symbol: &OracleSymbol,
        symbol_type: SymbolType,
        parent: Option<&ParentContext>,
        depth: usize,
        place: Placement,
    ) -> ParseResult<ParsedSymbol> {
        debug!("resolving {symbol_type} '{}' at depth {depth}", symbol.name);

        let name = naming::symbol_name(symbol, symbol_type, parent);
        let type_name = naming::type_name(symbol, symbol_type, parent);
        let namespace = naming::namespace(parent);
        let default_access = AccessModifier::default_for(symbol_type, parent.map(|p| p.symbol_type));

        if symbol_type == SymbolType::PrimaryConstructor {
            let parameters = self.primary_constructor_parameters(symbol, &name, parent)?;
            return Ok(ParsedSymbol {
                symbol_type,
                name,
                type_name,
                namespace,
                access_modifier: default_access,
                keywords: Vec::new(),
                inheritance_modifiers: Vec::new(),
                attributes: Vec::new(),
                xml_comment: None,
                header: None,
                body: TextSpan::detached(symbol.detail.clone()),
                footer: None,
                return_type: None,
                implements: Vec::new(),
                constraints: Vec::new(),
                parameters,
                accessors: None,
                members: Vec::new(),
                flags: SymbolFlags::for_type(symbol_type),
                depth,
                selection_range: symbol.selection_range,
                open_of_body: None,
            });
        }

        let Boundaries { header, body } = self.boundaries(symbol, symbol_type, place.header_start, place.limit);
        let body_range = body.range.unwrap_or(symbol.range);

        let trivia = header
            .as_ref()
            .map(|header| HeaderTrivia::scan(&header.text))
            .unwrap_or_default();

        let name_at = self.chars_between(body_range.start, symbol.selection_range.start);
        let prefix: String = body.text.chars().take(name_at).collect();
        let declaration = declaration::analyze(symbol_type, &prefix, &body.text);

        let accessors = symbol_type.has_accessors().then(|| {
            let after = self.chars_between(body_range.start, symbol.selection_range.end);
            let after_name: String = body.text.chars().skip(after).collect();
            declaration::accessors(symbol_type, &after_name)
        });

        let footer = self.footer(body_range.end, parent, place.is_last);
        let signature = self.signature(symbol, symbol_type, &name, body_range)?;

        let mut parsed = ParsedSymbol {
            symbol_type,
            name,
            type_name,
            namespace,
            access_modifier: declaration.access_modifier.unwrap_or(default_access),
            keywords: declaration.keywords,
            inheritance_modifiers: declaration.inheritance_modifiers,
            attributes: trivia.attributes.clone(),
            xml_comment: trivia.xml_comment(self.eol),
            header,
            body,
            footer,
            return_type: declaration.return_type,
            implements: signature.implements,
            constraints: signature.constraints,
            parameters: signature.parameters,
            accessors,
            members: Vec::new(),
            flags: SymbolFlags::for_type(symbol_type) | declaration.flags,
            depth,
            selection_range: symbol.selection_range,
            open_of_body: signature.open_of_body,
        };

        if symbol_type.is_container() {
            let Some(open) = parsed.open_of_body else {
                return Err(ParseError::MissingToken {
                    expected: "{".to_string(),
                    symbol: parsed.name,
                    position: symbol.selection_range.end,
                });
            };
            let closes_with_brace = self.doc.char_at(self.doc.shift(symbol.range.end, -1)) == Some('}');
            let context = ParentContext::from_symbol(&parsed, symbol.range, closes_with_brace);
            let children = symbol.children.iter().filter(|child| {
                !signature
                    .positional
                    .is_some_and(|list| list.contains(child.selection_range.start))
            });
            parsed.members = self.resolve_siblings(children, Some(&context), depth + 1, open)?;
        }

        debug!("resolved {} '{}'", parsed.symbol_type, parsed.name);
        Ok(parsed)
    }

    /// Header and body before any clause analysis. Leading trivia of the
    /// oracle range belongs to the header.
    fn boundaries(
        &self,
        symbol: &OracleSymbol,
        symbol_type: SymbolType,
        header_start: Position,
        limit: Option<Position>,
    ) -> Boundaries {
        let range = symbol.range;
        let header_start = if header_start > range.start {
            warn!(
                "'{}' starts at {} before the previous sibling ends at {header_start}",
                symbol.name, range.start
            );
            range.start
        } else {
            header_start
        };

        let raw = self.doc.text_in(range);
        let (_, trivia_end) = leading_trivia(&raw);
        let trivia_chars = raw[..trivia_end]
            .chars()
            .count()
            .min(self.chars_between(range.start, symbol.selection_range.start));
        let body_start = self.doc.shift(range.start, trivia_chars as isize);

        let header_range = Range::new(header_start, body_start);
        let body_range = Range::new(body_start, range.end);
        let boundaries = Boundaries {
            header: self.span(header_range),
            body: TextSpan::new(self.doc.text_in(body_range), body_range),
        };

        if symbol_type == SymbolType::Event {
            repair_event(self.doc, boundaries, limit)
        } else {
            boundaries
        }
    }

    /// Trailing text owned by a symbol.
    ///
    /// The last member of a parent takes everything up to the parent's closing
    /// brace. Any other symbol takes the rest of its line, but only when that
    /// is blank or a comment.
    fn footer(&self, body_end: Position, parent: Option<&ParentContext>, is_last: bool) -> Option<TextSpan> {
        if let (true, Some(parent)) = (is_last, parent) {
            return self.span(Range::new(body_end, self.parent_close(parent)));
        }

        let line_end = self.doc.line_end_including_break(body_end.line);
        self.span(Range::new(body_end, line_end))
            .filter(|span| is_blank_or_comment(&span.text))
    }

    /// Position of the parent's closing brace, or its end when it has none.
    fn parent_close(&self, parent: &ParentContext) -> Position {
        if parent.closes_with_brace {
            self.doc.shift(parent.range.end, -1)
        } else {
            parent.range.end
        }
    }

    fn signature(
        &self,
        symbol: &OracleSymbol,
        symbol_type: SymbolType,
        name: &str,
        body_range: Range,
    ) -> ParseResult<Signature> {
        let mut signature = Signature::default();
        let selection = symbol.selection_range;
        let end = body_range.end;

        match symbol_type {
            t if t.is_object() || t == SymbolType::Enum => {
                let found = clauses::extract(&self.scanner, selection.end, end, false);
                signature.implements = found.implements;
                if t != SymbolType::Enum {
                    signature.constraints = found.constraints;
                }
                signature.open_of_body = found.open_of_body;

                if t.is_record() {
                    if let Some(list) = clauses::record_parameters(&self.scanner, selection.end, end) {
                        signature.parameters = parse_parameter_list(&self.doc.text_in(list))?;
                        signature.positional = Some(list);
                    }
                }
            }
            SymbolType::Namespace => {
                let search = TokenSearch::forward(&["{", ";"]).until(end);
                signature.open_of_body = self
                    .scanner
                    .find_token(selection.end, &search)
                    .map(|found| found.end());
            }
            _ => {}
        }

        if symbol_type.can_have_parameters() {
            let (list, expected) = match symbol_type {
                SymbolType::Indexer => (
                    clauses::bracketed_list(&self.scanner, selection.start, end, "[", "]"),
                    "[",
                ),
                SymbolType::Operator => (
                    clauses::bracketed_list_plain(&self.scanner, selection.start, end, '(', ")"),
                    "(",
                ),
                _ => (
                    clauses::bracketed_list(&self.scanner, selection.end, end, "(", ")"),
                    "(",
                ),
            };
            let list = list.ok_or_else(|| ParseError::MissingToken {
                expected: expected.to_string(),
                symbol: name.to_string(),
                position: selection.end,
            })?;
            signature.parameters = parse_parameter_list(&self.doc.text_in(list))?;
        }

        if symbol_type == SymbolType::Method {
            let found = clauses::extract(&self.scanner, selection.end, end, true);
            signature.constraints = found.constraints;
            signature.open_of_body = found.open_of_body;
        }

        Ok(signature)
    }

    /// A primary constructor's parameters live in its type's declaration.
    fn primary_constructor_parameters(
        &self,
        symbol: &OracleSymbol,
        name: &str,
        parent: Option<&ParentContext>,
    ) -> ParseResult<Vec<Parameter>> {
        let start = symbol.selection_range.end;
        let end = parent
            .and_then(|parent| parent.open_of_body)
            .unwrap_or_else(|| self.doc.end_position());

        let list = clauses::bracketed_list(&self.scanner, start, end, "(", ")").ok_or_else(|| {
            ParseError::MissingToken {
                expected: "(".to_string(),
                symbol: name.to_string(),
                position: start,
            }
        })?;
        parse_parameter_list(&self.doc.text_in(list))
    }

    /// Declaration text before the name with leading trivia removed.
    fn declaration_prefix(&self, symbol: &OracleSymbol) -> String {
        let text = self
            .doc
            .text_in(Range::new(symbol.range.start, symbol.selection_range.start));
        let (_, end) = leading_trivia(&text);
        text[end..].to_string()
    }

    fn span(&self, range: Range) -> Option<TextSpan> {
        if range.is_empty() {
            return None;
        }
        let text = self.doc.text_in(range);
        (!text.is_empty()).then(|| TextSpan::new(text, range))
    }

    fn chars_between(&self, start: Position, end: Position) -> usize {
        self.doc.offset_at(end).saturating_sub(self.doc.offset_at(start))
    }
}
