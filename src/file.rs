//! Whole-file resolution: using directives, preamble, top-level symbols and
//! trailer.

use crate::config::{ParsingConfig, Settings};
use crate::document::TextDocument;
use crate::error::{AnalysisError, AnalysisResult, ParseResult};
use crate::oracle::{OracleSymbol, order_by_range, relocate_nested_methods};
use crate::parsing::SymbolResolver;
use crate::parsing::patterns::USING_DIRECTIVE;
use crate::symbol::{ParsedSymbol, TextSpan};
use crate::types::{LineEnding, Position, Range};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One `using` line of the preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsingDirective {
    /// The directive as written, indentation included
    pub directive: String,
    pub namespace: String,
    pub alias: Option<String>,
    pub is_global: bool,
    pub is_static: bool,
}

impl UsingDirective {
    /// All directives in `text`.
    pub fn parse_all(text: &str) -> Vec<UsingDirective> {
        USING_DIRECTIVE
            .captures_iter(text)
            .map(|captures| UsingDirective {
                directive: captures["directive"].to_string(),
                namespace: captures["namespace"].split_whitespace().collect(),
                alias: captures.name("alias").map(|alias| alias.as_str().to_string()),
                is_global: captures.name("global").is_some(),
                is_static: captures.name("static").is_some(),
            })
            .collect()
    }
}

/// A resolved source file.
///
/// `preamble`, then each top-level member's header, body and footer, then
/// `trailer` reproduce the source text exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub usings: Vec<UsingDirective>,
    pub preamble: TextSpan,
    pub members: Vec<ParsedSymbol>,
    pub trailer: Option<TextSpan>,
    pub line_ending: LineEnding,
}

impl ParsedFile {
    pub fn parse(doc: &TextDocument, symbols: Vec<OracleSymbol>, config: &ParsingConfig) -> ParseResult<Self> {
        let mut symbols = if config.relocate_nested_methods {
            relocate_nested_methods(symbols)
        } else {
            symbols
        };
        order_by_range(&mut symbols);

        let line_ending = config.line_ending.resolve(doc.line_ending());
        let resolver = SymbolResolver::new(doc).with_line_ending(line_ending);
        let (header_start, members) = resolver.resolve_top_level(&symbols)?;

        let preamble_range = Range::new(Position::new(0, 0), header_start);
        let preamble = TextSpan::new(doc.text_in(preamble_range), preamble_range);
        let usings = UsingDirective::parse_all(&preamble.text);

        let end = members
            .last()
            .and_then(ParsedSymbol::end_position)
            .unwrap_or(header_start);
        let trailer_range = Range::new(end, doc.end_position());
        let trailer = (!trailer_range.is_empty())
            .then(|| TextSpan::new(doc.text_in(trailer_range), trailer_range))
            .filter(|span| !span.text.is_empty());

        debug!(
            "resolved {} top-level symbols and {} using directives",
            members.len(),
            usings.len()
        );

        Ok(Self {
            usings,
            preamble,
            members,
            trailer,
            line_ending,
        })
    }

    /// Every symbol in the file, depth first.
    pub fn symbols(&self) -> Vec<&ParsedSymbol> {
        self.members.iter().flat_map(ParsedSymbol::walk).collect()
    }

    pub fn find(&self, name: &str) -> Option<&ParsedSymbol> {
        self.members.iter().find_map(|member| member.find(name))
    }
}

/// Read a source file and its document symbol JSON from disk and resolve
/// them.
pub fn analyze_file(
    path: impl AsRef<Path>,
    symbols_path: impl AsRef<Path>,
    settings: &Settings,
) -> AnalysisResult<(TextDocument, ParsedFile)> {
    let path = path.as_ref();
    let symbols_path = symbols_path.as_ref();

    let source = read(path)?;
    let json = read(symbols_path)?;

    let parse_error = |source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let symbols = OracleSymbol::from_json(&json).map_err(parse_error)?;
    let doc = TextDocument::new(source);
    let line_ending = settings.parsing.line_ending.resolve(doc.line_ending());
    let doc = doc.with_line_ending(line_ending);
    let file = ParsedFile::parse(&doc, symbols, &settings.parsing).map_err(parse_error)?;

    info!("analyzed {} ({} symbols)", path.display(), file.symbols().len());
    Ok((doc, file))
}

fn read(path: &Path) -> AnalysisResult<String> {
    std::fs::read_to_string(path).map_err(|source| AnalysisError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
