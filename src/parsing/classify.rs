//! Oracle symbol → declaration type.

use super::context::ParentContext;
use super::patterns::{DELEGATE_WORD, RECORD_WORD};
use crate::error::{ParseError, ParseResult};
use crate::oracle::{OracleKind, OracleSymbol};
use crate::symbol::SymbolType;

const CONSTRUCTOR_NAME: &str = ".ctor";
const STATIC_CONSTRUCTOR_NAME: &str = ".cctor";
const FINALIZER_NAME: &str = "Finalize";
const FINALIZER_SIGIL: &str = "~";
const INDEXER_SUFFIX: &str = "this[]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Symbol(SymbolType),
    /// Event accessor reported on its own; the event already covers it
    Skip,
}

/// Classify `symbol`.
///
/// `prefix` is the declaration text between the symbol's range start and its
/// name, leading trivia removed. `events` holds the names of events already
/// seen among the symbol's earlier siblings.
pub fn classify(
    symbol: &OracleSymbol,
    parent: Option<&ParentContext>,
    prefix: &str,
    events: &[&str],
) -> ParseResult<Classification> {
    let symbol_type = match symbol.kind {
        OracleKind::Namespace => SymbolType::Namespace,
        OracleKind::Interface => SymbolType::Interface,
        OracleKind::Enum => SymbolType::Enum,
        OracleKind::Event => SymbolType::Event,
        OracleKind::Constant => SymbolType::Constant,
        OracleKind::Field => SymbolType::Field,
        OracleKind::Operator => SymbolType::Operator,
        OracleKind::Class if RECORD_WORD.is_match(prefix) => SymbolType::RecordClass,
        OracleKind::Class => SymbolType::Class,
        OracleKind::Struct if RECORD_WORD.is_match(prefix) => SymbolType::RecordStruct,
        OracleKind::Struct => SymbolType::Struct,
        OracleKind::Property if symbol.name.ends_with(INDEXER_SUFFIX) => SymbolType::Indexer,
        OracleKind::Property => SymbolType::Property,
        OracleKind::Method | OracleKind::Constructor => {
            if is_event_accessor(symbol, events) {
                return Ok(Classification::Skip);
            }
            classify_method(symbol, parent, prefix)
        }
        kind => {
            return Err(ParseError::UnsupportedSymbolKind {
                kind,
                name: symbol.name.clone(),
            });
        }
    };
    Ok(Classification::Symbol(symbol_type))
}

fn classify_method(symbol: &OracleSymbol, parent: Option<&ParentContext>, prefix: &str) -> SymbolType {
    match symbol.name.as_str() {
        CONSTRUCTOR_NAME
            if parent.is_some_and(|p| p.selection_start == symbol.selection_range.start) =>
        {
            SymbolType::PrimaryConstructor
        }
        CONSTRUCTOR_NAME => SymbolType::Constructor,
        STATIC_CONSTRUCTOR_NAME => SymbolType::StaticConstructor,
        FINALIZER_NAME if symbol.detail.trim_start().starts_with(FINALIZER_SIGIL) => {
            SymbolType::Finalizer
        }
        _ if DELEGATE_WORD.is_match(prefix) => SymbolType::Delegate,
        _ if symbol.kind == OracleKind::Constructor => SymbolType::Constructor,
        _ => SymbolType::Method,
    }
}

/// `add_X` / `remove_X` reported for an event `X` seen earlier.
fn is_event_accessor(symbol: &OracleSymbol, events: &[&str]) -> bool {
    let detail = symbol.detail.trim_end();
    let event = if let Some(event) = symbol.name.strip_prefix("add_") {
        detail.ends_with(".add").then_some(event)
    } else if let Some(event) = symbol.name.strip_prefix("remove_") {
        detail.ends_with(".remove").then_some(event)
    } else {
        None
    };
    event.is_some_and(|event| events.contains(&event))
}
