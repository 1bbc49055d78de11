//! Coarse symbol tree supplied by a language server.
//!
//! The shape mirrors the LSP `DocumentSymbol` response so the output of
//! `textDocument/documentSymbol` can be fed in unchanged. Only `range` and
//! `selectionRange` are trusted; the resolver recomputes every finer boundary
//! from the source text.

use crate::error::{ParseError, ParseResult};
use crate::types::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// LSP `SymbolKind`, numbered as in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OracleKind {
    File = 1,
    Module = 2,
    Namespace = 3,
    Package = 4,
    Class = 5,
    Method = 6,
    Property = 7,
    Field = 8,
    Constructor = 9,
    Enum = 10,
    Interface = 11,
    Function = 12,
    Variable = 13,
    Constant = 14,
    String = 15,
    Number = 16,
    Boolean = 17,
    Array = 18,
    Object = 19,
    Key = 20,
    Null = 21,
    EnumMember = 22,
    Struct = 23,
    Event = 24,
    Operator = 25,
    TypeParameter = 26,
}

impl TryFrom<u8> for OracleKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use OracleKind::*;
        const KINDS: [OracleKind; 26] = [
            File, Module, Namespace, Package, Class, Method, Property, Field, Constructor,
            Enum, Interface, Function, Variable, Constant, String, Number, Boolean, Array,
            Object, Key, Null, EnumMember, Struct, Event, Operator, TypeParameter,
        ];
        value
            .checked_sub(1)
            .and_then(|index| KINDS.get(index as usize).copied())
            .ok_or_else(|| format!("unknown symbol kind {value}"))
    }
}

impl From<OracleKind> for u8 {
    fn from(kind: OracleKind) -> Self {
        kind as u8
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as u8)
    }
}

/// One node of the oracle's symbol tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleSymbol {
    pub name: String,
    #[serde(default)]
    pub detail: String,
    pub kind: OracleKind,
    pub range: Range,
    pub selection_range: Range,
    #[serde(default)]
    pub children: Vec<OracleSymbol>,
}

impl OracleSymbol {
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        kind: OracleKind,
        range: Range,
        selection_range: Range,
    ) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OracleSymbol>) -> Self {
        self.children = children;
        self
    }

    /// Parse a `DocumentSymbol[]` JSON array.
    pub fn from_json(json: &str) -> ParseResult<Vec<OracleSymbol>> {
        serde_json::from_str(json).map_err(ParseError::InvalidSymbolJson)
    }
}

/// Stable sort by range start.
pub fn order_by_range(symbols: &mut [OracleSymbol]) {
    symbols.sort_by_key(|symbol| symbol.range.start);
}

/// Move method-kind symbols that sit physically inside a sibling's range under
/// that sibling, recursively.
///
/// Some servers report delegate declarations as siblings of the type that
/// contains them; classification needs them under their real parent.
pub fn relocate_nested_methods(symbols: Vec<OracleSymbol>) -> Vec<OracleSymbol> {
    let (methods, mut parents): (Vec<_>, Vec<_>) = symbols
        .into_iter()
        .partition(|symbol| symbol.kind == OracleKind::Method);

    if parents.is_empty() {
        return methods;
    }

    for method in methods {
        match parents
            .iter_mut()
            .find(|parent| parent.range.contains_range(&method.range))
        {
            Some(parent) => {
                tracing::debug!(
                    "moving method '{}' under '{}'",
                    method.name,
                    parent.name
                );
                parent.children.push(method);
            }
            None => parents.push(method),
        }
    }

    for parent in &mut parents {
        let children = std::mem::take(&mut parent.children);
        parent.children = relocate_nested_methods(children);
        order_by_range(&mut parent.children);
    }

    order_by_range(&mut parents);
    parents
}
