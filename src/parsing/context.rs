//! Parent context handed down while resolving children.
//!
//! Children never touch the parent symbol itself; they read a copy of the few
//! boundaries and names they need for stitching and naming.

use crate::symbol::{ParsedSymbol, SymbolType};
use crate::types::{Position, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentContext {
    pub symbol_type: SymbolType,
    pub name: String,
    pub type_name: String,
    pub namespace: Option<String>,
    pub selection_start: Position,
    pub range: Range,
    /// Just past the `{` or `;` that opens the parent's body
    pub open_of_body: Option<Position>,
    /// Whether the parent's range ends with `}` (false for `namespace X;`)
    pub closes_with_brace: bool,
}

impl ParentContext {
    pub fn from_symbol(symbol: &ParsedSymbol, range: Range, closes_with_brace: bool) -> Self {
        Self {
            symbol_type: symbol.symbol_type,
            name: symbol.name.clone(),
            type_name: symbol.type_name.clone(),
            namespace: symbol.namespace.clone(),
            selection_start: symbol.selection_range.start,
            range,
            open_of_body: symbol.open_of_body,
            closes_with_brace,
        }
    }

    /// Namespace that children of this parent live in.
    pub fn child_namespace(&self) -> Option<String> {
        if self.symbol_type != SymbolType::Namespace {
            return self.namespace.clone();
        }
        match &self.namespace {
            Some(outer) => Some(format!("{outer}.{}", self.name)),
            None => Some(self.name.clone()),
        }
    }

    /// Declaring type name for non-type members of this parent.
    pub fn child_type_name(&self) -> Option<&str> {
        (self.symbol_type != SymbolType::Namespace).then_some(self.type_name.as_str())
    }
}
