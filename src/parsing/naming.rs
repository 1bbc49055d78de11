//! Names derived from the oracle's name and detail strings.

use super::context::ParentContext;
use super::patterns::{CALL_NAME, OPERATOR_DETAIL};
use crate::oracle::OracleSymbol;
use crate::symbol::SymbolType;

/// Declared name of the symbol.
///
/// Constructors and finalizers are reported under runtime names (`.ctor`,
/// `Finalize`); their source name is read from the detail. Operators are
/// named by their token (`+`, `==`) or conversion target.
pub fn symbol_name(symbol: &OracleSymbol, symbol_type: SymbolType, parent: Option<&ParentContext>) -> String {
    match symbol_type {
        SymbolType::Constructor
        | SymbolType::PrimaryConstructor
        | SymbolType::StaticConstructor
        | SymbolType::Finalizer => {
            if let Some(captures) = CALL_NAME.captures(&symbol.detail) {
                return captures[1].to_string();
            }
            match (symbol_type, parent) {
                (SymbolType::Finalizer, Some(parent)) => format!("~{}", parent.type_name),
                (_, Some(parent)) => parent.type_name.clone(),
                _ => symbol.name.clone(),
            }
        }
        SymbolType::Operator => operator_target(&symbol.detail).unwrap_or_else(|| symbol.name.clone()),
        _ => symbol.name.clone(),
    }
}

/// Text following `operator` up to its parameter list: `+`, `==`, `Foo`.
pub fn operator_target(text: &str) -> Option<String> {
    let captures = OPERATOR_DETAIL.captures(text)?;
    let value = captures.name("value")?.as_str();
    let end = value
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(value.len());
    let target = value[..end].trim();
    (!target.is_empty()).then(|| target.to_string())
}

/// Simple name of the declaring type.
pub fn type_name(symbol: &OracleSymbol, symbol_type: SymbolType, parent: Option<&ParentContext>) -> String {
    if symbol_type.is_type() {
        return strip_type_arguments(&symbol.name).to_string();
    }
    if let Some(name) = parent.and_then(ParentContext::child_type_name) {
        return name.to_string();
    }

    // Members without a type parent: the detail's containing segment
    let signature = symbol.detail.split('(').next().unwrap_or("");
    let segments: Vec<&str> = signature.split('.').collect();
    match segments.len() {
        0 | 1 => String::new(),
        n => strip_type_arguments(segments[n - 2]).trim().to_string(),
    }
}

pub fn namespace(parent: Option<&ParentContext>) -> Option<String> {
    parent.and_then(ParentContext::child_namespace)
}

fn strip_type_arguments(name: &str) -> &str {
    name.split('<').next().unwrap_or(name)
}
