//! Indented outline of a resolved file.

use super::theme::Theme;
use crate::file::ParsedFile;
use crate::symbol::ParsedSymbol;
use std::fmt::Write;

/// One line per symbol, indented by depth:
/// `class Widget : IDisposable [public] 3:1`.
pub fn render_outline(file: &ParsedFile, theme: &Theme) -> String {
    let mut out = String::new();
    for using in &file.usings {
        let _ = writeln!(out, "{}", theme.apply(&theme.dim, using.directive.trim()));
    }
    for symbol in file.symbols() {
        let _ = writeln!(out, "{}", outline_line(symbol, theme));
    }
    out
}

fn outline_line(symbol: &ParsedSymbol, theme: &Theme) -> String {
    let mut line = "  ".repeat(symbol.depth);
    line.push_str(&theme.apply(theme.kind_style(symbol.symbol_type), symbol.symbol_type));
    line.push(' ');
    line.push_str(&theme.apply(&theme.signature, signature(symbol)));

    let _ = write!(line, " [{}", symbol.access_modifier.as_str());
    for keyword in symbol.keywords.iter().filter(|k| symbol.access_modifier.as_str() != k.as_str()) {
        let _ = write!(line, " {keyword}");
    }
    line.push(']');

    let location = symbol.selection_range.start.to_string();
    let _ = write!(line, " {}", theme.apply(&theme.dim, location));
    line
}

/// Name plus the parts of the declaration worth showing at a glance.
pub fn signature(symbol: &ParsedSymbol) -> String {
    let mut text = String::new();
    if let Some(return_type) = &symbol.return_type {
        let _ = write!(text, "{return_type} ");
    }
    text.push_str(&symbol.name);

    if symbol.symbol_type.can_have_parameters() || !symbol.parameters.is_empty() {
        let parameters: Vec<String> = symbol
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect();
        let _ = write!(text, "({})", parameters.join(", "));
    }
    if !symbol.implements.is_empty() {
        let _ = write!(text, " : {}", symbol.implements.join(", "));
    }
    if let Some(accessors) = &symbol.accessors {
        let names: Vec<&str> = [
            accessors.get.as_ref().map(|_| "get"),
            accessors.set.as_ref().map(|_| "set"),
            accessors.init.as_ref().map(|_| "init"),
        ]
        .into_iter()
        .flatten()
        .collect();
        let _ = write!(text, " {{ {} }}", names.join("; "));
    }
    text
}
