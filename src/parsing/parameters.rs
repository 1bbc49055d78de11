//! Parameter list parsing.
//!
//! Input is the raw text of a parameter list as it appears in source,
//! brackets included: `(int x, string y = "a,b", [Attr] ref int z)` or, for
//! indexers, `[int index]`.

use super::patterns::IDENTIFIER;
use super::scanner::{matching_close, split_top_level};
use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterMode {
    #[default]
    None,
    In,
    Out,
    Ref,
    Params,
}

impl ParameterMode {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "in" => Some(ParameterMode::In),
            "out" => Some(ParameterMode::Out),
            "ref" => Some(ParameterMode::Ref),
            "params" => Some(ParameterMode::Params),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub raw_text: String,
    /// Attribute blocks as written, brackets included
    pub attributes: Vec<String>,
    pub mode: ParameterMode,
    /// `this`, `scoped` and the `readonly` of `ref readonly`
    pub modifiers: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn is_in(&self) -> bool {
        self.mode == ParameterMode::In
    }

    pub fn is_out(&self) -> bool {
        self.mode == ParameterMode::Out
    }

    pub fn is_ref(&self) -> bool {
        self.mode == ParameterMode::Ref
    }

    pub fn is_params(&self) -> bool {
        self.mode == ParameterMode::Params
    }

    /// The receiver of an extension method.
    pub fn is_extension_target(&self) -> bool {
        self.modifiers.iter().any(|modifier| modifier == "this")
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

/// Parse a bracketed parameter list into parameters.
pub fn parse_parameter_list(text: &str) -> ParseResult<Vec<Parameter>> {
    split_parameters(text).iter().map(|part| parse_parameter(part)).collect()
}

/// Split a parameter list on its top-level commas. Surrounding `(...)` or
/// `[...]` is removed first.
pub fn split_parameters(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let inner = match matching_close(trimmed) {
        Some(end) if end == trimmed.len() - 1 && matches!(trimmed.chars().next(), Some('(' | '[')) => {
            &trimmed[1..end]
        }
        _ => trimmed,
    };
    split_top_level(inner, ',')
}

/// Parse one parameter: `[attributes] [modifiers] type name [= default]`.
pub fn parse_parameter(text: &str) -> ParseResult<Parameter> {
    let raw_text = text.trim().to_string();
    let mut rest = raw_text.as_str();

    let mut attributes = Vec::new();
    while rest.starts_with('[') {
        let Some(end) = matching_close(rest) else {
            return Err(ParseError::MissingParameterType { text: raw_text });
        };
        attributes.push(rest[..=end].to_string());
        rest = rest[end + 1..].trim_start();
    }

    let mut mode = ParameterMode::None;
    let mut modifiers = Vec::new();
    loop {
        let word = rest.split_whitespace().next().unwrap_or("");
        if word.len() == rest.len() {
            // the last word is never a modifier
            break;
        }
        if let Some(keyword) = ParameterMode::from_keyword(word).filter(|_| mode == ParameterMode::None) {
            mode = keyword;
        } else if matches!(word, "this" | "scoped")
            || (word == "readonly" && mode == ParameterMode::Ref)
        {
            modifiers.push(word.to_string());
        } else {
            break;
        }
        rest = rest[word.len()..].trim_start();
    }

    let type_end = type_end(rest);
    let type_name = rest[..type_end].trim();
    if type_name.is_empty() {
        return Err(ParseError::MissingParameterType { text: raw_text });
    }
    let after_type = rest[type_end..].trim_start();

    let Some(name) = IDENTIFIER.find(after_type) else {
        return Err(ParseError::MissingParameterName { text: raw_text });
    };
    let after_name = after_type[name.end()..].trim();
    // only a default value may follow the name
    if !after_name.is_empty() && !after_name.starts_with('=') {
        return Err(ParseError::MissingParameterName { text: raw_text });
    }
    let default_value = after_name
        .strip_prefix('=')
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(Parameter {
        type_name: type_name.to_string(),
        name: name.as_str().to_string(),
        attributes,
        mode,
        modifiers,
        default_value,
        raw_text,
    })
}

/// Byte offset of the first whitespace outside `< [ (` nesting.
fn type_end(text: &str) -> usize {
    let mut depth = 0i32;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => return index,
            _ => {}
        }
    }
    text.len()
}
