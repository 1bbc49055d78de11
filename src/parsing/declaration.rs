//! Modifier keywords, return type and accessors of a declaration.
//!
//! Works on body text that starts at the first keyword; leading comments and
//! attributes have already been moved to the header.

use super::naming::operator_target;
use super::patterns::{GET_ACCESSOR, INIT_ACCESSOR, LEADING_KEYWORDS, SET_ACCESSOR, split_keywords};
use super::scanner::{find_word_top_level, matching_close};
use crate::symbol::{AccessModifier, Accessors, InheritanceModifier, SymbolFlags, SymbolType};
use regex::Regex;
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub keywords: Vec<String>,
    /// Explicit access modifier, if one was written
    pub access_modifier: Option<AccessModifier>,
    pub inheritance_modifiers: Vec<InheritanceModifier>,
    pub return_type: Option<String>,
    pub flags: SymbolFlags,
}

/// Analyze the declaration text before the symbol's name.
///
/// `prefix` runs from the body start to the name token; `body` is the whole
/// body text, used for operators whose signature straddles the name.
pub fn analyze(symbol_type: SymbolType, prefix: &str, body: &str) -> Declaration {
    let prefix = blank_comments(prefix);
    let run_end = LEADING_KEYWORDS.find(&prefix).map_or(0, |m| m.end());
    let keywords = split_keywords(&prefix[..run_end]);

    let access_modifier = keywords
        .iter()
        .find_map(|keyword| AccessModifier::from_keyword(keyword));
    let inheritance_modifiers = keywords
        .iter()
        .filter_map(|keyword| InheritanceModifier::from_keyword(keyword))
        .collect();

    let mut declaration = Declaration {
        keywords,
        access_modifier,
        inheritance_modifiers,
        ..Default::default()
    };

    if !symbol_type.has_return_type() {
        return declaration;
    }

    if symbol_type == SymbolType::Operator {
        let body = blank_comments(body);
        let head_end = body.find('(').unwrap_or(body.len());
        let head = body.get(run_end..head_end).unwrap_or("");
        let (return_type, flags) = operator_signature(head);
        declaration.return_type = return_type;
        declaration.flags = flags;
        return declaration;
    }

    let rest = prefix[run_end..].trim();
    let rest = match symbol_type {
        SymbolType::Constant => strip_word(rest, "const"),
        SymbolType::Event => strip_word(rest, "event"),
        SymbolType::Delegate => strip_word(rest, "delegate"),
        _ => rest,
    };
    declaration.return_type = match &prefix {
        Cow::Borrowed(_) => (!rest.is_empty()).then(|| rest.to_string()),
        // blanked comments leave runs of spaces behind
        Cow::Owned(_) => (!rest.is_empty()).then(|| rest.split_whitespace().collect::<Vec<_>>().join(" ")),
    };
    declaration
}

/// `implicit operator Foo` → (Foo, IMPLICIT); `bool operator ==` → (bool, empty).
fn operator_signature(head: &str) -> (Option<String>, SymbolFlags) {
    let Some(operator) = find_word_top_level(head, "operator") else {
        let head = head.trim();
        return ((!head.is_empty()).then(|| head.to_string()), SymbolFlags::empty());
    };

    let before = head[..operator].trim();
    let conversion = match before.rsplit(char::is_whitespace).next() {
        Some("implicit") => SymbolFlags::IMPLICIT_OPERATOR,
        Some("explicit") => SymbolFlags::EXPLICIT_OPERATOR,
        _ => SymbolFlags::empty(),
    };

    if conversion.is_empty() {
        ((!before.is_empty()).then(|| before.to_string()), conversion)
    } else {
        (operator_target(&head[operator..]), conversion)
    }
}

/// `text` with every comment replaced by spaces of the same byte length, so
/// offsets into it are offsets into `text`.
fn blank_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("//") && !text.contains("/*") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut index = 0;
    while index < text.len() {
        let rest = &text[index..];
        let comment_len = if rest.starts_with("//") {
            rest.find('\n').unwrap_or(rest.len())
        } else if rest.starts_with("/*") {
            rest[2..].find("*/").map_or(rest.len(), |end| end + 4)
        } else {
            0
        };

        if comment_len > 0 {
            // keep line breaks so nothing else moves
            for c in rest[..comment_len].chars() {
                match c {
                    '\n' | '\r' => out.push(c),
                    _ => out.extend(std::iter::repeat_n(' ', c.len_utf8())),
                }
            }
            index += comment_len;
        } else if let Some(c) = rest.chars().next() {
            out.push(c);
            index += c.len_utf8();
        }
    }
    Cow::Owned(out)
}

fn strip_word<'a>(text: &'a str, word: &str) -> &'a str {
    match text.strip_prefix(word) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => text,
    }
}

/// Accessors of a property or indexer.
///
/// `after_name` is the body text following the name token; for indexers it
/// starts with the `[...]` parameter list, which is skipped.
pub fn accessors(symbol_type: SymbolType, after_name: &str) -> Accessors {
    let mut text = after_name.trim_start();
    if symbol_type == SymbolType::Indexer && text.starts_with('[') {
        if let Some(end) = matching_close(text) {
            text = text[end + 1..].trim_start();
        }
    }

    if text.starts_with("=>") {
        return Accessors {
            get: Some(String::new()),
            set: None,
            init: None,
        };
    }

    let find = |pattern: &Regex| {
        pattern.captures(text).map(|captures| {
            captures
                .name("access")
                .map(|access| access.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_default()
        })
    };

    Accessors {
        get: find(&GET_ACCESSOR),
        set: find(&SET_ACCESSOR),
        init: find(&INIT_ACCESSOR),
    }
}
