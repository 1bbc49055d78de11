//! Regular expressions and keyword tables for C# declarations.

use regex::Regex;
use std::sync::LazyLock;

/// Declaration modifiers, two-word forms first so they win the alternation.
pub const MODIFIER_KEYWORDS: &str = r"private\s+protected|protected\s+private|protected\s+internal|internal\s+protected|abstract|async|extern|file|internal|new|override|partial|private|protected|public|readonly|required|sealed|static|unsafe|virtual|volatile";

const ACCESS_MODIFIERS: &str =
    r"private\s+protected|protected\s+private|protected\s+internal|internal\s+protected|public|internal|protected|private";

/// C# identifier: a letter, letter number or `_`, then letters, marks,
/// digits and connectors.
const IDENT: &str = r"[\p{L}\p{Nl}_][\p{L}\p{Mn}\p{Mc}\p{Nd}\p{Pc}\p{Cf}]*";

/// Keyword run at the start of a declaration.
pub static LEADING_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:(?:{MODIFIER_KEYWORDS})\s+)+")).expect("Invalid regex")
});

/// Keyword run ending exactly at the end of the text.
pub static TRAILING_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:\b(?:{MODIFIER_KEYWORDS})\s+)+$")).expect("Invalid regex")
});

/// A single modifier inside a matched run.
pub static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{MODIFIER_KEYWORDS})\b")).expect("Invalid regex")
});

pub static EVENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bevent\b").expect("Invalid regex"));

pub static DELEGATE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdelegate\b").expect("Invalid regex"));

pub static RECORD_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brecord\b").expect("Invalid regex"));

/// Identifier directly before `(`, i.e. a constructor name in a detail string.
pub static CALL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(~?@?{IDENT})\s*\(")).expect("Invalid regex"));

/// Whatever follows `operator` in a detail string.
pub static OPERATOR_DETAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\boperator\s*(?P<value>.+)$").expect("Invalid regex"));

/// Leading identifier, verbatim `@` allowed.
pub static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^@?{IDENT}")).expect("Invalid regex"));

pub static USING_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^(?P<directive>[ \t]*(?P<global>global\s+)?using\s+(?P<static>static\s+)?(?:(?P<alias>@?{IDENT})\s*=\s*)?(?P<namespace>@?{IDENT}(?:\s*(?:\.|::)\s*@?{IDENT})*(?:<[^;]*>)?)\s*;)"
    ))
    .expect("Invalid regex")
});

fn accessor_pattern(accessor: &str) -> Regex {
    Regex::new(&format!(
        r"[{{}};]\s*(?:(?P<access>{ACCESS_MODIFIERS})\s+)?{accessor}\s*(?:;|\{{|=>)"
    ))
    .expect("Invalid regex")
}

pub static GET_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| accessor_pattern("get"));
pub static SET_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| accessor_pattern("set"));
pub static INIT_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| accessor_pattern("init"));

/// Modifier keywords found in a leading run, with inner whitespace collapsed.
pub fn split_keywords(run: &str) -> Vec<String> {
    KEYWORD
        .find_iter(run)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}
