//! C# attribute block parsing
//!
//! The resolver records attribute blocks verbatim (`[Obsolete("x", true)]`).
//! This module breaks a block into its individual attributes with their
//! target specifier and arguments.
//!
//! # Example
//!
//! ```csharp
//! [return: NotNull]
//! [Route("api/items"), Authorize(Roles = "Admin")]
//! public Item Get(int id) { ... }
//! ```

use super::scanner::{matching_close, split_top_level};
use serde::{Deserialize, Serialize};

/// One attribute inside a `[...]` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Attribute name as written (e.g., "Obsolete", "System.Serializable")
    pub name: String,

    /// Target specifier (`return`, `field`, `assembly`, ...), if any
    pub target: Option<String>,

    /// Positional arguments passed to the attribute
    /// Example: `[Obsolete("message", false)]` → ["\"message\"", "false"]
    pub arguments: Vec<String>,

    /// Named arguments (property = value)
    /// Example: `[Authorize(Roles = "Admin")]` → {("Roles", "\"Admin\"")}
    pub named_arguments: Vec<(String, String)>,
}

impl AttributeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    /// Parse every attribute in one bracketed block. Text that is not a
    /// block yields nothing.
    pub fn parse_block(block: &str) -> Vec<AttributeInfo> {
        let block = block.trim();
        let inner = match matching_close(block) {
            Some(end) if block.starts_with('[') && end == block.len() - 1 => &block[1..end],
            _ => return Vec::new(),
        };

        let (target, list) = split_target(inner);
        split_top_level(list, ',')
            .iter()
            .filter_map(|item| Self::parse_item(item))
            .map(|mut attribute| {
                attribute.target = target.clone();
                attribute
            })
            .collect()
    }

    fn parse_item(item: &str) -> Option<AttributeInfo> {
        let (name, arguments) = match item.find('(') {
            Some(open) => {
                let args = &item[open..];
                let close = matching_close(args)?;
                (item[..open].trim(), split_top_level(&args[1..close], ','))
            }
            None => (item.trim(), Vec::new()),
        };
        if name.is_empty() {
            return None;
        }

        let mut attribute = AttributeInfo::new(name);
        for argument in arguments {
            match named_argument(&argument) {
                Some((key, value)) => attribute.named_arguments.push((key, value)),
                None => attribute.arguments.push(argument),
            }
        }
        Some(attribute)
    }

    /// Name without namespace qualification or `Attribute` suffix.
    pub fn short_name(&self) -> &str {
        let simple = self.name.rsplit('.').next().unwrap_or(&self.name);
        match simple.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => simple,
        }
    }

    /// Check if this attribute has any arguments
    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty() || !self.named_arguments.is_empty()
    }

    /// Get a named argument value by name
    pub fn get_named_argument(&self, name: &str) -> Option<&str> {
        self.named_arguments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// `return: A, B` → (Some("return"), "A, B"). A colon inside arguments is not
/// a target.
fn split_target(inner: &str) -> (Option<String>, &str) {
    let head_end = inner.find(['(', '"']).unwrap_or(inner.len());
    match inner[..head_end].find(':') {
        Some(colon) if !inner[..head_end].contains("::") => {
            let target = inner[..colon].trim();
            let valid = !target.is_empty() && target.chars().all(|c| c.is_ascii_alphabetic());
            if valid {
                (Some(target.to_string()), inner[colon + 1..].trim())
            } else {
                (None, inner.trim())
            }
        }
        _ => (None, inner.trim()),
    }
}

/// `Name = value` (but not `a == b`).
fn named_argument(argument: &str) -> Option<(String, String)> {
    let eq = argument.find('=')?;
    let key = argument[..eq].trim();
    let value = argument[eq + 1..].trim();
    let is_identifier = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
        && !value.starts_with('=');
    is_identifier.then(|| (key.to_string(), value.to_string()))
}
