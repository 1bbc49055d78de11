//! Structured XML documentation for C# declarations
//!
//! Input is the doc comment text with the `///` markers already removed, as
//! recorded in a symbol's `xml_comment`:
//!
//! ```text
//! <summary>
//! Calculates the sum of two numbers
//! </summary>
//! <param name="a">First number</param>
//! <returns>The sum</returns>
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NAMED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<(?P<tag>param|typeparam|exception)\s+(?P<attr>name|cref)\s*=\s*"(?P<value>[^"]*)"\s*>(?P<body>.*?)</(?P<close>param|typeparam|exception)>"#)
        .expect("Invalid regex")
});

static SEE_ALSO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<seealso\s+cref\s*=\s*"(?P<cref>[^"]*)""#).expect("Invalid regex")
});

/// Parsed XML documentation. Absent tags are `None` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct XmlDocumentation {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    pub value: Option<String>,
    pub params: Vec<XmlNamedEntry>,
    pub type_params: Vec<XmlNamedEntry>,
    /// `<exception cref="...">`, keyed by the exception type
    pub exceptions: Vec<XmlNamedEntry>,
    pub see_also: Vec<String>,
}

/// A tag keyed by its `name` or `cref` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNamedEntry {
    pub name: String,
    pub description: String,
}

impl XmlDocumentation {
    pub fn parse(xml: &str) -> Self {
        let mut doc = XmlDocumentation {
            summary: simple_tag(xml, "summary"),
            remarks: simple_tag(xml, "remarks"),
            returns: simple_tag(xml, "returns"),
            value: simple_tag(xml, "value"),
            ..Default::default()
        };

        for captures in NAMED_TAG.captures_iter(xml) {
            if captures["tag"] != captures["close"] {
                continue;
            }
            let entry = XmlNamedEntry {
                name: captures["value"].to_string(),
                description: collapse(&captures["body"]),
            };
            match &captures["tag"] {
                "param" => doc.params.push(entry),
                "typeparam" => doc.type_params.push(entry),
                _ => doc.exceptions.push(entry),
            }
        }

        doc.see_also = SEE_ALSO
            .captures_iter(xml)
            .map(|captures| captures["cref"].to_string())
            .collect();

        doc
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.remarks.is_none()
            && self.returns.is_none()
            && self.value.is_none()
            && self.params.is_empty()
            && self.type_params.is_empty()
            && self.exceptions.is_empty()
            && self.see_also.is_empty()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.description.as_str())
    }
}

fn simple_tag(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)?;
    let text = collapse(&xml[start..start + end]);
    (!text.is_empty()).then_some(text)
}

/// Trim each line and drop blank ones.
fn collapse(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
