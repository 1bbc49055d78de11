//! Fully attributed declaration model produced by the resolver.

use crate::parsing::attributes::AttributeInfo;
use crate::parsing::parameters::Parameter;
use crate::parsing::xml_doc::XmlDocumentation;
use crate::types::{Position, Range};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration kind of a resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolType {
    Namespace,
    Class,
    Interface,
    Struct,
    RecordClass,
    RecordStruct,
    Delegate,
    Enum,
    Event,
    Constant,
    Property,
    Indexer,
    Field,
    PrimaryConstructor,
    Constructor,
    StaticConstructor,
    Finalizer,
    Method,
    Operator,
}

impl SymbolType {
    /// Types whose oracle children are resolved as members.
    pub fn is_container(&self) -> bool {
        self.is_object() || *self == SymbolType::Namespace
    }

    /// Class-like types that carry implements and constraints clauses.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            SymbolType::Class
                | SymbolType::Interface
                | SymbolType::Struct
                | SymbolType::RecordClass
                | SymbolType::RecordStruct
        )
    }

    pub fn is_record(&self) -> bool {
        matches!(self, SymbolType::RecordClass | SymbolType::RecordStruct)
    }

    /// Type declarations, as opposed to members.
    pub fn is_type(&self) -> bool {
        self.is_object() || matches!(self, SymbolType::Enum | SymbolType::Delegate)
    }

    pub fn can_have_parameters(&self) -> bool {
        matches!(
            self,
            SymbolType::Constructor
                | SymbolType::PrimaryConstructor
                | SymbolType::Method
                | SymbolType::Operator
                | SymbolType::Delegate
                | SymbolType::Indexer
        )
    }

    pub fn is_constructor_like(&self) -> bool {
        matches!(
            self,
            SymbolType::Constructor
                | SymbolType::PrimaryConstructor
                | SymbolType::StaticConstructor
                | SymbolType::Finalizer
        )
    }

    /// Members whose declaration spells out a return or value type.
    pub fn has_return_type(&self) -> bool {
        matches!(
            self,
            SymbolType::Delegate
                | SymbolType::Event
                | SymbolType::Constant
                | SymbolType::Property
                | SymbolType::Indexer
                | SymbolType::Field
                | SymbolType::Method
                | SymbolType::Operator
        )
    }

    pub fn has_accessors(&self) -> bool {
        matches!(self, SymbolType::Property | SymbolType::Indexer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolType::Namespace => "namespace",
            SymbolType::Class => "class",
            SymbolType::Interface => "interface",
            SymbolType::Struct => "struct",
            SymbolType::RecordClass => "record",
            SymbolType::RecordStruct => "record struct",
            SymbolType::Delegate => "delegate",
            SymbolType::Enum => "enum",
            SymbolType::Event => "event",
            SymbolType::Constant => "constant",
            SymbolType::Property => "property",
            SymbolType::Indexer => "indexer",
            SymbolType::Field => "field",
            SymbolType::PrimaryConstructor => "primary constructor",
            SymbolType::Constructor => "constructor",
            SymbolType::StaticConstructor => "static constructor",
            SymbolType::Finalizer => "finalizer",
            SymbolType::Method => "method",
            SymbolType::Operator => "operator",
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared accessibility, in the order C# lists the modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessModifier {
    File,
    Internal,
    PrivateProtected,
    Private,
    ProtectedInternal,
    Protected,
    Public,
}

impl AccessModifier {
    pub const ALL: [AccessModifier; 7] = [
        AccessModifier::File,
        AccessModifier::Internal,
        AccessModifier::PrivateProtected,
        AccessModifier::Private,
        AccessModifier::ProtectedInternal,
        AccessModifier::Protected,
        AccessModifier::Public,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModifier::File => "file",
            AccessModifier::Internal => "internal",
            AccessModifier::PrivateProtected => "private protected",
            AccessModifier::Private => "private",
            AccessModifier::ProtectedInternal => "protected internal",
            AccessModifier::Protected => "protected",
            AccessModifier::Public => "public",
        }
    }

    /// Parse a keyword as written; inner whitespace of two-word forms is
    /// normalized first.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let normalized = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "internal protected" => Some(AccessModifier::ProtectedInternal),
            "protected private" => Some(AccessModifier::PrivateProtected),
            _ => Self::ALL
                .into_iter()
                .find(|modifier| modifier.as_str() == normalized),
        }
    }

    /// Accessibility of a declaration that names none.
    pub fn default_for(symbol_type: SymbolType, parent: Option<SymbolType>) -> Self {
        match (symbol_type, parent) {
            (SymbolType::Namespace, _) => AccessModifier::Public,
            (SymbolType::PrimaryConstructor, _) => AccessModifier::Public,
            (_, Some(SymbolType::Interface)) => AccessModifier::Public,
            (_, None) | (_, Some(SymbolType::Namespace)) => AccessModifier::Internal,
            _ => AccessModifier::Private,
        }
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InheritanceModifier {
    Virtual,
    Abstract,
    Sealed,
    Override,
}

impl InheritanceModifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "virtual" => Some(InheritanceModifier::Virtual),
            "abstract" => Some(InheritanceModifier::Abstract),
            "sealed" => Some(InheritanceModifier::Sealed),
            "override" => Some(InheritanceModifier::Override),
            _ => None,
        }
    }
}

/// Property/indexer accessors.
///
/// `None` means the accessor does not exist, `Some("")` that it exists with
/// no explicit modifier, otherwise the modifier as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessors {
    pub get: Option<String>,
    pub set: Option<String>,
    pub init: Option<String>,
}

/// A piece of source text and where it came from.
///
/// `range` is `None` only for text that is not a contiguous slice of the
/// document (a primary constructor's body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub range: Option<Range>,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, range: Range) -> Self {
        Self {
            text: text.into(),
            range: Some(range),
        }
    }

    pub fn detached(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            range: None,
        }
    }

    pub fn start(&self) -> Option<Position> {
        self.range.map(|range| range.start)
    }

    pub fn end(&self) -> Option<Position> {
        self.range.map(|range| range.end)
    }
}

bitflags! {
    /// Declaration traits that only some symbol types carry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SymbolFlags: u8 {
        const PRIMARY_CONSTRUCTOR = 0b0000_0001;
        const STATIC_CONSTRUCTOR  = 0b0000_0010;
        const RECORD_CLASS        = 0b0000_0100;
        const RECORD_STRUCT       = 0b0000_1000;
        const IMPLICIT_OPERATOR   = 0b0001_0000;
        const EXPLICIT_OPERATOR   = 0b0010_0000;
    }
}

impl SymbolFlags {
    pub fn for_type(symbol_type: SymbolType) -> Self {
        match symbol_type {
            SymbolType::PrimaryConstructor => SymbolFlags::PRIMARY_CONSTRUCTOR,
            SymbolType::StaticConstructor => SymbolFlags::STATIC_CONSTRUCTOR,
            SymbolType::RecordClass => SymbolFlags::RECORD_CLASS,
            SymbolType::RecordStruct => SymbolFlags::RECORD_STRUCT,
            _ => SymbolFlags::empty(),
        }
    }
}

/// A resolved declaration: exact header/body/footer boundaries plus the
/// attributes parsed out of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSymbol {
    pub symbol_type: SymbolType,
    pub name: String,
    /// Simple name of the declaring type (the type itself for type declarations)
    pub type_name: String,
    pub namespace: Option<String>,
    pub access_modifier: AccessModifier,
    pub keywords: Vec<String>,
    pub inheritance_modifiers: Vec<InheritanceModifier>,
    pub attributes: Vec<String>,
    pub xml_comment: Option<String>,
    pub header: Option<TextSpan>,
    pub body: TextSpan,
    pub footer: Option<TextSpan>,
    pub return_type: Option<String>,
    pub implements: Vec<String>,
    pub constraints: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub accessors: Option<Accessors>,
    pub members: Vec<ParsedSymbol>,
    pub flags: SymbolFlags,
    pub depth: usize,
    /// Name token as reported by the oracle
    pub selection_range: Range,
    /// Position just past the `{` or `;` that opens the body, if found
    pub open_of_body: Option<Position>,
}

impl ParsedSymbol {
    pub fn is_public(&self) -> bool {
        self.access_modifier == AccessModifier::Public
    }

    pub fn is_static(&self) -> bool {
        self.keywords.iter().any(|keyword| keyword == "static")
    }

    pub fn is_primary_constructor(&self) -> bool {
        self.flags.contains(SymbolFlags::PRIMARY_CONSTRUCTOR)
    }

    pub fn is_static_constructor(&self) -> bool {
        self.flags.contains(SymbolFlags::STATIC_CONSTRUCTOR)
    }

    pub fn is_record_class(&self) -> bool {
        self.flags.contains(SymbolFlags::RECORD_CLASS)
    }

    pub fn is_record_struct(&self) -> bool {
        self.flags.contains(SymbolFlags::RECORD_STRUCT)
    }

    pub fn is_implicit_operator(&self) -> bool {
        self.flags.contains(SymbolFlags::IMPLICIT_OPERATOR)
    }

    pub fn is_explicit_operator(&self) -> bool {
        self.flags.contains(SymbolFlags::EXPLICIT_OPERATOR)
    }

    /// Where the next sibling's header starts: footer end, else body end.
    pub fn end_position(&self) -> Option<Position> {
        self.footer
            .as_ref()
            .and_then(TextSpan::end)
            .or_else(|| self.body.end())
    }

    pub fn header_text(&self) -> &str {
        self.header.as_ref().map_or("", |header| header.text.as_str())
    }

    pub fn footer_text(&self) -> &str {
        self.footer.as_ref().map_or("", |footer| footer.text.as_str())
    }

    pub fn attribute_infos(&self) -> Vec<AttributeInfo> {
        self.attributes
            .iter()
            .flat_map(|block| AttributeInfo::parse_block(block))
            .collect()
    }

    pub fn documentation(&self) -> Option<XmlDocumentation> {
        self.xml_comment
            .as_deref()
            .map(XmlDocumentation::parse)
            .filter(|doc| !doc.is_empty())
    }

    /// This symbol and all nested members, depth first.
    pub fn walk(&self) -> Vec<&ParsedSymbol> {
        let mut symbols = vec![self];
        for member in &self.members {
            symbols.extend(member.walk());
        }
        symbols
    }

    /// First symbol named `name` in this subtree.
    pub fn find(&self, name: &str) -> Option<&ParsedSymbol> {
        self.walk().into_iter().find(|symbol| symbol.name == name)
    }
}
