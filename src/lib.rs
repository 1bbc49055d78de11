//! cstitch resolves exact declaration boundaries in C# source.
//!
//! A language server reports a coarse tree of document symbols. This crate
//! refines each one into a [`ParsedSymbol`] with a verbatim header (comments,
//! attributes, whitespace), body and footer, plus the modifiers, return type,
//! parameters, accessors and clauses read from the declaration text.

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod file;
pub mod oracle;
pub mod parsing;
pub mod reassemble;
pub mod symbol;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use document::TextDocument;
pub use error::{AnalysisError, AnalysisResult, ErrorContext, ParseError, ParseResult};
pub use file::{ParsedFile, UsingDirective, analyze_file};
pub use oracle::{OracleKind, OracleSymbol};
pub use parsing::SymbolResolver;
pub use reassemble::{reassemble, verify_round_trip};
pub use symbol::{
    AccessModifier, Accessors, InheritanceModifier, ParsedSymbol, SymbolFlags, SymbolType, TextSpan,
};
pub use types::{LineEnding, Position, Range};
