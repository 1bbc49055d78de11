//! Error types for declaration resolution
//!
//! This module provides structured error types using thiserror so every
//! failure carries enough context to point at the offending declaration.

use crate::oracle::OracleKind;
use crate::types::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a single document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported symbol kind {kind} for '{name}'")]
    UnsupportedSymbolKind { kind: OracleKind, name: String },

    /// Parameter text had no type token
    #[error("Missing parameter type in '{text}'")]
    MissingParameterType { text: String },

    #[error("Missing parameter name in '{text}'")]
    MissingParameterName { text: String },

    /// A structural token the declaration requires was not found
    #[error("Expected '{expected}' for '{symbol}' after {position}")]
    MissingToken {
        expected: String,
        symbol: String,
        position: Position,
    },

    #[error("Invalid document symbol JSON: {0}")]
    InvalidSymbolJson(#[source] serde_json::Error),
}

impl ParseError {
    pub fn status_code(&self) -> String {
        match self {
            Self::UnsupportedSymbolKind { .. } => "UNSUPPORTED_SYMBOL_KIND",
            Self::MissingParameterType { .. } => "MISSING_PARAMETER_TYPE",
            Self::MissingParameterName { .. } => "MISSING_PARAMETER_NAME",
            Self::MissingToken { .. } => "MISSING_TOKEN",
            Self::InvalidSymbolJson(_) => "INVALID_SYMBOL_JSON",
        }
        .to_string()
    }
}

/// Main error type for file-level operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// File system errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to resolve '{path}': {source}")]
    Parse { path: PathBuf, source: ParseError },

    /// Reassembled text differs from the source
    #[error("Reassembled text of '{path}' diverges from the source at line {line}")]
    RoundTripMismatch { path: PathBuf, line: u32 },

    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// General errors for cases where we need to preserve existing behavior
    #[error("{0}")]
    General(String),
}

impl AnalysisError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Parse { source, .. } => return source.status_code(),
            Self::RoundTripMismatch { .. } => "ROUND_TRIP_MISMATCH",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is not locked by another process",
            ],
            Self::Parse {
                source: ParseError::InvalidSymbolJson(_),
                ..
            } => vec![
                "Pass the raw result of a textDocument/documentSymbol request",
                "Flat SymbolInformation[] responses are not supported",
            ],
            Self::Parse { .. } => vec![
                "Check that the symbol JSON was produced for this exact file version",
                "Run with --debug to see which declaration failed",
            ],
            Self::RoundTripMismatch { .. } => vec![
                "Symbol ranges may be stale; regenerate them from the current source",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'cstitch init --force' to write a fresh settings file",
            ],
            _ => vec![],
        }
    }
}

/// Result type alias for document resolution
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for file-level operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T, AnalysisError>;

    /// Add context with a path
    fn with_path(self, path: &std::path::Path) -> Result<T, AnalysisError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> Result<T, AnalysisError> {
        self.map_err(|e| AnalysisError::General(format!("{msg}: {e}")))
    }

    fn with_path(self, path: &std::path::Path) -> Result<T, AnalysisError> {
        self.map_err(|e| {
            AnalysisError::General(format!("Error processing '{}': {}", path.display(), e))
        })
    }
}
