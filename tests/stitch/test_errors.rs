//! Failure modes: unsupported input, broken declarations and divergent text.

use crate::common::{Fixture, class_with};
use cstitch::config::ParsingConfig;
use cstitch::{AnalysisError, OracleKind, ParseError, ParsedFile, Settings, analyze_file, verify_round_trip};
use std::path::Path;
use tempfile::TempDir;

const SOURCE: &str = "class A\n{\n    int _x;\n}\n";

const SYMBOLS: &str = r#"[
  {
    "name": "A",
    "detail": "A",
    "kind": 5,
    "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 3, "character": 1 } },
    "selectionRange": { "start": { "line": 0, "character": 6 }, "end": { "line": 0, "character": 7 } },
    "children": [
      {
        "name": "_x",
        "kind": 8,
        "range": { "start": { "line": 2, "character": 4 }, "end": { "line": 2, "character": 11 } },
        "selectionRange": { "start": { "line": 2, "character": 8 }, "end": { "line": 2, "character": 10 } }
      }
    ]
  }
]"#;

fn write_pair(dir: &TempDir, source: &str, symbols: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let source_path = dir.path().join("A.cs");
    let symbols_path = dir.path().join("A.symbols.json");
    std::fs::write(&source_path, source).unwrap();
    std::fs::write(&symbols_path, symbols).unwrap();
    (source_path, symbols_path)
}

#[test]
fn test_analyze_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let (source_path, symbols_path) = write_pair(&dir, SOURCE, SYMBOLS);

    let (doc, file) = analyze_file(&source_path, &symbols_path, &Settings::default()).unwrap();
    assert_eq!(doc.as_str(), SOURCE);
    assert_eq!(file.symbols().len(), 2);
    assert_eq!(file.find("_x").unwrap().return_type.as_deref(), Some("int"));
    verify_round_trip(&source_path, SOURCE, &file).unwrap();
}

#[test]
fn test_unsupported_symbol_kind() {
    let (f, class) = class_with("A", "    int x = 1;\n", |f| {
        vec![f.member(OracleKind::Variable, "x", "int x = 1;")]
    });
    let result = ParsedFile::parse(&f.doc, vec![class], &ParsingConfig::default());
    assert!(matches!(
        result,
        Err(ParseError::UnsupportedSymbolKind { kind: OracleKind::Variable, ref name }) if name == "x"
    ));
}

#[test]
fn test_method_without_parameter_list() {
    let (f, class) = class_with("A", "    void Run => 1;\n", |f| {
        vec![f.member(OracleKind::Method, "Run", "void Run => 1;")]
    });
    let error = ParsedFile::parse(&f.doc, vec![class], &ParsingConfig::default()).unwrap_err();
    assert_eq!(error.status_code(), "MISSING_TOKEN");
    assert!(error.to_string().contains("'Run'"));
}

#[test]
fn test_invalid_symbol_json() {
    let dir = TempDir::new().unwrap();
    let (source_path, symbols_path) = write_pair(&dir, SOURCE, r#"[{ "name": "A", "kind": 99 }]"#);

    let error = analyze_file(&source_path, &symbols_path, &Settings::default()).unwrap_err();
    assert_eq!(error.status_code(), "INVALID_SYMBOL_JSON");
    assert!(matches!(
        error,
        AnalysisError::Parse {
            source: ParseError::InvalidSymbolJson(_),
            ..
        }
    ));
    assert!(!error.recovery_suggestions().is_empty());
}

#[test]
fn test_missing_source_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("Missing.cs");
    let symbols_path = dir.path().join("Missing.symbols.json");
    std::fs::write(&symbols_path, "[]").unwrap();

    let error = analyze_file(&missing, &symbols_path, &Settings::default()).unwrap_err();
    assert!(matches!(error, AnalysisError::FileRead { ref path, .. } if path == &missing));
    assert_eq!(error.status_code(), "FILE_READ_ERROR");
}

#[test]
fn test_round_trip_mismatch_reports_line() {
    let f = Fixture::new(SOURCE);
    let class = f
        .symbol(OracleKind::Class, "A", "A", f.span("class A", "}"), "A")
        .with_children(vec![f.member(OracleKind::Field, "_x", "int _x;")]);
    let file = f.parse(vec![class]);

    let edited = "class A\n{\n    int _y;\n}\n";
    let error = verify_round_trip(Path::new("A.cs"), edited, &file).unwrap_err();
    assert!(matches!(error, AnalysisError::RoundTripMismatch { line: 3, .. }));
    assert_eq!(error.status_code(), "ROUND_TRIP_MISMATCH");
}
