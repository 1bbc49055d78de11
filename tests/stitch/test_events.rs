//! Event declarations: boundary repair and accessor skipping.

use crate::common::class_with;
use cstitch::reassemble::reassemble;
use cstitch::{OracleKind, Range, SymbolType};

#[test]
fn test_field_event_moves_keywords_into_body() {
    let body = "    /// <summary>Raised on change.</summary>\n    public event EventHandler Changed;\n";
    let (f, class) = class_with("Model", body, |f| {
        let declarator = f.range("Changed;");
        let declarator = Range::new(declarator.start, f.doc.shift(declarator.end, -1));
        vec![f.symbol(OracleKind::Event, "Changed", "Model.Changed", declarator, "Changed")]
    });
    let file = f.parse(vec![class]);
    let changed = &file.members[0].members[0];

    assert_eq!(changed.body.text, "public event EventHandler Changed;");
    assert_eq!(changed.header_text(), "\n    /// <summary>Raised on change.</summary>\n    ");
    assert_eq!(changed.xml_comment.as_deref(), Some("<summary>Raised on change.</summary>"));
    assert_eq!(changed.keywords, vec!["public"]);
    assert_eq!(changed.return_type.as_deref(), Some("EventHandler"));
    assert_eq!(reassemble(&file), f.source);
}

#[test]
fn test_static_event_keeps_all_keywords() {
    let body = "    private static event Action Ready;\n";
    let (f, class) = class_with("Hub", body, |f| {
        let declarator = f.range("Ready;");
        let declarator = Range::new(declarator.start, f.doc.shift(declarator.end, -1));
        vec![f.symbol(OracleKind::Event, "Ready", "Hub.Ready", declarator, "Ready")]
    });
    let file = f.parse(vec![class]);
    let ready = &file.members[0].members[0];

    assert_eq!(ready.body.text, "private static event Action Ready;");
    assert_eq!(ready.keywords, vec!["private", "static"]);
    assert!(ready.is_static());
}

#[test]
fn test_event_accessors_are_not_separate_symbols() {
    let body = "    public event EventHandler Clicked\n    {\n        add { _handlers += value; }\n        remove { _handlers -= value; }\n    }\n";
    let (f, class) = class_with("Button", body, |f| {
        vec![
            f.symbol(
                OracleKind::Event,
                "Clicked",
                "Button.Clicked",
                f.span("public event EventHandler Clicked", "    }"),
                "Clicked",
            ),
            f.symbol(
                OracleKind::Method,
                "add_Clicked",
                "Button.Clicked.add",
                f.range("add { _handlers += value; }"),
                "add",
            ),
            f.symbol(
                OracleKind::Method,
                "remove_Clicked",
                "Button.Clicked.remove",
                f.range("remove { _handlers -= value; }"),
                "remove",
            ),
        ]
    });
    let file = f.parse(vec![class]);
    let button = &file.members[0];

    assert_eq!(button.members.len(), 1);
    let clicked = &button.members[0];
    assert_eq!(clicked.symbol_type, SymbolType::Event);
    assert!(clicked.body.text.starts_with("public event EventHandler Clicked"));
    assert!(clicked.body.text.ends_with("    }"));
    assert_eq!(clicked.footer_text(), "\n");
    assert_eq!(reassemble(&file), f.source);
}

#[test]
fn test_accessor_named_methods_without_event_are_kept() {
    let body = "    void add_Item() { }\n";
    let (f, class) = class_with("List", body, |f| {
        vec![f.symbol(
            OracleKind::Method,
            "add_Item",
            "List.add_Item()",
            f.range("void add_Item() { }"),
            "add_Item",
        )]
    });
    let file = f.parse(vec![class]);
    assert_eq!(file.members[0].members[0].symbol_type, SymbolType::Method);
}

#[test]
fn test_event_word_in_doc_comment_stays_in_header() {
    let body = "    /// <summary>Raised when the event fires.</summary>\n    public event EventHandler Fired { add { } remove { } }\n";
    let (f, class) = class_with("Timer", body, |f| {
        vec![f.symbol(
            OracleKind::Event,
            "Fired",
            "Timer.Fired",
            f.range("public event EventHandler Fired { add { } remove { } }"),
            "Fired",
        )]
    });
    let file = f.parse(vec![class]);
    let fired = &file.members[0].members[0];

    assert_eq!(fired.body.text, "public event EventHandler Fired { add { } remove { } }");
    assert_eq!(
        fired.header_text(),
        "\n    /// <summary>Raised when the event fires.</summary>\n    "
    );
    assert_eq!(
        fired.xml_comment.as_deref(),
        Some("<summary>Raised when the event fires.</summary>")
    );
    assert_eq!(reassemble(&file), f.source);
}

#[test]
fn test_multiple_declarators_share_one_declaration() {
    let body = "    public event Action A, B;\n    int x;\n";
    let (f, class) = class_with("Bus", body, |f| {
        let start = f.range("A, B;").start;
        let a = Range::new(start, f.doc.shift(start, 1));
        let b = Range::new(f.doc.shift(start, 3), f.doc.shift(start, 4));
        vec![
            f.symbol(OracleKind::Event, "A", "Bus.A", a, "A"),
            f.symbol(OracleKind::Event, "B", "Bus.B", b, "B"),
            f.member(OracleKind::Field, "x", "int x;"),
        ]
    });
    let file = f.parse(vec![class]);
    let bus = &file.members[0];
    assert_eq!(bus.members.len(), 3);

    let a = &bus.members[0];
    assert_eq!(a.header_text(), "\n    ");
    assert_eq!(a.body.text, "public event Action A,");
    assert_eq!(a.footer_text(), "");
    assert_eq!(a.return_type.as_deref(), Some("Action"));

    let b = &bus.members[1];
    assert_eq!(b.header_text(), " ");
    assert_eq!(b.body.text, "B;");
    assert_eq!(b.footer_text(), "\n");

    assert_eq!(bus.members[2].body.text, "int x;");
    assert_eq!(reassemble(&file), f.source);
}
