//! Whole-file resolution against a realistic source file.

use crate::common::Fixture;
use cstitch::reassemble::{reassemble, reassemble_body, render_symbol};
use cstitch::{
    AccessModifier, InheritanceModifier, LineEnding, OracleKind, OracleSymbol, ParsedFile, Range,
    SymbolType,
};

const WIDGETS: &str = r#"using System;
using System.Collections.Generic;

namespace Demo.Widgets
{
    /// <summary>
    /// A widget.
    /// </summary>
    [Serializable]
    public sealed class Widget<T> : Base, IDisposable where T : class
    {
        private readonly List<T> _items = new(); // backing store

        public event EventHandler Changed;

        public Widget(int capacity)
        {
            _items = new List<T>(capacity);
        }

        public T this[int index] => _items[index];

        public int Count { get; private set; }

        protected virtual void OnChanged(EventArgs args) => Changed?.Invoke(this, args);

        public void Dispose() { }
    }

    internal enum Mode : byte
    {
        Off,
        On,
    }
}
"#;

/// Oracle symbols shaped like a language server's answer for `WIDGETS`.
fn widget_symbols(f: &Fixture) -> Vec<OracleSymbol> {
    // field-like events are reported by their declarator only
    let changed = f.range("Changed;");
    let changed = Range::new(changed.start, f.doc.shift(changed.end, -1));

    let members = vec![
        f.symbol(
            OracleKind::Field,
            "_items",
            "Demo.Widgets.Widget<T>._items",
            f.range("private readonly List<T> _items = new();"),
            "_items",
        ),
        f.symbol(OracleKind::Event, "Changed", "Demo.Widgets.Widget<T>.Changed", changed, "Changed"),
        f.symbol(
            OracleKind::Constructor,
            ".ctor",
            "Demo.Widgets.Widget<T>.Widget(int)",
            f.span("public Widget(int capacity)", "        }"),
            "Widget",
        ),
        f.symbol(
            OracleKind::Property,
            "this[]",
            "Demo.Widgets.Widget<T>.this[int]",
            f.range("public T this[int index] => _items[index];"),
            "this",
        ),
        f.symbol(
            OracleKind::Property,
            "Count",
            "Demo.Widgets.Widget<T>.Count",
            f.range("public int Count { get; private set; }"),
            "Count",
        ),
        f.symbol(
            OracleKind::Method,
            "OnChanged",
            "Demo.Widgets.Widget<T>.OnChanged(EventArgs)",
            f.range("protected virtual void OnChanged(EventArgs args) => Changed?.Invoke(this, args);"),
            "OnChanged",
        ),
        f.symbol(
            OracleKind::Method,
            "Dispose",
            "Demo.Widgets.Widget<T>.Dispose()",
            f.range("public void Dispose() { }"),
            "Dispose",
        ),
    ];

    let widget = f
        .symbol(
            OracleKind::Class,
            "Widget<T>",
            "Demo.Widgets.Widget<T>",
            f.span("[Serializable]", "public void Dispose() { }\n    }"),
            "Widget",
        )
        .with_children(members);
    let mode = f.symbol(
        OracleKind::Enum,
        "Mode",
        "Demo.Widgets.Mode",
        f.span("internal enum Mode", "On,\n    }"),
        "Mode",
    );

    vec![
        f.symbol(
            OracleKind::Namespace,
            "Demo.Widgets",
            "Demo.Widgets",
            f.span("namespace Demo.Widgets", "    }\n}"),
            "Demo.Widgets",
        )
        .with_children(vec![mode, widget]),
    ]
}

fn parse_widgets(line_ending: LineEnding) -> (Fixture, ParsedFile) {
    let fixture = Fixture::with_line_ending(WIDGETS, line_ending);
    let file = fixture.parse(widget_symbols(&fixture));
    (fixture, file)
}

#[test]
fn test_reassembly_reproduces_source() {
    for line_ending in [LineEnding::Lf, LineEnding::CrLf] {
        let (fixture, file) = parse_widgets(line_ending);
        assert_eq!(reassemble(&file), fixture.source, "{line_ending:?}");
        assert_eq!(file.line_ending, line_ending);
    }
}

#[test]
fn test_members_tile_container_bodies() {
    let (fixture, file) = parse_widgets(LineEnding::Lf);
    let namespace = &file.members[0];
    assert_eq!(reassemble_body(&fixture.doc, namespace), namespace.body.text);

    let widget = &namespace.members[0];
    assert_eq!(reassemble_body(&fixture.doc, widget), widget.body.text);
}

#[test]
fn test_reparse_of_reassembled_text_is_identical() {
    let (fixture, file) = parse_widgets(LineEnding::Lf);
    let again = Fixture::new(&reassemble(&file));
    let reparsed = again.parse(widget_symbols(&fixture));
    assert_eq!(reparsed, file);
}

#[test]
fn test_preamble_and_usings() {
    let (_, file) = parse_widgets(LineEnding::Lf);
    assert_eq!(file.preamble.text, "using System;\nusing System.Collections.Generic;\n");
    let namespaces: Vec<&str> = file.usings.iter().map(|u| u.namespace.as_str()).collect();
    assert_eq!(namespaces, vec!["System", "System.Collections.Generic"]);
    assert!(file.trailer.is_none());
}

#[test]
fn test_members_follow_source_order() {
    let (_, file) = parse_widgets(LineEnding::Lf);
    let namespace = &file.members[0];
    let names: Vec<&str> = namespace.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Widget<T>", "Mode"]);

    let widget = &namespace.members[0];
    let types: Vec<SymbolType> = widget.members.iter().map(|m| m.symbol_type).collect();
    assert_eq!(
        types,
        vec![
            SymbolType::Field,
            SymbolType::Event,
            SymbolType::Constructor,
            SymbolType::Indexer,
            SymbolType::Property,
            SymbolType::Method,
            SymbolType::Method,
        ]
    );
    assert!(widget.members.iter().all(|m| m.depth == 2));
}

#[test]
fn test_type_declaration_details() {
    let (_, file) = parse_widgets(LineEnding::Lf);
    let namespace = &file.members[0];
    assert_eq!(namespace.symbol_type, SymbolType::Namespace);
    assert_eq!(namespace.access_modifier, AccessModifier::Public);

    let widget = &namespace.members[0];
    assert_eq!(widget.type_name, "Widget");
    assert_eq!(widget.namespace.as_deref(), Some("Demo.Widgets"));
    assert_eq!(widget.access_modifier, AccessModifier::Public);
    assert_eq!(widget.inheritance_modifiers, vec![InheritanceModifier::Sealed]);
    assert_eq!(widget.implements, vec!["Base", "IDisposable"]);
    assert_eq!(widget.constraints, vec!["T : class"]);
    assert_eq!(widget.attributes, vec!["[Serializable]"]);
    assert_eq!(widget.xml_comment.as_deref(), Some("<summary>\nA widget.\n</summary>"));
    assert!(widget.body.text.starts_with("public sealed class Widget<T>"));
    assert!(widget.header_text().ends_with("[Serializable]\n    "));

    let docs = widget.documentation().unwrap();
    assert_eq!(docs.summary.as_deref(), Some("A widget."));

    let mode = &namespace.members[1];
    assert_eq!(mode.symbol_type, SymbolType::Enum);
    assert_eq!(mode.access_modifier, AccessModifier::Internal);
    assert_eq!(mode.implements, vec!["byte"]);
    assert_eq!(mode.footer_text(), "\n");
}

#[test]
fn test_member_details() {
    let (_, file) = parse_widgets(LineEnding::Lf);
    let widget = &file.members[0].members[0];

    let items = widget.find("_items").unwrap();
    assert_eq!(items.return_type.as_deref(), Some("List<T>"));
    assert_eq!(items.keywords, vec!["private", "readonly"]);
    assert_eq!(items.footer_text(), " // backing store\n");
    assert_eq!(items.type_name, "Widget");

    let changed = widget.find("Changed").unwrap();
    assert_eq!(changed.body.text, "public event EventHandler Changed;");
    assert_eq!(changed.header_text(), "\n        ");
    assert_eq!(changed.return_type.as_deref(), Some("EventHandler"));

    let ctor = widget.find("Widget").unwrap();
    assert_eq!(ctor.symbol_type, SymbolType::Constructor);
    assert_eq!(ctor.parameters.len(), 1);
    assert_eq!(ctor.parameters[0].type_name, "int");
    assert_eq!(ctor.parameters[0].name, "capacity");
    assert_eq!(ctor.return_type, None);

    let indexer = widget.find("this[]").unwrap();
    assert_eq!(indexer.return_type.as_deref(), Some("T"));
    assert_eq!(indexer.parameters[0].name, "index");
    let accessors = indexer.accessors.as_ref().unwrap();
    assert_eq!(accessors.get.as_deref(), Some(""));
    assert_eq!(accessors.set, None);

    let count = widget.find("Count").unwrap();
    let accessors = count.accessors.as_ref().unwrap();
    assert_eq!(accessors.get.as_deref(), Some(""));
    assert_eq!(accessors.set.as_deref(), Some("private"));

    let on_changed = widget.find("OnChanged").unwrap();
    assert_eq!(on_changed.access_modifier, AccessModifier::Protected);
    assert_eq!(on_changed.inheritance_modifiers, vec![InheritanceModifier::Virtual]);
    assert_eq!(on_changed.return_type.as_deref(), Some("void"));
    assert!(on_changed.constraints.is_empty());

    let dispose = widget.find("Dispose").unwrap();
    assert_eq!(dispose.footer_text(), "\n    ");
    assert_eq!(render_symbol(dispose), "\n        public void Dispose() { }\n    ");
}

fn top_level_classes(source: &str) -> (Fixture, ParsedFile) {
    let fixture = Fixture::new(source);
    let symbols = ["A", "B"]
        .into_iter()
        .map(|name| {
            let decl = format!("class {name} {{ }}");
            fixture.symbol(OracleKind::Class, name, name, fixture.range(&decl), name)
        })
        .collect();
    let file = fixture.parse(symbols);
    (fixture, file)
}

#[test]
fn test_leading_block_comment_belongs_to_first_type() {
    let source = "/* Licensed; see {LICENSE}\n   for details. */\nclass A { }\n\nclass B { }\n";
    let (fixture, file) = top_level_classes(source);

    assert_eq!(file.preamble.text, "");
    assert!(file.usings.is_empty());
    let (a, b) = (&file.members[0], &file.members[1]);
    assert_eq!(a.header_text(), "/* Licensed; see {LICENSE}\n   for details. */\n");
    assert_eq!(a.body.text, "class A { }");
    assert_eq!(a.footer_text(), "\n");
    assert_eq!(b.header_text(), "\n");
    assert_eq!(b.footer_text(), "\n");
    assert!(file.trailer.is_none());
    assert_eq!(reassemble(&file), fixture.source);
}

#[test]
fn test_terminator_inside_comment_after_usings() {
    let source = "using System;\n/* Licensed; see LICENSE */\nclass A { }\nclass B { }\n";
    let (fixture, file) = top_level_classes(source);

    assert_eq!(file.preamble.text, "using System;\n");
    assert_eq!(file.members[0].header_text(), "/* Licensed; see LICENSE */\n");
    assert_eq!(file.members[1].header_text(), "");
    assert_eq!(file.members[1].body.text, "class B { }");
    assert_eq!(reassemble(&file), fixture.source);
}
