//! Modifiers, signatures and clauses read from declaration text.

use crate::common::{Fixture, class_with};
use cstitch::reassemble::{reassemble, reassemble_body};
use cstitch::{AccessModifier, OracleKind, ParsedSymbol, SymbolFlags, SymbolType};

fn only_member(fixture: &Fixture, class: cstitch::OracleSymbol) -> ParsedSymbol {
    let mut file = fixture.parse(vec![class]);
    file.members.remove(0)
}

#[test]
fn test_explicit_and_default_access() {
    let body = "    int _count;\n    protected internal void Run() { }\n    private protected int Size => 1;\n";
    let (f, class) = class_with("Shop", body, |f| {
        vec![
            f.member(OracleKind::Field, "_count", "int _count;"),
            f.member(OracleKind::Method, "Run", "protected internal void Run() { }"),
            f.member(OracleKind::Property, "Size", "private protected int Size => 1;"),
        ]
    });
    let shop = only_member(&f, class);

    assert_eq!(shop.access_modifier, AccessModifier::Internal);
    assert_eq!(shop.members[0].access_modifier, AccessModifier::Private);
    assert!(shop.members[0].keywords.is_empty());
    assert_eq!(shop.members[1].access_modifier, AccessModifier::ProtectedInternal);
    assert_eq!(shop.members[1].keywords, vec!["protected internal"]);
    assert!(shop.members[1].parameters.is_empty());
    assert_eq!(shop.members[2].access_modifier, AccessModifier::PrivateProtected);
}

#[test]
fn test_interface_members_default_to_public() {
    let f = Fixture::new("interface IShape\n{\n    double Area();\n}\n");
    let area = f.member(OracleKind::Method, "Area", "double Area();");
    let shape = f
        .symbol(OracleKind::Interface, "IShape", "IShape", f.span("interface IShape", "}"), "IShape")
        .with_children(vec![area]);

    let file = f.parse(vec![shape]);
    let area = &file.members[0].members[0];
    assert_eq!(area.access_modifier, AccessModifier::Public);
    assert_eq!(area.return_type.as_deref(), Some("double"));
    assert_eq!(area.footer_text(), "\n");
}

#[test]
fn test_nested_type_defaults_to_private() {
    let (f, class) = class_with("Outer", "    class Inner\n    {\n    }\n", |f| {
        vec![f.symbol(
            OracleKind::Class,
            "Inner",
            "Outer.Inner",
            f.span("class Inner", "    }"),
            "Inner",
        )]
    });
    let outer = only_member(&f, class);
    let inner = &outer.members[0];
    assert_eq!(inner.access_modifier, AccessModifier::Private);
    assert_eq!(inner.depth, 1);
    assert!(inner.members.is_empty());
}

#[test]
fn test_conversion_and_binary_operators() {
    let body = "    public static implicit operator Money(decimal value) => new Money();\n    public static Money operator +(Money a, Money b) => a;\n";
    let (f, class) = class_with("Money", body, |f| {
        vec![
            f.symbol(
                OracleKind::Operator,
                "op_Implicit",
                "Money.implicit operator Money(decimal)",
                f.range("public static implicit operator Money(decimal value) => new Money();"),
                "operator",
            ),
            f.symbol(
                OracleKind::Operator,
                "op_Addition",
                "Money.operator +(Money, Money)",
                f.range("public static Money operator +(Money a, Money b) => a;"),
                "operator",
            ),
        ]
    });
    let money = only_member(&f, class);

    let implicit = &money.members[0];
    assert_eq!(implicit.symbol_type, SymbolType::Operator);
    assert!(implicit.is_implicit_operator());
    assert!(!implicit.is_explicit_operator());
    assert_eq!(implicit.return_type.as_deref(), Some("Money"));
    assert_eq!(implicit.keywords, vec!["public", "static"]);
    assert_eq!(implicit.parameters.len(), 1);
    assert_eq!(implicit.parameters[0].type_name, "decimal");

    let plus = &money.members[1];
    assert_eq!(plus.name, "+");
    assert!(plus.flags.is_empty());
    assert_eq!(plus.return_type.as_deref(), Some("Money"));
    assert_eq!(plus.parameters.len(), 2);
    assert!(plus.is_static());
}

#[test]
fn test_parameter_list_with_defaults_and_modes() {
    let body = "    public void Call(int x, string y = \"a,b\", [Attr] ref int z) { }\n";
    let (f, class) = class_with("Api", body, |f| {
        vec![f.member(
            OracleKind::Method,
            "Call",
            "public void Call(int x, string y = \"a,b\", [Attr] ref int z) { }",
        )]
    });
    let api = only_member(&f, class);
    let parameters = &api.members[0].parameters;

    assert_eq!(parameters.len(), 3);
    assert_eq!(parameters[1].default_value.as_deref(), Some("\"a,b\""));
    assert!(parameters[2].is_ref());
    assert_eq!(parameters[2].attributes, vec!["[Attr]"]);
}

#[test]
fn test_generic_method_constraints() {
    let body = "    public T Make<T>(int size) where T : new() => default;\n";
    let (f, class) = class_with("Factory", body, |f| {
        vec![f.member(
            OracleKind::Method,
            "Make",
            "public T Make<T>(int size) where T : new() => default;",
        )]
    });
    let factory = only_member(&f, class);
    let make = &factory.members[0];

    assert_eq!(make.return_type.as_deref(), Some("T"));
    assert_eq!(make.parameters[0].name, "size");
    assert_eq!(make.constraints, vec!["T : new()"]);
    assert!(make.implements.is_empty());
}

#[test]
fn test_record_with_primary_constructor() {
    let source = "public record Point(int X, int Y)\n{\n    public double Length => 0;\n}\n";
    let f = Fixture::new(source);
    let record_range = f.span("public record Point", "}");
    let record = f
        .symbol(OracleKind::Class, "Point", "Point", record_range, "Point")
        .with_children(vec![
            f.symbol(OracleKind::Constructor, ".ctor", "Point.Point(int, int)", record_range, "Point"),
            f.symbol(OracleKind::Property, "X", "Point.X", f.range("int X"), "X"),
            f.symbol(OracleKind::Property, "Y", "Point.Y", f.range("int Y"), "Y"),
            f.member(OracleKind::Property, "Length", "public double Length => 0;"),
        ]);

    let file = f.parse(vec![record]);
    assert_eq!(reassemble(&file), source);

    let point = &file.members[0];
    assert_eq!(point.symbol_type, SymbolType::RecordClass);
    assert!(point.is_record_class());
    assert_eq!(point.access_modifier, AccessModifier::Public);
    let names: Vec<&str> = point.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Y"]);

    // positional properties live in the parameter list, not the body
    let types: Vec<SymbolType> = point.members.iter().map(|m| m.symbol_type).collect();
    assert_eq!(types, vec![SymbolType::PrimaryConstructor, SymbolType::Property]);

    let ctor = &point.members[0];
    assert!(ctor.flags.contains(SymbolFlags::PRIMARY_CONSTRUCTOR));
    assert_eq!(ctor.name, "Point");
    assert_eq!(ctor.parameters.len(), 2);
    assert!(ctor.header.is_none());
    assert!(ctor.body.range.is_none());

    let length = &point.members[1];
    assert_eq!(length.header_text(), "\n    ");
    assert_eq!(length.footer_text(), "\n");
    assert_eq!(reassemble_body(&f.doc, point), point.body.text);
}

#[test]
fn test_record_struct() {
    let f = Fixture::new("readonly record struct Range(int Start, int End);\n");
    let symbol = f.symbol(
        OracleKind::Struct,
        "Range",
        "Range",
        f.range("readonly record struct Range(int Start, int End);"),
        "Range",
    );
    let file = f.parse(vec![symbol]);
    let range = &file.members[0];

    assert_eq!(range.symbol_type, SymbolType::RecordStruct);
    assert_eq!(range.keywords, vec!["readonly"]);
    assert_eq!(range.parameters.len(), 2);
    assert!(range.members.is_empty());
}

#[test]
fn test_delegate_reported_beside_its_type() {
    let f = Fixture::new("class Bus\n{\n    public delegate void Handler(object sender);\n}\n");
    let bus = f.symbol(OracleKind::Class, "Bus", "Bus", f.span("class Bus", "}"), "Bus");
    let handler = f.member(OracleKind::Method, "Handler", "public delegate void Handler(object sender);");

    let file = f.parse(vec![handler, bus]);
    assert_eq!(file.members.len(), 1);

    let handler = &file.members[0].members[0];
    assert_eq!(handler.symbol_type, SymbolType::Delegate);
    assert_eq!(handler.return_type.as_deref(), Some("void"));
    assert_eq!(handler.parameters[0].type_name, "object");
    assert_eq!(handler.access_modifier, AccessModifier::Public);
}

#[test]
fn test_static_constructor_and_finalizer() {
    let (f, class) = class_with("Cache", "    static Cache() { }\n    ~Cache() { }\n", |f| {
        vec![
            f.symbol(OracleKind::Constructor, ".cctor", "Cache.Cache()", f.range("static Cache() { }"), "Cache"),
            f.symbol(OracleKind::Method, "Finalize", "~Cache()", f.range("~Cache() { }"), "Cache"),
        ]
    });
    let cache = only_member(&f, class);

    let cctor = &cache.members[0];
    assert_eq!(cctor.symbol_type, SymbolType::StaticConstructor);
    assert!(cctor.is_static_constructor());
    assert_eq!(cctor.name, "Cache");
    assert!(cctor.is_static());

    let finalizer = &cache.members[1];
    assert_eq!(finalizer.symbol_type, SymbolType::Finalizer);
    assert_eq!(finalizer.name, "~Cache");
    assert_eq!(finalizer.body.text, "~Cache() { }");
}
