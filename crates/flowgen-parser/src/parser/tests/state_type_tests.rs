//! Tests for type parsing.
use crate::parser::{NodeData, NodeIndex, ParserState};
use flowgen_scanner::SyntaxKind;

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.d.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

/// Type node of the first `type X = ...` alias in the file.
fn alias_type(parser: &ParserState, root: NodeIndex) -> NodeIndex {
    let arena = parser.get_arena();
    let first = arena.statements(root)[0];
    match arena.data(first) {
        Some(NodeData::TypeAliasDeclaration { type_node, .. }) => *type_node,
        other => panic!("expected type alias, got {other:?}"),
    }
}

#[test]
fn parse_complex_type_expressions_have_no_errors() {
    let (parser, _root) = parse_source(
        "type T = { [K in keyof O]: O[K] } & Partial<{ a: string; b: number }>;\ntype U<T> = T extends { a: infer V } ? V : never;",
    );
    assert_eq!(parser.get_diagnostics().len(), 0);
}

#[test]
fn parse_conditional_type_fields() {
    let (parser, root) =
        parse_source("type T<X> = X extends string ? { kind: 's' } : { kind: 'o' };");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::ConditionalType { extends_type, .. }) = arena.data(ty) else {
        panic!("expected conditional type");
    };
    assert!(matches!(
        arena.data(*extends_type),
        Some(NodeData::KeywordType {
            keyword: SyntaxKind::StringKeyword
        })
    ));
}

#[test]
fn parse_invalid_type_reports_diagnostics() {
    let (parser, _root) = parse_source("type T = ;");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn parse_template_literal_type_with_placeholder() {
    let (parser, root) = parse_source("type T = `a${string}b`;");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    assert!(matches!(
        parser.get_arena().data(ty),
        Some(NodeData::TemplateLiteralType { .. })
    ));
}

#[test]
fn parse_nested_generic_closers() {
    let (parser, root) = parse_source("type T = Array<Array<string>>;");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    assert!(matches!(
        parser.get_arena().data(ty),
        Some(NodeData::TypeReference {
            type_arguments: Some(_),
            ..
        })
    ));
}

#[test]
fn parse_function_type_versus_parenthesized_type() {
    let (parser, root) = parse_source("type F = (a: string, b?: number) => void;");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::FunctionType { parameters, .. }) = arena.data(ty) else {
        panic!("expected function type");
    };
    assert_eq!(parameters.len(), 2);

    let (parser, root) = parse_source("type P = (A | B)[];");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::ArrayType { element_type }) = arena.data(ty) else {
        panic!("expected array type");
    };
    assert!(matches!(
        arena.data(*element_type),
        Some(NodeData::ParenthesizedType { .. })
    ));
}

#[test]
fn parse_union_with_leading_bar() {
    let (parser, root) = parse_source("type U =\n  | 'a'\n  | 'b'\n  | 'c';");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let Some(NodeData::UnionType { types }) = parser.get_arena().data(ty) else {
        panic!("expected union");
    };
    assert_eq!(types.len(), 3);
}

#[test]
fn parse_tuple_members() {
    let (parser, root) = parse_source("type T = [a: string, b?: number, ...rest: boolean[]];");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::TupleType { elements }) = arena.data(ty) else {
        panic!("expected tuple");
    };
    assert_eq!(elements.len(), 3);
    assert!(matches!(
        arena.data(elements.last().unwrap_or(NodeIndex::NONE)),
        Some(NodeData::NamedTupleMember {
            dot_dot_dot: true,
            ..
        })
    ));

    let (parser, root) = parse_source("type T = [string, number?, ...boolean[]];");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::TupleType { elements }) = arena.data(ty) else {
        panic!("expected tuple");
    };
    let kinds: Vec<_> = elements.iter().map(|e| arena.kind_name(e)).collect();
    assert_eq!(kinds, vec!["KeywordType", "OptionalType", "RestType"]);
}

#[test]
fn parse_mapped_type_modifiers() {
    let (parser, root) = parse_source("type M<T> = { -readonly [K in keyof T]+?: T[K] };");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let Some(NodeData::MappedType {
        readonly_token,
        question_token,
        ..
    }) = parser.get_arena().data(ty)
    else {
        panic!("expected mapped type");
    };
    assert_eq!(*readonly_token, Some(SyntaxKind::MinusToken));
    assert_eq!(*question_token, Some(SyntaxKind::PlusToken));
}

#[test]
fn parse_import_and_typeof_types() {
    let (parser, root) = parse_source("type A = import('./m').Foo<string>;");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    assert!(matches!(
        parser.get_arena().data(ty),
        Some(NodeData::ImportType {
            is_type_of: false,
            type_arguments: Some(_),
            ..
        })
    ));

    let (parser, root) = parse_source("type B = typeof import('m');");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    assert!(matches!(
        parser.get_arena().data(ty),
        Some(NodeData::ImportType {
            is_type_of: true,
            ..
        })
    ));

    let (parser, root) = parse_source("type C = typeof x.y.z;");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::TypeQuery { expr_name, .. }) = arena.data(ty) else {
        panic!("expected type query");
    };
    assert_eq!(arena.entity_name_text(*expr_name).as_deref(), Some("x.y.z"));
}

#[test]
fn parse_type_operators_and_indexed_access() {
    let (parser, root) = parse_source("type K = keyof readonly string[][number];");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::TypeOperator {
        operator: SyntaxKind::KeyOfKeyword,
        type_node,
    }) = arena.data(ty)
    else {
        panic!("expected keyof");
    };
    assert!(matches!(
        arena.data(*type_node),
        Some(NodeData::TypeOperator {
            operator: SyntaxKind::ReadonlyKeyword,
            ..
        })
    ));
}

#[test]
fn parse_type_predicates_in_return_position() {
    let (parser, root) =
        parse_source("declare function isS(x: any): x is string;\ndeclare function check(v: unknown): asserts v;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let statements = arena.statements(root);
    let returns: Vec<_> = statements
        .iter()
        .map(|s| match arena.data(*s) {
            Some(NodeData::FunctionDeclaration { type_node, .. }) => arena.data(*type_node),
            _ => None,
        })
        .collect();
    assert!(matches!(
        returns[0],
        Some(NodeData::TypePredicate { asserts: false, .. })
    ));
    assert!(matches!(
        returns[1],
        Some(NodeData::TypePredicate {
            asserts: true,
            type_node,
            ..
        }) if type_node.is_none()
    ));
}

#[test]
fn parse_negative_literal_and_constructor_type() {
    let (parser, root) = parse_source("type N = -1 | (new (x: string) => Foo);");
    assert!(parser.get_diagnostics().is_empty());
    let ty = alias_type(&parser, root);
    let arena = parser.get_arena();
    let Some(NodeData::UnionType { types }) = arena.data(ty) else {
        panic!("expected union");
    };
    assert_eq!(types.len(), 2);
}

#[test]
fn parse_deeply_nested_type_stops_at_depth_limit() {
    let has_errors = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let source = format!("type D = {}string{};", "(".repeat(1_100), ")".repeat(1_100));
            let (parser, _root) = parse_source(&source);
            !parser.get_diagnostics().is_empty()
        })
        .expect("spawn parser thread")
        .join()
        .expect("parser thread panicked");
    assert!(has_errors);
}
