//! Tests for statement and declaration parsing.
use crate::parser::{ModifierFlags, NodeData, NodeFlags, NodeIndex, ParserState};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.d.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statement_kinds(parser: &ParserState, root: NodeIndex) -> Vec<&'static str> {
    let arena = parser.get_arena();
    arena
        .statements(root)
        .iter()
        .map(|s| arena.kind_name(*s))
        .collect()
}

#[test]
fn parse_declaration_kinds() {
    let (parser, root) = parse_source(
        r#"
export interface A { a: string; b?: number }
export type B = A;
declare class C<T> extends Base<T> implements I {}
declare enum D { X, Y = 2 }
declare const e: string, f: number;
declare function g(x: number): void;
declare namespace N { const n: number; }
declare module "m" { export const m: string; }
"#,
    );
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_eq!(
        statement_kinds(&parser, root),
        vec![
            "InterfaceDeclaration",
            "TypeAliasDeclaration",
            "ClassDeclaration",
            "EnumDeclaration",
            "VariableStatement",
            "FunctionDeclaration",
            "ModuleDeclaration",
            "ModuleDeclaration",
        ]
    );
}

#[test]
fn parse_modifiers_are_recorded() {
    let (parser, root) = parse_source("export default class Foo {}\nexport declare const enum E { A }");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let statements = arena.statements(root);
    let class = arena.get(statements[0]).expect("class node");
    assert!(class.has_modifier(ModifierFlags::EXPORT | ModifierFlags::DEFAULT));
    let enum_node = arena.get(statements[1]).expect("enum node");
    assert!(enum_node.has_modifier(ModifierFlags::DECLARE));
    assert!(enum_node.flags.contains(NodeFlags::CONST));
}

#[test]
fn parse_dotted_namespace_nests_modules() {
    let (parser, root) = parse_source("declare namespace A.B.C { type T = string; }");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let outer = arena.statements(root)[0];
    let node = arena.get(outer).expect("outer module");
    assert!(node.flags.contains(NodeFlags::NAMESPACE));
    let Some(NodeData::ModuleDeclaration { body, .. }) = arena.data(outer) else {
        panic!("expected module");
    };
    let inner = arena.get(*body).expect("inner module");
    assert!(inner.flags.contains(NodeFlags::NESTED_NAMESPACE));
    assert_eq!(arena.declaration_name(*body), Some("B"));
}

#[test]
fn parse_global_augmentation_and_shorthand_module() {
    let (parser, root) = parse_source("declare global { interface Window {} }\ndeclare module \"shorthand\";");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let statements = arena.statements(root);
    assert!(
        arena
            .get(statements[0])
            .is_some_and(|n| n.flags.contains(NodeFlags::GLOBAL_AUGMENTATION))
    );
    assert!(matches!(
        arena.data(statements[1]),
        Some(NodeData::ModuleDeclaration { body, .. }) if body.is_none()
    ));
}

#[test]
fn parse_import_forms() {
    let (parser, root) = parse_source(
        r#"
import "side-effect";
import D, { a, type B as C } from "m";
import * as ns from "m";
import type { T } from "m";
import type from "m";
import fs = require("fs");
import Alias = N.Inner;
"#,
    );
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let statements = arena.statements(root);
    assert_eq!(statements.len(), 7);

    let Some(NodeData::ImportDeclaration { import_clause, .. }) = arena.data(statements[1]) else {
        panic!("expected import");
    };
    let Some(NodeData::ImportClause { named_bindings, .. }) = arena.data(*import_clause) else {
        panic!("expected clause");
    };
    let Some(NodeData::NamedImports { elements }) = arena.data(*named_bindings) else {
        panic!("expected named imports");
    };
    assert!(matches!(
        arena.data(elements.last().unwrap_or(NodeIndex::NONE)),
        Some(NodeData::ImportSpecifier {
            is_type_only: true,
            ..
        })
    ));

    let Some(NodeData::ImportDeclaration { import_clause, .. }) = arena.data(statements[4]) else {
        panic!("expected import");
    };
    let Some(NodeData::ImportClause {
        is_type_only, name, ..
    }) = arena.data(*import_clause)
    else {
        panic!("expected clause");
    };
    assert!(!is_type_only, "`import type from` imports a binding named type");
    assert_eq!(arena.identifier_text(*name), Some("type"));

    assert!(matches!(
        arena.data(statements[5]),
        Some(NodeData::ImportEqualsDeclaration { .. })
    ));
    let Some(NodeData::ImportEqualsDeclaration {
        module_reference, ..
    }) = arena.data(statements[6])
    else {
        panic!("expected import equals");
    };
    assert_eq!(
        arena.entity_name_text(*module_reference).as_deref(),
        Some("N.Inner")
    );
}

#[test]
fn parse_export_forms() {
    let (parser, root) = parse_source(
        r#"
export * from "a";
export * as ns from "b";
export { x, y as z } from "c";
export type { T } from "d";
export { local };
export = Foo;
export default Bar.baz;
export as namespace Lib;
"#,
    );
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_eq!(
        statement_kinds(&parser, root),
        vec![
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportAssignment",
            "ExportAssignment",
            "NamespaceExportDeclaration",
        ]
    );
    let arena = parser.get_arena();
    let statements = arena.statements(root);
    assert!(matches!(
        arena.data(statements[3]),
        Some(NodeData::ExportDeclaration {
            is_type_only: true,
            ..
        })
    ));
    assert!(matches!(
        arena.data(statements[5]),
        Some(NodeData::ExportAssignment {
            is_export_equals: true,
            ..
        })
    ));
}

#[test]
fn parse_interface_members() {
    let (parser, root) = parse_source(
        r#"
interface I {
    (x: number): string;
    new (x: number): I;
    readonly [key: string]: any;
    method<T>(a: T, ...rest: any[]): void;
    get size(): number;
    set size(v: number);
    [Symbol.iterator](): Iterator<any>;
    "quoted-name": boolean,
    readonly: string;
}
"#,
    );
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let decl = arena.statements(root)[0];
    let Some(NodeData::InterfaceDeclaration { members, .. }) = arena.data(decl) else {
        panic!("expected interface");
    };
    let kinds: Vec<_> = members.iter().map(|m| arena.kind_name(m)).collect();
    assert_eq!(
        kinds,
        vec![
            "CallSignature",
            "ConstructSignature",
            "IndexSignature",
            "MethodSignature",
            "GetAccessor",
            "SetAccessor",
            "MethodSignature",
            "PropertySignature",
            "PropertySignature",
        ]
    );
    let index_signature = arena.get(members.iter().nth(2).unwrap_or(NodeIndex::NONE));
    assert!(index_signature.is_some_and(|n| n.has_modifier(ModifierFlags::READONLY)));
}

#[test]
fn parse_class_members_and_bodies() {
    let (parser, root) = parse_source(
        r#"
class K {
    private secret;
    static create(): K { return new K(); }
    constructor(public a: string, { b }: { b: number });
    protected abstract value?: number;
    #hidden: string;
}
"#,
    );
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let decl = arena.statements(root)[0];
    let Some(NodeData::ClassDeclaration { members, .. }) = arena.data(decl) else {
        panic!("expected class");
    };
    let kinds: Vec<_> = members.iter().map(|m| arena.kind_name(m)).collect();
    assert_eq!(
        kinds,
        vec![
            "PropertyDeclaration",
            "MethodDeclaration",
            "Constructor",
            "PropertyDeclaration",
            "PropertyDeclaration",
        ]
    );
    let first = arena.get(members.first().unwrap_or(NodeIndex::NONE));
    assert!(first.is_some_and(|n| n.has_modifier(ModifierFlags::PRIVATE)));
}

#[test]
fn parse_enum_initializers() {
    let (parser, root) = parse_source("declare enum E { A = 1, B = -2, C = \"c\", D = 1 << 3 }");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let decl = arena.statements(root)[0];
    let Some(NodeData::EnumDeclaration { members, .. }) = arena.data(decl) else {
        panic!("expected enum");
    };
    let initializers: Vec<_> = members
        .iter()
        .map(|m| match arena.data(m) {
            Some(NodeData::EnumMember { initializer, .. }) => arena.kind_name(*initializer),
            _ => "",
        })
        .collect();
    assert_eq!(
        initializers,
        vec![
            "NumericLiteral",
            "PrefixUnaryExpression",
            "StringLiteral",
            "UnparsedExpression",
        ]
    );
}

#[test]
fn parse_statement_recovery_keeps_following_declarations() {
    let (parser, root) = parse_source("declare const a: string;\n%%%\ndeclare const b: number;");
    assert!(!parser.get_diagnostics().is_empty());
    assert_eq!(
        statement_kinds(&parser, root),
        vec!["VariableStatement", "VariableStatement"]
    );
}
