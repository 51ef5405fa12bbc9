use crate::compiler::{CompileOutput, compile_definition_string};
use flowgen_common::Options;
use flowgen_common::diagnostics::diagnostic_codes;

fn quiet() -> Options {
    Options::default().with_quiet(true)
}

fn compile_with(source: &str, options: &Options) -> CompileOutput {
    compile_definition_string(source, options).expect("compile should succeed")
}

fn compile(source: &str) -> String {
    compile_with(source, &quiet()).text
}

fn codes(source: &str) -> Vec<u32> {
    compile_with(source, &quiet())
        .diagnostics
        .iter()
        .map(|d| d.code)
        .collect()
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_exported_interface() {
    let out = compile("export interface User {\n  name: string;\n  age?: number;\n}\n");
    assert_eq!(out, "export interface User {\n  name: string,\n  age?: number\n}\n");
}

#[test]
fn test_interface_with_heritage_becomes_intersection() {
    let out = compile("interface A { a: string }\ninterface B extends A { b: number }\n");
    assert!(out.contains("declare interface A {\n  a: string\n}"), "{out}");
    assert!(out.contains("declare type B = { b: number, ... } & A;"), "{out}");
}

#[test]
fn test_interface_records_spread_heritage() {
    let options = quiet().with_interface_records(true);
    let out = compile_with("interface A { a: string }\ninterface B extends A { b: number }\n", &options).text;
    assert!(out.contains("declare type B = { ...$Exact<A>, b: number, ... };"), "{out}");
}

#[test]
fn test_exact_objects_when_not_inexact() {
    let options = quiet().with_inexact(false);
    let out = compile_with("export type O = { a: string };\n", &options).text;
    assert_eq!(out, "export type O = {| a: string |};\n");
}

#[test]
fn test_reopened_interface_prints_once() {
    let out = compile("interface A { a: string }\ninterface A { b: number }\n");
    assert_eq!(out, "declare interface A {\n  a: string,\n  b: number\n}\n");
}

#[test]
fn test_function_overloads() {
    let out = compile(
        "export declare function f(a: string): void;\nexport declare function f(a: number, b?: boolean): string;\n",
    );
    assert_eq!(
        out,
        "declare export function f(a: string): void;\ndeclare export function f(a: number, b?: boolean): string;\n"
    );
}

#[test]
fn test_this_parameter_is_dropped() {
    let out = compile("declare function f(this: Window, a: string): void;\n");
    assert_eq!(out, "declare function f(a: string): void;\n");
}

#[test]
fn test_enum_lowering() {
    let out = compile("export declare enum Color { Red, Green = 5, Blue, Name = \"n\" }\n");
    assert_eq!(
        out,
        "declare export var Color: {| +Red: 0, +Green: 5, +Blue: 6, +Name: \"n\" |};\n"
    );
}

#[test]
fn test_enum_references() {
    let out = compile("declare enum E { A, B }\ntype X = E;\ntype Y = E.A;\n");
    assert!(out.contains("declare type X = $Values<typeof E>;"), "{out}");
    assert!(out.contains("declare type Y = typeof E.A;"), "{out}");
}

#[test]
fn test_class_members() {
    let out = compile(
        "export declare class Foo<T = string> extends Bar implements Baz {\n\
         \x20 private secret: string;\n\
         \x20 readonly id: number;\n\
         \x20 static create(): Foo;\n\
         \x20 constructor(x: number);\n\
         \x20 get value(): string;\n\
         }\n\
         declare class Bar {}\n\
         interface Baz {}\n",
    );
    assert!(
        out.contains("declare export class Foo<T = string> extends Bar implements Baz {"),
        "{out}"
    );
    assert!(!out.contains("secret"), "{out}");
    assert!(out.contains("  +id: number;"), "{out}");
    assert!(out.contains("  static create(): Foo<>;"), "{out}");
    assert!(out.contains("  constructor(x: number): this;"), "{out}");
    assert!(out.contains("  +value: string;"), "{out}");
}

#[test]
fn test_accessor_pair_is_plain_property() {
    let out = compile("declare class A {\n  get x(): number;\n  set x(v: number);\n}\n");
    assert_eq!(out, "declare class A {\n  x: number;\n}\n");
}

#[test]
fn test_setter_only_is_write_only() {
    let out = compile("declare class A {\n  set x(v: number);\n}\n");
    assert_eq!(out, "declare class A {\n  -x: number;\n}\n");
}

#[test]
fn test_iterator_symbol_key() {
    let out = compile("interface I {\n  [Symbol.iterator](): Iterator<string>;\n}\n");
    assert!(out.contains("@@iterator(): Iterator<string>"), "{out}");
}

#[test]
fn test_computed_key_is_reported() {
    let source = "declare const key: \"k\";\ninterface I {\n  [key]: string;\n}\n";
    let out = compile(source);
    assert!(out.contains("[typeof key]: string"), "{out}");
    assert_eq!(codes(source), vec![diagnostic_codes::UNSUPPORTED_COMPUTED_PROPERTY]);
}

#[test]
fn test_string_literal_computed_key_is_plain() {
    let source = "interface I {\n  ['computed']?: number;\n  [0]: string;\n}\n";
    let out = compile(source);
    assert!(out.contains("\"computed\"?: number"), "{out}");
    assert!(out.contains("0: string"), "{out}");
    assert!(codes(source).is_empty());
}

// =============================================================================
// Namespaces
// =============================================================================

#[test]
fn test_namespace_flattening() {
    let out = compile("declare namespace NS {\n  function f(): void;\n  interface I { a: string }\n}\ntype X = NS.I;\n");
    assert!(out.starts_with("declare var NS: {| f: typeof NS$f |};\n\n"), "{out}");
    assert!(out.contains("declare function NS$f(): void;"), "{out}");
    assert!(out.contains("declare interface NS$I {\n  a: string\n}"), "{out}");
    assert!(out.contains("declare type X = NS$I;"), "{out}");
}

#[test]
fn test_type_only_namespace_has_no_value() {
    let out = compile("declare namespace T {\n  type A = string;\n}\n");
    assert_eq!(out, "declare type T$A = string;\n");
}

#[test]
fn test_nested_namespace_value_object() {
    let out = compile("declare namespace A.B {\n  const c: number;\n}\n");
    assert!(out.contains("declare var A: {| B: typeof A$B |};"), "{out}");
    assert!(out.contains("declare var A$B: {| c: typeof A$B$c |};"), "{out}");
    assert!(out.contains("declare var A$B$c: number;"), "{out}");
}

#[test]
fn test_class_absorbs_namespace_statics() {
    let out = compile("declare class C {}\ndeclare namespace C {\n  const version: string;\n}\n");
    assert!(out.contains("declare class C {\n  static version: typeof C$version;\n}"), "{out}");
    assert!(out.contains("declare var C$version: string;"), "{out}");
    assert!(!out.contains("declare var C:"), "{out}");
}

#[test]
fn test_namespace_absorbs_function() {
    let out = compile("declare function f(a: string): void;\ndeclare namespace f {\n  const x: number;\n}\n");
    assert!(out.contains("declare var f: {| (a: string): void, x: typeof f$x |};"), "{out}");
    assert!(out.contains("declare var f$x: number;"), "{out}");
    assert!(!out.contains("declare function f("), "{out}");
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_multiline_union() {
    let out = compile("type U = \"a\" | \"b\" | \"c\" | \"d\" | \"e\";\n");
    assert_eq!(out, "declare type U = \"a\"\n| \"b\"\n| \"c\"\n| \"d\"\n| \"e\";\n");
}

#[test]
fn test_keyword_types() {
    let out = compile("type A = unknown;\ntype B = never;\ntype C = undefined;\ntype D = object;\n");
    assert!(out.contains("declare type A = mixed;"), "{out}");
    assert!(out.contains("declare type B = empty;"), "{out}");
    assert!(out.contains("declare type C = void;"), "{out}");
    assert!(out.contains("declare type D = {[key: string]: any};"), "{out}");
}

#[test]
fn test_type_operators_and_indexed_access() {
    let out = compile(
        "interface Foo { a: string }\ntype K = keyof Foo;\ntype V = Foo[\"a\"];\ntype W = Foo[number];\ntype R = readonly string[];\n",
    );
    assert!(out.contains("declare type K = $Keys<Foo>;"), "{out}");
    assert!(out.contains("declare type V = $PropertyType<Foo, \"a\">;"), "{out}");
    assert!(out.contains("declare type W = $ElementType<Foo, number>;"), "{out}");
    assert!(out.contains("declare type R = $ReadOnlyArray<string>;"), "{out}");
}

#[test]
fn test_tuple_with_optional_and_rest() {
    let out = compile("type T = [string, number?, ...boolean[]];\n");
    assert_eq!(out, "declare type T = [string, number | void] & boolean[];\n");
}

#[test]
fn test_function_type() {
    let out = compile("type F = <T>(a: T, ...rest: string[]) => void;\n");
    assert_eq!(out, "declare type F = <T>(a: T, ...rest: string[]) => void;\n");
}

#[test]
fn test_mapped_type() {
    let out = compile("type M<O> = { [K in keyof O]: O[K] };\n");
    assert_eq!(out, "declare type M<O> = $ObjMapi<O, <K>(K) => $ElementType<O, K>>;\n");
}

#[test]
fn test_conditional_type_adds_helpers() {
    let out = compile("type C<T> = T extends string ? \"s\" : \"n\";\n");
    assert!(out.starts_with("// see https://gist.github.com/"), "{out}");
    assert!(
        out.contains("declare type C<T> = $FlowGen$If<$FlowGen$Assignable<T, string>, \"s\", \"n\">;"),
        "{out}"
    );
}

#[test]
fn test_helpers_absent_without_conditionals() {
    let out = compile("type A = string;\n");
    assert!(!out.contains("$FlowGen$If"), "{out}");
}

#[test]
fn test_flow_header() {
    let options = quiet().with_add_flow_header(true);
    let out = compile_with("type A = string;\n", &options).text;
    assert_eq!(out, "// @flow\ndeclare type A = string;\n");
}

#[test]
fn test_template_literal_is_string() {
    let source = "type T = `a${string}`;\n";
    assert_eq!(compile(source), "declare type T = string;\n");
    assert_eq!(codes(source), vec![diagnostic_codes::UNSUPPORTED_TEMPLATE_LITERAL]);
}

#[test]
fn test_unique_symbol() {
    let source = "declare const s: unique symbol;\n";
    assert_eq!(compile(source), "declare var s: Symbol;\n");
    assert_eq!(codes(source), vec![diagnostic_codes::UNSUPPORTED_UNIQUE_SYMBOL]);
}

#[test]
fn test_jsx_element() {
    let out = compile("export type E = JSX.Element;\n");
    assert_eq!(out, "export type E = React$Node;\n");
}

// =============================================================================
// Modules, imports and exports
// =============================================================================

#[test]
fn test_declared_module() {
    let out = compile(
        "declare module 'm' {\n  export interface I { a: string }\n  export function f(): I;\n}\n",
    );
    assert_eq!(
        out,
        "declare module 'm' {\n  declare export interface I {\n    a: string\n  }\n\n  declare export function f(): I;\n}\n"
    );
}

#[test]
fn test_imports_stay_together() {
    let out = compile(
        "import { A, type B } from './a';\nimport D from 'd';\nimport * as ns from 'ns';\nexport type X = A | B | D | ns.T;\n",
    );
    assert_eq!(
        out,
        "import { A } from './a';\nimport type { B } from './a';\nimport D from 'd';\nimport * as ns from 'ns';\n\nexport type X = A | B | D | ns.T;\n"
    );
}

#[test]
fn test_imports_inside_module_are_type_level() {
    let out = compile("declare module 'm' {\n  import D from 'd';\n  import { A } from 'a';\n  export type X = A | D;\n}\n");
    assert!(out.contains("  import typeof D from 'd';\n  import type { A } from 'a';"), "{out}");
}

#[test]
fn test_side_effect_import() {
    let out = compile("import './polyfill';\nexport type A = string;\n");
    assert!(out.starts_with("import './polyfill';\n\n"), "{out}");
}

#[test]
fn test_react_renames() {
    let out = compile("import { ReactNode } from 'react';\nexport type P = { children: ReactNode };\n");
    assert!(out.contains("import { Node } from 'react';"), "{out}");
    assert!(out.contains("export type P = { children: Node, ... };"), "{out}");
}

#[test]
fn test_local_exports_split_by_kind() {
    let out = compile("declare const a: number;\ninterface I {}\nexport { a, I };\n");
    assert!(out.contains("export type { I };"), "{out}");
    assert!(out.contains("declare export { a };"), "{out}");
}

#[test]
fn test_star_exports() {
    let out = compile("export * from './x';\nexport * as ns from './y';\n");
    assert_eq!(out, "declare export * from './x';\n\ndeclare export * as ns from './y';\n");
}

#[test]
fn test_export_equals() {
    let out = compile("declare function f(): void;\nexport = f;\n");
    assert!(out.ends_with("declare module.exports: typeof f;\n"), "{out}");
}

#[test]
fn test_export_default_identifier() {
    let out = compile("declare class Foo {}\nexport default Foo;\n");
    assert!(out.ends_with("declare export default typeof Foo;\n"), "{out}");
}

#[test]
fn test_empty_export_marker_prints_nothing() {
    let out = compile("export {};\ndeclare const a: number;\n");
    assert_eq!(out, "declare var a: number;\n");
}

#[test]
fn test_qualification_is_stable() {
    let source = "declare namespace NS {\n  interface I { a: string }\n}\ntype A = NS.I;\ntype B = NS.I;\n";
    let first = compile(source);
    assert!(first.contains("declare type A = NS$I;"), "{first}");
    assert!(first.contains("declare type B = NS$I;"), "{first}");
    assert_eq!(first, compile(source));
}
