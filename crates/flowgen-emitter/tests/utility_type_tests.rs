//! Library utility types and their Flow spellings.

use flowgen_common::Options;
use flowgen_emitter::{compile_definition_string, is_substituted_name};

fn compile_with(source: &str, options: &Options) -> String {
    compile_definition_string(source, options).unwrap().text
}

fn compile(source: &str) -> String {
    compile_with(source, &Options::default().with_quiet(true))
}

const FOO: &str = "interface Foo { a: string; b: number }\n";

#[test]
fn test_partial() {
    let out = compile(&format!("{FOO}type P = Partial<Foo>;\n"));
    assert!(out.contains("declare type P = $Rest<Foo, {...}>;"), "{out}");
}

#[test]
fn test_partial_exact() {
    let options = Options::default().with_quiet(true).with_inexact(false);
    let out = compile_with(&format!("{FOO}type P = Partial<Foo>;\n"), &options);
    assert!(out.contains("declare type P = $Rest<Foo, {||}>;"), "{out}");
}

#[test]
fn test_renamed_utilities() {
    let out = compile(&format!(
        "{FOO}type A = Readonly<Foo>;\ntype B = NonNullable<string | null>;\ntype C = ReadonlyArray<Foo>;\ntype D = ReadonlyMap<string, Foo>;\ntype E = ReadonlySet<number>;\n"
    ));
    assert!(out.contains("declare type A = $ReadOnly<Foo>;"), "{out}");
    assert!(out.contains("declare type B = $NonMaybeType<string | null>;"), "{out}");
    assert!(out.contains("declare type C = $ReadOnlyArray<Foo>;"), "{out}");
    assert!(out.contains("declare type D = $ReadOnlyMap<string, Foo>;"), "{out}");
    assert!(out.contains("declare type E = $ReadOnlySet<number>;"), "{out}");
}

#[test]
fn test_record_with_literal_keys() {
    let out = compile("type R = Record<\"a\" | \"b-c\", number>;\n");
    assert_eq!(out, "declare type R = { a: number, \"b-c\": number, ... };\n");
}

#[test]
fn test_record_with_key_type() {
    let out = compile("type R = Record<string, boolean>;\n");
    assert_eq!(out, "declare type R = { [key: string]: boolean, ... };\n");
}

#[test]
fn test_omit() {
    let out = compile(&format!("{FOO}type O = Omit<Foo, \"a\">;\n"));
    assert!(out.contains("declare type O = $Diff<Foo, {| a: any |}>;"), "{out}");
}

#[test]
fn test_return_type_and_parameters() {
    let out = compile("type F = (a: string) => number;\ntype R = ReturnType<F>;\ntype P = Parameters<F>;\n");
    assert!(
        out.contains("declare type R = $Call<<R>((...args: any[]) => R) => R, F>;"),
        "{out}"
    );
    assert!(
        out.contains("declare type P = $Call<<A: $ReadOnlyArray<mixed>>((...args: A) => mixed) => A, F>;"),
        "{out}"
    );
}

#[test]
fn test_local_declaration_is_not_substituted() {
    let out = compile("export interface Partial<T> { value: T }\nexport type P = Partial<string>;\n");
    assert!(out.contains("export type P = Partial<string>;"), "{out}");
}

#[test]
fn test_local_alias_shadows_utility() {
    let out = compile("type Omit = number;\ntype T = Omit;\n");
    assert_eq!(out, "declare type Omit = number;\n\ndeclare type T = Omit;\n");
}

#[test]
fn test_imported_name_is_not_the_library_utility() {
    let imported = compile("import { Record } from './foo/util.js';\ntype R = Record<'x', number>;\n");
    assert!(imported.contains("declare type R = Record<\"x\", number>;"), "{imported}");

    let library = compile("type R = Record<'x', number>;\n");
    assert_eq!(library, "declare type R = { x: number, ... };\n");
}

#[test]
fn test_heritage_keeps_utility_names() {
    let out = compile(&format!("{FOO}interface Loose extends Partial<Foo> {{}}\n"));
    assert!(out.contains("declare type Loose = {...} & Partial<Foo>;"), "{out}");
}

#[test]
fn test_wrong_arity_prints_literally() {
    let out = compile(&format!("{FOO}type O = Omit<Foo>;\n"));
    assert!(out.contains("declare type O = Omit<Foo>;"), "{out}");
}

#[test]
fn test_substitution_table() {
    for name in ["Partial", "Omit", "Record", "Readonly", "ReturnType", "RegExpMatchArray"] {
        assert!(is_substituted_name(name), "{name}");
    }
    assert!(!is_substituted_name("Pick"));
    assert!(!is_substituted_name("Array"));
}
