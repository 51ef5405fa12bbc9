use crate::compiler::{CompileError, compile_definition_string};
use crate::transforms::import_identifier;
use flowgen_common::Options;

fn compile_with(source: &str, options: &Options) -> String {
    compile_definition_string(source, options).unwrap().text
}

fn compile(source: &str) -> String {
    compile_with(source, &Options::default().with_quiet(true))
}

#[test]
fn test_legacy_module_keyword_is_a_namespace() {
    let out = compile("declare module Legacy {\n  const a: number;\n}\n");
    assert_eq!(
        out,
        "declare var Legacy: {| a: typeof Legacy$a |};\n\ndeclare var Legacy$a: number;\n"
    );
}

#[test]
fn test_import_require_becomes_namespace_import() {
    let out = compile("import fs = require('fs');\nexport type S = fs.Stats;\n");
    assert_eq!(out, "import * as fs from 'fs';\n\nexport type S = fs.Stats;\n");
}

#[test]
fn test_exported_import_alias_becomes_variable() {
    let out = compile("declare namespace A {\n  class B {}\n}\nexport import C = A.B;\n");
    assert!(out.contains("declare export var C: typeof A$B;"), "{out}");
}

#[test]
fn test_as_module_wraps_file() {
    let options = Options::default().with_quiet(true).with_as_module("pkg");
    let out = compile_with("export interface A { a: string }\n", &options);
    assert_eq!(out, "declare module 'pkg' {\n  declare interface A {\n    a: string\n  }\n}\n");
}

#[test]
fn test_as_module_keeps_existing_module() {
    let options = Options::default().with_quiet(true).with_as_module("pkg");
    let out = compile_with("declare module 'other' {\n  type A = string;\n}\n", &options);
    assert!(out.starts_with("declare module 'other' {"), "{out}");
    assert!(!out.contains("'pkg'"), "{out}");
}

#[test]
fn test_import_type_is_hoisted_to_namespace_import() {
    let out = compile("export type T = import('./other').Thing;\n");
    let binding = import_identifier("./other");
    assert!(out.starts_with(&format!("import * as {binding} from './other';")), "{out}");
    assert!(out.contains(&format!("export type T = {binding}.Thing;")), "{out}");
}

#[test]
fn test_import_identifier_escapes() {
    assert_eq!(import_identifier("pkg"), "$Flowgen$Import$pkg");
    assert_eq!(import_identifier("./a"), "$Flowgen$Import$_2e__2f_a");
}

#[test]
fn test_import_type_with_non_literal_argument_fails() {
    let result = compile_definition_string(
        "export type T = import(Foo).Bar;\n",
        &Options::default().with_quiet(true),
    );
    assert!(result.is_err());
}

#[test]
fn test_type_arguments_on_module_import_fail() {
    let result = compile_definition_string(
        "export type T = import('m')<string>;\n",
        &Options::default().with_quiet(true),
    );
    assert!(
        matches!(result, Err(CompileError::ImpossibleSyntax { .. })),
        "{result:?}"
    );
}

#[test]
fn test_typeof_import_uses_synthesized_binding() {
    let out = compile("export type M = typeof import('m');\n");
    assert!(out.starts_with("import * as $Flowgen$Import$m from 'm';"), "{out}");
    assert!(out.contains("export type M = typeof $Flowgen$Import$m;"), "{out}");
}

#[test]
fn test_import_types_share_one_binding_per_specifier() {
    let out = compile(
        "export type A = import('./x').A;\nexport type B = import('./x').B;\nexport type C = import('./y').C;\n",
    );
    let x = import_identifier("./x");
    let y = import_identifier("./y");
    assert_ne!(x, y);
    assert_eq!(out.matches("from './x';").count(), 1, "{out}");
    assert_eq!(out.matches("from './y';").count(), 1, "{out}");
    assert!(out.contains(&format!("export type A = {x}.A;")), "{out}");
    assert!(out.contains(&format!("export type B = {x}.B;")), "{out}");
    assert!(out.contains(&format!("export type C = {y}.C;")), "{out}");
}

fn nested_object_type(depth: usize) -> String {
    format!(
        "type T = {}string{};\n",
        "{ a: ".repeat(depth),
        " }".repeat(depth)
    )
}

#[test]
fn test_deeply_nested_type_compiles() {
    // The parser and binder recurse without growing the stack; give them room.
    let handle = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            compile_definition_string(&nested_object_type(900), &Options::default().with_quiet(true))
                .map(|output| output.text)
        })
        .unwrap();
    let text = handle.join().unwrap().unwrap();
    assert!(text.starts_with("declare type T = { a: { a: "), "{text}");
}
