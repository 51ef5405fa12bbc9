use crate::program::Program;
use crate::symbols::{SymbolId, symbol_flags};
use flowgen_parser::{NodeData, NodeIndex};

fn bind(source: &str) -> (Program, usize) {
    Program::from_source("test.d.ts", source)
}

/// Nodes under `file`'s root in depth-first source order.
fn descendants(program: &Program, file: usize) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut stack = vec![program.file(file).unwrap().root];
    while let Some(node) = stack.pop() {
        out.push(node);
        let mut children = program.arena().children(node);
        children.reverse();
        stack.extend(children);
    }
    out
}

/// The `nth` type reference spelled `name` in `file`.
fn reference(program: &Program, file: usize, name: &str, nth: usize) -> NodeIndex {
    descendants(program, file)
        .into_iter()
        .filter(|&n| match program.arena().data(n) {
            Some(NodeData::TypeReference { type_name, .. }) => {
                program.arena().entity_name_text(*type_name).as_deref() == Some(name)
            }
            _ => false,
        })
        .nth(nth)
        .unwrap_or_else(|| panic!("no reference #{nth} to {name}"))
}

fn resolved(program: &Program, node: NodeIndex) -> SymbolId {
    let id = program.symbol_at_location(node).expect("reference should resolve");
    program.resolve_alias(id)
}

#[test]
fn test_resolves_file_local() {
    let (program, file) = bind("export interface A {}\nexport type B = A;\n");
    let a = resolved(&program, reference(&program, file, "A", 0));
    assert_eq!(Some(a), program.file(file).unwrap().locals.get("A"));
}

#[test]
fn test_type_parameter_shadows_outer_name() {
    let (program, file) = bind("interface T {}\ntype Box<T> = { value: T };\ntype Plain = T;\n");
    let inner = resolved(&program, reference(&program, file, "T", 0));
    assert!(program.symbol(inner).unwrap().has_any_flags(symbol_flags::TYPE_PARAMETER));
    let outer = resolved(&program, reference(&program, file, "T", 1));
    assert!(program.symbol(outer).unwrap().has_any_flags(symbol_flags::INTERFACE));
}

#[test]
fn test_infer_declaration_visible_in_true_branch() {
    let (program, file) = bind("type Unwrap<P> = P extends Promise<infer U> ? U : never;\n");
    let u = resolved(&program, reference(&program, file, "U", 0));
    assert!(program.symbol(u).unwrap().has_any_flags(symbol_flags::TYPE_PARAMETER));
}

#[test]
fn test_mapped_type_parameter() {
    let (program, file) = bind("type M<O> = { [K in keyof O]: K };\n");
    let k = resolved(&program, reference(&program, file, "K", 0));
    assert!(program.symbol(k).unwrap().has_any_flags(symbol_flags::TYPE_PARAMETER));
}

#[test]
fn test_namespace_member_lookup() {
    let (program, file) = bind(
        "declare namespace NS { interface I {} type Local = I; }\ntype Outside = NS.I;\n",
    );
    let ns = program.globals().get("NS").unwrap();
    let expected = program.symbol(ns).unwrap().exports.get("I").unwrap();
    assert_eq!(resolved(&program, reference(&program, file, "I", 0)), expected);
    assert_eq!(resolved(&program, reference(&program, file, "NS.I", 0)), expected);
}

#[test]
fn test_enum_member_lookup() {
    let (program, file) = bind("declare enum E { A, B }\ntype X = E.B;\n");
    let member = resolved(&program, reference(&program, file, "E.B", 0));
    let symbol = program.symbol(member).unwrap();
    assert!(symbol.has_any_flags(symbol_flags::ENUM_MEMBER));
    assert_eq!(symbol.name, "B");
}

#[test]
fn test_typeof_walks_declared_type() {
    let (program, file) = bind(
        "declare const config: { inner: { flag: boolean } };\ntype F = typeof config.inner.flag;\n",
    );
    let query = descendants(&program, file)
        .into_iter()
        .find(|&n| matches!(program.arena().data(n), Some(NodeData::TypeQuery { .. })))
        .unwrap();
    let id = program.symbol_at_location(query).expect("typeof target");
    let symbol = program.symbol(id).unwrap();
    assert_eq!(symbol.name, "flag");
    assert!(symbol.has_any_flags(symbol_flags::PROPERTY));
}

#[test]
fn test_lib_reference_resolves_to_lib() {
    let (program, file) = bind("type P = Partial<{ a: string }>;\n");
    let id = resolved(&program, reference(&program, file, "Partial", 0));
    assert!(program.is_lib_symbol(id));
}

#[test]
fn test_local_declaration_shadows_lib() {
    let (program, file) = bind("export interface Partial<T> {}\nexport type P = Partial<string>;\n");
    let id = resolved(&program, reference(&program, file, "Partial", 0));
    assert!(!program.is_lib_symbol(id));
}

#[test]
fn test_import_equals_entity_alias() {
    let (program, file) = bind(
        "declare namespace A { interface B {} }\nimport C = A.B;\ntype D = C;\n",
    );
    let c = program.symbol_at_location(reference(&program, file, "C", 0)).unwrap();
    assert!(program.symbol(c).unwrap().has_any_flags(symbol_flags::ALIAS));
    let target = program.resolve_alias(c);
    assert!(program.symbol(target).unwrap().has_any_flags(symbol_flags::INTERFACE));
    assert_ne!(target, c);
}

#[test]
fn test_unresolved_alias_resolves_to_itself() {
    let (program, file) = bind("import { Missing } from './nowhere';\nexport type X = Missing;\n");
    let id = program
        .symbol_at_location(reference(&program, file, "Missing", 0))
        .unwrap();
    assert_eq!(program.resolve_alias(id), id);
}

#[test]
fn test_ambient_module_import() {
    let (program, file) = bind(
        "declare module 'pkg' { export interface Api {} }\n\
         import { Api } from 'pkg';\nexport type X = Api;\n",
    );
    let id = resolved(&program, reference(&program, file, "Api", 0));
    let symbol = program.symbol(id).unwrap();
    assert!(symbol.has_any_flags(symbol_flags::INTERFACE));
}

#[test]
fn test_class_reference_through_alias() {
    let (program, file) = bind(
        "declare module 'ui' { export class Widget {} export interface Props {} }\n\
         import { Widget, Props } from 'ui';\nexport type W = Widget;\nexport type P = Props;\n",
    );
    let widget = program
        .symbol_at_location(reference(&program, file, "Widget", 0))
        .unwrap();
    assert!(program.is_class_reference(widget));
    let props = program
        .symbol_at_location(reference(&program, file, "Props", 0))
        .unwrap();
    assert!(!program.is_class_reference(props));
}

#[test]
fn test_export_equals_namespace_members() {
    let (program, file) = bind(
        "declare module 'legacy' {\n\
           namespace L { interface Opts {} }\n\
           export = L;\n\
         }\n\
         import * as legacy from 'legacy';\nexport type O = legacy.Opts;\n",
    );
    let id = resolved(&program, reference(&program, file, "legacy.Opts", 0));
    assert_eq!(program.symbol(id).unwrap().name, "Opts");
}
