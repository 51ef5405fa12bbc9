use crate::program::{Program, ProgramBuilder};
use crate::symbols::symbol_flags;

fn bind(source: &str) -> (Program, usize) {
    Program::from_source("test.d.ts", source)
}

fn flags_of(program: &Program, id: crate::SymbolId) -> u32 {
    program.symbol(id).map(|s| s.flags).unwrap_or(0)
}

#[test]
fn test_script_declarations_are_global() {
    let (program, file) = bind("declare class Foo {}\ninterface Bar { x: string }\n");
    let info = program.file(file).unwrap();
    assert!(!info.is_external_module);
    assert!(info.symbol.is_none());
    let foo = program.globals().get("Foo").expect("Foo should be global");
    assert!(flags_of(&program, foo) & symbol_flags::CLASS != 0);
    let bar = program.globals().get("Bar").expect("Bar should be global");
    assert!(program.symbol(bar).unwrap().members.has("x"));
}

#[test]
fn test_module_declarations_are_file_locals() {
    let (program, file) = bind("export interface A {}\ninterface B {}\n");
    let info = program.file(file).unwrap();
    assert!(info.is_external_module);
    assert!(info.locals.has("A"));
    assert!(info.locals.has("B"));
    assert!(!program.globals().has("A"));

    let module = program.symbol(info.symbol.unwrap()).unwrap();
    assert!(module.exports.has("A"));
    assert!(!module.exports.has("B"), "B is not exported");
}

#[test]
fn test_interface_and_namespace_merge() {
    let (program, _) = bind(
        "declare interface Thing { a: number }\n\
         declare namespace Thing { const b: string; }\n",
    );
    let thing = program.globals().get("Thing").unwrap();
    let symbol = program.symbol(thing).unwrap();
    assert!(symbol.has_any_flags(symbol_flags::INTERFACE));
    assert!(symbol.has_any_flags(symbol_flags::VALUE_MODULE));
    assert_eq!(symbol.declarations.len(), 2);
    assert!(symbol.exports.has("b"));
    assert!(symbol.members.has("a"));
}

#[test]
fn test_namespace_instantiation() {
    let (program, _) = bind(
        "declare namespace Types { interface I {} type T = string; }\n\
         declare namespace Values { function f(): void; }\n\
         declare namespace Outer { namespace Inner { const x: number; } }\n\
         declare namespace OnlyConst { const enum E { A } }\n",
    );
    let flags = |name: &str| flags_of(&program, program.globals().get(name).unwrap());
    assert_eq!(flags("Types") & symbol_flags::MODULE, symbol_flags::NAMESPACE_MODULE);
    assert_eq!(flags("Values") & symbol_flags::MODULE, symbol_flags::VALUE_MODULE);
    assert_eq!(flags("Outer") & symbol_flags::MODULE, symbol_flags::VALUE_MODULE);
    assert_eq!(flags("OnlyConst") & symbol_flags::MODULE, symbol_flags::NAMESPACE_MODULE);
}

#[test]
fn test_dotted_namespace_nests_exports() {
    let (program, _) = bind("declare namespace A.B.C { interface D {} }\n");
    let a = program.globals().get("A").unwrap();
    let b = program.symbol(a).unwrap().exports.get("B").expect("A.B");
    let c = program.symbol(b).unwrap().exports.get("C").expect("A.B.C");
    assert!(program.symbol(c).unwrap().exports.has("D"));
}

#[test]
fn test_enum_members_are_exports() {
    let (program, _) = bind("declare enum Color { Red, Green = 2 }\nconst enum Flag { On }\n");
    let color = program.globals().get("Color").unwrap();
    let symbol = program.symbol(color).unwrap();
    assert!(symbol.has_any_flags(symbol_flags::REGULAR_ENUM));
    assert!(symbol.exports.has("Red"));
    assert!(symbol.exports.has("Green"));
    let red = symbol.exports.get("Red").unwrap();
    assert!(flags_of(&program, red) & symbol_flags::ENUM_MEMBER != 0);

    let flag = program.globals().get("Flag").unwrap();
    assert!(flags_of(&program, flag) & symbol_flags::CONST_ENUM != 0);
}

#[test]
fn test_export_default_class() {
    let (program, file) = bind("export default class Widget {}\n");
    let module = program.symbol(program.file(file).unwrap().symbol.unwrap()).unwrap();
    let default = module.exports.get("default").expect("default export");
    assert_eq!(program.symbol(default).unwrap().name, "Widget");
    assert!(!module.exports.has("Widget"));
}

#[test]
fn test_imports_become_aliases() {
    let (program, file) = bind(
        "import D, { a as b, type T } from './m';\nimport * as ns from 'pkg';\nexport {};\n",
    );
    let locals = &program.file(file).unwrap().locals;
    let alias = |name: &str| program.symbol(locals.get(name).unwrap()).unwrap();

    let d = alias("D");
    assert!(d.has_any_flags(symbol_flags::ALIAS));
    assert_eq!(d.import_module.as_deref(), Some("./m"));
    assert_eq!(d.import_name.as_deref(), Some("default"));

    let b = alias("b");
    assert_eq!(b.import_name.as_deref(), Some("a"));
    assert!(!b.is_type_only);

    assert!(alias("T").is_type_only);

    let ns = alias("ns");
    assert_eq!(ns.import_module.as_deref(), Some("pkg"));
    assert!(ns.import_name.is_none());
}

#[test]
fn test_export_star_recorded() {
    let (program, file) = bind("export * from './other';\n");
    let module = program.symbol(program.file(file).unwrap().symbol.unwrap()).unwrap();
    assert_eq!(module.export_stars, vec!["./other".to_string()]);
}

#[test]
fn test_ambient_modules_merge() {
    let (program, _) = bind(
        "declare module 'pkg' { export const a: number; }\n\
         declare module 'pkg' { export const b: number; }\n",
    );
    let pkg = program.ambient_module("pkg").expect("ambient module");
    let symbol = program.symbol(pkg).unwrap();
    assert!(symbol.exports.has("a"));
    assert!(symbol.exports.has("b"));
    assert_eq!(symbol.declarations.len(), 2);
}

#[test]
fn test_global_augmentation_declares_globals() {
    let (program, _) = bind("export {};\ndeclare global { interface Window { x: 1 } }\n");
    assert!(program.globals().has("Window"));
}

#[test]
fn test_export_as_namespace_adds_global() {
    let (program, file) = bind("export declare function f(): void;\nexport as namespace Lib;\n");
    let global = program.globals().get("Lib").expect("Lib global");
    assert_eq!(Some(global), program.file(file).unwrap().symbol);
}

#[test]
fn test_lib_symbols_are_flagged() {
    let (program, _) = bind("interface Mine {}\n");
    let partial = program.globals().get("Partial").expect("lib declares Partial");
    assert!(program.is_lib_symbol(partial));
    let mine = program.globals().get("Mine").unwrap();
    assert!(!program.is_lib_symbol(mine));
}

#[test]
fn test_type_literal_gets_symbol() {
    let (program, file) = bind("declare const o: { a: string; b(): void };\n");
    let root = program.file(file).unwrap().root;
    let literal = program
        .arena()
        .children(root)
        .into_iter()
        .flat_map(|statement| program.arena().children(statement))
        .flat_map(|declaration| program.arena().children(declaration))
        .find(|&n| program.arena().kind_name(n) == "TypeLiteral")
        .expect("type literal");
    let id = program.node_symbol(literal).expect("type literal symbol");
    let symbol = program.symbol(id).unwrap();
    assert!(symbol.has_any_flags(symbol_flags::TYPE_LITERAL));
    assert!(symbol.members.has("a"));
    assert!(symbol.members.has("b"));
}

#[test]
fn test_parents_linked_across_files() {
    let mut builder = ProgramBuilder::new();
    let first = builder.add_source_file("a.d.ts", "declare type A = string;\n");
    let second = builder.add_source_file("b.d.ts", "declare type B = number;\n");
    let program = builder.build();
    for file in [first, second] {
        let root = program.file(file).unwrap().root;
        let statement = program.arena().statements(root)[0];
        assert_eq!(program.parent_node(statement), root);
        assert_eq!(program.file_of(statement), Some(file));
    }
    assert_eq!(program.user_files().collect::<Vec<_>>(), vec![first, second]);
}

#[test]
fn test_position_of_node() {
    let (program, file) = bind("\n\ndeclare type A = string;\n");
    let root = program.file(file).unwrap().root;
    let statement = program.arena().statements(root)[0];
    let position = program.position_of(statement).unwrap();
    assert_eq!(position.line, 2);
    assert_eq!(position.character, 0);
}
