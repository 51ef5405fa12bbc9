use crate::compiler::compile_definition_string;
use crate::name_compat::RenameTable;
use flowgen_binder::Program;
use flowgen_common::Options;

fn table(source: &str) -> (Program, RenameTable) {
    let (program, file) = Program::from_source("test.d.ts", source);
    let root = program.file(file).unwrap().root;
    let table = RenameTable::build(&program, root);
    (program, table)
}

fn compile(source: &str) -> String {
    compile_definition_string(source, &Options::default().with_quiet(true))
        .unwrap()
        .text
}

#[test]
fn test_alias_sharing_value_name_is_renamed() {
    let (program, table) = table("declare const Status: { ok: number };\ntype Status = 200 | 404;\n");
    assert_eq!(table.len(), 1);
    let id = program.globals().get("Status").unwrap();
    assert_eq!(table.get(id), Some("StatusType"));
}

#[test]
fn test_plain_alias_is_not_renamed() {
    let (_, table) = table("type Status = 200 | 404;\ndeclare const other: number;\n");
    assert!(table.is_empty());
}

#[test]
fn test_suffix_avoids_taken_names() {
    let (program, table) = table(
        "declare const Mode: string;\ntype Mode = 'a' | 'b';\ninterface ModeType {}\n",
    );
    let id = program.globals().get("Mode").unwrap();
    assert_eq!(table.get(id), Some("ModeType1"));
}

#[test]
fn test_references_follow_the_rename() {
    let out = compile(
        "export declare const Status: { ok: number };\nexport type Status = 200 | 404;\nexport type S = Status;\nexport type V = typeof Status;\n",
    );
    assert!(out.contains("export type StatusType = 200 | 404;"), "{out}");
    assert!(out.contains("export type S = StatusType;"), "{out}");
    assert!(out.contains("export type V = typeof Status;"), "{out}");
    assert!(out.contains("declare export var Status: { ok: number, ... };"), "{out}");
}
