//! File entry points: read failures, source remapping and per-file errors.

use flowgen_common::diagnostics::diagnostic_codes;
use flowgen_common::{DiagnosticCategory, Options};
use flowgen_emitter::{CompileError, compile_definition_file, compile_definition_files};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn quiet() -> Options {
    Options::default().with_quiet(true)
}

#[test]
fn test_single_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.d.ts");
    fs::write(&path, "export declare function f(): void;\n").unwrap();
    let output = compile_definition_file(&path, &quiet(), None).unwrap();
    assert_eq!(output.text, "declare export function f(): void;\n");
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.d.ts");
    let error = compile_definition_file(&path, &quiet(), None).unwrap_err();
    assert!(matches!(error, CompileError::Io { .. }), "{error}");
}

#[test]
fn test_source_mapper_runs_before_parsing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapped.d.ts");
    fs::write(&path, "export type A = __PLACEHOLDER__;\n").unwrap();
    let mapper = |_: &Path, text: String| text.replace("__PLACEHOLDER__", "string");
    let output = compile_definition_file(&path, &quiet(), Some(&mapper)).unwrap();
    assert_eq!(output.text, "export type A = string;\n");
}

#[test]
fn test_failed_file_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.d.ts");
    fs::write(&good, "export type A = string;\n").unwrap();
    let missing = dir.path().join("missing.d.ts");
    let paths: Vec<PathBuf> = vec![missing.clone(), good.clone()];

    let outputs = compile_definition_files(&paths, &quiet(), None);
    assert_eq!(outputs.len(), 2);

    let (path, failed) = &outputs[0];
    assert_eq!(path, &missing);
    assert!(failed.text.is_empty());
    assert_eq!(failed.diagnostics.len(), 1);
    assert_eq!(failed.diagnostics[0].code, diagnostic_codes::COMPILE_FAILED);
    assert_eq!(failed.diagnostics[0].category, DiagnosticCategory::Error);
    assert!(failed.has_errors());

    assert_eq!(outputs[1].1.text, "export type A = string;\n");
    assert!(!outputs[1].1.has_errors());
}

#[test]
fn test_transform_failure_is_reported_per_file() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.d.ts");
    fs::write(&bad, "export type T = import(Foo).Bar;\n").unwrap();
    let good = dir.path().join("good.d.ts");
    fs::write(&good, "export type A = number;\n").unwrap();

    let outputs = compile_definition_files(&[bad, good], &quiet(), None);
    assert!(outputs[0].1.text.is_empty());
    assert!(outputs[0].1.has_errors());
    assert_eq!(outputs[1].1.text, "export type A = number;\n");
}

#[test]
fn test_parse_errors_become_diagnostics() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.d.ts");
    fs::write(&path, "declare const x: ;\nexport type A = string;\n").unwrap();
    let output = compile_definition_file(&path, &quiet(), None).unwrap();
    assert!(output.has_errors());
    assert!(output.text.contains("export type A = string;"), "{}", output.text);
}
