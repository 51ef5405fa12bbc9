use super::args::CliArgs;
use super::driver::{collect_inputs, flow_file_name, resolve_options, run};
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn args(list: &[&str]) -> CliArgs {
    let mut argv = vec!["flowgen"];
    argv.extend_from_slice(list);
    CliArgs::try_parse_from(argv).unwrap()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_flow_file_name() {
    assert_eq!(flow_file_name("index.d.ts"), "index.js.flow");
    assert_eq!(flow_file_name("types.ts"), "types.js.flow");
    assert_eq!(flow_file_name("README"), "README.js.flow");
}

#[test]
fn test_writes_next_to_input_by_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("index.d.ts");
    fs::write(&input, "export interface Point { x: number; y: number }\n").unwrap();

    let translations = run(&args(&[&path_arg(&input), "-q"])).unwrap();
    assert_eq!(translations.len(), 1);

    let output = dir.path().join("index.js.flow");
    assert_eq!(translations[0].output.as_deref(), Some(output.as_path()));
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("export interface Point"), "output: {text}");
}

#[test]
fn test_directory_walk_mirrors_layout_into_output_dir() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("nested")).unwrap();
    fs::write(src.path().join("a.d.ts"), "export type A = string;\n").unwrap();
    fs::write(src.path().join("nested/b.d.ts"), "export type B = number;\n").unwrap();
    fs::write(src.path().join("notes.md"), "# not a declaration\n").unwrap();

    let translations = run(&args(&[
        &path_arg(src.path()),
        "--output-dir",
        &path_arg(out.path()),
        "-q",
    ]))
    .unwrap();
    assert_eq!(translations.len(), 2);
    assert!(out.path().join("a.js.flow").is_file());
    let nested = fs::read_to_string(out.path().join("nested/b.js.flow")).unwrap();
    assert!(nested.contains("export type B = number;"), "output: {nested}");
}

#[test]
fn test_collect_inputs_sorts_and_filters() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.d.ts"), "").unwrap();
    fs::write(dir.path().join("a.d.ts"), "").unwrap();
    fs::write(dir.path().join("c.js"), "").unwrap();

    let inputs = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<String> = inputs
        .iter()
        .map(|input| input.relative.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.d.ts".to_string(), "b.d.ts".to_string()]);
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.d.ts");
    let error = run(&args(&[&path_arg(&missing)])).unwrap_err();
    assert!(format!("{error:#}").contains("missing.d.ts"), "error: {error:#}");
}

#[test]
fn test_output_file_rejects_several_inputs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.d.ts"), "").unwrap();
    fs::write(dir.path().join("b.d.ts"), "").unwrap();
    let result = run(&args(&[
        &path_arg(dir.path()),
        "-o",
        &path_arg(&dir.path().join("out.js.flow")),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_stdout_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("index.d.ts");
    fs::write(&input, "export declare const x: number;\n").unwrap();

    let translations = run(&args(&[&path_arg(&input), "--stdout", "-q"])).unwrap();
    assert!(translations[0].output.is_none());
    assert!(translations[0].result.text.contains("declare export var x: number;"));
    assert!(!dir.path().join("index.js.flow").exists());
}

#[test]
fn test_config_file_then_flags() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("flowgen.json");
    fs::write(&config, r#"{ "interfaceRecords": true, "asModule": "pkg" }"#).unwrap();

    let options = resolve_options(&args(&[
        "index.d.ts",
        "--config",
        &path_arg(&config),
        "--no-inexact",
    ]))
    .unwrap();
    assert!(options.interface_records);
    assert!(!options.inexact);
    assert_eq!(options.as_module.as_deref(), Some("pkg"));
    assert!(!options.add_flow_header);
}

#[test]
fn test_bad_config_reports_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("flowgen.json");
    fs::write(&config, "{ not json").unwrap();
    let error = resolve_options(&args(&["index.d.ts", "--config", &path_arg(&config)])).unwrap_err();
    assert!(format!("{error:#}").contains("flowgen.json"), "error: {error:#}");
}

#[test]
fn test_header_and_module_flags_reach_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("lib.d.ts");
    fs::write(&input, "export declare function f(): void;\n").unwrap();

    let translations = run(&args(&[
        &path_arg(&input),
        "--stdout",
        "--add-flow-header",
        "--as-module",
        "lib",
        "-q",
    ]))
    .unwrap();
    let text = &translations[0].result.text;
    assert!(text.starts_with("// @flow\n"), "output: {text}");
    assert!(text.contains("declare module 'lib' {"), "output: {text}");
}
