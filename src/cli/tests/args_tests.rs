use super::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parses_inputs_and_style_flags() {
    let args = CliArgs::try_parse_from([
        "flowgen",
        "index.d.ts",
        "types",
        "--interface-records",
        "--no-inexact",
        "--as-module",
        "lib",
        "--add-flow-header",
        "-q",
    ])
    .unwrap();
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("index.d.ts"), PathBuf::from("types")]
    );
    assert!(args.interface_records);
    assert!(args.no_inexact);
    assert_eq!(args.as_module.as_deref(), Some("lib"));
    assert!(args.add_flow_header);
    assert!(args.quiet);
}

#[test]
fn test_requires_an_input() {
    assert!(CliArgs::try_parse_from(["flowgen"]).is_err());
}

#[test]
fn test_output_file_conflicts_with_output_dir() {
    let result = CliArgs::try_parse_from([
        "flowgen",
        "a.d.ts",
        "-o",
        "a.js.flow",
        "--output-dir",
        "out",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_stdout_conflicts_with_output_file() {
    let result = CliArgs::try_parse_from(["flowgen", "a.d.ts", "--stdout", "-o", "a.js.flow"]);
    assert!(result.is_err());
}
