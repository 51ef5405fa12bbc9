use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::args::CliArgs;
use flowgen_common::Options;
use flowgen_common::diagnostics::diagnostic_codes;
use flowgen_emitter::{CompileOutput, compile_definition_files};

/// One input file and where it sits relative to the argument that named it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Path below the directory argument, or the file name for file arguments.
    pub relative: PathBuf,
}

/// The result of translating one input.
#[derive(Debug)]
pub struct Translation {
    pub input: PathBuf,
    /// Where the text was written; `None` with `--stdout` or when the file failed.
    pub output: Option<PathBuf>,
    pub result: CompileOutput,
}

/// Translate every input named by `args` and write the results.
pub fn run(args: &CliArgs) -> Result<Vec<Translation>> {
    let options = resolve_options(args)?;
    let inputs = collect_inputs(&args.inputs)?;
    if inputs.is_empty() {
        bail!("no declaration files found");
    }
    if args.output_file.is_some() && inputs.len() > 1 {
        bail!("--output-file needs exactly one input, found {}", inputs.len());
    }
    info!(files = inputs.len(), "translating");

    let paths: Vec<PathBuf> = inputs.iter().map(|input| input.path.clone()).collect();
    let results = compile_definition_files(&paths, &options, None);

    let mut translations = Vec::with_capacity(results.len());
    for (input, (path, result)) in inputs.iter().zip(results) {
        let failed = result
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::COMPILE_FAILED);
        let output = if args.stdout || failed {
            None
        } else {
            let target = output_path(input, args);
            write_output(&target, &result.text)?;
            debug!(output = %target.display(), "written");
            Some(target)
        };
        translations.push(Translation {
            input: path,
            output,
            result,
        });
    }
    Ok(translations)
}

/// Options from `--config` (if any) with command-line flags applied on top.
pub fn resolve_options(args: &CliArgs) -> Result<Options> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Options::from_json_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Options::default(),
    };
    if args.interface_records {
        options.interface_records = true;
    }
    if args.no_inexact {
        options.inexact = false;
    }
    if let Some(name) = &args.as_module {
        options.as_module = Some(name.clone());
    }
    if args.add_flow_header {
        options.add_flow_header = true;
    }
    if args.quiet {
        options.quiet = true;
    }
    Ok(options)
}

/// Expand directory arguments into the declaration files below them.
/// Files given directly are kept whatever their extension.
pub fn collect_inputs(arguments: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::new();
    for argument in arguments {
        let metadata = std::fs::metadata(argument)
            .with_context(|| format!("failed to read {}", argument.display()))?;
        if !metadata.is_dir() {
            let relative = argument
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| argument.clone());
            inputs.push(InputFile {
                path: argument.clone(),
                relative,
            });
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(argument).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk {}", argument.display()))?;
            if !entry.file_type().is_file() || !is_declaration_input(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(argument)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            found.push(InputFile {
                path: entry.path().to_path_buf(),
                relative,
            });
        }
        inputs.extend(found);
    }
    Ok(inputs)
}

fn is_declaration_input(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".ts"))
}

/// `index.d.ts` becomes `index.js.flow`; any other `.ts` suffix is replaced too.
pub fn flow_file_name(name: &str) -> String {
    let stem = name
        .strip_suffix(".d.ts")
        .or_else(|| name.strip_suffix(".ts"))
        .unwrap_or(name);
    format!("{stem}.js.flow")
}

/// Where the translation of `input` goes.
pub fn output_path(input: &InputFile, args: &CliArgs) -> PathBuf {
    if let Some(file) = &args.output_file {
        return file.clone();
    }
    match &args.output_dir {
        Some(dir) => with_flow_name(&dir.join(&input.relative)),
        None => with_flow_name(&input.path),
    }
}

fn with_flow_name(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(flow_file_name(&name))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
