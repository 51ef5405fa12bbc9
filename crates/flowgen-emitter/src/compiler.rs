//! Entry points: definition text or files in, Flow text and diagnostics out.
//!
//! Every entry point builds one program for all of its inputs so that
//! relative imports between them resolve, then prints each file on its own.
//! Recoverable problems become diagnostics on the [`CompileOutput`]; a
//! [`CompileError`] aborts only the file it belongs to.

use crate::context::CompileContext;
use crate::helpers::{CONDITIONAL_HELPERS, FLOW_HEADER};
use crate::name_compat::RenameTable;
use crate::printer::Printer;
use crate::transforms;
use flowgen_binder::{Program, ProgramBuilder};
use flowgen_common::diagnostics::diagnostic_codes;
use flowgen_common::{Diagnostic, Options};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::{debug, info_span, warn};

/// Failures that abort the translation of a file.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The syntax tree has a shape the parser never produces.
    #[error("impossible syntax: {description}")]
    ImpossibleSyntax { description: String },
    /// Well-formed input this tool cannot handle at all.
    #[error("unexpected input: {description}")]
    UnexpectedInput { description: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no source file was produced for {path}")]
    NoSourceFile { path: String },
}

/// Translated text of one file and everything reported along the way.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Rewrites a file's text before it is parsed.
pub type SourceMapper<'m> = &'m dyn Fn(&Path, String) -> String;

static INPUT_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Translate declaration text. The input is named `input-<n>.d.ts` in
/// diagnostics.
pub fn compile_definition_string(text: &str, options: &Options) -> Result<CompileOutput, CompileError> {
    let n = INPUT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!("input-{n}.d.ts");
    compile_sources(vec![(name.clone(), text.to_string())], options)
        .pop()
        .ok_or(CompileError::NoSourceFile { path: name })?
}

/// Translate one declaration file.
pub fn compile_definition_file(
    path: &Path,
    options: &Options,
    map_source: Option<SourceMapper<'_>>,
) -> Result<CompileOutput, CompileError> {
    let text = read_source(path, map_source)?;
    let name = source_name(path);
    compile_sources(vec![(name.clone(), text)], options)
        .pop()
        .ok_or(CompileError::NoSourceFile { path: name })?
}

/// Translate several files as one program, in input order. A file that
/// fails gets empty text and an error diagnostic; the others are unaffected.
pub fn compile_definition_files(
    paths: &[PathBuf],
    options: &Options,
    map_source: Option<SourceMapper<'_>>,
) -> Vec<(PathBuf, CompileOutput)> {
    let mut outputs: Vec<Option<CompileOutput>> = vec![None; paths.len()];
    let mut sources = Vec::with_capacity(paths.len());
    let mut slots = Vec::with_capacity(paths.len());
    for (slot, path) in paths.iter().enumerate() {
        match read_source(path, map_source) {
            Ok(text) => {
                sources.push((source_name(path), text));
                slots.push(slot);
            }
            Err(error) => outputs[slot] = Some(failed_output(&source_name(path), &error)),
        }
    }
    let names: Vec<String> = sources.iter().map(|(name, _)| name.clone()).collect();
    for ((slot, name), result) in slots
        .into_iter()
        .zip(names)
        .zip(compile_sources(sources, options))
    {
        outputs[slot] = Some(match result {
            Ok(output) => output,
            Err(error) => failed_output(&name, &error),
        });
    }
    paths
        .iter()
        .cloned()
        .zip(outputs.into_iter().map(Option::unwrap_or_default))
        .collect()
}

fn read_source(path: &Path, map_source: Option<SourceMapper<'_>>) -> Result<String, CompileError> {
    let text = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match map_source {
        Some(map) => map(path, text),
        None => text,
    })
}

/// Program-level file name; forward slashes so relative imports resolve
/// the same on every platform.
fn source_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn failed_output(file: &str, error: &CompileError) -> CompileOutput {
    warn!(file, %error, "compile failed");
    CompileOutput {
        text: String::new(),
        diagnostics: vec![Diagnostic::error(
            file,
            0,
            0,
            error.to_string(),
            diagnostic_codes::COMPILE_FAILED,
        )],
    }
}

/// Parse, transform and bind `sources` together, then print each.
fn compile_sources(
    sources: Vec<(String, String)>,
    options: &Options,
) -> Vec<Result<CompileOutput, CompileError>> {
    let mut builder = ProgramBuilder::new();
    let files: Vec<usize> = sources
        .into_iter()
        .map(|(name, text)| builder.add_source_file(name, text))
        .collect();
    let transformed: Vec<Result<(), CompileError>> = files
        .iter()
        .map(|&file| transforms::transform_file(&mut builder, file, options))
        .collect();
    let program = builder.build();
    files
        .into_iter()
        .zip(transformed)
        .map(|(file, transformed)| {
            transformed?;
            compile_file(&program, file, options)
        })
        .collect()
}

fn compile_file(program: &Program, file: usize, options: &Options) -> Result<CompileOutput, CompileError> {
    let info = program.file(file).ok_or_else(|| CompileError::NoSourceFile {
        path: format!("#{file}"),
    })?;
    let _span = info_span!("compile_file", file = %info.file_name).entered();

    let renames = RenameTable::build(program, info.root);
    let ctx = CompileContext::new(program, options, &renames, &info.file_name);
    let mut printer = Printer::new(&ctx);
    let tree = printer.build_tree(info.root);
    let declarations = printer.print_tree(&tree);

    let mut text = String::new();
    if options.add_flow_header {
        text.push_str(FLOW_HEADER);
        text.push('\n');
    }
    if printer.uses_conditional_helper() {
        text.push_str(CONDITIONAL_HELPERS);
        text.push_str("\n\n");
    }
    text.push_str(&declarations);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }

    let mut diagnostics = info.parse_diagnostics.clone();
    if !options.quiet {
        for diagnostic in &diagnostics {
            warn!(code = diagnostic.code, file = %diagnostic.file, "{}", diagnostic.message_text);
        }
    }
    diagnostics.extend(printer.into_diagnostics());
    debug!(
        renames = renames.len(),
        diagnostics = diagnostics.len(),
        bytes = text.len(),
        "file compiled"
    );
    Ok(CompileOutput { text, diagnostics })
}
