//! flowgen: TypeScript declaration files to Flow library definitions.
//!
//! The translator lives in the workspace crates; this package re-exports
//! their public API and hosts the command-line driver.
//!
//! ```
//! use flowgen::{Options, compile_definition_string};
//!
//! let output = compile_definition_string("export type Id = string;", &Options::default()).unwrap();
//! assert_eq!(output.text, "export type Id = string;\n");
//! ```

pub use flowgen_binder::{Program, ProgramBuilder};
pub use flowgen_common::{Diagnostic, DiagnosticCategory, FlowgenError, Options};
pub use flowgen_emitter::{
    CompileError, CompileOutput, SourceMapper, compile_definition_file, compile_definition_files,
    compile_definition_string,
};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
