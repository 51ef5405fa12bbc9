//! Translation of TypeScript declaration files into Flow library definitions.
//!
//! The pipeline for each batch of inputs:
//!
//! 1. parse every file (plus the embedded lib) into one arena,
//! 2. run the syntax [`transforms`] on each user file,
//! 3. bind the program,
//! 4. group each file's statements into a declaration [`tree`],
//! 5. print the tree with the [`printer`], consulting the binder through
//!    the [`oracle::TypeChecker`] trait.
//!
//! [`compile_definition_string`], [`compile_definition_file`] and
//! [`compile_definition_files`] wrap the whole pipeline.

pub mod compiler;
pub mod context;
pub mod helpers;
pub mod name_compat;
pub mod oracle;
pub mod printer;
pub mod transforms;
pub mod tree;

pub use compiler::{
    CompileError, CompileOutput, SourceMapper, compile_definition_file, compile_definition_files,
    compile_definition_string,
};
pub use context::CompileContext;
pub use name_compat::RenameTable;
pub use oracle::TypeChecker;
pub use printer::{Printer, is_substituted_name};
pub use tree::{TreeArena, TreeNode, TreeNodeId, TreeNodeKind};

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;

#[cfg(test)]
#[path = "tests/name_compat_tests.rs"]
mod name_compat_tests;

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod transform_tests;
