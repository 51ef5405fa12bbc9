//! Name binding and symbol resolution for TypeScript declaration files.
//!
//! [`ProgramBuilder`] parses the embedded library and user files into one
//! arena; [`ProgramBuilder::build`] binds them into a [`Program`] that answers
//! the symbol questions the emitter asks: what does this name refer to,
//! which module does this import come from, is this symbol a class.

pub mod lib_loader;
pub mod program;
mod resolution;
mod state;
mod state_binding;
mod state_import_export;
mod state_module_binding;
pub mod symbols;

pub use lib_loader::{LIB_FILE_NAME, UTILITY_TYPE_NAMES, is_lib_file_name, is_utility_type_name};
pub use program::{Program, ProgramBuilder, SourceFileInfo};
pub use symbols::{Symbol, SymbolId, SymbolTable, symbol_flags};

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod binder_tests;

#[cfg(test)]
#[path = "tests/resolution_tests.rs"]
mod resolution_tests;
