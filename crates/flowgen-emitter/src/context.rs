//! Per-compile state shared by tree building and printing.

use crate::name_compat::RenameTable;
use crate::oracle::TypeChecker;
use flowgen_common::Options;

/// Everything a compile of one file reads but never changes.
///
/// A fresh context is built for every file of a batch; the checker is shared
/// across the batch so cross-file references resolve.
pub struct CompileContext<'a> {
    pub checker: &'a dyn TypeChecker,
    pub options: &'a Options,
    /// Type aliases renamed because a value shares their name.
    pub renames: &'a RenameTable,
    /// Name reported in diagnostics.
    pub file_name: &'a str,
}

impl<'a> CompileContext<'a> {
    pub fn new(
        checker: &'a dyn TypeChecker,
        options: &'a Options,
        renames: &'a RenameTable,
        file_name: &'a str,
    ) -> Self {
        CompileContext {
            checker,
            options,
            renames,
            file_name,
        }
    }
}
