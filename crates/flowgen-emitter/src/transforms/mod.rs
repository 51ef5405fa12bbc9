//! Rewrites applied to each user file between parsing and binding.
//!
//! The passes run in a fixed order: legacy `module` normalization,
//! `import X = ...` desugaring, the optional whole-file module wrap and
//! finally `import("m")` type elimination. Each pass builds new nodes and
//! leaves the parsed tree untouched, so the binder only ever sees the
//! rewritten root.

mod as_module;
mod import_equals;
mod import_types;
mod legacy_modules;

pub use import_types::import_identifier;

use crate::compiler::CompileError;
use flowgen_binder::ProgramBuilder;
use flowgen_common::Options;
use tracing::debug;

/// Run every pass over `file` and install the rewritten root.
pub fn transform_file(
    builder: &mut ProgramBuilder,
    file: usize,
    options: &Options,
) -> Result<(), CompileError> {
    let Some(original) = builder.file(file).map(|f| f.root) else {
        return Ok(());
    };
    let arena = builder.arena_mut();
    let mut root = legacy_modules::normalize(arena, original);
    root = import_equals::desugar(arena, root);
    if let Some(name) = options.as_module.as_deref() {
        root = as_module::wrap(arena, root, name);
    }
    root = import_types::eliminate(arena, root)?;
    if root != original {
        debug!(file, "file rewritten by transforms");
    }
    builder.set_file_root(file, root);
    Ok(())
}
