//! Flow text for declarations and type nodes.
//!
//! [`Printer`] walks the declaration tree built by
//! [`crate::tree`] and the syntax nodes it points at. Type nodes print to
//! strings so callers can combine them; declarations are written line by
//! line. Problems are recorded as diagnostics and replaced by a marked
//! fallback in the output, never by an early return.

mod declarations;
mod imports;
mod members;
mod qualifier;
mod statements;
mod substitution;
mod types;

use crate::context::CompileContext;
use crate::oracle::TypeChecker;
use flowgen_common::{Diagnostic, FlowgenError, Options};
use flowgen_parser::{NodeArena, NodeIndex};
use tracing::warn;

pub use substitution::is_substituted_name;

pub struct Printer<'a> {
    pub(crate) ctx: &'a CompileContext<'a>,
    /// Set once a conditional type printed through the `$FlowGen$If` helper.
    pub(crate) uses_conditional_helper: bool,
    /// Inside a class or interface heritage clause, where utility types keep
    /// their literal names.
    pub(crate) in_heritage: bool,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Printer<'a> {
    pub fn new(ctx: &'a CompileContext<'a>) -> Self {
        Printer {
            ctx,
            uses_conditional_helper: false,
            in_heritage: false,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn checker(&self) -> &'a dyn TypeChecker {
        self.ctx.checker
    }

    #[inline]
    pub(crate) fn arena(&self) -> &'a NodeArena {
        self.ctx.checker.arena()
    }

    #[inline]
    pub(crate) fn options(&self) -> &'a Options {
        self.ctx.options
    }

    pub fn uses_conditional_helper(&self) -> bool {
        self.uses_conditional_helper
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Record `error` against `node` and log it unless quiet.
    pub(crate) fn report(&mut self, node: NodeIndex, error: FlowgenError) {
        let checker = self.checker();
        let (start, length) = checker
            .arena()
            .get(node)
            .map(|n| (n.pos, n.end.saturating_sub(n.pos)))
            .unwrap_or((0, 0));
        let file = self.ctx.file_name;
        if !self.ctx.options.quiet {
            let (line, column) = checker
                .position_of(node)
                .map(|p| (p.line + 1, p.character + 1))
                .unwrap_or((0, 0));
            warn!(code = error.code(), "{file}:{line}:{column} - {error}");
        }
        self.diagnostics.push(Diagnostic::warning(
            file,
            start,
            length,
            error.to_string(),
            error.code(),
        ));
    }

    /// Object type with the given members; `inexact` picks `{ .., ... }`
    /// over `{| .. |}`.
    pub(crate) fn object_type(members: &[String], inexact: bool) -> String {
        match (members.is_empty(), inexact) {
            (true, true) => "{...}".to_string(),
            (true, false) => "{||}".to_string(),
            (false, true) => format!("{{ {}, ... }}", members.join(", ")),
            (false, false) => format!("{{| {} |}}", members.join(", ")),
        }
    }

    /// Object type using the configured exactness.
    pub(crate) fn default_object_type(&self, members: &[String]) -> String {
        Self::object_type(members, self.options().inexact)
    }

    /// Placeholder for a node that could not be translated.
    pub(crate) fn error_type(description: &str) -> String {
        format!(
            "($FlowFixMe /* flowgen-error: {} */)",
            description.replace("*/", "* /")
        )
    }
}

/// Double-quoted string literal with JSON escapes.
pub(crate) fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Single-quoted module specifier.
pub(crate) fn quote_single(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Indent every non-empty line of `text` by two spaces.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
