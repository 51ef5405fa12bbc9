//! Renames that keep type and value namespaces apart.
//!
//! TypeScript lets a type alias share its name with a value:
//!
//! ```typescript
//! declare const Status: { readonly Ok: 200 };
//! type Status = 200 | 404;
//! ```
//!
//! Flow has one namespace for both, so the alias becomes `StatusType` (with
//! a numeric suffix when that is taken) and every reference follows.

use crate::oracle::TypeChecker;
use flowgen_binder::{SymbolId, symbol_flags};
use flowgen_parser::{NodeData, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct RenameTable {
    names: FxHashMap<SymbolId, String>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Printed name of `id` when it was renamed.
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Scan the file at `root` for aliases that collide with a value.
    pub fn build(checker: &dyn TypeChecker, root: NodeIndex) -> RenameTable {
        let arena = checker.arena();
        let mut used: FxHashSet<String> = FxHashSet::default();
        let mut aliases = Vec::new();

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match arena.data(node) {
                Some(NodeData::Identifier { text }) => {
                    used.insert(text.clone());
                }
                Some(NodeData::TypeAliasDeclaration { .. }) => aliases.push(node),
                _ => {}
            }
            stack.extend(arena.children(node));
        }
        // Source order keeps suffixes stable.
        aliases.sort();

        let mut table = RenameTable::new();
        for alias in aliases {
            let Some(id) = checker.symbol_at_location(alias) else {
                continue;
            };
            let Some(symbol) = checker.symbol(id) else {
                continue;
            };
            if table.names.contains_key(&id)
                || symbol.flags & symbol_flags::VALUE == 0
                || symbol.declarations.len() < 2
            {
                continue;
            }
            let base = format!("{}Type", symbol.name);
            let mut candidate = base.clone();
            let mut suffix = 1;
            while used.contains(&candidate) {
                candidate = format!("{base}{suffix}");
                suffix += 1;
            }
            debug!(from = %symbol.name, to = %candidate, "renaming type alias");
            used.insert(candidate.clone());
            table.names.insert(id, candidate);
        }
        table
    }
}
