//! Flattened names for symbols declared inside namespaces and enums.
//!
//! Flow declarations cannot nest namespaces, so a symbol `I` declared in
//! `namespace A.B` prints as `A$B$I`. Enum members keep a `.` (they are
//! properties of the lowered enum object), and inside a `typeof` chain so do
//! class members and properties of a variable's type literal.

use super::Printer;
use flowgen_binder::{Symbol, SymbolId, symbol_flags};
use flowgen_common::limits::MAX_QUALIFY_DEPTH;
use flowgen_parser::{NodeData, NodeFlags, NodeIndex};

/// Names exported by `react` under a different name in Flow's React typings.
const REACT_RENAMES: &[(&str, &str)] = &[("ReactElement", "Element"), ("ReactNode", "Node")];

const REACT_MODULE: &str = "react";

pub(crate) fn react_rename(name: &str) -> Option<&'static str> {
    REACT_RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

impl<'a> Printer<'a> {
    /// Spelling of the entity name at a type reference, heritage clause or
    /// `typeof` site.
    pub(crate) fn print_entity(&self, name: NodeIndex, in_typeof: bool) -> String {
        let checker = self.checker();
        if self.is_external_entity(name) {
            return self.entity_as_written(name);
        }
        match checker.symbol_at_location(name) {
            Some(id) => self.qualify(checker.resolve_alias(id), in_typeof),
            None => self.entity_as_written(name),
        }
    }

    /// Unresolved names, names rooted at an import binding and type
    /// parameters print exactly as written.
    fn is_external_entity(&self, name: NodeIndex) -> bool {
        let checker = self.checker();
        let leftmost = self.arena().leftmost_identifier(name);
        match checker
            .symbol_at_location(leftmost)
            .and_then(|id| checker.symbol(id))
        {
            None => true,
            Some(symbol) => {
                symbol.import_module.is_some()
                    || symbol.has_any_flags(symbol_flags::TYPE_PARAMETER)
            }
        }
    }

    pub(crate) fn entity_as_written(&self, name: NodeIndex) -> String {
        let arena = self.arena();
        match arena.data(name) {
            Some(NodeData::QualifiedName { left, right })
            | Some(NodeData::PropertyAccessExpression {
                expression: left,
                name: right,
            }) => {
                let right_text = arena.identifier_text(*right).unwrap_or_default();
                let right_text = if self.is_react_namespace(*left) {
                    react_rename(right_text).unwrap_or(right_text)
                } else {
                    right_text
                };
                format!("{}.{right_text}", self.entity_as_written(*left))
            }
            Some(NodeData::Identifier { text }) => {
                if self.is_react_named_import(name) {
                    react_rename(text).unwrap_or(text).to_string()
                } else {
                    text.clone()
                }
            }
            _ => arena.entity_name_text(name).unwrap_or_default(),
        }
    }

    /// `React` in `React.ReactNode` when bound by `import * as React from 'react'`.
    fn is_react_namespace(&self, node: NodeIndex) -> bool {
        let checker = self.checker();
        matches!(self.arena().data(node), Some(NodeData::Identifier { .. }))
            && checker
                .symbol_at_location(node)
                .and_then(|id| checker.symbol(id))
                .is_some_and(|s| {
                    s.import_module.as_deref() == Some(REACT_MODULE) && s.import_name.is_none()
                })
    }

    fn is_react_named_import(&self, node: NodeIndex) -> bool {
        let checker = self.checker();
        checker
            .symbol_at_location(node)
            .and_then(|id| checker.symbol(id))
            .is_some_and(|s| {
                s.import_module.as_deref() == Some(REACT_MODULE)
                    && s.import_name.as_deref().is_some_and(|n| n != "default")
            })
    }

    /// Flattened name of `id`. Each call recomputes the name from the symbol
    /// chain, so repeated calls agree.
    pub(crate) fn qualify(&self, id: SymbolId, in_typeof: bool) -> String {
        self.qualify_worker(id, in_typeof, 0)
    }

    fn qualify_worker(&self, id: SymbolId, in_typeof: bool, depth: u32) -> String {
        let checker = self.checker();
        let Some(symbol) = checker.symbol(id) else {
            return String::new();
        };
        // `typeof X` names the value, which keeps its spelling.
        let renamed = if in_typeof { None } else { self.ctx.renames.get(id) };
        let own = renamed.unwrap_or(symbol.name.as_str()).to_string();
        if depth >= MAX_QUALIFY_DEPTH {
            return own;
        }
        let Some(mut parent_id) = symbol.parent else {
            return own;
        };
        if in_typeof
            && let Some(owner) = self.type_literal_owner(parent_id)
        {
            parent_id = owner;
        }
        let Some(parent) = checker.symbol(parent_id) else {
            return own;
        };
        if self.is_module_scope(parent) {
            return own;
        }
        let delimiter = if symbol.has_any_flags(symbol_flags::ENUM_MEMBER)
            || (in_typeof && symbol.has_any_flags(symbol_flags::CLASS_MEMBER))
        {
            "."
        } else {
            "$"
        };
        format!(
            "{}{delimiter}{own}",
            self.qualify_worker(parent_id, in_typeof, depth + 1)
        )
    }

    /// For a type literal symbol, the variable or property whose annotation
    /// it is.
    fn type_literal_owner(&self, id: SymbolId) -> Option<SymbolId> {
        let checker = self.checker();
        let symbol = checker.symbol(id)?;
        if !symbol.has_any_flags(symbol_flags::TYPE_LITERAL) {
            return None;
        }
        let owner = checker.parent_node(symbol.first_declaration());
        checker.symbol_at_location(owner)
    }

    /// Source files and string-named modules scope their declarations
    /// without a prefix.
    fn is_module_scope(&self, symbol: &Symbol) -> bool {
        if symbol.has_any_flags(symbol_flags::SOURCE_FILE) {
            return true;
        }
        if !symbol.has_any_flags(symbol_flags::MODULE) {
            return false;
        }
        let declaration = symbol.first_declaration();
        self.arena().get(declaration).is_some_and(|node| {
            matches!(node.data, NodeData::ModuleDeclaration { .. })
                && !node.flags.contains(NodeFlags::NAMESPACE)
        })
    }
}
