//! Printing the declaration tree: modules, namespaces and the join rules
//! between top-level entries.

use super::{Printer, indent, quote_single};
use crate::tree::{TreeArena, TreeNodeId, TreeNodeKind};
use flowgen_parser::{ModifierFlags, NodeData, NodeIndex};

/// Where a tree node is being printed.
#[derive(Clone, Default)]
pub(crate) struct PrintScope {
    /// Flattened namespace name members print under, empty outside one.
    pub(crate) prefix: String,
    /// Inside `declare module '...' {}`.
    pub(crate) in_module: bool,
    /// Inside a namespace, where `export` is dropped.
    pub(crate) in_namespace: bool,
}

impl PrintScope {
    pub(crate) fn qualify(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}${name}", self.prefix)
        }
    }
}

impl<'a> Printer<'a> {
    /// Flow text for every entry of `tree`, without the helper block.
    pub fn print_tree(&mut self, tree: &TreeArena) -> String {
        self.print_children(tree, TreeArena::ROOT, &PrintScope::default())
    }

    /// Entries separated by a blank line; runs of imports stay together.
    fn print_children(&mut self, tree: &TreeArena, parent: TreeNodeId, scope: &PrintScope) -> String {
        let mut out = String::new();
        let mut previous_import = false;
        for child in tree.children(parent) {
            let text = self.print_tree_node(tree, child, scope);
            if text.is_empty() {
                continue;
            }
            let is_import = matches!(
                tree.get(child).map(|n| &n.kind),
                Some(TreeNodeKind::Import { .. })
            );
            if !out.is_empty() {
                out.push_str(if is_import && previous_import { "\n" } else { "\n\n" });
            }
            out.push_str(&text);
            previous_import = is_import;
        }
        out
    }

    fn print_tree_node(&mut self, tree: &TreeArena, id: TreeNodeId, scope: &PrintScope) -> String {
        let Some(entry) = tree.get(id) else {
            return String::new();
        };
        match &entry.kind {
            TreeNodeKind::Root => self.print_children(tree, id, scope),
            TreeNodeKind::Module { name } => {
                let inner = PrintScope {
                    prefix: String::new(),
                    in_module: true,
                    in_namespace: false,
                };
                let body = self.print_children(tree, id, &inner);
                if body.is_empty() {
                    format!("declare module {} {{}}", quote_single(name))
                } else {
                    format!("declare module {} {{\n{}\n}}", quote_single(name), indent(&body))
                }
            }
            TreeNodeKind::Namespace { .. } => self.print_namespace(tree, id, scope),
            TreeNodeKind::Declaration { node, merged } => {
                let statics = match entry.absorbed {
                    Some(namespace) => self.namespace_value_members(tree, namespace),
                    None => Vec::new(),
                };
                self.print_declaration(*node, merged, &statics, scope)
            }
            TreeNodeKind::FunctionGroup {
                name, overloads, ..
            } => {
                if entry.suppressed {
                    return String::new();
                }
                self.function_group(name, overloads, scope)
            }
            TreeNodeKind::Import { node } => self.print_import(*node, scope),
            TreeNodeKind::Export { node } => self.print_export(*node, scope),
            TreeNodeKind::ExportAssignment { node } => self.print_export_assignment(*node),
        }
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    /// The value object (unless folded into a class or enum) followed by the
    /// members under their flattened names.
    fn print_namespace(&mut self, tree: &TreeArena, id: TreeNodeId, scope: &PrintScope) -> String {
        let Some(entry) = tree.get(id) else {
            return String::new();
        };
        let TreeNodeKind::Namespace {
            qualified,
            declarations,
            ..
        } = &entry.kind
        else {
            return String::new();
        };
        let mut parts = Vec::new();
        if !entry.suppressed
            && let Some(object) = self.namespace_object(tree, id, qualified, declarations, scope)
        {
            parts.push(object);
        }
        let inner = PrintScope {
            prefix: qualified.clone(),
            in_module: scope.in_module,
            in_namespace: true,
        };
        let body = self.print_children(tree, id, &inner);
        if !body.is_empty() {
            parts.push(body);
        }
        parts.join("\n\n")
    }

    /// `declare var N: {| k: typeof N$k |};`, or `None` for a namespace
    /// holding only types.
    fn namespace_object(
        &mut self,
        tree: &TreeArena,
        id: TreeNodeId,
        qualified: &str,
        declarations: &[NodeIndex],
        scope: &PrintScope,
    ) -> Option<String> {
        let mut members = Vec::new();
        if let Some(group) = tree.get(id).and_then(|n| n.absorbed)
            && let Some(TreeNodeKind::FunctionGroup { overloads, .. }) = tree.get(group).map(|n| &n.kind)
        {
            for &overload in overloads {
                members.push(self.call_signature(overload));
            }
        }
        members.extend(self.namespace_value_members(tree, id));
        if members.is_empty() {
            return None;
        }
        let arena = self.arena();
        let exported = !scope.in_namespace
            && declarations
                .iter()
                .any(|&d| arena.get(d).is_some_and(|n| n.has_modifier(ModifierFlags::EXPORT)));
        let modifier = if exported { "declare export " } else { "declare " };
        Some(format!(
            "{modifier}var {qualified}: {};",
            Self::object_type(&members, false)
        ))
    }

    /// `k: typeof N$k` for every value the namespace `id` declares.
    pub(crate) fn namespace_value_members(&self, tree: &TreeArena, id: TreeNodeId) -> Vec<String> {
        let arena = self.arena();
        let mut members = Vec::new();
        let Some(TreeNodeKind::Namespace { qualified, .. }) = tree.get(id).map(|n| &n.kind) else {
            return members;
        };
        let mut push = |name: &str| {
            members.push(format!("{name}: typeof {qualified}${name}"));
        };
        for child in tree.children(id) {
            let Some(entry) = tree.get(child) else {
                continue;
            };
            match &entry.kind {
                TreeNodeKind::FunctionGroup { name, .. } if !entry.suppressed => push(name),
                TreeNodeKind::Namespace { name, .. } => {
                    if !entry.suppressed && self.namespace_has_value(tree, child) {
                        push(name);
                    }
                }
                TreeNodeKind::Declaration { node, .. } => match arena.data(*node) {
                    Some(NodeData::ClassDeclaration { name, .. } | NodeData::EnumDeclaration { name, .. }) => {
                        if let Some(text) = arena.identifier_text(*name) {
                            push(text);
                        }
                    }
                    Some(NodeData::VariableStatement { declarations }) => {
                        for declaration in declarations.iter() {
                            if let Some(NodeData::VariableDeclaration { name, .. }) = arena.data(declaration)
                                && let Some(text) = arena.identifier_text(*name)
                            {
                                push(text);
                            }
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        members
    }

    /// Whether the namespace `id` prints a value object.
    fn namespace_has_value(&self, tree: &TreeArena, id: TreeNodeId) -> bool {
        tree.get(id).is_some_and(|n| n.absorbed.is_some())
            || !self.namespace_value_members(tree, id).is_empty()
    }
}
