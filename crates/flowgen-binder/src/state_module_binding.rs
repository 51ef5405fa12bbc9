//! Module and namespace declaration binding.
//!
//! Handles namespaces (including dotted `A.B.C` chains), ambient external
//! modules (`declare module "m"`) and `declare global` blocks.

use crate::state::{BinderState, Container};
use crate::symbols::symbol_flags;
use flowgen_parser::{ModifierFlags, NodeArena, NodeData, NodeFlags, NodeIndex};
use tracing::trace;

impl BinderState<'_> {
    pub(crate) fn bind_module_declaration(&mut self, statement: NodeIndex, container: Container) {
        let arena = self.arena;
        let Some(node) = arena.get(statement) else {
            return;
        };
        let NodeData::ModuleDeclaration { name, body } = &node.data else {
            return;
        };

        if node.flags.contains(NodeFlags::GLOBAL_AUGMENTATION) {
            self.bind_module_body(*body, Container::Global);
            return;
        }

        if let Some(specifier) = arena.string_literal_text(*name) {
            // Ambient external module: merged by specifier across files.
            let id = match self.ambient_modules.get(specifier) {
                Some(&id) => id,
                None => {
                    let id = self
                        .symbols
                        .alloc(symbol_flags::VALUE_MODULE, specifier.to_string());
                    if let Some(sym) = self.symbols.get_mut(id) {
                        sym.is_lib = self.in_lib;
                        sym.file = self.current_file;
                    }
                    self.ambient_modules.insert(specifier.to_string(), id);
                    id
                }
            };
            trace!(specifier, "ambient module");
            self.add_declaration(id, symbol_flags::VALUE_MODULE, statement);
            self.bind_module_body(*body, Container::Module(id));
            return;
        }

        let Some(text) = self.identifier_name(*name) else {
            return;
        };
        let flags = if Self::is_instantiated_module(arena, statement) {
            symbol_flags::VALUE_MODULE
        } else {
            symbol_flags::NAMESPACE_MODULE
        };
        let is_exported = self.is_exported_in(statement, container)
            || node.flags.contains(NodeFlags::NESTED_NAMESPACE);
        let id = self.declare_symbol(&text, flags, statement, container, is_exported);
        self.bind_module_body(*body, Container::Module(id));
    }

    fn bind_module_body(&mut self, body: NodeIndex, container: Container) {
        match self.arena.data(body) {
            // `namespace A.B`: the inner declaration is the body.
            Some(NodeData::ModuleDeclaration { .. }) => self.bind_statement(body, container),
            Some(NodeData::ModuleBlock { statements }) => {
                for statement in statements.iter() {
                    self.bind_statement(statement, container);
                }
            }
            _ => {}
        }
    }

    /// A namespace is instantiated when it declares any value.
    pub(crate) fn is_instantiated_module(arena: &NodeArena, module: NodeIndex) -> bool {
        let Some(NodeData::ModuleDeclaration { body, .. }) = arena.data(module) else {
            return false;
        };
        match arena.data(*body) {
            Some(NodeData::ModuleDeclaration { .. }) => Self::is_instantiated_module(arena, *body),
            Some(NodeData::ModuleBlock { statements }) => statements
                .iter()
                .any(|statement| Self::is_value_statement(arena, statement)),
            _ => false,
        }
    }

    fn is_value_statement(arena: &NodeArena, statement: NodeIndex) -> bool {
        let Some(node) = arena.get(statement) else {
            return false;
        };
        match &node.data {
            NodeData::VariableStatement { .. }
            | NodeData::FunctionDeclaration { .. }
            | NodeData::ClassDeclaration { .. }
            | NodeData::ExportAssignment { .. } => true,
            NodeData::EnumDeclaration { .. } => !node.flags.contains(NodeFlags::CONST),
            NodeData::ModuleDeclaration { .. } => Self::is_instantiated_module(arena, statement),
            NodeData::ImportEqualsDeclaration { is_type_only, .. } => {
                !*is_type_only && node.has_modifier(ModifierFlags::EXPORT)
            }
            _ => false,
        }
    }
}
