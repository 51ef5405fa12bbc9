//! Declaration binding: statements, members, enums and nested type symbols.

use crate::state::{BinderState, Container};
use crate::symbols::{SymbolId, symbol_flags};
use flowgen_parser::{ModifierFlags, NodeData, NodeFlags, NodeIndex};

impl BinderState<'_> {
    pub(crate) fn bind_statement(&mut self, statement: NodeIndex, container: Container) {
        let Some(node) = self.arena.get(statement) else {
            return;
        };
        match &node.data {
            NodeData::InterfaceDeclaration { name, members, .. } => {
                let Some(text) = self.identifier_name(*name) else {
                    return;
                };
                let id = self.declare_named(&text, symbol_flags::INTERFACE, statement, container);
                let members = members.clone();
                self.bind_members(id, members.iter());
            }
            NodeData::TypeAliasDeclaration { name, .. } => {
                if let Some(text) = self.identifier_name(*name) {
                    self.declare_named(&text, symbol_flags::TYPE_ALIAS, statement, container);
                }
            }
            NodeData::ClassDeclaration { name, members, .. } => {
                let text = self
                    .identifier_name(*name)
                    .unwrap_or_else(|| "default".to_string());
                let id = self.declare_named(&text, symbol_flags::CLASS, statement, container);
                let members = members.clone();
                self.bind_members(id, members.iter());
            }
            NodeData::EnumDeclaration { name, members } => {
                let Some(text) = self.identifier_name(*name) else {
                    return;
                };
                let flags = if node.flags.contains(NodeFlags::CONST) {
                    symbol_flags::CONST_ENUM
                } else {
                    symbol_flags::REGULAR_ENUM
                };
                let id = self.declare_named(&text, flags, statement, container);
                let members = members.clone();
                self.bind_enum_members(id, members.iter());
            }
            NodeData::VariableStatement { declarations } => {
                let flags = if node
                    .flags
                    .intersects(NodeFlags::LET | NodeFlags::CONST)
                {
                    symbol_flags::BLOCK_SCOPED_VARIABLE
                } else {
                    symbol_flags::FUNCTION_SCOPED_VARIABLE
                };
                let is_exported = self.is_exported_in(statement, container);
                for declaration in declarations.iter() {
                    self.bind_variable_declaration(declaration, flags, container, is_exported);
                }
            }
            NodeData::FunctionDeclaration { name, .. } => {
                let text = self
                    .identifier_name(*name)
                    .unwrap_or_else(|| "default".to_string());
                self.declare_named(&text, symbol_flags::FUNCTION, statement, container);
            }
            NodeData::ModuleDeclaration { .. } => {
                self.bind_module_declaration(statement, container);
            }
            NodeData::ImportDeclaration { .. } => {
                self.bind_import_declaration(statement, container);
            }
            NodeData::ImportEqualsDeclaration { .. } => {
                self.bind_import_equals_declaration(statement, container);
            }
            NodeData::ExportDeclaration { .. } => {
                self.bind_export_declaration(statement, container);
            }
            NodeData::ExportAssignment { .. } => {
                self.bind_export_assignment(statement, container);
            }
            NodeData::NamespaceExportDeclaration { name } => {
                // `export as namespace X`: the module is also a global.
                if let (Some(text), Some(file_symbol)) = (
                    self.identifier_name(*name),
                    self.file_symbols[self.current_file],
                ) {
                    if !self.globals.has(&text) {
                        self.globals.set(text, file_symbol);
                    }
                }
            }
            _ => {}
        }
    }

    /// Declare a named declaration, routing `export default` to the
    /// container's `default` export.
    fn declare_named(
        &mut self,
        name: &str,
        flags: u32,
        statement: NodeIndex,
        container: Container,
    ) -> SymbolId {
        let is_default = self
            .arena
            .get(statement)
            .is_some_and(|n| n.has_modifier(ModifierFlags::DEFAULT));
        let is_exported = !is_default && self.is_exported_in(statement, container);
        let id = self.declare_symbol(name, flags, statement, container, is_exported);
        if is_default {
            self.add_export(container, "default", id);
        }
        id
    }

    fn bind_variable_declaration(
        &mut self,
        declaration: NodeIndex,
        flags: u32,
        container: Container,
        is_exported: bool,
    ) {
        let Some(NodeData::VariableDeclaration { name, .. }) = self.arena.data(declaration) else {
            return;
        };
        let name = *name;
        if let Some(text) = self.identifier_name(name) {
            self.declare_symbol(&text, flags, declaration, container, is_exported);
            return;
        }
        let mut names = Vec::new();
        self.collect_binding_identifiers(name, &mut names);
        for ident in names {
            if let Some(text) = self.identifier_name(ident) {
                self.declare_symbol(&text, flags, ident, container, is_exported);
            }
        }
    }

    fn collect_binding_identifiers(&self, pattern: NodeIndex, out: &mut Vec<NodeIndex>) {
        match self.arena.data(pattern) {
            Some(NodeData::Identifier { .. }) => out.push(pattern),
            Some(NodeData::ObjectBindingPattern { elements })
            | Some(NodeData::ArrayBindingPattern { elements }) => {
                for element in elements.iter() {
                    self.collect_binding_identifiers(element, out);
                }
            }
            Some(NodeData::BindingElement { name, .. }) => {
                self.collect_binding_identifiers(*name, out);
            }
            _ => {}
        }
    }

    /// Bind class, interface or type literal members into `owner.members`.
    pub(crate) fn bind_members(
        &mut self,
        owner: SymbolId,
        members: impl Iterator<Item = NodeIndex>,
    ) {
        for member in members {
            let Some(node) = self.arena.get(member) else {
                continue;
            };
            let (name, flags) = match &node.data {
                NodeData::PropertySignature { name, .. }
                | NodeData::PropertyDeclaration { name, .. } => (*name, symbol_flags::PROPERTY),
                NodeData::MethodSignature { name, .. }
                | NodeData::MethodDeclaration { name, .. } => (*name, symbol_flags::METHOD),
                NodeData::GetAccessor { name, .. } => (*name, symbol_flags::GET_ACCESSOR),
                NodeData::SetAccessor { name, .. } => (*name, symbol_flags::SET_ACCESSOR),
                _ => continue,
            };
            let Some(text) = self.arena.identifier_text(name).map(str::to_string) else {
                continue;
            };
            let existing = self.symbols.get(owner).and_then(|s| s.members.get(&text));
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = self.symbols.alloc(symbol_flags::NONE, text.clone());
                    if let Some(sym) = self.symbols.get_mut(id) {
                        sym.parent = Some(owner);
                        sym.is_lib = self.in_lib;
                        sym.file = self.current_file;
                    }
                    if let Some(owner_sym) = self.symbols.get_mut(owner) {
                        owner_sym.members.set(text, id);
                    }
                    id
                }
            };
            self.add_declaration(id, flags, member);
        }
    }

    fn bind_enum_members(&mut self, owner: SymbolId, members: impl Iterator<Item = NodeIndex>) {
        for member in members {
            let Some(NodeData::EnumMember { name, .. }) = self.arena.data(member) else {
                continue;
            };
            let Some(text) = self.arena.identifier_text(*name).map(str::to_string) else {
                continue;
            };
            let existing = self.symbols.get(owner).and_then(|s| s.exports.get(&text));
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = self.symbols.alloc(symbol_flags::NONE, text.clone());
                    if let Some(sym) = self.symbols.get_mut(id) {
                        sym.parent = Some(owner);
                        sym.is_lib = self.in_lib;
                        sym.file = self.current_file;
                    }
                    if let Some(owner_sym) = self.symbols.get_mut(owner) {
                        owner_sym.exports.set(text, id);
                    }
                    id
                }
            };
            self.add_declaration(id, symbol_flags::ENUM_MEMBER, member);
        }
    }

    /// Type literals and type parameters anywhere under `root` get their own
    /// symbols: literals own their members, type parameters shadow outer
    /// names.
    pub(crate) fn bind_nested_symbols(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            match self.arena.data(index) {
                Some(NodeData::TypeLiteral { members }) => {
                    let members = members.clone();
                    let id = self
                        .symbols
                        .alloc(symbol_flags::TYPE_LITERAL, "__type".to_string());
                    if let Some(sym) = self.symbols.get_mut(id) {
                        sym.declarations.push(index);
                        sym.is_lib = self.in_lib;
                        sym.file = self.current_file;
                    }
                    self.node_symbols.insert(index.0, id);
                    self.bind_members(id, members.iter());
                }
                Some(NodeData::TypeParameter { name, .. }) => {
                    if let Some(text) = self.identifier_name(*name) {
                        let id = self.symbols.alloc(symbol_flags::NONE, text);
                        if let Some(sym) = self.symbols.get_mut(id) {
                            sym.is_lib = self.in_lib;
                            sym.file = self.current_file;
                        }
                        self.add_declaration(id, symbol_flags::TYPE_PARAMETER, index);
                    }
                }
                _ => {}
            }
            stack.extend(self.arena.children(index));
        }
    }
}
