//! Binder state: symbol declaration into scopes and containers.

use crate::symbols::{SymbolArena, SymbolId, SymbolTable, symbol_flags};
use flowgen_parser::{ModifierFlags, NodeArena, NodeData, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Where a declaration is being bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    /// Top level of a script file; declarations are global.
    Script,
    /// Top level of an external module file.
    ExternalModule,
    /// Body of a namespace or `declare module "m"` block.
    Module(SymbolId),
    /// Body of `declare global { }`.
    Global,
}

pub(crate) struct BinderState<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) symbols: SymbolArena,
    pub(crate) globals: SymbolTable,
    pub(crate) ambient_modules: FxHashMap<String, SymbolId>,
    /// Declaration node (and declaration name node) -> symbol.
    pub(crate) node_symbols: FxHashMap<u32, SymbolId>,
    pub(crate) file_locals: Vec<SymbolTable>,
    pub(crate) file_symbols: Vec<Option<SymbolId>>,
    pub(crate) current_file: usize,
    pub(crate) in_lib: bool,
}

impl<'a> BinderState<'a> {
    pub(crate) fn new(arena: &'a NodeArena, file_count: usize) -> Self {
        BinderState {
            arena,
            symbols: SymbolArena::new(),
            globals: SymbolTable::new(),
            ambient_modules: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            file_locals: vec![SymbolTable::new(); file_count],
            file_symbols: vec![None; file_count],
            current_file: 0,
            in_lib: false,
        }
    }

    /// A file is an external module when any top-level statement imports or
    /// exports.
    pub(crate) fn is_external_module(arena: &NodeArena, root: NodeIndex) -> bool {
        arena.statements(root).iter().any(|&statement| {
            let Some(node) = arena.get(statement) else {
                return false;
            };
            match &node.data {
                NodeData::ImportDeclaration { .. }
                | NodeData::ExportDeclaration { .. }
                | NodeData::ExportAssignment { .. } => true,
                NodeData::ImportEqualsDeclaration {
                    module_reference, ..
                } => {
                    node.has_modifier(ModifierFlags::EXPORT)
                        || matches!(
                            arena.data(*module_reference),
                            Some(NodeData::ExternalModuleReference { .. })
                        )
                }
                _ => node.has_modifier(ModifierFlags::EXPORT),
            }
        })
    }

    pub(crate) fn bind_source_file(
        &mut self,
        file: usize,
        file_name: &str,
        root: NodeIndex,
        is_external: bool,
        is_lib: bool,
    ) {
        debug!(file = file_name, is_external, "binding source file");
        self.current_file = file;
        self.in_lib = is_lib;
        let container = if is_external {
            let file_symbol = self
                .symbols
                .alloc(symbol_flags::SOURCE_FILE | symbol_flags::VALUE_MODULE, file_name.to_string());
            if let Some(sym) = self.symbols.get_mut(file_symbol) {
                sym.declarations.push(root);
                sym.file = file;
            }
            self.file_symbols[file] = Some(file_symbol);
            self.node_symbols.insert(root.0, file_symbol);
            Container::ExternalModule
        } else {
            Container::Script
        };

        let statements = self.arena.statements(root).to_vec();
        for statement in statements {
            self.bind_statement(statement, container);
        }
        self.bind_nested_symbols(root);
    }

    /// Declare `name` in `container`, merging with an existing declaration of
    /// the same name.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        container: Container,
        is_exported: bool,
    ) -> SymbolId {
        let existing = self.lookup_in_container(name, container, is_exported);
        let id = match existing {
            Some(id) => {
                trace!(name, "merging declaration");
                id
            }
            None => {
                let id = self.symbols.alloc(symbol_flags::NONE, name.to_string());
                let parent = self.container_symbol(container);
                if let Some(sym) = self.symbols.get_mut(id) {
                    sym.parent = parent;
                    sym.is_lib = self.in_lib;
                    sym.file = self.current_file;
                }
                self.insert_in_container(name, id, container, is_exported);
                id
            }
        };
        self.add_declaration(id, flags, declaration);
        id
    }

    pub(crate) fn add_declaration(&mut self, id: SymbolId, flags: u32, declaration: NodeIndex) {
        if let Some(sym) = self.symbols.get_mut(id) {
            sym.flags |= flags;
            if declaration.is_some() {
                sym.declarations.push(declaration);
                if flags & symbol_flags::VALUE != 0 && sym.value_declaration.is_none() {
                    sym.value_declaration = declaration;
                }
            }
        }
        if declaration.is_some() {
            self.node_symbols.insert(declaration.0, id);
            if let Some(name) = self.arena.data(declaration).map(NodeData::name)
                && name.is_some()
            {
                self.node_symbols.insert(name.0, id);
            }
        }
    }

    pub(crate) fn container_symbol(&self, container: Container) -> Option<SymbolId> {
        match container {
            Container::Script | Container::Global => None,
            Container::ExternalModule => self.file_symbols[self.current_file],
            Container::Module(id) => Some(id),
        }
    }

    fn lookup_in_container(
        &self,
        name: &str,
        container: Container,
        is_exported: bool,
    ) -> Option<SymbolId> {
        match container {
            Container::Script | Container::Global => self.globals.get(name),
            Container::ExternalModule => self.file_locals[self.current_file].get(name),
            Container::Module(id) => {
                let sym = self.symbols.get(id)?;
                if is_exported {
                    sym.exports.get(name).or_else(|| sym.locals.get(name))
                } else {
                    sym.locals.get(name).or_else(|| sym.exports.get(name))
                }
            }
        }
    }

    fn insert_in_container(
        &mut self,
        name: &str,
        id: SymbolId,
        container: Container,
        is_exported: bool,
    ) {
        match container {
            Container::Script | Container::Global => self.globals.set(name.to_string(), id),
            Container::ExternalModule => {
                self.file_locals[self.current_file].set(name.to_string(), id);
                if is_exported {
                    self.add_export(container, name, id);
                }
            }
            Container::Module(module) => {
                if let Some(sym) = self.symbols.get_mut(module) {
                    if is_exported {
                        sym.exports.set(name.to_string(), id);
                    } else {
                        sym.locals.set(name.to_string(), id);
                    }
                }
            }
        }
    }

    /// Add `id` to the exports of `container` under `name`.
    pub(crate) fn add_export(&mut self, container: Container, name: &str, id: SymbolId) {
        let Some(module) = self.container_symbol(container) else {
            return;
        };
        if let Some(sym) = self.symbols.get_mut(module) {
            sym.exports.set(name.to_string(), id);
        }
    }

    pub(crate) fn container_exports_has(&self, container: Container, name: &str) -> bool {
        self.container_symbol(container)
            .and_then(|id| self.symbols.get(id))
            .is_some_and(|sym| sym.exports.has(name))
    }

    /// Declarations inside a namespace or module block are always visible
    /// through the container.
    pub(crate) fn is_exported_in(&self, node: NodeIndex, container: Container) -> bool {
        match container {
            Container::Module(_) => true,
            Container::ExternalModule => self
                .arena
                .get(node)
                .is_some_and(|n| n.has_modifier(ModifierFlags::EXPORT)),
            Container::Script | Container::Global => false,
        }
    }

    pub(crate) fn identifier_name(&self, node: NodeIndex) -> Option<String> {
        self.arena.identifier_text(node).map(str::to_string)
    }
}
