//! Import and export declaration binding.
//!
//! Imports and re-exports become `ALIAS` symbols; resolution to their targets
//! happens lazily in the program.

use crate::state::{BinderState, Container};
use crate::symbols::{SymbolId, symbol_flags};
use flowgen_parser::{ModifierFlags, NodeData, NodeIndex};

/// What an alias points at.
enum AliasTarget {
    /// `name` exported from module `specifier`; `None` is the whole module.
    Module {
        specifier: String,
        name: Option<String>,
    },
    /// A local entity name.
    Entity(NodeIndex),
}

impl BinderState<'_> {
    pub(crate) fn bind_import_declaration(&mut self, statement: NodeIndex, container: Container) {
        let arena = self.arena;
        let Some(NodeData::ImportDeclaration {
            import_clause,
            module_specifier,
        }) = arena.data(statement)
        else {
            return;
        };
        let Some(specifier) = arena.string_literal_text(*module_specifier) else {
            return;
        };
        let Some(NodeData::ImportClause {
            is_type_only,
            name,
            named_bindings,
        }) = arena.data(*import_clause)
        else {
            // Side-effect import.
            return;
        };

        if let Some(text) = arena.identifier_text(*name) {
            self.declare_alias(
                text,
                *name,
                container,
                false,
                *is_type_only,
                AliasTarget::Module {
                    specifier: specifier.to_string(),
                    name: Some("default".to_string()),
                },
            );
        }

        match arena.data(*named_bindings) {
            Some(NodeData::NamespaceImport { name: ns_name }) => {
                if let Some(text) = arena.identifier_text(*ns_name) {
                    self.declare_alias(
                        text,
                        *named_bindings,
                        container,
                        false,
                        *is_type_only,
                        AliasTarget::Module {
                            specifier: specifier.to_string(),
                            name: None,
                        },
                    );
                }
            }
            Some(NodeData::NamedImports { elements }) => {
                for element in elements.iter() {
                    let Some(NodeData::ImportSpecifier {
                        is_type_only: specifier_type_only,
                        property_name,
                        name: local,
                    }) = arena.data(element)
                    else {
                        continue;
                    };
                    let Some(local_text) = arena.identifier_text(*local) else {
                        continue;
                    };
                    let imported = arena
                        .identifier_text(*property_name)
                        .unwrap_or(local_text)
                        .to_string();
                    self.declare_alias(
                        local_text,
                        element,
                        container,
                        false,
                        *is_type_only || *specifier_type_only,
                        AliasTarget::Module {
                            specifier: specifier.to_string(),
                            name: Some(imported),
                        },
                    );
                }
            }
            _ => {}
        }
    }

    pub(crate) fn bind_import_equals_declaration(
        &mut self,
        statement: NodeIndex,
        container: Container,
    ) {
        let arena = self.arena;
        let Some(node) = arena.get(statement) else {
            return;
        };
        let NodeData::ImportEqualsDeclaration {
            is_type_only,
            name,
            module_reference,
        } = &node.data
        else {
            return;
        };
        let Some(text) = arena.identifier_text(*name) else {
            return;
        };
        let target = match arena.data(*module_reference) {
            Some(NodeData::ExternalModuleReference { expression }) => {
                let Some(specifier) = arena.string_literal_text(*expression) else {
                    return;
                };
                AliasTarget::Module {
                    specifier: specifier.to_string(),
                    name: None,
                }
            }
            _ => AliasTarget::Entity(*module_reference),
        };
        let is_exported = node.has_modifier(ModifierFlags::EXPORT);
        self.declare_alias(text, statement, container, is_exported, *is_type_only, target);
    }

    pub(crate) fn bind_export_declaration(&mut self, statement: NodeIndex, container: Container) {
        let arena = self.arena;
        let Some(NodeData::ExportDeclaration {
            is_type_only,
            export_clause,
            module_specifier,
        }) = arena.data(statement)
        else {
            return;
        };
        let specifier = arena.string_literal_text(*module_specifier);

        match arena.data(*export_clause) {
            None => {
                // `export * from "m"`
                if let (Some(specifier), Some(module)) =
                    (specifier, self.container_symbol(container))
                {
                    if let Some(sym) = self.symbols.get_mut(module) {
                        sym.export_stars.push(specifier.to_string());
                    }
                }
            }
            Some(NodeData::NamespaceExport { name }) => {
                if let (Some(text), Some(specifier)) = (arena.identifier_text(*name), specifier) {
                    self.declare_export_alias(
                        text,
                        *export_clause,
                        container,
                        *is_type_only,
                        AliasTarget::Module {
                            specifier: specifier.to_string(),
                            name: None,
                        },
                    );
                }
            }
            Some(NodeData::NamedExports { elements }) => {
                for element in elements.iter() {
                    let Some(NodeData::ExportSpecifier {
                        is_type_only: specifier_type_only,
                        property_name,
                        name,
                    }) = arena.data(element)
                    else {
                        continue;
                    };
                    let Some(exported) = arena.identifier_text(*name) else {
                        continue;
                    };
                    let local_node = if property_name.is_some() {
                        *property_name
                    } else {
                        *name
                    };
                    let type_only = *is_type_only || *specifier_type_only;
                    match specifier {
                        Some(specifier) => {
                            let imported = arena.identifier_text(local_node).unwrap_or(exported);
                            self.declare_export_alias(
                                exported,
                                element,
                                container,
                                type_only,
                                AliasTarget::Module {
                                    specifier: specifier.to_string(),
                                    name: Some(imported.to_string()),
                                },
                            );
                        }
                        None => {
                            // Re-exporting a local under its own name inside a
                            // module block is already covered by the local.
                            if property_name.is_none()
                                && matches!(container, Container::Module(_))
                                && self.container_exports_has(container, exported)
                            {
                                continue;
                            }
                            self.declare_export_alias(
                                exported,
                                element,
                                container,
                                type_only,
                                AliasTarget::Entity(local_node),
                            );
                        }
                    }
                }
            }
            _ => {}
        }
    }

    pub(crate) fn bind_export_assignment(&mut self, statement: NodeIndex, container: Container) {
        let Some(NodeData::ExportAssignment {
            is_export_equals,
            expression,
        }) = self.arena.data(statement)
        else {
            return;
        };
        let name = if *is_export_equals { "export=" } else { "default" };
        let target = match self.arena.data(*expression) {
            Some(NodeData::Identifier { .. })
            | Some(NodeData::QualifiedName { .. })
            | Some(NodeData::PropertyAccessExpression { .. }) => AliasTarget::Entity(*expression),
            _ => return,
        };
        self.declare_export_alias(name, statement, container, false, target);
    }

    fn declare_alias(
        &mut self,
        name: &str,
        declaration: NodeIndex,
        container: Container,
        is_exported: bool,
        is_type_only: bool,
        target: AliasTarget,
    ) -> SymbolId {
        let id = self.declare_symbol(
            name,
            symbol_flags::ALIAS,
            declaration,
            container,
            is_exported,
        );
        self.set_alias_target(id, is_type_only, target);
        id
    }

    /// Export-only alias: lands in the container's exports, never in its
    /// locals.
    fn declare_export_alias(
        &mut self,
        name: &str,
        declaration: NodeIndex,
        container: Container,
        is_type_only: bool,
        target: AliasTarget,
    ) {
        let Some(module) = self.container_symbol(container) else {
            return;
        };
        let id = self.symbols.alloc(symbol_flags::NONE, name.to_string());
        if let Some(sym) = self.symbols.get_mut(id) {
            sym.parent = Some(module);
            sym.is_lib = self.in_lib;
            sym.file = self.current_file;
        }
        self.add_declaration(id, symbol_flags::ALIAS, declaration);
        self.add_export(container, name, id);
        self.set_alias_target(id, is_type_only, target);
    }

    fn set_alias_target(&mut self, id: SymbolId, is_type_only: bool, target: AliasTarget) {
        let Some(sym) = self.symbols.get_mut(id) else {
            return;
        };
        sym.is_type_only = is_type_only;
        match target {
            AliasTarget::Module { specifier, name } => {
                sym.import_module = Some(specifier);
                sym.import_name = name;
            }
            AliasTarget::Entity(node) => sym.alias_target = node,
        }
    }
}
