//! Grouping a file's statements into the declaration tree.

use super::{TreeArena, TreeNodeId, TreeNodeKind, UNNAMED_DECLARATION};
use crate::printer::Printer;
use flowgen_common::FlowgenError;
use flowgen_parser::{Node, NodeData, NodeFlags, NodeIndex};
use tracing::debug;

/// Where statements are being added.
#[derive(Clone)]
struct Scope {
    node: TreeNodeId,
    /// Flattened name of the enclosing namespace, empty outside one.
    prefix: String,
}

impl Scope {
    fn root() -> Scope {
        Scope {
            node: TreeArena::ROOT,
            prefix: String::new(),
        }
    }

    fn qualify(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}${name}", self.prefix)
        }
    }
}

impl<'a> Printer<'a> {
    /// Group the statements under `root` into a declaration tree.
    pub fn build_tree(&mut self, root: NodeIndex) -> TreeArena {
        let mut tree = TreeArena::new();
        let scope = Scope::root();
        for &statement in self.arena().statements(root) {
            self.add_statement(&mut tree, &scope, statement);
        }
        tree.absorb_namespaces();
        debug!(nodes = tree.len(), "declaration tree built");
        tree
    }

    fn add_statement(&mut self, tree: &mut TreeArena, scope: &Scope, statement: NodeIndex) {
        let arena = self.arena();
        let Some(node) = arena.get(statement) else {
            return;
        };
        match &node.data {
            NodeData::ModuleDeclaration { name, body } => {
                self.add_module(tree, scope, statement, node, *name, *body);
            }
            NodeData::FunctionDeclaration { name, .. } => {
                let name = match arena.identifier_text(*name) {
                    Some(text) => text.to_string(),
                    None => {
                        self.report(statement, FlowgenError::MissingFunctionName);
                        UNNAMED_DECLARATION.to_string()
                    }
                };
                let qualified = scope.qualify(&name);
                let key = format!("fn:{qualified}");
                match tree.child(scope.node, &key).and_then(|id| tree.get_mut(id)) {
                    Some(existing) => {
                        if let TreeNodeKind::FunctionGroup { overloads, .. } = &mut existing.kind {
                            overloads.push(statement);
                        }
                    }
                    None => {
                        tree.add_child(
                            scope.node,
                            key,
                            TreeNodeKind::FunctionGroup {
                                name,
                                qualified,
                                overloads: vec![statement],
                            },
                        );
                    }
                }
            }
            NodeData::InterfaceDeclaration { name, .. } => {
                let key = format!("prop:{}", scope.qualify(&self.name_or_unnamed(*name)));
                match tree.child(scope.node, &key).and_then(|id| tree.get_mut(id)) {
                    Some(existing) => match &mut existing.kind {
                        TreeNodeKind::Declaration { node, merged }
                            if matches!(
                                arena.data(*node),
                                Some(NodeData::InterfaceDeclaration { .. })
                            ) =>
                        {
                            merged.push(statement);
                        }
                        _ => debug!(key, "interface shares a name with an alias; kept the first"),
                    },
                    None => {
                        tree.add_child(scope.node, key, declaration(statement));
                    }
                }
            }
            NodeData::TypeAliasDeclaration { name, .. } => {
                let key = format!("prop:{}", scope.qualify(&self.name_or_unnamed(*name)));
                if tree.child(scope.node, &key).is_some() {
                    debug!(key, "duplicate type alias; kept the first");
                } else {
                    tree.add_child(scope.node, key, declaration(statement));
                }
            }
            NodeData::ClassDeclaration { name, .. } => {
                let name = match arena.identifier_text(*name) {
                    Some(text) => text.to_string(),
                    None => {
                        self.report(
                            statement,
                            FlowgenError::MissingSymbol {
                                description: "class declaration without a name".to_string(),
                            },
                        );
                        UNNAMED_DECLARATION.to_string()
                    }
                };
                let mut key = format!("class:{}", scope.qualify(&name));
                if tree.child(scope.node, &key).is_some() {
                    key = format!("{key}#{}", tree.len());
                }
                tree.add_child(scope.node, key, declaration(statement));
            }
            NodeData::EnumDeclaration { name, .. } => {
                let name = self.name_or_unnamed(*name);
                let key = format!("enum:{}", scope.qualify(&name));
                if tree.child(scope.node, &key).is_some() {
                    self.report(statement, FlowgenError::UnsupportedEnumMerging { name });
                } else {
                    tree.add_child(scope.node, key, declaration(statement));
                }
            }
            NodeData::VariableStatement { .. } => {
                tree.add_child(scope.node, format!("var#{}", tree.len()), declaration(statement));
            }
            NodeData::ImportDeclaration { .. } => {
                tree.add_child(
                    scope.node,
                    format!("import#{}", tree.len()),
                    TreeNodeKind::Import { node: statement },
                );
            }
            NodeData::ExportDeclaration { .. } => {
                tree.add_child(
                    scope.node,
                    format!("export#{}", tree.len()),
                    TreeNodeKind::Export { node: statement },
                );
            }
            NodeData::ExportAssignment { .. } => {
                tree.add_child(
                    scope.node,
                    format!("export=#{}", tree.len()),
                    TreeNodeKind::ExportAssignment { node: statement },
                );
            }
            NodeData::ImportEqualsDeclaration {
                module_reference, ..
            } => {
                let text = arena
                    .entity_name_text(*module_reference)
                    .unwrap_or_else(|| arena.kind_name(*module_reference).to_string());
                self.report(statement, FlowgenError::UnsupportedImportEquals { text });
            }
            NodeData::NamespaceExportDeclaration { .. } | NodeData::EmptyStatement => {}
            other => {
                let kind = other.kind_name().to_string();
                self.report(statement, FlowgenError::UnsupportedStatement { kind });
            }
        }
    }

    fn add_module(
        &mut self,
        tree: &mut TreeArena,
        scope: &Scope,
        statement: NodeIndex,
        node: &Node,
        name: NodeIndex,
        body: NodeIndex,
    ) {
        let arena = self.arena();
        let is_global = node.flags.contains(NodeFlags::GLOBAL_AUGMENTATION);
        if node.flags.contains(NodeFlags::NAMESPACE) && !is_global {
            let name = self.name_or_unnamed(name);
            let qualified = scope.qualify(&name);
            let key = format!("ns:{qualified}");
            let id = match tree.child(scope.node, &key) {
                Some(id) => id,
                None => tree.add_child(
                    scope.node,
                    key,
                    TreeNodeKind::Namespace {
                        name,
                        qualified: qualified.clone(),
                        declarations: Vec::new(),
                    },
                ),
            };
            if let Some(TreeNodeKind::Namespace { declarations, .. }) =
                tree.get_mut(id).map(|n| &mut n.kind)
            {
                declarations.push(statement);
            }
            let inner = Scope {
                node: id,
                prefix: qualified,
            };
            self.add_module_body(tree, &inner, body);
            return;
        }

        let module_name = if is_global {
            self.report(statement, FlowgenError::UnsupportedGlobalAugmentation);
            "global".to_string()
        } else {
            if scope.node != TreeArena::ROOT {
                self.report(statement, FlowgenError::UnsupportedNestedModule);
            }
            arena
                .string_literal_text(name)
                .or_else(|| arena.identifier_text(name))
                .unwrap_or_default()
                .to_string()
        };
        // Modules only live at the root; nested ones are hoisted.
        let key = format!("module:{module_name}");
        let id = match tree.child(TreeArena::ROOT, &key) {
            Some(id) => id,
            None => tree.add_child(
                TreeArena::ROOT,
                key,
                TreeNodeKind::Module { name: module_name },
            ),
        };
        let inner = Scope {
            node: id,
            prefix: String::new(),
        };
        self.add_module_body(tree, &inner, body);
    }

    fn add_module_body(&mut self, tree: &mut TreeArena, scope: &Scope, body: NodeIndex) {
        let arena = self.arena();
        match arena.data(body) {
            Some(NodeData::ModuleBlock { .. }) => {
                for &statement in arena.statements(body) {
                    self.add_statement(tree, scope, statement);
                }
            }
            // `namespace A.B {}`
            Some(NodeData::ModuleDeclaration { .. }) => self.add_statement(tree, scope, body),
            _ => {}
        }
    }

    fn name_or_unnamed(&self, name: NodeIndex) -> String {
        self.arena()
            .identifier_text(name)
            .unwrap_or(UNNAMED_DECLARATION)
            .to_string()
    }
}

fn declaration(node: NodeIndex) -> TreeNodeKind {
    TreeNodeKind::Declaration {
        node,
        merged: Vec::new(),
    }
}
