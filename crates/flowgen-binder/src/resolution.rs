//! Name, member, alias and module resolution over a bound [`Program`].

use crate::program::{Program, normalize_path};
use crate::symbols::{SymbolId, symbol_flags};
use flowgen_common::limits::{MAX_ALIAS_CHAIN, MAX_QUALIFY_DEPTH};
use flowgen_parser::{NodeData, NodeIndex};
use tracing::trace;

/// Extensions tried, in order, when resolving a relative module specifier.
const MODULE_SUFFIXES: &[&str] = &["", ".d.ts", ".ts", "/index.d.ts", "/index.ts"];

impl Program {
    /// Symbol referenced (or declared) at `node`.
    ///
    /// Handles declaration names, identifiers in type and value positions,
    /// the right side of qualified names and import/export specifiers.
    pub fn symbol_at_location(&self, node: NodeIndex) -> Option<SymbolId> {
        if let Some(id) = self.node_symbol(node) {
            return Some(id);
        }
        match self.arena.data(node)? {
            NodeData::Identifier { text } => {
                let parent = self.parent_node(node);
                match self.arena.data(parent) {
                    Some(NodeData::QualifiedName { left, right }) if *right == node => {
                        let container = self.symbol_at_location(*left)?;
                        self.get_member(container, text)
                    }
                    Some(NodeData::PropertyAccessExpression { expression, name })
                        if *name == node =>
                    {
                        let container = self.symbol_at_location(*expression)?;
                        self.get_member(container, text)
                    }
                    // Specifier names go through the specifier's alias.
                    Some(NodeData::ExportSpecifier { .. }) | Some(NodeData::ImportSpecifier { .. }) => {
                        self.node_symbol(parent)
                            .or_else(|| self.resolve_name(text, node))
                    }
                    _ => self.resolve_name(text, node),
                }
            }
            NodeData::QualifiedName { right, .. } => self.symbol_at_location(*right),
            NodeData::PropertyAccessExpression { name, .. } => self.symbol_at_location(*name),
            NodeData::ExpressionWithTypeArguments { expression, .. } => {
                self.symbol_at_location(*expression)
            }
            NodeData::TypeReference { type_name, .. } => self.symbol_at_location(*type_name),
            NodeData::TypeQuery { expr_name, .. } => self.symbol_at_location(*expr_name),
            _ => None,
        }
    }

    /// Resolve an entity name purely by scope, ignoring any symbol the name
    /// node itself declares.
    pub fn resolve_entity(&self, node: NodeIndex) -> Option<SymbolId> {
        match self.arena.data(node)? {
            NodeData::Identifier { text } => self.resolve_name(text, node),
            NodeData::QualifiedName { left, right } => {
                let container = self.resolve_entity(*left)?;
                self.get_member(container, self.arena.identifier_text(*right)?)
            }
            NodeData::PropertyAccessExpression { expression, name } => {
                let container = self.resolve_entity(*expression)?;
                self.get_member(container, self.arena.identifier_text(*name)?)
            }
            _ => None,
        }
    }

    /// Look `name` up in the scopes enclosing `location`: type parameters,
    /// `infer` declarations, namespace bodies, the file, then globals.
    pub fn resolve_name(&self, name: &str, location: NodeIndex) -> Option<SymbolId> {
        let mut child = location;
        let mut current = self.parent_node(location);
        while current.is_some() {
            let Some(data) = self.arena.data(current) else {
                break;
            };
            if let Some(type_parameters) = data.type_parameters() {
                for parameter in type_parameters.iter() {
                    if self.arena.declaration_name(parameter) == Some(name) {
                        return self.node_symbol(parameter);
                    }
                }
            }
            match data {
                NodeData::MappedType { type_parameter, .. } => {
                    if self.arena.declaration_name(*type_parameter) == Some(name) {
                        return self.node_symbol(*type_parameter);
                    }
                }
                NodeData::ConditionalType {
                    extends_type,
                    true_type,
                    ..
                } if *true_type == child => {
                    if let Some(found) = self.find_infer_declaration(*extends_type, name) {
                        return Some(found);
                    }
                }
                NodeData::ModuleDeclaration { .. } => {
                    if let Some(module) = self.node_symbol(current).and_then(|id| self.symbol(id)) {
                        if let Some(found) =
                            module.exports.get(name).or_else(|| module.locals.get(name))
                        {
                            return Some(found);
                        }
                    }
                }
                NodeData::SourceFile { .. } => {
                    if let Some(file) = self.file_by_root.get(&current.0).and_then(|f| self.files.get(*f)) {
                        if let Some(found) = file.locals.get(name) {
                            return Some(found);
                        }
                    }
                    break;
                }
                _ => {}
            }
            child = current;
            current = self.parent_node(current);
        }
        self.globals.get(name)
    }

    fn find_infer_declaration(&self, root: NodeIndex, name: &str) -> Option<SymbolId> {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if let Some(NodeData::InferType { type_parameter }) = self.arena.data(index) {
                if self.arena.declaration_name(*type_parameter) == Some(name) {
                    return self.node_symbol(*type_parameter);
                }
            }
            stack.extend(self.arena.children(index));
        }
        None
    }

    /// `container.name`: namespace and module exports, enum members, class
    /// and interface members, and members of a variable's declared type.
    pub fn get_member(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        self.get_member_worker(container, name, 0)
    }

    fn get_member_worker(&self, container: SymbolId, name: &str, depth: u32) -> Option<SymbolId> {
        if depth > MAX_QUALIFY_DEPTH {
            return None;
        }
        let target = self.resolve_alias(container);
        if let Some(found) = self.get_export_of(target, name) {
            return Some(found);
        }
        let symbol = self.symbol(target)?;
        if let Some(found) = symbol.members.get(name) {
            return Some(found);
        }
        if !symbol.has_any_flags(symbol_flags::VARIABLE | symbol_flags::PROPERTY) {
            return None;
        }
        // `typeof x.o.f`: walk through the declared type of `x`.
        let declaration = if symbol.value_declaration.is_some() {
            symbol.value_declaration
        } else {
            symbol.first_declaration()
        };
        let type_node = match self.arena.data(declaration)? {
            NodeData::VariableDeclaration { type_node, .. }
            | NodeData::PropertySignature { type_node, .. }
            | NodeData::PropertyDeclaration { type_node, .. } => *type_node,
            _ => return None,
        };
        match self.arena.data(type_node)? {
            NodeData::TypeLiteral { .. } => {
                let literal = self.node_symbol(type_node)?;
                self.symbol(literal)?.members.get(name)
            }
            NodeData::TypeReference { type_name, .. } => {
                let referenced = self.symbol_at_location(*type_name)?;
                self.get_member_worker(referenced, name, depth + 1)
            }
            NodeData::TypeQuery { expr_name, .. } => {
                let referenced = self.symbol_at_location(*expr_name)?;
                self.get_member_worker(referenced, name, depth + 1)
            }
            _ => None,
        }
    }

    /// Export `name` of a module, namespace or enum symbol, following
    /// `export =` and `export *`.
    pub fn get_export_of(&self, module: SymbolId, name: &str) -> Option<SymbolId> {
        let mut visited = Vec::new();
        self.get_export_worker(module, name, &mut visited)
    }

    fn get_export_worker(
        &self,
        module: SymbolId,
        name: &str,
        visited: &mut Vec<SymbolId>,
    ) -> Option<SymbolId> {
        if visited.contains(&module) || visited.len() as u32 > MAX_ALIAS_CHAIN {
            return None;
        }
        visited.push(module);
        let symbol = self.symbol(module)?;
        if let Some(found) = symbol.exports.get(name) {
            return Some(found);
        }
        if let Some(export_equals) = symbol.exports.get("export=") {
            let target = self.resolve_alias(export_equals);
            if target != module && target != export_equals {
                if let Some(found) = self.get_export_worker(target, name, visited) {
                    return Some(found);
                }
                if let Some(found) = self.symbol(target).and_then(|t| t.members.get(name)) {
                    return Some(found);
                }
            }
        }
        if name == "default" {
            return None;
        }
        for specifier in &symbol.export_stars {
            let Some(star_module) = self.resolve_module(specifier, symbol.file) else {
                continue;
            };
            if let Some(found) = self.get_export_worker(star_module, name, visited) {
                return Some(found);
            }
        }
        None
    }

    /// Follow import and re-export aliases to the declaration they name.
    /// Unresolvable aliases resolve to themselves.
    pub fn resolve_alias(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        for _ in 0..MAX_ALIAS_CHAIN {
            let Some(symbol) = self.symbol(current) else {
                return current;
            };
            if !symbol.has_any_flags(symbol_flags::ALIAS) {
                return current;
            }
            let next = if let Some(specifier) = &symbol.import_module {
                let Some(module) = self.resolve_module(specifier, symbol.file) else {
                    return current;
                };
                match &symbol.import_name {
                    None => self
                        .symbol(module)
                        .and_then(|m| m.exports.get("export="))
                        .unwrap_or(module),
                    Some(name) => match self.get_export_of(module, name) {
                        Some(found) => found,
                        None if name == "default" => {
                            match self.symbol(module).and_then(|m| m.exports.get("export=")) {
                                Some(found) => found,
                                None => return current,
                            }
                        }
                        None => return current,
                    },
                }
            } else if symbol.alias_target.is_some() {
                match self.resolve_entity(symbol.alias_target) {
                    Some(found) => found,
                    None => return current,
                }
            } else {
                return current;
            };
            if next == current {
                return current;
            }
            trace!(from = current.0, to = next.0, "alias hop");
            current = next;
        }
        current
    }

    /// Module symbol for `specifier` imported from `from_file`: a user file
    /// for relative specifiers, otherwise a `declare module` block.
    pub fn resolve_module(&self, specifier: &str, from_file: usize) -> Option<SymbolId> {
        if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/') {
            let from = self.files.get(from_file)?;
            let directory = match from.file_name.rfind(['/', '\\']) {
                Some(slash) => &from.file_name[..slash],
                None => "",
            };
            let joined = if specifier.starts_with('/') || directory.is_empty() {
                normalize_path(specifier)
            } else {
                normalize_path(&format!("{directory}/{specifier}"))
            };
            let stem = joined
                .strip_suffix(".js")
                .or_else(|| joined.strip_suffix(".d.ts"))
                .or_else(|| joined.strip_suffix(".ts"))
                .unwrap_or(&joined);
            for base in [joined.as_str(), stem] {
                for suffix in MODULE_SUFFIXES {
                    let candidate = format!("{base}{suffix}");
                    if let Some(file) = self.file_by_name.get(&candidate) {
                        return self.files.get(*file).and_then(|f| f.symbol);
                    }
                }
            }
            return None;
        }
        self.ambient_modules.get(specifier).copied()
    }

    /// Whether `id` (after aliases) names a class.
    pub fn is_class_reference(&self, id: SymbolId) -> bool {
        let target = self.resolve_alias(id);
        self.symbol(target)
            .is_some_and(|s| s.has_any_flags(symbol_flags::CLASS))
    }
}
