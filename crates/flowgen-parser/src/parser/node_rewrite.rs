//! Structural copies of node payloads with their children replaced.
//!
//! Rewrites never mutate a parsed node; they build a new payload with
//! [`NodeData::map_children`] and append it with
//! [`NodeArena::add_rewritten`](super::NodeArena::add_rewritten).

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, NodeData};
use flowgen_common::limits::{PRINTER_STACK_RED_ZONE, PRINTER_STACK_SEGMENT};

fn map_list(list: &NodeList, f: &mut impl FnMut(NodeIndex) -> NodeIndex) -> NodeList {
    list.iter().map(|n| f(n)).collect()
}

fn map_opt_list(
    list: &Option<NodeList>,
    f: &mut impl FnMut(NodeIndex) -> NodeIndex,
) -> Option<NodeList> {
    list.as_ref().map(|l| map_list(l, f))
}

fn map_one(node: NodeIndex, f: &mut impl FnMut(NodeIndex) -> NodeIndex) -> NodeIndex {
    if node.is_none() { node } else { f(node) }
}

impl NodeData {
    /// Copy of this payload with every child index passed through `f`.
    /// Children are visited in source order; absent children stay absent.
    pub fn map_children(&self, mut f: impl FnMut(NodeIndex) -> NodeIndex) -> NodeData {
        let f = &mut f;
        match self {
            NodeData::SourceFile {
                file_name,
                statements,
            } => NodeData::SourceFile {
                file_name: file_name.clone(),
                statements: map_list(statements, f),
            },
            NodeData::ModuleBlock { statements } => NodeData::ModuleBlock {
                statements: map_list(statements, f),
            },
            NodeData::QualifiedName { left, right } => NodeData::QualifiedName {
                left: map_one(*left, f),
                right: map_one(*right, f),
            },
            NodeData::ComputedPropertyName { expression } => NodeData::ComputedPropertyName {
                expression: map_one(*expression, f),
            },
            NodeData::PropertyAccessExpression { expression, name } => {
                NodeData::PropertyAccessExpression {
                    expression: map_one(*expression, f),
                    name: map_one(*name, f),
                }
            }
            NodeData::PrefixUnaryExpression { operator, operand } => {
                NodeData::PrefixUnaryExpression {
                    operator: *operator,
                    operand: map_one(*operand, f),
                }
            }
            NodeData::ParenthesizedExpression { expression } => {
                NodeData::ParenthesizedExpression {
                    expression: map_one(*expression, f),
                }
            }
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            } => NodeData::ExpressionWithTypeArguments {
                expression: map_one(*expression, f),
                type_arguments: map_opt_list(type_arguments, f),
            },
            NodeData::HeritageClause { token, types } => NodeData::HeritageClause {
                token: *token,
                types: map_list(types, f),
            },
            NodeData::ObjectBindingPattern { elements } => NodeData::ObjectBindingPattern {
                elements: map_list(elements, f),
            },
            NodeData::ArrayBindingPattern { elements } => NodeData::ArrayBindingPattern {
                elements: map_list(elements, f),
            },
            NodeData::BindingElement {
                dot_dot_dot,
                property_name,
                name,
            } => NodeData::BindingElement {
                dot_dot_dot: *dot_dot_dot,
                property_name: map_one(*property_name, f),
                name: map_one(*name, f),
            },
            NodeData::LiteralType { literal } => NodeData::LiteralType {
                literal: map_one(*literal, f),
            },
            NodeData::TypeReference {
                type_name,
                type_arguments,
            } => NodeData::TypeReference {
                type_name: map_one(*type_name, f),
                type_arguments: map_opt_list(type_arguments, f),
            },
            NodeData::ArrayType { element_type } => NodeData::ArrayType {
                element_type: map_one(*element_type, f),
            },
            NodeData::TupleType { elements } => NodeData::TupleType {
                elements: map_list(elements, f),
            },
            NodeData::NamedTupleMember {
                dot_dot_dot,
                name,
                question,
                type_node,
            } => NodeData::NamedTupleMember {
                dot_dot_dot: *dot_dot_dot,
                name: map_one(*name, f),
                question: *question,
                type_node: map_one(*type_node, f),
            },
            NodeData::OptionalType { type_node } => NodeData::OptionalType {
                type_node: map_one(*type_node, f),
            },
            NodeData::RestType { type_node } => NodeData::RestType {
                type_node: map_one(*type_node, f),
            },
            NodeData::UnionType { types } => NodeData::UnionType {
                types: map_list(types, f),
            },
            NodeData::IntersectionType { types } => NodeData::IntersectionType {
                types: map_list(types, f),
            },
            NodeData::FunctionType {
                type_parameters,
                parameters,
                type_node,
            } => NodeData::FunctionType {
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::ConstructorType {
                type_parameters,
                parameters,
                type_node,
            } => NodeData::ConstructorType {
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::TypeLiteral { members } => NodeData::TypeLiteral {
                members: map_list(members, f),
            },
            NodeData::ParenthesizedType { type_node } => NodeData::ParenthesizedType {
                type_node: map_one(*type_node, f),
            },
            NodeData::TypeOperator {
                operator,
                type_node,
            } => NodeData::TypeOperator {
                operator: *operator,
                type_node: map_one(*type_node, f),
            },
            NodeData::IndexedAccessType {
                object_type,
                index_type,
            } => NodeData::IndexedAccessType {
                object_type: map_one(*object_type, f),
                index_type: map_one(*index_type, f),
            },
            NodeData::MappedType {
                readonly_token,
                type_parameter,
                name_type,
                question_token,
                type_node,
            } => NodeData::MappedType {
                readonly_token: *readonly_token,
                type_parameter: map_one(*type_parameter, f),
                name_type: map_one(*name_type, f),
                question_token: *question_token,
                type_node: map_one(*type_node, f),
            },
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => NodeData::ConditionalType {
                check_type: map_one(*check_type, f),
                extends_type: map_one(*extends_type, f),
                true_type: map_one(*true_type, f),
                false_type: map_one(*false_type, f),
            },
            NodeData::InferType { type_parameter } => NodeData::InferType {
                type_parameter: map_one(*type_parameter, f),
            },
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            } => NodeData::TypeQuery {
                expr_name: map_one(*expr_name, f),
                type_arguments: map_opt_list(type_arguments, f),
            },
            NodeData::ImportType {
                is_type_of,
                argument,
                qualifier,
                type_arguments,
            } => NodeData::ImportType {
                is_type_of: *is_type_of,
                argument: map_one(*argument, f),
                qualifier: map_one(*qualifier, f),
                type_arguments: map_opt_list(type_arguments, f),
            },
            NodeData::TypePredicate {
                asserts,
                parameter_name,
                type_node,
            } => NodeData::TypePredicate {
                asserts: *asserts,
                parameter_name: map_one(*parameter_name, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            } => NodeData::TypeParameter {
                name: map_one(*name, f),
                constraint: map_one(*constraint, f),
                default: map_one(*default, f),
            },
            NodeData::Parameter {
                dot_dot_dot,
                name,
                question,
                type_node,
                initializer,
            } => NodeData::Parameter {
                dot_dot_dot: *dot_dot_dot,
                name: map_one(*name, f),
                question: *question,
                type_node: map_one(*type_node, f),
                initializer: map_one(*initializer, f),
            },
            NodeData::PropertySignature {
                name,
                question,
                type_node,
            } => NodeData::PropertySignature {
                name: map_one(*name, f),
                question: *question,
                type_node: map_one(*type_node, f),
            },
            NodeData::MethodSignature {
                name,
                question,
                type_parameters,
                parameters,
                type_node,
            } => NodeData::MethodSignature {
                name: map_one(*name, f),
                question: *question,
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::CallSignature {
                type_parameters,
                parameters,
                type_node,
            } => NodeData::CallSignature {
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::ConstructSignature {
                type_parameters,
                parameters,
                type_node,
            } => NodeData::ConstructSignature {
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::IndexSignature {
                parameters,
                type_node,
            } => NodeData::IndexSignature {
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::PropertyDeclaration {
                name,
                question,
                type_node,
                initializer,
            } => NodeData::PropertyDeclaration {
                name: map_one(*name, f),
                question: *question,
                type_node: map_one(*type_node, f),
                initializer: map_one(*initializer, f),
            },
            NodeData::MethodDeclaration {
                name,
                question,
                type_parameters,
                parameters,
                type_node,
            } => NodeData::MethodDeclaration {
                name: map_one(*name, f),
                question: *question,
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::Constructor { parameters } => NodeData::Constructor {
                parameters: map_list(parameters, f),
            },
            NodeData::GetAccessor {
                name,
                parameters,
                type_node,
            } => NodeData::GetAccessor {
                name: map_one(*name, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::SetAccessor { name, parameters } => NodeData::SetAccessor {
                name: map_one(*name, f),
                parameters: map_list(parameters, f),
            },
            NodeData::InterfaceDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            } => NodeData::InterfaceDeclaration {
                name: map_one(*name, f),
                type_parameters: map_opt_list(type_parameters, f),
                heritage_clauses: map_list(heritage_clauses, f),
                members: map_list(members, f),
            },
            NodeData::TypeAliasDeclaration {
                name,
                type_parameters,
                type_node,
            } => NodeData::TypeAliasDeclaration {
                name: map_one(*name, f),
                type_parameters: map_opt_list(type_parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::ClassDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            } => NodeData::ClassDeclaration {
                name: map_one(*name, f),
                type_parameters: map_opt_list(type_parameters, f),
                heritage_clauses: map_list(heritage_clauses, f),
                members: map_list(members, f),
            },
            NodeData::EnumDeclaration { name, members } => NodeData::EnumDeclaration {
                name: map_one(*name, f),
                members: map_list(members, f),
            },
            NodeData::EnumMember { name, initializer } => NodeData::EnumMember {
                name: map_one(*name, f),
                initializer: map_one(*initializer, f),
            },
            NodeData::VariableStatement { declarations } => NodeData::VariableStatement {
                declarations: map_list(declarations, f),
            },
            NodeData::VariableDeclaration {
                name,
                type_node,
                initializer,
            } => NodeData::VariableDeclaration {
                name: map_one(*name, f),
                type_node: map_one(*type_node, f),
                initializer: map_one(*initializer, f),
            },
            NodeData::FunctionDeclaration {
                name,
                type_parameters,
                parameters,
                type_node,
            } => NodeData::FunctionDeclaration {
                name: map_one(*name, f),
                type_parameters: map_opt_list(type_parameters, f),
                parameters: map_list(parameters, f),
                type_node: map_one(*type_node, f),
            },
            NodeData::ModuleDeclaration { name, body } => NodeData::ModuleDeclaration {
                name: map_one(*name, f),
                body: map_one(*body, f),
            },
            NodeData::ImportDeclaration {
                import_clause,
                module_specifier,
            } => NodeData::ImportDeclaration {
                import_clause: map_one(*import_clause, f),
                module_specifier: map_one(*module_specifier, f),
            },
            NodeData::ImportClause {
                is_type_only,
                name,
                named_bindings,
            } => NodeData::ImportClause {
                is_type_only: *is_type_only,
                name: map_one(*name, f),
                named_bindings: map_one(*named_bindings, f),
            },
            NodeData::NamespaceImport { name } => NodeData::NamespaceImport {
                name: map_one(*name, f),
            },
            NodeData::NamedImports { elements } => NodeData::NamedImports {
                elements: map_list(elements, f),
            },
            NodeData::ImportSpecifier {
                is_type_only,
                property_name,
                name,
            } => NodeData::ImportSpecifier {
                is_type_only: *is_type_only,
                property_name: map_one(*property_name, f),
                name: map_one(*name, f),
            },
            NodeData::ImportEqualsDeclaration {
                is_type_only,
                name,
                module_reference,
            } => NodeData::ImportEqualsDeclaration {
                is_type_only: *is_type_only,
                name: map_one(*name, f),
                module_reference: map_one(*module_reference, f),
            },
            NodeData::ExternalModuleReference { expression } => {
                NodeData::ExternalModuleReference {
                    expression: map_one(*expression, f),
                }
            }
            NodeData::ExportDeclaration {
                is_type_only,
                export_clause,
                module_specifier,
            } => NodeData::ExportDeclaration {
                is_type_only: *is_type_only,
                export_clause: map_one(*export_clause, f),
                module_specifier: map_one(*module_specifier, f),
            },
            NodeData::NamedExports { elements } => NodeData::NamedExports {
                elements: map_list(elements, f),
            },
            NodeData::NamespaceExport { name } => NodeData::NamespaceExport {
                name: map_one(*name, f),
            },
            NodeData::ExportSpecifier {
                is_type_only,
                property_name,
                name,
            } => NodeData::ExportSpecifier {
                is_type_only: *is_type_only,
                property_name: map_one(*property_name, f),
                name: map_one(*name, f),
            },
            NodeData::ExportAssignment {
                is_export_equals,
                expression,
            } => NodeData::ExportAssignment {
                is_export_equals: *is_export_equals,
                expression: map_one(*expression, f),
            },
            NodeData::NamespaceExportDeclaration { name } => {
                NodeData::NamespaceExportDeclaration {
                    name: map_one(*name, f),
                }
            }
            NodeData::Identifier { .. }
            | NodeData::PrivateIdentifier { .. }
            | NodeData::StringLiteral { .. }
            | NodeData::NumericLiteral { .. }
            | NodeData::BigIntLiteral { .. }
            | NodeData::KeywordLiteral { .. }
            | NodeData::UnparsedExpression { .. }
            | NodeData::OmittedExpression
            | NodeData::KeywordType { .. }
            | NodeData::ThisType
            | NodeData::TemplateLiteralType { .. }
            | NodeData::EmptyStatement => self.clone(),
        }
    }
}

impl NodeArena {
    /// Bottom-up rewrite of the subtree at `root`.
    ///
    /// `visit` sees every node after its children were rewritten and may
    /// return a replacement. A node whose children changed is copied with
    /// [`NodeArena::add_rewritten`]; untouched subtrees keep their indices.
    pub fn rewrite<E>(
        &mut self,
        root: NodeIndex,
        visit: &mut impl FnMut(&mut NodeArena, NodeIndex) -> Result<Option<NodeIndex>, E>,
    ) -> Result<NodeIndex, E> {
        let Some(node) = self.get(root) else {
            return Ok(root);
        };
        let (flags, modifiers) = (node.flags, node.modifiers);
        let original = node.data.clone();

        let mut error = None;
        let mut changed = false;
        let data = original.map_children(|child| {
            if error.is_some() {
                return child;
            }
            let next = stacker::maybe_grow(PRINTER_STACK_RED_ZONE, PRINTER_STACK_SEGMENT, || {
                self.rewrite(child, visit)
            });
            match next {
                Ok(next) => {
                    changed |= next != child;
                    next
                }
                Err(e) => {
                    error = Some(e);
                    child
                }
            }
        });
        if let Some(e) = error {
            return Err(e);
        }

        let current = if changed {
            self.add_rewritten(root, flags, modifiers, data)
        } else {
            root
        };
        Ok(visit(self, current)?.unwrap_or(current))
    }
}
