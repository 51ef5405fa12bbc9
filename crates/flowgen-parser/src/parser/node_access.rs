//! NodeArena access methods.

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeData};

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|n| &n.data)
    }

    pub fn kind_name(&self, index: NodeIndex) -> &'static str {
        self.get(index).map(Node::kind_name).unwrap_or("Missing")
    }

    /// Text of an identifier, private identifier or literal name.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier { text }
            | NodeData::PrivateIdentifier { text }
            | NodeData::StringLiteral { text }
            | NodeData::NumericLiteral { text } => Some(text),
            _ => None,
        }
    }

    /// Text of a string literal (module specifiers, literal types).
    pub fn string_literal_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::StringLiteral { text } => Some(text),
            _ => None,
        }
    }

    /// Name of a declaration node, when it has a simple one.
    pub fn declaration_name(&self, index: NodeIndex) -> Option<&str> {
        let name = self.data(index)?.name();
        self.identifier_text(name)
    }

    /// Dotted spelling of an entity name or property access chain.
    pub fn entity_name_text(&self, index: NodeIndex) -> Option<String> {
        match self.data(index)? {
            NodeData::Identifier { text } => Some(text.clone()),
            NodeData::KeywordLiteral { .. } | NodeData::ThisType => Some("this".to_string()),
            NodeData::QualifiedName { left, right } => Some(format!(
                "{}.{}",
                self.entity_name_text(*left)?,
                self.entity_name_text(*right)?
            )),
            NodeData::PropertyAccessExpression { expression, name } => Some(format!(
                "{}.{}",
                self.entity_name_text(*expression)?,
                self.entity_name_text(*name)?
            )),
            _ => None,
        }
    }

    /// Leftmost identifier of a qualified name or property access chain.
    pub fn leftmost_identifier(&self, index: NodeIndex) -> NodeIndex {
        match self.data(index) {
            Some(NodeData::QualifiedName { left, .. }) => self.leftmost_identifier(*left),
            Some(NodeData::PropertyAccessExpression { expression, .. }) => {
                self.leftmost_identifier(*expression)
            }
            _ => index,
        }
    }

    /// Statements of a source file or module block.
    pub fn statements(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.data(index) {
            Some(NodeData::SourceFile { statements, .. })
            | Some(NodeData::ModuleBlock { statements }) => &statements.nodes,
            _ => &[],
        }
    }

    /// Children in source order. Used by tree walks that do not care about
    /// node shapes (parent linking, reference collection).
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(data) = self.data(index) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut one = |n: NodeIndex| {
            if n.is_some() {
                out.push(n);
            }
        };
        match data {
            NodeData::SourceFile { statements, .. } | NodeData::ModuleBlock { statements } => {
                statements.iter().for_each(&mut one)
            }
            NodeData::QualifiedName { left, right } => {
                one(*left);
                one(*right);
            }
            NodeData::ComputedPropertyName { expression }
            | NodeData::ParenthesizedExpression { expression }
            | NodeData::ExternalModuleReference { expression }
            | NodeData::ExportAssignment { expression, .. } => one(*expression),
            NodeData::PropertyAccessExpression { expression, name } => {
                one(*expression);
                one(*name);
            }
            NodeData::PrefixUnaryExpression { operand, .. } => one(*operand),
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            } => {
                one(*expression);
                type_arguments.iter().flat_map(|l| l.iter()).for_each(&mut one);
            }
            NodeData::HeritageClause { types, .. } => types.iter().for_each(&mut one),
            NodeData::ObjectBindingPattern { elements }
            | NodeData::ArrayBindingPattern { elements }
            | NodeData::TupleType { elements }
            | NodeData::NamedImports { elements }
            | NodeData::NamedExports { elements } => elements.iter().for_each(&mut one),
            NodeData::BindingElement {
                property_name,
                name,
                ..
            } => {
                one(*property_name);
                one(*name);
            }
            NodeData::LiteralType { literal } => one(*literal),
            NodeData::TypeReference {
                type_name,
                type_arguments,
            } => {
                one(*type_name);
                type_arguments.iter().flat_map(|l| l.iter()).for_each(&mut one);
            }
            NodeData::ArrayType { element_type } => one(*element_type),
            NodeData::NamedTupleMember {
                name, type_node, ..
            } => {
                one(*name);
                one(*type_node);
            }
            NodeData::OptionalType { type_node }
            | NodeData::RestType { type_node }
            | NodeData::ParenthesizedType { type_node }
            | NodeData::TypeOperator { type_node, .. } => one(*type_node),
            NodeData::UnionType { types } | NodeData::IntersectionType { types } => {
                types.iter().for_each(&mut one)
            }
            NodeData::FunctionType {
                type_parameters,
                parameters,
                type_node,
            }
            | NodeData::ConstructorType {
                type_parameters,
                parameters,
                type_node,
            }
            | NodeData::CallSignature {
                type_parameters,
                parameters,
                type_node,
            }
            | NodeData::ConstructSignature {
                type_parameters,
                parameters,
                type_node,
            } => {
                type_parameters.iter().flat_map(|l| l.iter()).for_each(&mut one);
                parameters.iter().for_each(&mut one);
                one(*type_node);
            }
            NodeData::TypeLiteral { members } => members.iter().for_each(&mut one),
            NodeData::IndexedAccessType {
                object_type,
                index_type,
            } => {
                one(*object_type);
                one(*index_type);
            }
            NodeData::MappedType {
                type_parameter,
                name_type,
                type_node,
                ..
            } => {
                one(*type_parameter);
                one(*name_type);
                one(*type_node);
            }
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                one(*check_type);
                one(*extends_type);
                one(*true_type);
                one(*false_type);
            }
            NodeData::InferType { type_parameter } => one(*type_parameter),
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            } => {
                one(*expr_name);
                type_arguments.iter().flat_map(|l| l.iter()).for_each(&mut one);
            }
            NodeData::ImportType {
                argument,
                qualifier,
                type_arguments,
                ..
            } => {
                one(*argument);
                one(*qualifier);
                type_arguments.iter().flat_map(|l| l.iter()).for_each(&mut one);
            }
            NodeData::TypePredicate {
                parameter_name,
                type_node,
                ..
            } => {
                one(*parameter_name);
                one(*type_node);
            }
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            } => {
                one(*name);
                one(*constraint);
                one(*default);
            }
            NodeData::Parameter {
                name,
                type_node,
                initializer,
                ..
            }
            | NodeData::PropertyDeclaration {
                name,
                type_node,
                initializer,
                ..
            }
            | NodeData::VariableDeclaration {
                name,
                type_node,
                initializer,
            } => {
                one(*name);
                one(*type_node);
                one(*initializer);
            }
            NodeData::PropertySignature {
                name, type_node, ..
            } => {
                one(*name);
                one(*type_node);
            }
            NodeData::MethodSignature {
                name,
                type_parameters,
                parameters,
                type_node,
                ..
            }
            | NodeData::MethodDeclaration {
                name,
                type_parameters,
                parameters,
                type_node,
                ..
            }
            | NodeData::FunctionDeclaration {
                name,
                type_parameters,
                parameters,
                type_node,
            } => {
                one(*name);
                type_parameters.iter().flat_map(|l| l.iter()).for_each(&mut one);
                parameters.iter().for_each(&mut one);
                one(*type_node);
            }
            NodeData::IndexSignature {
                parameters,
                type_node,
            } => {
                parameters.iter().for_each(&mut one);
                one(*type_node);
            }
            NodeData::Constructor { parameters } => parameters.iter().for_each(&mut one),
            NodeData::GetAccessor {
                name,
                parameters,
                type_node,
            } => {
                one(*name);
                parameters.iter().for_each(&mut one);
                one(*type_node);
            }
            NodeData::SetAccessor { name, parameters } => {
                one(*name);
                parameters.iter().for_each(&mut one);
            }
            NodeData::InterfaceDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            }
            | NodeData::ClassDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            } => {
                one(*name);
                type_parameters.iter().flat_map(|l| l.iter()).for_each(&mut one);
                heritage_clauses.iter().for_each(&mut one);
                members.iter().for_each(&mut one);
            }
            NodeData::TypeAliasDeclaration {
                name,
                type_parameters,
                type_node,
            } => {
                one(*name);
                type_parameters.iter().flat_map(|l| l.iter()).for_each(&mut one);
                one(*type_node);
            }
            NodeData::EnumDeclaration { name, members } => {
                one(*name);
                members.iter().for_each(&mut one);
            }
            NodeData::EnumMember { name, initializer } => {
                one(*name);
                one(*initializer);
            }
            NodeData::VariableStatement { declarations } => declarations.iter().for_each(&mut one),
            NodeData::ModuleDeclaration { name, body } => {
                one(*name);
                one(*body);
            }
            NodeData::ImportDeclaration {
                import_clause,
                module_specifier,
            } => {
                one(*import_clause);
                one(*module_specifier);
            }
            NodeData::ImportClause {
                name,
                named_bindings,
                ..
            } => {
                one(*name);
                one(*named_bindings);
            }
            NodeData::NamespaceImport { name }
            | NodeData::NamespaceExport { name }
            | NodeData::NamespaceExportDeclaration { name } => one(*name),
            NodeData::ImportSpecifier {
                property_name,
                name,
                ..
            }
            | NodeData::ExportSpecifier {
                property_name,
                name,
                ..
            } => {
                one(*property_name);
                one(*name);
            }
            NodeData::ImportEqualsDeclaration {
                name,
                module_reference,
                ..
            } => {
                one(*name);
                one(*module_reference);
            }
            NodeData::ExportDeclaration {
                export_clause,
                module_specifier,
                ..
            } => {
                one(*export_clause);
                one(*module_specifier);
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
            | NodeData::EmptyStatement => {}
        }
        out
    }
}
