//! Syntax tree node definitions.
//!
//! Every node is a [`Node`] header (source range, flags, modifiers) plus a
//! closed [`NodeData`] payload. Consumers dispatch with exhaustive `match`es.

use super::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use flowgen_scanner::SyntaxKind;

bitflags! {
    /// Structural facts about a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u32 {
        /// `let` variable statement.
        const LET = 1 << 0;
        /// `const` variable statement or `const enum`.
        const CONST = 1 << 1;
        /// Module declared with `namespace`, or an identifier-named `module`
        /// after legacy normalization.
        const NAMESPACE = 1 << 2;
        /// Inner part of `namespace A.B.C`.
        const NESTED_NAMESPACE = 1 << 3;
        /// `declare global { ... }`.
        const GLOBAL_AUGMENTATION = 1 << 4;
        /// Created by a rewrite rather than the parser.
        const SYNTHESIZED = 1 << 5;
    }
}

bitflags! {
    /// Modifier keywords written before a declaration or member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModifierFlags: u32 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const DECLARE = 1 << 2;
        const READONLY = 1 << 3;
        const STATIC = 1 << 4;
        const PRIVATE = 1 << 5;
        const PROTECTED = 1 << 6;
        const PUBLIC = 1 << 7;
        const ABSTRACT = 1 << 8;
        const ASYNC = 1 << 9;
        const CONST = 1 << 10;
        const OVERRIDE = 1 << 11;
        const ACCESSOR = 1 << 12;
        const IN = 1 << 13;
        const OUT = 1 << 14;
    }
}

impl ModifierFlags {
    pub fn from_keyword(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::DeclareKeyword => ModifierFlags::DECLARE,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::InKeyword => ModifierFlags::IN,
            SyntaxKind::OutKeyword => ModifierFlags::OUT,
            _ => ModifierFlags::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub pos: u32,
    pub end: u32,
    pub flags: NodeFlags,
    pub modifiers: ModifierFlags,
    pub data: NodeData,
}

impl Node {
    pub fn has_modifier(&self, modifier: ModifierFlags) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn kind_name(&self) -> &'static str {
        self.data.kind_name()
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    // Files and blocks
    SourceFile {
        file_name: String,
        statements: NodeList,
    },
    ModuleBlock {
        statements: NodeList,
    },

    // Names and literals
    Identifier {
        text: String,
    },
    PrivateIdentifier {
        text: String,
    },
    QualifiedName {
        left: NodeIndex,
        right: NodeIndex,
    },
    ComputedPropertyName {
        expression: NodeIndex,
    },
    StringLiteral {
        text: String,
    },
    NumericLiteral {
        text: String,
    },
    BigIntLiteral {
        text: String,
    },
    /// `true`, `false`, `null` or `this` in an expression position.
    KeywordLiteral {
        keyword: SyntaxKind,
    },

    // Expressions (heritage clauses, initializers, `export =`)
    PropertyAccessExpression {
        expression: NodeIndex,
        name: NodeIndex,
    },
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    /// An initializer the parser skipped; kept verbatim.
    UnparsedExpression {
        text: String,
    },
    ExpressionWithTypeArguments {
        expression: NodeIndex,
        type_arguments: Option<NodeList>,
    },
    HeritageClause {
        token: SyntaxKind,
        types: NodeList,
    },
    ObjectBindingPattern {
        elements: NodeList,
    },
    ArrayBindingPattern {
        elements: NodeList,
    },
    BindingElement {
        dot_dot_dot: bool,
        property_name: NodeIndex,
        name: NodeIndex,
    },
    /// Hole in an array binding pattern: `[, b]`.
    OmittedExpression,

    // Types
    KeywordType {
        keyword: SyntaxKind,
    },
    ThisType,
    LiteralType {
        literal: NodeIndex,
    },
    TemplateLiteralType {
        text: String,
    },
    TypeReference {
        type_name: NodeIndex,
        type_arguments: Option<NodeList>,
    },
    ArrayType {
        element_type: NodeIndex,
    },
    TupleType {
        elements: NodeList,
    },
    NamedTupleMember {
        dot_dot_dot: bool,
        name: NodeIndex,
        question: bool,
        type_node: NodeIndex,
    },
    OptionalType {
        type_node: NodeIndex,
    },
    RestType {
        type_node: NodeIndex,
    },
    UnionType {
        types: NodeList,
    },
    IntersectionType {
        types: NodeList,
    },
    FunctionType {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    ConstructorType {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    TypeLiteral {
        members: NodeList,
    },
    ParenthesizedType {
        type_node: NodeIndex,
    },
    TypeOperator {
        operator: SyntaxKind,
        type_node: NodeIndex,
    },
    IndexedAccessType {
        object_type: NodeIndex,
        index_type: NodeIndex,
    },
    MappedType {
        readonly_token: Option<SyntaxKind>,
        type_parameter: NodeIndex,
        name_type: NodeIndex,
        question_token: Option<SyntaxKind>,
        type_node: NodeIndex,
    },
    ConditionalType {
        check_type: NodeIndex,
        extends_type: NodeIndex,
        true_type: NodeIndex,
        false_type: NodeIndex,
    },
    InferType {
        type_parameter: NodeIndex,
    },
    TypeQuery {
        expr_name: NodeIndex,
        type_arguments: Option<NodeList>,
    },
    ImportType {
        is_type_of: bool,
        argument: NodeIndex,
        qualifier: NodeIndex,
        type_arguments: Option<NodeList>,
    },
    TypePredicate {
        asserts: bool,
        parameter_name: NodeIndex,
        type_node: NodeIndex,
    },

    // Signatures and members
    TypeParameter {
        name: NodeIndex,
        constraint: NodeIndex,
        default: NodeIndex,
    },
    Parameter {
        dot_dot_dot: bool,
        name: NodeIndex,
        question: bool,
        type_node: NodeIndex,
        initializer: NodeIndex,
    },
    PropertySignature {
        name: NodeIndex,
        question: bool,
        type_node: NodeIndex,
    },
    MethodSignature {
        name: NodeIndex,
        question: bool,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    CallSignature {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    ConstructSignature {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    IndexSignature {
        parameters: NodeList,
        type_node: NodeIndex,
    },
    PropertyDeclaration {
        name: NodeIndex,
        question: bool,
        type_node: NodeIndex,
        initializer: NodeIndex,
    },
    MethodDeclaration {
        name: NodeIndex,
        question: bool,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    Constructor {
        parameters: NodeList,
    },
    GetAccessor {
        name: NodeIndex,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    SetAccessor {
        name: NodeIndex,
        parameters: NodeList,
    },

    // Declarations
    InterfaceDeclaration {
        name: NodeIndex,
        type_parameters: Option<NodeList>,
        heritage_clauses: NodeList,
        members: NodeList,
    },
    TypeAliasDeclaration {
        name: NodeIndex,
        type_parameters: Option<NodeList>,
        type_node: NodeIndex,
    },
    ClassDeclaration {
        name: NodeIndex,
        type_parameters: Option<NodeList>,
        heritage_clauses: NodeList,
        members: NodeList,
    },
    EnumDeclaration {
        name: NodeIndex,
        members: NodeList,
    },
    EnumMember {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    VariableStatement {
        declarations: NodeList,
    },
    VariableDeclaration {
        name: NodeIndex,
        type_node: NodeIndex,
        initializer: NodeIndex,
    },
    FunctionDeclaration {
        name: NodeIndex,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_node: NodeIndex,
    },
    ModuleDeclaration {
        name: NodeIndex,
        body: NodeIndex,
    },

    // Imports and exports
    ImportDeclaration {
        import_clause: NodeIndex,
        module_specifier: NodeIndex,
    },
    ImportClause {
        is_type_only: bool,
        name: NodeIndex,
        named_bindings: NodeIndex,
    },
    NamespaceImport {
        name: NodeIndex,
    },
    NamedImports {
        elements: NodeList,
    },
    ImportSpecifier {
        is_type_only: bool,
        property_name: NodeIndex,
        name: NodeIndex,
    },
    ImportEqualsDeclaration {
        is_type_only: bool,
        name: NodeIndex,
        module_reference: NodeIndex,
    },
    ExternalModuleReference {
        expression: NodeIndex,
    },
    ExportDeclaration {
        is_type_only: bool,
        export_clause: NodeIndex,
        module_specifier: NodeIndex,
    },
    NamedExports {
        elements: NodeList,
    },
    NamespaceExport {
        name: NodeIndex,
    },
    ExportSpecifier {
        is_type_only: bool,
        property_name: NodeIndex,
        name: NodeIndex,
    },
    ExportAssignment {
        is_export_equals: bool,
        expression: NodeIndex,
    },
    NamespaceExportDeclaration {
        name: NodeIndex,
    },
    EmptyStatement,
}

impl NodeData {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeData::SourceFile { .. } => "SourceFile",
            NodeData::ModuleBlock { .. } => "ModuleBlock",
            NodeData::Identifier { .. } => "Identifier",
            NodeData::PrivateIdentifier { .. } => "PrivateIdentifier",
            NodeData::QualifiedName { .. } => "QualifiedName",
            NodeData::ComputedPropertyName { .. } => "ComputedPropertyName",
            NodeData::StringLiteral { .. } => "StringLiteral",
            NodeData::NumericLiteral { .. } => "NumericLiteral",
            NodeData::BigIntLiteral { .. } => "BigIntLiteral",
            NodeData::KeywordLiteral { .. } => "KeywordLiteral",
            NodeData::PropertyAccessExpression { .. } => "PropertyAccessExpression",
            NodeData::PrefixUnaryExpression { .. } => "PrefixUnaryExpression",
            NodeData::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            NodeData::UnparsedExpression { .. } => "UnparsedExpression",
            NodeData::ExpressionWithTypeArguments { .. } => "ExpressionWithTypeArguments",
            NodeData::HeritageClause { .. } => "HeritageClause",
            NodeData::ObjectBindingPattern { .. } => "ObjectBindingPattern",
            NodeData::ArrayBindingPattern { .. } => "ArrayBindingPattern",
            NodeData::BindingElement { .. } => "BindingElement",
            NodeData::OmittedExpression => "OmittedExpression",
            NodeData::KeywordType { .. } => "KeywordType",
            NodeData::ThisType => "ThisType",
            NodeData::LiteralType { .. } => "LiteralType",
            NodeData::TemplateLiteralType { .. } => "TemplateLiteralType",
            NodeData::TypeReference { .. } => "TypeReference",
            NodeData::ArrayType { .. } => "ArrayType",
            NodeData::TupleType { .. } => "TupleType",
            NodeData::NamedTupleMember { .. } => "NamedTupleMember",
            NodeData::OptionalType { .. } => "OptionalType",
            NodeData::RestType { .. } => "RestType",
            NodeData::UnionType { .. } => "UnionType",
            NodeData::IntersectionType { .. } => "IntersectionType",
            NodeData::FunctionType { .. } => "FunctionType",
            NodeData::ConstructorType { .. } => "ConstructorType",
            NodeData::TypeLiteral { .. } => "TypeLiteral",
            NodeData::ParenthesizedType { .. } => "ParenthesizedType",
            NodeData::TypeOperator { .. } => "TypeOperator",
            NodeData::IndexedAccessType { .. } => "IndexedAccessType",
            NodeData::MappedType { .. } => "MappedType",
            NodeData::ConditionalType { .. } => "ConditionalType",
            NodeData::InferType { .. } => "InferType",
            NodeData::TypeQuery { .. } => "TypeQuery",
            NodeData::ImportType { .. } => "ImportType",
            NodeData::TypePredicate { .. } => "TypePredicate",
            NodeData::TypeParameter { .. } => "TypeParameter",
            NodeData::Parameter { .. } => "Parameter",
            NodeData::PropertySignature { .. } => "PropertySignature",
            NodeData::MethodSignature { .. } => "MethodSignature",
            NodeData::CallSignature { .. } => "CallSignature",
            NodeData::ConstructSignature { .. } => "ConstructSignature",
            NodeData::IndexSignature { .. } => "IndexSignature",
            NodeData::PropertyDeclaration { .. } => "PropertyDeclaration",
            NodeData::MethodDeclaration { .. } => "MethodDeclaration",
            NodeData::Constructor { .. } => "Constructor",
            NodeData::GetAccessor { .. } => "GetAccessor",
            NodeData::SetAccessor { .. } => "SetAccessor",
            NodeData::InterfaceDeclaration { .. } => "InterfaceDeclaration",
            NodeData::TypeAliasDeclaration { .. } => "TypeAliasDeclaration",
            NodeData::ClassDeclaration { .. } => "ClassDeclaration",
            NodeData::EnumDeclaration { .. } => "EnumDeclaration",
            NodeData::EnumMember { .. } => "EnumMember",
            NodeData::VariableStatement { .. } => "VariableStatement",
            NodeData::VariableDeclaration { .. } => "VariableDeclaration",
            NodeData::FunctionDeclaration { .. } => "FunctionDeclaration",
            NodeData::ModuleDeclaration { .. } => "ModuleDeclaration",
            NodeData::ImportDeclaration { .. } => "ImportDeclaration",
            NodeData::ImportClause { .. } => "ImportClause",
            NodeData::NamespaceImport { .. } => "NamespaceImport",
            NodeData::NamedImports { .. } => "NamedImports",
            NodeData::ImportSpecifier { .. } => "ImportSpecifier",
            NodeData::ImportEqualsDeclaration { .. } => "ImportEqualsDeclaration",
            NodeData::ExternalModuleReference { .. } => "ExternalModuleReference",
            NodeData::ExportDeclaration { .. } => "ExportDeclaration",
            NodeData::NamedExports { .. } => "NamedExports",
            NodeData::NamespaceExport { .. } => "NamespaceExport",
            NodeData::ExportSpecifier { .. } => "ExportSpecifier",
            NodeData::ExportAssignment { .. } => "ExportAssignment",
            NodeData::NamespaceExportDeclaration { .. } => "NamespaceExportDeclaration",
            NodeData::EmptyStatement => "EmptyStatement",
        }
    }

    /// Declared name of a declaration, member or specifier node.
    pub fn name(&self) -> NodeIndex {
        match self {
            NodeData::PropertySignature { name, .. }
            | NodeData::MethodSignature { name, .. }
            | NodeData::PropertyDeclaration { name, .. }
            | NodeData::MethodDeclaration { name, .. }
            | NodeData::GetAccessor { name, .. }
            | NodeData::SetAccessor { name, .. }
            | NodeData::InterfaceDeclaration { name, .. }
            | NodeData::TypeAliasDeclaration { name, .. }
            | NodeData::ClassDeclaration { name, .. }
            | NodeData::EnumDeclaration { name, .. }
            | NodeData::EnumMember { name, .. }
            | NodeData::VariableDeclaration { name, .. }
            | NodeData::FunctionDeclaration { name, .. }
            | NodeData::ModuleDeclaration { name, .. }
            | NodeData::TypeParameter { name, .. }
            | NodeData::Parameter { name, .. }
            | NodeData::NamespaceImport { name }
            | NodeData::ImportSpecifier { name, .. }
            | NodeData::ImportEqualsDeclaration { name, .. }
            | NodeData::ExportSpecifier { name, .. }
            | NodeData::NamespaceExport { name }
            | NodeData::NamespaceExportDeclaration { name }
            | NodeData::BindingElement { name, .. }
            | NodeData::NamedTupleMember { name, .. } => *name,
            NodeData::ImportClause { name, .. } => *name,
            _ => NodeIndex::NONE,
        }
    }

    pub fn type_parameters(&self) -> Option<&NodeList> {
        match self {
            NodeData::InterfaceDeclaration {
                type_parameters, ..
            }
            | NodeData::TypeAliasDeclaration {
                type_parameters, ..
            }
            | NodeData::ClassDeclaration {
                type_parameters, ..
            }
            | NodeData::FunctionDeclaration {
                type_parameters, ..
            }
            | NodeData::MethodSignature {
                type_parameters, ..
            }
            | NodeData::MethodDeclaration {
                type_parameters, ..
            }
            | NodeData::CallSignature {
                type_parameters, ..
            }
            | NodeData::ConstructSignature {
                type_parameters, ..
            }
            | NodeData::FunctionType {
                type_parameters, ..
            }
            | NodeData::ConstructorType {
                type_parameters, ..
            } => type_parameters.as_ref(),
            _ => None,
        }
    }

    pub fn is_type_node(&self) -> bool {
        matches!(
            self,
            NodeData::KeywordType { .. }
                | NodeData::ThisType
                | NodeData::LiteralType { .. }
                | NodeData::TemplateLiteralType { .. }
                | NodeData::TypeReference { .. }
                | NodeData::ArrayType { .. }
                | NodeData::TupleType { .. }
                | NodeData::NamedTupleMember { .. }
                | NodeData::OptionalType { .. }
                | NodeData::RestType { .. }
                | NodeData::UnionType { .. }
                | NodeData::IntersectionType { .. }
                | NodeData::FunctionType { .. }
                | NodeData::ConstructorType { .. }
                | NodeData::TypeLiteral { .. }
                | NodeData::ParenthesizedType { .. }
                | NodeData::TypeOperator { .. }
                | NodeData::IndexedAccessType { .. }
                | NodeData::MappedType { .. }
                | NodeData::ConditionalType { .. }
                | NodeData::InferType { .. }
                | NodeData::TypeQuery { .. }
                | NodeData::ImportType { .. }
                | NodeData::TypePredicate { .. }
        )
    }
}

/// Arena owning every node of one or more parsed files.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
