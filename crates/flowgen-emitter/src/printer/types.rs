//! Type node printing.

use super::{Printer, quote};
use flowgen_binder::{SymbolId, symbol_flags};
use flowgen_common::FlowgenError;
use flowgen_common::limits::{PRINTER_STACK_RED_ZONE, PRINTER_STACK_SEGMENT};
use flowgen_parser::{ModifierFlags, NodeData, NodeIndex, NodeList};
use flowgen_scanner::SyntaxKind;
use tracing::trace;

/// Unions this long print one member per line.
const MULTILINE_UNION_MIN: usize = 5;

impl<'a> Printer<'a> {
    /// Flow text for a type node. A missing node prints as `any`.
    pub fn print_type(&mut self, node: NodeIndex) -> String {
        stacker::maybe_grow(PRINTER_STACK_RED_ZONE, PRINTER_STACK_SEGMENT, || {
            self.print_type_worker(node)
        })
    }

    fn print_type_worker(&mut self, node: NodeIndex) -> String {
        let arena = self.arena();
        let Some(data) = arena.data(node) else {
            return "any".to_string();
        };
        trace!(kind = data.kind_name(), node = node.0, "print type");
        match data {
            NodeData::KeywordType { keyword } => self.keyword_type(node, *keyword),
            NodeData::ThisType => "this".to_string(),
            NodeData::LiteralType { literal } => self.print_literal(*literal),
            NodeData::StringLiteral { .. }
            | NodeData::NumericLiteral { .. }
            | NodeData::BigIntLiteral { .. }
            | NodeData::KeywordLiteral { .. }
            | NodeData::PrefixUnaryExpression { .. } => self.print_literal(node),
            NodeData::Identifier { text } => text.clone(),
            NodeData::TemplateLiteralType { .. } => {
                self.report(node, FlowgenError::UnsupportedTemplateLiteral);
                "string".to_string()
            }
            NodeData::TypeReference {
                type_name,
                type_arguments,
            } => self.type_reference(*type_name, type_arguments.as_ref()),
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            } => self.type_reference(*expression, type_arguments.as_ref()),
            NodeData::ArrayType { element_type } => {
                let element = self.print_type(*element_type);
                if self.needs_parens_as_element(*element_type) {
                    format!("({element})[]")
                } else {
                    format!("{element}[]")
                }
            }
            NodeData::TupleType { elements } => self.tuple_type(elements),
            NodeData::NamedTupleMember {
                question,
                type_node,
                ..
            } => {
                let inner = self.print_type(*type_node);
                if *question {
                    format!("{inner} | void")
                } else {
                    inner
                }
            }
            NodeData::OptionalType { type_node } => {
                format!("{} | void", self.print_type(*type_node))
            }
            NodeData::RestType { type_node } => self.print_type(*type_node),
            NodeData::UnionType { types } => {
                let separator = if types.len() >= MULTILINE_UNION_MIN {
                    "\n| "
                } else {
                    " | "
                };
                let mut printed = Vec::with_capacity(types.len());
                for member in types.iter() {
                    printed.push(self.print_type(member));
                }
                printed.join(separator)
            }
            NodeData::IntersectionType { types } => self.intersection_type(types),
            NodeData::FunctionType {
                type_parameters,
                parameters,
                type_node,
            } => {
                let generics = self.type_parameters(type_parameters.as_ref(), false);
                let parameters = self.parameters(parameters);
                let result = self.return_type(*type_node);
                format!("{generics}({parameters}) => {result}")
            }
            NodeData::ConstructorType {
                type_parameters,
                parameters,
                type_node,
            } => {
                let generics = self.type_parameters(type_parameters.as_ref(), false);
                let parameters = self.parameters(parameters);
                let result = self.return_type(*type_node);
                format!("{generics}({parameters}) => {result}")
            }
            NodeData::TypeLiteral { members } => {
                let members = self.type_members(members);
                self.default_object_type(&members)
            }
            NodeData::ParenthesizedType { type_node } => {
                format!("({})", self.print_type(*type_node))
            }
            NodeData::TypeOperator {
                operator,
                type_node,
            } => self.type_operator(node, *operator, *type_node),
            NodeData::IndexedAccessType {
                object_type,
                index_type,
            } => {
                let utility = if self.is_string_literal_type(*index_type) {
                    "$PropertyType"
                } else {
                    "$ElementType"
                };
                let object = self.print_type(*object_type);
                let index = self.print_type(*index_type);
                format!("{utility}<{object}, {index}>")
            }
            NodeData::MappedType {
                type_parameter,
                type_node,
                ..
            } => self.mapped_type(*type_parameter, *type_node),
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                self.uses_conditional_helper = true;
                let check = self.print_type(*check_type);
                let extends = self.print_type(*extends_type);
                let when_true = self.print_type(*true_type);
                let when_false = self.print_type(*false_type);
                format!(
                    "$FlowGen$If<$FlowGen$Assignable<{check}, {extends}>, {when_true}, {when_false}>"
                )
            }
            NodeData::InferType { type_parameter } => arena
                .declaration_name(*type_parameter)
                .unwrap_or("any")
                .to_string(),
            NodeData::TypeQuery { expr_name, .. } => {
                format!("typeof {}", self.print_entity(*expr_name, true))
            }
            NodeData::ImportType { .. } => {
                let description = "Failed to transform an ImportType node";
                self.report(
                    node,
                    FlowgenError::MissingSymbol {
                        description: description.to_string(),
                    },
                );
                Self::error_type(description)
            }
            NodeData::TypePredicate { asserts, .. } => {
                let result = if *asserts { "void" } else { "boolean" };
                result.to_string()
            }
            NodeData::QualifiedName { .. } | NodeData::PropertyAccessExpression { .. } => {
                self.print_entity(node, false)
            }
            other => {
                let kind = other.kind_name();
                self.report(
                    node,
                    FlowgenError::NoPrintImplemented {
                        kind: kind.to_string(),
                    },
                );
                match arena.declaration_name(node) {
                    Some(name) => format!("{name}: /* NO PRINT IMPLEMENTED: {kind} */ any"),
                    None => format!("/* NO PRINT IMPLEMENTED: {kind} */ any"),
                }
            }
        }
    }

    fn keyword_type(&mut self, node: NodeIndex, keyword: SyntaxKind) -> String {
        let text = match keyword {
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::UnknownKeyword => "mixed",
            SyntaxKind::NeverKeyword => "empty",
            SyntaxKind::UndefinedKeyword | SyntaxKind::VoidKeyword => "void",
            SyntaxKind::ObjectKeyword => "{[key: string]: any}",
            SyntaxKind::SymbolKeyword => "Symbol",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::NumberKeyword => "number",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::BigIntKeyword => {
                self.report(node, FlowgenError::UnsupportedBigInt);
                "number"
            }
            other => {
                let kind = format!("{other:?}");
                self.report(node, FlowgenError::NoPrintImplemented { kind: kind.clone() });
                return format!("/* NO PRINT IMPLEMENTED: {kind} */ any");
            }
        };
        text.to_string()
    }

    /// Literal values in type positions, enum initializers and `export =`.
    pub(crate) fn print_literal(&mut self, node: NodeIndex) -> String {
        let arena = self.arena();
        match arena.data(node) {
            Some(NodeData::StringLiteral { text }) => quote(text),
            Some(NodeData::NumericLiteral { text }) => text.clone(),
            Some(NodeData::BigIntLiteral { .. }) => {
                self.report(node, FlowgenError::UnsupportedBigInt);
                "number".to_string()
            }
            Some(NodeData::KeywordLiteral { keyword }) => match keyword {
                SyntaxKind::TrueKeyword => "true",
                SyntaxKind::FalseKeyword => "false",
                SyntaxKind::NullKeyword => "null",
                SyntaxKind::ThisKeyword => "this",
                _ => "any",
            }
            .to_string(),
            Some(NodeData::PrefixUnaryExpression { operator, operand }) => match operator {
                SyntaxKind::MinusToken => format!("-{}", self.print_literal(*operand)),
                SyntaxKind::PlusToken => self.print_literal(*operand),
                other => {
                    let kind = format!("PrefixUnaryExpression {other:?}");
                    self.report(node, FlowgenError::NoPrintImplemented { kind: kind.clone() });
                    format!("/* NO PRINT IMPLEMENTED: {kind} */ any")
                }
            },
            Some(NodeData::ParenthesizedExpression { expression }) => {
                self.print_literal(*expression)
            }
            Some(NodeData::LiteralType { literal }) => self.print_literal(*literal),
            _ => self.print_type(node),
        }
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Type references and heritage expressions. Enums and enum members
    /// become `typeof` forms, library utility types are substituted outside
    /// heritage clauses and everything else prints its flattened name.
    fn type_reference(&mut self, type_name: NodeIndex, type_arguments: Option<&NodeList>) -> String {
        if self.is_global_jsx_element(type_name) {
            return "React$Node".to_string();
        }
        let checker = self.checker();
        let arguments: Vec<NodeIndex> = type_arguments
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        let reference = checker.symbol_at_location(type_name);
        let target = reference.map(|id| checker.resolve_alias(id));

        if let (Some(reference), Some(target)) = (reference, target)
            && let Some(symbol) = checker.symbol(target)
        {
            let through_type_import = checker
                .symbol(reference)
                .is_some_and(|s| s.is_type_only && s.has_any_flags(symbol_flags::ALIAS));
            if symbol.has_any_flags(symbol_flags::ENUM_MEMBER) {
                let name = self.print_entity(type_name, true);
                return if through_type_import {
                    name
                } else {
                    format!("typeof {name}")
                };
            }
            if symbol.has_any_flags(symbol_flags::ENUM) {
                let name = self.print_entity(type_name, true);
                return if through_type_import {
                    format!("$Values<{name}>")
                } else {
                    format!("$Values<typeof {name}>")
                };
            }
            if !self.in_heritage
                && checker.is_lib_symbol(target)
                && let Some(substituted) = self.substitute(&symbol.name, &arguments)
            {
                return substituted;
            }
        }

        let name = self.print_entity(type_name, false);
        let arguments = if arguments.is_empty()
            && target.is_some_and(|t| self.all_type_parameters_defaulted(t))
        {
            "<>".to_string()
        } else {
            self.type_arguments(&arguments)
        };
        format!("{name}{arguments}")
    }

    fn is_global_jsx_element(&self, type_name: NodeIndex) -> bool {
        let arena = self.arena();
        if arena.entity_name_text(type_name).as_deref() != Some("JSX.Element") {
            return false;
        }
        let checker = self.checker();
        let leftmost = arena.leftmost_identifier(type_name);
        match checker
            .symbol_at_location(leftmost)
            .and_then(|id| checker.symbol(id))
        {
            None => true,
            Some(symbol) => symbol.parent.is_none() && symbol.import_module.is_none(),
        }
    }

    /// Generic declarations whose every parameter has a default need `<>`
    /// when referenced without arguments.
    fn all_type_parameters_defaulted(&self, id: SymbolId) -> bool {
        let arena = self.arena();
        let Some(symbol) = self.checker().symbol(id) else {
            return false;
        };
        let Some(parameters) = arena
            .data(symbol.first_declaration())
            .and_then(NodeData::type_parameters)
        else {
            return false;
        };
        !parameters.is_empty()
            && parameters.iter().all(|parameter| {
                matches!(
                    arena.data(parameter),
                    Some(NodeData::TypeParameter { default, .. }) if default.is_some()
                )
            })
    }

    // =========================================================================
    // Generics and parameters
    // =========================================================================

    pub(crate) fn type_arguments(&mut self, arguments: &[NodeIndex]) -> String {
        if arguments.is_empty() {
            return String::new();
        }
        let mut printed = Vec::with_capacity(arguments.len());
        for argument in arguments {
            printed.push(self.print_type(*argument));
        }
        format!("<{}>", printed.join(", "))
    }

    /// `<T: C = D, ...>`. Functions and methods drop the defaults.
    pub(crate) fn type_parameters(&mut self, list: Option<&NodeList>, keep_defaults: bool) -> String {
        let Some(list) = list.filter(|l| !l.is_empty()) else {
            return String::new();
        };
        let mut printed = Vec::with_capacity(list.len());
        for parameter in list.iter() {
            printed.push(self.type_parameter(parameter, keep_defaults));
        }
        format!("<{}>", printed.join(", "))
    }

    fn type_parameter(&mut self, node: NodeIndex, keep_defaults: bool) -> String {
        let arena = self.arena();
        let Some(parameter) = arena.get(node) else {
            return String::new();
        };
        let NodeData::TypeParameter {
            name,
            constraint,
            default,
        } = &parameter.data
        else {
            return self.print_type(node);
        };
        let variance = match (
            parameter.has_modifier(ModifierFlags::IN),
            parameter.has_modifier(ModifierFlags::OUT),
        ) {
            (true, false) => "-",
            (false, true) => "+",
            _ => "",
        };
        let mut out = format!("{variance}{}", arena.identifier_text(*name).unwrap_or_default());
        if constraint.is_some() {
            out.push_str(": ");
            out.push_str(&self.print_type(*constraint));
        }
        if keep_defaults && default.is_some() {
            out.push_str(" = ");
            out.push_str(&self.print_type(*default));
        }
        out
    }

    /// Comma-separated parameters with any `this` parameter removed.
    pub(crate) fn parameters(&mut self, list: &NodeList) -> String {
        let mut printed = Vec::with_capacity(list.len());
        for parameter in list.iter() {
            if self.is_this_parameter(parameter) {
                continue;
            }
            printed.push(self.parameter(parameter));
        }
        printed.join(", ")
    }

    fn is_this_parameter(&self, node: NodeIndex) -> bool {
        let arena = self.arena();
        matches!(
            arena.data(node),
            Some(NodeData::Parameter { name, .. }) if arena.identifier_text(*name) == Some("this")
        )
    }

    fn parameter(&mut self, node: NodeIndex) -> String {
        let arena = self.arena();
        let Some(NodeData::Parameter {
            dot_dot_dot,
            name,
            question,
            type_node,
            initializer,
        }) = arena.data(node)
        else {
            return self.print_type(node);
        };
        let rest = if *dot_dot_dot { "..." } else { "" };
        let is_pattern = matches!(
            arena.data(*name),
            Some(NodeData::ObjectBindingPattern { .. } | NodeData::ArrayBindingPattern { .. })
        );
        if is_pattern {
            let pattern = if type_node.is_some() {
                self.print_type(*type_node)
            } else {
                self.binding_pattern_type(*name)
            };
            return format!("{rest}{pattern}");
        }
        let optional = if (*question || initializer.is_some()) && !*dot_dot_dot {
            "?"
        } else {
            ""
        };
        let type_text = if type_node.is_some() {
            self.print_type(*type_node)
        } else {
            "any".to_string()
        };
        let name = arena.identifier_text(*name).unwrap_or_default();
        format!("{rest}{name}{optional}: {type_text}")
    }

    /// `{a: any, b: any}` or `[any, any]` for an unannotated destructuring
    /// parameter.
    fn binding_pattern_type(&self, pattern: NodeIndex) -> String {
        let arena = self.arena();
        match arena.data(pattern) {
            Some(NodeData::ObjectBindingPattern { elements }) => {
                let fields: Vec<String> = elements
                    .iter()
                    .filter_map(|element| match arena.data(element) {
                        Some(NodeData::BindingElement {
                            dot_dot_dot: false,
                            property_name,
                            name,
                        }) => {
                            let key = if property_name.is_some() {
                                *property_name
                            } else {
                                *name
                            };
                            arena.identifier_text(key).map(|k| format!("{k}: any"))
                        }
                        _ => None,
                    })
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
            Some(NodeData::ArrayBindingPattern { elements }) => {
                let slots = vec!["any"; elements.len()];
                format!("[{}]", slots.join(", "))
            }
            _ => "any".to_string(),
        }
    }

    /// Declared result type, `any` when omitted.
    pub(crate) fn return_type(&mut self, type_node: NodeIndex) -> String {
        if type_node.is_none() {
            "any".to_string()
        } else {
            self.print_type(type_node)
        }
    }

    // =========================================================================
    // Structural types
    // =========================================================================

    fn needs_parens_as_element(&self, element: NodeIndex) -> bool {
        matches!(
            self.arena().data(element),
            Some(
                NodeData::UnionType { .. }
                    | NodeData::IntersectionType { .. }
                    | NodeData::FunctionType { .. }
                    | NodeData::ConstructorType { .. }
                    | NodeData::ConditionalType { .. }
                    | NodeData::TypeQuery { .. }
            )
        )
    }

    fn is_string_literal_type(&self, node: NodeIndex) -> bool {
        let arena = self.arena();
        matches!(
            arena.data(node),
            Some(NodeData::LiteralType { literal })
                if matches!(arena.data(*literal), Some(NodeData::StringLiteral { .. }))
        )
    }

    /// `[A, B]`, with a trailing rest element intersected as `& R[]`.
    fn tuple_type(&mut self, elements: &NodeList) -> String {
        let arena = self.arena();
        let mut fixed: Vec<NodeIndex> = elements.iter().collect();
        let rest = match fixed.last().and_then(|last| arena.data(*last)) {
            Some(NodeData::RestType { type_node })
            | Some(NodeData::NamedTupleMember {
                dot_dot_dot: true,
                type_node,
                ..
            }) => {
                let inner = *type_node;
                fixed.pop();
                Some(inner)
            }
            _ => None,
        };
        let mut printed = Vec::with_capacity(fixed.len());
        for element in fixed {
            printed.push(self.print_type(element));
        }
        let tuple = format!("[{}]", printed.join(", "));
        match rest {
            Some(rest) if printed.is_empty() => self.print_type(rest),
            Some(rest) => format!("{tuple} & {}", self.print_type(rest)),
            None => tuple,
        }
    }

    /// Classes intersect with `&`; anything else is spread into one object
    /// type because Flow cannot intersect exact objects.
    fn intersection_type(&mut self, types: &NodeList) -> String {
        let checker = self.checker();
        let mut printed = Vec::with_capacity(types.len());
        if types.iter().any(|member| checker.is_class_reference(member)) {
            for member in types.iter() {
                printed.push(self.print_type(member));
            }
            return printed.join(" & ");
        }
        for member in types.iter() {
            printed.push(format!("...{}", self.print_type(member)));
        }
        self.default_object_type(&printed)
    }

    fn type_operator(&mut self, node: NodeIndex, operator: SyntaxKind, operand: NodeIndex) -> String {
        let arena = self.arena();
        match operator {
            SyntaxKind::KeyOfKeyword => format!("$Keys<{}>", self.print_type(operand)),
            SyntaxKind::UniqueKeyword => {
                self.report(node, FlowgenError::UnsupportedUniqueSymbol);
                self.print_type(operand)
            }
            SyntaxKind::ReadonlyKeyword => match arena.data(operand) {
                Some(NodeData::ArrayType { element_type }) => {
                    format!("$ReadOnlyArray<{}>", self.print_type(*element_type))
                }
                Some(NodeData::TupleType { .. }) => self.print_type(operand),
                _ => self.unsupported_operator(node, "readonly"),
            },
            other => {
                let operator = format!("{other:?}");
                self.unsupported_operator(node, &operator)
            }
        }
    }

    fn unsupported_operator(&mut self, node: NodeIndex, operator: &str) -> String {
        let error = FlowgenError::UnsupportedTypeOperator {
            operator: operator.to_string(),
        };
        let comment = error.comment_text();
        self.report(node, error);
        format!("/* {comment} */ any")
    }

    /// `{[K in keyof O]: V}` becomes `$ObjMapi<O, <K>(K) => V>`.
    fn mapped_type(&mut self, type_parameter: NodeIndex, value: NodeIndex) -> String {
        let arena = self.arena();
        let (name, constraint) = match arena.data(type_parameter) {
            Some(NodeData::TypeParameter {
                name, constraint, ..
            }) => (arena.identifier_text(*name).unwrap_or("K"), *constraint),
            _ => ("K", NodeIndex::NONE),
        };
        let source = match arena.data(constraint) {
            Some(NodeData::TypeOperator {
                operator: SyntaxKind::KeyOfKeyword,
                type_node,
            }) => self.print_type(*type_node),
            _ => format!("{{[k: {}]: any}}", self.print_type(constraint)),
        };
        let value = self.print_type(value);
        format!("$ObjMapi<{source}, <{name}>({name}) => {value}>")
    }
}
