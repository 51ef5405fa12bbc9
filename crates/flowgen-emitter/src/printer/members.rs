//! Members of interfaces, type literals and classes.

use super::{Printer, quote};
use flowgen_common::FlowgenError;
use flowgen_parser::{ModifierFlags, NodeData, NodeIndex, NodeList};
use rustc_hash::FxHashSet;

/// Accessor names declared in one member list.
#[derive(Default)]
struct Accessors {
    getters: FxHashSet<String>,
    setters: FxHashSet<String>,
}

impl<'a> Printer<'a> {
    /// Printed members of an interface or type literal. Omitted members
    /// (private ones, the setter half of an accessor pair) leave no entry.
    pub(crate) fn type_members(&mut self, members: &NodeList) -> Vec<String> {
        self.members(members, false)
    }

    /// Printed members of a class body, `static` prefixes included.
    pub(crate) fn class_members(&mut self, members: &NodeList) -> Vec<String> {
        self.members(members, true)
    }

    fn members(&mut self, members: &NodeList, in_class: bool) -> Vec<String> {
        let accessors = self.collect_accessors(members);
        let mut printed = Vec::with_capacity(members.len());
        for member in members.iter() {
            if let Some(text) = self.member(member, in_class, &accessors) {
                printed.push(text);
            }
        }
        printed
    }

    fn collect_accessors(&self, members: &NodeList) -> Accessors {
        let arena = self.arena();
        let mut accessors = Accessors::default();
        for member in members.iter() {
            match arena.data(member) {
                Some(NodeData::GetAccessor { name, .. }) => {
                    if let Some(text) = arena.identifier_text(*name) {
                        accessors.getters.insert(text.to_string());
                    }
                }
                Some(NodeData::SetAccessor { name, .. }) => {
                    if let Some(text) = arena.identifier_text(*name) {
                        accessors.setters.insert(text.to_string());
                    }
                }
                _ => {}
            }
        }
        accessors
    }

    fn member(&mut self, member: NodeIndex, in_class: bool, accessors: &Accessors) -> Option<String> {
        let arena = self.arena();
        let node = arena.get(member)?;
        if node.has_modifier(ModifierFlags::PRIVATE) {
            return None;
        }
        let prefix = if in_class && node.has_modifier(ModifierFlags::STATIC) {
            "static "
        } else {
            ""
        };
        let variance = if node.has_modifier(ModifierFlags::READONLY) {
            "+"
        } else {
            ""
        };
        let text = match &node.data {
            NodeData::PropertySignature {
                name,
                question,
                type_node,
            } => {
                let value = self.return_type(*type_node);
                self.property(*name, *question, value)?
            }
            NodeData::PropertyDeclaration {
                name,
                question,
                type_node,
                initializer,
            } => {
                let value = if type_node.is_some() {
                    self.print_type(*type_node)
                } else if initializer.is_some() {
                    self.print_literal(*initializer)
                } else {
                    "any".to_string()
                };
                self.property(*name, *question, value)?
            }
            NodeData::MethodSignature {
                name,
                question,
                type_parameters,
                parameters,
                type_node,
            }
            | NodeData::MethodDeclaration {
                name,
                question,
                type_parameters,
                parameters,
                type_node,
            } => {
                let (name, _) = self.property_name(*name)?;
                let generics = self.type_parameters(type_parameters.as_ref(), false);
                let parameters = self.parameters(parameters);
                let result = self.return_type(*type_node);
                if *question {
                    format!("{name}?: {generics}({parameters}) => {result}")
                } else {
                    format!("{name}{generics}({parameters}): {result}")
                }
            }
            NodeData::CallSignature {
                type_parameters,
                parameters,
                type_node,
            } => {
                let generics = self.type_parameters(type_parameters.as_ref(), false);
                let parameters = self.parameters(parameters);
                let result = self.return_type(*type_node);
                format!("{generics}({parameters}): {result}")
            }
            NodeData::ConstructSignature {
                type_parameters,
                parameters,
                type_node,
            } => {
                let generics = self.type_parameters(type_parameters.as_ref(), false);
                let parameters = self.parameters(parameters);
                let result = self.return_type(*type_node);
                format!("new {generics}({parameters}): {result}")
            }
            NodeData::IndexSignature {
                parameters,
                type_node,
            } => {
                let parameters = self.parameters(parameters);
                let value = self.return_type(*type_node);
                format!("[{parameters}]: {value}")
            }
            NodeData::Constructor { parameters } => {
                format!("constructor({}): this", self.parameters(parameters))
            }
            NodeData::GetAccessor {
                name, type_node, ..
            } => {
                let (text, _) = self.property_name(*name)?;
                let value = self.return_type(*type_node);
                if accessors.setters.contains(&text) {
                    format!("{text}: {value}")
                } else {
                    format!("+{text}: {value}")
                }
            }
            NodeData::SetAccessor { name, parameters } => {
                let (text, _) = self.property_name(*name)?;
                if accessors.getters.contains(&text) {
                    return None;
                }
                let value = parameters
                    .first()
                    .and_then(|parameter| match arena.data(parameter) {
                        Some(NodeData::Parameter { type_node, .. }) => Some(*type_node),
                        _ => None,
                    })
                    .unwrap_or(NodeIndex::NONE);
                format!("-{text}: {}", self.return_type(value))
            }
            _ => self.print_type(member),
        };
        Some(format!("{prefix}{variance}{text}"))
    }

    /// `name: T`, `name?: T`, or `[computed]: (T) | void` for an optional
    /// computed key.
    fn property(&mut self, name: NodeIndex, question: bool, value: String) -> Option<String> {
        let (name, computed) = self.property_name(name)?;
        Some(match (question, computed) {
            (false, _) => format!("{name}: {value}"),
            (true, false) => format!("{name}?: {value}"),
            (true, true) => format!("{name}: ({value}) | void"),
        })
    }

    /// Printed member name and whether it was computed. `#private` names
    /// yield `None`.
    pub(crate) fn property_name(&mut self, name: NodeIndex) -> Option<(String, bool)> {
        let arena = self.arena();
        match arena.data(name)? {
            NodeData::Identifier { text } => Some((text.clone(), false)),
            NodeData::PrivateIdentifier { .. } => None,
            NodeData::StringLiteral { text } => Some((quote(text), false)),
            NodeData::NumericLiteral { text } => Some((text.clone(), false)),
            NodeData::ComputedPropertyName { expression } => match arena.data(*expression) {
                // `['key']` is an ordinary key.
                Some(NodeData::StringLiteral { text }) => Some((quote(text), false)),
                Some(NodeData::NumericLiteral { text }) => Some((text.clone(), false)),
                _ => Some((self.computed_property_name(*expression), true)),
            },
            _ => Some((self.print_type(name), false)),
        }
    }

    /// `[Symbol.iterator]` and `[Symbol.asyncIterator]` map to Flow's magic
    /// names; other computed keys are reported.
    fn computed_property_name(&mut self, expression: NodeIndex) -> String {
        let arena = self.arena();
        match arena.data(expression) {
            Some(NodeData::PropertyAccessExpression {
                expression: object,
                name,
            }) if arena.identifier_text(*object) == Some("Symbol") => {
                match arena.identifier_text(*name) {
                    Some("iterator") => return "@@iterator".to_string(),
                    Some("asyncIterator") => return "@@asyncIterator".to_string(),
                    _ => {}
                }
            }
            _ => {}
        }
        self.report(expression, FlowgenError::UnsupportedComputedProperty);
        let printed = match arena.data(expression) {
            Some(NodeData::Identifier { .. } | NodeData::PropertyAccessExpression { .. }) => {
                self.print_entity(expression, true)
            }
            _ => self.print_literal(expression),
        };
        format!("[typeof {printed}]")
    }
}
