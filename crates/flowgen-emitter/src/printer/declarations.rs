//! Interfaces, aliases, classes, enums, variables and functions.

use super::Printer;
use super::statements::PrintScope;
use super::substitution::property_key;
use flowgen_parser::{ModifierFlags, NodeData, NodeIndex, NodeList};
use flowgen_scanner::SyntaxKind;

impl<'a> Printer<'a> {
    /// One grouped declaration. `statics` are the values of a namespace this
    /// class or enum absorbed.
    pub(crate) fn print_declaration(
        &mut self,
        node: NodeIndex,
        merged: &[NodeIndex],
        statics: &[String],
        scope: &PrintScope,
    ) -> String {
        let arena = self.arena();
        match arena.data(node) {
            Some(NodeData::InterfaceDeclaration { .. }) => self.interface_declaration(node, merged, scope),
            Some(NodeData::TypeAliasDeclaration {
                type_parameters,
                type_node,
                ..
            }) => {
                let modifier = self.type_modifier(node, scope);
                let name = self.declared_name(node, scope);
                let generics = self.type_parameters(type_parameters.as_ref(), true);
                let value = self.print_type(*type_node);
                format!("{modifier}type {name}{generics} = {value};")
            }
            Some(NodeData::ClassDeclaration { .. }) => self.class_declaration(node, statics, scope),
            Some(NodeData::EnumDeclaration { members, .. }) => {
                self.enum_declaration(node, members, statics, scope)
            }
            Some(NodeData::VariableStatement { declarations }) => {
                self.variable_statement(node, declarations, scope)
            }
            _ => String::new(),
        }
    }

    // =========================================================================
    // Modifiers and names
    // =========================================================================

    /// Prefix for interfaces and aliases.
    fn type_modifier(&self, node: NodeIndex, scope: &PrintScope) -> &'static str {
        match (self.is_exported(node, scope), scope.in_module) {
            (true, false) => "export ",
            (true, true) => "declare export ",
            (false, _) => "declare ",
        }
    }

    /// Prefix for classes, functions, variables and enums.
    fn value_modifier(&self, node: NodeIndex, scope: &PrintScope) -> &'static str {
        let is_default = self
            .arena()
            .get(node)
            .is_some_and(|n| n.has_modifier(ModifierFlags::DEFAULT));
        match (self.is_exported(node, scope), is_default) {
            (true, true) => "declare export default ",
            (true, false) => "declare export ",
            (false, _) => "declare ",
        }
    }

    fn is_exported(&self, node: NodeIndex, scope: &PrintScope) -> bool {
        !scope.in_namespace
            && self
                .arena()
                .get(node)
                .is_some_and(|n| n.has_modifier(ModifierFlags::EXPORT))
    }

    /// Printed name of a declaration: renamed when it collides with a value,
    /// flattened inside namespaces.
    fn declared_name(&self, node: NodeIndex, scope: &PrintScope) -> String {
        let arena = self.arena();
        let written = arena.declaration_name(node).unwrap_or(crate::tree::UNNAMED_DECLARATION);
        let renamed = self
            .checker()
            .symbol_at_location(node)
            .and_then(|id| self.ctx.renames.get(id));
        scope.qualify(renamed.unwrap_or(written))
    }

    fn heritage(&mut self, clauses: &NodeList) -> (Vec<String>, Vec<String>) {
        let arena = self.arena();
        let mut extends = Vec::new();
        let mut implements = Vec::new();
        let saved = std::mem::replace(&mut self.in_heritage, true);
        for clause in clauses.iter() {
            let Some(NodeData::HeritageClause { token, types }) = arena.data(clause) else {
                continue;
            };
            for heritage_type in types.iter() {
                let printed = self.print_type(heritage_type);
                if *token == SyntaxKind::ImplementsKeyword {
                    implements.push(printed);
                } else {
                    extends.push(printed);
                }
            }
        }
        self.in_heritage = saved;
        (extends, implements)
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    /// Native `interface`, an intersection with the extended types, or an
    /// object alias with spreads in record mode. Re-opened interfaces
    /// contribute their members and heritage to the first.
    fn interface_declaration(&mut self, node: NodeIndex, merged: &[NodeIndex], scope: &PrintScope) -> String {
        let arena = self.arena();
        let modifier = self.type_modifier(node, scope);
        let name = self.declared_name(node, scope);
        let mut generics = String::new();
        let mut members = Vec::new();
        let mut extends = Vec::new();
        for &declaration in std::iter::once(&node).chain(merged) {
            let Some(NodeData::InterfaceDeclaration {
                type_parameters,
                heritage_clauses,
                members: list,
                ..
            }) = arena.data(declaration)
            else {
                continue;
            };
            if generics.is_empty() {
                generics = self.type_parameters(type_parameters.as_ref(), true);
            }
            let (extended, implemented) = self.heritage(heritage_clauses);
            extends.extend(extended);
            extends.extend(implemented);
            members.extend(self.type_members(list));
        }

        if self.options().interface_records {
            let mut fields: Vec<String> = extends.iter().map(|h| format!("...$Exact<{h}>")).collect();
            fields.extend(members);
            let object = self.default_object_type(&fields);
            return format!("{modifier}type {name}{generics} = {object};");
        }
        if !extends.is_empty() {
            let object = Self::object_type(&members, true);
            return format!(
                "{modifier}type {name}{generics} = {object} & {};",
                extends.join(" & ")
            );
        }
        if members.is_empty() {
            return format!("{modifier}interface {name}{generics} {{}}");
        }
        let body: Vec<String> = members.iter().map(|m| format!("  {m}")).collect();
        format!("{modifier}interface {name}{generics} {{\n{}\n}}", body.join(",\n"))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn class_declaration(&mut self, node: NodeIndex, statics: &[String], scope: &PrintScope) -> String {
        let arena = self.arena();
        let Some(NodeData::ClassDeclaration {
            type_parameters,
            heritage_clauses,
            members,
            ..
        }) = arena.data(node)
        else {
            return String::new();
        };
        let modifier = self.value_modifier(node, scope);
        let name = self.declared_name(node, scope);
        let generics = self.type_parameters(type_parameters.as_ref(), true);
        let (extends, implements) = self.heritage(heritage_clauses);

        let mut header = format!("{modifier}class {name}{generics}");
        if !extends.is_empty() {
            header.push_str(" extends ");
            header.push_str(&extends.join(", "));
        }
        if !implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&implements.join(", "));
        }

        let mut body = self.class_members(members);
        body.extend(statics.iter().map(|s| format!("static {s}")));
        if body.is_empty() {
            return format!("{header} {{}}");
        }
        let lines: Vec<String> = body.iter().map(|m| format!("  {m};")).collect();
        format!("{header} {{\n{}\n}}", lines.join("\n"))
    }

    // =========================================================================
    // Enums
    // =========================================================================

    /// `declare var E: {| +A: 0, +B: "b" |};`. Uninitialized members count
    /// up from the previous numeric value, or take their ordinal when there
    /// is none.
    fn enum_declaration(
        &mut self,
        node: NodeIndex,
        members: &NodeList,
        statics: &[String],
        scope: &PrintScope,
    ) -> String {
        let arena = self.arena();
        let modifier = self.value_modifier(node, scope);
        let name = self.declared_name(node, scope);
        let mut fields = Vec::with_capacity(members.len() + statics.len());
        let mut previous: Option<i64> = None;
        for (ordinal, member) in members.iter().enumerate() {
            let Some(NodeData::EnumMember {
                name: key,
                initializer,
            }) = arena.data(member)
            else {
                continue;
            };
            let Some(key) = arena.identifier_text(*key) else {
                continue;
            };
            let value = if initializer.is_none() {
                let next = previous.map_or(ordinal as i64, |v| v + 1);
                previous = Some(next);
                next.to_string()
            } else {
                match enum_initializer(self, *initializer) {
                    EnumValue::Number(text, parsed) => {
                        previous = parsed;
                        text
                    }
                    EnumValue::String(text) => {
                        previous = None;
                        text
                    }
                    EnumValue::Computed => {
                        previous = None;
                        "number".to_string()
                    }
                }
            };
            fields.push(format!("+{}: {value}", property_key(key)));
        }
        fields.extend(statics.iter().cloned());
        format!("{modifier}var {name}: {};", Self::object_type(&fields, false))
    }

    // =========================================================================
    // Variables and functions
    // =========================================================================

    fn variable_statement(&mut self, node: NodeIndex, declarations: &NodeList, scope: &PrintScope) -> String {
        let arena = self.arena();
        let modifier = self.value_modifier(node, scope);
        let mut lines = Vec::with_capacity(declarations.len());
        for declaration in declarations.iter() {
            let Some(NodeData::VariableDeclaration {
                name,
                type_node,
                initializer,
            }) = arena.data(declaration)
            else {
                continue;
            };
            let Some(name) = arena.identifier_text(*name) else {
                continue;
            };
            let value = if type_node.is_some() {
                self.print_type(*type_node)
            } else if initializer.is_some() {
                self.print_literal(*initializer)
            } else {
                "any".to_string()
            };
            lines.push(format!("{modifier}var {}: {value};", scope.qualify(name)));
        }
        lines.join("\n")
    }

    /// One `declare function` line per overload.
    pub(crate) fn function_group(&mut self, name: &str, overloads: &[NodeIndex], scope: &PrintScope) -> String {
        let qualified = scope.qualify(name);
        let mut lines = Vec::with_capacity(overloads.len());
        for &overload in overloads {
            let modifier = self.value_modifier(overload, scope);
            let signature = self.call_signature(overload);
            lines.push(format!("{modifier}function {qualified}{signature};"));
        }
        lines.join("\n")
    }

    /// `<T>(a: A): R` of a function declaration; type parameter defaults
    /// are dropped.
    pub(crate) fn call_signature(&mut self, function: NodeIndex) -> String {
        let arena = self.arena();
        let Some(NodeData::FunctionDeclaration {
            type_parameters,
            parameters,
            type_node,
            ..
        }) = arena.data(function)
        else {
            return "(): any".to_string();
        };
        let generics = self.type_parameters(type_parameters.as_ref(), false);
        let parameters = self.parameters(parameters);
        let result = self.return_type(*type_node);
        format!("{generics}({parameters}): {result}")
    }
}

enum EnumValue {
    /// Printed number and its value when it is an integer.
    Number(String, Option<i64>),
    String(String),
    Computed,
}

fn enum_initializer(printer: &mut Printer<'_>, initializer: NodeIndex) -> EnumValue {
    let arena = printer.arena();
    match arena.data(initializer) {
        Some(NodeData::StringLiteral { .. }) => EnumValue::String(printer.print_literal(initializer)),
        Some(NodeData::NumericLiteral { text }) => EnumValue::Number(text.clone(), text.parse().ok()),
        Some(NodeData::PrefixUnaryExpression {
            operator: SyntaxKind::MinusToken,
            operand,
        }) => match arena.data(*operand) {
            Some(NodeData::NumericLiteral { text }) => EnumValue::Number(
                format!("-{text}"),
                text.parse::<i64>().ok().map(|v| -v),
            ),
            _ => EnumValue::Computed,
        },
        Some(NodeData::ParenthesizedExpression { expression }) => enum_initializer(printer, *expression),
        _ => EnumValue::Computed,
    }
}
