//! Parser state - statement and declaration parsing methods.

use super::base::{NodeIndex, NodeList};
use super::node::{ModifierFlags, NodeData, NodeFlags};
use super::state::ParserState;
use flowgen_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    /// Parse one top-level or module-block statement. Returns NONE when the
    /// current token cannot start a statement; the caller skips it.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return self
                .arena
                .add(pos, self.prev_end, NodeData::EmptyStatement);
        }

        if self.is_token(SyntaxKind::ExportKeyword) {
            if let Some(statement) = self.try_parse_export_form(pos) {
                return statement;
            }
        }

        let modifiers = self.parse_declaration_modifiers();
        let statement = self.parse_declaration(pos, modifiers);
        if statement.is_none() {
            trace!(pos, token = ?self.token(), "no statement at token");
            self.error_declaration_expected();
            self.skip_to_statement_boundary();
            return NodeIndex::NONE;
        }
        self.arena.set_modifiers(statement, modifiers);
        statement
    }

    fn parse_declaration(&mut self, pos: u32, modifiers: ModifierFlags) -> NodeIndex {
        match self.token() {
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos),
            SyntaxKind::TypeKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_type_alias_declaration(pos)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos),
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if self.next_token_is_on_same_line_and(|k| {
                    k == SyntaxKind::Identifier
                        || k == SyntaxKind::StringLiteral
                        || (k.is_keyword() && !k.is_reserved_word())
                }) =>
            {
                self.parse_module_declaration(pos)
            }
            SyntaxKind::GlobalKeyword if self.next_token_is(SyntaxKind::OpenBraceToken) => {
                self.parse_global_augmentation(pos)
            }
            SyntaxKind::ImportKeyword
                if !self.look_ahead(|p| {
                    matches!(
                        p.next_token(),
                        SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                    )
                }) =>
            {
                self.parse_import_declaration_or_equals(pos)
            }
            _ => NodeIndex::NONE,
        }
    }

    /// Modifiers in front of a declaration: `export declare abstract class`.
    /// `const` is only a modifier in front of `enum`.
    fn parse_declaration_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::empty();
        loop {
            let token = self.token();
            let is_modifier = match token {
                SyntaxKind::ConstKeyword => self.next_token_is(SyntaxKind::EnumKeyword),
                SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword => self.next_token_can_follow_modifier(),
                _ => false,
            };
            if !is_modifier {
                return modifiers;
            }
            modifiers |= ModifierFlags::from_keyword(token);
            self.next_token();
        }
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            let kind = p.next_token();
            kind == SyntaxKind::Identifier
                || kind == SyntaxKind::OpenBraceToken
                || kind == SyntaxKind::AsteriskToken
                || kind.is_keyword()
        })
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token_is_on_same_line_and(|k| {
            k == SyntaxKind::Identifier || (k.is_keyword() && !k.is_reserved_word())
        })
    }

    fn skip_to_statement_boundary(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                _ => {}
            }
            self.next_token();
            if depth == 0 && self.has_preceding_line_break() && self.is_start_of_declaration() {
                return;
            }
        }
    }

    fn is_start_of_declaration(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
        )
    }

    // =========================================================================
    // Exports
    // =========================================================================

    /// `export =`, `export default <expr>`, `export {..}`, `export *`,
    /// `export as namespace`, and `export import X = ...`.
    fn try_parse_export_form(&mut self, pos: u32) -> Option<NodeIndex> {
        let next = self.look_ahead(|p| p.next_token());
        match next {
            SyntaxKind::EqualsToken => {
                self.next_token();
                self.next_token();
                let expression = self.parse_simple_expression();
                self.parse_semicolon();
                Some(self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::ExportAssignment {
                        is_export_equals: true,
                        expression,
                    },
                ))
            }
            SyntaxKind::DefaultKeyword => {
                let is_declaration = self.look_ahead(|p| {
                    p.next_token();
                    let kind = p.next_token();
                    matches!(
                        kind,
                        SyntaxKind::ClassKeyword
                            | SyntaxKind::FunctionKeyword
                            | SyntaxKind::InterfaceKeyword
                            | SyntaxKind::AbstractKeyword
                            | SyntaxKind::AsyncKeyword
                            | SyntaxKind::EnumKeyword
                            | SyntaxKind::DeclareKeyword
                    )
                });
                if is_declaration {
                    return None;
                }
                self.next_token();
                self.next_token();
                let expression = self.parse_simple_expression();
                self.parse_semicolon();
                Some(self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::ExportAssignment {
                        is_export_equals: false,
                        expression,
                    },
                ))
            }
            SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken => {
                self.next_token();
                Some(self.parse_export_declaration(pos, false))
            }
            SyntaxKind::TypeKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    matches!(
                        p.next_token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                    )
                }) =>
            {
                self.next_token();
                self.next_token();
                Some(self.parse_export_declaration(pos, true))
            }
            SyntaxKind::AsKeyword => {
                self.next_token();
                self.next_token();
                self.parse_expected(SyntaxKind::NamespaceKeyword);
                let name = self.parse_identifier();
                self.parse_semicolon();
                Some(self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::NamespaceExportDeclaration { name },
                ))
            }
            _ => None,
        }
    }

    /// After `export [type]`: `* [as ns] from "m"` or `{ a, b as c } [from "m"]`.
    fn parse_export_declaration(&mut self, pos: u32, is_type_only: bool) -> NodeIndex {
        let export_clause = if self.is_token(SyntaxKind::AsteriskToken) {
            self.next_token();
            if self.is_token(SyntaxKind::AsKeyword) {
                let ns_pos = self.token_pos();
                self.next_token();
                let name = self.parse_identifier_name();
                self.arena
                    .add(ns_pos, self.prev_end, NodeData::NamespaceExport { name })
            } else {
                NodeIndex::NONE
            }
        } else {
            let list_pos = self.token_pos();
            let elements = self.parse_specifier_list(true);
            self.arena
                .add(list_pos, self.prev_end, NodeData::NamedExports { elements })
        };
        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            self.parse_string_literal()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ExportDeclaration {
                is_type_only,
                export_clause,
                module_specifier,
            },
        )
    }

    /// `{ a, type b, c as d }` for imports and exports.
    fn parse_specifier_list(&mut self, is_export: bool) -> NodeList {
        let mut elements = NodeList::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_specifier(is_export));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        elements
    }

    fn parse_specifier(&mut self, is_export: bool) -> NodeIndex {
        let pos = self.token_pos();
        // `type` is a modifier unless it is the name itself: `{ type }`,
        // `{ type as t }`.
        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                let kind = p.next_token();
                if kind == SyntaxKind::AsKeyword {
                    // `type as as x` or `type as x`
                    let after = p.next_token();
                    return after == SyntaxKind::AsKeyword
                        || (p.is_identifier_or_keyword()
                            && p.next_token() != SyntaxKind::CommaToken
                            && !p.is_token(SyntaxKind::CloseBraceToken));
                }
                kind == SyntaxKind::Identifier
                    || kind == SyntaxKind::StringLiteral
                    || kind.is_keyword()
            });
        if is_type_only {
            self.next_token();
        }
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (first, self.parse_identifier_name())
        } else {
            (NodeIndex::NONE, first)
        };
        let data = if is_export {
            NodeData::ExportSpecifier {
                is_type_only,
                property_name,
                name,
            }
        } else {
            NodeData::ImportSpecifier {
                is_type_only,
                property_name,
                name,
            }
        };
        self.arena.add(pos, self.prev_end, data)
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn parse_import_declaration_or_equals(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::ImportKeyword);

        // Side-effect import: `import "m";`
        if self.is_token(SyntaxKind::StringLiteral) {
            let module_specifier = self.parse_string_literal();
            self.parse_semicolon();
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::ImportDeclaration {
                    import_clause: NodeIndex::NONE,
                    module_specifier,
                },
            );
        }

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                let kind = p.next_token();
                kind == SyntaxKind::OpenBraceToken
                    || kind == SyntaxKind::AsteriskToken
                    || ((kind == SyntaxKind::Identifier || kind.is_keyword())
                        && kind != SyntaxKind::FromKeyword)
                    || (kind == SyntaxKind::FromKeyword
                        && p.next_token() == SyntaxKind::FromKeyword)
            });
        if is_type_only {
            self.next_token();
        }

        let clause_pos = self.token_pos();
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };

        if name.is_some() && self.is_token(SyntaxKind::EqualsToken) {
            self.next_token();
            let module_reference = self.parse_module_reference();
            self.parse_semicolon();
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::ImportEqualsDeclaration {
                    is_type_only,
                    name,
                    module_reference,
                },
            );
        }

        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            self.parse_named_import_bindings()
        } else {
            NodeIndex::NONE
        };
        let import_clause = self.arena.add(
            clause_pos,
            self.prev_end,
            NodeData::ImportClause {
                is_type_only,
                name,
                named_bindings,
            },
        );
        self.parse_expected(SyntaxKind::FromKeyword);
        let module_specifier = self.parse_string_literal();
        self.parse_semicolon();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ImportDeclaration {
                import_clause,
                module_specifier,
            },
        )
    }

    fn parse_named_import_bindings(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            self.parse_expected(SyntaxKind::AsKeyword);
            let name = self.parse_identifier();
            return self
                .arena
                .add(pos, self.prev_end, NodeData::NamespaceImport { name });
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            let elements = self.parse_specifier_list(false);
            return self
                .arena
                .add(pos, self.prev_end, NodeData::NamedImports { elements });
        }
        self.error_unexpected_token();
        NodeIndex::NONE
    }

    /// `require("m")` or an entity name `A.B.C`.
    fn parse_module_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::RequireKeyword)
            && self.next_token_is(SyntaxKind::OpenParenToken)
        {
            self.next_token();
            self.next_token();
            let expression = self.parse_string_literal();
            self.parse_expected(SyntaxKind::CloseParenToken);
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::ExternalModuleReference { expression },
            );
        }
        self.parse_entity_name(true)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_interface_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::InterfaceDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_type_alias_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeAliasDeclaration {
                name,
                type_parameters,
                type_node,
            },
        )
    }

    fn parse_class_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_class_members();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ClassDeclaration {
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_heritage_clauses(&mut self) -> NodeList {
        let mut clauses = NodeList::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let pos = self.token_pos();
            let token = self.token();
            self.next_token();
            let mut types = NodeList::new();
            loop {
                let type_pos = self.token_pos();
                let expression = self.parse_property_access_chain();
                let type_arguments = self.parse_type_arguments();
                types.push(self.arena.add(
                    type_pos,
                    self.prev_end,
                    NodeData::ExpressionWithTypeArguments {
                        expression,
                        type_arguments,
                    },
                ));
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            clauses.push(
                self.arena
                    .add(pos, self.prev_end, NodeData::HeritageClause { token, types }),
            );
        }
        clauses
    }

    fn parse_enum_declaration(&mut self, pos: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let mut members = NodeList::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member_pos = self.token_pos();
            let member_name = self.parse_property_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_simple_expression()
            } else {
                NodeIndex::NONE
            };
            members.push(self.arena.add(
                member_pos,
                self.prev_end,
                NodeData::EnumMember {
                    name: member_name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let index = self
            .arena
            .add(pos, self.prev_end, NodeData::EnumDeclaration { name, members });
        if modifiers.contains(ModifierFlags::CONST) {
            self.arena.set_flags(index, NodeFlags::CONST);
        }
        index
    }

    fn parse_variable_statement(&mut self, pos: u32) -> NodeIndex {
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::empty(),
        };
        self.next_token();
        let mut declarations = NodeList::new();
        loop {
            let decl_pos = self.token_pos();
            let name = self.parse_binding_name();
            self.parse_optional(SyntaxKind::ExclamationToken);
            let type_node = self.parse_type_annotation();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_simple_expression()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.add(
                decl_pos,
                self.prev_end,
                NodeData::VariableDeclaration {
                    name,
                    type_node,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_semicolon();
        let index = self
            .arena
            .add(pos, self.prev_end, NodeData::VariableStatement { declarations });
        self.arena.set_flags(index, flags);
        index
    }

    fn parse_function_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_node = self.parse_return_annotation();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_block();
        } else {
            self.parse_semicolon();
        }
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::FunctionDeclaration {
                name,
                type_parameters,
                parameters,
                type_node,
            },
        )
    }

    // =========================================================================
    // Modules
    // =========================================================================

    /// `namespace A.B { }`, `module A { }`, `module "m" { }`, `module "m";`
    fn parse_module_declaration(&mut self, pos: u32) -> NodeIndex {
        let keyword_flags = if self.is_token(SyntaxKind::NamespaceKeyword) {
            NodeFlags::NAMESPACE
        } else {
            NodeFlags::empty()
        };
        self.next_token();

        if self.is_token(SyntaxKind::StringLiteral) {
            let name = self.parse_string_literal();
            let body = if self.is_token(SyntaxKind::OpenBraceToken) {
                self.parse_module_block()
            } else {
                self.parse_semicolon();
                NodeIndex::NONE
            };
            return self
                .arena
                .add(pos, self.prev_end, NodeData::ModuleDeclaration { name, body });
        }

        self.parse_namespace_body(pos, keyword_flags)
    }

    /// One segment of a dotted namespace name, then either the next segment
    /// or the block.
    fn parse_namespace_body(&mut self, pos: u32, flags: NodeFlags) -> NodeIndex {
        let name = self.parse_identifier();
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_pos = self.token_pos();
            let inner = self.parse_namespace_body(inner_pos, flags | NodeFlags::NESTED_NAMESPACE);
            self.arena.set_modifiers(inner, ModifierFlags::EXPORT);
            inner
        } else {
            self.parse_module_block()
        };
        let index = self
            .arena
            .add(pos, self.prev_end, NodeData::ModuleDeclaration { name, body });
        self.arena.set_flags(index, flags);
        index
    }

    fn parse_global_augmentation(&mut self, pos: u32) -> NodeIndex {
        let name_pos = self.token_pos();
        self.next_token();
        let name = self.arena.add(
            name_pos,
            self.prev_end,
            NodeData::Identifier {
                text: "global".to_string(),
            },
        );
        let body = self.parse_module_block();
        let index = self
            .arena
            .add(pos, self.prev_end, NodeData::ModuleDeclaration { name, body });
        self.arena.set_flags(index, NodeFlags::GLOBAL_AUGMENTATION);
        index
    }

    fn parse_module_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut statements = NodeList::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self
                .arena
                .add(pos, self.prev_end, NodeData::ModuleBlock { statements });
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start
                && !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena
            .add(pos, self.prev_end, NodeData::ModuleBlock { statements })
    }
}
