//! Parser state - type parsing methods.

use super::base::{NodeIndex, NodeList};
use super::node::{ModifierFlags, NodeData};
use super::state::ParserState;
use flowgen_common::diagnostics::diagnostic_messages;
use flowgen_common::limits::MAX_PARSER_DEPTH;
use flowgen_scanner::SyntaxKind;

impl ParserState {
    /// Parse a type, including function types and conditional types.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        self.parse_type_worker(false)
    }

    fn parse_type_worker(&mut self, no_conditional: bool) -> NodeIndex {
        if self.depth >= MAX_PARSER_DEPTH {
            self.error_at_current(&diagnostic_messages::TYPE_EXPECTED, &[]);
            return self.missing_type();
        }
        self.depth += 1;
        let result = self.parse_type_inner(no_conditional);
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self, no_conditional: bool) -> NodeIndex {
        if self.is_start_of_function_type() {
            return self.parse_function_or_constructor_type(false);
        }
        if self.is_token(SyntaxKind::NewKeyword)
            || (self.is_token(SyntaxKind::AbstractKeyword)
                && self.next_token_is(SyntaxKind::NewKeyword))
        {
            self.parse_optional(SyntaxKind::AbstractKeyword);
            return self.parse_function_or_constructor_type(true);
        }

        let pos = self.token_pos();
        let check_type = self.parse_union_type();
        if no_conditional
            || !self.is_token(SyntaxKind::ExtendsKeyword)
            || self.has_preceding_line_break()
        {
            return check_type;
        }

        self.next_token();
        let extends_type = self.parse_type_worker(true);
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.parse_type_worker(false);
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.parse_type_worker(false);
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            },
        )
    }

    fn missing_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add(
            pos,
            pos,
            NodeData::KeywordType {
                keyword: SyntaxKind::AnyKeyword,
            },
        )
    }

    // =========================================================================
    // Union / intersection / operators
    // =========================================================================

    fn parse_union_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type();
        if !self.is_token(SyntaxKind::BarToken) {
            return first;
        }
        let mut types = NodeList::new();
        types.push(first);
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type());
        }
        self.arena
            .add(pos, self.prev_end, NodeData::UnionType { types })
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator();
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }
        let mut types = NodeList::new();
        types.push(first);
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator());
        }
        self.arena
            .add(pos, self.prev_end, NodeData::IntersectionType { types })
    }

    /// Union and intersection members may themselves be function types:
    /// `A | (() => B)` is the common case, but `A | () => B` is legal too.
    fn parse_type_operator(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let operator = self.token();
                self.next_token();
                let type_node = self.parse_type_operator();
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::TypeOperator {
                        operator,
                        type_node,
                    },
                )
            }
            SyntaxKind::InferKeyword => {
                self.next_token();
                let param_pos = self.token_pos();
                let name = self.parse_identifier();
                let constraint = if self.is_token(SyntaxKind::ExtendsKeyword) {
                    // `infer U extends X ? ...` keeps the extends for the
                    // enclosing conditional unless a constraint clearly follows.
                    let is_constraint = self.look_ahead(|p| {
                        p.next_token();
                        p.parse_type_worker(true);
                        !p.is_token(SyntaxKind::QuestionToken)
                    });
                    if is_constraint {
                        self.next_token();
                        self.parse_type_worker(true)
                    } else {
                        NodeIndex::NONE
                    }
                } else {
                    NodeIndex::NONE
                };
                let type_parameter = self.arena.add(
                    param_pos,
                    self.prev_end,
                    NodeData::TypeParameter {
                        name,
                        constraint,
                        default: NodeIndex::NONE,
                    },
                );
                self.arena
                    .add(pos, self.prev_end, NodeData::InferType { type_parameter })
            }
            _ if self.is_start_of_function_type() => self.parse_function_or_constructor_type(false),
            _ => self.parse_postfix_type(),
        }
    }

    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut ty = self.parse_primary_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                ty = self
                    .arena
                    .add(pos, self.prev_end, NodeData::ArrayType { element_type: ty });
            } else {
                let index_type = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                ty = self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::IndexedAccessType {
                        object_type: ty,
                        index_type,
                    },
                );
            }
        }
        ty
    }

    // =========================================================================
    // Primary types
    // =========================================================================

    fn parse_primary_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
                if !self.next_token_is(SyntaxKind::DotToken) =>
            {
                let keyword = self.token();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::KeywordType { keyword })
            }
            SyntaxKind::ThisKeyword if !self.next_token_is(SyntaxKind::DotToken) => {
                self.next_token();
                self.arena.add(pos, self.prev_end, NodeData::ThisType)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let keyword = self.token();
                self.next_token();
                let literal = self
                    .arena
                    .add(pos, self.prev_end, NodeData::KeywordLiteral { keyword });
                self.arena
                    .add(pos, self.prev_end, NodeData::LiteralType { literal })
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral => {
                let literal = self.parse_literal_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::LiteralType { literal })
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|p| {
                    matches!(
                        p.next_token(),
                        SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
                    )
                }) =>
            {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_literal_token();
                let literal = self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::PrefixUnaryExpression { operator, operand },
                );
                self.arena
                    .add(pos, self.prev_end, NodeData::LiteralType { literal })
            }
            SyntaxKind::TemplateLiteral => {
                let text = self.scanner.get_token_text().to_string();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::TemplateLiteralType { text })
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::ImportKeyword => self.parse_import_type(false),
            SyntaxKind::OpenBraceToken => {
                if self.is_start_of_mapped_type() {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_object_type_members();
                    self.arena
                        .add(pos, self.prev_end, NodeData::TypeLiteral { members })
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena
                    .add(pos, self.prev_end, NodeData::ParenthesizedType { type_node })
            }
            _ if self.is_identifier_or_keyword() => self.parse_type_reference(),
            _ => {
                self.error_at_current(&diagnostic_messages::TYPE_EXPECTED, &[]);
                self.missing_type()
            }
        }
    }

    fn parse_literal_token(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let text = self.token_value();
        let data = match self.token() {
            SyntaxKind::NumericLiteral => NodeData::NumericLiteral { text },
            SyntaxKind::BigIntLiteral => NodeData::BigIntLiteral { text },
            _ => NodeData::StringLiteral { text },
        };
        self.next_token();
        self.arena.add(pos, self.prev_end, data)
    }

    fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name(true);
        let type_arguments = if !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            None
        };
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeReference {
                type_name,
                type_arguments,
            },
        )
    }

    fn parse_type_query(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        if self.is_token(SyntaxKind::ImportKeyword) {
            return self.parse_import_type_at(pos, true);
        }
        let expr_name = self.parse_entity_name(true);
        let type_arguments = if !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            None
        };
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            },
        )
    }

    fn parse_import_type(&mut self, is_type_of: bool) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_import_type_at(pos, is_type_of)
    }

    /// `import("m").A.B<T>`; `pos` includes a leading `typeof`.
    fn parse_import_type_at(&mut self, pos: u32, is_type_of: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::ImportKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let argument = self.parse_type();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            self.parse_entity_name(true)
        } else {
            NodeIndex::NONE
        };
        let type_arguments = self.parse_type_arguments();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ImportType {
                is_type_of,
                argument,
                qualifier,
                type_arguments,
            },
        )
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::PlusToken) || p.is_token(SyntaxKind::MinusToken) {
                return p.next_token() == SyntaxKind::ReadonlyKeyword;
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            p.is_token(SyntaxKind::OpenBracketToken) && {
                p.next_token();
                p.is_identifier_or_keyword() && p.next_token() == SyntaxKind::InKeyword
            }
        })
    }

    /// `{ readonly [K in T as N]?: V }`
    fn parse_mapped_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let readonly_token = match self.token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.token();
                self.next_token();
                self.parse_expected(SyntaxKind::ReadonlyKeyword);
                Some(token)
            }
            SyntaxKind::ReadonlyKeyword => {
                self.next_token();
                Some(SyntaxKind::ReadonlyKeyword)
            }
            _ => None,
        };
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let param_pos = self.token_pos();
        let name = self.parse_identifier_name();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        let type_parameter = self.arena.add(
            param_pos,
            self.prev_end,
            NodeData::TypeParameter {
                name,
                constraint,
                default: NodeIndex::NONE,
            },
        );
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let question_token = match self.token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.token();
                self.next_token();
                self.parse_expected(SyntaxKind::QuestionToken);
                Some(token)
            }
            SyntaxKind::QuestionToken => {
                self.next_token();
                Some(SyntaxKind::QuestionToken)
            }
            _ => None,
        };
        let type_node = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.parse_optional(SyntaxKind::CommaToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::MappedType {
                readonly_token,
                type_parameter,
                name_type,
                question_token,
                type_node,
            },
        )
    }

    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_tuple_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena
            .add(pos, self.prev_end, NodeData::TupleType { elements })
    }

    fn parse_tuple_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_named = self.look_ahead(|p| {
            p.parse_optional(SyntaxKind::DotDotDotToken);
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.parse_optional(SyntaxKind::QuestionToken);
            p.is_token(SyntaxKind::ColonToken)
        });
        if is_named {
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_identifier_name();
            let question = self.parse_optional(SyntaxKind::QuestionToken);
            self.parse_expected(SyntaxKind::ColonToken);
            let type_node = self.parse_type();
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::NamedTupleMember {
                    dot_dot_dot,
                    name,
                    question,
                    type_node,
                },
            );
        }
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_node = self.parse_type();
            return self
                .arena
                .add(pos, self.prev_end, NodeData::RestType { type_node });
        }
        let type_node = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            return self
                .arena
                .add(pos, self.prev_end, NodeData::OptionalType { type_node });
        }
        type_node
    }

    // =========================================================================
    // Function types, signatures, parameters
    // =========================================================================

    fn is_start_of_function_type(&mut self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::CloseParenToken) || p.is_token(SyntaxKind::DotDotDotToken) {
                return true;
            }
            if p.skip_parameter_start() {
                // `(a:`, `(a,`, `(a?`, `(a=` or `(a) =>`
                if matches!(
                    p.token(),
                    SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::QuestionToken
                        | SyntaxKind::EqualsToken
                ) {
                    return true;
                }
                if p.parse_optional(SyntaxKind::CloseParenToken)
                    && p.is_token(SyntaxKind::EqualsGreaterThanToken)
                {
                    return true;
                }
            }
            false
        })
    }

    fn skip_parameter_start(&mut self) -> bool {
        while self.token().is_modifier() && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier_or_keyword()
        }) {
            self.next_token();
        }
        if self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            return true;
        }
        if self.is_token(SyntaxKind::OpenBracketToken) || self.is_token(SyntaxKind::OpenBraceToken)
        {
            let mut depth = 0u32;
            loop {
                match self.token() {
                    SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => depth += 1,
                    SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken => {
                        depth -= 1;
                        if depth == 0 {
                            self.next_token();
                            return true;
                        }
                    }
                    SyntaxKind::EndOfFileToken => return false,
                    _ => {}
                }
                self.next_token();
            }
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self, is_constructor: bool) -> NodeIndex {
        let pos = self.token_pos();
        if is_constructor {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let type_node = self.parse_return_type();
        let data = if is_constructor {
            NodeData::ConstructorType {
                type_parameters,
                parameters,
                type_node,
            }
        } else {
            NodeData::FunctionType {
                type_parameters,
                parameters,
                type_node,
            }
        };
        self.arena.add(pos, self.prev_end, data)
    }

    /// Return type after `:` or `=>`, allowing `x is T` and `asserts x`.
    pub(crate) fn parse_return_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let asserts = self.is_token(SyntaxKind::AssertsKeyword)
            && self.next_token_is_on_same_line_and(|k| {
                k == SyntaxKind::Identifier || k == SyntaxKind::ThisKeyword || k.is_keyword()
            });
        if asserts {
            self.next_token();
        }
        let is_predicate = asserts
            || ((self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
                && self.next_token_is_on_same_line_and(|k| k == SyntaxKind::IsKeyword));
        if !is_predicate {
            return self.parse_type();
        }
        let parameter_name = if self.is_token(SyntaxKind::ThisKeyword) {
            let this_pos = self.token_pos();
            self.next_token();
            self.arena.add(this_pos, self.prev_end, NodeData::ThisType)
        } else {
            self.parse_identifier_name()
        };
        let type_node = if self.parse_optional(SyntaxKind::IsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypePredicate {
                asserts,
                parameter_name,
                type_node,
            },
        )
    }

    /// `: T` annotation, or NONE.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    /// `: R` return annotation, or NONE.
    pub(crate) fn parse_return_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_return_type()
        } else {
            NodeIndex::NONE
        }
    }

    pub(crate) fn parse_type_arguments(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();
        let mut arguments = NodeList::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            arguments.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(arguments)
    }

    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();
        let mut parameters = NodeList::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_type_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(parameters)
    }

    fn parse_type_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        // Variance and `const` modifiers: `<in out T>`, `<const T>`.
        while matches!(
            self.token(),
            SyntaxKind::InKeyword | SyntaxKind::OutKeyword | SyntaxKind::ConstKeyword
        ) && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
        }) {
            modifiers |= ModifierFlags::from_keyword(self.token());
            self.next_token();
        }
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let index = self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            },
        );
        self.arena.set_modifiers(index, modifiers);
        index
    }

    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        let mut parameters = NodeList::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return parameters;
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        while self.token().is_modifier()
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword()
                    || p.is_token(SyntaxKind::OpenBraceToken)
                    || p.is_token(SyntaxKind::OpenBracketToken)
            })
        {
            modifiers |= ModifierFlags::from_keyword(self.token());
            self.next_token();
        }
        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let question = self.parse_optional(SyntaxKind::QuestionToken);
        let type_node = self.parse_type_annotation();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_simple_expression()
        } else {
            NodeIndex::NONE
        };
        let index = self.arena.add(
            pos,
            self.prev_end,
            NodeData::Parameter {
                dot_dot_dot,
                name,
                question,
                type_node,
                initializer,
            },
        );
        self.arena.set_modifiers(index, modifiers);
        index
    }

    /// Identifier, `this`, or an object/array binding pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => {
                self.next_token();
                let mut elements = NodeList::new();
                while !self.is_token(SyntaxKind::CloseBraceToken)
                    && !self.is_token(SyntaxKind::EndOfFileToken)
                {
                    elements.push(self.parse_object_binding_element());
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                self.parse_expected(SyntaxKind::CloseBraceToken);
                self.arena
                    .add(pos, self.prev_end, NodeData::ObjectBindingPattern { elements })
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let mut elements = NodeList::new();
                while !self.is_token(SyntaxKind::CloseBracketToken)
                    && !self.is_token(SyntaxKind::EndOfFileToken)
                {
                    if self.is_token(SyntaxKind::CommaToken) {
                        let hole = self.token_pos();
                        elements.push(self.arena.add(hole, hole, NodeData::OmittedExpression));
                    } else {
                        let element_pos = self.token_pos();
                        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
                        let name = self.parse_binding_name();
                        self.skip_binding_initializer();
                        elements.push(self.arena.add(
                            element_pos,
                            self.prev_end,
                            NodeData::BindingElement {
                                dot_dot_dot,
                                property_name: NodeIndex::NONE,
                                name,
                            },
                        ));
                    }
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena
                    .add(pos, self.prev_end, NodeData::ArrayBindingPattern { elements })
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::Identifier {
                        text: "this".to_string(),
                    },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
        let first = self.parse_property_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
            (first, self.parse_binding_name())
        } else {
            (NodeIndex::NONE, first)
        };
        self.skip_binding_initializer();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::BindingElement {
                dot_dot_dot,
                property_name,
                name,
            },
        )
    }

    fn skip_binding_initializer(&mut self) {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_simple_expression();
        }
    }
}
