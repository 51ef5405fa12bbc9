//! Parser state - interface, type literal and class member parsing.

use super::base::{NodeIndex, NodeList};
use super::node::{ModifierFlags, NodeData};
use super::state::ParserState;
use flowgen_scanner::SyntaxKind;

impl ParserState {
    /// `{ members }` of an interface or type literal.
    pub(crate) fn parse_object_type_members(&mut self) -> NodeList {
        let mut members = NodeList::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if !self.parse_optional(SyntaxKind::SemicolonToken) {
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.token_pos() == start {
                self.error_unexpected_token();
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            return self.parse_signature_member(pos, false);
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead(|p| {
                matches!(
                    p.next_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            })
        {
            self.next_token();
            return self.parse_signature_member(pos, true);
        }

        let modifiers = self.parse_member_modifiers();
        if self.is_index_signature() {
            let index = self.parse_index_signature(pos);
            self.arena.set_modifiers(index, modifiers);
            return index;
        }
        if let Some(accessor) = self.try_parse_accessor(pos, false) {
            self.arena.set_modifiers(accessor, modifiers);
            return accessor;
        }
        if !self.is_property_name_start() {
            return NodeIndex::NONE;
        }

        let name = self.parse_property_name();
        let question = self.parse_optional(SyntaxKind::QuestionToken);
        let index = if self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_node = self.parse_return_annotation();
            self.arena.add(
                pos,
                self.prev_end,
                NodeData::MethodSignature {
                    name,
                    question,
                    type_parameters,
                    parameters,
                    type_node,
                },
            )
        } else {
            let type_node = self.parse_type_annotation();
            // Initializers are invalid in signatures but show up in the wild.
            if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_simple_expression();
            }
            self.arena.add(
                pos,
                self.prev_end,
                NodeData::PropertySignature {
                    name,
                    question,
                    type_node,
                },
            )
        };
        self.arena.set_modifiers(index, modifiers);
        index
    }

    fn parse_signature_member(&mut self, pos: u32, is_construct: bool) -> NodeIndex {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_node = self.parse_return_annotation();
        let data = if is_construct {
            NodeData::ConstructSignature {
                type_parameters,
                parameters,
                type_node,
            }
        } else {
            NodeData::CallSignature {
                type_parameters,
                parameters,
                type_node,
            }
        };
        self.arena.add(pos, self.prev_end, data)
    }

    /// Member modifiers; a modifier keyword followed by `(`, `:`, `?`, `;`
    /// or `<` is a member name instead.
    fn parse_member_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::empty();
        while self.token().is_modifier() {
            let can_follow = self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_property_name_start() || p.is_token(SyntaxKind::AsteriskToken))
            });
            if !can_follow {
                break;
            }
            modifiers |= ModifierFlags::from_keyword(self.token());
            self.next_token();
        }
        modifiers
    }

    fn is_index_signature(&mut self) -> bool {
        if !self.is_token(SyntaxKind::OpenBracketToken) {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::DotDotDotToken) {
                return true;
            }
            if !p.is_identifier_or_keyword() {
                return false;
            }
            matches!(
                p.next_token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken
            )
        })
    }

    /// `[key: string]: T`
    fn parse_index_signature(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut parameters = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let param_pos = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_identifier_name();
            let type_node = self.parse_type_annotation();
            parameters.push(self.arena.add(
                param_pos,
                self.prev_end,
                NodeData::Parameter {
                    dot_dot_dot,
                    name,
                    question: false,
                    type_node,
                    initializer: NodeIndex::NONE,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let type_node = self.parse_type_annotation();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::IndexSignature {
                parameters,
                type_node,
            },
        )
    }

    /// `get name(): T` / `set name(v: T)`, when `get`/`set` is not itself the
    /// member name.
    fn try_parse_accessor(&mut self, pos: u32, allow_body: bool) -> Option<NodeIndex> {
        let is_get = self.is_token(SyntaxKind::GetKeyword);
        if !is_get && !self.is_token(SyntaxKind::SetKeyword) {
            return None;
        }
        let is_accessor = self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_property_name_start()
        });
        if !is_accessor {
            return None;
        }
        self.next_token();
        let name = self.parse_property_name();
        self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_node = self.parse_return_annotation();
        if allow_body && self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_block();
        }
        let data = if is_get {
            NodeData::GetAccessor {
                name,
                parameters,
                type_node,
            }
        } else {
            NodeData::SetAccessor { name, parameters }
        };
        Some(self.arena.add(pos, self.prev_end, data))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_class_members(&mut self) -> NodeList {
        let mut members = NodeList::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let start = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            self.parse_optional(SyntaxKind::SemicolonToken);
            if self.token_pos() == start {
                self.error_unexpected_token();
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let modifiers = self.parse_member_modifiers();

        if self.is_index_signature() {
            let index = self.parse_index_signature(pos);
            self.arena.set_modifiers(index, modifiers);
            return index;
        }
        if let Some(accessor) = self.try_parse_accessor(pos, true) {
            self.arena.set_modifiers(accessor, modifiers);
            return accessor;
        }
        if self.is_token(SyntaxKind::ConstructorKeyword)
            && self.next_token_is(SyntaxKind::OpenParenToken)
        {
            self.next_token();
            let parameters = self.parse_parameters();
            // Constructors have no return type, but tolerate one.
            self.parse_return_annotation();
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.skip_block();
            }
            let index = self
                .arena
                .add(pos, self.prev_end, NodeData::Constructor { parameters });
            self.arena.set_modifiers(index, modifiers);
            return index;
        }

        self.parse_optional(SyntaxKind::AsteriskToken);
        if !self.is_property_name_start() {
            return NodeIndex::NONE;
        }
        let name = self.parse_property_name();
        let question = self.parse_optional(SyntaxKind::QuestionToken);
        self.parse_optional(SyntaxKind::ExclamationToken);

        let index = if self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_node = self.parse_return_annotation();
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.skip_block();
            }
            self.arena.add(
                pos,
                self.prev_end,
                NodeData::MethodDeclaration {
                    name,
                    question,
                    type_parameters,
                    parameters,
                    type_node,
                },
            )
        } else {
            let type_node = self.parse_type_annotation();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_simple_expression()
            } else {
                NodeIndex::NONE
            };
            self.arena.add(
                pos,
                self.prev_end,
                NodeData::PropertyDeclaration {
                    name,
                    question,
                    type_node,
                    initializer,
                },
            )
        };
        self.arena.set_modifiers(index, modifiers);
        index
    }
}
