//! Parser state - token handling, names, diagnostics and entry point.

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, NodeData};
use flowgen_common::diagnostics::{Diagnostic, DiagnosticMessage, diagnostic_messages};
use flowgen_scanner::{ScannerState, SyntaxKind, TokenFlags};
use tracing::debug;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) depth: u32,
    /// End of the last consumed token; node ranges stop here.
    pub(crate) prev_end: u32,
    /// Position of the last reported error, to avoid cascades at one spot.
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> Self {
        Self::with_arena(NodeArena::new(), file_name, source)
    }

    /// Parse into an existing arena so several files share node indices.
    pub fn with_arena(arena: NodeArena, file_name: String, source: String) -> Self {
        ParserState {
            scanner: ScannerState::new(source, true),
            arena,
            file_name,
            diagnostics: Vec::new(),
            depth: 0,
            prev_end: 0,
            last_error_pos: None,
        }
    }

    pub fn parse_source_file(&mut self) -> NodeIndex {
        debug!(file = %self.file_name, "parsing source file");
        self.next_token();
        let mut statements = NodeList::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress: drop the offending token.
                self.next_token();
            }
        }
        let end = self.scanner.text().len() as u32;
        self.arena.add(
            0,
            end,
            NodeData::SourceFile {
                file_name: self.file_name.clone(),
                statements,
            },
        )
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start()
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.get_token_value().to_string()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner
            .get_token_flags()
            .contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_end = self.scanner.token_end();
        let kind = self.scanner.scan();
        if self
            .scanner
            .get_token_flags()
            .contains(TokenFlags::UNTERMINATED)
            && kind == SyntaxKind::StringLiteral
        {
            self.error_at_current(&diagnostic_messages::UNTERMINATED_STRING_LITERAL, &[]);
        }
        kind
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current(
            &diagnostic_messages::TOKEN_EXPECTED,
            &[kind.punctuation_text()],
        );
        false
    }

    /// Statement terminator: `;`, or nothing before `}`/EOF/line break.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
        {
            return;
        }
        self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &[";"]);
    }

    /// Run `f` speculatively and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.snapshot();
        let prev_end = self.prev_end;
        let diagnostics = self.diagnostics.len();
        let result = f(self);
        self.scanner.restore(snapshot);
        self.prev_end = prev_end;
        self.diagnostics.truncate(diagnostics);
        result
    }

    pub(crate) fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    pub(crate) fn next_token_is_on_same_line_and(
        &mut self,
        pred: impl FnOnce(SyntaxKind) -> bool,
    ) -> bool {
        self.look_ahead(|p| {
            let kind = p.next_token();
            !p.has_preceding_line_break() && pred(kind)
        })
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.token_pos();
        let length = self.scanner.token_end().saturating_sub(start);
        self.error_at(start, length, message, args);
    }

    pub(crate) fn error_at(
        &mut self,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.diagnostics.push(Diagnostic::from_message(
            self.file_name.clone(),
            start,
            length,
            message,
            args,
        ));
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Identifier, or a contextual keyword usable as a binding name.
    pub(crate) fn is_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || (token.is_keyword() && !token.is_reserved_word())
    }

    /// Any identifier including reserved words, as allowed after `.` or as a
    /// property name.
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || token.is_keyword()
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.parse_identifier_token();
        }
        self.error_at_current(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]);
        let pos = self.token_pos();
        self.arena.add(
            pos,
            pos,
            NodeData::Identifier {
                text: String::new(),
            },
        )
    }

    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() {
            return self.parse_identifier_token();
        }
        self.parse_identifier()
    }

    fn parse_identifier_token(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let text = self.token_value();
        self.next_token();
        self.arena
            .add(pos, self.prev_end, NodeData::Identifier { text })
    }

    pub(crate) fn parse_string_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.is_token(SyntaxKind::StringLiteral)
            && !self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral)
        {
            self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &["string literal"]);
            return self.arena.add(
                pos,
                pos,
                NodeData::StringLiteral {
                    text: String::new(),
                },
            );
        }
        let text = self.token_value();
        self.next_token();
        self.arena
            .add(pos, self.prev_end, NodeData::StringLiteral { text })
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        ) || self.is_identifier_or_keyword()
    }

    /// Property name of a member: identifier, literal, private name or
    /// `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                self.parse_string_literal()
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let text = self.token_value();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::NumericLiteral { text })
            }
            SyntaxKind::PrivateIdentifier => {
                let text = self.token_value();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::PrivateIdentifier { text })
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.parse_simple_expression();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::ComputedPropertyName { expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    /// `A`, `A.B.C` as a qualified name (type positions).
    pub(crate) fn parse_entity_name(&mut self, allow_reserved: bool) -> NodeIndex {
        let pos = self.token_pos();
        let mut entity = if self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            self.arena.add(
                pos,
                self.prev_end,
                NodeData::Identifier {
                    text: "this".to_string(),
                },
            )
        } else if allow_reserved {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        while self.is_token(SyntaxKind::DotToken) {
            // `A.` followed by `<` would be a malformed type; stop at the dot.
            if !self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword() || p.is_token(SyntaxKind::PrivateIdentifier)
            }) {
                break;
            }
            self.next_token();
            let right = self.parse_identifier_name();
            entity = self.arena.add(
                pos,
                self.prev_end,
                NodeData::QualifiedName {
                    left: entity,
                    right,
                },
            );
        }
        entity
    }

    /// `A.B.C` as a property access chain (heritage clauses, `export =`).
    pub(crate) fn parse_property_access_chain(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_identifier_name();
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let name = self.parse_identifier_name();
            expression = self.arena.add(
                pos,
                self.prev_end,
                NodeData::PropertyAccessExpression { expression, name },
            );
        }
        expression
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Initializer-level expression: literals, signed numbers, names and
    /// property accesses. Anything else is kept as unparsed text.
    pub(crate) fn parse_simple_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_unary_expression();
        if expression.is_some() && self.is_expression_terminator() {
            return expression;
        }
        self.skip_expression_tokens();
        let text = self
            .scanner
            .text()
            .get(start as usize..self.prev_end as usize)
            .unwrap_or("")
            .trim()
            .to_string();
        self.arena
            .add(start, self.prev_end, NodeData::UnparsedExpression { text })
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::MinusToken | SyntaxKind::PlusToken | SyntaxKind::ExclamationToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression();
                if operand.is_none() {
                    return NodeIndex::NONE;
                }
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::PrefixUnaryExpression { operator, operand },
                )
            }
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                self.parse_string_literal()
            }
            SyntaxKind::NumericLiteral => {
                let text = self.token_value();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::NumericLiteral { text })
            }
            SyntaxKind::BigIntLiteral => {
                let text = self.token_value();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::BigIntLiteral { text })
            }
            SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword => {
                let keyword = self.token();
                self.next_token();
                self.arena
                    .add(pos, self.prev_end, NodeData::KeywordLiteral { keyword })
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_unary_expression();
                if expression.is_none() || !self.parse_optional(SyntaxKind::CloseParenToken) {
                    return NodeIndex::NONE;
                }
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::ParenthesizedExpression { expression },
                )
            }
            _ if self.is_identifier() => self.parse_property_access_chain(),
            _ => NodeIndex::NONE,
        }
    }

    fn is_expression_terminator(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Skip to the end of an expression, balancing brackets.
    fn skip_expression_tokens(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                SyntaxKind::CommaToken | SyntaxKind::SemicolonToken if depth == 0 => return,
                _ => {}
            }
            self.next_token();
        }
    }

    /// Skip a `{ ... }` block (function bodies in non-ambient files).
    pub(crate) fn skip_block(&mut self) {
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return;
        }
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    pub(crate) fn error_declaration_expected(&mut self) {
        self.error_at_current(&diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
    }

    pub(crate) fn error_unexpected_token(&mut self) {
        let text = self.scanner.get_token_text().to_string();
        self.error_at_current(&diagnostic_messages::UNEXPECTED_TOKEN, &[&text]);
    }
}
