//! Scanner state machine.

use crate::syntax_kind::{SyntaxKind, keyword_from_text};
use bitflags::bitflags;

bitflags! {
    /// Facts about the most recently scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenFlags: u32 {
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED = 1 << 1;
        const SINGLE_QUOTE = 1 << 2;
        const HEX_SPECIFIER = 1 << 3;
    }
}

/// Saved scanner position for speculative parsing.
#[derive(Debug, Clone)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    full_start: usize,
    token_value: String,
    token_flags: TokenFlags,
}

pub struct ScannerState {
    text: String,
    skip_trivia: bool,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
}

impl ScannerState {
    pub fn new(text: String, skip_trivia: bool) -> Self {
        ScannerState {
            text,
            skip_trivia,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Source text of the current token, including quotes for strings.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn get_token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    pub fn token_start(&self) -> u32 {
        self.token_start as u32
    }

    pub fn token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            full_start: self.full_start,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.full_start = snapshot.full_start;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn finish(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.token = kind;
        kind
    }

    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.peek() else {
                return self.finish(SyntaxKind::EndOfFileToken);
            };

            match ch {
                '\n' | '\r' => {
                    self.bump();
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    if !self.skip_trivia {
                        return self.finish(SyntaxKind::NewLineTrivia);
                    }
                }
                c if c.is_whitespace() || c == '\u{feff}' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' || !(c.is_whitespace() || c == '\u{feff}') {
                            break;
                        }
                        self.bump();
                    }
                    if !self.skip_trivia {
                        return self.finish(SyntaxKind::WhitespaceTrivia);
                    }
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.bump();
                    }
                    if !self.skip_trivia {
                        return self.finish(SyntaxKind::SingleLineCommentTrivia);
                    }
                }
                '/' if self.peek_at(1) == Some('*') => {
                    self.pos += 2;
                    match self.text[self.pos..].find("*/") {
                        Some(offset) => {
                            if self.text[self.pos..self.pos + offset].contains('\n') {
                                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                            }
                            self.pos += offset + 2;
                        }
                        None => {
                            self.pos = self.text.len();
                            self.token_flags |= TokenFlags::UNTERMINATED;
                        }
                    }
                    if !self.skip_trivia {
                        return self.finish(SyntaxKind::MultiLineCommentTrivia);
                    }
                }
                _ => return self.scan_token(ch),
            }
        }
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        let kind = match ch {
            '"' | '\'' => return self.scan_string(ch),
            '`' => return self.scan_template(),
            '0'..='9' => return self.scan_number(),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                return self.scan_number();
            }
            '#' if self.peek_at(1).is_some_and(is_identifier_start) => {
                self.bump();
                self.scan_identifier_text();
                self.token_value.insert(0, '#');
                return self.finish(SyntaxKind::PrivateIdentifier);
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_text();
                let kind = keyword_from_text(&self.token_value).unwrap_or(SyntaxKind::Identifier);
                return self.finish(kind);
            }
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            ';' => SyntaxKind::SemicolonToken,
            ',' => SyntaxKind::CommaToken,
            '<' => SyntaxKind::LessThanToken,
            // `>` is never combined so `Array<Array<T>>` closes two lists.
            '>' => SyntaxKind::GreaterThanToken,
            '+' => SyntaxKind::PlusToken,
            '*' => SyntaxKind::AsteriskToken,
            '/' => SyntaxKind::SlashToken,
            '&' => SyntaxKind::AmpersandToken,
            '|' => SyntaxKind::BarToken,
            '!' => SyntaxKind::ExclamationToken,
            ':' => SyntaxKind::ColonToken,
            '@' => SyntaxKind::AtToken,
            '-' => SyntaxKind::MinusToken,
            '.' => {
                if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') {
                    self.pos += 3;
                    return self.finish(SyntaxKind::DotDotDotToken);
                }
                SyntaxKind::DotToken
            }
            '=' => {
                if self.peek_at(1) == Some('>') {
                    self.pos += 2;
                    return self.finish(SyntaxKind::EqualsGreaterThanToken);
                }
                SyntaxKind::EqualsToken
            }
            '?' => {
                if self.peek_at(1) == Some('.')
                    && !self.peek_at(2).is_some_and(|c| c.is_ascii_digit())
                {
                    self.pos += 2;
                    return self.finish(SyntaxKind::QuestionDotToken);
                }
                SyntaxKind::QuestionToken
            }
            _ => SyntaxKind::Unknown,
        };
        self.bump();
        self.token_value.push(ch);
        self.finish(kind)
    }

    fn scan_identifier_text(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            self.bump();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.bump();
        if quote == '\'' {
            self.token_flags |= TokenFlags::SINGLE_QUOTE;
        }
        loop {
            match self.bump() {
                None | Some('\n') | Some('\r') => {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some(c) if c == quote => break,
                Some('\\') => self.scan_escape(),
                Some(c) => self.token_value.push(c),
            }
        }
        self.finish(SyntaxKind::StringLiteral)
    }

    fn scan_escape(&mut self) {
        let Some(c) = self.bump() else {
            return;
        };
        match c {
            'n' => self.token_value.push('\n'),
            't' => self.token_value.push('\t'),
            'r' => self.token_value.push('\r'),
            'b' => self.token_value.push('\u{8}'),
            'f' => self.token_value.push('\u{c}'),
            'v' => self.token_value.push('\u{b}'),
            '0' => self.token_value.push('\0'),
            'u' => {
                let digits: String = if self.peek() == Some('{') {
                    self.bump();
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != '}') {
                        self.bump();
                    }
                    let digits = self.text[start..self.pos].to_string();
                    self.bump();
                    digits
                } else {
                    let start = self.pos;
                    for _ in 0..4 {
                        if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                            self.bump();
                        }
                    }
                    self.text[start..self.pos].to_string()
                };
                if let Some(decoded) = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
                {
                    self.token_value.push(decoded);
                }
            }
            'x' => {
                let start = self.pos;
                for _ in 0..2 {
                    if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.bump();
                    }
                }
                if let Some(decoded) = u32::from_str_radix(&self.text[start..self.pos], 16)
                    .ok()
                    .and_then(char::from_u32)
                {
                    self.token_value.push(decoded);
                }
            }
            // Line continuation.
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            other => self.token_value.push(other),
        }
    }

    /// Template literals are kept whole; substitutions are skipped with brace
    /// matching since declaration files only ever use them as types.
    fn scan_template(&mut self) -> SyntaxKind {
        self.bump();
        let mut has_substitution = false;
        loop {
            match self.bump() {
                None => {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some('`') => break,
                Some('\\') => self.scan_escape(),
                Some('$') if self.peek() == Some('{') => {
                    has_substitution = true;
                    self.bump();
                    let mut depth = 1u32;
                    while depth > 0 {
                        match self.bump() {
                            None => break,
                            Some('{') => depth += 1,
                            Some('}') => depth -= 1,
                            _ => {}
                        }
                    }
                }
                Some(c) => self.token_value.push(c),
            }
        }
        if has_substitution {
            self.token_value = self.get_token_text().to_string();
            self.finish(SyntaxKind::TemplateLiteral)
        } else {
            self.finish(SyntaxKind::NoSubstitutionTemplateLiteral)
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'))
        {
            self.pos += 2;
            self.token_flags |= TokenFlags::HEX_SPECIFIER;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
        } else {
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                self.bump();
            }
            if self.peek() == Some('.') {
                self.bump();
                while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                    self.bump();
                }
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                    self.bump();
                }
            }
        }
        let kind = if self.peek() == Some('n') {
            self.bump();
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value.push_str(&self.text[start..self.pos]);
        self.finish(kind)
    }
}

pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

pub fn is_identifier_part(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200c}' || c == '\u{200d}' || c.is_alphanumeric()
}
