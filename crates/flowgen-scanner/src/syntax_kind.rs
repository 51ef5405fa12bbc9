use serde::Serialize;

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    WhitespaceTrivia,
    NewLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateLiteral,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    AmpersandToken,
    BarToken,
    ExclamationToken,
    QuestionToken,
    ColonToken,
    AtToken,

    // Keywords
    AbstractKeyword,
    AccessorKeyword,
    AnyKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ClassKeyword,
    ConstKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    DefaultKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FromKeyword,
    FunctionKeyword,
    GetKeyword,
    GlobalKeyword,
    ImplementsKeyword,
    ImportKeyword,
    InKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NewKeyword,
    NullKeyword,
    NumberKeyword,
    ObjectKeyword,
    OutKeyword,
    OverrideKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeKeyword,
    TypeOfKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    VarKeyword,
    VoidKeyword,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKeyword),
    ("accessor", SyntaxKind::AccessorKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("asserts", SyntaxKind::AssertsKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("bigint", SyntaxKind::BigIntKeyword),
    ("boolean", SyntaxKind::BooleanKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("constructor", SyntaxKind::ConstructorKeyword),
    ("declare", SyntaxKind::DeclareKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("global", SyntaxKind::GlobalKeyword),
    ("implements", SyntaxKind::ImplementsKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("infer", SyntaxKind::InferKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("keyof", SyntaxKind::KeyOfKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("module", SyntaxKind::ModuleKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("never", SyntaxKind::NeverKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("number", SyntaxKind::NumberKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("out", SyntaxKind::OutKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("readonly", SyntaxKind::ReadonlyKeyword),
    ("require", SyntaxKind::RequireKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("type", SyntaxKind::TypeKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("undefined", SyntaxKind::UndefinedKeyword),
    ("unique", SyntaxKind::UniqueKeyword),
    ("unknown", SyntaxKind::UnknownKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
];

pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .binary_search_by(|(kw, _)| (*kw).cmp(text))
        .ok()
        .map(|i| KEYWORDS[i].1)
}

impl SyntaxKind {
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::AbstractKeyword
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
        )
    }

    /// Keywords that are reserved words and can never name a binding.
    pub fn is_reserved_word(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::ExtendsKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Modifier keywords that may precede a declaration or member.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Source spelling for punctuation, used in "'x' expected" diagnostics.
    pub fn punctuation_text(self) -> &'static str {
        match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            _ => "token",
        }
    }
}
