use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Numeric codes for every diagnostic flowgen can report.
///
/// Parser codes reuse the numbers TypeScript assigns to the same syntax
/// errors; translation codes live in the 9000 range.
pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;

    pub const UNSUPPORTED_COMPUTED_PROPERTY: u32 = 9001;
    pub const UNSUPPORTED_BIGINT: u32 = 9002;
    pub const UNSUPPORTED_UNIQUE_SYMBOL: u32 = 9003;
    pub const UNSUPPORTED_CONDITIONAL_TYPE: u32 = 9004;
    pub const MISSING_FUNCTION_NAME: u32 = 9005;
    pub const UNSUPPORTED_GLOBAL_AUGMENTATION: u32 = 9006;
    pub const UNSUPPORTED_NESTED_MODULE: u32 = 9007;
    pub const UNSUPPORTED_TYPE_OPERATOR: u32 = 9008;
    pub const UNSUPPORTED_TEMPLATE_LITERAL: u32 = 9009;
    pub const NO_PRINT_IMPLEMENTED: u32 = 9010;
    pub const UNSUPPORTED_IMPORT_EQUALS: u32 = 9011;
    pub const MISSING_SYMBOL: u32 = 9012;
    pub const UNSUPPORTED_ENUM_MERGING: u32 = 9013;
    pub const UNSUPPORTED_STATEMENT: u32 = 9014;
    pub const COMPILE_FAILED: u32 = 9100;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes as codes};

    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    };
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    };
    pub const TOKEN_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: codes::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = DiagnosticMessage {
        code: codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: "Unexpected token '{0}'.",
    };
    pub const TYPE_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Type expected.",
    };
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    };
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    diagnostic_messages::IDENTIFIER_EXPECTED,
    diagnostic_messages::TOKEN_EXPECTED,
    diagnostic_messages::UNEXPECTED_TOKEN,
    diagnostic_messages::TYPE_EXPECTED,
    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self::new(DiagnosticCategory::Error, file, start, length, message, code)
    }

    pub fn warning(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self::new(DiagnosticCategory::Warning, file, start, length, message, code)
    }

    fn new(
        category: DiagnosticCategory,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
            related_information: Vec::new(),
        }
    }

    /// Build a diagnostic from a catalogue entry, filling `{n}` placeholders.
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self::new(
            message.category,
            file,
            start,
            length,
            format_message(message.message, args),
            message.code,
        )
    }

    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code: 0,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
