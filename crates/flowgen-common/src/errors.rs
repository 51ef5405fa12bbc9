//! Translation error kinds.
//!
//! Every construct the printer cannot express in Flow maps to one of these
//! kinds. The printer reports the kind as a diagnostic and writes a marked
//! fallback into the output; only `CompileError` in the emitter aborts a file.

use crate::diagnostics::diagnostic_codes as codes;
use thiserror::Error;

/// Broad classes of translation problems.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A recognised source construct with no Flow equivalent.
    UnsupportedSyntax,
    /// A construct the translator expected to handle but could not resolve here.
    Internal,
    /// Syntax the parser accepted but the translator did not anticipate.
    UnexpectedInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowgenError {
    #[error("Flow doesn't support computed property names")]
    UnsupportedComputedProperty,
    #[error("Flow doesn't support BigInt proposal: https://github.com/facebook/flow/issues/6639")]
    UnsupportedBigInt,
    #[error("Flow doesn't support `unique symbol`")]
    UnsupportedUniqueSymbol,
    #[error("Flow doesn't support conditional types, use `$Call` utility type")]
    UnsupportedConditionalType,
    #[error("Flow doesn't support template literal types")]
    UnsupportedTemplateLiteral,
    #[error("Flow doesn't support unnamed functions")]
    MissingFunctionName,
    #[error("Flow doesn't support global augmentation")]
    UnsupportedGlobalAugmentation,
    #[error("Flow doesn't support nested modules")]
    UnsupportedNestedModule,
    #[error("Unsupported type operator: {operator}")]
    UnsupportedTypeOperator { operator: String },
    #[error("Unsupported import-equals form: {text}")]
    UnsupportedImportEquals { text: String },
    #[error("Multiple declarations of enum `{name}` are not merged")]
    UnsupportedEnumMerging { name: String },
    #[error("Unsupported statement: {kind}")]
    UnsupportedStatement { kind: String },
    #[error("NO PRINT IMPLEMENTED: {kind}")]
    NoPrintImplemented { kind: String },
    #[error("{description}")]
    MissingSymbol { description: String },
}

impl FlowgenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlowgenError::MissingFunctionName
            | FlowgenError::MissingSymbol { .. }
            | FlowgenError::NoPrintImplemented { .. } => ErrorCategory::Internal,
            FlowgenError::UnsupportedImportEquals { .. }
            | FlowgenError::UnsupportedStatement { .. } => ErrorCategory::UnexpectedInput,
            _ => ErrorCategory::UnsupportedSyntax,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            FlowgenError::UnsupportedComputedProperty => codes::UNSUPPORTED_COMPUTED_PROPERTY,
            FlowgenError::UnsupportedBigInt => codes::UNSUPPORTED_BIGINT,
            FlowgenError::UnsupportedUniqueSymbol => codes::UNSUPPORTED_UNIQUE_SYMBOL,
            FlowgenError::UnsupportedConditionalType => codes::UNSUPPORTED_CONDITIONAL_TYPE,
            FlowgenError::UnsupportedTemplateLiteral => codes::UNSUPPORTED_TEMPLATE_LITERAL,
            FlowgenError::MissingFunctionName => codes::MISSING_FUNCTION_NAME,
            FlowgenError::UnsupportedGlobalAugmentation => codes::UNSUPPORTED_GLOBAL_AUGMENTATION,
            FlowgenError::UnsupportedNestedModule => codes::UNSUPPORTED_NESTED_MODULE,
            FlowgenError::UnsupportedTypeOperator { .. } => codes::UNSUPPORTED_TYPE_OPERATOR,
            FlowgenError::UnsupportedImportEquals { .. } => codes::UNSUPPORTED_IMPORT_EQUALS,
            FlowgenError::UnsupportedEnumMerging { .. } => codes::UNSUPPORTED_ENUM_MERGING,
            FlowgenError::UnsupportedStatement { .. } => codes::UNSUPPORTED_STATEMENT,
            FlowgenError::NoPrintImplemented { .. } => codes::NO_PRINT_IMPLEMENTED,
            FlowgenError::MissingSymbol { .. } => codes::MISSING_SYMBOL,
        }
    }

    /// Text used inside an output comment, e.g. `/* Flow doesn't support ... */ any`.
    pub fn comment_text(&self) -> String {
        self.to_string().replace("*/", "* /")
    }
}
