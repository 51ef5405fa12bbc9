//! Tokenizer for TypeScript declaration files.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `TokenFlags` - Extra facts about the current token

mod scanner_impl;
mod syntax_kind;

pub use scanner_impl::{
    ScannerSnapshot, ScannerState, TokenFlags, is_identifier_part, is_identifier_start,
};
pub use syntax_kind::{SyntaxKind, keyword_from_text};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
