//! Common types shared by every flowgen crate.
//!
//! - `diagnostics` - recoverable problems reported while translating a file
//! - `errors` - the catalogue of translation error kinds and their messages
//! - `options` - output-style configuration
//! - `position` - byte offset to line/column conversion
//! - `limits` - recursion guards

pub mod diagnostics;
pub mod errors;
pub mod limits;
pub mod options;
pub mod position;

pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};
pub use errors::{ErrorCategory, FlowgenError};
pub use options::Options;
pub use position::{LineMap, Position};

#[cfg(test)]
#[path = "tests/common_tests.rs"]
mod common_tests;
