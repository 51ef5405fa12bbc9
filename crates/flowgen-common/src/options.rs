//! Output-style configuration.

use serde::{Deserialize, Serialize};

/// Options recognised by the translator.
///
/// Loaded from the command line or from a `flowgen.json` file whose keys use
/// camelCase (`interfaceRecords`, `inexact`, `asModule`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Emit interfaces as exact object type aliases spreading their ancestors.
    pub interface_records: bool,
    /// Default exactness of emitted object types.
    pub inexact: bool,
    /// Wrap every top-level statement in `declare module '<name>' { ... }`.
    pub as_module: Option<String>,
    /// Prefix each output with a `// @flow` header.
    pub add_flow_header: bool,
    /// Do not log diagnostics.
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            interface_records: false,
            inexact: true,
            as_module: None,
            add_flow_header: false,
            quiet: false,
        }
    }
}

impl Options {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_interface_records(mut self, value: bool) -> Self {
        self.interface_records = value;
        self
    }

    pub fn with_inexact(mut self, value: bool) -> Self {
        self.inexact = value;
        self
    }

    pub fn with_as_module(mut self, name: impl Into<String>) -> Self {
        self.as_module = Some(name.into());
        self
    }

    pub fn with_add_flow_header(mut self, value: bool) -> Self {
        self.add_flow_header = value;
        self
    }

    pub fn with_quiet(mut self, value: bool) -> Self {
        self.quiet = value;
        self
    }
}
