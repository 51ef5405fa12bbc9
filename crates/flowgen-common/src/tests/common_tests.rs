use crate::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use crate::errors::{ErrorCategory, FlowgenError};
use crate::options::Options;
use crate::position::LineMap;

#[test]
fn test_format_message_fills_placeholders() {
    assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
    assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
}

#[test]
fn test_diagnostic_from_catalogue_message() {
    let diag = Diagnostic::from_message("a.d.ts", 4, 1, &diagnostic_messages::TOKEN_EXPECTED, &["}"]);
    assert_eq!(diag.code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(diag.message_text, "'}' expected.");
    assert!(diag.is_error());
}

#[test]
fn test_error_messages_match_flow_wording() {
    assert_eq!(
        FlowgenError::UnsupportedComputedProperty.to_string(),
        "Flow doesn't support computed property names"
    );
    assert_eq!(
        FlowgenError::UnsupportedTypeOperator {
            operator: "UniqueKeyword".into()
        }
        .to_string(),
        "Unsupported type operator: UniqueKeyword"
    );
    assert_eq!(
        FlowgenError::MissingFunctionName.category(),
        ErrorCategory::Internal
    );
    assert_eq!(
        FlowgenError::UnsupportedBigInt.code(),
        diagnostic_codes::UNSUPPORTED_BIGINT
    );
}

#[test]
fn test_comment_text_cannot_close_comment() {
    let err = FlowgenError::MissingSymbol {
        description: "a */ b".into(),
    };
    assert!(!err.comment_text().contains("*/"));
}

#[test]
fn test_options_defaults_and_json() {
    let defaults = Options::default();
    assert!(defaults.inexact);
    assert!(!defaults.interface_records);

    let parsed = Options::from_json_str(r#"{"interfaceRecords": true, "asModule": "pkg"}"#)
        .expect("valid options json");
    assert!(parsed.interface_records);
    assert!(parsed.inexact, "missing keys keep their defaults");
    assert_eq!(parsed.as_module.as_deref(), Some("pkg"));
}

#[test]
fn test_line_map_positions() {
    let source = "interface A {}\ninterface B {}\n";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
    let pos = map.offset_to_position(25, source);
    assert_eq!((pos.line, pos.character), (1, 10));
}
