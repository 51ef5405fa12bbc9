use super::reporter::Reporter;
use flowgen_common::Diagnostic;

#[test]
fn test_formats_location_category_and_code() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("lib.d.ts", "type A = string;\ntype B = unique symbol;\n");
    let diagnostic = Diagnostic::warning("lib.d.ts", 26, 13, "Unsupported unique symbol", 9003);
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "lib.d.ts:2:10 - warning FG9003: Unsupported unique symbol"
    );
}

#[test]
fn test_unreadable_file_falls_back_to_name() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error("missing/nowhere.d.ts", 0, 0, "failed", 9100);
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "missing/nowhere.d.ts - error FG9100: failed"
    );
}

#[test]
fn test_render_joins_lines() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("a.d.ts", "x");
    let rendered = reporter.render(&[
        Diagnostic::warning("a.d.ts", 0, 1, "first", 9001),
        Diagnostic::warning("a.d.ts", 0, 1, "second", 9002),
    ]);
    assert_eq!(rendered.lines().count(), 2);
    assert!(rendered.starts_with("a.d.ts:1:1 - warning FG9001: first"));
}

#[test]
fn test_render_json_one_object_per_line() {
    let rendered = Reporter::render_json(&[
        Diagnostic::warning("a.d.ts", 3, 2, "first", 9001),
        Diagnostic::error("b.d.ts", 0, 0, "second", 9100),
    ])
    .unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["code"], 9001);
    assert_eq!(first["category"], "warning");
    assert_eq!(first["file"], "a.d.ts");
}
