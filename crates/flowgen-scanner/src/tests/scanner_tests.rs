use crate::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string(), true);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new(), true);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace_without_skipping() {
    let mut scanner = ScannerState::new("   \n".to_string(), false);
    assert_eq!(scanner.scan(), SyntaxKind::WhitespaceTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::NewLineTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_keyword_table_is_sorted() {
    assert_eq!(keyword_from_text("interface"), Some(SyntaxKind::InterfaceKeyword));
    assert_eq!(keyword_from_text("typeof"), Some(SyntaxKind::TypeOfKeyword));
    assert_eq!(keyword_from_text("asserts"), Some(SyntaxKind::AssertsKeyword));
    assert_eq!(keyword_from_text("Interface"), None);
    assert!(SyntaxKind::VoidKeyword.is_keyword());
    assert!(!SyntaxKind::Identifier.is_keyword());
}

#[test]
fn test_scan_declaration_tokens() {
    assert_eq!(
        scan_all("export declare function f<T>(x?: T): void;"),
        vec![
            SyntaxKind::ExportKeyword,
            SyntaxKind::DeclareKeyword,
            SyntaxKind::FunctionKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::ColonToken,
            SyntaxKind::VoidKeyword,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_nested_generics_close_separately() {
    assert_eq!(
        scan_all("Array<Array<T>>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
}

#[test]
fn test_scan_arrow_and_spread() {
    assert_eq!(
        scan_all("(...a) => b"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_scan_string_literals() {
    let mut scanner = ScannerState::new(r#"'single' "dou\"ble" "aA""#.to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "single");
    assert!(scanner.get_token_flags().contains(TokenFlags::SINGLE_QUOTE));
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "dou\"ble");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "aA");
}

#[test]
fn test_scan_unterminated_string() {
    let mut scanner = ScannerState::new("\"abc\nfoo".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.get_token_flags().contains(TokenFlags::UNTERMINATED));
}

#[test]
fn test_scan_numbers() {
    let mut scanner = ScannerState::new("42 3.14 0xFF 123n".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "42");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "3.14");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "0xFF");
    assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
    assert_eq!(scanner.get_token_value(), "123n");
}

#[test]
fn test_scan_comments_and_line_breaks() {
    let mut scanner = ScannerState::new("/** doc */ foo // trailing\nbar".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "foo");
    assert!(!scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "bar");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_scan_template_literals() {
    let mut scanner = ScannerState::new("`plain` `a${B}c`".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "plain");
    assert_eq!(scanner.scan(), SyntaxKind::TemplateLiteral);
    assert_eq!(scanner.get_token_value(), "`a${B}c`");
}

#[test]
fn test_snapshot_restore() {
    let mut scanner = ScannerState::new("a b".to_string(), true);
    scanner.scan();
    let snapshot = scanner.snapshot();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
    scanner.restore(snapshot);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}
