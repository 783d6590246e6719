mod common;
use common::*;

#[test]
fn test_missing_member_value() {
    let messages = error_messages("enum Color { RED, GREEN = 2 }");
    assert_eq!(messages, vec!["expected '=' after enum member name".to_string()]);
}

#[test]
fn test_missing_comma_between_members() {
    let messages = error_messages("enum Color { RED = 1 GREEN = 2 }");
    assert_eq!(messages, vec!["expected ',' or '}'".to_string()]);
}

#[test]
fn test_recovers_to_next_item() {
    let source = r#"
fn broken( {
    return 1;
}

enum Color { RED = 1 }
"#;
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert!(parsed
        .syntax()
        .children()
        .any(|n| n.kind() == SyntaxKind::EnumDecl));
}

#[test]
fn test_error_dump_lists_messages() {
    let dump = dump_parse("let x = ;");
    assert!(dump.contains("Errors:"), "{dump}");
    assert!(dump.contains("expected expression at 8..9"), "{dump}");
}

#[test]
fn test_statement_at_top_level() {
    let messages = error_messages("x = 1;");
    assert!(messages
        .iter()
        .all(|message| message == "expected 'enum', 'fn', 'module', or 'let'"));
    assert!(!messages.is_empty());
}
