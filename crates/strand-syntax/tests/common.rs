//! Shared helpers for parser tests.
#![allow(dead_code, unused_imports)]

pub use strand_syntax::parser::parse;
pub use strand_syntax::syntax::SyntaxKind;

/// Formats a parse result as an indented tree, followed by any errors.
pub fn dump_parse(source: &str) -> String {
    let parsed = parse(source);
    let syntax = parsed.syntax();

    let mut output = String::new();
    format_node(&syntax, &mut output, 0);

    if !parsed.ok() {
        output.push_str("---\nErrors:\n");
        for err in parsed.errors() {
            output.push_str(&format!("  - {}\n", err));
        }
    }

    output
}

fn format_node(node: &strand_syntax::syntax::SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&format!(
        "{}{:?}@{:?}\n",
        indent,
        node.kind(),
        node.text_range()
    ));

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_node(&n, out, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                let kind = t.kind();
                if !kind.is_trivia() {
                    out.push_str(&format!(
                        "{}{:?}@{:?} {:?}\n",
                        "  ".repeat(depth + 1),
                        kind,
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }
    }
}

/// Returns the messages of all parse errors for `source`.
pub fn error_messages(source: &str) -> Vec<String> {
    parse(source)
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect()
}
