mod common;
use common::*;
use expect_test::expect;

#[test]
fn test_enum_tree() {
    expect![[r#"
        SourceFile@0..22
          EnumDecl@0..22
            KwEnum@0..4 "enum"
            Name@5..10
              Ident@5..10 "Color"
            LBrace@11..12 "{"
            EnumMember@13..20
              Name@13..16
                Ident@13..16 "RED"
              Assign@17..18 "="
              Literal@19..20
                IntLiteral@19..20 "1"
            RBrace@21..22 "}"
    "#]]
    .assert_eq(&dump_parse("enum Color { RED = 1 }"));
}

#[test]
fn test_field_access_tree() {
    expect![[r#"
        SourceFile@0..28
          FnDecl@0..28
            KwFn@0..2 "fn"
            Name@3..4
              Ident@3..4 "f"
            ParamList@4..6
              LParen@4..5 "("
              RParen@5..6 ")"
            Block@7..28
              LBrace@7..8 "{"
              ReturnStmt@9..26
                KwReturn@9..15 "return"
                FieldExpr@16..25
                  NameRef@16..21
                    Ident@16..21 "Color"
                  Dot@21..22 "."
                  Name@22..25
                    Ident@22..25 "RED"
                Semicolon@25..26 ";"
              RBrace@27..28 "}"
    "#]]
    .assert_eq(&dump_parse("fn f() { return Color.RED; }"));
}

#[test]
fn test_full_script_parses() {
    let source = r#"
# Enums used by the comparison tests.
enum Color {
    RED = 1,
    GREEN = 2,
    BLUE = 3,
}

enum Weird {
    A = 1.5,
    B = "two",
}

let c = Color;
let red = Color.RED;

fn enum_const(x: Color) -> bool {
    return x == c.GREEN;
}

fn iterate_enum(x: Color) -> List[int] {
    let res: List[int] = [];
    for e in Color {
        if e != x {
            res.append(e.value);
        }
    }
    return res;
}

fn pick(x: int) -> Color {
    if x == 1 {
        return Color.RED;
    } else if x == 2 {
        return Color.GREEN;
    } else {
        return Color.BLUE;
    }
}

module TestModule {
    e: Color;

    fn forward(self) -> int {
        return self.e.value;
    }
}
"#;
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors());

    let top_level: Vec<_> = parsed.syntax().children().map(|n| n.kind()).collect();
    assert_eq!(
        top_level,
        vec![
            SyntaxKind::EnumDecl,
            SyntaxKind::EnumDecl,
            SyntaxKind::LetStmt,
            SyntaxKind::LetStmt,
            SyntaxKind::FnDecl,
            SyntaxKind::FnDecl,
            SyntaxKind::FnDecl,
            SyntaxKind::ModuleDecl,
        ]
    );
    assert_eq!(parsed.syntax().text().to_string(), source);
}

#[test]
fn test_member_value_can_be_call() {
    let parsed = parse("enum Weights { A = tensor(0), B = tensor(1) }");
    assert!(parsed.ok(), "errors: {:?}", parsed.errors());
    let calls = parsed
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::CallExpr)
        .count();
    assert_eq!(calls, 2);
}
