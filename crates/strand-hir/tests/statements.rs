//! Type checking of statements and host expressions.

mod common;

use common::*;
use expect_test::expect;

#[test]
fn test_let_annotation_mismatch() {
    let source = "fn f() -> int { let x: str = 1; return 0; }";
    let error = compile_error(source, "f");
    assert_eq!(error.code(), DiagnosticCode::TypeMismatch);
    assert_eq!(
        error.to_string(),
        "variable 'x' is annotated as 'str' but assigned a value of type 'int'"
    );
}

#[test]
fn test_assignment_requires_let() {
    let source = "fn f() -> int { y = 1; return 0; }";
    let error = compile_error(source, "f");
    assert_eq!(
        error.to_string(),
        "cannot assign to 'y' before it is declared with 'let'"
    );
}

#[test]
fn test_missing_return() {
    let source = "fn f(flag: bool) -> int {\n    if flag {\n        return 1;\n    }\n}";
    let error = compile_error(source, "f");
    assert_eq!(error.code(), DiagnosticCode::MissingReturn);
    assert_eq!(
        error.to_string(),
        "function 'f' does not return a value on every path"
    );
}

#[test]
fn test_inconsistent_inferred_returns() {
    let source = "fn f(flag: bool) {\n    if flag {\n        return 1;\n    }\n    return 'one';\n}";
    let error = compile_error(source, "f");
    assert_eq!(error.code(), DiagnosticCode::TypeMismatch);
}

#[test]
fn test_implicit_none_return() {
    let source = "fn f(xs: List[int]) {\n    xs.append(1);\n}";
    expect![[r#"
        graph(%xs : int[]):
          %1 : int = prim::Constant[value=1]()
          aten::append(%xs, %1)
          %2 : NoneType = prim::Constant()
          return (%2)
    "#]]
    .assert_eq(&graph(source, "f"));
}

#[test]
fn test_iterate_list_and_sum() {
    let source = "
fn total(xs: List[int]) -> int {
    let acc = 0;
    for x in xs {
        acc = acc + x;
    }
    return acc;
}";
    expect![[r#"
        graph(%xs : int[]):
          %1 : int = prim::Constant[value=0]()
          prim::Store[name="acc"](%1)
          prim::Loop(%xs)
            block0(%x : int):
              %acc : int = prim::Load[name="acc"]()
              %4 : int = aten::add(%acc, %x)
              prim::Store[name="acc"](%4)
          %acc.1 : int = prim::Load[name="acc"]()
          return (%acc.1)
    "#]]
    .assert_eq(&graph(source, "total"));
}

#[test]
fn test_iterating_a_scalar_is_rejected() {
    let source = "fn f(n: int) -> int { for i in n { } return 0; }";
    let error = compile_error(source, "f");
    assert_eq!(error.to_string(), "'int' object is not iterable");
}

#[test]
fn test_if_condition_must_be_bool() {
    let source = "fn f(n: int) -> int { if n { return 1; } return 0; }";
    let error = compile_error(source, "f");
    assert_eq!(error.to_string(), "if condition must be 'bool', found 'int'");
}

#[test]
fn test_calling_script_function_is_unsupported() {
    let source = "fn g() -> int { return 1; }\nfn f() -> int { return g(); }";
    let error = compile_error(source, "f");
    assert_eq!(error.code(), DiagnosticCode::Unsupported);
}

#[test]
fn test_unknown_function() {
    let source = "fn f() -> int { return h(); }";
    let error = compile_error(source, "f");
    assert_eq!(error.code(), DiagnosticCode::UnknownFunction);
    assert_eq!(error.range(), Some(range_of(source, "h")));
}

#[test]
fn test_undefined_value() {
    let source = "fn f() -> int { return missing; }";
    let error = compile_error(source, "f");
    assert_eq!(error.to_string(), "undefined value missing");
}

#[test]
fn test_duplicate_top_level_definition() {
    let error = CompilationUnit::new(
        "fn f() -> int { return 1; }\nfn f() -> int { return 2; }",
        CompileOptions::default(),
    )
    .unwrap_err();
    assert_eq!(error.code(), DiagnosticCode::DuplicateDefinition);
}

#[test]
fn test_let_is_block_scoped() {
    let source = "fn f(flag: bool) -> int {\n    if flag {\n        let y = 1;\n    }\n    return y;\n}";
    let error = compile_error(source, "f");
    assert_eq!(error.to_string(), "undefined value y");
}
