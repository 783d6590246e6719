//! Graphs emitted for enum operations.

mod common;

use common::*;
use expect_test::expect;

const COLOR: &str = "enum Color { RED = 1, GREEN = 2 }\n";

#[test]
fn test_enum_equality_emits_typed_eq() {
    let source = format!(
        "{COLOR}
fn enum_comp(x: Color, y: Color) -> bool {{
    return x == y;
}}"
    );
    expect![[r#"
        graph(%x : Enum<__strand__.test_enum.Color>,
              %y : Enum<__strand__.test_enum.Color>):
          %2 : bool = aten::eq(%x, %y)
          return (%2)
    "#]]
    .assert_eq(&graph(&source, "enum_comp"));
}

#[test]
fn test_enum_inequality_emits_typed_ne() {
    let source = format!(
        "{COLOR}
fn enum_ne(x: Color, y: Color) -> bool {{
    return x != y;
}}"
    );
    let printed = graph(&source, "enum_ne");
    assert!(printed.contains("%2 : bool = aten::ne(%x, %y)"), "{printed}");
}

#[test]
fn test_comparing_distinct_enums_folds_to_false() {
    let source = "
enum Foo { ITEM = 1 }
enum Bar { ITEM = 1 }

fn enum_const_comp(x: Foo, y: Bar) -> bool {
    return x == y;
}";
    expect![[r#"
        graph(%x : Enum<__strand__.test_enum.Foo>,
              %y : Enum<__strand__.test_enum.Bar>):
          %2 : bool = prim::Constant[value=False]()
          return (%2)
    "#]]
    .assert_eq(&graph(source, "enum_const_comp"));
}

#[test]
fn test_distinct_enum_inequality_folds_to_true() {
    let source = "
enum Foo { ITEM = 1 }
enum Bar { ITEM = 1 }

fn f(x: Foo, y: Bar) -> bool {
    return x != y;
}";
    let printed = graph(source, "f");
    assert!(printed.contains("prim::Constant[value=True]()"), "{printed}");
    assert!(!printed.contains("aten::ne"), "{printed}");
}

#[test]
fn test_iterate_enum_excluding_member() {
    let source = "
enum Color { RED = 1, GREEN = 2, BLUE = 3 }

fn iterate_enum(x: Color) -> List[int] {
    let res: List[int] = [];
    for e in Color {
        if e != x {
            res.append(e.value);
        }
    }
    return res;
}";
    expect![[r#"
        graph(%x : Enum<__strand__.test_enum.Color>):
          %res : int[] = prim::ListConstruct()
          %2 : Enum<__strand__.test_enum.Color>[] = prim::Constant[value=[__strand__.test_enum.Color.RED, __strand__.test_enum.Color.GREEN, __strand__.test_enum.Color.BLUE]]()
          prim::Loop(%2)
            block0(%e : Enum<__strand__.test_enum.Color>):
              %4 : bool = aten::ne(%e, %x)
              prim::If(%4)
                block0():
                  %5 : int = prim::EnumValue(%e)
                  aten::append(%res, %5)
                block1():
          return (%res)
    "#]]
    .assert_eq(&graph(source, "iterate_enum"));
}

#[test]
fn test_isinstance_checks_enum_type() {
    let source = format!(
        "{COLOR}
fn is_color(x: Any) -> bool {{
    return isinstance(x, Color);
}}"
    );
    expect![[r#"
        graph(%x : Any):
          %1 : bool = prim::isinstance[types=[Enum<__strand__.test_enum.Color>]](%x)
          return (%1)
    "#]]
    .assert_eq(&graph(&source, "is_color"));
}

#[test]
fn test_name_and_value_projections() {
    let source = format!(
        "{COLOR}
fn name_of(x: Color) -> str {{
    return x.name;
}}

fn value_of(x: Color) -> int {{
    return x.value;
}}"
    );
    expect![[r#"
        graph(%x : Enum<__strand__.test_enum.Color>):
          %1 : str = prim::EnumName(%x)
          return (%1)
    "#]]
    .assert_eq(&graph(&source, "name_of"));
    expect![[r#"
        graph(%x : Enum<__strand__.test_enum.Color>):
          %1 : int = prim::EnumValue(%x)
          return (%1)
    "#]]
    .assert_eq(&graph(&source, "value_of"));
}

#[test]
fn test_member_projections_fold_to_constants() {
    let source = "
enum Label { ON = 'on', OFF = 'off' }

fn off_name() -> str {
    return Label.OFF.name;
}

fn off_value() -> str {
    return Label.OFF.value;
}";
    expect![[r#"
        graph():
          %0 : str = prim::Constant[value="OFF"]()
          return (%0)
    "#]]
    .assert_eq(&graph(source, "off_name"));
    expect![[r#"
        graph():
          %0 : str = prim::Constant[value="off"]()
          return (%0)
    "#]]
    .assert_eq(&graph(source, "off_value"));
}

#[test]
fn test_float_backed_value_type() {
    let source = "
enum Ratio { HALF = 0.5, QUARTER = 0.25 }

fn value_of(r: Ratio) -> float {
    return r.value;
}";
    let printed = graph(source, "value_of");
    assert!(printed.contains("%1 : float = prim::EnumValue(%r)"), "{printed}");
}

#[test]
fn test_closed_over_aliases_fold() {
    let source = format!(
        "{COLOR}
let a = Color;
let b = Color.RED;

fn closed_over_aliased_type() -> int {{
    return a.RED.value;
}}

fn closed_over_aliased_value() -> int {{
    return b.value;
}}"
    );
    let expected = expect![[r#"
        graph():
          %0 : int = prim::Constant[value=1]()
          return (%0)
    "#]];
    expected.assert_eq(&graph(&source, "closed_over_aliased_type"));
    expected.assert_eq(&graph(&source, "closed_over_aliased_value"));
}

#[test]
fn test_module_attribute_value() {
    let source = format!(
        "{COLOR}
module TestModule {{
    e: Color;

    fn forward(self) -> int {{
        return self.e.value;
    }}

    fn attr(self) -> Color {{
        return self.e;
    }}
}}"
    );
    let unit = unit(&source);
    expect![[r#"
        graph(%self : __strand__.test_enum.TestModule):
          %1 : Enum<__strand__.test_enum.Color> = prim::GetAttr[name="e"](%self)
          %2 : int = prim::EnumValue(%1)
          return (%2)
    "#]]
    .assert_eq(&unit.method_graph("TestModule", "forward").unwrap().to_string());
    expect![[r#"
        graph(%self : __strand__.test_enum.TestModule):
          %1 : Enum<__strand__.test_enum.Color> = prim::GetAttr[name="e"](%self)
          return (%1)
    "#]]
    .assert_eq(&unit.method_graph("TestModule", "attr").unwrap().to_string());
}

#[test]
fn test_members_returned_from_both_branches() {
    let source = format!(
        "{COLOR}
fn pick(flag: bool) -> Color {{
    if flag {{
        return Color.RED;
    }} else {{
        return Color.GREEN;
    }}
}}"
    );
    expect![[r#"
        graph(%flag : bool):
          prim::If(%flag)
            block0():
              %1 : Enum<__strand__.test_enum.Color> = prim::Constant[value=__strand__.test_enum.Color.RED]()
              return (%1)
            block1():
              %2 : Enum<__strand__.test_enum.Color> = prim::Constant[value=__strand__.test_enum.Color.GREEN]()
              return (%2)
    "#]]
    .assert_eq(&graph(&source, "pick"));
}

#[test]
fn test_reassigned_local_uses_store_and_load() {
    let source = format!(
        "{COLOR}
fn last(x: Color) -> Color {{
    let current = Color.RED;
    for e in Color {{
        current = e;
    }}
    return current;
}}"
    );
    let printed = graph(&source, "last");
    assert!(printed.contains("prim::Store[name=\"current\"]"), "{printed}");
    assert!(
        printed.contains("= prim::Load[name=\"current\"]()"),
        "{printed}"
    );
}

#[test]
fn test_every_reference_sees_the_same_type() {
    let source = format!(
        "{COLOR}
fn f(x: Color) -> bool {{
    return x == Color.GREEN;
}}"
    );
    let unit = unit(&source);
    let graph = unit.function_graph("f").unwrap();
    let color = unit.enum_type("Color").unwrap();
    let param = graph.param_types().next().unwrap();
    assert!(std::sync::Arc::ptr_eq(param.as_enum().unwrap(), &color));
}
