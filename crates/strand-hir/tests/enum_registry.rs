//! Enum registry behaviour across compilation units and threads.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::*;
use strand_hir::{EnumDefinition, Literal};

const COLOR: &str = "enum Color { RED = 1, GREEN = 2 }\nfn f(x: Color) -> int { return x.value; }";

fn unit_in(registry: &Arc<EnumRegistry>, source: &str, module: &str) -> CompilationUnit {
    CompilationUnit::with_registry(
        source,
        CompileOptions::for_module(module).with_enum_support(true),
        Arc::clone(registry),
    )
    .unwrap()
}

#[test]
fn test_identical_declarations_share_a_type() {
    let registry = Arc::new(EnumRegistry::new());
    let first = unit_in(&registry, COLOR, "shared").enum_type("Color").unwrap();
    let second = unit_in(&registry, COLOR, "shared").enum_type("Color").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_redefinition_in_a_later_unit_is_mangled() {
    let registry = Arc::new(EnumRegistry::new());
    let first = unit_in(&registry, COLOR, "scripts").enum_type("Color").unwrap();
    let changed = unit_in(&registry, "enum Color { RED = 1, BLUE = 3 }", "scripts")
        .enum_type("Color")
        .unwrap();

    assert_eq!(first.qualified_name(), "__strand__.scripts.Color");
    assert_eq!(
        changed.qualified_name(),
        "__strand__.___strand_mangle_0.scripts.Color"
    );
    assert!(changed.member_named("BLUE").is_some());
    assert!(first.member_named("BLUE").is_none());
}

#[test]
fn test_mangled_types_stay_distinct_in_graphs() {
    let registry = Arc::new(EnumRegistry::new());
    let _ = unit_in(&registry, COLOR, "graphs").enum_type("Color").unwrap();
    let changed = unit_in(
        &registry,
        "enum Color { RED = 10 }\nfn f(x: Color) -> int { return x.value; }",
        "graphs",
    );
    let printed = changed.function_graph("f").unwrap().to_string();
    assert!(
        printed.contains("Enum<__strand__.___strand_mangle_0.graphs.Color>"),
        "{printed}"
    );
}

#[test]
fn test_concurrent_first_resolution_returns_one_type() {
    const THREADS: usize = 8;
    let registry = Arc::new(EnumRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let definition = EnumDefinition::new("Color", "concurrent")
                    .member("RED", Literal::Int(1))
                    .member("GREEN", Literal::Int(2));
                barrier.wait();
                registry.resolve(&definition).unwrap()
            })
        })
        .collect();

    let types: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(types.iter().all(|ty| Arc::ptr_eq(ty, &types[0])));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_units_compile_on_many_threads() {
    let registry = Arc::new(EnumRegistry::new());
    let unit = Arc::new(unit_in(&registry, COLOR, "threads"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let unit = Arc::clone(&unit);
            thread::spawn(move || unit.function_graph("f").unwrap())
        })
        .collect();

    let graphs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for graph in &graphs {
        assert_eq!(graph.to_string(), graphs[0].to_string());
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_module_methods_compile_on_many_threads() {
    let source = "
enum Color { RED = 1, GREEN = 2 }

module M {
    e: Color;

    fn a(self) -> int {
        return self.e.value;
    }

    fn b(self) -> Color {
        return self.e;
    }
}";
    for _ in 0..200 {
        let unit = Arc::new(unit_in(&Arc::new(EnumRegistry::new()), source, "methods"));
        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = ["a", "b"]
            .into_iter()
            .map(|method| {
                let unit = Arc::clone(&unit);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    unit.method_graph("M", method).map(|_| ())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(()));
        }
    }
}

#[test]
fn test_global_registry_is_shared() {
    let source = "enum Weekday { MON = 1, TUE = 2 }";
    let options = CompileOptions::for_module("global_registry_test").with_enum_support(true);
    let first = CompilationUnit::new(source, options.clone()).unwrap();
    let second = CompilationUnit::new(source, options).unwrap();
    assert!(Arc::ptr_eq(first.registry(), EnumRegistry::global()));
    assert!(Arc::ptr_eq(
        &first.enum_type("Weekday").unwrap(),
        &second.enum_type("Weekday").unwrap()
    ));
}
