//! Shared helpers for compiler tests.
#![allow(dead_code, unused_imports)]

use std::sync::Arc;

pub use strand_hir::{CompilationUnit, CompileError, CompileOptions, DiagnosticCode, EnumRegistry};
pub use text_size::{TextRange, TextSize};

/// Module name used for every test unit.
pub const MODULE: &str = "test_enum";

/// Compiles `source` with enums enabled against a private registry.
pub fn unit(source: &str) -> CompilationUnit {
    unit_with(source, true)
}

/// Compiles `source` with enum support set to `enabled`.
pub fn unit_with(source: &str, enabled: bool) -> CompilationUnit {
    CompilationUnit::with_registry(
        source,
        CompileOptions::for_module(MODULE).with_enum_support(enabled),
        Arc::new(EnumRegistry::new()),
    )
    .unwrap_or_else(|error| panic!("unit failed to build: {error}"))
}

/// Printed graph of the free function `name`.
pub fn graph(source: &str, name: &str) -> String {
    unit(source)
        .function_graph(name)
        .unwrap_or_else(|error| panic!("{}", error.render(source)))
        .to_string()
}

/// Error raised while compiling the free function `name`.
pub fn compile_error(source: &str, name: &str) -> CompileError {
    compile_error_with(source, name, true)
}

/// Like [`compile_error`], with enum support set to `enabled`.
pub fn compile_error_with(source: &str, name: &str, enabled: bool) -> CompileError {
    match unit_with(source, enabled).function_graph(name) {
        Ok(graph) => panic!("expected an error, got:\n{graph}"),
        Err(error) => error,
    }
}

/// Range of the first occurrence of `needle` in `source`.
pub fn range_of(source: &str, needle: &str) -> TextRange {
    let start = source
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found"));
    let start = u32::try_from(start).unwrap();
    let len = u32::try_from(needle.len()).unwrap();
    TextRange::at(TextSize::from(start), TextSize::from(len))
}

/// Range of `needle` inside the first occurrence of `context`.
pub fn range_within(source: &str, context: &str, needle: &str) -> TextRange {
    let outer = range_of(source, context);
    let offset = context
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not in {context:?}"));
    let len = u32::try_from(needle.len()).unwrap();
    let offset = TextSize::from(u32::try_from(offset).unwrap());
    TextRange::at(outer.start() + offset, TextSize::from(len))
}
