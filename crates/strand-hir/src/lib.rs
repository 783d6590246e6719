//! `strand-hir` - Type checking and graph emission for Strand script.
//!
//! This crate turns a parsed script (from `strand-syntax`) into typed
//! graphs:
//!
//! - **Items**: Top-level enums, functions, modules and captures
//! - **Enums**: Validation of enum declarations and a process-wide registry
//!   of enum types keyed by qualified name
//! - **Type Checking**: Name resolution and typing of function bodies,
//!   including the enum rules (member access, projections, equality,
//!   iteration and `isinstance`)
//! - **IR**: The graph representation and its stable text format
//! - **Diagnostics**: Compile errors with codes and source highlights
//!
//! Enum support is an experimental feature and must be switched on through
//! [`CompileOptions`]; with it off, enum declarations are invisible to the
//! type checker.
//!
//! # Example
//!
//! ```
//! use strand_hir::{CompilationUnit, CompileOptions};
//!
//! let source = r#"
//! enum Color { RED = 1, GREEN = 2 }
//!
//! fn enum_comp(x: Color, y: Color) -> bool {
//!     return x == y;
//! }
//! "#;
//! let options = CompileOptions::for_module("doc_example").with_enum_support(true);
//! let unit = CompilationUnit::new(source, options).unwrap();
//! let graph = unit.function_graph("enum_comp").unwrap();
//!
//! assert!(graph.to_string().contains("aten::eq(%x, %y)"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod cst;
pub mod diagnostics;
mod emit;
pub mod enums;
pub mod ir;
mod items;
mod literals;
pub mod options;
pub mod types;
pub mod unit;

pub use diagnostics::{CompileError, DiagnosticCode};
pub use enums::{EnumDefinition, EnumRegistry};
pub use ir::{AtenOp, Block, Constant, Graph, Node, Op, ValueId};
pub use options::{CompileOptions, FeatureGate, DEFAULT_MODULE};
pub use types::{BackingType, ClassType, EnumMember, EnumType, Literal, Ty};
pub use unit::CompilationUnit;
