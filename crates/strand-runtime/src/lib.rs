//! `strand-runtime` - Host API and graph interpreter for Strand script.
//!
//! Compiles scripts with `strand-hir` and executes the resulting graphs:
//!
//! - **Config**: Compile options from TOML files and the environment
//! - **Script**: [`ScriptUnit`], [`ScriptFunction`] and [`ScriptModule`]
//!   handles with argument checking
//! - **Eval**: A direct interpreter over the graph IR
//!
//! # Example
//!
//! ```
//! use strand_hir::CompileOptions;
//! use strand_runtime::{ScriptUnit, Value};
//!
//! let source = r#"
//! enum Color { RED = 1, GREEN = 2 }
//!
//! fn enum_comp(x: Color, y: Color) -> bool {
//!     return x == y;
//! }
//! "#;
//! let options = CompileOptions::for_module("runtime_doc").with_enum_support(true);
//! let unit = ScriptUnit::compile(source, options).unwrap();
//! let red = unit.enum_value("Color", "RED").unwrap();
//! let green = unit.enum_value("Color", "GREEN").unwrap();
//!
//! let enum_comp = unit.function("enum_comp").unwrap();
//! let result = enum_comp.call(vec![red.into(), green.into()]).unwrap();
//! assert_eq!(result, Value::Bool(false));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Compiler configuration.
pub mod config;
/// Runtime errors.
pub mod error;
/// Graph evaluation.
pub mod eval;
/// Script, function and module handles.
pub mod script;
/// Runtime values.
pub mod value;

pub use config::StrandConfig;
pub use error::RuntimeError;
pub use script::{ScriptFunction, ScriptModule, ScriptUnit};
pub use value::{EnumValue, Object, Value};
