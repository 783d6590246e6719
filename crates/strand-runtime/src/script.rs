//! Host-facing handles over a compiled script.
//!
//! A [`ScriptUnit`] owns one [`CompilationUnit`]. Functions and module
//! methods are compiled on first use and executed by the graph interpreter.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use strand_hir::{CompilationUnit, CompileOptions, EnumRegistry, Graph};
use tracing::debug;

use crate::error::RuntimeError;
use crate::eval;
use crate::value::{EnumValue, Value};

/// A compiled script.
#[derive(Debug, Clone)]
pub struct ScriptUnit {
    unit: Arc<CompilationUnit>,
}

impl ScriptUnit {
    /// Parses `source` and registers its enums in the process-wide registry.
    pub fn compile(source: &str, options: CompileOptions) -> Result<Self, RuntimeError> {
        Self::compile_with_registry(source, options, Arc::clone(EnumRegistry::global()))
    }

    /// Like [`ScriptUnit::compile`], with a caller-provided registry.
    pub fn compile_with_registry(
        source: &str,
        options: CompileOptions,
        registry: Arc<EnumRegistry>,
    ) -> Result<Self, RuntimeError> {
        let unit = CompilationUnit::with_registry(source, options, registry)?;
        Ok(Self {
            unit: Arc::new(unit),
        })
    }

    /// The underlying compilation unit.
    #[must_use]
    pub fn compilation_unit(&self) -> &Arc<CompilationUnit> {
        &self.unit
    }

    /// Compiles the free function `name`.
    pub fn function(&self, name: &str) -> Result<ScriptFunction, RuntimeError> {
        let graph = self.unit.function_graph(name)?;
        Ok(ScriptFunction { graph })
    }

    /// Instantiates module `name` with the given attribute values.
    pub fn module(
        &self,
        name: &str,
        attributes: IndexMap<SmolStr, Value>,
    ) -> Result<ScriptModule, RuntimeError> {
        let class = self.unit.class_type(name)?;
        let instance = Value::object(class, attributes)?;
        debug!(module = name, "instantiated module");
        Ok(ScriptModule {
            unit: Arc::clone(&self.unit),
            name: SmolStr::new(name),
            instance,
        })
    }

    /// The member `member` of enum `name`.
    pub fn enum_value(&self, name: &str, member: &str) -> Result<EnumValue, RuntimeError> {
        let ty = self.unit.enum_type(name)?;
        EnumValue::new(ty, member)
    }

    /// All members of enum `name`, in declaration order.
    pub fn enum_members(&self, name: &str) -> Result<Vec<EnumValue>, RuntimeError> {
        let ty = self.unit.enum_type(name)?;
        Ok((0..ty.members().len())
            .map(|index| EnumValue::from_index(Arc::clone(&ty), index))
            .collect())
    }
}

/// A compiled free function.
#[derive(Debug, Clone)]
pub struct ScriptFunction {
    graph: Arc<Graph>,
}

impl ScriptFunction {
    /// The compiled graph.
    #[must_use]
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Calls the function after checking `args` against its signature.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, RuntimeError> {
        call_graph(&self.graph, args)
    }
}

/// An instance of a script module.
#[derive(Debug, Clone)]
pub struct ScriptModule {
    unit: Arc<CompilationUnit>,
    name: SmolStr,
    instance: Value,
}

impl ScriptModule {
    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module instance passed as `self`.
    #[must_use]
    pub fn instance(&self) -> &Value {
        &self.instance
    }

    /// Graph of `forward`.
    pub fn graph(&self) -> Result<Arc<Graph>, RuntimeError> {
        self.method_graph("forward")
    }

    /// Graph of `method`.
    pub fn method_graph(&self, method: &str) -> Result<Arc<Graph>, RuntimeError> {
        Ok(self.unit.method_graph(&self.name, method)?)
    }

    /// Runs `forward` with no arguments besides `self`.
    pub fn forward(&self) -> Result<Value, RuntimeError> {
        self.call_method("forward", Vec::new())
    }

    /// Runs `method` with `self` prepended to `args`.
    pub fn call_method(&self, method: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let graph = self.method_graph(method)?;
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(self.instance.clone());
        full.extend(args);
        call_graph(&graph, full)
    }
}

fn call_graph(graph: &Graph, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let expected = graph.params().len();
    if args.len() != expected {
        return Err(RuntimeError::InvalidArgumentCount {
            expected,
            got: args.len(),
        });
    }
    for (index, (arg, ty)) in args.iter().zip(graph.param_types()).enumerate() {
        if !arg.conforms_to(ty) {
            return Err(RuntimeError::ArgumentType {
                index,
                expected: SmolStr::new(ty.to_string()),
                found: SmolStr::new(arg.type_name()),
            });
        }
    }
    eval::execute(graph, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> ScriptUnit {
        ScriptUnit::compile_with_registry(
            source,
            CompileOptions::for_module("script_tests").with_enum_support(true),
            Arc::new(EnumRegistry::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_enum_members_in_declaration_order() {
        let unit = compile("enum Color { RED = 1, GREEN = 2, BLUE = 3 }");
        let names: Vec<_> = unit
            .enum_members("Color")
            .unwrap()
            .iter()
            .map(|member| member.name().to_string())
            .collect();
        assert_eq!(names, ["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_unknown_member() {
        let unit = compile("enum Color { RED = 1 }");
        assert_eq!(
            unit.enum_value("Color", "PURPLE").unwrap_err(),
            RuntimeError::UnknownEnumMember {
                ty: "Color".into(),
                member: "PURPLE".into(),
            }
        );
    }

    #[test]
    fn test_argument_types_are_checked() {
        let unit = compile("fn double(x: int) -> int { return x * 2; }");
        let double = unit.function("double").unwrap();
        assert_eq!(double.call(vec![Value::Int(21)]).unwrap(), Value::Int(42));
        assert_eq!(
            double.call(vec![Value::from("21")]).unwrap_err(),
            RuntimeError::ArgumentType {
                index: 0,
                expected: "int".into(),
                found: "str".into(),
            }
        );
    }
}
