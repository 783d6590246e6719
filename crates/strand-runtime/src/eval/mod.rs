//! Graph interpreter.
//!
//! Executes a compiled [`Graph`] directly. Every value is written once into
//! the frame's value table; `prim::Store` / `prim::Load` go through a
//! per-call map of named slots.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use strand_hir::{Block, Graph, Node, Op, ValueId};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::value::Value;

pub mod ops;

/// Outcome of executing a block.
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Continue,
    Return(Value),
}

/// State of one graph invocation.
struct Frame<'g> {
    graph: &'g Graph,
    values: Vec<Option<Value>>,
    slots: FxHashMap<SmolStr, Value>,
}

/// Executes `graph` with `args` bound to its parameters.
///
/// Arguments are not type checked here; see
/// [`ScriptFunction::call`](crate::script::ScriptFunction::call).
pub fn execute(graph: &Graph, args: Vec<Value>) -> Result<Value, RuntimeError> {
    if args.len() != graph.params().len() {
        return Err(RuntimeError::InvalidArgumentCount {
            expected: graph.params().len(),
            got: args.len(),
        });
    }
    debug!(graph = graph.name(), args = args.len(), "executing graph");

    let mut frame = Frame {
        graph,
        values: vec![None; graph.value_count()],
        slots: FxHashMap::default(),
    };
    for (param, arg) in graph.params().iter().zip(args) {
        frame.set(*param, arg);
    }

    match frame.exec_block(graph.body())? {
        Flow::Return(value) => Ok(value),
        Flow::Continue => Err(RuntimeError::MissingReturn(SmolStr::new(graph.name()))),
    }
}

impl Frame<'_> {
    fn set(&mut self, id: ValueId, value: Value) {
        if let Some(slot) = self.values.get_mut(id.index()) {
            *slot = Some(value);
        }
    }

    fn get(&self, id: ValueId) -> Result<Value, RuntimeError> {
        self.values
            .get(id.index())
            .and_then(Option::as_ref)
            .cloned()
            .ok_or_else(|| {
                RuntimeError::UnboundLocal(SmolStr::new(&self.graph.value(id).name))
            })
    }

    fn inputs(&self, node: &Node) -> Result<Vec<Value>, RuntimeError> {
        node.inputs.iter().map(|input| self.get(*input)).collect()
    }

    fn exec_block(&mut self, block: &Block) -> Result<Flow, RuntimeError> {
        for node in &block.nodes {
            if let Flow::Return(value) = self.exec_node(node)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }

    fn exec_node(&mut self, node: &Node) -> Result<Flow, RuntimeError> {
        trace!(op = ?node.op, "exec");
        let result = match &node.op {
            Op::Constant(constant) => Value::from_constant(constant),
            Op::ListConstruct => Value::list(self.inputs(node)?),
            Op::GetAttr(name) => match self.single_input(node)? {
                Value::Object(object) => object
                    .attribute(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::MissingAttribute(name.clone()))?,
                other => return Err(mismatch("prim::GetAttr", &other)),
            },
            Op::EnumName => match self.single_input(node)? {
                Value::Enum(value) => Value::from(value.name()),
                other => return Err(mismatch("prim::EnumName", &other)),
            },
            Op::EnumValue => match self.single_input(node)? {
                Value::Enum(value) => value.value(),
                other => return Err(mismatch("prim::EnumValue", &other)),
            },
            Op::IsInstance(types) => {
                let value = self.single_input(node)?;
                Value::Bool(types.iter().any(|ty| value.conforms_to(ty)))
            }
            Op::Store(name) => {
                let value = self.single_input(node)?;
                self.slots.insert(name.clone(), value);
                return Ok(Flow::Continue);
            }
            Op::Load(name) => self
                .slots
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnboundLocal(name.clone()))?,
            Op::If => return self.exec_if(node),
            Op::Loop => return self.exec_loop(node),
            Op::Return => return Ok(Flow::Return(self.single_input(node)?)),
            Op::Aten(op) => match ops::apply(*op, self.inputs(node)?)? {
                Some(value) => value,
                None => return Ok(Flow::Continue),
            },
        };

        if let Some(output) = node.outputs.first() {
            self.set(*output, result);
        }
        Ok(Flow::Continue)
    }

    fn single_input(&self, node: &Node) -> Result<Value, RuntimeError> {
        match node.inputs.as_slice() {
            [input] => self.get(*input),
            inputs => Err(RuntimeError::InvalidArgumentCount {
                expected: 1,
                got: inputs.len(),
            }),
        }
    }

    fn exec_if(&mut self, node: &Node) -> Result<Flow, RuntimeError> {
        let condition = match self.single_input(node)? {
            Value::Bool(condition) => condition,
            other => return Err(mismatch("prim::If", &other)),
        };
        match node.blocks.get(usize::from(!condition)) {
            Some(block) => self.exec_block(block),
            None => Ok(Flow::Continue),
        }
    }

    fn exec_loop(&mut self, node: &Node) -> Result<Flow, RuntimeError> {
        let items = match self.single_input(node)? {
            Value::List(items) => items.lock().clone(),
            other => return Err(mismatch("prim::Loop", &other)),
        };
        let Some(body) = node.blocks.first() else {
            return Ok(Flow::Continue);
        };

        for item in items {
            if let Some(param) = body.params.first() {
                self.set(*param, item);
            }
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }
}

fn mismatch(op: &str, value: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch(SmolStr::new(format!("{op}: got '{}'", value.type_name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_hir::{CompilationUnit, CompileOptions, EnumRegistry};
    use std::sync::Arc;

    fn run(source: &str, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let unit = CompilationUnit::with_registry(
            source,
            CompileOptions::for_module("eval_tests").with_enum_support(true),
            Arc::new(EnumRegistry::new()),
        )?;
        let graph = unit.function_graph(name)?;
        execute(&graph, args)
    }

    #[test]
    fn test_arithmetic_and_slots() {
        let source = "
fn total(xs: List[int]) -> int {
    let acc = 0;
    for x in xs {
        acc = acc + x;
    }
    return acc;
}";
        let xs = Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(run(source, "total", vec![xs]).unwrap(), Value::Int(6));
    }

    #[test]
    fn test_if_else_branches() {
        let source = "
fn sign(n: int) -> str {
    if n < 0 {
        return 'negative';
    } else if n == 0 {
        return 'zero';
    }
    return 'positive';
}";
        assert_eq!(run(source, "sign", vec![Value::Int(-4)]).unwrap(), Value::from("negative"));
        assert_eq!(run(source, "sign", vec![Value::Int(0)]).unwrap(), Value::from("zero"));
        assert_eq!(run(source, "sign", vec![Value::Int(9)]).unwrap(), Value::from("positive"));
    }

    #[test]
    fn test_argument_count_is_checked() {
        let source = "fn f(x: int) -> int { return x; }";
        assert_eq!(
            run(source, "f", Vec::new()).unwrap_err(),
            RuntimeError::InvalidArgumentCount {
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn test_list_cannot_contain_itself() {
        let source = "
fn f() -> List[Any] {
    let xs: List[Any] = [];
    xs.append(xs);
    return xs;
}";
        assert_eq!(
            run(source, "f", Vec::new()).unwrap_err(),
            RuntimeError::TypeMismatch("aten::append: a list cannot contain itself".into())
        );
    }

    #[test]
    fn test_index_out_of_bounds() {
        let source = "fn f(xs: List[int]) -> int { return xs[3]; }";
        let xs = Value::list(vec![Value::Int(1)]);
        assert_eq!(
            run(source, "f", vec![xs]).unwrap_err(),
            RuntimeError::IndexOutOfBounds { index: 3, len: 1 }
        );
    }
}
