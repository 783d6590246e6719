//! Incremental graph construction.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Block, Graph, Node, Op, ValueId, ValueInfo};
use crate::types::Ty;

/// Builds a [`Graph`], appending nodes to the innermost open block.
#[derive(Debug)]
pub(crate) struct GraphBuilder {
    name: SmolStr,
    values: Vec<(Ty, Option<SmolStr>)>,
    params: Vec<ValueId>,
    blocks: Vec<Block>,
}

impl GraphBuilder {
    pub(crate) fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            params: Vec::new(),
            blocks: vec![Block::default()],
        }
    }

    pub(crate) fn add_param(&mut self, name: &str, ty: Ty) -> ValueId {
        let value = self.new_value(ty, Some(name));
        self.params.push(value);
        value
    }

    pub(crate) fn new_value(&mut self, ty: Ty, hint: Option<&str>) -> ValueId {
        let id = ValueId(u32::try_from(self.values.len()).unwrap_or(u32::MAX));
        self.values.push((ty, hint.map(SmolStr::new)));
        id
    }

    /// Names `value` after a source variable unless it already has a name.
    pub(crate) fn set_hint(&mut self, value: ValueId, name: &str) {
        if let Some((_, hint @ None)) = self.values.get_mut(value.index()) {
            *hint = Some(SmolStr::new(name));
        }
    }

    pub(crate) fn ty(&self, value: ValueId) -> &Ty {
        &self.values[value.index()].0
    }

    /// Appends a node producing one value of type `ty`.
    pub(crate) fn emit(&mut self, op: Op, inputs: Vec<ValueId>, ty: Ty) -> ValueId {
        self.emit_named(op, inputs, ty, None)
    }

    pub(crate) fn emit_named(
        &mut self,
        op: Op,
        inputs: Vec<ValueId>,
        ty: Ty,
        hint: Option<&str>,
    ) -> ValueId {
        let output = self.new_value(ty, hint);
        self.append(Node {
            op,
            inputs,
            outputs: vec![output],
            blocks: Vec::new(),
        });
        output
    }

    /// Appends a node without outputs.
    pub(crate) fn emit_void(&mut self, op: Op, inputs: Vec<ValueId>) {
        self.append(Node {
            op,
            inputs,
            outputs: Vec::new(),
            blocks: Vec::new(),
        });
    }

    pub(crate) fn append(&mut self, node: Node) {
        if let Some(block) = self.blocks.last_mut() {
            block.nodes.push(node);
        }
    }

    /// Opens a nested block; subsequent nodes go into it until [`pop_block`](Self::pop_block).
    pub(crate) fn push_block(&mut self, params: Vec<ValueId>) {
        self.blocks.push(Block {
            params,
            nodes: Vec::new(),
        });
    }

    pub(crate) fn pop_block(&mut self) -> Block {
        if self.blocks.len() > 1 {
            self.blocks.pop().unwrap_or_default()
        } else {
            Block::default()
        }
    }

    /// Assigns unique printed names and produces the finished graph.
    pub(crate) fn finish(mut self, return_type: Ty) -> Graph {
        let body = self.blocks.swap_remove(0);
        let mut seen: FxHashMap<SmolStr, usize> = FxHashMap::default();
        let values = self
            .values
            .into_iter()
            .enumerate()
            .map(|(index, (ty, hint))| {
                let name = match hint {
                    Some(hint) => {
                        let count = seen.entry(hint.clone()).or_insert(0);
                        let name = if *count == 0 {
                            hint
                        } else {
                            SmolStr::new(format!("{hint}.{count}"))
                        };
                        *count += 1;
                        name
                    }
                    None => SmolStr::new(index.to_string()),
                };
                ValueInfo { ty, name }
            })
            .collect();

        Graph {
            name: self.name,
            values,
            params: self.params,
            body,
            return_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AtenOp, Constant};

    #[test]
    fn test_names_are_unique() {
        let mut builder = GraphBuilder::new("f");
        let x = builder.add_param("x", Ty::Int);
        let load = builder.emit_named(Op::Load("x".into()), vec![], Ty::Int, Some("x"));
        let sum = builder.emit(Op::Aten(AtenOp::Add), vec![x, load], Ty::Int);
        builder.emit_void(Op::Return, vec![sum]);
        let graph = builder.finish(Ty::Int);

        assert_eq!(graph.value(x).name, "x");
        assert_eq!(graph.value(load).name, "x.1");
        assert_eq!(graph.value(sum).name, "2");
    }

    #[test]
    fn test_nested_blocks() {
        let mut builder = GraphBuilder::new("f");
        let cond = builder.emit(Op::Constant(Constant::Bool(true)), vec![], Ty::Bool);
        builder.push_block(Vec::new());
        builder.emit(Op::Constant(Constant::Int(1)), vec![], Ty::Int);
        let then_block = builder.pop_block();
        builder.append(Node {
            op: Op::If,
            inputs: vec![cond],
            outputs: Vec::new(),
            blocks: vec![then_block, Block::default()],
        });
        let graph = builder.finish(Ty::None);

        assert_eq!(graph.body().nodes.len(), 2);
        assert_eq!(graph.nodes().len(), 3);
    }
}
