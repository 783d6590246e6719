//! Text form of graphs.

use std::fmt::{self, Write};

use super::{Block, Constant, Graph, Node, Op, ValueId};

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("graph(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n      ")?;
            }
            self.write_typed(f, *param)?;
        }
        f.write_str("):\n")?;
        self.write_block_nodes(f, &self.body, 1)
    }
}

impl Graph {
    fn write_value(&self, f: &mut impl Write, value: ValueId) -> fmt::Result {
        write!(f, "%{}", self.value(value).name)
    }

    fn write_typed(&self, f: &mut impl Write, value: ValueId) -> fmt::Result {
        let info = self.value(value);
        write!(f, "%{} : {}", info.name, info.ty)
    }

    fn write_block_nodes(&self, f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
        for node in &block.nodes {
            self.write_node(f, node, depth)?;
        }
        Ok(())
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        f.write_str(&indent)?;

        if node.op == Op::Return {
            f.write_str("return (")?;
            self.write_list(f, &node.inputs)?;
            return f.write_str(")\n");
        }

        if !node.outputs.is_empty() {
            for (i, output) in node.outputs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                self.write_typed(f, *output)?;
            }
            f.write_str(" = ")?;
        }

        write_op(f, &node.op)?;
        f.write_str("(")?;
        self.write_list(f, &node.inputs)?;
        f.write_str(")\n")?;

        for (i, block) in node.blocks.iter().enumerate() {
            write!(f, "{indent}  block{i}(")?;
            for (j, param) in block.params.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                self.write_typed(f, *param)?;
            }
            f.write_str("):\n")?;
            self.write_block_nodes(f, block, depth + 2)?;
        }
        Ok(())
    }

    fn write_list(&self, f: &mut impl Write, values: &[ValueId]) -> fmt::Result {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write_value(f, *value)?;
        }
        Ok(())
    }
}

fn write_op(f: &mut impl Write, op: &Op) -> fmt::Result {
    match op {
        Op::Constant(Constant::None) => f.write_str("prim::Constant"),
        Op::Constant(constant) => write!(f, "prim::Constant[value={constant}]"),
        Op::ListConstruct => f.write_str("prim::ListConstruct"),
        Op::GetAttr(name) => write!(f, "prim::GetAttr[name=\"{name}\"]"),
        Op::EnumName => f.write_str("prim::EnumName"),
        Op::EnumValue => f.write_str("prim::EnumValue"),
        Op::IsInstance(types) => {
            f.write_str("prim::isinstance[types=[")?;
            for (i, ty) in types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ty}")?;
            }
            f.write_str("]]")
        }
        Op::Store(name) => write!(f, "prim::Store[name=\"{name}\"]"),
        Op::Load(name) => write!(f, "prim::Load[name=\"{name}\"]"),
        Op::If => f.write_str("prim::If"),
        Op::Loop => f.write_str("prim::Loop"),
        Op::Return => f.write_str("return"),
        Op::Aten(op) => f.write_str(op.name()),
    }
}
