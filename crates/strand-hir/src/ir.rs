//! Graph IR.
//!
//! A compiled function is a [`Graph`]: typed parameters and a body
//! [`Block`] of [`Node`]s. Values are written once; mutable locals are
//! expressed with `prim::Store` / `prim::Load` nodes keyed by name. Control
//! flow nodes (`prim::If`, `prim::Loop`) own nested blocks, and
//! `return` may appear inside them.
//!
//! The [`Display`](std::fmt::Display) output is stable and is what tooling
//! and tests compare against:
//!
//! ```text
//! graph(%x : Enum<__strand__.test_enum.Color>,
//!       %y : Enum<__strand__.test_enum.Color>):
//!   %2 : bool = aten::eq(%x, %y)
//!   return (%2)
//! ```

mod builder;
mod printer;

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::types::{EnumType, Literal, Ty};

pub(crate) use builder::GraphBuilder;

/// Index of a value within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub u32);

impl ValueId {
    /// Position of the value in the graph's value table.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static information about a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueInfo {
    /// Static type.
    pub ty: Ty,
    /// Unique printed name, without the leading `%`.
    pub name: SmolStr,
}

/// A compile-time constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// `None`
    None,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(SmolStr),
    /// An enum member.
    EnumMember {
        /// Owning type.
        ty: Arc<EnumType>,
        /// Member position.
        index: usize,
    },
    /// An immutable list of constants.
    List {
        /// Element type.
        elem: Ty,
        /// Elements.
        items: Vec<Constant>,
    },
}

impl Constant {
    /// Static type of the constant.
    #[must_use]
    pub fn ty(&self) -> Ty {
        match self {
            Self::None => Ty::None,
            Self::Bool(_) => Ty::Bool,
            Self::Int(_) => Ty::Int,
            Self::Float(_) => Ty::Float,
            Self::Str(_) => Ty::Str,
            Self::EnumMember { ty, .. } => Ty::Enum(Arc::clone(ty)),
            Self::List { elem, .. } => Ty::list(elem.clone()),
        }
    }
}

impl From<&Literal> for Constant {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(value) => Self::Int(*value),
            Literal::Float(value) => Self::Float(*value),
            Literal::Str(value) => Self::Str(value.clone()),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{:?}", value.as_str()),
            Self::EnumMember { ty, index } => {
                let member = ty.member(*index).map_or("<invalid>", |m| m.name().as_str());
                write!(f, "{}.{}", ty.qualified_name(), member)
            }
            Self::List { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Builtin `aten::` operators.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtenOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Remainder,
    Neg,
    Not,
    And,
    Or,
    Append,
    Len,
    GetItem,
    Tensor,
}

impl AtenOp {
    /// Printed operator name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "aten::eq",
            Self::Ne => "aten::ne",
            Self::Lt => "aten::lt",
            Self::Le => "aten::le",
            Self::Gt => "aten::gt",
            Self::Ge => "aten::ge",
            Self::Add => "aten::add",
            Self::Sub => "aten::sub",
            Self::Mul => "aten::mul",
            Self::Div => "aten::div",
            Self::Remainder => "aten::remainder",
            Self::Neg => "aten::neg",
            Self::Not => "aten::__not__",
            Self::And => "aten::__and__",
            Self::Or => "aten::__or__",
            Self::Append => "aten::append",
            Self::Len => "aten::len",
            Self::GetItem => "aten::__getitem__",
            Self::Tensor => "aten::tensor",
        }
    }
}

/// Operation performed by a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// `prim::Constant[value=...]`
    Constant(Constant),
    /// `prim::ListConstruct`
    ListConstruct,
    /// `prim::GetAttr[name="..."]`
    GetAttr(SmolStr),
    /// `prim::EnumName`
    EnumName,
    /// `prim::EnumValue`
    EnumValue,
    /// `prim::isinstance[types=[...]]`
    IsInstance(Vec<Ty>),
    /// `prim::Store[name="..."]`
    Store(SmolStr),
    /// `prim::Load[name="..."]`
    Load(SmolStr),
    /// `prim::If`; `blocks[0]` runs when the input is true, `blocks[1]` otherwise.
    If,
    /// `prim::Loop`; runs `blocks[0]` once per element of the input list.
    Loop,
    /// `return`
    Return,
    /// An `aten::` operator.
    Aten(AtenOp),
}

/// A single operation with its inputs, outputs and nested blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Operation.
    pub op: Op,
    /// Input values.
    pub inputs: Vec<ValueId>,
    /// Output values.
    pub outputs: Vec<ValueId>,
    /// Nested blocks (control flow only).
    pub blocks: Vec<Block>,
}

/// A sequence of nodes with block parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Values bound on entry (loop variables).
    pub params: Vec<ValueId>,
    /// Nodes in execution order.
    pub nodes: Vec<Node>,
}

/// A compiled function.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    name: SmolStr,
    values: Vec<ValueInfo>,
    params: Vec<ValueId>,
    body: Block,
    return_type: Ty,
}

impl Graph {
    /// Name of the compiled function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Graph parameters, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ValueId] {
        &self.params
    }

    /// Top-level block.
    #[must_use]
    pub fn body(&self) -> &Block {
        &self.body
    }

    /// Declared or inferred return type.
    #[must_use]
    pub fn return_type(&self) -> &Ty {
        &self.return_type
    }

    /// Information about `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not belong to this graph.
    #[must_use]
    pub fn value(&self, value: ValueId) -> &ValueInfo {
        &self.values[value.index()]
    }

    /// Number of values in the graph.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Parameter types, in declaration order.
    pub fn param_types(&self) -> impl Iterator<Item = &Ty> {
        self.params.iter().map(|param| &self.value(*param).ty)
    }

    /// All nodes in pre-order, descending into nested blocks.
    #[must_use]
    pub fn nodes(&self) -> Vec<&Node> {
        fn walk<'a>(block: &'a Block, out: &mut Vec<&'a Node>) {
            for node in &block.nodes {
                out.push(node);
                for nested in &node.blocks {
                    walk(nested, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.body, &mut out);
        out
    }
}
