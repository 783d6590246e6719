use super::*;
use crate::ir::AtenOp;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Determines the binary operator from the tokens of a node.
    fn from_node(node: &SyntaxNode) -> Option<Self> {
        node.children_with_tokens()
            .filter_map(|element| element.into_token())
            .find_map(|token| {
                Some(match token.kind() {
                    SyntaxKind::Plus => Self::Add,
                    SyntaxKind::Minus => Self::Sub,
                    SyntaxKind::Star => Self::Mul,
                    SyntaxKind::Slash => Self::Div,
                    SyntaxKind::Percent => Self::Mod,
                    SyntaxKind::EqEq => Self::Eq,
                    SyntaxKind::NotEq => Self::Ne,
                    SyntaxKind::Lt => Self::Lt,
                    SyntaxKind::LtEq => Self::LtEq,
                    SyntaxKind::Gt => Self::Gt,
                    SyntaxKind::GtEq => Self::GtEq,
                    SyntaxKind::KwAnd => Self::And,
                    SyntaxKind::KwOr => Self::Or,
                    _ => return None,
                })
            })
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    fn aten(self) -> AtenOp {
        match self {
            Self::Add => AtenOp::Add,
            Self::Sub => AtenOp::Sub,
            Self::Mul => AtenOp::Mul,
            Self::Div => AtenOp::Div,
            Self::Mod => AtenOp::Remainder,
            Self::Eq => AtenOp::Eq,
            Self::Ne => AtenOp::Ne,
            Self::Lt => AtenOp::Lt,
            Self::LtEq => AtenOp::Le,
            Self::Gt => AtenOp::Gt,
            Self::GtEq => AtenOp::Ge,
            Self::And => AtenOp::And,
            Self::Or => AtenOp::Or,
        }
    }
}

impl ExprEmitter<'_, '_> {
    pub(super) fn emit_binary(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let range = node.text_range();
        let unsupported = || CompileError::unsupported("malformed binary expression", range);
        let op = BinaryOp::from_node(node).ok_or_else(unsupported)?;
        let mut operands = cst::exprs(node);
        let lhs = operands.next().ok_or_else(unsupported)?;
        let rhs = operands.next().ok_or_else(unsupported)?;

        match op {
            BinaryOp::Eq | BinaryOp::Ne => self.emit_equality(op, &lhs, &rhs, range),
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                let lhs = self.emit(&lhs)?;
                let rhs = self.emit(&rhs)?;
                self.emit_comparison(op, lhs, rhs, range)
            }
            BinaryOp::And | BinaryOp::Or => {
                let lhs = self.emit_value(&lhs, None)?;
                let rhs = self.emit_value(&rhs, None)?;
                for value in [lhs, rhs] {
                    let ty = self.emitter.builder.ty(value);
                    if !matches!(ty, Ty::Bool | Ty::Any) {
                        return Err(CompileError::type_mismatch(
                            format!("'{}' expects 'bool' operands, found '{ty}'", op.symbol()),
                            range,
                        ));
                    }
                }
                Ok(Sugared::Value(self.emitter.builder.emit(
                    Op::Aten(op.aten()),
                    vec![lhs, rhs],
                    Ty::Bool,
                )))
            }
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                let lhs = self.emit_value(&lhs, None)?;
                let rhs = self.emit_value(&rhs, None)?;
                let lhs_ty = self.emitter.builder.ty(lhs).clone();
                let rhs_ty = self.emitter.builder.ty(rhs).clone();
                let result = arithmetic_result(op, &lhs_ty, &rhs_ty).ok_or_else(|| {
                    CompileError::type_mismatch(
                        format!(
                            "unsupported operand types for '{}': '{lhs_ty}' and '{rhs_ty}'",
                            op.symbol()
                        ),
                        range,
                    )
                })?;
                Ok(Sugared::Value(self.emitter.builder.emit(
                    Op::Aten(op.aten()),
                    vec![lhs, rhs],
                    result,
                )))
            }
        }
    }

    /// `==` and `!=`. Two values of the same enum type compare at runtime;
    /// values of different enum types are never equal, so the result is a
    /// constant and no runtime op is emitted.
    fn emit_equality(
        &mut self,
        op: BinaryOp,
        lhs: &SyntaxNode,
        rhs: &SyntaxNode,
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        let lhs = self.emit(lhs)?;
        let rhs = self.emit(rhs)?;
        let lhs_ty = self.emitter.sugared_ty(&lhs);
        let rhs_ty = self.emitter.sugared_ty(&rhs);

        match (
            lhs_ty.as_ref().and_then(Ty::as_enum),
            rhs_ty.as_ref().and_then(Ty::as_enum),
        ) {
            (Some(left), Some(right)) if left == right => self.emit_runtime_equality(op, lhs, rhs, range),
            (Some(_), None) | (None, Some(_))
                if lhs_ty == Some(Ty::Any) || rhs_ty == Some(Ty::Any) =>
            {
                self.emit_runtime_equality(op, lhs, rhs, range)
            }
            (Some(left), Some(right)) => {
                debug!(
                    lhs = left.qualified_name(),
                    rhs = right.qualified_name(),
                    "folded comparison between distinct enum types"
                );
                Ok(Sugared::Constant(Constant::Bool(op == BinaryOp::Ne)))
            }
            (Some(_), None) | (None, Some(_)) => Err(CompileError::type_mismatch(
                format!(
                    "'{}' not supported between {} and {}",
                    op.symbol(),
                    self.emitter.describe(&lhs),
                    self.emitter.describe(&rhs)
                ),
                range,
            )),
            (None, None) => self.emit_comparison(op, lhs, rhs, range),
        }
    }

    fn emit_runtime_equality(
        &mut self,
        op: BinaryOp,
        lhs: Sugared,
        rhs: Sugared,
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        let lhs = self.emitter.materialize(lhs, range)?;
        let rhs = self.emitter.materialize(rhs, range)?;
        Ok(Sugared::Value(self.emitter.builder.emit(
            Op::Aten(op.aten()),
            vec![lhs, rhs],
            Ty::Bool,
        )))
    }

    fn emit_comparison(
        &mut self,
        op: BinaryOp,
        lhs: Sugared,
        rhs: Sugared,
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        let lhs = self.emitter.materialize(lhs, range)?;
        let rhs = self.emitter.materialize(rhs, range)?;
        let lhs_ty = self.emitter.builder.ty(lhs).clone();
        let rhs_ty = self.emitter.builder.ty(rhs).clone();

        let equality = matches!(op, BinaryOp::Eq | BinaryOp::Ne);
        let comparable = matches!(lhs_ty, Ty::Any)
            || matches!(rhs_ty, Ty::Any)
            || (lhs_ty.is_numeric() && rhs_ty.is_numeric())
            || (lhs_ty == Ty::Str && rhs_ty == Ty::Str)
            || (equality
                && (lhs_ty == rhs_ty || lhs_ty == Ty::None || rhs_ty == Ty::None)
                && lhs_ty.as_enum().is_none()
                && rhs_ty.as_enum().is_none());
        if !comparable {
            return Err(CompileError::type_mismatch(
                format!(
                    "'{}' not supported between '{lhs_ty}' and '{rhs_ty}'",
                    op.symbol()
                ),
                range,
            ));
        }

        Ok(Sugared::Value(self.emitter.builder.emit(
            Op::Aten(op.aten()),
            vec![lhs, rhs],
            Ty::Bool,
        )))
    }

    pub(super) fn emit_unary(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let range = node.text_range();
        let operand = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed unary expression", range))?;
        let negate = cst::token(node, SyntaxKind::Minus).is_some();
        let operand = self.emit(&operand)?;

        match (negate, &operand) {
            (true, Sugared::Constant(Constant::Int(value))) => {
                return value
                    .checked_neg()
                    .map(|value| Sugared::Constant(Constant::Int(value)))
                    .ok_or_else(|| CompileError::unsupported("numeric literal out of range", range));
            }
            (true, Sugared::Constant(Constant::Float(value))) => {
                return Ok(Sugared::Constant(Constant::Float(-value)));
            }
            (false, Sugared::Constant(Constant::Bool(value))) => {
                return Ok(Sugared::Constant(Constant::Bool(!value)));
            }
            _ => {}
        }

        let value = self.emitter.materialize(operand, range)?;
        let ty = self.emitter.builder.ty(value).clone();
        let (aten, result) = if negate {
            if !(ty.is_numeric() || ty == Ty::Any) {
                return Err(CompileError::type_mismatch(
                    format!("bad operand type for unary -: '{ty}'"),
                    range,
                ));
            }
            (AtenOp::Neg, ty)
        } else {
            if !matches!(ty, Ty::Bool | Ty::Any) {
                return Err(CompileError::type_mismatch(
                    format!("'not' expects a 'bool' operand, found '{ty}'"),
                    range,
                ));
            }
            (AtenOp::Not, Ty::Bool)
        };
        Ok(Sugared::Value(
            self.emitter.builder.emit(Op::Aten(aten), vec![value], result),
        ))
    }
}

fn arithmetic_result(op: BinaryOp, lhs: &Ty, rhs: &Ty) -> Option<Ty> {
    if matches!(lhs, Ty::Any) || matches!(rhs, Ty::Any) {
        return Some(Ty::Any);
    }
    match (lhs, rhs) {
        (Ty::Str, Ty::Str) if op == BinaryOp::Add => Some(Ty::Str),
        (Ty::Int, Ty::Int) if op != BinaryOp::Div => Some(Ty::Int),
        (l, r) if l.is_numeric() && r.is_numeric() => Some(Ty::Float),
        _ => None,
    }
}
