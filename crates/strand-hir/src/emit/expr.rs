use super::*;
use crate::literals::{parse_float, parse_int, unescape_string};

impl ExprEmitter<'_, '_> {
    /// Evaluates an expression.
    pub(crate) fn emit(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        self.emit_with_hint(node, None)
    }

    /// Evaluates an expression; `hint` is the expected type, used to type
    /// empty list displays.
    pub(crate) fn emit_with_hint(
        &mut self,
        node: &SyntaxNode,
        hint: Option<&Ty>,
    ) -> Result<Sugared, CompileError> {
        match node.kind() {
            SyntaxKind::Literal => self.emit_literal(node),
            SyntaxKind::NameRef => {
                let (name, range) = cst::ident(node).ok_or_else(|| invalid(node))?;
                self.emitter.resolve_name(&name, range)
            }
            SyntaxKind::ParenExpr => {
                let inner = cst::exprs(node).next().ok_or_else(|| invalid(node))?;
                self.emit_with_hint(&inner, hint)
            }
            SyntaxKind::UnaryExpr => self.emit_unary(node),
            SyntaxKind::BinaryExpr => self.emit_binary(node),
            SyntaxKind::FieldExpr => self.emitter.attrs().emit_field(node),
            SyntaxKind::CallExpr => self.emitter.calls().emit_call(node),
            SyntaxKind::IndexExpr => self.emitter.calls().emit_index(node),
            SyntaxKind::ListExpr => self.emit_list(node, hint),
            _ => Err(invalid(node)),
        }
    }

    /// Evaluates an expression and forces the result into a runtime value.
    pub(crate) fn emit_value(
        &mut self,
        node: &SyntaxNode,
        hint: Option<&Ty>,
    ) -> Result<ValueId, CompileError> {
        let sugared = self.emit_with_hint(node, hint)?;
        self.emitter.materialize(sugared, node.text_range())
    }

    fn emit_literal(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let token = cst::first_token(node).ok_or_else(|| invalid(node))?;
        let out_of_range =
            || CompileError::unsupported("numeric literal out of range", token.text_range());
        let constant = match token.kind() {
            SyntaxKind::IntLiteral => Constant::Int(parse_int(token.text()).ok_or_else(out_of_range)?),
            SyntaxKind::FloatLiteral => {
                Constant::Float(parse_float(token.text()).ok_or_else(out_of_range)?)
            }
            SyntaxKind::StringLiteral => Constant::Str(unescape_string(token.text())),
            SyntaxKind::KwTrue => Constant::Bool(true),
            SyntaxKind::KwFalse => Constant::Bool(false),
            SyntaxKind::KwNone => Constant::None,
            _ => return Err(invalid(node)),
        };
        Ok(Sugared::Constant(constant))
    }

    fn emit_list(&mut self, node: &SyntaxNode, hint: Option<&Ty>) -> Result<Sugared, CompileError> {
        let hinted_elem = hint.and_then(Ty::list_elem).cloned();
        let mut items = Vec::new();
        let mut elem: Option<Ty> = hinted_elem.clone();

        for item in cst::exprs(node) {
            let value = self.emit_value(&item, hinted_elem.as_ref())?;
            let ty = self.emitter.builder.ty(value).clone();
            match &elem {
                Some(expected) if !expected.accepts(&ty) => {
                    return Err(CompileError::type_mismatch(
                        format!("list elements must have type '{expected}', found '{ty}'"),
                        item.text_range(),
                    ));
                }
                Some(_) => {}
                None => elem = Some(ty),
            }
            items.push(value);
        }

        let elem = elem.ok_or_else(|| {
            CompileError::type_mismatch(
                "cannot infer the element type of an empty list; add a type annotation",
                node.text_range(),
            )
        })?;
        let list = self
            .emitter
            .builder
            .emit(Op::ListConstruct, items, Ty::list(elem));
        Ok(Sugared::Value(list))
    }
}

fn invalid(node: &SyntaxNode) -> CompileError {
    CompileError::unsupported("unsupported expression", node.text_range())
}
