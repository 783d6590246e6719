use super::*;
use crate::ir::AtenOp;

impl CallEmitter<'_, '_> {
    /// Emits a call: builtins, list methods. Enum classes and script
    /// functions are not callable.
    pub(crate) fn emit_call(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let range = node.text_range();
        let callee = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed call", range))?;
        let args: Vec<SyntaxNode> = cst::child(node, SyntaxKind::ArgList)
            .map(|list| cst::exprs(&list).collect())
            .unwrap_or_default();

        let callee_sugared = if callee.kind() == SyntaxKind::NameRef {
            let (name, name_range) = cst::ident(&callee)
                .ok_or_else(|| CompileError::unsupported("malformed call", range))?;
            self.resolve_callee(&name, name_range)?
        } else {
            self.emitter.expr().emit(&callee)?
        };

        match callee_sugared {
            Sugared::Builtin(Builtin::IsInstance) => self.emit_isinstance(&args, range),
            Sugared::Builtin(builtin @ (Builtin::Tensor | Builtin::Len)) => {
                let [arg] = args.as_slice() else {
                    return Err(arity(builtin.name(), 1, args.len(), range));
                };
                let value = self.emitter.expr().emit_value(arg, None)?;
                let ty = self.emitter.builder.ty(value).clone();
                let (aten, result) = match builtin {
                    Builtin::Tensor if ty.is_numeric() || ty == Ty::Bool => (AtenOp::Tensor, Ty::Tensor),
                    Builtin::Len if ty.list_elem().is_some() || ty == Ty::Str => (AtenOp::Len, Ty::Int),
                    _ => {
                        return Err(CompileError::type_mismatch(
                            format!("{}() does not accept an argument of type '{ty}'", builtin.name()),
                            arg.text_range(),
                        ))
                    }
                };
                Ok(Sugared::Value(self.emitter.builder.emit(
                    Op::Aten(aten),
                    vec![value],
                    result,
                )))
            }
            Sugared::Method {
                receiver,
                name,
                elem,
            } => {
                let [arg] = args.as_slice() else {
                    return Err(arity(&name, 1, args.len(), range));
                };
                let value = self.emitter.expr().emit_value(arg, Some(&elem))?;
                let ty = self.emitter.builder.ty(value).clone();
                if !elem.accepts(&ty) {
                    return Err(CompileError::type_mismatch(
                        format!("cannot append a value of type '{ty}' to a list of '{elem}'"),
                        arg.text_range(),
                    ));
                }
                self.emitter
                    .builder
                    .emit_void(Op::Aten(AtenOp::Append), vec![receiver, value]);
                Ok(Sugared::Constant(Constant::None))
            }
            Sugared::EnumClass(ty) => Err(CompileError::unsupported(
                format!("enum '{}' cannot be called", ty.name()),
                range,
            )),
            other => Err(CompileError::type_mismatch(
                format!("{} is not callable", self.emitter.describe(&other)),
                callee.text_range(),
            )),
        }
    }

    fn resolve_callee(&mut self, name: &str, range: TextRange) -> Result<Sugared, CompileError> {
        match self.emitter.resolve_name(name, range) {
            Err(CompileError::UndefinedValue { .. }) => {
                if self.emitter.unit.items().function(name).is_some() {
                    Err(CompileError::unsupported(
                        format!("calls to script function '{name}' are not supported"),
                        range,
                    ))
                } else {
                    Err(CompileError::UnknownFunction {
                        name: SmolStr::new(name),
                        range: Some(range),
                    })
                }
            }
            other => other,
        }
    }

    /// `isinstance(x, T)` is always checked at runtime, even when `x` is a
    /// compile-time enum member.
    fn emit_isinstance(
        &mut self,
        args: &[SyntaxNode],
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        let [value, class] = args else {
            return Err(arity("isinstance", 2, args.len(), range));
        };
        let value = self.emitter.expr().emit_value(value, None)?;
        let ty = match self.emitter.expr().emit(class)? {
            Sugared::EnumClass(ty) => Ty::Enum(ty),
            Sugared::TypeName(ty) if matches!(ty, Ty::Int | Ty::Float | Ty::Str | Ty::Bool) => ty,
            other => {
                return Err(CompileError::type_mismatch(
                    format!(
                        "isinstance() arg 2 must be a type, not {}",
                        self.emitter.describe(&other)
                    ),
                    class.text_range(),
                ))
            }
        };
        Ok(Sugared::Value(self.emitter.builder.emit(
            Op::IsInstance(vec![ty]),
            vec![value],
            Ty::Bool,
        )))
    }

    /// Emits `list[index]`.
    pub(crate) fn emit_index(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let range = node.text_range();
        let mut operands = cst::exprs(node);
        let (Some(base), Some(index)) = (operands.next(), operands.next()) else {
            return Err(CompileError::unsupported("malformed index expression", range));
        };
        let base = self.emitter.expr().emit_value(&base, None)?;
        let index = self.emitter.expr().emit_value(&index, None)?;
        let base_ty = self.emitter.builder.ty(base).clone();
        let index_ty = self.emitter.builder.ty(index).clone();

        let Some(elem) = base_ty.list_elem().cloned() else {
            return Err(CompileError::type_mismatch(
                format!("'{base_ty}' object is not subscriptable"),
                range,
            ));
        };
        if !matches!(index_ty, Ty::Int | Ty::Any) {
            return Err(CompileError::type_mismatch(
                format!("list indices must be integers, not '{index_ty}'"),
                range,
            ));
        }
        Ok(Sugared::Value(self.emitter.builder.emit(
            Op::Aten(AtenOp::GetItem),
            vec![base, index],
            elem,
        )))
    }
}

fn arity(name: &str, expected: usize, found: usize, range: TextRange) -> CompileError {
    CompileError::type_mismatch(
        format!("{name}() expects {expected} argument(s), got {found}"),
        range,
    )
}
