use super::*;

impl AttrEmitter<'_, '_> {
    /// Emits `base.name`.
    ///
    /// - `Color.RED` is a compile-time member, or an unknown attribute.
    /// - `.name` / `.value` on a compile-time member fold to constants.
    /// - `.name` / `.value` on a runtime enum emit `prim::EnumName` /
    ///   `prim::EnumValue`.
    /// - Module attributes emit `prim::GetAttr`.
    pub(crate) fn emit_field(&mut self, node: &SyntaxNode) -> Result<Sugared, CompileError> {
        let range = node.text_range();
        let base = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed attribute access", range))?;
        let (name, _) = cst::declared_name(node)
            .ok_or_else(|| CompileError::unsupported("malformed attribute access", range))?;

        let base = self.emitter.expr().emit(&base)?;
        let unknown = |owner: String| CompileError::UnknownAttribute {
            owner: SmolStr::new(owner),
            name: name.clone(),
            range: Some(range),
        };

        match base {
            Sugared::EnumClass(ty) => match ty.member_index(&name) {
                Some(index) => Ok(Sugared::EnumMember { ty, index }),
                None => Err(unknown(ty.name().to_string())),
            },
            Sugared::EnumMember { ty, index } => {
                let member = ty
                    .member(index)
                    .ok_or_else(|| unknown(ty.name().to_string()))?;
                match name.as_str() {
                    "name" => Ok(Sugared::Constant(Constant::Str(member.name().clone()))),
                    "value" => Ok(Sugared::Constant(Constant::from(member.value()))),
                    _ => Err(unknown(ty.name().to_string())),
                }
            }
            Sugared::Constant(constant) => Err(unknown(constant.ty().owner_name())),
            Sugared::Value(value) => self.emit_value_field(value, &name, range),
            other => Err(unknown(self.emitter.describe(&other))),
        }
    }

    fn emit_value_field(
        &mut self,
        value: ValueId,
        name: &SmolStr,
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        let ty = self.emitter.builder.ty(value).clone();
        let unknown = || CompileError::UnknownAttribute {
            owner: SmolStr::new(ty.owner_name()),
            name: name.clone(),
            range: Some(range),
        };

        let builder = &mut self.emitter.builder;
        match &ty {
            Ty::Enum(enum_ty) => match name.as_str() {
                "name" => Ok(Sugared::Value(builder.emit(Op::EnumName, vec![value], Ty::Str))),
                "value" => Ok(Sugared::Value(builder.emit(
                    Op::EnumValue,
                    vec![value],
                    enum_ty.backing_type().ty(),
                ))),
                _ => Err(unknown()),
            },
            Ty::Class(class) => match class.attribute(name) {
                Some(attr_ty) => Ok(Sugared::Value(builder.emit(
                    Op::GetAttr(name.clone()),
                    vec![value],
                    attr_ty.clone(),
                ))),
                None => Err(unknown()),
            },
            Ty::List(elem) if name == "append" => Ok(Sugared::Method {
                receiver: value,
                name: name.clone(),
                elem: elem.as_ref().clone(),
            }),
            _ => Err(unknown()),
        }
    }
}
