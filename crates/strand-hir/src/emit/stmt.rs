use super::*;
use crate::ir::Node;

impl StmtEmitter<'_, '_> {
    /// Emits the statements of a block in the current scope. Returns `true`
    /// if the statements return on every path; anything after such a
    /// statement is unreachable and is not emitted.
    pub(crate) fn emit_statements(&mut self, block: &SyntaxNode) -> Result<bool, CompileError> {
        for statement in block.children().filter(|n| n.kind().is_stmt()) {
            if self.emit_statement(&statement)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Emits a block in a fresh lexical scope.
    fn emit_block(&mut self, block: &SyntaxNode) -> Result<bool, CompileError> {
        self.emitter.push_scope();
        let result = self.emit_statements(block);
        self.emitter.pop_scope();
        result
    }

    fn emit_statement(&mut self, node: &SyntaxNode) -> Result<bool, CompileError> {
        match node.kind() {
            SyntaxKind::LetStmt => self.emit_let(node).map(|()| false),
            SyntaxKind::AssignStmt => self.emit_assign(node).map(|()| false),
            SyntaxKind::ExprStmt => {
                if let Some(expr) = cst::exprs(node).next() {
                    self.emitter.expr().emit(&expr)?;
                }
                Ok(false)
            }
            SyntaxKind::ReturnStmt => self.emit_return(node).map(|()| true),
            SyntaxKind::IfStmt => self.emit_if(node),
            SyntaxKind::ForStmt => self.emit_for(node).map(|()| false),
            _ => Err(CompileError::unsupported(
                "unsupported statement",
                node.text_range(),
            )),
        }
    }

    fn emit_let(&mut self, node: &SyntaxNode) -> Result<(), CompileError> {
        let range = node.text_range();
        let (name, _) = cst::declared_name(node)
            .ok_or_else(|| CompileError::unsupported("malformed let statement", range))?;
        let annotation = cst::child(node, SyntaxKind::TypeRef)
            .map(|type_ref| self.emitter.unit.resolve_type_ref(&type_ref))
            .transpose()?;
        let expr = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed let statement", range))?;
        let sugared = self
            .emitter
            .expr()
            .emit_with_hint(&expr, annotation.as_ref())?;

        if let Some(annotation) = annotation {
            let value = self.emitter.materialize(sugared, expr.text_range())?;
            let ty = self.emitter.builder.ty(value).clone();
            if !annotation.accepts(&ty) {
                return Err(CompileError::type_mismatch(
                    format!(
                        "variable '{name}' is annotated as '{annotation}' but assigned a value of type '{ty}'"
                    ),
                    expr.text_range(),
                ));
            }
            self.emitter.bind_value(&name, value, annotation);
        } else if self.emitter.assigned.contains(&name) {
            let value = self.emitter.materialize(sugared, expr.text_range())?;
            let ty = self.emitter.builder.ty(value).clone();
            self.emitter.bind_value(&name, value, ty);
        } else {
            if let Sugared::Value(value) = &sugared {
                self.emitter.builder.set_hint(*value, &name);
            }
            self.emitter.bind(&name, Binding::Sugared(sugared));
        }
        Ok(())
    }

    fn emit_assign(&mut self, node: &SyntaxNode) -> Result<(), CompileError> {
        let range = node.text_range();
        let mut exprs = cst::exprs(node);
        let (Some(target), Some(expr)) = (exprs.next(), exprs.next()) else {
            return Err(CompileError::unsupported("malformed assignment", range));
        };
        if target.kind() != SyntaxKind::NameRef {
            return Err(CompileError::unsupported(
                "assignment target must be a variable name",
                target.text_range(),
            ));
        }
        let (name, name_range) = cst::ident(&target)
            .ok_or_else(|| CompileError::unsupported("malformed assignment", range))?;

        let Some(Binding::Slot(slot_ty)) = self.emitter.lookup(&name).cloned() else {
            return Err(CompileError::unsupported(
                format!("cannot assign to '{name}' before it is declared with 'let'"),
                name_range,
            ));
        };

        let value = self.emitter.expr().emit_value(&expr, Some(&slot_ty))?;
        let ty = self.emitter.builder.ty(value).clone();
        if !slot_ty.accepts(&ty) {
            return Err(CompileError::type_mismatch(
                format!(
                    "cannot assign a value of type '{ty}' to variable '{name}' of type '{slot_ty}'"
                ),
                expr.text_range(),
            ));
        }
        self.emitter
            .builder
            .emit_void(Op::Store(name), vec![value]);
        Ok(())
    }

    fn emit_return(&mut self, node: &SyntaxNode) -> Result<(), CompileError> {
        let range = node.text_range();
        let declared = self.emitter.declared_return.clone();
        let value = match cst::exprs(node).next() {
            Some(expr) => self.emitter.expr().emit_value(&expr, declared.as_ref())?,
            None => self.emitter.constant(Constant::None),
        };
        let ty = self.emitter.builder.ty(value).clone();

        match (&declared, &self.emitter.inferred_return) {
            (Some(declared), _) if !declared.accepts(&ty) => {
                return Err(CompileError::type_mismatch(
                    format!(
                        "return value of type '{ty}' does not match declared return type '{declared}'"
                    ),
                    range,
                ));
            }
            (Some(_), _) => {}
            (None, Some(previous)) if *previous != ty => {
                return Err(CompileError::type_mismatch(
                    format!(
                        "previous return statement returned a value of type '{previous}' but this return statement returns a value of type '{ty}'"
                    ),
                    range,
                ));
            }
            (None, Some(_)) => {}
            (None, None) => self.emitter.inferred_return = Some(ty),
        }

        self.emitter.builder.emit_void(Op::Return, vec![value]);
        Ok(())
    }

    fn emit_if(&mut self, node: &SyntaxNode) -> Result<bool, CompileError> {
        let range = node.text_range();
        let condition = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed if statement", range))?;
        let cond = self.emitter.expr().emit_value(&condition, None)?;
        let cond_ty = self.emitter.builder.ty(cond).clone();
        if !matches!(cond_ty, Ty::Bool | Ty::Any) {
            return Err(CompileError::type_mismatch(
                format!("if condition must be 'bool', found '{cond_ty}'"),
                condition.text_range(),
            ));
        }

        let then_node = cst::child(node, SyntaxKind::Block)
            .ok_or_else(|| CompileError::unsupported("malformed if statement", range))?;
        self.emitter.builder.push_block(Vec::new());
        let then_returns = self.emit_block(&then_node);
        let then_block = self.emitter.builder.pop_block();
        let then_returns = then_returns?;

        self.emitter.builder.push_block(Vec::new());
        let else_returns = match cst::child(node, SyntaxKind::ElseBranch) {
            Some(branch) => {
                if let Some(nested) = cst::child(&branch, SyntaxKind::IfStmt) {
                    self.emit_if(&nested)
                } else if let Some(block) = cst::child(&branch, SyntaxKind::Block) {
                    self.emit_block(&block)
                } else {
                    Ok(false)
                }
            }
            None => Ok(false),
        };
        let else_block = self.emitter.builder.pop_block();
        let else_returns = else_returns?;

        self.emitter.builder.append(Node {
            op: Op::If,
            inputs: vec![cond],
            outputs: Vec::new(),
            blocks: vec![then_block, else_block],
        });
        Ok(then_returns && else_returns)
    }

    fn emit_for(&mut self, node: &SyntaxNode) -> Result<(), CompileError> {
        let range = node.text_range();
        let (name, _) = cst::declared_name(node)
            .ok_or_else(|| CompileError::unsupported("malformed for statement", range))?;
        let iterable = cst::exprs(node)
            .next()
            .ok_or_else(|| CompileError::unsupported("malformed for statement", range))?;
        let body = cst::child(node, SyntaxKind::Block)
            .ok_or_else(|| CompileError::unsupported("malformed for statement", range))?;

        let (list, elem) = match self.emitter.expr().emit(&iterable)? {
            Sugared::EnumClass(ty) => {
                let items = (0..ty.members().len())
                    .map(|index| Constant::EnumMember {
                        ty: Arc::clone(&ty),
                        index,
                    })
                    .collect();
                let elem = Ty::Enum(Arc::clone(&ty));
                let list = self.emitter.constant(Constant::List {
                    elem: elem.clone(),
                    items,
                });
                (list, elem)
            }
            other => {
                let value = self.emitter.materialize(other, iterable.text_range())?;
                let ty = self.emitter.builder.ty(value).clone();
                let Some(elem) = ty.list_elem().cloned() else {
                    return Err(CompileError::type_mismatch(
                        format!("'{ty}' object is not iterable"),
                        iterable.text_range(),
                    ));
                };
                (value, elem)
            }
        };

        let item = self.emitter.builder.new_value(elem.clone(), Some(&name));
        self.emitter.builder.push_block(vec![item]);
        self.emitter.push_scope();
        self.emitter.bind_value(&name, item, elem);
        let result = self.emit_statements(&body);
        self.emitter.pop_scope();
        let block = self.emitter.builder.pop_block();
        result?;

        self.emitter.builder.append(Node {
            op: Op::Loop,
            inputs: vec![list],
            outputs: Vec::new(),
            blocks: vec![block],
        });
        Ok(())
    }
}
