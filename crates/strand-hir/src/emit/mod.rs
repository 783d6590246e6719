//! Type checking and graph emission.
//!
//! The emitter walks a function body once, checking types and appending
//! graph nodes as it goes. Expressions first evaluate to a [`Sugared`]
//! value: enum classes, enum members, folded constants and builtins stay
//! symbolic until something needs a runtime value, at which point they are
//! materialized into `prim::Constant` nodes (or rejected). This is what lets
//! `Color.RED.value` fold to a constant and lets comparisons between
//! different enum types fold to `False` without emitting a runtime op.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use strand_syntax::syntax::{SyntaxKind, SyntaxNode};
use text_size::TextRange;
use tracing::debug;

use crate::cst;
use crate::diagnostics::CompileError;
use crate::ir::{Constant, Graph, GraphBuilder, Op, ValueId};
use crate::types::{ClassType, EnumType, Ty};
use crate::unit::CompilationUnit;

mod attrs;
mod calls;
mod expr;
mod ops;
mod stmt;

/// Builtin callables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    IsInstance,
    Tensor,
    Len,
}

impl Builtin {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "isinstance" => Self::IsInstance,
            "tensor" => Self::Tensor,
            "len" => Self::Len,
            _ => return None,
        })
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::IsInstance => "isinstance",
            Self::Tensor => "tensor",
            Self::Len => "len",
        }
    }
}

/// The result of evaluating an expression, before it is forced into a
/// runtime value.
#[derive(Debug, Clone)]
pub(crate) enum Sugared {
    /// A runtime value.
    Value(ValueId),
    /// A compile-time constant not yet emitted.
    Constant(Constant),
    /// An enum class, e.g. `Color`.
    EnumClass(Arc<EnumType>),
    /// An enum member known at compile time, e.g. `Color.RED`.
    EnumMember { ty: Arc<EnumType>, index: usize },
    /// A builtin function.
    Builtin(Builtin),
    /// A builtin type name usable in `isinstance`.
    TypeName(Ty),
    /// A bound list method, e.g. `res.append`.
    Method {
        receiver: ValueId,
        name: SmolStr,
        elem: Ty,
    },
}

/// What a local name is bound to.
#[derive(Debug, Clone)]
enum Binding {
    /// Never reassigned: the name stands for this value directly.
    Sugared(Sugared),
    /// Reassigned somewhere in the function: read and written through
    /// `prim::Load` / `prim::Store`.
    Slot(Ty),
}

/// Per-function emission state.
pub(crate) struct Emitter<'u> {
    unit: &'u CompilationUnit,
    root: SyntaxNode,
    builder: GraphBuilder,
    scopes: Vec<FxHashMap<SmolStr, Binding>>,
    assigned: FxHashSet<SmolStr>,
    declared_return: Option<Ty>,
    inferred_return: Option<Ty>,
    active_captures: Vec<SmolStr>,
}

pub(crate) struct ExprEmitter<'u, 'e> {
    emitter: &'e mut Emitter<'u>,
}

pub(crate) struct StmtEmitter<'u, 'e> {
    emitter: &'e mut Emitter<'u>,
}

pub(crate) struct AttrEmitter<'u, 'e> {
    emitter: &'e mut Emitter<'u>,
}

pub(crate) struct CallEmitter<'u, 'e> {
    emitter: &'e mut Emitter<'u>,
}

impl<'u> Emitter<'u> {
    pub(crate) fn expr(&mut self) -> ExprEmitter<'u, '_> {
        ExprEmitter { emitter: self }
    }

    pub(crate) fn stmt(&mut self) -> StmtEmitter<'u, '_> {
        StmtEmitter { emitter: self }
    }

    pub(crate) fn attrs(&mut self) -> AttrEmitter<'u, '_> {
        AttrEmitter { emitter: self }
    }

    pub(crate) fn calls(&mut self) -> CallEmitter<'u, '_> {
        CallEmitter { emitter: self }
    }

    /// Type checks `node` (a `FnDecl`) and emits its graph.
    ///
    /// `class` is the owning module for methods; an unannotated first
    /// parameter named `self` gets the module's class type.
    pub(crate) fn emit_function(
        unit: &'u CompilationUnit,
        node: &SyntaxNode,
        graph_name: &str,
        class: Option<Arc<ClassType>>,
    ) -> Result<Graph, CompileError> {
        let (name, name_range) = cst::declared_name(node).ok_or_else(|| {
            CompileError::unsupported("function declaration without a name", node.text_range())
        })?;

        let mut emitter = Emitter {
            unit,
            root: unit.root(),
            builder: GraphBuilder::new(graph_name),
            scopes: vec![FxHashMap::default()],
            assigned: assigned_names(node),
            declared_return: None,
            inferred_return: None,
            active_captures: Vec::new(),
        };

        if let Some(params) = cst::child(node, SyntaxKind::ParamList) {
            for (position, param) in cst::children(&params, SyntaxKind::Param).enumerate() {
                let Some((param_name, _)) = cst::declared_name(&param) else {
                    continue;
                };
                let ty = match (cst::child(&param, SyntaxKind::TypeRef), &class) {
                    (Some(type_ref), _) => unit.resolve_type_ref(&type_ref)?,
                    (None, Some(class)) if position == 0 && param_name == "self" => {
                        Ty::Class(Arc::clone(class))
                    }
                    (None, _) => Ty::Any,
                };
                let value = emitter.builder.add_param(&param_name, ty.clone());
                emitter.bind_value(&param_name, value, ty);
            }
        }

        emitter.declared_return = cst::child(node, SyntaxKind::RetType)
            .and_then(|ret| cst::child(&ret, SyntaxKind::TypeRef))
            .map(|type_ref| unit.resolve_type_ref(&type_ref))
            .transpose()?;

        let body = cst::child(node, SyntaxKind::Block).ok_or_else(|| {
            CompileError::unsupported(format!("function '{name}' has no body"), name_range)
        })?;
        let always_returns = emitter.stmt().emit_statements(&body)?;

        if !always_returns {
            let expected = emitter
                .declared_return
                .clone()
                .or_else(|| emitter.inferred_return.clone());
            if let Some(expected) = expected {
                if !expected.accepts(&Ty::None) {
                    return Err(CompileError::MissingReturn {
                        name,
                        range: Some(name_range),
                    });
                }
            }
            let none = emitter.constant(Constant::None);
            emitter.builder.emit_void(Op::Return, vec![none]);
            emitter.inferred_return.get_or_insert(Ty::None);
        }

        let return_type = emitter
            .declared_return
            .or(emitter.inferred_return)
            .unwrap_or(Ty::None);
        let graph = emitter.builder.finish(return_type);
        debug!(function = %graph.name(), nodes = graph.nodes().len(), "emitted graph");
        Ok(graph)
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn bind(&mut self, name: &str, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(SmolStr::new(name), binding);
        }
    }

    /// Binds a runtime value to `name`, going through a slot if the name is
    /// reassigned anywhere in the function.
    fn bind_value(&mut self, name: &str, value: ValueId, ty: Ty) {
        if self.assigned.contains(name) {
            self.builder
                .emit_void(Op::Store(SmolStr::new(name)), vec![value]);
            self.bind(name, Binding::Slot(ty));
        } else {
            self.builder.set_hint(value, name);
            self.bind(name, Binding::Sugared(Sugared::Value(value)));
        }
    }

    fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    // =========================================================================
    // Name resolution
    // =========================================================================

    /// Resolves a name used as a value: locals, then module-level captures,
    /// then enum declarations, then builtin types and functions.
    pub(crate) fn resolve_name(
        &mut self,
        name: &str,
        range: TextRange,
    ) -> Result<Sugared, CompileError> {
        if let Some(binding) = self.lookup(name).cloned() {
            return Ok(match binding {
                Binding::Sugared(sugared) => sugared,
                Binding::Slot(ty) => Sugared::Value(self.builder.emit_named(
                    Op::Load(SmolStr::new(name)),
                    Vec::new(),
                    ty,
                    Some(name),
                )),
            });
        }

        if self.unit.items().capture(name).is_some() {
            return self.emit_capture(name, range);
        }

        if self.unit.items().enum_decl(name).is_some() {
            return self
                .unit
                .resolve_enum(name, range)
                .map(Sugared::EnumClass);
        }

        if let Some(ty) = Ty::from_builtin_name(name) {
            return Ok(Sugared::TypeName(ty));
        }

        if let Some(builtin) = Builtin::from_name(name) {
            return Ok(Sugared::Builtin(builtin));
        }

        Err(CompileError::UndefinedValue {
            name: SmolStr::new(name),
            range: Some(range),
        })
    }

    /// Evaluates a module-level `let` in the current graph. Function locals
    /// are not visible to it.
    fn emit_capture(&mut self, name: &str, range: TextRange) -> Result<Sugared, CompileError> {
        let undefined = || CompileError::UndefinedValue {
            name: SmolStr::new(name),
            range: Some(range),
        };
        if self.active_captures.iter().any(|active| active == name) {
            return Err(undefined());
        }
        let node = self
            .unit
            .items()
            .capture(name)
            .map(|ptr| ptr.to_node(&self.root))
            .ok_or_else(undefined)?;
        let annotation = cst::child(&node, SyntaxKind::TypeRef)
            .map(|type_ref| self.unit.resolve_type_ref(&type_ref))
            .transpose()?;
        let expr = cst::exprs(&node).next().ok_or_else(undefined)?;

        let saved_scopes = std::mem::take(&mut self.scopes);
        self.active_captures.push(SmolStr::new(name));
        let result = self.expr().emit_with_hint(&expr, annotation.as_ref());
        self.active_captures.pop();
        self.scopes = saved_scopes;

        let sugared = result?;
        if let Some(annotation) = annotation {
            let ty = self.sugared_ty(&sugared);
            if !ty.as_ref().is_some_and(|ty| annotation.accepts(ty)) {
                return Err(CompileError::type_mismatch(
                    format!(
                        "variable '{name}' is annotated as '{annotation}' but assigned {}",
                        self.describe(&sugared)
                    ),
                    expr.text_range(),
                ));
            }
        }
        debug!(capture = name, "resolved module-level capture");
        Ok(sugared)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Static type of a sugared value, if it is a value at all.
    pub(crate) fn sugared_ty(&self, sugared: &Sugared) -> Option<Ty> {
        match sugared {
            Sugared::Value(value) => Some(self.builder.ty(*value).clone()),
            Sugared::Constant(constant) => Some(constant.ty()),
            Sugared::EnumMember { ty, .. } => Some(Ty::Enum(Arc::clone(ty))),
            Sugared::EnumClass(_)
            | Sugared::Builtin(_)
            | Sugared::TypeName(_)
            | Sugared::Method { .. } => None,
        }
    }

    /// Human-readable description for diagnostics.
    pub(crate) fn describe(&self, sugared: &Sugared) -> String {
        match sugared {
            Sugared::EnumClass(ty) => format!("enum class '{}'", ty.name()),
            Sugared::Builtin(builtin) => format!("builtin '{}'", builtin.name()),
            Sugared::TypeName(ty) => format!("type '{ty}'"),
            Sugared::Method { name, .. } => format!("method '{name}'"),
            other => match self.sugared_ty(other) {
                Some(ty) => format!("a value of type '{ty}'"),
                None => "a value".to_string(),
            },
        }
    }

    /// Emits a `prim::Constant`.
    pub(crate) fn constant(&mut self, constant: Constant) -> ValueId {
        let ty = constant.ty();
        self.builder.emit(Op::Constant(constant), Vec::new(), ty)
    }

    /// Forces a sugared value into a runtime value.
    pub(crate) fn materialize(
        &mut self,
        sugared: Sugared,
        range: TextRange,
    ) -> Result<ValueId, CompileError> {
        match sugared {
            Sugared::Value(value) => Ok(value),
            Sugared::Constant(constant) => Ok(self.constant(constant)),
            Sugared::EnumMember { ty, index } => Ok(self.constant(Constant::EnumMember { ty, index })),
            other => Err(CompileError::unsupported(
                format!("{} cannot be used as a value", self.describe(&other)),
                range,
            )),
        }
    }
}

/// Names that appear as the target of an assignment anywhere in `node`.
fn assigned_names(node: &SyntaxNode) -> FxHashSet<SmolStr> {
    node.descendants()
        .filter(|n| n.kind() == SyntaxKind::AssignStmt)
        .filter_map(|assign| cst::exprs(&assign).next())
        .filter(|target| target.kind() == SyntaxKind::NameRef)
        .filter_map(|target| cst::ident(&target).map(|(name, _)| name))
        .collect()
}
