//! Enum definitions lowered from source.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use strand_syntax::syntax::{SyntaxKind, SyntaxNode};
use text_size::TextRange;

use crate::cst;
use crate::diagnostics::CompileError;
use crate::literals::{parse_float, parse_int, unescape_string};
use crate::types::{BackingType, EnumMember, Literal, Ty};

use super::qualified_name;

/// The value written for an enum member.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    /// A literal that may back an enum.
    Literal(Literal),
    /// Any other value; only its type is known.
    Typed(Ty),
}

impl MemberValue {
    /// Static type of the value.
    #[must_use]
    pub fn ty(&self) -> Ty {
        match self {
            Self::Literal(literal) => literal.backing_type().ty(),
            Self::Typed(ty) => ty.clone(),
        }
    }
}

/// One `NAME = value` entry of an enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDefinition {
    /// Member name.
    pub name: SmolStr,
    /// Member value.
    pub value: MemberValue,
    /// Range of the member name.
    pub name_range: Option<TextRange>,
    /// Range of the value expression.
    pub value_range: Option<TextRange>,
}

/// An unvalidated enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    /// Declared name.
    pub name: SmolStr,
    /// Module the declaration belongs to.
    pub module: SmolStr,
    /// Members in declaration order.
    pub members: Vec<MemberDefinition>,
    /// Range of the declared name.
    pub name_range: Option<TextRange>,
}

impl EnumDefinition {
    /// Starts a definition with no members.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, module: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            members: Vec::new(),
            name_range: None,
        }
    }

    /// Appends a member with a literal value.
    #[must_use]
    pub fn member(self, name: impl Into<SmolStr>, value: Literal) -> Self {
        self.member_value(name, MemberValue::Literal(value))
    }

    /// Appends a member with an arbitrary value.
    #[must_use]
    pub fn member_value(mut self, name: impl Into<SmolStr>, value: MemberValue) -> Self {
        self.members.push(MemberDefinition {
            name: name.into(),
            value,
            name_range: None,
            value_range: None,
        });
        self
    }

    /// Qualified name this definition registers under.
    #[must_use]
    pub fn qualified_name(&self) -> SmolStr {
        qualified_name(&self.module, &self.name)
    }

    /// Lowers an `EnumDecl` node.
    pub fn from_syntax(node: &SyntaxNode, module: &str) -> Result<Self, CompileError> {
        let (name, name_range) = cst::declared_name(node).ok_or_else(|| {
            CompileError::unsupported("enum declaration without a name", node.text_range())
        })?;

        let mut members = Vec::new();
        for member in cst::children(node, SyntaxKind::EnumMember) {
            let Some((member_name, member_range)) = cst::declared_name(&member) else {
                continue;
            };
            let value_node = cst::exprs(&member).next().ok_or_else(|| {
                CompileError::unsupported(
                    format!("enum member '{member_name}' has no value"),
                    member.text_range(),
                )
            })?;
            members.push(MemberDefinition {
                name: member_name,
                value: member_value(&value_node)?,
                name_range: Some(member_range),
                value_range: Some(value_node.text_range()),
            });
        }

        Ok(Self {
            name,
            module: SmolStr::new(module),
            members,
            name_range: Some(name_range),
        })
    }

    /// Checks the definition and produces its members and backing type.
    ///
    /// Checks run in order: non-empty, unique names, one value type for all
    /// members, then that type must be `int`, `float` or `str`.
    pub(crate) fn validate(&self) -> Result<(BackingType, Vec<EnumMember>), CompileError> {
        let Some(first) = self.members.first() else {
            return Err(CompileError::EmptyEnum {
                name: self.name.clone(),
                range: self.name_range,
            });
        };

        let mut seen = FxHashSet::default();
        for member in &self.members {
            if !seen.insert(member.name.clone()) {
                return Err(CompileError::DuplicateEnumMember {
                    key: member.name.clone(),
                    range: member.name_range,
                });
            }
        }

        let unified = first.value.ty();
        if self.members.iter().any(|member| member.value.ty() != unified) {
            return Err(CompileError::HeterogeneousEnumValueType {
                range: self.name_range,
            });
        }

        let MemberValue::Literal(first_literal) = &first.value else {
            return Err(CompileError::UnsupportedEnumValueType {
                ty: SmolStr::new(unified.to_string()),
                range: first.value_range,
            });
        };
        let backing = first_literal.backing_type();

        let members = self
            .members
            .iter()
            .filter_map(|member| match &member.value {
                MemberValue::Literal(literal) => {
                    Some(EnumMember::new(member.name.clone(), literal.clone()))
                }
                MemberValue::Typed(_) => None,
            })
            .collect();

        Ok((backing, members))
    }
}

fn member_value(node: &SyntaxNode) -> Result<MemberValue, CompileError> {
    match node.kind() {
        SyntaxKind::Literal => literal_value(node),
        SyntaxKind::ParenExpr => match cst::exprs(node).next() {
            Some(inner) => member_value(&inner),
            None => Err(non_literal(node)),
        },
        SyntaxKind::UnaryExpr if cst::token(node, SyntaxKind::Minus).is_some() => {
            let operand = cst::exprs(node).next().ok_or_else(|| non_literal(node))?;
            match member_value(&operand)? {
                MemberValue::Literal(Literal::Int(value)) => value
                    .checked_neg()
                    .map(|value| MemberValue::Literal(Literal::Int(value)))
                    .ok_or_else(|| {
                        CompileError::unsupported("integer literal out of range", node.text_range())
                    }),
                MemberValue::Literal(Literal::Float(value)) => {
                    Ok(MemberValue::Literal(Literal::Float(-value)))
                }
                _ => Err(non_literal(node)),
            }
        }
        SyntaxKind::CallExpr => {
            let callee = cst::exprs(node).next();
            let is_tensor = callee
                .filter(|callee| callee.kind() == SyntaxKind::NameRef)
                .and_then(|callee| cst::ident(&callee))
                .is_some_and(|(name, _)| name == "tensor");
            if is_tensor {
                Ok(MemberValue::Typed(Ty::Tensor))
            } else {
                Err(non_literal(node))
            }
        }
        _ => Err(non_literal(node)),
    }
}

fn literal_value(node: &SyntaxNode) -> Result<MemberValue, CompileError> {
    let token = cst::first_token(node).ok_or_else(|| non_literal(node))?;
    let range = token.text_range();
    let out_of_range = || CompileError::unsupported("numeric literal out of range", range);
    Ok(match token.kind() {
        SyntaxKind::IntLiteral => {
            MemberValue::Literal(Literal::Int(parse_int(token.text()).ok_or_else(out_of_range)?))
        }
        SyntaxKind::FloatLiteral => MemberValue::Literal(Literal::Float(
            parse_float(token.text()).ok_or_else(out_of_range)?,
        )),
        SyntaxKind::StringLiteral => {
            MemberValue::Literal(Literal::Str(unescape_string(token.text())))
        }
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => MemberValue::Typed(Ty::Bool),
        SyntaxKind::KwNone => MemberValue::Typed(Ty::None),
        _ => return Err(non_literal(node)),
    })
}

fn non_literal(node: &SyntaxNode) -> CompileError {
    CompileError::unsupported("enum member values must be literals", node.text_range())
}
