//! Enum types.
//!
//! An [`EnumType`] is a closed, ordered set of named constants sharing one
//! backing value type. Types are compared nominally: two `EnumType`s are
//! equal exactly when their qualified names are equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use super::Ty;

/// A literal that can back an enum member.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Str(SmolStr),
}

impl Literal {
    /// Returns the backing type this literal belongs to.
    #[must_use]
    pub fn backing_type(&self) -> BackingType {
        match self {
            Self::Int(_) => BackingType::Int,
            Self::Float(_) => BackingType::Float,
            Self::Str(_) => BackingType::Str,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{:?}", value.as_str()),
        }
    }
}

/// The value type shared by all members of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackingType {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
}

impl BackingType {
    /// Returns the corresponding static type.
    #[must_use]
    pub fn ty(self) -> Ty {
        match self {
            Self::Int => Ty::Int,
            Self::Float => Ty::Float,
            Self::Str => Ty::Str,
        }
    }
}

/// A named member of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    name: SmolStr,
    value: Literal,
}

impl EnumMember {
    /// Creates a member.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, value: Literal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Backing value.
    #[must_use]
    pub fn value(&self) -> &Literal {
        &self.value
    }
}

/// A resolved enum type.
#[derive(Debug)]
pub struct EnumType {
    qualified_name: SmolStr,
    name: SmolStr,
    backing: BackingType,
    members: Vec<EnumMember>,
}

impl EnumType {
    pub(crate) fn new(
        qualified_name: SmolStr,
        name: SmolStr,
        backing: BackingType,
        members: Vec<EnumMember>,
    ) -> Self {
        Self {
            qualified_name,
            name,
            backing,
            members,
        }
    }

    /// Fully qualified name, e.g. `__strand__.test_enum.Color`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Declared name, e.g. `Color`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type shared by all member values.
    #[must_use]
    pub fn backing_type(&self) -> BackingType {
        self.backing
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member_named(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Position of the member called `name`.
    #[must_use]
    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.name == name)
    }

    /// Member at `index`.
    #[must_use]
    pub fn member(&self, index: usize) -> Option<&EnumMember> {
        self.members.get(index)
    }

    /// Printed type annotation, e.g. `Enum<__strand__.test_enum.Color>`.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!("Enum<{}>", self.qualified_name)
    }

    /// Returns `true` if this type was built from exactly these members.
    pub(crate) fn has_members(&self, backing: BackingType, members: &[EnumMember]) -> bool {
        self.backing == backing && self.members == members
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}
