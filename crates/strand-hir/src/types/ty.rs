//! The `Ty` enum and its printed form.

use std::fmt;
use std::sync::Arc;

use super::{ClassType, EnumType};

/// A static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// String.
    Str,
    /// Boolean.
    Bool,
    /// The type of `None`.
    None,
    /// Dynamically typed value.
    Any,
    /// Opaque tensor value.
    Tensor,
    /// Homogeneous mutable list.
    List(Box<Ty>),
    /// A user-declared enum, compared nominally by qualified name.
    Enum(Arc<EnumType>),
    /// A module class.
    Class(Arc<ClassType>),
}

impl Ty {
    /// Looks up a builtin type by its source spelling.
    #[must_use]
    pub fn from_builtin_name(name: &str) -> Option<Self> {
        Some(match name {
            "int" => Self::Int,
            "float" => Self::Float,
            "str" => Self::Str,
            "bool" => Self::Bool,
            "Any" => Self::Any,
            "Tensor" => Self::Tensor,
            _ => return None,
        })
    }

    /// Builds a list type.
    #[must_use]
    pub fn list(elem: Ty) -> Self {
        Self::List(Box::new(elem))
    }

    /// Returns `true` for `int` and `float`.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Returns the enum type if this is an enum.
    #[must_use]
    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self {
            Self::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns the element type if this is a list.
    #[must_use]
    pub fn list_elem(&self) -> Option<&Ty> {
        match self {
            Self::List(elem) => Some(elem),
            _ => None,
        }
    }

    /// Returns `true` if a value of type `value` may be stored where `self`
    /// is expected.
    #[must_use]
    pub fn accepts(&self, value: &Ty) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::List(expected), Self::List(actual)) => {
                expected.as_ref() == actual.as_ref() || **expected == Ty::Any
            }
            (expected, actual) => expected == actual,
        }
    }

    /// Name used when this type appears in messages as an object owner,
    /// e.g. `'Color' object has no attribute 'x'`.
    #[must_use]
    pub fn owner_name(&self) -> String {
        match self {
            Self::Enum(ty) => ty.name().to_string(),
            Self::Class(class) => class.name().to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Bool => f.write_str("bool"),
            Self::None => f.write_str("NoneType"),
            Self::Any => f.write_str("Any"),
            Self::Tensor => f.write_str("Tensor"),
            Self::List(elem) => write!(f, "{elem}[]"),
            Self::Enum(ty) => f.write_str(&ty.annotation()),
            Self::Class(class) => f.write_str(class.qualified_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(Ty::from_builtin_name("int"), Some(Ty::Int));
        assert_eq!(Ty::from_builtin_name("Tensor"), Some(Ty::Tensor));
        assert_eq!(Ty::from_builtin_name("List"), None);
        assert_eq!(Ty::from_builtin_name("Color"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ty::list(Ty::Int).to_string(), "int[]");
        assert_eq!(Ty::list(Ty::list(Ty::Str)).to_string(), "str[][]");
        assert_eq!(Ty::None.to_string(), "NoneType");
    }

    #[test]
    fn test_accepts() {
        assert!(Ty::Any.accepts(&Ty::Int));
        assert!(!Ty::Int.accepts(&Ty::Float));
        assert!(Ty::list(Ty::Any).accepts(&Ty::list(Ty::Int)));
        assert!(!Ty::list(Ty::Int).accepts(&Ty::list(Ty::Str)));
    }
}
