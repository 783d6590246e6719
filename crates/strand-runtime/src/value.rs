//! Runtime values.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use smol_str::SmolStr;
use strand_hir::{ClassType, Constant, EnumMember, EnumType, Literal, Ty};

use crate::error::RuntimeError;

/// An instance of an enum: its type and the position of the member.
#[derive(Debug, Clone)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    index: usize,
}

impl EnumValue {
    /// Looks up the member `name` of `ty`.
    pub fn new(ty: Arc<EnumType>, name: &str) -> Result<Self, RuntimeError> {
        let index = ty
            .member_index(name)
            .ok_or_else(|| RuntimeError::UnknownEnumMember {
                ty: SmolStr::new(ty.name()),
                member: SmolStr::new(name),
            })?;
        Ok(Self { ty, index })
    }

    pub(crate) fn from_index(ty: Arc<EnumType>, index: usize) -> Self {
        Self { ty, index }
    }

    /// The enum type.
    #[must_use]
    pub fn ty(&self) -> &Arc<EnumType> {
        &self.ty
    }

    /// Position of the member in declaration order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    fn member(&self) -> Option<&EnumMember> {
        self.ty.member(self.index)
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.member().map_or("", |member| member.name().as_str())
    }

    /// Backing value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.member()
            .map_or(Value::None, |member| Value::from(member.value()))
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.index == other.index
    }
}

/// An instance of a module class.
#[derive(Debug)]
pub struct Object {
    class: Arc<ClassType>,
    attributes: IndexMap<SmolStr, Value>,
}

impl Object {
    /// Class of the object.
    #[must_use]
    pub fn class(&self) -> &Arc<ClassType> {
        &self.class
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attributes in class declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&SmolStr, &Value)> {
        self.attributes.iter()
    }
}

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// `None`.
    None,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(SmolStr),
    /// Mutable list, shared by reference.
    List(Arc<Mutex<Vec<Value>>>),
    /// Enum member.
    Enum(EnumValue),
    /// Scalar tensor.
    Tensor(f64),
    /// Module instance.
    Object(Arc<Object>),
}

impl Value {
    /// Builds a list value.
    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(Arc::new(Mutex::new(items)))
    }

    /// Builds a module instance, checking `attributes` against the class.
    pub fn object(
        class: Arc<ClassType>,
        mut attributes: IndexMap<SmolStr, Value>,
    ) -> Result<Self, RuntimeError> {
        if let Some(extra) = attributes
            .keys()
            .find(|name| class.attribute(name).is_none())
        {
            return Err(RuntimeError::UnexpectedAttribute(extra.clone()));
        }

        let mut ordered = IndexMap::new();
        for (name, ty) in class.attributes() {
            let value = attributes
                .shift_remove(name)
                .ok_or_else(|| RuntimeError::MissingAttribute(name.clone()))?;
            if !value.conforms_to(ty) {
                return Err(RuntimeError::TypeMismatch(SmolStr::new(format!(
                    "attribute '{name}': expected '{ty}', got '{}'",
                    value.type_name()
                ))));
            }
            ordered.insert(name.clone(), value);
        }

        Ok(Self::Object(Arc::new(Object {
            class,
            attributes: ordered,
        })))
    }

    /// Converts a graph constant.
    #[must_use]
    pub fn from_constant(constant: &Constant) -> Self {
        match constant {
            Constant::None => Self::None,
            Constant::Bool(value) => Self::Bool(*value),
            Constant::Int(value) => Self::Int(*value),
            Constant::Float(value) => Self::Float(*value),
            Constant::Str(value) => Self::Str(value.clone()),
            Constant::EnumMember { ty, index } => {
                Self::Enum(EnumValue::from_index(Arc::clone(ty), *index))
            }
            Constant::List { items, .. } => {
                Self::list(items.iter().map(Self::from_constant).collect())
            }
        }
    }

    /// Returns `true` if this value may be passed where `ty` is expected.
    #[must_use]
    pub fn conforms_to(&self, ty: &Ty) -> bool {
        match (self, ty) {
            (_, Ty::Any) => true,
            (Self::None, Ty::None)
            | (Self::Bool(_), Ty::Bool)
            | (Self::Int(_), Ty::Int)
            | (Self::Float(_), Ty::Float)
            | (Self::Str(_), Ty::Str)
            | (Self::Tensor(_), Ty::Tensor) => true,
            (Self::List(items), Ty::List(elem)) => {
                items.lock().iter().all(|item| item.conforms_to(elem))
            }
            (Self::Enum(value), Ty::Enum(expected)) => value.ty == *expected,
            (Self::Object(object), Ty::Class(expected)) => object.class == *expected,
            _ => false,
        }
    }

    /// Name of the value's runtime type, for messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::None => "NoneType".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Int(_) => "int".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Str(_) => "str".to_string(),
            Self::List(_) => "list".to_string(),
            Self::Enum(value) => value.ty.annotation(),
            Self::Tensor(_) => "Tensor".to_string(),
            Self::Object(object) => object.class.qualified_name().to_string(),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(value) => Self::Int(*value),
            Literal::Float(value) => Self::Float(*value),
            Literal::Str(value) => Self::Str(value.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(SmolStr::new(value))
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) | (Self::Tensor(a), Self::Tensor(b)) => a == b,
            #[allow(clippy::cast_precision_loss)]
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => (*a as f64) == *b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                Arc::ptr_eq(a, b) || *a.lock() == *b.lock()
            }
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{:?}", value.as_str()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.lock().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Enum(value) => write!(f, "{}.{}", value.ty.name(), value.name()),
            Self::Tensor(value) => write!(f, "tensor({value:?})"),
            Self::Object(object) => write!(f, "<{} object>", object.class.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_float_equality() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::Str("2".into()));
    }

    #[test]
    fn test_list_display_and_equality() {
        let a = Value::list(vec![Value::Int(1), Value::Str("x".into())]);
        let b = Value::list(vec![Value::Int(1), Value::Str("x".into())]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), r#"[1, "x"]"#);
    }

    #[test]
    fn test_list_conformance_checks_elements() {
        let ints = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert!(ints.conforms_to(&Ty::list(Ty::Int)));
        assert!(!ints.conforms_to(&Ty::list(Ty::Str)));
        assert!(ints.conforms_to(&Ty::Any));
        assert!(!Value::Bool(true).conforms_to(&Ty::Int));
    }
}
