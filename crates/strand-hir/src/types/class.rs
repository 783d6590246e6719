//! Module class types.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::Ty;

/// The type of a script module instance (`self` inside its methods).
#[derive(Debug)]
pub struct ClassType {
    qualified_name: SmolStr,
    name: SmolStr,
    attributes: IndexMap<SmolStr, Ty>,
}

impl ClassType {
    pub(crate) fn new(qualified_name: SmolStr, name: SmolStr, attributes: IndexMap<SmolStr, Ty>) -> Self {
        Self {
            qualified_name,
            name,
            attributes,
        }
    }

    /// Fully qualified name, e.g. `__strand__.__main__.TestModule`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of attribute `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Ty> {
        self.attributes.get(name)
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&SmolStr, &Ty)> {
        self.attributes.iter()
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}
