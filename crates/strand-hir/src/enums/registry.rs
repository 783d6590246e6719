//! Process-wide enum type registry.
//!
//! The registry maps qualified names to resolved [`EnumType`]s. Resolving
//! the same definition twice returns the same `Arc`. Resolving a different
//! definition under a name that is already taken registers it under a
//! mangled name instead, so a redefinition never aliases a stale type.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::diagnostics::CompileError;
use crate::types::EnumType;

use super::EnumDefinition;

/// Prefix of every qualified script type name.
const NAMESPACE: &str = "__strand__";

static GLOBAL: Lazy<Arc<EnumRegistry>> = Lazy::new(|| Arc::new(EnumRegistry::new()));

/// Returns the qualified name for `name` declared in `module`.
#[must_use]
pub fn qualified_name(module: &str, name: &str) -> SmolStr {
    SmolStr::new(format!("{NAMESPACE}.{module}.{name}"))
}

fn mangled_name(module: &str, name: &str, index: usize) -> SmolStr {
    SmolStr::new(format!(
        "{NAMESPACE}.___strand_mangle_{index}.{module}.{name}"
    ))
}

/// A table of resolved enum types keyed by qualified name.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    types: RwLock<FxHashMap<SmolStr, Arc<EnumType>>>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Arc<EnumRegistry> {
        &GLOBAL
    }

    /// Validates `definition` and returns its shared type.
    pub fn resolve(&self, definition: &EnumDefinition) -> Result<Arc<EnumType>, CompileError> {
        let (backing, members) = definition.validate()?;
        let qualified = definition.qualified_name();

        if let Some(existing) = self.types.read().get(&qualified) {
            if existing.has_members(backing, &members) {
                return Ok(Arc::clone(existing));
            }
        }

        let types = self.types.upgradable_read();
        let mut candidate = qualified.clone();
        let mut index = 0;
        while let Some(existing) = types.get(&candidate) {
            if existing.has_members(backing, &members) {
                return Ok(Arc::clone(existing));
            }
            candidate = mangled_name(&definition.module, &definition.name, index);
            index += 1;
        }

        if candidate != qualified {
            debug!(
                original = %qualified,
                mangled = %candidate,
                "enum redefined with different members; mangling"
            );
        }

        let ty = Arc::new(EnumType::new(
            candidate.clone(),
            definition.name.clone(),
            backing,
            members,
        ));
        let mut types = RwLockUpgradableReadGuard::upgrade(types);
        types.insert(candidate.clone(), Arc::clone(&ty));
        debug!(name = %candidate, members = ty.members().len(), "registered enum type");

        Ok(ty)
    }

    /// Looks up a type by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<Arc<EnumType>> {
        self.types.read().get(qualified_name).cloned()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Literal;

    fn color(module: &str) -> EnumDefinition {
        EnumDefinition::new("Color", module)
            .member("RED", Literal::Int(1))
            .member("GREEN", Literal::Int(2))
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let registry = EnumRegistry::new();
        let a = registry.resolve(&color("m")).unwrap();
        let b = registry.resolve(&color("m")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_redefinition_is_mangled() {
        let registry = EnumRegistry::new();
        let first = registry.resolve(&color("m")).unwrap();
        let changed = EnumDefinition::new("Color", "m").member("RED", Literal::Int(10));
        let second = registry.resolve(&changed).unwrap();

        assert_eq!(first.qualified_name(), "__strand__.m.Color");
        assert_eq!(
            second.qualified_name(),
            "__strand__.___strand_mangle_0.m.Color"
        );
        assert_ne!(*first, *second);

        let again = registry.resolve(&changed).unwrap();
        assert!(Arc::ptr_eq(&second, &again));
    }

    #[test]
    fn test_invalid_definition_is_not_registered() {
        let registry = EnumRegistry::new();
        let empty = EnumDefinition::new("Empty", "m");
        assert!(registry.resolve(&empty).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_modules_do_not_collide() {
        let registry = EnumRegistry::new();
        let a = registry.resolve(&color("a")).unwrap();
        let b = registry.resolve(&color("b")).unwrap();
        assert_ne!(*a, *b);
        assert_eq!(registry.get("__strand__.b.Color").as_deref(), Some(&*b));
    }
}
