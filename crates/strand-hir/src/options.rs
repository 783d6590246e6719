//! Compile options and feature gates.
//!
//! Options are captured once when a compilation unit is created; nothing in
//! the compiler consults the process environment. Hosts that want
//! environment overrides resolve them before building [`CompileOptions`].

use smol_str::SmolStr;

/// Module name used when the host does not provide one.
pub const DEFAULT_MODULE: &str = "__main__";

/// Experimental language features that must be switched on explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureGate {
    /// Enables `enum` declarations. When off, every reference to an enum
    /// reports `Unknown type name`.
    pub enum_support: bool,
}

impl FeatureGate {
    /// All experimental features enabled.
    #[must_use]
    pub fn all() -> Self {
        Self { enum_support: true }
    }
}

/// Options for compiling a Strand script unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Module name used in qualified type names (`__strand__.<module>.Name`).
    pub module: SmolStr,
    /// Feature gates.
    pub features: FeatureGate,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            module: SmolStr::new(DEFAULT_MODULE),
            features: FeatureGate::default(),
        }
    }
}

impl CompileOptions {
    /// Returns options for `module` with default features.
    #[must_use]
    pub fn for_module(module: impl Into<SmolStr>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    /// Returns these options with enum support switched to `enabled`.
    #[must_use]
    pub fn with_enum_support(mut self, enabled: bool) -> Self {
        self.features.enum_support = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_enums() {
        let options = CompileOptions::default();
        assert_eq!(options.module, DEFAULT_MODULE);
        assert!(!options.features.enum_support);
    }

    #[test]
    fn test_builder() {
        let options = CompileOptions::for_module("test_enum").with_enum_support(true);
        assert_eq!(options.module, "test_enum");
        assert_eq!(options.features, FeatureGate::all());
    }
}
