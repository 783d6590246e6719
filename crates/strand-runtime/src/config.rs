//! Compiler configuration loading.

#![allow(missing_docs)]

use std::path::Path;

use serde::Deserialize;
use smol_str::SmolStr;
use strand_hir::{CompileOptions, DEFAULT_MODULE};
use tracing::debug;

use crate::error::RuntimeError;

pub const ENUM_SUPPORT_ENV: &str = "STRAND_EXPERIMENTAL_ENUM_SUPPORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandConfig {
    pub module: SmolStr,
    pub experimental_enum_support: bool,
}

impl Default for StrandConfig {
    fn default() -> Self {
        Self {
            module: SmolStr::new(DEFAULT_MODULE),
            experimental_enum_support: false,
        }
    }
}

impl StrandConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            RuntimeError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        Self::parse(&text).map_err(|err| match err {
            RuntimeError::InvalidConfig(message) => {
                RuntimeError::InvalidConfig(format!("{}: {message}", path.display()).into())
            }
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self, RuntimeError> {
        let raw: StrandToml = toml::from_str(text)
            .map_err(|err| RuntimeError::InvalidConfig(err.to_string().into()))?;
        raw.into_config()
    }

    /// Applies `STRAND_EXPERIMENTAL_ENUM_SUPPORT` from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_env_value(std::env::var(ENUM_SUPPORT_ENV).ok().as_deref())
    }

    /// Applies an enum-support override value; see [`env_flag_enabled`].
    #[must_use]
    pub fn with_env_value(mut self, value: Option<&str>) -> Self {
        if value.is_some_and(env_flag_enabled) {
            debug!(var = ENUM_SUPPORT_ENV, "enum support enabled from environment");
            self.experimental_enum_support = true;
        }
        self
    }

    #[must_use]
    pub fn to_options(&self) -> CompileOptions {
        CompileOptions::for_module(self.module.clone())
            .with_enum_support(self.experimental_enum_support)
    }
}

/// `1`, `true`, `yes` and `on` enable a flag; anything else leaves it alone.
#[must_use]
pub fn env_flag_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StrandToml {
    compiler: Option<CompilerSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompilerSection {
    module: Option<String>,
    experimental_enum_support: Option<bool>,
}

impl StrandToml {
    fn into_config(self) -> Result<StrandConfig, RuntimeError> {
        let mut config = StrandConfig::default();
        let Some(compiler) = self.compiler else {
            return Ok(config);
        };
        if let Some(module) = compiler.module {
            let module = module.trim();
            if module.is_empty() || module.contains(char::is_whitespace) {
                return Err(RuntimeError::InvalidConfig(
                    format!("invalid compiler.module '{module}'").into(),
                ));
            }
            config.module = SmolStr::new(module);
        }
        if let Some(enabled) = compiler.experimental_enum_support {
            config.experimental_enum_support = enabled;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(StrandConfig::parse("").unwrap(), StrandConfig::default());
    }

    #[test]
    fn test_compiler_section() {
        let config = StrandConfig::parse(
            "[compiler]\nmodule = \"scripts\"\nexperimental_enum_support = true\n",
        )
        .unwrap();
        assert_eq!(config.module, "scripts");
        assert!(config.experimental_enum_support);
        assert_eq!(
            config.to_options(),
            CompileOptions::for_module("scripts").with_enum_support(true)
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = StrandConfig::parse("[compiler]\nenums = true\n").unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    }

    #[test]
    fn test_blank_module_is_rejected() {
        let err = StrandConfig::parse("[compiler]\nmodule = \" \"\n").unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_value_overrides_file() {
        let file = StrandConfig::parse("[compiler]\nexperimental_enum_support = false\n").unwrap();
        assert!(file.clone().with_env_value(Some("TRUE")).experimental_enum_support);
        assert!(file.clone().with_env_value(Some(" on ")).experimental_enum_support);
        assert!(!file.clone().with_env_value(Some("0")).experimental_enum_support);
        assert!(!file.with_env_value(None).experimental_enum_support);
    }

    #[test]
    fn test_unrecognized_env_value_keeps_file_setting() {
        let file = StrandConfig::parse("[compiler]\nexperimental_enum_support = true\n").unwrap();
        assert!(file.with_env_value(Some("off")).experimental_enum_support);
    }
}
