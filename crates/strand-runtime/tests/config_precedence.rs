//! Compile options resolved from config files and the environment.

use std::path::PathBuf;
use std::sync::Arc;

use strand_hir::{DiagnosticCode, EnumRegistry};
use strand_runtime::config::StrandConfig;
use strand_runtime::{RuntimeError, ScriptUnit, Value};

const SOURCE: &str = "
enum Color { RED = 1, GREEN = 2 }

fn value_of(x: Color) -> int {
    return x.value;
}
";

fn write_config(name: &str, text: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "strand-config-{}-{name}.toml",
        std::process::id()
    ));
    std::fs::write(&path, text).unwrap();
    path
}

fn compile(config: &StrandConfig) -> ScriptUnit {
    ScriptUnit::compile_with_registry(SOURCE, config.to_options(), Arc::new(EnumRegistry::new()))
        .unwrap()
}

#[test]
fn test_file_enables_enums() {
    let path = write_config(
        "enabled",
        "[compiler]\nmodule = \"configured\"\nexperimental_enum_support = true\n",
    );
    let config = StrandConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let unit = compile(&config);
    let red = unit.enum_value("Color", "RED").unwrap();
    assert_eq!(red.ty().qualified_name(), "__strand__.configured.Color");
    assert_eq!(
        unit.function("value_of").unwrap().call(vec![red.into()]).unwrap(),
        Value::Int(1)
    );
}

#[test]
fn test_env_overrides_file() {
    let path = write_config("disabled", "[compiler]\nexperimental_enum_support = false\n");
    let file = StrandConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    match compile(&file).function("value_of").unwrap_err() {
        RuntimeError::Compile(err) => assert_eq!(err.code(), DiagnosticCode::UnknownTypeName),
        other => panic!("unexpected error: {other}"),
    }

    let overridden = file.with_env_value(Some("yes"));
    assert!(compile(&overridden).function("value_of").is_ok());
}

#[test]
fn test_missing_file_is_invalid_config() {
    let err = StrandConfig::load("/nonexistent/strand.toml").unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidConfig(_)), "{err}");
}

#[test]
fn test_malformed_file_names_path() {
    let path = write_config("malformed", "[compiler\n");
    let err = StrandConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("strand-config-"), "{err}");
}
