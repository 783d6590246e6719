//! Command-line argument literals.

use anyhow::{anyhow, bail};
use smol_str::SmolStr;
use strand_runtime::{ScriptUnit, Value};

/// Parses one `run` argument. Enum members are written `Enum.MEMBER`.
pub fn parse_value(unit: &ScriptUnit, text: &str) -> anyhow::Result<Value> {
    let text = text.trim();
    match text {
        "None" => return Ok(Value::None),
        "True" => return Ok(Value::Bool(true)),
        "False" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(inner) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| parse_value(unit, item))
            .collect::<anyhow::Result<Vec<_>>>()?;
        return Ok(Value::list(items));
    }
    if let Some(inner) = unquote(text) {
        return Ok(Value::Str(SmolStr::new(inner)));
    }
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Value::Int(value));
    }
    if let Ok(value) = text.parse::<f64>() {
        return Ok(Value::Float(value));
    }
    if let Some((name, member)) = text.split_once('.') {
        if is_identifier(name) && is_identifier(member) {
            return Ok(unit.enum_value(name, member)?.into());
        }
    }
    bail!("cannot parse argument '{text}'")
}

fn unquote(text: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses all arguments, reporting the position of the first bad one.
pub fn parse_values(unit: &ScriptUnit, args: &[String]) -> anyhow::Result<Vec<Value>> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| {
            parse_value(unit, arg).map_err(|err| anyhow!("argument {index}: {err}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strand_hir::{CompileOptions, EnumRegistry};

    fn unit() -> ScriptUnit {
        ScriptUnit::compile_with_registry(
            "enum Color { RED = 1, GREEN = 2 }",
            CompileOptions::for_module("cli_args").with_enum_support(true),
            Arc::new(EnumRegistry::new()),
        )
        .unwrap()
    }

    #[test]
    fn parses_literals() {
        let unit = unit();
        assert_eq!(parse_value(&unit, "42").unwrap(), Value::Int(42));
        assert_eq!(parse_value(&unit, "-1.5").unwrap(), Value::Float(-1.5));
        assert_eq!(parse_value(&unit, "True").unwrap(), Value::Bool(true));
        assert_eq!(parse_value(&unit, "None").unwrap(), Value::None);
        assert_eq!(parse_value(&unit, "'hi'").unwrap(), Value::from("hi"));
        assert_eq!(
            parse_value(&unit, "[1, 2]").unwrap(),
            Value::list(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn parses_enum_members() {
        let unit = unit();
        let green = parse_value(&unit, "Color.GREEN").unwrap();
        assert_eq!(green.to_string(), "Color.GREEN");
        assert!(parse_value(&unit, "Color.PURPLE").is_err());
    }

    #[test]
    fn rejects_bare_words() {
        let err = parse_values(&unit(), &["1".into(), "red".into()]).unwrap_err();
        assert_eq!(err.to_string(), "argument 1: cannot parse argument 'red'");
    }
}
