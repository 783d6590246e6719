//! Decoding of literal tokens.

use smol_str::SmolStr;

/// Parses an integer literal, ignoring `_` separators.
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    digits.parse().ok()
}

/// Parses a float literal, ignoring `_` separators.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    digits.parse().ok()
}

/// Decodes a quoted string literal, resolving escapes.
pub(crate) fn unescape_string(text: &str) -> SmolStr {
    let inner = if text.len() >= 2 { &text[1..text.len() - 1] } else { "" };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    SmolStr::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("99999999999999999999"), None);
        assert_eq!(parse_float("2.5e-3"), Some(2.5e-3));
    }

    #[test]
    fn test_strings() {
        assert_eq!(unescape_string("\"foo\""), "foo");
        assert_eq!(unescape_string(r"'it\'s'"), "it's");
        assert_eq!(unescape_string(r#""a\tb\n""#), "a\tb\n");
        assert_eq!(unescape_string(r#""back\\slash""#), "back\\slash");
    }
}
