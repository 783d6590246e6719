//! Compile errors for Strand script.
//!
//! Every failure the compiler can report is a [`CompileError`]. Each variant
//! carries a stable [`DiagnosticCode`] and, when the error points at source
//! text, the byte range to highlight.

use smol_str::SmolStr;
use text_size::TextRange;

/// A diagnostic code identifying the kind of compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Syntax errors (E001-E099)
    /// Parser error.
    Syntax,

    // Name resolution errors (E100-E199)
    /// Reference to a name that is not bound.
    UndefinedValue,
    /// Reference to a type name that is not declared (or gated off).
    UnknownTypeName,
    /// Call to a function that is not declared.
    UnknownFunction,
    /// Attribute access that the receiver does not support.
    UnknownAttribute,
    /// Two top-level items with the same name.
    DuplicateDefinition,

    // Type errors (E200-E299)
    /// Operand or value has the wrong type.
    TypeMismatch,
    /// A function with a return type can fall off its end.
    MissingReturn,

    // Enum definition errors (E300-E399)
    /// Enum members do not share one value type.
    HeterogeneousEnumValueType,
    /// Enum members share a value type that cannot back an enum.
    UnsupportedEnumValueType,
    /// Enum declares no members.
    EmptyEnum,
    /// Enum declares the same member name twice.
    DuplicateEnumMember,

    // Unsupported constructs (E400-E499)
    /// Construct outside the supported language subset.
    Unsupported,
}

impl DiagnosticCode {
    /// Returns the string code (e.g., "E104").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax => "E001",
            Self::UndefinedValue => "E101",
            Self::UnknownTypeName => "E102",
            Self::UnknownFunction => "E103",
            Self::UnknownAttribute => "E104",
            Self::DuplicateDefinition => "E105",
            Self::TypeMismatch => "E201",
            Self::MissingReturn => "E202",
            Self::HeterogeneousEnumValueType => "E301",
            Self::UnsupportedEnumValueType => "E302",
            Self::EmptyEnum => "E303",
            Self::DuplicateEnumMember => "E304",
            Self::Unsupported => "E401",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An error raised while compiling Strand script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Enum member values have more than one type.
    #[error("Could not unify type list for enum values")]
    HeterogeneousEnumValueType {
        /// Highlighted enum name.
        range: Option<TextRange>,
    },
    /// Enum member values have a type outside `int`, `float`, `str`.
    #[error("Cannot create Enum with value type '{ty}'")]
    UnsupportedEnumValueType {
        /// Display name of the rejected value type.
        ty: SmolStr,
        /// Highlighted member value.
        range: Option<TextRange>,
    },
    /// Attribute is not defined on the receiver.
    #[error("'{owner}' object has no attribute '{name}'")]
    UnknownAttribute {
        /// Display name of the receiver type.
        owner: SmolStr,
        /// Requested attribute.
        name: SmolStr,
        /// Highlighted attribute expression.
        range: Option<TextRange>,
    },
    /// Type name is not declared, or names an enum while enums are disabled.
    #[error("Unknown type name '{name}'")]
    UnknownTypeName {
        /// The unresolved name.
        name: SmolStr,
        /// Highlighted identifier.
        range: Option<TextRange>,
    },
    /// Enum declares no members.
    #[error("Enum '{name}' has no members")]
    EmptyEnum {
        /// Enum name.
        name: SmolStr,
        /// Highlighted enum name.
        range: Option<TextRange>,
    },
    /// Enum declares a member name twice.
    #[error("Attempted to reuse key: '{key}'")]
    DuplicateEnumMember {
        /// The repeated member name.
        key: SmolStr,
        /// Highlighted second declaration.
        range: Option<TextRange>,
    },
    /// Parse error.
    #[error("{message}")]
    Syntax {
        /// Parser message.
        message: String,
        /// Highlighted token.
        range: Option<TextRange>,
    },
    /// Name is not bound in any scope.
    #[error("undefined value {name}")]
    UndefinedValue {
        /// The unresolved name.
        name: SmolStr,
        /// Highlighted identifier.
        range: Option<TextRange>,
    },
    /// Operand or value has the wrong type.
    #[error("{message}")]
    TypeMismatch {
        /// Explanation.
        message: String,
        /// Highlighted expression.
        range: Option<TextRange>,
    },
    /// Construct outside the supported subset.
    #[error("{message}")]
    Unsupported {
        /// Explanation.
        message: String,
        /// Highlighted construct.
        range: Option<TextRange>,
    },
    /// Called function is not declared.
    #[error("function '{name}' is not defined")]
    UnknownFunction {
        /// Function name.
        name: SmolStr,
        /// Highlighted callee.
        range: Option<TextRange>,
    },
    /// Two top-level items share a name.
    #[error("'{name}' is already defined")]
    DuplicateDefinition {
        /// Repeated name.
        name: SmolStr,
        /// Highlighted second definition.
        range: Option<TextRange>,
    },
    /// A function declared to return a value can reach its end.
    #[error("function '{name}' does not return a value on every path")]
    MissingReturn {
        /// Function name.
        name: SmolStr,
        /// Highlighted function name.
        range: Option<TextRange>,
    },
}

impl CompileError {
    /// Returns the diagnostic code of this error.
    #[must_use]
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::HeterogeneousEnumValueType { .. } => DiagnosticCode::HeterogeneousEnumValueType,
            Self::UnsupportedEnumValueType { .. } => DiagnosticCode::UnsupportedEnumValueType,
            Self::UnknownAttribute { .. } => DiagnosticCode::UnknownAttribute,
            Self::UnknownTypeName { .. } => DiagnosticCode::UnknownTypeName,
            Self::EmptyEnum { .. } => DiagnosticCode::EmptyEnum,
            Self::DuplicateEnumMember { .. } => DiagnosticCode::DuplicateEnumMember,
            Self::Syntax { .. } => DiagnosticCode::Syntax,
            Self::UndefinedValue { .. } => DiagnosticCode::UndefinedValue,
            Self::TypeMismatch { .. } => DiagnosticCode::TypeMismatch,
            Self::Unsupported { .. } => DiagnosticCode::Unsupported,
            Self::UnknownFunction { .. } => DiagnosticCode::UnknownFunction,
            Self::DuplicateDefinition { .. } => DiagnosticCode::DuplicateDefinition,
            Self::MissingReturn { .. } => DiagnosticCode::MissingReturn,
        }
    }

    /// Returns the source range this error highlights, if any.
    #[must_use]
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::HeterogeneousEnumValueType { range }
            | Self::UnsupportedEnumValueType { range, .. }
            | Self::UnknownAttribute { range, .. }
            | Self::UnknownTypeName { range, .. }
            | Self::EmptyEnum { range, .. }
            | Self::DuplicateEnumMember { range, .. }
            | Self::Syntax { range, .. }
            | Self::UndefinedValue { range, .. }
            | Self::TypeMismatch { range, .. }
            | Self::Unsupported { range, .. }
            | Self::UnknownFunction { range, .. }
            | Self::DuplicateDefinition { range, .. }
            | Self::MissingReturn { range, .. } => *range,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, range: TextRange) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            range: Some(range),
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>, range: TextRange) -> Self {
        Self::Unsupported {
            message: message.into(),
            range: Some(range),
        }
    }

    /// Renders the error against `source`, underlining the highlighted range.
    ///
    /// ```text
    /// error[E104]: 'Color' object has no attribute 'PURPLE'
    ///   --> line 3
    ///     return Color.PURPLE;
    ///            ~~~~~~~~~~~~
    /// ```
    ///
    /// Ranges spanning several lines are underlined on their first line only.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self);
        let Some(range) = self.range() else {
            return out;
        };

        let start = usize::from(range.start()).min(source.len());
        let end = usize::from(range.end()).min(source.len());
        let line_start = source[..start].rfind('\n').map_or(0, |idx| idx + 1);
        let line_end = source[start..]
            .find('\n')
            .map_or(source.len(), |idx| start + idx);
        let line_number = source[..start].matches('\n').count() + 1;
        let line = &source[line_start..line_end];

        let column = source[line_start..start].chars().count();
        let width = source[start..end.min(line_end).max(start)]
            .chars()
            .count()
            .max(1);

        out.push_str(&format!("\n  --> line {line_number}\n"));
        out.push_str(line);
        out.push('\n');
        out.push_str(&" ".repeat(column));
        out.push_str(&"~".repeat(width));
        out
    }
}
