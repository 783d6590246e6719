//! Runtime errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use strand_hir::CompileError;
use thiserror::Error;

/// Errors raised while preparing or executing a compiled script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The script failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Invalid argument count for a call.
    #[error("invalid argument count (expected {expected}, got {got})")]
    InvalidArgumentCount { expected: usize, got: usize },

    /// Argument does not match the declared parameter type.
    #[error("argument {index} expected a value of type '{expected}', got '{found}'")]
    ArgumentType {
        index: usize,
        expected: SmolStr,
        found: SmolStr,
    },

    /// A module instance lacks an attribute declared by its class.
    #[error("missing attribute '{0}'")]
    MissingAttribute(SmolStr),

    /// A module instance was given an attribute its class does not declare.
    #[error("unexpected attribute '{0}'")]
    UnexpectedAttribute(SmolStr),

    /// Enum has no member of that name.
    #[error("'{ty}' has no member '{member}'")]
    UnknownEnumMember { ty: SmolStr, member: SmolStr },

    /// Read of a local that was never stored.
    #[error("local '{0}' read before assignment")]
    UnboundLocal(SmolStr),

    /// Operand types do not fit the operation.
    #[error("type mismatch in {0}")]
    TypeMismatch(SmolStr),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Arithmetic overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Index out of bounds.
    #[error("list index {index} out of range for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    /// The graph finished without returning.
    #[error("graph '{0}' finished without returning")]
    MissingReturn(SmolStr),

    /// Invalid configuration file or value.
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),
}
