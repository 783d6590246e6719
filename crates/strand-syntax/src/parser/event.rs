//! Parser events.
//!
//! The parser produces a flat stream of events that the sink later turns
//! into a `rowan` tree. Markers may be completed out of order, which is how
//! binary and postfix expressions wrap an already-parsed left operand.

use crate::syntax::SyntaxKind;

/// An event produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new node.
    Start {
        /// The kind of node being started.
        kind: SyntaxKind,
        /// Offset to the event that becomes this node's parent.
        forward_parent: Option<u32>,
    },
    /// Add a token to the current node.
    Token {
        /// The kind of token.
        kind: SyntaxKind,
    },
    /// Finish the current node.
    Finish,
    /// Slot reserved by an open marker; dropped if never completed.
    Placeholder,
}

impl Event {
    /// Creates a start event with no forward parent.
    #[must_use]
    pub fn start(kind: SyntaxKind) -> Self {
        Self::Start {
            kind,
            forward_parent: None,
        }
    }

    /// Creates a token event.
    #[must_use]
    pub fn token(kind: SyntaxKind) -> Self {
        Self::Token { kind }
    }
}
