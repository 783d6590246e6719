//! Token definitions for Strand script.
//!
//! This module defines all lexical tokens that can appear in a script.
//! The token kinds are designed to work with both the `logos` lexer generator
//! and the `rowan` lossless syntax tree library.

use logos::Logos;

/// All token kinds in Strand script.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Punctuation and operators
/// - Keywords (reserved words)
/// - Literals (numbers, strings)
/// - Identifiers
/// - Special tokens (errors, EOF)
///
/// The variant order is mirrored by `SyntaxKind`; see `token_kinds.rs`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Line comment: # ...
    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    LineComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `->`
    #[token("->")]
    Arrow,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `=`
    #[token("=")]
    Assign,

    /// `==`
    #[token("==")]
    EqEq,

    /// `!=`
    #[token("!=")]
    NotEq,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    GtEq,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `enum`
    #[token("enum")]
    KwEnum,

    /// `fn`
    #[token("fn")]
    KwFn,

    /// `module`
    #[token("module")]
    KwModule,

    /// `let`
    #[token("let")]
    KwLet,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `if`
    #[token("if")]
    KwIf,

    /// `else`
    #[token("else")]
    KwElse,

    /// `for`
    #[token("for")]
    KwFor,

    /// `in`
    #[token("in")]
    KwIn,

    /// `and`
    #[token("and")]
    KwAnd,

    /// `or`
    #[token("or")]
    KwOr,

    /// `not`
    #[token("not")]
    KwNot,

    /// `True`
    #[token("True")]
    KwTrue,

    /// `False`
    #[token("False")]
    KwFalse,

    /// `None`
    #[token("None")]
    KwNone,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: `42`, `1_000`
    #[regex(r"[0-9][0-9_]*")]
    IntLiteral,

    /// Float literal: `1.5`, `2.5e-3`, `1e10`
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,

    /// String literal: `"foo"` or `'foo'`
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    StringLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: starts with letter or underscore, contains letters, digits, underscores
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character
    #[default]
    Error,

    /// End of file marker (not produced by lexer, added by parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comment).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment)
    }

    /// Returns `true` if this token is a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::KwEnum
                | Self::KwFn
                | Self::KwModule
                | Self::KwLet
                | Self::KwReturn
                | Self::KwIf
                | Self::KwElse
                | Self::KwFor
                | Self::KwIn
                | Self::KwAnd
                | Self::KwOr
                | Self::KwNot
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNone
        )
    }

    /// Returns `true` if this token can start an expression.
    pub fn can_start_expr(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::IntLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNone
                | Self::KwNot
                | Self::LParen
                | Self::LBracket
                | Self::Minus
        )
    }

    /// Returns `true` if this token can start a statement.
    pub fn can_start_statement(self) -> bool {
        self.can_start_expr()
            || matches!(
                self,
                Self::KwLet | Self::KwReturn | Self::KwIf | Self::KwFor | Self::Semicolon
            )
    }

    /// Returns `true` if this token starts a top-level item.
    pub fn can_start_item(self) -> bool {
        matches!(self, Self::KwEnum | Self::KwFn | Self::KwModule | Self::KwLet)
    }

    /// Returns `true` if this token is a comparison operator.
    pub fn is_comparison_op(self) -> bool {
        matches!(
            self,
            Self::EqEq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Returns the binding power for Pratt parsing (left, right).
    /// Returns None if not an infix operator.
    pub fn infix_binding_power(self) -> Option<(u8, u8)> {
        Some(match self {
            Self::KwOr => (1, 2),
            Self::KwAnd => (3, 4),
            Self::EqEq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => (7, 8),
            Self::Plus | Self::Minus => (9, 10),
            Self::Star | Self::Slash | Self::Percent => (11, 12),
            _ => return None,
        })
    }

    /// Returns the binding power for prefix operators.
    pub fn prefix_binding_power(self) -> Option<u8> {
        Some(match self {
            Self::KwNot => 5,
            Self::Minus => 13,
            _ => return None,
        })
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        Self(kind as u16)
    }
}
