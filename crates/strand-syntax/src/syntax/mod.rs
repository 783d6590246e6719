//! Syntax tree types for Strand script.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    (@nodes [$($token:ident),*] $($(#[doc = $doc:literal])* $node:ident),* $(,)?) => {
        /// All syntax node and token kinds in Strand script.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($token,)*
            $($(#[doc = $doc])* $node,)*
        }

        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            $(SyntaxKind::$node,)*
        ];

        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$token => SyntaxKind::$token,)*
                }
            }
        }
    };
    ($($token:ident),* $(,)?) => {
        define_syntax_kind! {
            @nodes [$($token),*]
            /// Root node of a source file
            SourceFile,
            /// An enum declaration: `enum Color { RED = 1 }`
            EnumDecl,
            /// A single enum member: `RED = 1`
            EnumMember,
            /// A function declaration: `fn name(params) -> type { ... }`
            FnDecl,
            /// A module declaration: `module Name { attrs; fns }`
            ModuleDecl,
            /// A module attribute declaration: `e: Color;`
            AttrDecl,
            /// Parameter list in declaration
            ParamList,
            /// Single parameter: `x: Color`
            Param,
            /// Return type annotation: `-> bool`
            RetType,
            /// A type reference: `int`, `List[int]`, `Color`
            TypeRef,
            /// A braced statement block
            Block,
            /// Variable binding: `let x: T = expr;`
            LetStmt,
            /// Return statement: `return expr;`
            ReturnStmt,
            /// If statement: `if cond { ... }`
            IfStmt,
            /// Else branch
            ElseBranch,
            /// For statement: `for e in Color { ... }`
            ForStmt,
            /// Assignment statement: `x = expr;`
            AssignStmt,
            /// Expression statement: `res.append(x);`
            ExprStmt,
            /// Binary expression: `a == b`
            BinaryExpr,
            /// Unary expression: `-x`, `not x`
            UnaryExpr,
            /// Parenthesized expression: `(expr)`
            ParenExpr,
            /// Call expression: `isinstance(x, Color)`
            CallExpr,
            /// Argument list in call
            ArgList,
            /// Index expression: `xs[0]`
            IndexExpr,
            /// Field access: `Color.RED`
            FieldExpr,
            /// List display: `[1, 2]`
            ListExpr,
            /// Name reference in an expression
            NameRef,
            /// A declared name (identifier)
            Name,
            /// Literal value
            Literal,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` for node kinds that form an expression.
    #[must_use]
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            Self::BinaryExpr
                | Self::UnaryExpr
                | Self::ParenExpr
                | Self::CallExpr
                | Self::IndexExpr
                | Self::FieldExpr
                | Self::ListExpr
                | Self::NameRef
                | Self::Literal
        )
    }

    /// Returns `true` for node kinds that form a statement.
    #[must_use]
    pub fn is_stmt(self) -> bool {
        matches!(
            self,
            Self::LetStmt
                | Self::ReturnStmt
                | Self::IfStmt
                | Self::ForStmt
                | Self::AssignStmt
                | Self::ExprStmt
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Strand script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrandLanguage {}

impl rowan::Language for StrandLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the script syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<StrandLanguage>;

/// A syntax token in the script syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<StrandLanguage>;

/// A syntax element (either node or token) in the script syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<StrandLanguage>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwEnum), SyntaxKind::KwEnum);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::EqEq), SyntaxKind::EqEq);
        assert_eq!(SyntaxKind::from(TokenKind::Eof), SyntaxKind::Eof);
    }

    #[test]
    fn test_raw_round_trip_covers_nodes() {
        for kind in [SyntaxKind::SourceFile, SyntaxKind::EnumMember, SyntaxKind::Literal] {
            let raw = StrandLanguage::kind_to_raw(kind);
            assert_eq!(StrandLanguage::kind_from_raw(raw), kind);
        }
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwIf.is_token());
        assert!(!SyntaxKind::IfStmt.is_token());
        assert!(SyntaxKind::EnumDecl.is_node());
        assert!(!SyntaxKind::Ident.is_node());
    }

    #[test]
    fn test_expression_and_statement_kinds() {
        assert!(SyntaxKind::FieldExpr.is_expr());
        assert!(!SyntaxKind::FieldExpr.is_stmt());
        assert!(SyntaxKind::ForStmt.is_stmt());
        assert!(!SyntaxKind::Block.is_expr());
    }
}
