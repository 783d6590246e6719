//! `strand-syntax` - Lexer, parser, and concrete syntax tree for Strand script.
//!
//! This crate provides the low-level syntactic analysis for script source:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//!
//! # Design Principles
//!
//! The tree is built with `rowan`, in the style of `rust-analyzer`:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Precise ranges**: Node ranges exclude surrounding trivia, so diagnostics
//!   can underline exactly the offending expression
//!
//! # Example
//!
//! ```
//! use strand_syntax::lexer::{lex, TokenKind};
//!
//! let source = "let c = Color;";
//! let tokens = lex(source);
//!
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::KwLet);
//! assert_eq!(meaningful[1].kind, TokenKind::Ident);
//! assert_eq!(meaningful[2].kind, TokenKind::Assign);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{StrandLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
