//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations.

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    cursor: usize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a new source from tokens and source text.
    pub fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            tokens,
            source,
            cursor: 0,
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub fn current_token(&self) -> Option<&Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub fn peek_token_n(&self, n: usize) -> Option<&Token> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
    }

    /// Advances past the current non-trivia token.
    pub fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                break;
            }
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Returns the end offset of the source, used for errors at EOF.
    pub fn end_offset(&self) -> text_size::TextSize {
        text_size::TextSize::of(self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_peek_skips_trivia() {
        let source = "let  # comment\n x";
        let tokens = lex(source);
        let src = Source::new(&tokens, source);
        assert_eq!(src.current(), TokenKind::KwLet);
        assert_eq!(src.peek_kind_n(1), TokenKind::Ident);
        assert_eq!(src.peek_kind_n(2), TokenKind::Eof);
    }

    #[test]
    fn test_bump_skips_whitespace() {
        let source = "Color . RED";
        let tokens = lex(source);
        let mut src = Source::new(&tokens, source);
        src.bump();
        assert_eq!(src.current(), TokenKind::Dot);
        src.bump();
        assert_eq!(src.current(), TokenKind::Ident);
        src.bump();
        assert!(src.at_end());
    }
}
