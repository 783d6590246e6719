//! Expression parsing using Pratt parsing.
//!
//! Operator precedence (low to high):
//! - or (1-2)
//! - and (3-4)
//! - not (5)
//! - ==, !=, <, <=, >, >= (7-8)
//! - +, - (9-10)
//! - *, /, % (11-12)
//! - unary - (13)
//! - postfix `.name`, `(args)`, `[index]`

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::CompletedMarker;
use super::super::Parser;

impl Parser<'_, '_> {
    /// Parse an expression using Pratt parsing.
    pub(crate) fn parse_expression(&mut self) -> CompletedMarker {
        self.parse_expr_bp(0)
    }

    /// Parse expression with minimum binding power.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> CompletedMarker {
        let mut lhs = if let Some(bp) = self.current().prefix_binding_power() {
            let marker = self.start();
            self.bump();
            self.parse_expr_bp(bp);
            marker.complete(self, SyntaxKind::UnaryExpr)
        } else {
            self.parse_primary_expr()
        };

        loop {
            if let Some(next) = self.parse_postfix_expr(lhs) {
                lhs = next;
                continue;
            }

            let op = self.current();
            if let Some((l_bp, r_bp)) = op.infix_binding_power() {
                if l_bp < min_bp {
                    break;
                }

                let marker = lhs.precede(self);
                self.bump(); // operator
                self.parse_expr_bp(r_bp);
                lhs = marker.complete(self, SyntaxKind::BinaryExpr);
                continue;
            }

            break;
        }

        lhs
    }

    /// Parse postfix expressions (field access, calls, indexing).
    pub(crate) fn parse_postfix_expr(&mut self, lhs: CompletedMarker) -> Option<CompletedMarker> {
        match self.current() {
            TokenKind::Dot => {
                let marker = lhs.precede(self);
                self.bump();
                if self.at(TokenKind::Ident) {
                    self.parse_name();
                } else {
                    self.error("expected field name");
                }
                Some(marker.complete(self, SyntaxKind::FieldExpr))
            }
            TokenKind::LParen => {
                let marker = lhs.precede(self);
                self.parse_arg_list();
                Some(marker.complete(self, SyntaxKind::CallExpr))
            }
            TokenKind::LBracket => {
                let marker = lhs.precede(self);
                self.bump();
                self.parse_expression();
                self.expect(TokenKind::RBracket, "expected ']'");
                Some(marker.complete(self, SyntaxKind::IndexExpr))
            }
            _ => None,
        }
    }

    /// Parse primary expressions (literals, names, parentheses, lists).
    pub(crate) fn parse_primary_expr(&mut self) -> CompletedMarker {
        match self.current() {
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNone => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::Literal)
            }
            TokenKind::Ident => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::NameRef)
            }
            TokenKind::LParen => {
                let marker = self.start();
                self.bump();
                self.parse_expression();
                self.expect(TokenKind::RParen, "expected ')'");
                marker.complete(self, SyntaxKind::ParenExpr)
            }
            TokenKind::LBracket => {
                let marker = self.start();
                self.bump();
                while !self.at(TokenKind::RBracket) && !self.at_end() {
                    self.parse_expression();
                    if self.at(TokenKind::Comma) {
                        self.bump();
                    } else {
                        break;
                    }
                }
                self.expect(TokenKind::RBracket, "expected ']'");
                marker.complete(self, SyntaxKind::ListExpr)
            }
            _ => {
                let marker = self.start();
                self.error("expected expression");
                if !self.is_sync_point() {
                    self.bump();
                }
                marker.complete(self, SyntaxKind::Error)
            }
        }
    }

    /// Parse argument list for function calls.
    pub(crate) fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.parse_expression();
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')'");
        self.finish_node();
    }
}
