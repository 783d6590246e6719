//! Statement parsing for Strand script.
//!
//! Supported statements:
//! - Binding: `let x: T = expr;`
//! - Assignment: `x = expr;`
//! - Expression statement: `res.append(x);`
//! - `if` / `else if` / `else`
//! - `for name in expr { ... }`
//! - `return;` and `return expr;`

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

impl Parser<'_, '_> {
    /// Parse a braced block of statements.
    pub(crate) fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.bump(); // {

        while !self.at(TokenKind::RBrace) && !self.at_end() {
            if self.current().can_start_item() && !self.at(TokenKind::KwLet) {
                // A new item means the block was never closed.
                break;
            }
            self.parse_statement();
        }

        self.expect(TokenKind::RBrace, "expected '}'");
        self.finish_node();
    }

    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) {
        match self.current() {
            TokenKind::KwLet => self.parse_let_stmt(),
            TokenKind::KwReturn => self.parse_return_stmt(),
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::Semicolon => {
                // Stray terminator; keep it in the tree without a node.
                self.bump();
            }
            kind if kind.can_start_expr() => self.parse_assign_or_expr_stmt(),
            _ => {
                self.error("expected statement");
                if !self.is_sync_point() {
                    self.bump();
                }
                self.recover_statement();
            }
        }
    }

    /// Parse a `let` binding (also used for module-level captures).
    pub(crate) fn parse_let_stmt(&mut self) {
        self.start_node(SyntaxKind::LetStmt);
        self.bump(); // let

        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected variable name");
        }

        if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_type_ref();
        }

        if self.expect(TokenKind::Assign, "expected '='") {
            self.parse_expression();
        }

        self.expect_semicolon();
        self.finish_node();
    }

    fn parse_return_stmt(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump(); // return

        if self.current().can_start_expr() {
            self.parse_expression();
        }

        self.expect_semicolon();
        self.finish_node();
    }

    fn parse_if_stmt(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump(); // if

        self.parse_expression(); // condition

        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.error("expected '{'");
        }

        if self.at(TokenKind::KwElse) {
            self.start_node(SyntaxKind::ElseBranch);
            self.bump();
            if self.at(TokenKind::KwIf) {
                self.parse_if_stmt();
            } else if self.at(TokenKind::LBrace) {
                self.parse_block();
            } else {
                self.error("expected '{' or 'if' after 'else'");
            }
            self.finish_node();
        }

        self.finish_node();
    }

    fn parse_for_stmt(&mut self) {
        self.start_node(SyntaxKind::ForStmt);
        self.bump(); // for

        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected loop variable");
        }

        if self.expect(TokenKind::KwIn, "expected 'in'") {
            self.parse_expression();
        }

        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.error("expected '{'");
        }

        self.finish_node();
    }

    fn parse_assign_or_expr_stmt(&mut self) {
        let marker = self.start();
        self.parse_expression();

        if self.at(TokenKind::Assign) {
            self.bump();
            self.parse_expression();
            self.expect_semicolon();
            marker.complete(self, SyntaxKind::AssignStmt);
        } else {
            self.expect_semicolon();
            marker.complete(self, SyntaxKind::ExprStmt);
        }
    }
}
