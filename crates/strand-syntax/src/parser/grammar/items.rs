//! Top-level item parsing.
//!
//! Supported items:
//! - `enum Name { MEMBER = literal, ... }`
//! - `fn name(param: Type, ...) -> Type { ... }`
//! - `module Name { attr: Type; fn forward(self) { ... } }`
//! - `let name = expr;` (module-level capture)

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

impl Parser<'_, '_> {
    /// Parse an enum declaration.
    pub(crate) fn parse_enum_decl(&mut self) {
        self.start_node(SyntaxKind::EnumDecl);
        self.bump(); // enum

        self.parse_name_or_error("expected enum name");

        if self.expect(TokenKind::LBrace, "expected '{'") {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if self.at(TokenKind::Ident) {
                    self.parse_enum_member();
                } else {
                    self.error("expected enum member");
                    if self.current().can_start_item() {
                        break;
                    }
                    self.bump();
                    continue;
                }
                if !self.at(TokenKind::RBrace) {
                    self.expect(TokenKind::Comma, "expected ',' or '}'");
                }
            }
            self.expect(TokenKind::RBrace, "expected '}'");
        }

        self.finish_node();
    }

    fn parse_enum_member(&mut self) {
        self.start_node(SyntaxKind::EnumMember);
        self.parse_name();
        if self.expect(TokenKind::Assign, "expected '=' after enum member name") {
            self.parse_expression();
        }
        self.finish_node();
    }

    /// Parse a function declaration.
    pub(crate) fn parse_fn_decl(&mut self) {
        self.start_node(SyntaxKind::FnDecl);
        self.bump(); // fn

        self.parse_name_or_error("expected function name");

        if self.at(TokenKind::LParen) {
            self.parse_param_list();
        } else {
            self.error("expected '('");
        }

        if self.at(TokenKind::Arrow) {
            self.start_node(SyntaxKind::RetType);
            self.bump();
            self.parse_type_ref();
            self.finish_node();
        }

        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.error("expected function body");
        }

        self.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            if !self.at(TokenKind::Ident) {
                self.error("expected parameter name");
                break;
            }
            self.start_node(SyntaxKind::Param);
            self.parse_name();
            if self.at(TokenKind::Colon) {
                self.bump();
                self.parse_type_ref();
            }
            self.finish_node();

            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Comma, "expected ',' or ')'");
            }
        }

        self.expect(TokenKind::RParen, "expected ')'");
        self.finish_node();
    }

    /// Parse a module declaration.
    pub(crate) fn parse_module_decl(&mut self) {
        self.start_node(SyntaxKind::ModuleDecl);
        self.bump(); // module

        self.parse_name_or_error("expected module name");

        if self.expect(TokenKind::LBrace, "expected '{'") {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                match self.current() {
                    TokenKind::KwFn => self.parse_fn_decl(),
                    TokenKind::Ident => {
                        self.start_node(SyntaxKind::AttrDecl);
                        self.parse_name();
                        if self.expect(TokenKind::Colon, "expected ':' after attribute name") {
                            self.parse_type_ref();
                        }
                        self.expect_semicolon();
                        self.finish_node();
                    }
                    _ => {
                        self.error("expected attribute or method");
                        if self.current().can_start_item() {
                            break;
                        }
                        self.bump();
                    }
                }
            }
            self.expect(TokenKind::RBrace, "expected '}'");
        }

        self.finish_node();
    }

    /// Parse a type reference: `int`, `List[int]`, `Color`, `None`.
    pub(crate) fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TypeRef);
        match self.current() {
            TokenKind::Ident => {
                self.parse_name();
                if self.at(TokenKind::LBracket) {
                    self.bump();
                    self.parse_type_ref();
                    self.expect(TokenKind::RBracket, "expected ']'");
                }
            }
            TokenKind::KwNone => self.bump(),
            _ => self.error("expected type"),
        }
        self.finish_node();
    }

    /// Parse a declared name.
    pub(crate) fn parse_name(&mut self) {
        self.start_node(SyntaxKind::Name);
        self.bump();
        self.finish_node();
    }

    fn parse_name_or_error(&mut self, message: &str) {
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error(message);
        }
    }
}
