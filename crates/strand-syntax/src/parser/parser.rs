//! Main parser implementation.

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;
use drop_bomb::DropBomb;

/// Parses source text into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens, source);
    let (events, errors) = parser.parse();

    let green_node = Sink::new(&tokens, source, events).finish();

    Parse { green_node, errors }
}

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    pub(crate) source: Source<'t, 'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(
        mut self,
        parser: &mut Parser<'_, '_>,
        kind: SyntaxKind,
    ) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::Start {
                    kind,
                    forward_parent: None,
                };
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pub(crate) pos: usize,
}

impl CompletedMarker {
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((to - current) as u32);
                break;
            }
            _ => break,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            source: Source::new(tokens, source),
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> (Vec<Event>, Vec<ParseError>) {
        self.start_node(SyntaxKind::SourceFile);

        while !self.at_end() {
            match self.current() {
                TokenKind::KwEnum => self.parse_enum_decl(),
                TokenKind::KwFn => self.parse_fn_decl(),
                TokenKind::KwModule => self.parse_module_decl(),
                TokenKind::KwLet => self.parse_let_stmt(),
                _ => {
                    // Error recovery: skip unknown token
                    self.error("expected 'enum', 'fn', 'module', or 'let'");
                    self.bump();
                }
            }
        }

        self.finish_node();

        (self.events, self.errors)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        self.events.push(Event::token(SyntaxKind::from(kind)));
        self.source.bump();
    }

    /// Consumes `kind` or records `message` without consuming anything.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error(message);
            false
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.events.push(Event::start(kind));
    }

    pub(crate) fn finish_node(&mut self) {
        self.events.push(Event::Finish);
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.source.current_token().map_or_else(
            || text_size::TextRange::empty(self.source.end_offset()),
            |t| t.range,
        );

        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    /// Returns true if the current token is a synchronization point.
    pub(crate) fn is_sync_point(&self) -> bool {
        let current = self.current();
        current.can_start_item()
            || matches!(current, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof)
    }

    /// Recover at statement level - skip to next statement or block end.
    pub(crate) fn recover_statement(&mut self) {
        while !self.at_end() {
            if self.at(TokenKind::Semicolon) {
                self.bump();
                break;
            }
            if self.is_sync_point() {
                break;
            }
            self.bump();
        }
    }

    /// Consume a statement terminator, or report it as missing.
    pub(crate) fn expect_semicolon(&mut self) {
        if self.at(TokenKind::Semicolon) {
            self.bump();
            return;
        }

        self.error("expected ';'");
        if !(self.is_sync_point() || self.current().can_start_statement()) {
            self.recover_statement();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
    }

    #[test]
    fn test_parse_enum() {
        let parse = parse("enum Color { RED = 1, GREEN = 2 }");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_parse_function() {
        let source = r#"
fn enum_comp(x: Color, y: Color) -> bool {
    return x == y;
}
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_unknown_top_level_token() {
        let parse = parse("return 1;");
        assert!(!parse.ok());
        assert!(parse
            .errors()
            .iter()
            .any(|error| error.message == "expected 'enum', 'fn', 'module', or 'let'"));
    }

    #[test]
    fn test_missing_semicolon() {
        let source = r#"
fn f() {
    let x = 1
    return x;
}
"#;
        let parse = parse(source);
        assert!(!parse.ok(), "expected errors for missing semicolon");
        assert!(
            parse
                .errors()
                .iter()
                .any(|error| error.message == "expected ';'"),
            "errors: {:?}",
            parse.errors()
        );
    }

    #[test]
    fn test_tree_is_lossless() {
        let source = "# leading\nenum Color { RED = 1 }  # trailing\n";
        let parse = parse(source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }
}
