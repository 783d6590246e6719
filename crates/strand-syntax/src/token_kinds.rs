//! Single source of truth for the token kind list.
//!
//! `TokenKind` and the token half of `SyntaxKind` must stay in the same order,
//! so both are generated from this list.

macro_rules! for_each_token_kind {
    ($m:ident) => {
        $m! {
            Whitespace,
            LineComment,
            Semicolon,
            Colon,
            Comma,
            Dot,
            LParen,
            RParen,
            LBrace,
            RBrace,
            LBracket,
            RBracket,
            Arrow,
            Assign,
            EqEq,
            NotEq,
            Lt,
            LtEq,
            Gt,
            GtEq,
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            KwEnum,
            KwFn,
            KwModule,
            KwLet,
            KwReturn,
            KwIf,
            KwElse,
            KwFor,
            KwIn,
            KwAnd,
            KwOr,
            KwNot,
            KwTrue,
            KwFalse,
            KwNone,
            IntLiteral,
            FloatLiteral,
            StringLiteral,
            Ident,
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
