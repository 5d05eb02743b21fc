#![forbid(unsafe_code)]

use vera_ast::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwIf,
    KwAssert,
    KwInput,

    // Operators / punctuation
    Assign,
    EqEq,
    Neq,
    Le,
    Ge,
    Lt,
    Gt,

    Plus,
    Minus,
    Star,

    LParen,
    RParen,
    LBrace,
    RBrace,

    Eof,

    // Literals / identifiers
    Ident(String),
    Int(i64),
}
