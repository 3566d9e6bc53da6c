use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use super::position::Span;

/// Identifier values longer than this are reported truncated.
pub const MAX_IDENTIFIER_LEN: usize = 20;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("class", TokenKind::Class);
        map.insert("extends", TokenKind::Extends);
        map.insert("void", TokenKind::Void);
        map.insert("int", TokenKind::Int);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("string", TokenKind::String);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("this", TokenKind::This);
        map.insert("new", TokenKind::New);
        map.insert("length", TokenKind::Length);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Id,
    Number,
    NumberEx,
    CString,

    Plus,
    Minus,
    Times,
    Divide,
    Module,
    LParen,
    RParen,

    LComment,
    BComment,

    // Reserved
    Class,
    Extends,
    Void,
    Int,
    Boolean,
    String,
    Return,
    If,
    Else,
    While,
    Break,
    Continue,
    This,
    New,
    Length,
    True,
    False,
    Null,
}

impl TokenKind {
    /// The upper-case name printed by the token listing.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Id => "ID",
            TokenKind::Number => "NUMBER",
            TokenKind::NumberEx => "NUMBEREX",
            TokenKind::CString => "CSTRING",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Module => "MODULE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LComment => "LCOMMENT",
            TokenKind::BComment => "BCOMMENT",
            TokenKind::Class => "CLASS",
            TokenKind::Extends => "EXTENDS",
            TokenKind::Void => "VOID",
            TokenKind::Int => "INT",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::String => "STRING",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::This => "THIS",
            TokenKind::New => "NEW",
            TokenKind::Length => "LENGTH",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
        }
    }

    pub fn is_reserved(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Value derived from a numeric or string lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Str(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
            Literal::Str(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Reported value. Identifiers and keywords are cut to
    /// [`MAX_IDENTIFIER_LEN`] characters; `span` still covers the whole lexeme.
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Kind: {} Value '{}' Line {} Column {}",
            self.kind, self.lexeme, self.line, self.column
        )
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_comment(&self) -> bool {
        self.is_one_of_many(&[TokenKind::LComment, TokenKind::BComment])
    }
}
