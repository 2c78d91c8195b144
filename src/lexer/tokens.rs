use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Function);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    EOF,

    Identifier,
    Int,

    Assign,    // =
    Plus,      // +
    Minus,     // -
    Bang,      // !
    Asterisk,  // *
    Slash,     // /

    Less,      // <
    Greater,   // >
    Equals,    // ==
    NotEquals, // !=

    Comma,
    Semicolon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    // Reserved
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// The name used for this kind in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EOF => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Type:{} Literal:{}}}", self.kind, self.literal)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// Anything the parser can pull tokens from, one at a time.
///
/// Once the input is exhausted an implementation must keep returning an
/// `EOF` token on every subsequent call.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A [`TokenSource`] over tokens that were already produced.
///
/// If the vector does not end with `EOF`, one is synthesized at the span of
/// the last token.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_span = match tokens.last() {
            Some(last) => Span {
                start: last.span.end.clone(),
                end: last.span.end.clone(),
            },
            None => Span {
                start: crate::Position::null(),
                end: crate::Position::null(),
            },
        };

        TokenStream {
            tokens: tokens.into_iter(),
            eof: Token {
                kind: TokenKind::EOF,
                literal: String::new(),
                span: eof_span,
            },
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                // Anything after the first EOF is unreachable
                self.tokens = Vec::new().into_iter();
                self.eof = token.clone();
                token
            }
            Some(token) => token,
            None => self.eof.clone(),
        }
    }
}
