use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

/// Handles a pattern match at the lexer's position.
///
/// Receives the matched text; returns the produced token, or `None` when the
/// text is skipped (whitespace).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: two-character operators must come before their prefixes
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bang, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Asterisk, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
    ];
}

/// Pull-based tokenizer over a single source text.
///
/// Each call to [`TokenSource::next_token`] scans exactly one token. Characters
/// no pattern recognises come back as `Illegal` tokens so the parser can
/// report them.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("repl"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span of `len` bytes starting at the current position.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(to_offset(self.pos), Rc::clone(&self.file)),
            end: Position(to_offset(self.pos.saturating_add(len)), Rc::clone(&self.file)),
        }
    }

    fn illegal(&mut self, ch: char) -> Token {
        debug!(character = %ch, position = self.pos, "illegal character");

        let token = MK_TOKEN!(TokenKind::Illegal, ch.to_string(), self.span_of(ch.len_utf8()));
        self.advance_n(ch.len_utf8());
        token
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        'scan: while !self.at_eof() {
            for pattern in PATTERNS.iter() {
                let matched = match pattern.regex.find(self.remainder()) {
                    Some(found) => found.as_str().to_string(),
                    None => continue,
                };

                match (pattern.handler)(self, &matched) {
                    Some(token) => return token,
                    None => continue 'scan,
                }
            }

            if let Some(ch) = self.remainder().chars().next() {
                return self.illegal(ch);
            }
        }

        MK_TOKEN!(TokenKind::EOF, String::new(), self.span_of(0))
    }
}

/// Narrows a byte offset to a [`Position`] offset, saturating at `u32::MAX`.
pub fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let token = MK_TOKEN!(TokenKind::Int, matched.to_string(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let token = MK_TOKEN!(kind, matched.to_string(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

/// Scans the whole source, returning every token up to and including `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
