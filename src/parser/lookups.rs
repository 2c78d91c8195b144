use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::{TokenKind, TokenSource},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
}

pub type StmtHandler<S> = fn(&mut Parser<S>) -> Result<Stmt, Error>;
pub type NUDHandler<S> = fn(&mut Parser<S>) -> Result<Expr, Error>;
pub type LEDHandler<S> = fn(&mut Parser<S>, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups<S: TokenSource>(parser: &mut Parser<S>) {
    // Equality
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_infix_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_infix_expr);

    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_infix_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_infix_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Asterisk, BindingPower::Multiplicative, parse_infix_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_infix_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier);
    parser.nud(TokenKind::Int, parse_integer_literal);
    parser.nud(TokenKind::True, parse_boolean_literal);
    parser.nud(TokenKind::False, parse_boolean_literal);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables live inside each parser, never in statics
pub type StmtLookup<S> = HashMap<TokenKind, StmtHandler<S>>;
pub type NUDLookup<S> = HashMap<TokenKind, NUDHandler<S>>;
pub type LEDLookup<S> = HashMap<TokenKind, LEDHandler<S>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
