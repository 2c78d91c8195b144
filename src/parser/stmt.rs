use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::{TokenKind, TokenSource},
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    trace!(%kind, "parsing statement");

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    let name_token = parser.expect(TokenKind::Identifier)?;
    let name = Identifier {
        value: name_token.literal.clone(),
        token: name_token,
    };

    parser.expect(TokenKind::Assign)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Let(LetStmt {
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        token: start_token,
        value,
    }))
}

/// A bare expression; the trailing `;` is optional.
pub fn parse_expression_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt {
        token: start_token,
        expression,
    }))
}
