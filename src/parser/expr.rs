use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, Identifier, InfixExpr, InfixOperator, IntegerLiteral, PrefixExpr,
            PrefixOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{TokenKind, TokenSource},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let result = parse_nested_expr(parser, bp);
    parser.exit_nesting();

    result
}

fn parse_nested_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::NoPrefixParseFn { kind: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while parser.peek_token_kind() != TokenKind::Semicolon && parser.peek_binding_power() > bp {
        let led = match parser.get_led_lookup().get(&parser.peek_token_kind()) {
            Some(led) => *led,
            None => return Ok(left),
        };

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_identifier<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Identifier(Identifier {
        value: token.literal.clone(),
        token,
    }))
}

pub fn parse_integer_literal<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.literal.parse::<i64>() {
        Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.literal,
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_boolean_literal<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Boolean(BooleanLiteral {
        value: token.kind == TokenKind::True,
        token,
    }))
}

pub fn parse_prefix_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    let operator = PrefixOperator::from_token_kind(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::NoPrefixParseFn {
                kind: operator_token.kind,
            },
            parser.get_position(),
        )
    })?;

    parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        token: operator_token,
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    let operator = InfixOperator::from_token_kind(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::NoInfixParseFn {
                kind: operator_token.kind,
            },
            parser.get_position(),
        )
    })?;

    parser.advance();
    // Parsing the rhs at the operator's own power keeps chains left-associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        token: operator_token,
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
