use std::fmt::{self, Display};

use crate::lexer::tokens::{Token, TokenKind};

use super::ast::{Expr, Node};

// LITERALS

/// Identifier
/// A bare name, e.g. `foobar`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Literal
/// Renders with the digits as written, not the parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Node for BooleanLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl PrefixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOperator::Bang),
            TokenKind::Minus => Some(PrefixOperator::Minus),
            _ => None,
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOperator::Bang => write!(f, "!"),
            PrefixOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Less,
    Greater,
    Equals,
    NotEquals,
}

impl InfixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(InfixOperator::Plus),
            TokenKind::Minus => Some(InfixOperator::Minus),
            TokenKind::Asterisk => Some(InfixOperator::Asterisk),
            TokenKind::Slash => Some(InfixOperator::Slash),
            TokenKind::Less => Some(InfixOperator::Less),
            TokenKind::Greater => Some(InfixOperator::Greater),
            TokenKind::Equals => Some(InfixOperator::Equals),
            TokenKind::NotEquals => Some(InfixOperator::NotEquals),
            _ => None,
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::Equals => "==",
            InfixOperator::NotEquals => "!=",
        };
        write!(f, "{}", symbol)
    }
}

/// Prefix Expression
/// A unary operator applied to its operand, e.g. `-5` or `!ok`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: PrefixOperator,
    pub right: Box<Expr>,
}

impl Node for PrefixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// A binary operator between two operands. The token is the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: InfixOperator,
    pub right: Box<Expr>,
}

impl Node for InfixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}
