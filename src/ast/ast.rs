use std::fmt::{self, Display};

use super::{
    expressions::{BooleanLiteral, Identifier, InfixExpr, IntegerLiteral, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Implemented by every AST node. `Display` gives the canonical rendering.
pub trait Node: Display {
    /// Literal text of the token that introduced the node.
    fn token_literal(&self) -> &str;
}

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements in source order
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(stmt) => Display::fmt(stmt, f),
            Stmt::Return(stmt) => Display::fmt(stmt, f),
            Stmt::Expression(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => expr.token_literal(),
            Expr::Integer(expr) => expr.token_literal(),
            Expr::Boolean(expr) => expr.token_literal(),
            Expr::Prefix(expr) => expr.token_literal(),
            Expr::Infix(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(expr) => Display::fmt(expr, f),
            Expr::Integer(expr) => Display::fmt(expr, f),
            Expr::Boolean(expr) => Display::fmt(expr, f),
            Expr::Prefix(expr) => Display::fmt(expr, f),
            Expr::Infix(expr) => Display::fmt(expr, f),
        }
    }
}
