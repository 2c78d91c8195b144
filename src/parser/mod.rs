//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`crate::ast::ast::Program`]. It uses a Pratt parser for
//! expressions with operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, expression statements)
//! - Expression parsing (prefix and infix operators, literals, grouping)
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
