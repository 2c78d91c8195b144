use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A parse diagnostic: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParseFn { .. } => "NoPrefixParseFn",
            ErrorImpl::NoInfixParseFn { .. } => "NoInfixParseFn",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    /// The message shown next to the error name, with a hint where one helps.
    pub fn get_tip(&self) -> String {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::NoPrefixParseFn { .. }
            | ErrorImpl::NoInfixParseFn { .. } => self.internal_error.to_string(),
            ErrorImpl::IntegerParseError { .. } => {
                format!("{}, is it above the integer limit?", self.internal_error)
            }
            ErrorImpl::NestingTooDeep { .. } => {
                format!("{}, try splitting it with `let`", self.internal_error)
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },
    #[error("no infix parse function for {kind} found")]
    NoInfixParseFn { kind: TokenKind },
    #[error("could not parse {literal} as integer")]
    IntegerParseError { literal: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
