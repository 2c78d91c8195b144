//! Lexical analysis for Monkey source text.
//!
//! The lexer converts source code into tokens one at a time. It handles:
//!
//! - Tokenization using anchored regex patterns
//! - Recognition of keywords, identifiers, integers and operators
//! - Token position tracking for error reporting
//! - Whitespace skipping and `Illegal` tokens for unknown characters
//!
//! The parser consumes tokens through the [`tokens::TokenSource`] trait.

pub mod lexer;
pub mod tokens;
