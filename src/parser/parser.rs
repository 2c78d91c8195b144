//! Parser state and the program loop.
//!
//! The parser keeps a two-token window (current and peek) over a
//! [`TokenSource`] and owns the lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Every parse function leaves the current token on the last token it
//! consumed; the program loop advances past it.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource},
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions may be open at once before parsing gives up.
///
/// Every prefix operator and `(` opens one. Parse, render and drop all
/// recurse per level, so this bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser<S: TokenSource> {
    /// Where tokens are pulled from
    source: S,
    /// The token being looked at
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<S>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup<S>,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup<S>,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Expressions currently being parsed
    depth: usize,
}

impl<S: TokenSource> Parser<S> {
    /// Creates a parser over `source`, registering all handlers and
    /// pulling the first two tokens.
    pub fn new(mut source: S) -> Self {
        let current = source.next_token();
        let peek = source.next_token();

        let mut parser = Parser {
            source,
            current,
            peek,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts peek into current and pulls a new peek.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances if the peek token is `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at
    /// the peek token. The cursor does not move on failure.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ));
        }

        self.advance();
        Ok(self.current.clone())
    }

    /// Binding power of the peek token; `Default` when it is not an operator.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Binding power of the current token; `Default` when it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup<S> {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup<S> {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup<S> {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<S>) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<S>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<S>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Opens one level of expression nesting, failing past [`MAX_NESTING_DEPTH`].
    ///
    /// Every successful call must be paired with [`Parser::exit_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Skips the rest of a malformed statement, stopping on its `;` or at EOF.
    fn synchronize(&mut self) {
        while !self
            .current
            .is_one_of_many(&[TokenKind::Semicolon, TokenKind::EOF])
        {
            self.advance();
        }
    }

    /// Parses every statement until EOF.
    ///
    /// A statement that fails is recorded as an error and skipped; parsing
    /// always runs to the end of the input. Consumes the parser.
    pub fn parse_program(mut self) -> Parsed {
        let mut statements = vec![];
        let mut errors = vec![];

        while self.current_token_kind() != TokenKind::EOF {
            match parse_stmt(&mut self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    debug!(%error, position = error.get_position().0, "discarding malformed statement");
                    errors.push(error);
                    self.synchronize();
                }
            }
            self.advance();
        }

        trace!(statements = statements.len(), errors = errors.len(), "parsed program");

        Parsed {
            program: Program { statements },
            errors,
        }
    }
}

/// Outcome of a parse pass: the program plus every diagnostic, in order.
///
/// A non-empty error list means the pass completed with errors; the
/// program then holds only the statements that parsed.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub program: Program,
    errors: Vec<Error>,
}

impl Parsed {
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Program, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }
}

/// Parses everything `source` yields into a [`Program`].
///
/// This is the main entry point: it builds a fresh parser, so no state is
/// shared between calls.
pub fn parse<S: TokenSource>(source: S) -> Parsed {
    Parser::new(source).parse_program()
}
