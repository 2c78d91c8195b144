//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's literal text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $span:expr) => {
        Token {
            kind: $kind,
            literal: $literal,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for tokens whose text never varies.
///
/// The generated handler builds a token of the given kind spanning the
/// literal and moves the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $literal:literal) => {
        |lexer: &mut Lexer, _matched: &str| -> Option<Token> {
            let token = MK_TOKEN!($kind, String::from($literal), lexer.span_of($literal.len()));
            lexer.advance_n($literal.len());
            Some(token)
        }
    };
}
