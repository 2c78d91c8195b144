//! Interactive read loop.
//!
//! Reads one line at a time, runs it through a fresh lexer and either prints
//! the tokens or the parsed program.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{
    lexer::{
        lexer::Lexer,
        tokens::{TokenKind, TokenSource},
    },
    parser::parser::parse,
};

pub const PROMPT: &str = ">> ";

/// What the loop prints for each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Print the canonical rendering of the parsed program, or its errors.
    #[default]
    Parse,
    /// Print every token of the line.
    Tokens,
}

/// Runs the loop until `input` reaches end of stream.
pub fn start<R: BufRead, W: Write>(input: R, output: &mut W, mode: Mode) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        debug!(?mode, line = %line, "read line");

        let lexer = Lexer::new(line, None);
        match mode {
            Mode::Parse => print_program(lexer, output)?,
            Mode::Tokens => print_tokens(lexer, output)?,
        }
    }
}

fn print_program<W: Write>(lexer: Lexer, output: &mut W) -> io::Result<()> {
    let parsed = parse(lexer);

    if !parsed.is_ok() {
        return print_parser_errors(output, &parsed.error_messages());
    }

    writeln!(output, "{}", parsed.program)
}

fn print_tokens<W: Write>(mut lexer: Lexer, output: &mut W) -> io::Result<()> {
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::EOF {
            return Ok(());
        }
        writeln!(output, "{}", token)?;
    }
}

pub fn print_parser_errors<W: Write>(output: &mut W, errors: &[String]) -> io::Result<()> {
    writeln!(output, "parser errors:")?;
    for message in errors {
        writeln!(output, "\t{}", message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{start, Mode};

    fn run(input: &str, mode: Mode) -> String {
        let mut output = Vec::new();
        start(Cursor::new(input), &mut output, mode).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_prints_prompt_until_end_of_input() {
        assert_eq!(run("", Mode::Parse), ">> ");
    }

    #[test]
    fn test_prints_rendered_program() {
        let output = run("let x = 1 + 2 * 3;\n-a * b\n", Mode::Parse);

        assert_eq!(output, ">> let x = (1 + (2 * 3));\n>> ((-a) * b)\n>> ");
    }

    #[test]
    fn test_prints_all_parser_errors() {
        let output = run("let x 5; let = 1;\n", Mode::Parse);

        assert_eq!(
            output,
            ">> parser errors:\n\
             \texpected next token to be =, got INT instead\n\
             \texpected next token to be IDENT, got = instead\n>> "
        );
    }

    #[test]
    fn test_token_mode() {
        let output = run("let x = 5;", Mode::Tokens);

        assert_eq!(
            output,
            ">> {Type:LET Literal:let}\n{Type:IDENT Literal:x}\n{Type:= Literal:=}\n\
             {Type:INT Literal:5}\n{Type:; Literal:;}\n>> "
        );
    }
}
