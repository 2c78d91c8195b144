#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::Error;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position inside that line. Offsets past the end of the source (such as
/// the position of the EOF token) are clamped onto the last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last_line = line.to_string();
        start = end;
        line_number += 1;
    }

    // Past the end: point just after the last character of the final line
    let line_number = line_number.saturating_sub(1).max(1);
    let line_pos = last_line.trim_end_matches('\n').len();
    (line_number, last_line, line_pos)
}


/// Renders a diagnostic against its source text.
///
/// ```text
/// Error: UnexpectedToken (expected next token to be =, got INT instead)
/// -> main.monkey
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
