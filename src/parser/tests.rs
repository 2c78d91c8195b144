//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - `let` and `return` statements
//! - Identifier, integer and boolean expressions
//! - Prefix and infix operators and their precedence
//! - Error reporting and statement-level recovery

use crate::{
    ast::{
        ast::{Expr, Node, Program, Stmt},
        expressions::{InfixOperator, PrefixOperator},
    },
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenStream,
    },
};

use super::parser::{parse, Parsed, MAX_NESTING_DEPTH};

fn parse_input(input: &str) -> Parsed {
    parse(Lexer::new(input.to_string(), Some("test.monkey".to_string())))
}

fn parse_ok(input: &str) -> Program {
    let parsed = parse_input(input);
    assert!(
        parsed.is_ok(),
        "parser has {} errors for {:?}: {:?}",
        parsed.errors().len(),
        input,
        parsed.error_messages()
    );
    parsed.program
}

fn single_expression(input: &str) -> Expr {
    let program = parse_ok(input);
    assert_eq!(program.statements.len(), 1, "expected one statement in {:?}", input);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn assert_integer_literal(expr: &Expr, expected: i64) {
    match expr {
        Expr::Integer(literal) => {
            assert_eq!(literal.value, expected);
            assert_eq!(literal.token_literal(), expected.to_string());
        }
        other => panic!("expected integer literal, got {:?}", other),
    }
}

#[test]
fn test_let_statements() {
    let tests = [
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y;", "foobar", "y"),
    ];

    for (input, identifier, value) in tests {
        let program = parse_ok(input);
        assert_eq!(program.statements.len(), 1);

        let stmt = &program.statements[0];
        assert_eq!(stmt.token_literal(), "let");

        match stmt {
            Stmt::Let(let_stmt) => {
                assert_eq!(let_stmt.name.value, identifier);
                assert_eq!(let_stmt.name.token_literal(), identifier);
                assert_eq!(let_stmt.value.to_string(), value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }

        assert_eq!(stmt.to_string(), format!("let {} = {};", identifier, value));
    }
}

#[test]
fn test_let_statements_in_order() {
    let program = parse_ok("let x = 5;\nlet y = 10;\nlet foobar = 838383;\n");
    let names: Vec<String> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(let_stmt) => let_stmt.name.value.clone(),
            other => panic!("expected let statement, got {:?}", other),
        })
        .collect();

    assert_eq!(names, vec!["x", "y", "foobar"]);
}

#[test]
fn test_let_statement_with_expression() {
    let program = parse_ok("let total = a + b * 2;");

    assert_eq!(program.to_string(), "let total = (a + (b * 2));");
}

#[test]
fn test_return_statements() {
    let program = parse_ok("return 5;\nreturn 10;\nreturn 993322;\nreturn a + b;");
    assert_eq!(program.statements.len(), 4);

    for stmt in program.iter() {
        assert!(matches!(stmt, Stmt::Return(_)), "expected return, got {:?}", stmt);
        assert_eq!(stmt.token_literal(), "return");
    }

    assert_eq!(program.statements[0].to_string(), "return 5;");
    assert_eq!(program.statements[3].to_string(), "return (a + b);");
}

#[test]
fn test_identifier_expression() {
    match single_expression("foobar;") {
        Expr::Identifier(ident) => {
            assert_eq!(ident.value, "foobar");
            assert_eq!(ident.token_literal(), "foobar");
        }
        other => panic!("expected identifier, got {:?}", other),
    }
}

#[test]
fn test_integer_literal_expression() {
    assert_integer_literal(&single_expression("5;"), 5);
}

#[test]
fn test_boolean_expression() {
    for (input, expected) in [("true;", true), ("false;", false)] {
        match single_expression(input) {
            Expr::Boolean(boolean) => assert_eq!(boolean.value, expected),
            other => panic!("expected boolean, got {:?}", other),
        }
    }
}

#[test]
fn test_prefix_expressions() {
    let tests = [
        ("!5;", PrefixOperator::Bang, "!", 5),
        ("-15;", PrefixOperator::Minus, "-", 15),
    ];

    for (input, operator, symbol, value) in tests {
        match single_expression(input) {
            Expr::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(prefix.operator.to_string(), symbol);
                assert_integer_literal(&prefix.right, value);
            }
            other => panic!("expected prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_infix_expressions() {
    let tests = [
        ("5 + 5;", InfixOperator::Plus, "+"),
        ("5 - 5;", InfixOperator::Minus, "-"),
        ("5 * 5;", InfixOperator::Asterisk, "*"),
        ("5 / 5;", InfixOperator::Slash, "/"),
        ("5 > 5;", InfixOperator::Greater, ">"),
        ("5 < 5;", InfixOperator::Less, "<"),
        ("5 == 5;", InfixOperator::Equals, "=="),
        ("5 != 5;", InfixOperator::NotEquals, "!="),
    ];

    for (input, operator, symbol) in tests {
        match single_expression(input) {
            Expr::Infix(infix) => {
                assert_integer_literal(&infix.left, 5);
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token_literal(), symbol);
                assert_integer_literal(&infix.right, 5);
            }
            other => panic!("expected infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let tests = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true == !false", "(true == (!false))"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
    ];

    for (input, expected) in tests {
        let program = parse_ok(input);
        assert_eq!(program.to_string(), expected, "input: {:?}", input);
    }
}

#[test]
fn test_render_is_a_fixed_point() {
    let inputs = [
        "a + b * c + d / e - f",
        "-a * b",
        "!-a",
        "5 > 4 == 3 < 4",
        "3 + 4; -5 * 5",
        "let x = 1 + 2 * 3;",
        "return !true == false;",
    ];

    for input in inputs {
        let first = parse_ok(input).to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(first, second, "input: {:?}", input);
    }
}

#[test]
fn test_semicolon_optional_after_expression() {
    let program = parse_ok("x + 1");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "(x + 1)");
}

#[test]
fn test_empty_program() {
    let program = parse_ok("");

    assert!(program.statements.is_empty());
    assert_eq!(program.token_literal(), "");
}

#[test]
fn test_let_errors() {
    let parsed = parse_input("let x 5;\nlet = 10;\nlet 838383;");

    assert_eq!(
        parsed.error_messages(),
        vec![
            "expected next token to be =, got INT instead",
            "expected next token to be IDENT, got = instead",
            "expected next token to be IDENT, got INT instead",
        ]
    );
    assert!(parsed.program.statements.is_empty());
}

#[test]
fn test_recovery_after_malformed_let() {
    let parsed = parse_input("let x 5; let y = 10; return y;");

    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(parsed.program.to_string(), "let y = 10;return y;");
}

#[test]
fn test_missing_semicolon_after_let() {
    let parsed = parse_input("let x = 5");

    assert_eq!(
        parsed.error_messages(),
        vec!["expected next token to be ;, got EOF instead"]
    );
}

#[test]
fn test_no_prefix_parse_fn() {
    let parsed = parse_input("let x = ; 5 + 5;");

    assert_eq!(parsed.error_messages(), vec!["no prefix parse function for ; found"]);
    assert_eq!(parsed.program.to_string(), "(5 + 5)");
}

#[test]
fn test_every_error_is_reported() {
    let parsed = parse_input("return ;\n*5;\nlet a = 1;\nlet b 2;");

    assert_eq!(
        parsed.error_messages(),
        vec![
            "no prefix parse function for ; found",
            "no prefix parse function for * found",
            "expected next token to be =, got INT instead",
        ]
    );
    assert_eq!(parsed.program.to_string(), "let a = 1;");
}

#[test]
fn test_illegal_token() {
    let parsed = parse_input("let a = @;");

    assert_eq!(parsed.error_messages(), vec!["no prefix parse function for ILLEGAL found"]);
}

#[test]
fn test_unclosed_group() {
    let parsed = parse_input("(1 + 2;");

    assert_eq!(
        parsed.error_messages(),
        vec!["expected next token to be ), got ; instead"]
    );
}

#[test]
fn test_integer_overflow() {
    let parsed = parse_input("99999999999999999999;");

    assert_eq!(
        parsed.error_messages(),
        vec!["could not parse 99999999999999999999 as integer"]
    );
}

#[test]
fn test_error_positions() {
    let parsed = parse_input("let x 5;");

    // Points at the unexpected token, not the statement start
    assert_eq!(parsed.errors()[0].get_position().0, 6);
    assert_eq!(parsed.errors()[0].get_position().1.as_str(), "test.monkey");
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = tokenize("let x = 1 + 2;".to_string(), None);
    let parsed = parse(TokenStream::new(tokens));

    assert!(parsed.is_ok());
    assert_eq!(parsed.program.to_string(), "let x = (1 + 2);");
}

#[test]
fn test_into_result() {
    assert!(parse_input("let x = 1;").into_result().is_ok());

    let errors = parse_input("let 1;").into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_deep_prefix_chain_is_reported() {
    let parsed = parse_input(&format!("{}5;", "-".repeat(1_000)));

    assert_eq!(
        parsed.error_messages(),
        vec!["expression nested deeper than 128 levels"]
    );
    assert!(parsed.program.statements.is_empty());
}

#[test]
fn test_deep_grouping_is_reported_and_recovered() {
    let source = format!("{}5{}; let after = 1;", "(".repeat(1_000), ")".repeat(1_000));
    let parsed = parse_input(&source);

    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(parsed.errors()[0].get_error_name(), "NestingTooDeep");
    assert_eq!(parsed.program.to_string(), "let after = 1;");
}

#[test]
fn test_nesting_at_limit_parses() {
    // The statement's own expression takes one level
    let levels = MAX_NESTING_DEPTH - 1;
    let source = format!("{}5{};", "(".repeat(levels), ")".repeat(levels));

    assert_eq!(parse_ok(&source).to_string(), "5");
    assert_eq!(parse_ok(&format!("{}5", "!".repeat(levels))).statements.len(), 1);

    let parsed = parse_input(&format!("{}5", "!".repeat(levels + 1)));
    assert_eq!(parsed.errors()[0].get_error_name(), "NestingTooDeep");
}
