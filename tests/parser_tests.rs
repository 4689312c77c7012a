// tests/parser_tests.rs

use std::sync::Arc;

use treexl::ast::{Expr, ExprRef, Token, TokenKind};
use treexl::lexer::Lexer;
use treexl::parser::{MAX_DEPTH, ParseError, Parser};
use treexl::{Error, parse};

fn parse_tokens(input: &str) -> Result<ExprRef, ParseError> {
    let tokens = Lexer::new(input).scan().unwrap();
    Parser::new(tokens).parse()
}

fn parse_error(input: &str) -> String {
    match parse(input) {
        Err(Error::Parse(e)) => e.to_string(),
        other => panic!("Expected parse error for {:?}, got {:?}", input, other),
    }
}

fn op(kind: TokenKind, lexeme: &str) -> Token {
    Token::new(kind, lexeme)
}

fn lit(value: i64) -> ExprRef {
    Expr::literal(value)
}

// ============================================================================
// Literals and primaries
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(parse("1").unwrap(), Expr::literal(1));
    assert_eq!(parse("'string'").unwrap(), Expr::literal("string"));
    assert_eq!(parse("''").unwrap(), Expr::literal(""));
    assert_eq!(parse("'1'").unwrap(), Expr::literal("1"));
    assert_eq!(parse("null").unwrap(), Expr::null());
    assert_eq!(parse("true").unwrap(), Expr::literal(true));
    assert_eq!(parse("false").unwrap(), Expr::literal(false));
}

#[test]
fn test_decimal_literal() {
    let expected: rust_decimal::Decimal = "1.0".parse().unwrap();
    assert_eq!(parse("1.0").unwrap(), Expr::literal(expected));
}

#[test]
fn test_parameters() {
    assert_eq!(parse(":A").unwrap(), Expr::parameter("A"));
    assert_eq!(
        parse(":A = A").unwrap(),
        Expr::binary(
            Expr::parameter("A"),
            op(TokenKind::Equal, "="),
            Expr::identifier("A")
        )
    );
}

#[test]
fn test_dotted_identifiers() {
    assert_eq!(
        parse("a.b.C = x.Y").unwrap(),
        Expr::binary(
            Expr::identifier("a.b.C"),
            op(TokenKind::Equal, "="),
            Expr::identifier("x.Y")
        )
    );
}

#[test]
fn test_parser_directly_from_tokens() {
    assert_eq!(parse_tokens("X").unwrap(), Expr::identifier("X"));
}

#[test]
fn test_parser_appends_missing_eof() {
    let tokens = vec![Token::new(TokenKind::Identifier, "x")];
    assert_eq!(Parser::new(tokens).parse().unwrap(), Expr::identifier("x"));
}

// ============================================================================
// Unary
// ============================================================================

#[test]
fn test_unary() {
    assert_eq!(
        parse("-1").unwrap(),
        Expr::unary(op(TokenKind::Minus, "-"), lit(1))
    );
    assert_eq!(
        parse("not true").unwrap(),
        Expr::unary(Token::keyword(TokenKind::Not), Expr::literal(true))
    );
}

#[test]
fn test_unary_is_right_associative() {
    assert_eq!(
        parse("not not true").unwrap(),
        Expr::unary(
            Token::keyword(TokenKind::Not),
            Expr::unary(Token::keyword(TokenKind::Not), Expr::literal(true))
        )
    );
}

#[test]
fn test_unary_binds_tighter_than_comparison() {
    assert_eq!(
        parse("-a > 1").unwrap(),
        Expr::binary(
            Expr::unary(op(TokenKind::Minus, "-"), Expr::identifier("a")),
            op(TokenKind::Greater, ">"),
            lit(1)
        )
    );
}

// ============================================================================
// Binary and precedence
// ============================================================================

#[test]
fn test_binary_operators() {
    let cases = [
        ("1 = '1'", TokenKind::Equal, "="),
        ("1 <> '1'", TokenKind::Different, "<>"),
        ("1 > '1'", TokenKind::Greater, ">"),
        ("1 >= '1'", TokenKind::GreaterEqual, ">="),
        ("1 < '1'", TokenKind::Less, "<"),
        ("1 <= '1'", TokenKind::LessEqual, "<="),
        ("1 and '1'", TokenKind::And, "and"),
        ("1 or '1'", TokenKind::Or, "or"),
    ];

    for (input, kind, lexeme) in cases {
        assert_eq!(
            parse(input).unwrap(),
            Expr::binary(lit(1), op(kind, lexeme), Expr::literal("1")),
            "input: {}",
            input
        );
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse("1 or 2 and 3").unwrap(),
        Expr::binary(
            lit(1),
            Token::keyword(TokenKind::Or),
            Expr::binary(lit(2), Token::keyword(TokenKind::And), lit(3))
        )
    );
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    assert_eq!(
        parse("a > 1 = b").unwrap(),
        Expr::binary(
            Expr::binary(Expr::identifier("a"), op(TokenKind::Greater, ">"), lit(1)),
            op(TokenKind::Equal, "="),
            Expr::identifier("b")
        )
    );
}

#[test]
fn test_left_associative() {
    assert_eq!(
        parse("a or b or c").unwrap(),
        Expr::binary(
            Expr::binary(
                Expr::identifier("a"),
                Token::keyword(TokenKind::Or),
                Expr::identifier("b")
            ),
            Token::keyword(TokenKind::Or),
            Expr::identifier("c")
        )
    );
}

#[test]
fn test_like() {
    assert_eq!(
        parse("X like '%x%'").unwrap(),
        Expr::binary(
            Expr::identifier("X"),
            Token::keyword(TokenKind::Like),
            Expr::literal("%x%")
        )
    );
}

#[test]
fn test_is_not_null() {
    assert_eq!(
        parse("X is not null").unwrap(),
        Expr::binary(
            Expr::identifier("X"),
            Token::keyword(TokenKind::Is),
            Expr::unary(Token::keyword(TokenKind::Not), Expr::null())
        )
    );
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_grouping() {
    assert_eq!(parse("(1)").unwrap(), Expr::grouping(lit(1)));
    assert_eq!(
        parse("(1 or 2) and 3").unwrap(),
        Expr::binary(
            Expr::grouping(Expr::binary(lit(1), Token::keyword(TokenKind::Or), lit(2))),
            Token::keyword(TokenKind::And),
            lit(3)
        )
    );
}

// ============================================================================
// in
// ============================================================================

#[test]
fn test_in_list() {
    assert_eq!(
        parse("A in (1, 2, 3)").unwrap(),
        Expr::binary(
            Expr::identifier("A"),
            Token::keyword(TokenKind::In),
            Expr::list(vec![lit(1), lit(2), lit(3)])
        )
    );
}

#[test]
fn test_in_range() {
    assert_eq!(
        parse("A in 1..3").unwrap(),
        Expr::binary(
            Expr::identifier("A"),
            Token::keyword(TokenKind::In),
            Expr::range(lit(1), lit(3))
        )
    );
}

#[test]
fn test_in_followed_by_and() {
    assert_eq!(
        parse("A in (1) and 1 = 1").unwrap(),
        Expr::binary(
            parse("A in (1)").unwrap(),
            Token::keyword(TokenKind::And),
            parse("1 = 1").unwrap()
        )
    );
}

#[test]
fn test_in_without_list_or_range() {
    assert_eq!(
        parse_error("A in 1, 2, 3"),
        "Parse error (line: 1) at ',': Expected '(' or range '<start>..<end>' after 'in' expression."
    );
}

#[test]
fn test_in_empty_list() {
    assert_eq!(
        parse_error("A in ()"),
        "Parse error (line: 1) at ')': Expect expression."
    );
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_call() {
    assert_eq!(
        parse("uppercase('x')").unwrap(),
        Expr::call("uppercase", vec![Expr::literal("x")])
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(parse("now()").unwrap(), Expr::call("now", vec![]));
}

#[test]
fn test_call_with_dotted_name() {
    assert_eq!(
        parse("fn.lower(name, 2)").unwrap(),
        Expr::call("fn.lower", vec![Expr::identifier("name"), lit(2)])
    );
}

#[test]
fn test_unclosed_call() {
    assert_eq!(
        parse_error("f(a"),
        "Parse error (line: 1) at EOF: Expect ')' after arguments."
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_between_is_rejected() {
    assert_eq!(
        parse_error("a between 5 and 7"),
        "Parse error (line: 1) at 'between': 'between' operator not supported. Use 'in' with a range instead ('<expr> in <start>..<end>')."
    );
}

#[test]
fn test_keyword_casing_hint() {
    assert_eq!(
        parse_error("(1 < 2 AND '1' = '1')"),
        "Parse error (line: 1) at 'AND': Expect ')' after expression. Invalid keyword 'AND': keywords are case sensitive (lowercase only). Use 'and' instead."
    );
}

#[test]
fn test_trailing_tokens() {
    assert_eq!(
        parse_error("a = 1 b"),
        "Parse error (line: 1) at 'b': Expect end of expression."
    );
}

#[test]
fn test_dangling_dot() {
    assert_eq!(
        parse_error("a."),
        "Parse error (line: 1) at '.': Expect end of expression."
    );
}

#[test]
fn test_missing_operand() {
    assert_eq!(
        parse_error("a ="),
        "Parse error (line: 1) at EOF: Expect expression."
    );
}

#[test]
fn test_unclosed_grouping() {
    let err = parse_tokens("(a = 1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.near, None);
    assert_eq!(err.message, "Expect ')' after expression.");
}

#[test]
fn test_blank_expression() {
    assert_eq!(
        parse_error(" \n\t"),
        "Parse error (line: 1) at EOF: Expression is blank."
    );
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let err = parse("1 != 2").unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
    assert_eq!(err.to_string(), "Lex error (line: 1): Unexpected character '!'.");
}

#[test]
fn test_deep_grouping_is_rejected() {
    let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert_eq!(
        parse_error(&input),
        "Parse error (line: 1) at '(': Expression nested too deeply."
    );
}

#[test]
fn test_long_not_chain_is_rejected() {
    let input = format!("{}true", "not ".repeat(100_000));
    assert_eq!(
        parse_error(&input),
        "Parse error (line: 1) at 'not': Expression nested too deeply."
    );
}

#[test]
fn test_deep_call_arguments_are_rejected() {
    let input = format!("{}x{}", "f(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(parse(&input), Err(Error::Parse(_))));
}

#[test]
fn test_nesting_within_limit() {
    let depth = MAX_DEPTH / 2;
    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let mut expected = lit(1);
    for _ in 0..depth {
        expected = Expr::grouping(expected);
    }
    assert_eq!(parse(&input).unwrap(), expected);
}

// ============================================================================
// Trees are shared, immutable values
// ============================================================================

#[test]
fn test_clone_shares_tree() {
    let tree = parse("a = 1").unwrap();
    let copy = tree.clone();
    assert!(Arc::ptr_eq(&tree, &copy));
}
