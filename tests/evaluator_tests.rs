use icalc::ast::Expr;
use icalc::error::ErrorKind;
use icalc::lexer::{Lexer, Token, TokenType};
use icalc::parser::parse_line;
use icalc::{evaluate, evaluate_line};

fn eval(source: &str) -> i64 {
    match evaluate_line(source) {
        Ok(Some(value)) => value,
        Ok(None) => panic!("'{}' produced no value", source),
        Err(error) => panic!("'{}' failed: {} ({})", source, error.message, error.kind),
    }
}

fn eval_err(source: &str) -> ErrorKind {
    match evaluate_line(source) {
        Ok(value) => panic!("'{}' should fail, got {:?}", source, value),
        Err(error) => error.kind,
    }
}

#[test]
fn literal_evaluates_to_itself() {
    for n in [0_i64, 1, 7, 42, 1000, 123456789, i64::MAX] {
        assert_eq!(eval(&n.to_string()), n);
    }
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval("8-3-2"), 3);
    assert_eq!(eval("100 / 10 / 5"), 2);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("2+3*4"), 14);
    assert_eq!(eval("(2+3)*4"), 20);
    assert_eq!(eval("2*3+4*5"), 26);
}

#[test]
fn division_floors_toward_negative_infinity() {
    assert_eq!(eval("7/2"), 3);
    assert_eq!(eval("-7/2"), -4);
    assert_eq!(eval("7/-2"), -4);
    assert_eq!(eval("-7/-2"), 3);
    assert_eq!(eval("-8/2"), -4);
    assert_eq!(eval("0/-3"), 0);
}

#[test]
fn division_by_zero_is_arithmetic_error() {
    assert_eq!(eval_err("5/0"), ErrorKind::Arithmetic);
    assert_eq!(eval_err("1/(2-2)"), ErrorKind::Arithmetic);

    let error = evaluate_line("5/0").unwrap_err();
    assert_eq!(error.message, "division by zero");
}

#[test]
fn overflow_is_arithmetic_error() {
    assert_eq!(eval_err("9223372036854775807 + 1"), ErrorKind::Arithmetic);
    assert_eq!(eval_err("-9223372036854775807 - 2"), ErrorKind::Arithmetic);
    assert_eq!(eval_err("4611686018427387904 * 2"), ErrorKind::Arithmetic);
    assert_eq!(eval_err("(-9223372036854775807 - 1) / -1"), ErrorKind::Arithmetic);
    assert_eq!(eval_err("-(-9223372036854775807 - 1)"), ErrorKind::Arithmetic);
}

#[test]
fn unary_operators_chain() {
    assert_eq!(eval("--5"), 5);
    assert_eq!(eval("-+5"), -5);
    assert_eq!(eval("+-+-5"), 5);
    assert_eq!(eval("1--2"), 3);
    assert_eq!(eval("-(2+3)*2"), -10);
}

#[test]
fn malformed_lines_report_their_stage() {
    assert_eq!(eval_err("1 2"), ErrorKind::Syntax);
    assert_eq!(eval_err("(1+2"), ErrorKind::Syntax);
    assert_eq!(eval_err("@"), ErrorKind::Lexical);
    assert_eq!(eval_err("1 + 2 @"), ErrorKind::Lexical);
}

#[test]
fn empty_and_blank_lines_yield_nothing() {
    assert_eq!(evaluate_line(""), Ok(None));
    assert_eq!(evaluate_line("  \t "), Ok(None));
}

#[test]
fn evaluation_is_repeatable() {
    let line = "(17 - 4) * -3 / 2";
    let first = evaluate_line(line);
    let second = evaluate_line(line);
    assert_eq!(first, second);
    assert_eq!(first, Ok(Some(-20)));
}

#[test]
fn parser_builds_left_leaning_tree() {
    let ast = parse_line("8-3-2").unwrap().unwrap();
    let expected = Expr::subtract(
        Expr::subtract(Expr::Literal(8), Expr::Literal(3)),
        Expr::Literal(2),
    );
    assert_eq!(ast, expected);
    assert_eq!(ast.to_string(), "((8-3)-2)");
}

#[test]
fn ast_display_is_fully_parenthesized() {
    let ast = parse_line("1+2*3").unwrap().unwrap();
    assert_eq!(ast.to_string(), "(1+(2*3))");

    let ast = parse_line("-(+4/2)").unwrap().unwrap();
    assert_eq!(ast.to_string(), "(-((+4)/2))");
}

#[test]
fn evaluate_walks_hand_built_tree() {
    let tree = Expr::negative(Expr::divide(Expr::Literal(-7), Expr::positive(Expr::Literal(2))));
    assert_eq!(evaluate(&tree), Ok(4));
}

#[test]
fn lexer_produces_typed_tokens() {
    let tokens = Lexer::tokenize(" 12+(3 *4)/-5 ").unwrap();
    let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::Integer,
            TokenType::Plus,
            TokenType::LeftParen,
            TokenType::Integer,
            TokenType::Star,
            TokenType::Integer,
            TokenType::RightParen,
            TokenType::Slash,
            TokenType::Minus,
            TokenType::Integer,
        ]
    );

    let values: Vec<i64> = tokens.iter().filter_map(|t| t.value).collect();
    assert_eq!(values, vec![12, 3, 4, 5]);
    assert_eq!(tokens[0].span.start, 1);
    assert_eq!(tokens[0].span.end, 3);
}

#[test]
fn lexer_stops_after_first_error() {
    let mut lexer = Lexer::new("1 # 2");
    assert!(matches!(
        lexer.next(),
        Some(Ok(Token { token_type: TokenType::Integer, value: Some(1), .. }))
    ));

    let error = lexer.next().unwrap().unwrap_err();
    assert_eq!(error.kind, ErrorKind::Lexical);
    assert_eq!(error.span.start, 2);
    assert!(lexer.next().is_none());
}

#[test]
fn lexer_is_lazy() {
    // The bad character is never reached when only the first token is pulled.
    let mut lexer = Lexer::new("7 ?");
    let first = lexer.next().unwrap().unwrap();
    assert_eq!(first.value, Some(7));
    assert_eq!(first.to_string(), "INTEGER:7");
}
