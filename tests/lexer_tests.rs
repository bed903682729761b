// tests/lexer_tests.rs

use cohort_rule::ast::{Token, TokenKind};
use cohort_rule::error::{LexError, LexErrorKind};
use cohort_rule::lexer::{Lexer, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(source: &str) -> Token {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.len(), 2, "expected one token plus Eof for {:?}", source);
    tokens.into_iter().next().unwrap()
}

fn lex_err(source: &str) -> LexError {
    tokenize(source).unwrap_err()
}

// ============================================================================
// Punctuation and Operators
// ============================================================================

#[test]
fn test_punctuation() {
    let test_cases = vec![
        ("(", TokenKind::ParOpen),
        (")", TokenKind::ParClose),
        (",", TokenKind::Comma),
        ("!", TokenKind::Not),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap().kind, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn test_comparison_operators() {
    for op in ["=", "==", "!=", "<", "<=", ">", ">=", "contains"] {
        let token = single(op);
        assert_eq!(token.kind, TokenKind::Operator, "Failed for input: {}", op);
        assert_eq!(token.text, op);
        assert_eq!(token.length, op.chars().count());
    }
}

#[test]
fn test_longest_operator_wins() {
    let tokens = tokenize("<=>=!=").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["<=", ">=", "!=", ""]);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(single("42").text, "42");
    assert_eq!(single("3.14").text, "3.14");
    assert_eq!(single("-7").text, "-7");
    assert_eq!(single("-0.5").text, "-0.5");
}

#[test]
fn test_overlong_numbers_are_rejected() {
    let digits = format!("1{}", "0".repeat(400));
    let err = lex_err(&format!("{{a}} = {}", digits));
    assert_eq!(err.kind, LexErrorKind::InvalidNumber(digits));
    assert_eq!(err.offset, 6);
    assert_eq!(err.found, '1');

    let negative = format!("-{}", "9".repeat(400));
    let err = lex_err(&negative);
    assert_eq!(err.kind, LexErrorKind::InvalidNumber(negative));
    assert_eq!(err.found, '-');

    // Largest finite values still lex.
    let max = format!("{}", f64::MAX);
    assert_eq!(single(&max).text, max);
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let err = lex_err("1.");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
    assert_eq!(err.offset, 1);
    assert_eq!(err.found, '.');
}

#[test]
fn test_strings_both_quotes() {
    let token = single("'female'");
    assert_eq!(token, Token::new(TokenKind::String, "female", 0, 8));

    let token = single("\"it's\"");
    assert_eq!(token.text, "it's");
}

#[test]
fn test_string_escapes() {
    let token = single(r"'a\'b\\c\nd\te'");
    assert_eq!(token.text, "a'b\\c\nd\te");
}

#[test]
fn test_empty_string() {
    let token = single("''");
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "");
    assert_eq!(token.length, 2);
}

#[test]
fn test_booleans_and_null() {
    assert_eq!(
        kinds("true false null"),
        vec![TokenKind::Boolean, TokenKind::Boolean, TokenKind::Null, TokenKind::Eof]
    );
}

// ============================================================================
// Variables and Functions
// ============================================================================

#[test]
fn test_variable_paths() {
    let token = single("{profile.sexAtBirth}");
    assert_eq!(token, Token::new(TokenKind::Variable, "profile.sexAtBirth", 0, 20));

    assert_eq!(single("{age}").text, "age");
    assert_eq!(single("{task.hd-consent.status}").text, "task.hd-consent.status");
}

#[test]
fn test_function_name_requires_paren() {
    assert_eq!(
        kinds("include({family.shortcode})"),
        vec![
            TokenKind::FunctionName,
            TokenKind::ParOpen,
            TokenKind::Variable,
            TokenKind::ParClose,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_before_paren_stays_keyword() {
    assert_eq!(
        kinds("and(or("),
        vec![TokenKind::And, TokenKind::ParOpen, TokenKind::Or, TokenKind::ParOpen, TokenKind::Eof]
    );
}

#[test]
fn test_whitespace_is_discarded() {
    assert_eq!(
        kinds("  {a}\t=\n1  "),
        vec![TokenKind::Variable, TokenKind::Operator, TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn test_eof_always_terminates() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(tokenize("   ").unwrap(), vec![Token::eof(3)]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let err = lex_err("{age} ~ 3");
    assert_eq!(err, LexError::new(LexErrorKind::UnexpectedCharacter, 6, '~'));
}

#[test]
fn test_unterminated_string() {
    let err = lex_err("{name} = 'abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.offset, 9);
    assert_eq!(err.found, '\'');
}

#[test]
fn test_invalid_escape() {
    let err = lex_err(r"'a\q'");
    assert_eq!(err, LexError::new(LexErrorKind::InvalidEscape, 2, 'q'));
}

#[test]
fn test_invalid_variable_paths() {
    for source in ["{}", "{a..b}", "{.a}", "{a.}", "{a b}", "{a{b}"] {
        let err = lex_err(source);
        assert!(
            matches!(err.kind, LexErrorKind::InvalidVariable(_)),
            "Failed for input: {} ({:?})",
            source,
            err
        );
        assert_eq!(err.offset, 0);
    }
}

#[test]
fn test_unterminated_variable() {
    let err = lex_err("{age >= 3");
    assert_eq!(err.kind, LexErrorKind::UnterminatedVariable);
}

#[test]
fn test_bare_identifier() {
    let err = lex_err("age = 3");
    assert_eq!(err.kind, LexErrorKind::BareIdentifier("age".to_string()));
    assert_eq!(err.offset, 0);
    assert_eq!(err.found, 'a');
}

#[test]
fn test_function_name_with_space_before_paren() {
    let err = lex_err("include ({a})");
    assert_eq!(err.kind, LexErrorKind::BareIdentifier("include".to_string()));
}

#[test]
fn test_uppercase_keywords_are_not_keywords() {
    let err = lex_err("{a} = 1 AND {b} = 2");
    assert_eq!(err.kind, LexErrorKind::BareIdentifier("AND".to_string()));
    assert_eq!(err.offset, 8);
}

#[test]
fn test_error_message_mentions_offset() {
    let message = lex_err("{a} = #").to_string();
    assert!(message.contains("offset 6"), "{}", message);
    assert!(message.contains("'#'"), "{}", message);
}
