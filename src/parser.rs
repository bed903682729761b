use std::mem;

use crate::{
    ast::{ComparisonOp, Expr, FunctionCall, Term, Token, TokenKind},
    error::{ParseError, ParseErrorKind, RuleError},
    lexer::tokenize,
};

/// Tuning knobs for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of parentheses, negations and function calls.
    pub max_depth: usize,
}

impl ParserOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses rule text with default options.
///
/// # Examples
///
/// ```
/// use cohort_rule::{parse, Expr};
///
/// let expr = parse("{enrollee.consented} = true").unwrap();
/// assert!(matches!(expr, Expr::Comparison { .. }));
/// ```
pub fn parse(source: &str) -> Result<Expr, RuleError> {
    parse_with_options(source, &ParserOptions::default())
}

/// Parses rule text, failing on the first lexical or syntax error.
pub fn parse_with_options(source: &str, options: &ParserOptions) -> Result<Expr, RuleError> {
    let tokens = tokenize(source)?;
    let expr = Parser::with_options(tokens, *options).parse()?;
    Ok(expr)
}

/// Recursive-descent parser over a token stream.
///
/// `and`/`or` chains are built in loops, so only grouping, negation and
/// function-call nesting grow the call stack, and those are capped by
/// [`ParserOptions::max_depth`].
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    options: ParserOptions,
    depth: usize,
    deepest: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let end = tokens.last().map(|t| t.offset + t.length).unwrap_or(0);
            tokens.push(Token::eof(end));
        }
        Parser {
            tokens,
            position: 0,
            options,
            depth: 0,
            deepest: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Takes the current token and moves on. `Eof` is never consumed.
    fn advance(&mut self) -> Token {
        let current = &self.tokens[self.position];
        if current.is(TokenKind::Eof) {
            return current.clone();
        }
        let placeholder = Token::eof(current.offset);
        let token = mem::replace(&mut self.tokens[self.position], placeholder);
        self.position += 1;
        token
    }

    fn error(&self, kind: ParseErrorKind, expected: &[TokenKind]) -> ParseError {
        let token = self.current();
        ParseError {
            offset: token.offset,
            expected: expected.to_vec(),
            found: token.kind,
            text: token.text.clone(),
            kind,
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        self.error(ParseErrorKind::UnexpectedToken, expected)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(
                ParseErrorKind::DepthExceeded {
                    limit: self.options.max_depth,
                },
                &[],
            ));
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn close_paren(&mut self, open_offset: usize, expected: &[TokenKind]) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::ParClose => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Err(self.error(
                ParseErrorKind::UnclosedParen { open_offset },
                &[TokenKind::ParClose],
            )),
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Parses the whole stream into a single expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let result = self.parse_rule();
        match &result {
            Ok(_) => tracing::debug!(
                "parsed rule from {} tokens, nesting depth {}",
                self.tokens.len(),
                self.deepest
            ),
            Err(e) => tracing::debug!("parse failed: {}", e),
        }
        result
    }

    fn parse_rule(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Eof) {
            return Err(self.error(ParseErrorKind::EmptyInput, TokenKind::ATOM_START));
        }

        let expr = self.parse_or()?;

        if !self.check(TokenKind::Eof) {
            return Err(self.error(
                ParseErrorKind::TrailingTokens,
                &[TokenKind::And, TokenKind::Or, TokenKind::Eof],
            ));
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::or(left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_atom()?;

        while self.check(TokenKind::And) {
            self.advance();
            let right = self.parse_atom()?;
            left = Expr::and(left, right);
        }
        Ok(left)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::ParOpen => {
                let open_offset = self.current().offset;
                self.enter()?;
                self.advance();
                let inner = self.parse_or()?;
                self.close_paren(open_offset, &[TokenKind::And, TokenKind::Or, TokenKind::ParClose])?;
                self.leave();
                Ok(Expr::grouped(inner))
            }
            TokenKind::Not => {
                self.enter()?;
                self.advance();
                let inner = self.parse_atom()?;
                self.leave();
                Ok(Expr::not(inner))
            }
            // A call followed by an operator is the left side of a comparison;
            // otherwise it stands alone as a predicate.
            TokenKind::FunctionName => {
                let call = self.parse_function_call()?;
                if self.check(TokenKind::Operator) {
                    self.parse_comparison(Term::Function(call))
                } else {
                    Ok(Expr::Predicate(call))
                }
            }
            kind if TokenKind::TERM_START.contains(&kind) => {
                let left = self.parse_term()?;
                self.parse_comparison(left)
            }
            _ => Err(self.unexpected(TokenKind::ATOM_START)),
        }
    }

    fn parse_comparison(&mut self, left: Term) -> Result<Expr, ParseError> {
        if !self.check(TokenKind::Operator) {
            return Err(self.unexpected(&[TokenKind::Operator]));
        }
        let op = ComparisonOp::from_lexeme(&self.current().text)
            .ok_or_else(|| self.unexpected(&[TokenKind::Operator]))?;
        self.advance();

        let right = self.parse_term()?;
        Ok(Expr::comparison(left, op, right))
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        match self.current().kind {
            TokenKind::Number => {
                let value = self
                    .current()
                    .text
                    .parse::<f64>()
                    .map_err(|_| self.unexpected(TokenKind::TERM_START))?;
                self.advance();
                Ok(Term::Number(value))
            }
            TokenKind::String => Ok(Term::String(self.advance().text)),
            TokenKind::Variable => Ok(Term::Variable(self.advance().text)),
            TokenKind::Boolean => Ok(Term::Boolean(self.advance().text == "true")),
            TokenKind::Null => {
                self.advance();
                Ok(Term::Null)
            }
            TokenKind::FunctionName => Ok(Term::Function(self.parse_function_call()?)),
            _ => Err(self.unexpected(TokenKind::TERM_START)),
        }
    }

    fn parse_function_call(&mut self) -> Result<FunctionCall, ParseError> {
        let name = self.advance().text;

        if !self.check(TokenKind::ParOpen) {
            return Err(self.unexpected(&[TokenKind::ParOpen]));
        }
        let open_offset = self.current().offset;
        self.enter()?;
        self.advance();

        if self.check(TokenKind::ParClose) {
            return Err(self.error(
                ParseErrorKind::EmptyArguments { function: name },
                TokenKind::TERM_START,
            ));
        }

        let first = self.parse_term()?;
        let mut rest = Vec::new();
        while self.check(TokenKind::Comma) {
            self.advance();
            rest.push(self.parse_term()?);
        }

        self.close_paren(open_offset, &[TokenKind::Comma, TokenKind::ParClose])?;
        self.leave();

        Ok(FunctionCall::with_args(name, first, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Expr {
        parse(source).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        match parse(source) {
            Err(RuleError::Parse(e)) => e,
            other => panic!("expected parse error for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_single_comparison() {
        assert_eq!(
            parse_ok("{age} >= 18"),
            Expr::comparison(Term::variable("age"), ComparisonOp::GreaterEqual, Term::Number(18.0))
        );
    }

    #[test]
    fn test_double_equals_is_equal() {
        assert_eq!(parse_ok("{a} == 1"), parse_ok("{a} = 1"));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(parse_err("").kind, ParseErrorKind::EmptyInput);
        assert_eq!(parse_err("   \n\t").kind, ParseErrorKind::EmptyInput);
    }

    #[test]
    fn test_missing_right_term() {
        let err = parse_err("{a} =");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::Eof);
        assert_eq!(err.expected, TokenKind::TERM_START);
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        let options = ParserOptions::default().with_max_depth(2);
        assert!(parse_with_options("(({a} = 1))", &options).is_ok());

        match parse_with_options("((({a} = 1)))", &options) {
            Err(RuleError::Parse(e)) => {
                assert_eq!(e.kind, ParseErrorKind::DepthExceeded { limit: 2 });
                assert_eq!(e.offset, 2);
            }
            other => panic!("expected depth error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_appends_missing_eof() {
        let tokens = vec![
            Token::new(TokenKind::Variable, "a", 0, 3),
            Token::new(TokenKind::Operator, "=", 4, 1),
            Token::new(TokenKind::Boolean, "true", 6, 4),
        ];
        let expr = Parser::new(tokens).parse().unwrap();
        assert_eq!(
            expr,
            Expr::comparison(Term::variable("a"), ComparisonOp::Equal, Term::Boolean(true))
        );
    }
}
