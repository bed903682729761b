use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Token, TokenKind};
use crate::error::{LexError, LexErrorKind};

/// Dot-separated path segments, e.g. `profile.sexAtBirth` or `task.hd-consent.status`.
static VARIABLE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)*$").expect("variable path pattern is valid")
});

/// Tokenizes a whole rule, ending the stream with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!("lexing failed: {}", e);
                return Err(e);
            }
        };
        tracing::trace!(kind = ?token.kind, text = %token.text, offset = token.offset, "token");

        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            break;
        }
    }

    tracing::debug!("tokenized {} tokens", tokens.len());
    Ok(tokens)
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Builds a token spanning from `start` to the current position.
    fn token_from(&self, kind: TokenKind, text: impl Into<String>, start: usize) -> Token {
        Token::new(kind, text, start, self.position - start)
    }

    /// Consumes a lexeme whose spelling is known up front.
    fn fixed(&mut self, kind: TokenKind, lexeme: &str) -> Token {
        let start = self.position;
        self.position += lexeme.chars().count();
        self.token_from(kind, lexeme, start)
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(self.token_from(TokenKind::String, result, start));
                }
                '\\' => {
                    let escape_at = self.position;
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(LexError::new(LexErrorKind::InvalidEscape, escape_at, other));
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new(LexErrorKind::UnterminatedString, start, quote))
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        let mut is_float = false;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Overlong literals parse to infinity, which has no source form.
        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(self.token_from(TokenKind::Number, number, start)),
            _ => {
                let found = self.input.get(start).copied().unwrap_or('-');
                Err(LexError::new(LexErrorKind::InvalidNumber(number), start, found))
            }
        }
    }

    fn read_variable(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut path = String::new();
        self.advance(); // '{'

        loop {
            match self.current_char() {
                Some('}') => {
                    self.advance();
                    break;
                }
                Some(ch) => {
                    path.push(ch);
                    self.advance();
                }
                None => {
                    return Err(LexError::new(LexErrorKind::UnterminatedVariable, start, '{'));
                }
            }
        }

        if !VARIABLE_PATH.is_match(&path) {
            return Err(LexError::new(LexErrorKind::InvalidVariable(path), start, '{'));
        }
        Ok(self.token_from(TokenKind::Variable, path, start))
    }

    fn read_word(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let word = self.read_identifier();

        let kind = match word.as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            "contains" => TokenKind::Operator,
            _ if self.current_char() == Some('(') => TokenKind::FunctionName,
            _ => {
                let first = word.chars().next().unwrap_or('_');
                return Err(LexError::new(LexErrorKind::BareIdentifier(word), start, first));
            }
        };
        Ok(self.token_from(kind, word, start))
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::eof(self.position),
            Some('(') => self.fixed(TokenKind::ParOpen, "("),
            Some(')') => self.fixed(TokenKind::ParClose, ")"),
            Some(',') => self.fixed(TokenKind::Comma, ","),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.fixed(TokenKind::Operator, "==")
                } else {
                    self.fixed(TokenKind::Operator, "=")
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.fixed(TokenKind::Operator, "!=")
                } else {
                    self.fixed(TokenKind::Not, "!")
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.fixed(TokenKind::Operator, "<=")
                } else {
                    self.fixed(TokenKind::Operator, "<")
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.fixed(TokenKind::Operator, ">=")
                } else {
                    self.fixed(TokenKind::Operator, ">")
                }
            }
            Some('{') => self.read_variable()?,
            Some(quote @ ('"' | '\'')) => self.read_string(quote)?,
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_word()?,
            Some(ch) => {
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter,
                    self.position,
                    ch,
                ));
            }
        };
        Ok(token)
    }
}
