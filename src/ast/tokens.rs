use std::fmt;

/// The kind of a lexical token.
///
/// Whitespace is consumed by the lexer and never has a kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Argument separator
    Comma,

    /// Numeric literal
    ///
    /// # Examples
    /// ```text
    /// 18
    /// 2.5
    /// -1
    /// ```
    Number,

    /// Quoted string literal, single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'female'
    /// "it's"
    /// ```
    String,

    /// Braced variable path
    ///
    /// # Examples
    /// ```text
    /// {age}
    /// {profile.sexAtBirth}
    /// {task.demographics.status}
    /// ```
    Variable,

    /// `true` or `false`
    Boolean,

    /// `null`
    Null,

    /// Comparison operator
    ///
    /// # Examples
    /// ```text
    /// =   !=   <   <=   >   >=   contains
    /// ```
    Operator,

    /// Logical AND (word, not symbol)
    And,

    /// Logical OR (word, not symbol)
    Or,

    /// Logical negation (`!`)
    Not,

    /// Left parenthesis for grouping or function calls
    ParOpen,

    /// Right parenthesis
    ParClose,

    /// Identifier immediately followed by `(`
    ///
    /// # Examples
    /// ```text
    /// include({family.shortcode})
    /// lower({profile.name})
    /// ```
    FunctionName,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Kinds that may start a term.
    pub const TERM_START: &'static [TokenKind] = &[
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Variable,
        TokenKind::Boolean,
        TokenKind::Null,
        TokenKind::FunctionName,
    ];

    /// Kinds that may start an atom of a boolean expression.
    pub const ATOM_START: &'static [TokenKind] = &[
        TokenKind::ParOpen,
        TokenKind::Not,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Variable,
        TokenKind::Boolean,
        TokenKind::Null,
        TokenKind::FunctionName,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Comma => "','",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Variable => "variable",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "'null'",
            TokenKind::Operator => "operator",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'!'",
            TokenKind::ParOpen => "'('",
            TokenKind::ParClose => "')'",
            TokenKind::FunctionName => "function name",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A lexical token with its location in the source.
///
/// `offset` and `length` count characters, not bytes. `text` holds the
/// lexeme's value: string contents with quotes removed and escapes
/// resolved, variable paths without their braces, and the raw lexeme for
/// everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize, length: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
            length,
        }
    }

    pub fn eof(offset: usize) -> Self {
        Token::new(TokenKind::Eof, "", offset, 0)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
