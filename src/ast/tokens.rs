use std::fmt;

use crate::value::Value;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `.` between the segments of a dotted name
    ///
    /// # Examples
    /// ```text
    /// a.b.C
    /// ```
    Dot,
    /// `-` (unary negation)
    Minus,
    /// `=`
    Equal,

    // One or two character tokens
    /// `..` range marker, only valid after `in`
    ///
    /// # Examples
    /// ```text
    /// A in 1..10
    /// ```
    DotDot,
    /// `<>`
    Different,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,

    // Literals
    /// Column or function name
    ///
    /// Must start with a letter or underscore, followed by letters, digits, or underscores.
    Identifier,
    /// Named placeholder (`:name`); the lexeme holds the name without the colon
    Parameter,
    /// `'single-quoted'` string
    String,
    /// Integer or decimal number
    Number,

    // Keywords (lowercase only)
    And,
    False,
    Null,
    Or,
    True,
    Not,
    Is,
    In,
    Like,
    /// Reserved so the parser can point callers at `in <start>..<end>`.
    Between,

    /// End of input
    Eof,
}

/// Keyword spellings. Matching is exact: `AND` is an identifier, not a keyword.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("or", TokenKind::Or),
    ("true", TokenKind::True),
    ("not", TokenKind::Not),
    ("is", TokenKind::Is),
    ("in", TokenKind::In),
    ("like", TokenKind::Like),
    ("between", TokenKind::Between),
];

impl TokenKind {
    /// Looks up a keyword by its exact spelling.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, kind)| *kind)
    }

    /// Canonical spelling for keyword kinds.
    pub fn keyword_spelling(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(spelling, _)| *spelling)
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Number)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Equal => "EQUAL",
            TokenKind::DotDot => "DOT_DOT",
            TokenKind::Different => "DIFFERENT",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Parameter => "PARAMETER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::Or => "OR",
            TokenKind::True => "TRUE",
            TokenKind::Not => "NOT",
            TokenKind::Is => "IS",
            TokenKind::In => "IN",
            TokenKind::Like => "LIKE",
            TokenKind::Between => "BETWEEN",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A lexical token produced by the lexer.
///
/// Equality compares kind, lexeme and literal value; the source line is
/// bookkeeping for diagnostics and is ignored.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, or the canonical spelling for keywords
    pub lexeme: String,
    /// Typed value, present for `String` and `Number` tokens only
    pub literal: Option<Value>,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        let lexeme = match kind.keyword_spelling() {
            Some(spelling) => spelling.to_string(),
            None => lexeme.into(),
        };
        Token {
            kind,
            lexeme,
            literal: None,
            line: 1,
        }
    }

    pub fn with_literal(kind: TokenKind, lexeme: impl Into<String>, literal: Value) -> Self {
        Token {
            literal: Some(literal),
            ..Token::new(kind, lexeme)
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Token for a keyword kind, spelled canonically.
    pub fn keyword(kind: TokenKind) -> Self {
        Token::new(kind, "")
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme && self.literal == other.literal
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.lexeme.is_empty() {
            write!(f, " [{}]", self.lexeme)?;
        }
        if let Some(literal) = &self.literal {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}
