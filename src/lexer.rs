use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{Token, TokenKind},
    value::Value,
};

/// Malformed character stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Lex error (line: {line}): Unexpected character '{ch}'.")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("Lex error (line: {line}): Unterminated string.")]
    UnterminatedString { line: usize },

    #[error("Lex error (line: {line}): Invalid number '{text}'.")]
    InvalidNumber { text: String, line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. }
            | LexError::UnterminatedString { line }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    start: usize,
    position: usize,
    line: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            start: 0,
            position: 0,
            line: 1,
        }
    }

    /// Scans the whole input. The result always ends with an `Eof` token.
    pub fn scan(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            trace!(%token, "scanned");
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
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

    /// Consumes the current char if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' => self.advance(),
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn text(&self) -> String {
        self.input[self.start..self.position].iter().collect()
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.text()).at_line(self.line)
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a `'...'` string. Content is copied verbatim; there are no escapes.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let opening_line = self.line;
        self.advance(); // opening quote

        let mut value = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\'' {
                self.advance();
                let lexeme = self.text();
                return Ok(Token::with_literal(TokenKind::String, lexeme, Value::String(value))
                    .at_line(opening_line));
            }
            if ch == '\n' {
                self.line += 1;
            }
            value.push(ch);
            self.advance();
        }

        Err(LexError::UnterminatedString { line: self.line })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A '.' is a decimal point only when a digit follows; otherwise it is
        // left for a `.` or `..` token.
        let mut fractional = false;
        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            fractional = true;
            self.advance();
            while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.text();
        let value = if fractional {
            // Fractions past the decimal's precision are rounded by `from_str`;
            // a changed scale means the value is not the one written.
            let digits = text.len() - text.find('.').map_or(text.len(), |dot| dot + 1);
            Decimal::from_str(&text)
                .ok()
                .filter(|d| d.scale() as usize == digits)
                .map(Value::Decimal)
        } else {
            text.parse::<i64>().ok().map(Value::Integer)
        };

        match value {
            Some(value) => Ok(Token::with_literal(TokenKind::Number, text, value).at_line(self.line)),
            None => Err(LexError::InvalidNumber {
                text,
                line: self.line,
            }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.start = self.position;

        let Some(ch) = self.current_char() else {
            return Ok(Token::new(TokenKind::Eof, "").at_line(self.line));
        };

        let kind = match ch {
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            '=' => {
                self.advance();
                TokenKind::Equal
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '.' => {
                self.advance();
                if self.matches('.') {
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            '>' => {
                self.advance();
                if self.matches('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                self.advance();
                if self.matches('=') {
                    TokenKind::LessEqual
                } else if self.matches('>') {
                    TokenKind::Different
                } else {
                    TokenKind::Less
                }
            }
            '\'' => return self.read_string(),
            ':' if self.peek_char(1).is_some_and(is_identifier_start) => {
                self.advance();
                let name = self.read_identifier();
                return Ok(Token::new(TokenKind::Parameter, name).at_line(self.line));
            }
            c if c.is_ascii_digit() => return self.read_number(),
            c if is_identifier_start(c) => {
                let ident = self.read_identifier();
                return Ok(match TokenKind::keyword(&ident) {
                    Some(keyword) => Token::keyword(keyword).at_line(self.line),
                    None => Token::new(TokenKind::Identifier, ident).at_line(self.line),
                });
            }
            c => {
                return Err(LexError::UnexpectedCharacter {
                    ch: c,
                    line: self.line,
                });
            }
        };

        Ok(self.token(kind))
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[test]
fn test_keywords_are_exact_case() {
    let tokens = Lexer::new("and AND or Or").scan().unwrap();
    assert_eq!(tokens[0], Token::keyword(TokenKind::And));
    assert_eq!(tokens[1], Token::new(TokenKind::Identifier, "AND"));
    assert_eq!(tokens[2], Token::keyword(TokenKind::Or));
    assert_eq!(tokens[3], Token::new(TokenKind::Identifier, "Or"));
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn test_range_after_number() {
    let mut lexer = Lexer::new("1..10");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::with_literal(TokenKind::Number, "1", Value::Integer(1))
    );
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::DotDot, ".."));
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::with_literal(TokenKind::Number, "10", Value::Integer(10))
    );
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_line_tracking() {
    let tokens = Lexer::new("a\nand\n\nb").scan().unwrap();
    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2, 4, 4]);
}
