use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::ast::{
    Call, Expr, ExprRef, Token, TokenKind,
    operators::{
        AND_OPERATORS, COMPARISON_OPERATORS, EQUALITY_OPERATORS, OR_OPERATORS, UNARY_OPERATORS,
    },
};

/// Malformed token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error (line: {line}) at {}: {message}", Near(.near.as_deref()))]
pub struct ParseError {
    pub line: usize,
    /// Offending lexeme, `None` at end of input
    pub near: Option<String>,
    pub message: String,
}

struct Near<'a>(Option<&'a str>);

impl fmt::Display for Near<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(lexeme) => write!(f, "'{}'", lexeme),
            None => f.write_str("EOF"),
        }
    }
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        let mut message = message.into();

        if token.kind == TokenKind::Identifier {
            let lowered = token.lexeme.to_lowercase();
            if lowered != token.lexeme && TokenKind::keyword(&lowered).is_some() {
                message.push_str(&format!(
                    " Invalid keyword '{}': keywords are case sensitive (lowercase only). Use '{}' instead.",
                    token.lexeme, lowered
                ));
            }
        }

        ParseError {
            line: token.line,
            near: (token.kind != TokenKind::Eof).then(|| token.lexeme.clone()),
            message,
        }
    }
}

/// Recursive-descent parser over a scanned token sequence.
///
/// Rules from loosest to tightest binding:
///
/// ```text
/// expr        := or
/// or          := and ( 'or' and )*
/// and         := equality ( 'and' equality )*
/// equality    := comparison ( ('='|'<>'|'is'|'in'|'like') equalityRhs )*
/// comparison  := unary ( ('>'|'>='|'<'|'<=') unary )*
/// unary       := ('not'|'-') unary | parameter
/// parameter   := ':' IDENT | call
/// call        := identifier ( '(' argList ')' )?
/// identifier  := IDENT ( '.' IDENT )* | primary
/// primary     := 'false'|'true'|'null'|NUMBER|STRING|'(' expr ')'
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

/// Deepest nesting of groupings, argument lists and prefix operators accepted.
pub const MAX_DEPTH: usize = 128;

impl Parser {
    /// `tokens` must end with an `Eof` token, as [`crate::Lexer::scan`] guarantees.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, "").at_line(line));
        }
        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parses one expression and requires the input to end right after it.
    pub fn parse(&mut self) -> Result<ExprRef, ParseError> {
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            return Err(ParseError::at(self.peek(), "Expect end of expression."));
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<ExprRef, ParseError> {
        self.descend()?;
        let expr = self.parse_or();
        self.depth -= 1;
        expr
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::at(self.peek(), "Expression nested too deeply."));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.current + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consumes the current token if its kind is one of `kinds`.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|kind| self.check(*kind)) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError::at(self.peek(), message))
        }
    }

    fn parse_or(&mut self) -> Result<ExprRef, ParseError> {
        let mut left = self.parse_and()?;

        while let Some(operator) = self.match_any(OR_OPERATORS) {
            let right = self.parse_and()?;
            left = Expr::binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExprRef, ParseError> {
        let mut left = self.parse_equality()?;

        while let Some(operator) = self.match_any(AND_OPERATORS) {
            let right = self.parse_equality()?;
            left = Expr::binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<ExprRef, ParseError> {
        let mut left = self.parse_comparison()?;

        loop {
            if self.check(TokenKind::Between) {
                return Err(ParseError::at(
                    self.peek(),
                    "'between' operator not supported. Use 'in' with a range instead ('<expr> in <start>..<end>').",
                ));
            }

            let Some(operator) = self.match_any(EQUALITY_OPERATORS) else {
                break;
            };

            let right = if operator.kind == TokenKind::In {
                self.parse_in_target()?
            } else {
                self.parse_comparison()?
            };
            left = Expr::binary(left, operator, right);
        }
        Ok(left)
    }

    /// Right side of `in`: a set literal `(a, b, ...)` or a range `start..end`.
    fn parse_in_target(&mut self) -> Result<ExprRef, ParseError> {
        if self.match_any(&[TokenKind::LeftParen]).is_some() {
            let args = self.parse_arguments()?;
            self.expect(TokenKind::RightParen, "Expect ')' after 'in' list.")?;
            return Ok(Expr::list(args));
        }

        let start = self.parse_unary()?;
        let Some(marker) = self.match_any(&[TokenKind::DotDot]) else {
            return Err(ParseError::at(
                self.peek(),
                "Expected '(' or range '<start>..<end>' after 'in' expression.",
            ));
        };
        let end = self.parse_unary()?;
        Ok(Expr::binary(start, marker, end))
    }

    fn parse_comparison(&mut self) -> Result<ExprRef, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(operator) = self.match_any(COMPARISON_OPERATORS) {
            let right = self.parse_unary()?;
            left = Expr::binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprRef, ParseError> {
        if let Some(operator) = self.match_any(UNARY_OPERATORS) {
            self.descend()?;
            let operand = self.parse_unary(); // right-associative: `not not x`
            self.depth -= 1;
            return Ok(Expr::unary(operator, operand?));
        }
        self.parse_parameter()
    }

    fn parse_parameter(&mut self) -> Result<ExprRef, ParseError> {
        if let Some(token) = self.match_any(&[TokenKind::Parameter]) {
            return Ok(Expr::parameter(token.lexeme));
        }
        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<ExprRef, ParseError> {
        let Some(name) = self.parse_dotted_name() else {
            return self.parse_primary();
        };

        if self.match_any(&[TokenKind::LeftParen]).is_some() {
            let args = if self.check(TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_arguments()?
            };
            let close_paren = self.expect(TokenKind::RightParen, "Expect ')' after arguments.")?;
            return Ok(Arc::new(Expr::Call(Call {
                callee: Expr::identifier(name),
                close_paren,
                args,
            })));
        }

        Ok(Expr::identifier(name))
    }

    /// `IDENT ('.' IDENT)*` folded into one name. A dot is only consumed when an
    /// identifier follows it.
    fn parse_dotted_name(&mut self) -> Option<String> {
        let first = self.match_any(&[TokenKind::Identifier])?;
        let mut name = first.lexeme;

        while self.check(TokenKind::Dot) && self.peek_next_kind() == TokenKind::Identifier {
            self.advance(); // '.'
            name.push('.');
            name.push_str(&self.advance().lexeme);
        }
        Some(name)
    }

    fn parse_arguments(&mut self) -> Result<Vec<ExprRef>, ParseError> {
        let mut args = vec![self.parse_expression()?];
        while self.match_any(&[TokenKind::Comma]).is_some() {
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<ExprRef, ParseError> {
        let token = self.peek().clone();

        let expr = match token.kind {
            TokenKind::False => Expr::literal(false),
            TokenKind::True => Expr::literal(true),
            TokenKind::Null => Expr::null(),
            kind if kind.is_literal() => match &token.literal {
                Some(value) => Expr::literal(value.clone()),
                None => return Err(ParseError::at(&token, "Literal token without a value.")),
            },
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::grouping(inner));
            }
            _ => return Err(ParseError::at(&token, "Expect expression.")),
        };

        self.advance();
        Ok(expr)
    }
}
