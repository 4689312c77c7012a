use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{ExprRef, Token, TokenKind},
    lexer::{LexError, Lexer},
    parser::{ParseError, Parser},
    rewrite::Rewriter,
    sqlwhere::SqlError,
};

/// Any failure surfaced by the parse → rewrite → render pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sql(#[from] SqlError),
}

/// Parse-time configuration: the rewrite passes applied, in order, to every
/// parsed tree.
#[derive(Default)]
pub struct Options<'a> {
    pub rewriters: Vec<Box<dyn Rewriter + 'a>>,
}

impl<'a> Options<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rewriter(mut self, rewriter: impl Rewriter + 'a) -> Self {
        self.rewriters.push(Box::new(rewriter));
        self
    }
}

/// Treexl parser façade.
///
/// Scans and parses an expression, then folds the configured passes over the
/// tree.
///
/// # Examples
///
/// ```
/// use treexl::rewriters::LiteralToParameter;
/// use treexl::{Options, Treexl, Value, parse};
///
/// let mut pass = LiteralToParameter::new();
/// let mut treexl = Treexl::new(Options::new().with_rewriter(&mut pass));
///
/// let tree = treexl.parse("a = 1 or b = 'x'").unwrap();
/// assert_eq!(tree, parse("a = :_1 or b = :_2").unwrap());
///
/// drop(treexl);
/// assert_eq!(pass.into_values(), vec![Value::Integer(1), Value::from("x")]);
/// ```
#[derive(Default)]
pub struct Treexl<'a> {
    options: Options<'a>,
}

impl<'a> Treexl<'a> {
    pub fn new(options: Options<'a>) -> Self {
        Treexl { options }
    }

    pub fn parse(&mut self, source: &str) -> Result<ExprRef, Error> {
        if source.trim().is_empty() {
            return Err(ParseError::at(
                &Token::new(TokenKind::Eof, ""),
                "Expression is blank.",
            )
            .into());
        }

        let tokens = Lexer::new(source).scan()?;
        debug!(tokens = tokens.len(), "scanned expression");

        let expr = Parser::new(tokens).parse()?;

        let passes = self.options.rewriters.len();
        let expr = self
            .options
            .rewriters
            .iter_mut()
            .fold(expr, |current, pass| current.rewrite(pass.as_mut()));
        debug!(passes, "parsed expression");

        Ok(expr)
    }
}

/// Scans `source` into tokens, ending with `Eof`.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).scan()
}

/// Parses `source` with no rewrite passes.
pub fn parse(source: &str) -> Result<ExprRef, Error> {
    Treexl::default().parse(source)
}
