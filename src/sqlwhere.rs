//! SQL `WHERE` rendering for Treexl expressions.
//!
//! The generator writes into any [`fmt::Write`] sink, so callers can append a
//! filter to a query they are already building.
//!
//! # Examples
//!
//! ```
//! use treexl::Expr;
//! use treexl::sqlwhere::SqlWhereGenerator;
//!
//! let mut generator = SqlWhereGenerator::new();
//! assert_eq!(generator.generate("A in 1..10").unwrap(), "A between 1 and 10");
//! assert_eq!(generator.generate("x like '%x%'").unwrap(), "x like '%x%'");
//!
//! // Quotes inside string values go through the quote escaper.
//! let mut sql = String::from("select * from t where ");
//! generator.append_sql(&mut sql, &Expr::literal("it's")).unwrap();
//! assert_eq!(sql, "select * from t where 'it''s'");
//! ```

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    Error, Treexl,
    ast::{
        Binary, Call, Expr, ExprList, ExprRef, Grouping, Identifier, Literal, Parameter, Token,
        TokenKind, Unary,
        operators::{sql_binary_spelling, sql_unary_prefix},
    },
    value::Value,
    visitor::Visitor,
};

/// Writes the replacement for one `'` found inside a string literal.
pub type QuoteEscaper = Arc<dyn Fn(&mut dyn fmt::Write) -> fmt::Result + Send + Sync>;

/// The SQL-standard escape: a doubled quote.
pub fn double_quote_escaper() -> QuoteEscaper {
    Arc::new(|sink: &mut dyn fmt::Write| sink.write_str("''"))
}

/// Backslash escape, as MySQL accepts.
pub fn backslash_quote_escaper() -> QuoteEscaper {
    Arc::new(|sink: &mut dyn fmt::Write| sink.write_str("\\'"))
}

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("Literal of type {0} is not supported.")]
    UnsupportedLiteral(&'static str),

    #[error("A value list can only be rendered as the right side of 'in'.")]
    UnsupportedExprList,

    #[error("Invalid unary operator: {0}")]
    InvalidUnaryOperator(Token),

    #[error("Invalid binary operator: {0}")]
    InvalidBinaryOperator(Token),

    #[error("Failed to write SQL: {0}")]
    Write(#[from] fmt::Error),
}

/// Parses Treexl expressions and renders them as SQL `WHERE` fragments.
pub struct SqlWhereGenerator<'a> {
    treexl: Treexl<'a>,
    quoter: QuoteEscaper,
}

impl Default for SqlWhereGenerator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SqlWhereGenerator<'a> {
    pub fn new() -> Self {
        Self::with_options(Treexl::default(), double_quote_escaper())
    }

    pub fn with_options(treexl: Treexl<'a>, quoter: QuoteEscaper) -> Self {
        SqlWhereGenerator { treexl, quoter }
    }

    /// Parses `source`, applies the configured passes and renders the result.
    pub fn generate(&mut self, source: &str) -> Result<String, Error> {
        let expr = self.treexl.parse(source)?;
        let mut sql = String::new();
        self.append_sql(&mut sql, &expr)?;
        Ok(sql)
    }

    pub fn append_sql<W: fmt::Write>(&self, sink: &mut W, expr: &Expr) -> Result<(), SqlError> {
        let mut visitor = SqlVisitor::new(sink, self.quoter.clone());
        expr.visit(&mut visitor)
    }
}

/// Renders one expression into a sink.
pub struct SqlVisitor<'w, W: fmt::Write> {
    sink: &'w mut W,
    quoter: QuoteEscaper,
}

impl<'w, W: fmt::Write> SqlVisitor<'w, W> {
    pub fn new(sink: &'w mut W, quoter: QuoteEscaper) -> Self {
        SqlVisitor { sink, quoter }
    }

    fn write_string_literal(&mut self, value: &str) -> Result<(), SqlError> {
        self.sink.write_char('\'')?;
        for (index, piece) in value.split('\'').enumerate() {
            if index > 0 {
                (self.quoter)(&mut *self.sink)?;
            }
            self.sink.write_str(piece)?;
        }
        self.sink.write_char('\'')?;
        Ok(())
    }

    fn write_separated(&mut self, args: &[ExprRef]) -> Result<(), SqlError> {
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.sink.write_str(", ")?;
            }
            arg.visit(self)?;
        }
        Ok(())
    }

    /// `left in (a, b)` / `left between a and b` / `left in <other>`.
    fn write_in(&mut self, binary: &Binary) -> Result<(), SqlError> {
        binary.left.visit(self)?;
        match binary.right.as_ref() {
            Expr::ExprList(list) => {
                self.sink.write_str(" in (")?;
                self.write_separated(&list.args)?;
                self.sink.write_char(')')?;
            }
            Expr::Binary(range) if range.is_range() => {
                self.sink.write_char(' ')?;
                self.write_range(range)?;
            }
            other => {
                self.sink.write_str(" in ")?;
                other.visit(self)?;
            }
        }
        Ok(())
    }

    fn write_range(&mut self, range: &Binary) -> Result<(), SqlError> {
        self.sink.write_str("between ")?;
        range.left.visit(self)?;
        self.sink.write_str(" and ")?;
        range.right.visit(self)
    }
}

impl<W: fmt::Write> Visitor for SqlVisitor<'_, W> {
    type Error = SqlError;

    fn visit_literal(&mut self, literal: &Literal) -> Result<(), SqlError> {
        match &literal.value {
            Value::Integer(n) => write!(self.sink, "{}", n)?,
            Value::Decimal(d) => write!(self.sink, "{}", d)?,
            Value::String(s) => self.write_string_literal(s)?,
            Value::Null => self.sink.write_str("null")?,
            other @ Value::Boolean(_) => {
                return Err(SqlError::UnsupportedLiteral(other.type_name()));
            }
        }
        Ok(())
    }

    fn visit_identifier(&mut self, identifier: &Identifier) -> Result<(), SqlError> {
        self.sink.write_str(&identifier.name)?;
        Ok(())
    }

    fn visit_parameter(&mut self, parameter: &Parameter) -> Result<(), SqlError> {
        write!(self.sink, "${{{}}}", parameter.name)?;
        Ok(())
    }

    fn visit_unary(&mut self, unary: &Unary) -> Result<(), SqlError> {
        let prefix = sql_unary_prefix(unary.operator.kind)
            .ok_or_else(|| SqlError::InvalidUnaryOperator(unary.operator.clone()))?;
        self.sink.write_str(prefix)?;
        if unary.operator.kind != TokenKind::Minus {
            return unary.operand.visit(self);
        }

        // `--` opens a SQL line comment, so a negated operand that itself starts
        // with `-` is separated by a space.
        let mut operand = String::new();
        unary
            .operand
            .visit(&mut SqlVisitor::new(&mut operand, self.quoter.clone()))?;
        if operand.starts_with('-') {
            self.sink.write_char(' ')?;
        }
        self.sink.write_str(&operand)?;
        Ok(())
    }

    fn visit_binary(&mut self, binary: &Binary) -> Result<(), SqlError> {
        match binary.operator.kind {
            TokenKind::In => return self.write_in(binary),
            TokenKind::DotDot => return self.write_range(binary),
            _ => {}
        }

        let spelling = sql_binary_spelling(binary.operator.kind)
            .ok_or_else(|| SqlError::InvalidBinaryOperator(binary.operator.clone()))?;
        binary.left.visit(self)?;
        write!(self.sink, " {} ", spelling)?;
        binary.right.visit(self)
    }

    fn visit_grouping(&mut self, grouping: &Grouping) -> Result<(), SqlError> {
        self.sink.write_char('(')?;
        grouping.inner.visit(self)?;
        self.sink.write_char(')')?;
        Ok(())
    }

    fn visit_call(&mut self, call: &Call) -> Result<(), SqlError> {
        call.callee.visit(self)?;
        self.sink.write_char('(')?;
        self.write_separated(&call.args)?;
        self.sink.write_char(')')?;
        Ok(())
    }

    fn visit_expr_list(&mut self, _list: &ExprList) -> Result<(), SqlError> {
        Err(SqlError::UnsupportedExprList)
    }
}
