//! Render expressions as SQL `WHERE` fragments

use serde_json::json;

use super::{CliError, params_to_json};
use crate::{
    Options, SqlWhereGenerator, Treexl, Value,
    rewriters::{IdentifierCase, LiteralToParameter},
    sqlwhere::{QuoteEscaper, backslash_quote_escaper, double_quote_escaper},
};

/// How quotes inside string literals are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `'it''s'`
    #[default]
    Double,
    /// `'it\'s'`
    Backslash,
}

impl QuoteStyle {
    fn escaper(self) -> QuoteEscaper {
        match self {
            QuoteStyle::Double => double_quote_escaper(),
            QuoteStyle::Backslash => backslash_quote_escaper(),
        }
    }
}

/// Options for the sql command
#[derive(Debug, Clone, Default)]
pub struct SqlOptions {
    /// The filter expression
    pub expression: String,
    /// Replace literals with named parameters and report their values
    pub parameterize: bool,
    /// Escaping used for quotes inside string literals
    pub quote_style: QuoteStyle,
    /// Upper-case column and function names before rendering
    pub upper_identifiers: bool,
}

/// Result of a sql operation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOutput {
    /// Plain SQL with literals inlined
    Sql(String),
    /// SQL with `${_n}` placeholders and the values to bind, in order
    Parameterized { sql: String, params: Vec<Value> },
}

impl SqlOutput {
    pub fn sql(&self) -> &str {
        match self {
            SqlOutput::Sql(sql) | SqlOutput::Parameterized { sql, .. } => sql,
        }
    }

    /// `{"sql": "...", "params": [...]}`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlOutput::Sql(sql) => json!({ "sql": sql, "params": [] }),
            SqlOutput::Parameterized { sql, params } => {
                json!({ "sql": sql, "params": params_to_json(params) })
            }
        }
    }
}

/// Execute a treexl sql operation
pub fn execute_sql(options: &SqlOptions) -> Result<SqlOutput, CliError> {
    let mut literals = LiteralToParameter::new();

    let sql = {
        let mut treexl_options = Options::new();
        if options.upper_identifiers {
            treexl_options = treexl_options.with_rewriter(IdentifierCase::upper());
        }
        if options.parameterize {
            treexl_options = treexl_options.with_rewriter(&mut literals);
        }

        let mut generator = SqlWhereGenerator::with_options(
            Treexl::new(treexl_options),
            options.quote_style.escaper(),
        );
        generator.generate(&options.expression)?
    };

    if options.parameterize {
        Ok(SqlOutput::Parameterized {
            sql,
            params: literals.into_values(),
        })
    } else {
        Ok(SqlOutput::Sql(sql))
    }
}
