//! Validate and inspect treexl expressions

use super::CliError;
use crate::{Token, parse, scan, visitor::ReferencedNames};

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The expression scanned and parsed
    SyntaxValid,
}

/// Parse an expression without rendering it
pub fn execute_check(expression: &str) -> Result<CheckResult, CliError> {
    parse(expression)?;
    Ok(CheckResult::SyntaxValid)
}

/// Scan an expression, returning its tokens including the final `EOF`
pub fn execute_tokens(expression: &str) -> Result<Vec<Token>, CliError> {
    Ok(scan(expression).map_err(crate::Error::from)?)
}

/// A parsed tree together with the names it references
#[derive(Debug, Clone)]
pub struct Inspection {
    pub tree: crate::ExprRef,
    pub identifiers: Vec<String>,
    pub parameters: Vec<String>,
}

/// Parse an expression and collect the columns and parameters it uses
pub fn execute_inspect(expression: &str) -> Result<Inspection, CliError> {
    let tree = parse(expression)?;
    let names = ReferencedNames::collect(&tree);
    Ok(Inspection {
        tree,
        identifiers: names.identifiers,
        parameters: names.parameters,
    })
}
