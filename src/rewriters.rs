//! Ready-made rewrite passes.

use crate::{
    ast::{Expr, ExprRef, Identifier, Literal},
    rewrite::Rewriter,
    value::Value,
};

/// Default parameter naming: `_1`, `_2`, ... in encounter order.
pub fn default_parameter_name(index: usize, _value: &Value) -> String {
    format!("_{}", index)
}

/// Replaces every literal with a named parameter and keeps the literal values.
///
/// Values are collected in encounter order (left to right), which is the order
/// a caller binds them in when executing the generated SQL.
///
/// # Examples
///
/// ```
/// use treexl::rewriters::LiteralToParameter;
/// use treexl::{Value, parse};
///
/// let mut pass = LiteralToParameter::new();
/// let tree = parse("A > 1 and B <> '2'").unwrap().rewrite(&mut pass);
///
/// assert_eq!(tree, parse("A > :_1 and B <> :_2").unwrap());
/// assert_eq!(pass.values(), &[Value::Integer(1), Value::String("2".into())]);
/// ```
pub struct LiteralToParameter<F = fn(usize, &Value) -> String> {
    values: Vec<Value>,
    namer: F,
}

impl LiteralToParameter {
    pub fn new() -> Self {
        LiteralToParameter {
            values: Vec::new(),
            namer: default_parameter_name,
        }
    }
}

impl Default for LiteralToParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> LiteralToParameter<F>
where
    F: FnMut(usize, &Value) -> String,
{
    /// Uses `namer` to pick parameter names. It receives the 1-based position of
    /// the value among the collected ones and the value itself.
    pub fn with_namer(namer: F) -> Self {
        LiteralToParameter {
            values: Vec::new(),
            namer,
        }
    }

    /// Collected values, in encounter order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<F> Rewriter for LiteralToParameter<F>
where
    F: FnMut(usize, &Value) -> String,
{
    fn rewrite_literal(&mut self, _expr: &ExprRef, literal: &Literal) -> ExprRef {
        self.values.push(literal.value.clone());
        let name = (self.namer)(self.values.len(), &literal.value);
        Expr::parameter(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

/// Normalizes the case of column and function names.
///
/// Identifiers already in the requested case are returned untouched, so their
/// subtrees stay shared with the input tree.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierCase {
    case: Case,
}

impl IdentifierCase {
    pub fn new(case: Case) -> Self {
        IdentifierCase { case }
    }

    pub fn upper() -> Self {
        Self::new(Case::Upper)
    }

    pub fn lower() -> Self {
        Self::new(Case::Lower)
    }
}

impl Rewriter for IdentifierCase {
    fn rewrite_identifier(&mut self, expr: &ExprRef, identifier: &Identifier) -> ExprRef {
        let converted = match self.case {
            Case::Upper => identifier.name.to_uppercase(),
            Case::Lower => identifier.name.to_lowercase(),
        };
        if converted == identifier.name {
            expr.clone()
        } else {
            Expr::identifier(converted)
        }
    }
}
