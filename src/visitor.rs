//! Read-only traversal of expression trees.
//!
//! A [`Visitor`] has one method per node variant. Every method defaults to
//! walking the node's children in source order, so an implementation overrides
//! only the variants it cares about and calls the matching `walk_*` function
//! when it still wants the children visited.

use std::convert::Infallible;

use crate::ast::{Binary, Call, Expr, ExprList, Grouping, Identifier, Literal, Parameter, Unary};

pub trait Visitor {
    /// Failure a visitor may abort with; [`Infallible`] for passes that cannot fail.
    type Error;

    fn visit_literal(&mut self, _literal: &Literal) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_parameter(&mut self, _parameter: &Parameter) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_unary(&mut self, unary: &Unary) -> Result<(), Self::Error> {
        walk_unary(self, unary)
    }

    fn visit_binary(&mut self, binary: &Binary) -> Result<(), Self::Error> {
        walk_binary(self, binary)
    }

    fn visit_grouping(&mut self, grouping: &Grouping) -> Result<(), Self::Error> {
        walk_grouping(self, grouping)
    }

    fn visit_call(&mut self, call: &Call) -> Result<(), Self::Error> {
        walk_call(self, call)
    }

    fn visit_expr_list(&mut self, list: &ExprList) -> Result<(), Self::Error> {
        walk_expr_list(self, list)
    }
}

pub fn walk_unary<V: Visitor + ?Sized>(visitor: &mut V, unary: &Unary) -> Result<(), V::Error> {
    unary.operand.visit(visitor)
}

pub fn walk_binary<V: Visitor + ?Sized>(visitor: &mut V, binary: &Binary) -> Result<(), V::Error> {
    binary.left.visit(visitor)?;
    binary.right.visit(visitor)
}

pub fn walk_grouping<V: Visitor + ?Sized>(
    visitor: &mut V,
    grouping: &Grouping,
) -> Result<(), V::Error> {
    grouping.inner.visit(visitor)
}

/// Visits the callee, then each argument.
pub fn walk_call<V: Visitor + ?Sized>(visitor: &mut V, call: &Call) -> Result<(), V::Error> {
    call.callee.visit(visitor)?;
    call.args.iter().try_for_each(|arg| arg.visit(visitor))
}

pub fn walk_expr_list<V: Visitor + ?Sized>(
    visitor: &mut V,
    list: &ExprList,
) -> Result<(), V::Error> {
    list.args.iter().try_for_each(|arg| arg.visit(visitor))
}

/// Collects the column names and parameter names an expression refers to.
///
/// Names are kept in first-occurrence order without duplicates. Function names
/// are not columns and are skipped.
#[derive(Debug, Default)]
pub struct ReferencedNames {
    pub identifiers: Vec<String>,
    pub parameters: Vec<String>,
}

impl ReferencedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(expr: &Expr) -> Self {
        let mut names = Self::new();
        match expr.visit(&mut names) {
            Ok(()) => names,
            Err(never) => match never {},
        }
    }
}

impl Visitor for ReferencedNames {
    type Error = Infallible;

    fn visit_identifier(&mut self, identifier: &Identifier) -> Result<(), Self::Error> {
        if !self.identifiers.contains(&identifier.name) {
            self.identifiers.push(identifier.name.clone());
        }
        Ok(())
    }

    fn visit_parameter(&mut self, parameter: &Parameter) -> Result<(), Self::Error> {
        if !self.parameters.contains(&parameter.name) {
            self.parameters.push(parameter.name.clone());
        }
        Ok(())
    }

    fn visit_call(&mut self, call: &Call) -> Result<(), Self::Error> {
        call.args.iter().try_for_each(|arg| arg.visit(self))
    }
}
