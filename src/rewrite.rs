//! Tree-to-tree transformation passes.
//!
//! A [`Rewriter`] has one method per node variant, each receiving the node's
//! shared handle together with the typed node. The defaults rewrite every child
//! and rebuild the parent only when at least one child came back as a different
//! allocation; otherwise the original handle is returned. Unchanged subtrees are
//! therefore shared between the input and output trees, and running a pass that
//! changes nothing returns the very same root.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use treexl::ast::{ExprRef, Identifier};
//! use treexl::rewrite::Rewriter;
//! use treexl::{Expr, parse};
//!
//! struct RenameColumn;
//!
//! impl Rewriter for RenameColumn {
//!     fn rewrite_identifier(&mut self, expr: &ExprRef, identifier: &Identifier) -> ExprRef {
//!         if identifier.name == "a" {
//!             Expr::identifier("renamed")
//!         } else {
//!             expr.clone()
//!         }
//!     }
//! }
//!
//! let tree = parse("a = 1 and b = 2").unwrap();
//! let renamed = tree.rewrite(&mut RenameColumn);
//! assert_eq!(renamed, parse("renamed = 1 and b = 2").unwrap());
//!
//! let treexl::Expr::Binary(before) = tree.as_ref() else { unreachable!() };
//! let treexl::Expr::Binary(after) = renamed.as_ref() else { unreachable!() };
//! assert!(Arc::ptr_eq(&before.right, &after.right));
//! ```

use std::sync::Arc;

use crate::ast::{
    Binary, Call, Expr, ExprList, ExprRef, Grouping, Identifier, Literal, Parameter, Unary,
};

pub trait Rewriter {
    fn rewrite_literal(&mut self, expr: &ExprRef, _literal: &Literal) -> ExprRef {
        expr.clone()
    }

    fn rewrite_identifier(&mut self, expr: &ExprRef, _identifier: &Identifier) -> ExprRef {
        expr.clone()
    }

    fn rewrite_parameter(&mut self, expr: &ExprRef, _parameter: &Parameter) -> ExprRef {
        expr.clone()
    }

    fn rewrite_unary(&mut self, expr: &ExprRef, unary: &Unary) -> ExprRef {
        walk_unary(self, expr, unary)
    }

    fn rewrite_binary(&mut self, expr: &ExprRef, binary: &Binary) -> ExprRef {
        walk_binary(self, expr, binary)
    }

    fn rewrite_grouping(&mut self, expr: &ExprRef, grouping: &Grouping) -> ExprRef {
        walk_grouping(self, expr, grouping)
    }

    fn rewrite_call(&mut self, expr: &ExprRef, call: &Call) -> ExprRef {
        walk_call(self, expr, call)
    }

    fn rewrite_expr_list(&mut self, expr: &ExprRef, list: &ExprList) -> ExprRef {
        walk_expr_list(self, expr, list)
    }
}

// Lets a caller lend a pass (e.g. to `Options`) and read its state afterwards.
impl<R: Rewriter + ?Sized> Rewriter for &mut R {
    fn rewrite_literal(&mut self, expr: &ExprRef, literal: &Literal) -> ExprRef {
        (**self).rewrite_literal(expr, literal)
    }

    fn rewrite_identifier(&mut self, expr: &ExprRef, identifier: &Identifier) -> ExprRef {
        (**self).rewrite_identifier(expr, identifier)
    }

    fn rewrite_parameter(&mut self, expr: &ExprRef, parameter: &Parameter) -> ExprRef {
        (**self).rewrite_parameter(expr, parameter)
    }

    fn rewrite_unary(&mut self, expr: &ExprRef, unary: &Unary) -> ExprRef {
        (**self).rewrite_unary(expr, unary)
    }

    fn rewrite_binary(&mut self, expr: &ExprRef, binary: &Binary) -> ExprRef {
        (**self).rewrite_binary(expr, binary)
    }

    fn rewrite_grouping(&mut self, expr: &ExprRef, grouping: &Grouping) -> ExprRef {
        (**self).rewrite_grouping(expr, grouping)
    }

    fn rewrite_call(&mut self, expr: &ExprRef, call: &Call) -> ExprRef {
        (**self).rewrite_call(expr, call)
    }

    fn rewrite_expr_list(&mut self, expr: &ExprRef, list: &ExprList) -> ExprRef {
        (**self).rewrite_expr_list(expr, list)
    }
}

pub fn walk_unary<R: Rewriter + ?Sized>(rewriter: &mut R, expr: &ExprRef, unary: &Unary) -> ExprRef {
    let operand = unary.operand.rewrite(rewriter);
    if Arc::ptr_eq(&operand, &unary.operand) {
        return expr.clone();
    }
    Expr::unary(unary.operator.clone(), operand)
}

/// Rewrites left then right, so passes see operands in source order.
pub fn walk_binary<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    expr: &ExprRef,
    binary: &Binary,
) -> ExprRef {
    let left = binary.left.rewrite(rewriter);
    let right = binary.right.rewrite(rewriter);
    if Arc::ptr_eq(&left, &binary.left) && Arc::ptr_eq(&right, &binary.right) {
        return expr.clone();
    }
    Expr::binary(left, binary.operator.clone(), right)
}

pub fn walk_grouping<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    expr: &ExprRef,
    grouping: &Grouping,
) -> ExprRef {
    let inner = grouping.inner.rewrite(rewriter);
    if Arc::ptr_eq(&inner, &grouping.inner) {
        return expr.clone();
    }
    Expr::grouping(inner)
}

/// Rewrites the callee, then the arguments. A callee rewritten into anything but
/// an identifier is ignored.
pub fn walk_call<R: Rewriter + ?Sized>(rewriter: &mut R, expr: &ExprRef, call: &Call) -> ExprRef {
    let rewritten = call.callee.rewrite(rewriter);
    let callee = match rewritten.as_ref() {
        Expr::Identifier(_) if !Arc::ptr_eq(&rewritten, &call.callee) => Some(rewritten.clone()),
        _ => None,
    };
    let args = rewrite_list(rewriter, &call.args);

    if callee.is_none() && args.is_none() {
        return expr.clone();
    }

    Arc::new(Expr::Call(Call {
        callee: callee.unwrap_or_else(|| call.callee.clone()),
        close_paren: call.close_paren.clone(),
        args: args.unwrap_or_else(|| call.args.clone()),
    }))
}

pub fn walk_expr_list<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    expr: &ExprRef,
    list: &ExprList,
) -> ExprRef {
    match rewrite_list(rewriter, &list.args) {
        Some(args) => Expr::list(args),
        None => expr.clone(),
    }
}

/// Rewrites every element of `list`.
///
/// Returns `None` when no element changed. Otherwise the returned vector shares
/// every element before the first change and every later element the pass left
/// alone.
pub fn rewrite_list<R: Rewriter + ?Sized>(rewriter: &mut R, list: &[ExprRef]) -> Option<Vec<ExprRef>> {
    for (index, element) in list.iter().enumerate() {
        let rewritten = element.rewrite(rewriter);
        if Arc::ptr_eq(&rewritten, element) {
            continue;
        }

        let mut rebuilt = Vec::with_capacity(list.len());
        rebuilt.extend(list[..index].iter().cloned());
        rebuilt.push(rewritten);
        rebuilt.extend(list[index + 1..].iter().map(|rest| rest.rewrite(rewriter)));
        return Some(rebuilt);
    }
    None
}
