use std::sync::Arc;

use crate::{
    ast::{Token, TokenKind},
    rewrite::Rewriter,
    value::Value,
    visitor::Visitor,
};

/// Shared handle to an expression node.
///
/// Trees are immutable; rewrites build new parents and reuse unchanged
/// children through this handle, so "untouched" can be checked with
/// [`Arc::ptr_eq`].
pub type ExprRef = Arc<Expr>;

/// Abstract Syntax Tree node representing a parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant
    ///
    /// # Example
    /// ```text
    /// 42
    /// 'abc'
    /// null
    /// ```
    Literal(Literal),

    /// Column or field reference, dotted segments joined
    ///
    /// # Example
    /// ```text
    /// a.b.C
    /// ```
    Identifier(Identifier),

    /// Named placeholder
    ///
    /// # Example
    /// ```text
    /// :name
    /// ```
    Parameter(Parameter),

    /// Prefix `-` or `not`
    Unary(Unary),

    /// Infix logical, equality, comparison, or range operation
    Binary(Binary),

    /// Parenthesized sub-expression, kept so rendering reproduces the parentheses
    Grouping(Grouping),

    /// Function application
    ///
    /// # Example
    /// ```text
    /// upper(name)
    /// ```
    Call(Call),

    /// Set literal, the right side of `in (...)`
    ExprList(ExprList),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub operand: ExprRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: ExprRef,
    pub operator: Token,
    pub right: ExprRef,
}

impl Binary {
    /// True for the `start..end` node built after `in`.
    pub fn is_range(&self) -> bool {
        self.operator.kind == TokenKind::DotDot
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    pub inner: ExprRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// An `Expr::Identifier`; held as a handle so passes can share it
    pub callee: ExprRef,
    /// The closing `)`; kept for its position, it carries no meaning
    pub close_paren: Token,
    pub args: Vec<ExprRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    pub args: Vec<ExprRef>,
}

// Constructors return shared handles, since that is how nodes live in a tree.
impl Expr {
    pub fn literal(value: impl Into<Value>) -> ExprRef {
        Arc::new(Expr::Literal(Literal {
            value: value.into(),
        }))
    }

    pub fn null() -> ExprRef {
        Arc::new(Expr::Literal(Literal { value: Value::Null }))
    }

    pub fn identifier(name: impl Into<String>) -> ExprRef {
        Arc::new(Expr::Identifier(Identifier { name: name.into() }))
    }

    pub fn parameter(name: impl Into<String>) -> ExprRef {
        Arc::new(Expr::Parameter(Parameter { name: name.into() }))
    }

    pub fn unary(operator: Token, operand: ExprRef) -> ExprRef {
        Arc::new(Expr::Unary(Unary { operator, operand }))
    }

    pub fn binary(left: ExprRef, operator: Token, right: ExprRef) -> ExprRef {
        Arc::new(Expr::Binary(Binary {
            left,
            operator,
            right,
        }))
    }

    /// `start..end`, the target of `x in start..end`.
    pub fn range(start: ExprRef, end: ExprRef) -> ExprRef {
        Expr::binary(start, Token::new(TokenKind::DotDot, ".."), end)
    }

    pub fn grouping(inner: ExprRef) -> ExprRef {
        Arc::new(Expr::Grouping(Grouping { inner }))
    }

    pub fn call(callee: impl Into<String>, args: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::Call(Call {
            callee: Expr::identifier(callee),
            close_paren: Token::new(TokenKind::RightParen, ")"),
            args,
        }))
    }

    pub fn list(args: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::ExprList(ExprList { args }))
    }

    /// Dispatches to the visitor method matching this node's variant.
    pub fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Expr::Literal(literal) => visitor.visit_literal(literal),
            Expr::Identifier(identifier) => visitor.visit_identifier(identifier),
            Expr::Parameter(parameter) => visitor.visit_parameter(parameter),
            Expr::Unary(unary) => visitor.visit_unary(unary),
            Expr::Binary(binary) => visitor.visit_binary(binary),
            Expr::Grouping(grouping) => visitor.visit_grouping(grouping),
            Expr::Call(call) => visitor.visit_call(call),
            Expr::ExprList(list) => visitor.visit_expr_list(list),
        }
    }

    /// Dispatches to the rewriter method matching this node's variant.
    ///
    /// Returns `self` (the same allocation) when the rewriter leaves the node alone.
    pub fn rewrite<R: Rewriter + ?Sized>(self: &Arc<Self>, rewriter: &mut R) -> ExprRef {
        match self.as_ref() {
            Expr::Literal(literal) => rewriter.rewrite_literal(self, literal),
            Expr::Identifier(identifier) => rewriter.rewrite_identifier(self, identifier),
            Expr::Parameter(parameter) => rewriter.rewrite_parameter(self, parameter),
            Expr::Unary(unary) => rewriter.rewrite_unary(self, unary),
            Expr::Binary(binary) => rewriter.rewrite_binary(self, binary),
            Expr::Grouping(grouping) => rewriter.rewrite_grouping(self, grouping),
            Expr::Call(call) => rewriter.rewrite_call(self, call),
            Expr::ExprList(list) => rewriter.rewrite_expr_list(self, list),
        }
    }
}
