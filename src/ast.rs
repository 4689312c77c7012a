//! # Treexl - Abstract Syntax Tree
//!
//! This module defines the tokens and expression tree for Treexl filter
//! expressions, the small boolean/comparison language that compiles to SQL
//! `WHERE` fragments.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes and their double-dispatch entry points
//! - **[operators]** - Operator tiers and their SQL spellings
//!
//! ## Quick Start
//!
//! ```text
//! A in (1, 2, 3) and b.C like '%x%'
//! ```
//!
//! parses to
//!
//! ```text
//! Binary(
//!     Binary(Identifier(A), in, ExprList[1, 2, 3]),
//!     and,
//!     Binary(Identifier(b.C), like, Literal('%x%')),
//! )
//! ```
//!
//! ## Core Concepts
//!
//! ### Immutable, shared trees
//!
//! Nodes are never mutated. Children are held as [`ExprRef`] (`Arc<Expr>`), so a
//! rewrite pass that changes one leaf allocates new nodes only along the path to
//! that leaf and shares everything else with the original tree.
//!
//! ### Operator precedence
//!
//! From loosest to tightest: `or`, `and`, the equality tier (`=`, `<>`, `is`,
//! `in`, `like`), the comparison tier (`>`, `>=`, `<`, `<=`), prefix `not` / `-`.
//!
//! ### Ranges
//!
//! `between` is reserved but rejected. Ranges are written `x in 1..10` and
//! become `Binary(x, in, Binary(1, .., 10))`, rendered as `x between 1 and 10`.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{
    Binary, Call, Expr, ExprList, ExprRef, Grouping, Identifier, Literal, Parameter, Unary,
};
pub use tokens::{Token, TokenKind};
