pub mod ast;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod rewrite;
pub mod rewriters;
pub mod sqlwhere;
mod treexl;
pub mod value;
pub mod visitor;

pub use ast::{Expr, ExprRef, Token, TokenKind};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use rewrite::Rewriter;
pub use sqlwhere::{SqlError, SqlWhereGenerator};
pub use treexl::{Error, Options, Treexl, parse, scan};
pub use value::Value;
pub use visitor::Visitor;
