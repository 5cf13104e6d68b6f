//! Bounded JavaScript front end for remod.
//!
//! This crate is the tree provider the rewrite pipeline consumes:
//! `parse(text) -> Module`, `print(&Module) -> text`, a statement-level AST
//! with verbatim fallbacks, and the tokenizer both sides share. It is not a
//! full ECMAScript parser: it models exactly the top-level statement shapes
//! the migration rules rewrite, and carries everything else as raw text that
//! reprints byte-for-byte.

pub mod ast;
pub mod parser;
pub mod printer;
pub mod scanner;

pub use ast::*;
pub use parser::parse;
pub use printer::print;
