//! Rewrite rules and pipeline for migrating call-based modules to static
//! import/export declarations.
//!
//! The entry point is [`pipeline::transform`]: parse a unit, fold it through
//! an ordered list of independent tree-rewrite rules, and print the result.
//! Rules coordinate only through the shape of the tree they pass along.
//! Cross-file knowledge comes from two leaf components: the top-level scope
//! index ([`scope`]) and the export-shape resolver ([`export_shape`]).

pub mod export_shape;
pub mod pipeline;
pub mod rules;
pub mod scope;
mod walk;

pub use export_shape::{ExportShape, ShapeResolver};
pub use pipeline::{transform, Config, Outcome, RewriteResult, Rule, RuleCx};
