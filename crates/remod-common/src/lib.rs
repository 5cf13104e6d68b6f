//! Common types and utilities for the remod module migrator.
//!
//! This crate provides the foundational pieces shared by the parser,
//! the transform rules, and the CLI driver:
//! - Diagnostics sink (`Diagnostic`, `DiagnosticSink`, `Severity`)
//! - Filesystem host capability (`Host`, `OsHost`, `MemoryHost`)
//! - Source position helpers (`line_of_offset`)

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};

pub mod host;
pub use host::{Host, MemoryHost, OsHost};

pub mod position;
pub use position::line_of_offset;
