//! The rewrite rules, one module per rule.
//!
//! Order matters: `default_rule_names` is the pipeline's default sequence.
//! Earlier rules establish the shapes later ones build on: exports are
//! converted before requires so the export rule still sees the original
//! binding set; path suffixes are added before the shape-dependent import
//! rules resolve them; the destructured-default merge runs before namespace
//! selection so a merged default import can still be upgraded.

mod exports_object;
mod flatten_nested;
mod import_meta;
mod import_paths;
mod merge_destructured;
mod named_function;
mod namespace_import;
mod require_to_import;
mod side_effect_import;
mod unwrap_exports;

use crate::pipeline::Rule;
use remod_parser::{Expr, Stmt, Str};

/// Default pipeline order.
pub fn default_rule_names() -> &'static [&'static str] {
    &[
        side_effect_import::NAME,
        flatten_nested::NAME,
        exports_object::NAME,
        require_to_import::NAME,
        import_paths::NAME,
        merge_destructured::NAME,
        namespace_import::NAME,
        unwrap_exports::NAME,
        named_function::NAME,
        import_meta::NAME,
    ]
}

pub fn rule_by_name(name: &str) -> Option<Box<dyn Rule>> {
    let rule: Box<dyn Rule> = match name {
        side_effect_import::NAME => Box::new(side_effect_import::SideEffectImport),
        flatten_nested::NAME => Box::new(flatten_nested::FlattenNestedPattern),
        exports_object::NAME => Box::new(exports_object::ExportsObject),
        require_to_import::NAME => Box::new(require_to_import::RequireToImport),
        import_paths::NAME => Box::new(import_paths::ImportPathSuffix),
        merge_destructured::NAME => Box::new(merge_destructured::MergeDestructuredDefault),
        namespace_import::NAME => Box::new(namespace_import::NamespaceImport),
        unwrap_exports::NAME => Box::new(unwrap_exports::UnwrapExportsAccess),
        named_function::NAME => Box::new(named_function::NameAnonymousFunctions),
        import_meta::NAME => Box::new(import_meta::ReplaceDirnameFilename),
        _ => return None,
    };
    Some(rule)
}

/// How a declarator initializer relates to a `require` call.
pub(crate) enum RequireProbe<'a> {
    /// Not a `require` call at all.
    Not,
    /// `require('spec')`
    Plain(&'a Str),
    /// `require('spec').prop`
    Property(&'a Str, &'a str),
    /// A `require` call whose arguments are not a single string literal.
    Invalid,
}

pub(crate) fn probe_require(expr: &Expr) -> RequireProbe<'_> {
    match expr {
        Expr::Call { callee, args } if callee.as_ident() == Some("require") => {
            match args.as_slice() {
                [Expr::Str(s)] => RequireProbe::Plain(s),
                _ => RequireProbe::Invalid,
            }
        }
        Expr::Member { obj, prop } => match probe_require(obj) {
            RequireProbe::Plain(s) => RequireProbe::Property(s, prop),
            RequireProbe::Invalid => RequireProbe::Invalid,
            _ => RequireProbe::Not,
        },
        _ => RequireProbe::Not,
    }
}

/// Insert a statement, keeping the unit's opening trivia (shebang, header
/// comments) at the very top and statements separated by a line break.
pub(crate) fn insert_stmt(stmts: &mut Vec<Stmt>, idx: usize, mut stmt: Stmt) {
    if idx == 0 {
        if let Some(first) = stmts.first_mut() {
            stmt.leading = std::mem::replace(&mut first.leading, "\n".to_string());
        } else {
            stmt.leading = String::new();
        }
    }
    stmts.insert(idx, stmt);
}
