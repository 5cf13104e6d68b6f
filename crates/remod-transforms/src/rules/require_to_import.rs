//! Convert top-level `require` bindings to static imports.
//!
//! ```text
//! const Lib = require('./lib');          → import Lib from './lib';
//! const { a, b: c } = require('./m');    → import { a, b as c } from './m';
//! const conf = require('./app').config;  → import { config as conf } from './app';
//! ```
//!
//! A `require` call that does not take exactly one string literal cannot be
//! converted without guessing the specifier, so the whole unit is left
//! untouched. Declarators that are not `require` calls are re-emitted as a
//! residual declaration after the generated imports.

use crate::pipeline::{stmt_line, RewriteResult, Rule, RuleCx};
use crate::rules::{probe_require, RequireProbe};
use remod_parser::{
    Declarator, ImportDecl, ImportSpecifier, Module, Pat, PatProp, PatPropValue, Stmt, StmtKind,
    VarDecl,
};

pub const NAME: &str = "require-to-import";

pub struct RequireToImport;

impl Rule for RequireToImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        // Validate every require call before touching anything: an invalid
        // call aborts the whole unit, and the abort must leave no partial
        // rewrites behind.
        for stmt in &module.stmts {
            let Some(decl) = stmt.var() else { continue };
            for d in &decl.declarators {
                let Some(init) = &d.init else { continue };
                if matches!(probe_require(init), RequireProbe::Invalid) {
                    let line = stmt_line(&module, stmt);
                    let reason =
                        "require call without a single string-literal argument".to_string();
                    cx.sink.error(NAME, line, reason.as_str());
                    return RewriteResult::Aborted { module, reason };
                }
            }
        }

        let mut changed = false;
        let mut i = 0usize;
        while i < module.stmts.len() {
            let Some(replacements) = convert_statement(&module, i, cx) else {
                i += 1;
                continue;
            };
            let count = replacements.len();
            let leading = module.stmts[i].leading.clone();
            module.stmts.splice(i..=i, replacements);
            module.stmts[i].leading = leading;
            changed = true;
            i += count;
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

/// Rewrite one variable statement into imports plus a possible residual
/// declaration. `None` when the statement converts to nothing.
fn convert_statement(module: &Module, idx: usize, cx: &RuleCx<'_>) -> Option<Vec<Stmt>> {
    let stmt = &module.stmts[idx];
    let decl = stmt.var()?;
    let line = stmt_line(module, stmt);

    let mut imports: Vec<ImportDecl> = Vec::new();
    let mut rest: Vec<Declarator> = Vec::new();

    for d in &decl.declarators {
        let probe = d.init.as_ref().map_or(RequireProbe::Not, probe_require);
        match (probe, &d.pat) {
            (RequireProbe::Plain(source), Pat::Ident(local)) => {
                imports.push(ImportDecl::default_only(local.clone(), source.value.clone()));
            }
            (RequireProbe::Plain(source), Pat::Object(props)) => {
                match named_specifiers(props) {
                    Some(named) => {
                        imports.push(ImportDecl::named_only(named, source.value.clone()))
                    }
                    None => {
                        cx.sink.log(
                            NAME,
                            line,
                            "destructuring pattern too complex to import, leaving declaration",
                        );
                        rest.push(d.clone());
                    }
                }
            }
            (RequireProbe::Property(source, prop), Pat::Ident(local)) => {
                imports.push(ImportDecl::named_only(
                    vec![ImportSpecifier::new(prop, local.clone())],
                    source.value.clone(),
                ));
            }
            (RequireProbe::Property(..), Pat::Object(_)) => {
                cx.sink.log(
                    NAME,
                    line,
                    "destructuring a property of a require call is not supported, leaving declaration",
                );
                rest.push(d.clone());
            }
            _ => rest.push(d.clone()),
        }
    }

    if imports.is_empty() {
        return None;
    }

    let mut out: Vec<Stmt> = imports
        .into_iter()
        .map(|import| Stmt::synthetic(StmtKind::Import(import)))
        .collect();
    if !rest.is_empty() {
        cx.sink.warn(
            NAME,
            line,
            "mixed declaration split; non-require declarators re-emitted after the imports",
        );
        out.push(Stmt::synthetic(StmtKind::Var(VarDecl {
            kind: decl.kind,
            declarators: rest,
        })));
    }
    Some(out)
}

/// Flat pattern properties as import specifiers; `None` when the pattern
/// nests or rests.
fn named_specifiers(props: &[PatProp]) -> Option<Vec<ImportSpecifier>> {
    props
        .iter()
        .map(|p| match &p.value {
            PatPropValue::Shorthand => Some(ImportSpecifier::new(p.key.clone(), p.key.clone())),
            PatPropValue::Alias(local) => Some(ImportSpecifier::new(p.key.clone(), local.clone())),
            PatPropValue::Nested(_) | PatPropValue::Rest => None,
        })
        .collect()
}
