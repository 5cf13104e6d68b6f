//! Normalize side-effect require calls.
//!
//! ```text
//! require('dotenv').config();
//! ```
//!
//! becomes
//!
//! ```text
//! import dotenv from 'dotenv';
//! dotenv.config();
//! ```
//!
//! The import is inserted before the first existing import declaration (or at
//! the top of the unit), and an existing default import of the same specifier
//! is reused instead of minting a second binding.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use crate::rules::insert_stmt;
use crate::scope::{fresh_name, top_level_names};
use remod_parser::{Expr, ImportDecl, Module, Stmt, StmtKind};

pub const NAME: &str = "side-effect-require-to-import";

pub struct SideEffectImport;

impl Rule for SideEffectImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let mut names = top_level_names(&module);
        let mut changed = false;
        let mut i = 0usize;

        while i < module.stmts.len() {
            let Some((specifier, method, args)) = match_side_effect_call(&module.stmts[i]) else {
                i += 1;
                continue;
            };

            let local = match existing_default_import(&module.stmts, &specifier) {
                Some(local) => local,
                None => {
                    let local = fresh_name(&specifier, &names);
                    names.insert(local.clone());
                    let import = Stmt::synthetic(StmtKind::Import(ImportDecl::default_only(
                        local.clone(),
                        specifier.clone(),
                    )));
                    let at = first_import_index(&module.stmts).unwrap_or(0);
                    insert_stmt(&mut module.stmts, at, import);
                    if at <= i {
                        i += 1;
                    }
                    local
                }
            };

            cx.sink.log(
                NAME,
                None,
                format!("rewrote require('{specifier}').{method}() through `{local}`"),
            );
            let stmt = &mut module.stmts[i];
            stmt.kind = StmtKind::Expr(Expr::Call {
                callee: Box::new(Expr::member(Expr::ident(local), method)),
                args,
            });
            stmt.mark_edited();
            changed = true;
            i += 1;
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

/// `require('spec').method(args)` as a whole expression statement.
fn match_side_effect_call(stmt: &Stmt) -> Option<(String, String, Vec<Expr>)> {
    let StmtKind::Expr(Expr::Call { callee, args }) = &stmt.kind else {
        return None;
    };
    let Expr::Member { obj, prop } = &**callee else {
        return None;
    };
    let Expr::Call {
        callee: inner,
        args: inner_args,
    } = &**obj
    else {
        return None;
    };
    if inner.as_ident() != Some("require") {
        return None;
    }
    let [Expr::Str(specifier)] = inner_args.as_slice() else {
        return None;
    };
    Some((specifier.value.clone(), prop.clone(), args.clone()))
}

fn existing_default_import(stmts: &[Stmt], specifier: &str) -> Option<String> {
    stmts.iter().find_map(|s| {
        let decl = s.import()?;
        if decl.source.value == specifier {
            decl.default.clone()
        } else {
            None
        }
    })
}

fn first_import_index(stmts: &[Stmt]) -> Option<usize> {
    stmts
        .iter()
        .position(|s| matches!(s.kind, StmtKind::Import(_)))
}
