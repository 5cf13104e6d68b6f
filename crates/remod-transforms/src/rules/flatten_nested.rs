//! Flatten two-level destructuring of a require result.
//!
//! ```text
//! const { Models: { User } } = require('../models');
//! ```
//!
//! becomes
//!
//! ```text
//! const { Models } = require('../models');
//! const User = Models.User;
//! ```
//!
//! Only single-level patterns come out of this rule, which is what the
//! call-to-import conversion further down the pipeline can handle.

use crate::pipeline::{stmt_line, RewriteResult, Rule, RuleCx};
use crate::rules::{probe_require, RequireProbe};
use remod_parser::{
    Declarator, Expr, Module, Pat, PatProp, PatPropValue, Stmt, StmtKind, VarDecl, VarKind,
};

pub const NAME: &str = "flatten-nested-require-pattern";

pub struct FlattenNestedPattern;

impl Rule for FlattenNestedPattern {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let mut changed = false;
        let mut i = 0usize;

        while i < module.stmts.len() {
            let Some(props) = match_nested_require(&module.stmts[i]) else {
                i += 1;
                continue;
            };

            // Second-level patterns must be flat themselves; deeper nesting
            // cannot be rewritten without losing bindings.
            if !nested_levels_are_flat(&props) {
                let line = stmt_line(&module, &module.stmts[i]);
                cx.sink
                    .log(NAME, line, "pattern nested deeper than two levels, skipping");
                i += 1;
                continue;
            }

            let mut follow_ups: Vec<Stmt> = Vec::new();
            let mut flat: Vec<PatProp> = Vec::new();
            for prop in &props {
                match &prop.value {
                    PatPropValue::Nested(inner) => {
                        flat.push(PatProp {
                            key: prop.key.clone(),
                            value: PatPropValue::Shorthand,
                        });
                        for p in inner {
                            let local = p.bound_name().unwrap_or(&p.key).to_string();
                            follow_ups.push(Stmt::synthetic(StmtKind::Var(VarDecl {
                                kind: VarKind::Const,
                                declarators: vec![Declarator {
                                    pat: Pat::Ident(local),
                                    init: Some(Expr::member(
                                        Expr::ident(prop.key.clone()),
                                        p.key.clone(),
                                    )),
                                }],
                            })));
                        }
                    }
                    _ => flat.push(prop.clone()),
                }
            }

            let stmt = &mut module.stmts[i];
            if let StmtKind::Var(decl) = &mut stmt.kind {
                decl.declarators[0].pat = Pat::Object(flat);
            }
            stmt.mark_edited();

            let count = follow_ups.len();
            for (k, follow_up) in follow_ups.into_iter().enumerate() {
                module.stmts.insert(i + 1 + k, follow_up);
            }
            changed = true;
            i += 1 + count;
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

/// Single-declarator `require` destructure with at least one nested property.
fn match_nested_require(stmt: &Stmt) -> Option<Vec<PatProp>> {
    let decl = stmt.var()?;
    let [declarator] = decl.declarators.as_slice() else {
        return None;
    };
    let init = declarator.init.as_ref()?;
    if !matches!(probe_require(init), RequireProbe::Plain(_)) {
        return None;
    }
    let Pat::Object(props) = &declarator.pat else {
        return None;
    };
    props
        .iter()
        .any(|p| matches!(p.value, PatPropValue::Nested(_)))
        .then(|| props.clone())
}

fn nested_levels_are_flat(props: &[PatProp]) -> bool {
    props.iter().all(|p| match &p.value {
        PatPropValue::Nested(inner) => inner
            .iter()
            .all(|q| matches!(q.value, PatPropValue::Shorthand | PatPropValue::Alias(_))),
        _ => true,
    })
}
