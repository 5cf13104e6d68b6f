//! Turn anonymous function bindings into named function declarations.
//!
//! ```text
//! const go = async function(a) { … };
//! ```
//!
//! becomes
//!
//! ```text
//! async function go(a) { … }
//! ```
//!
//! Arrow functions and named function expressions are left alone; the
//! rewrite only applies to single-declarator `const`/`let` statements at the
//! top level.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use remod_parser::{Expr, FunctionDeclStmt, FunctionExpr, Module, Pat, StmtKind, VarKind};

pub const NAME: &str = "name-anonymous-function-vars";

pub struct NameAnonymousFunctions;

impl Rule for NameAnonymousFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let mut changed = false;

        for stmt in &mut module.stmts {
            let Some(decl) = stmt.var() else { continue };
            if !matches!(decl.kind, VarKind::Const | VarKind::Let) {
                continue;
            }
            let [d] = decl.declarators.as_slice() else {
                continue;
            };
            let Pat::Ident(name) = &d.pat else { continue };
            let Some(Expr::Function(f)) = &d.init else {
                continue;
            };
            if f.name.is_some() {
                continue;
            }

            let name = name.clone();
            let text = declaration_text(&name, f);
            cx.sink
                .log(NAME, None, format!("named anonymous function `{name}`"));
            stmt.kind = StmtKind::Function(FunctionDeclStmt { name, text });
            stmt.mark_edited();
            changed = true;
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

fn declaration_text(name: &str, f: &FunctionExpr) -> String {
    let mut text = String::new();
    if f.is_async {
        text.push_str("async ");
    }
    text.push_str("function");
    if f.is_generator {
        text.push('*');
    }
    text.push(' ');
    text.push_str(name);
    text.push('(');
    text.push_str(&f.params);
    text.push_str(") ");
    text.push_str(&f.body);
    text
}
