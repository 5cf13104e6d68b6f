//! Rewrite `module.exports.<prop>` accesses to bare references.
//!
//! After the export conversion, the properties of the old export object are
//! plain top-level bindings, so `module.exports.foo()` anywhere in the unit
//! becomes `foo()`. This assumes `module` is never shadowed (the
//! convention this tool migrates never does) and performs no scope check.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use crate::walk::{edit_tokens, is_property_position, rewrite_module, TokenEdit};
use remod_parser::scanner::{Token, TokenKind};
use remod_parser::{Expr, Module};

pub const NAME: &str = "unwrap-module-exports-access";

pub struct UnwrapExportsAccess;

impl Rule for UnwrapExportsAccess {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let changed = rewrite_module(&mut module, &unwrap_member, &|text| {
            edit_tokens(text, &plan_edits)
        });
        if changed {
            cx.sink
                .log(NAME, None, "rewrote module.exports member accesses");
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

/// `module.exports.<prop>` as a structured expression.
fn unwrap_member(expr: &mut Expr) -> bool {
    let Expr::Member { obj, prop } = expr else {
        return false;
    };
    let Expr::Member {
        obj: inner,
        prop: inner_prop,
    } = &**obj
    else {
        return false;
    };
    if inner_prop != "exports" || inner.as_ident() != Some("module") {
        return false;
    }
    *expr = Expr::Ident(prop.clone());
    true
}

/// `module.exports.<prop>` inside verbatim text, string/comment aware.
fn plan_edits(src: &str, tokens: &[Token]) -> Vec<TokenEdit> {
    let mut edits = Vec::new();
    let mut i = 0usize;
    while i + 4 < tokens.len() {
        let matched = tokens[i].is_ident(src, "module")
            && !is_property_position(src, tokens, i)
            && tokens[i + 1].is_punct(src, ".")
            && tokens[i + 2].is_ident(src, "exports")
            && tokens[i + 3].is_punct(src, ".")
            && tokens[i + 4].kind == TokenKind::Ident;
        if matched {
            edits.push(TokenEdit {
                start: tokens[i].start,
                end: tokens[i + 4].end,
                replacement: tokens[i + 4].text(src).to_string(),
            });
            i += 5;
        } else {
            i += 1;
        }
    }
    edits
}
