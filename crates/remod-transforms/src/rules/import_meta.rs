//! Replace `__dirname` / `__filename` with their `import.meta` accessors.
//!
//! Pure identifier substitution across the whole unit, string/comment aware
//! but with no scope analysis: a local variable shadowing one of these names
//! would be rewritten too. The convention this tool migrates never shadows
//! them.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use crate::walk::{edit_tokens, is_property_position, rewrite_module, TokenEdit};
use remod_parser::scanner::{Token, TokenKind};
use remod_parser::{Expr, Module};

pub const NAME: &str = "replace-dirname-filename";

const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("__dirname", "import.meta.dirname"),
    ("__filename", "import.meta.filename"),
];

pub struct ReplaceDirnameFilename;

impl Rule for ReplaceDirnameFilename {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let changed = rewrite_module(&mut module, &substitute_ident, &|text| {
            edit_tokens(text, &plan_edits)
        });
        if changed {
            cx.sink.log(
                NAME,
                None,
                "replaced __dirname/__filename with import.meta accessors",
            );
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}

fn substitute_ident(expr: &mut Expr) -> bool {
    let Expr::Ident(name) = expr else { return false };
    let Some((_, replacement)) = SUBSTITUTIONS.iter().find(|(magic, _)| *magic == name.as_str())
    else {
        return false;
    };
    *expr = Expr::Raw(replacement.to_string());
    true
}

fn plan_edits(src: &str, tokens: &[Token]) -> Vec<TokenEdit> {
    let mut edits = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Ident || is_property_position(src, tokens, i) {
            continue;
        }
        let text = token.text(src);
        if let Some((_, replacement)) = SUBSTITUTIONS.iter().find(|(magic, _)| *magic == text) {
            edits.push(TokenEdit {
                start: token.start,
                end: token.end,
                replacement: replacement.to_string(),
            });
        }
    }
    edits
}
