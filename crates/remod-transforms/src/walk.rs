//! Expression and raw-text walkers shared by the whole-tree rewrite rules.
//!
//! Two rules (`unwrap-module-exports-access`, `replace-dirname-filename`)
//! rewrite constructs that can occur anywhere in a unit, including inside
//! function bodies the parser carries as verbatim text. The walkers visit
//! both worlds: structured expressions bottom-up, and every raw text field
//! through a token-aware text editor, so strings and comments are never
//! touched.

use remod_parser::scanner::{tokenize, Token, TokenKind};
use remod_parser::{Expr, Module, ObjProp, StmtKind};

/// Apply `edit` to every expression in the module, bottom-up, and `rewrite`
/// to every raw text field (raw statements, function/class bodies, unmodeled
/// expression slices). Returns true when anything changed; edited statements
/// lose their verbatim slice so the printer rebuilds them.
pub fn rewrite_module(
    module: &mut Module,
    edit: &dyn Fn(&mut Expr) -> bool,
    rewrite: &dyn Fn(&str) -> Option<String>,
) -> bool {
    let mut changed_any = false;
    for stmt in &mut module.stmts {
        let changed = match &mut stmt.kind {
            StmtKind::Var(decl) => {
                let mut c = false;
                for d in &mut decl.declarators {
                    if let Some(init) = &mut d.init {
                        c |= rewrite_expr(init, edit, rewrite);
                    }
                }
                c
            }
            StmtKind::Expr(expr) => rewrite_expr(expr, edit, rewrite),
            StmtKind::ExportDefault(decl) => rewrite_expr(&mut decl.value, edit, rewrite),
            StmtKind::Function(f) => rewrite_text(&mut f.text, rewrite),
            StmtKind::Class(c) => rewrite_text(&mut c.text, rewrite),
            StmtKind::Raw(text) => rewrite_text(text, rewrite),
            StmtKind::Import(_) | StmtKind::ExportNamed(_) => false,
        };
        if changed {
            stmt.mark_edited();
            changed_any = true;
        }
    }
    changed_any
}

fn rewrite_text(text: &mut String, rewrite: &dyn Fn(&str) -> Option<String>) -> bool {
    if let Some(next) = rewrite(text) {
        *text = next;
        true
    } else {
        false
    }
}

fn rewrite_expr(
    expr: &mut Expr,
    edit: &dyn Fn(&mut Expr) -> bool,
    rewrite: &dyn Fn(&str) -> Option<String>,
) -> bool {
    let mut changed = match expr {
        Expr::Raw(text) => rewrite_text(text, rewrite),
        Expr::Member { obj, .. } => rewrite_expr(obj, edit, rewrite),
        Expr::Call { callee, args } => {
            let mut c = rewrite_expr(callee, edit, rewrite);
            for arg in args {
                c |= rewrite_expr(arg, edit, rewrite);
            }
            c
        }
        Expr::Object(props) => {
            let mut c = false;
            for prop in props {
                match prop {
                    ObjProp::KeyValue { value, .. } => c |= rewrite_expr(value, edit, rewrite),
                    ObjProp::Method(text)
                    | ObjProp::Spread(text)
                    | ObjProp::Computed(text)
                    | ObjProp::Other(text) => c |= rewrite_text(text, rewrite),
                    ObjProp::Shorthand(_) => {}
                }
            }
            c
        }
        Expr::Function(f) => {
            let mut c = rewrite_text(&mut f.params, rewrite);
            c |= rewrite_text(&mut f.body, rewrite);
            c
        }
        Expr::Assign { target, value } => {
            let mut c = rewrite_expr(target, edit, rewrite);
            c |= rewrite_expr(value, edit, rewrite);
            c
        }
        Expr::Ident(_) | Expr::Str(_) | Expr::Num(_) => false,
    };
    changed |= edit(expr);
    changed
}

/// One planned replacement of a token span within a text field.
pub struct TokenEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Run `plan` over the token list of `text` and splice the edits it returns.
/// `None` when the plan produces no edits.
pub fn edit_tokens(
    text: &str,
    plan: &dyn Fn(&str, &[Token]) -> Vec<TokenEdit>,
) -> Option<String> {
    let tokens = tokenize(text);
    let edits = plan(text, &tokens);
    if edits.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(text.len());
    let mut pos = 0usize;
    for edit in &edits {
        out.push_str(&text[pos..edit.start]);
        out.push_str(&edit.replacement);
        pos = edit.end;
    }
    out.push_str(&text[pos..]);
    Some(out)
}

/// True when the token at `i` is used as a property name (`a.foo`, `a?.foo`).
pub fn is_property_position(src: &str, tokens: &[Token], i: usize) -> bool {
    i > 0
        && tokens[i - 1].kind == TokenKind::Punct
        && matches!(tokens[i - 1].text(src), "." | "?.")
}
