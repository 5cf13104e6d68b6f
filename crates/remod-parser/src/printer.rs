//! Tree-to-text printer.
//!
//! Statements that still carry their original source slice reprint verbatim,
//! including the trivia that preceded them. Statements a rule edited or
//! synthesized are rebuilt from structure: string literals come out
//! single-quoted, named-export lists with more than two entries go one name
//! per line, and import lists wrap past a fixed column. These are cosmetic
//! output conventions, not semantics.

use crate::ast::*;

/// Column past which a single-line import list wraps.
const WRAP_COLUMN: usize = 120;

const INDENT: &str = "    ";

pub fn print(module: &Module) -> String {
    let mut out = String::with_capacity(module.source.len() + 64);
    for stmt in &module.stmts {
        out.push_str(&stmt.leading);
        match &stmt.raw {
            Some(raw) => out.push_str(raw),
            None => print_stmt(&mut out, &stmt.kind),
        }
    }
    out.push_str(&module.trailing);
    out
}

fn print_stmt(out: &mut String, kind: &StmtKind) {
    match kind {
        StmtKind::Var(decl) => print_var(out, decl),
        StmtKind::Import(decl) => print_import(out, decl),
        StmtKind::ExportNamed(decl) => print_export_named(out, decl),
        StmtKind::ExportDefault(decl) => {
            out.push_str("export default ");
            print_expr(out, &decl.value);
            out.push(';');
        }
        StmtKind::Expr(expr) => {
            print_expr(out, expr);
            out.push(';');
        }
        StmtKind::Function(decl) => out.push_str(&decl.text),
        StmtKind::Class(decl) => out.push_str(&decl.text),
        StmtKind::Raw(text) => out.push_str(text),
    }
}

fn print_var(out: &mut String, decl: &VarDecl) {
    out.push_str(decl.kind.as_str());
    out.push(' ');
    for (i, d) in decl.declarators.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        print_pat(out, &d.pat);
        if let Some(init) = &d.init {
            out.push_str(" = ");
            print_expr(out, init);
        }
    }
    out.push(';');
}

fn print_pat(out: &mut String, pat: &Pat) {
    match pat {
        Pat::Ident(name) => out.push_str(name),
        Pat::Object(props) => print_pat_props(out, props),
    }
}

fn print_pat_props(out: &mut String, props: &[PatProp]) {
    if props.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for (i, prop) in props.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match &prop.value {
            PatPropValue::Shorthand => out.push_str(&prop.key),
            PatPropValue::Alias(local) => {
                out.push_str(&prop.key);
                out.push_str(": ");
                out.push_str(local);
            }
            PatPropValue::Nested(inner) => {
                out.push_str(&prop.key);
                out.push_str(": ");
                print_pat_props(out, inner);
            }
            PatPropValue::Rest => {
                out.push_str("...");
                out.push_str(&prop.key);
            }
        }
    }
    out.push_str(" }");
}

fn print_import(out: &mut String, decl: &ImportDecl) {
    if decl.is_side_effect_only() {
        out.push_str("import ");
        print_str(out, &decl.source);
        out.push(';');
        return;
    }

    let named = if decl.named.is_empty() {
        None
    } else {
        Some(named_list(&decl.named))
    };

    let mut head = String::from("import ");
    let mut first = true;
    if let Some(default) = &decl.default {
        head.push_str(default);
        first = false;
    }
    if let Some(ns) = &decl.namespace {
        if !first {
            head.push_str(", ");
        }
        head.push_str("* as ");
        head.push_str(ns);
        first = false;
    }

    if let Some(list) = &named {
        if !first {
            head.push_str(", ");
        }
        let single = format!("{head}{{ {} }} from {};", list.join(", "), quoted(&decl.source));
        if single.len() <= WRAP_COLUMN {
            out.push_str(&single);
        } else {
            out.push_str(&head);
            out.push_str("{\n");
            for name in list {
                out.push_str(INDENT);
                out.push_str(name);
                out.push_str(",\n");
            }
            out.push_str("} from ");
            print_str(out, &decl.source);
            out.push(';');
        }
    } else {
        out.push_str(&head);
        out.push_str(" from ");
        print_str(out, &decl.source);
        out.push(';');
    }
}

fn named_list(specifiers: &[ImportSpecifier]) -> Vec<String> {
    specifiers
        .iter()
        .map(|s| {
            if s.imported == s.local {
                s.local.clone()
            } else {
                format!("{} as {}", s.imported, s.local)
            }
        })
        .collect()
}

fn print_export_named(out: &mut String, decl: &ExportNamed) {
    let names: Vec<String> = decl
        .specifiers
        .iter()
        .map(|s| {
            if s.local == s.exported {
                s.local.clone()
            } else {
                format!("{} as {}", s.local, s.exported)
            }
        })
        .collect();

    if names.is_empty() {
        out.push_str("export {};");
        return;
    }
    if names.len() > 2 {
        out.push_str("export {\n");
        for name in &names {
            out.push_str(INDENT);
            out.push_str(name);
            out.push_str(",\n");
        }
        out.push_str("};");
    } else {
        out.push_str("export { ");
        out.push_str(&names.join(", "));
        out.push_str(" };");
    }
}

pub fn print_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Ident(name) => out.push_str(name),
        Expr::Str(s) => print_str(out, s),
        Expr::Num(n) => out.push_str(n),
        Expr::Raw(text) => out.push_str(text),
        Expr::Member { obj, prop } => {
            print_expr(out, obj);
            out.push('.');
            out.push_str(prop);
        }
        Expr::Call { callee, args } => {
            print_expr(out, callee);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                print_expr(out, arg);
            }
            out.push(')');
        }
        Expr::Object(props) => print_object(out, props),
        Expr::Function(f) => print_function(out, f),
        Expr::Assign { target, value } => {
            print_expr(out, target);
            out.push_str(" = ");
            print_expr(out, value);
        }
    }
}

fn print_object(out: &mut String, props: &[ObjProp]) {
    if props.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for (i, prop) in props.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match prop {
            ObjProp::Shorthand(name) => out.push_str(name),
            ObjProp::KeyValue { key, value } => {
                out.push_str(key);
                out.push_str(": ");
                print_expr(out, value);
            }
            ObjProp::Method(text)
            | ObjProp::Spread(text)
            | ObjProp::Computed(text)
            | ObjProp::Other(text) => out.push_str(text),
        }
    }
    out.push_str(" }");
}

fn print_function(out: &mut String, f: &FunctionExpr) {
    if f.is_async {
        out.push_str("async ");
    }
    out.push_str("function");
    if f.is_generator {
        out.push('*');
    }
    if let Some(name) = &f.name {
        out.push(' ');
        out.push_str(name);
    }
    out.push('(');
    out.push_str(&f.params);
    out.push_str(") ");
    out.push_str(&f.body);
}

fn print_str(out: &mut String, s: &Str) {
    out.push_str(&quoted(s));
}

/// Single-quoted literal with minimal escaping.
pub fn quoted(s: &Str) -> String {
    let mut out = String::with_capacity(s.value.len() + 2);
    out.push('\'');
    for c in s.value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
