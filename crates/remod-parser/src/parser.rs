//! Statement splitter and shape recognizer.
//!
//! Parsing happens in two stages. The splitter walks the token stream and
//! cuts it into top-level statements using bracket depth, explicit `;`, block
//! closers, and a semicolon-insertion heuristic at line breaks. Each
//! statement slice is then matched against the shapes the rewrite rules
//! consume (variable declarations, imports, exports, assignment and call
//! expression statements, function/class declarations); a slice that matches
//! nothing becomes a verbatim `Raw` statement.
//!
//! Misjudging a boundary or a shape is safe by construction: the statement
//! degrades to `Raw`, the rules skip it, and the printer reproduces the
//! original text.

use crate::ast::*;
use crate::scanner::{tokenize, Token, TokenKind};
use std::path::PathBuf;

/// Parse `source` into a statement-level tree.
pub fn parse(source: &str, path: impl Into<PathBuf>) -> Module {
    let tokens = tokenize(source);
    let ranges = split_statements(source, &tokens);

    let mut stmts = Vec::with_capacity(ranges.len());
    let mut prev_end = 0usize;
    for range in &ranges {
        let slice = &tokens[range.clone()];
        let start = slice.first().map_or(prev_end, |t| t.start);
        let end = slice.last().map_or(prev_end, |t| t.end);
        let leading = source[prev_end..start].to_string();
        let raw = source[start..end].to_string();
        let kind = parse_stmt(source, slice, &raw);
        stmts.push(Stmt {
            leading,
            raw: Some(raw),
            span: Some((start, end)),
            kind,
        });
        prev_end = end;
    }

    Module {
        path: path.into(),
        source: source.to_string(),
        stmts,
        trailing: source[prev_end..].to_string(),
    }
}

// ---------------------------------------------------------------- splitting

fn split_statements(src: &str, tokens: &[Token]) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut i = 0usize;
    while i < tokens.len() {
        let start = i;
        let block_form = starts_block_form(src, &tokens[start..]);
        let mut depth: i32 = 0;
        let mut j = i;
        while j < tokens.len() {
            let t = &tokens[j];
            if j > start && depth == 0 && t.newline_before && asi_breaks(src, &tokens[j - 1], t) {
                break;
            }
            if t.kind == TokenKind::Punct {
                match t.text(src) {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" => depth -= 1,
                    "}" => {
                        depth -= 1;
                        if depth == 0 && block_form && !continues_block(src, tokens.get(j + 1)) {
                            j += 1;
                            break;
                        }
                    }
                    ";" if depth == 0 => {
                        j += 1;
                        break;
                    }
                    _ => {}
                }
            }
            j += 1;
        }
        ranges.push(start..j.max(start + 1));
        i = j.max(start + 1);
    }
    ranges
}

/// Statements that end at the `}` closing their body rather than at a `;`.
fn starts_block_form(src: &str, tokens: &[Token]) -> bool {
    let word = |k: usize| {
        tokens
            .get(k)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(src))
    };
    match word(0) {
        Some("function" | "class" | "if" | "for" | "while" | "switch" | "try" | "do") => true,
        Some("async") => word(1) == Some("function"),
        Some("export") => match word(1) {
            Some("function" | "class") => true,
            Some("async") => word(2) == Some("function"),
            Some("default") => match word(2) {
                Some("function" | "class") => true,
                Some("async") => word(3) == Some("function"),
                _ => false,
            },
            _ => false,
        },
        _ => false,
    }
}

/// `} else`, `} catch`, `} finally`, `} while` keep the statement open.
fn continues_block(src: &str, next: Option<&Token>) -> bool {
    next.is_some_and(|t| {
        t.kind == TokenKind::Ident
            && matches!(t.text(src), "else" | "catch" | "finally" | "while")
    })
}

/// Heuristic semicolon insertion at a line break: the previous token can end
/// an expression and the current one cannot continue it.
fn asi_breaks(src: &str, prev: &Token, cur: &Token) -> bool {
    let prev_ends = match prev.kind {
        TokenKind::Ident
        | TokenKind::Str { .. }
        | TokenKind::Num
        | TokenKind::Template
        | TokenKind::Regex => true,
        TokenKind::Punct => matches!(prev.text(src), ")" | "]" | "}" | "++" | "--"),
    };
    if !prev_ends {
        return false;
    }
    match cur.kind {
        TokenKind::Ident => !matches!(cur.text(src), "in" | "instanceof"),
        TokenKind::Str { .. } | TokenKind::Num | TokenKind::Regex => true,
        TokenKind::Punct => matches!(cur.text(src), "++" | "--"),
        TokenKind::Template => false,
    }
}

// ---------------------------------------------------------------- statements

fn parse_stmt(src: &str, tokens: &[Token], raw: &str) -> StmtKind {
    let word = |k: usize| {
        tokens
            .get(k)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(src))
    };

    let parsed = match word(0) {
        Some("import") => parse_import(src, tokens),
        Some("export") => parse_export(src, tokens),
        Some("const") | Some("let") | Some("var") => parse_var(src, tokens),
        Some("function") => function_decl_name(src, tokens, 1).map(|name| {
            StmtKind::Function(FunctionDeclStmt {
                name,
                text: raw.to_string(),
            })
        }),
        Some("async") if word(1) == Some("function") => {
            function_decl_name(src, tokens, 2).map(|name| {
                StmtKind::Function(FunctionDeclStmt {
                    name,
                    text: raw.to_string(),
                })
            })
        }
        Some("class") => word(1).map(|name| {
            StmtKind::Class(ClassDeclStmt {
                name: name.to_string(),
                text: raw.to_string(),
            })
        }),
        _ => parse_expr_stmt(src, tokens),
    };

    parsed.unwrap_or_else(|| StmtKind::Raw(raw.to_string()))
}

fn function_decl_name(src: &str, tokens: &[Token], mut at: usize) -> Option<String> {
    if tokens.get(at).is_some_and(|t| t.is_punct(src, "*")) {
        at += 1;
    }
    tokens
        .get(at)
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text(src).to_string())
}

fn strip_semi<'a>(src: &str, tokens: &'a [Token]) -> &'a [Token] {
    match tokens.last() {
        Some(t) if t.is_punct(src, ";") => &tokens[..tokens.len() - 1],
        _ => tokens,
    }
}

fn parse_expr_stmt(src: &str, tokens: &[Token]) -> Option<StmtKind> {
    let body = strip_semi(src, tokens);
    if body.is_empty() {
        return None;
    }
    match parse_expr(src, body) {
        Expr::Raw(_) => None,
        expr @ (Expr::Assign { .. } | Expr::Call { .. } | Expr::Member { .. }) => {
            Some(StmtKind::Expr(expr))
        }
        _ => None,
    }
}

// ------------------------------------------------------------- declarations

fn parse_var(src: &str, tokens: &[Token]) -> Option<StmtKind> {
    let kind = match tokens[0].text(src) {
        "const" => VarKind::Const,
        "let" => VarKind::Let,
        "var" => VarKind::Var,
        _ => return None,
    };
    let body = strip_semi(src, &tokens[1..]);
    if body.is_empty() {
        return None;
    }

    let mut declarators = Vec::new();
    for slice in split_top_level(src, body, ",") {
        declarators.push(parse_declarator(src, slice)?);
    }
    Some(StmtKind::Var(VarDecl { kind, declarators }))
}

fn parse_declarator(src: &str, tokens: &[Token]) -> Option<Declarator> {
    let (pat, rest) = parse_pat(src, tokens)?;
    let init = match rest {
        [] => None,
        [eq, init @ ..] if eq.is_punct(src, "=") && !init.is_empty() => {
            Some(parse_expr(src, init))
        }
        _ => return None,
    };
    Some(Declarator { pat, init })
}

fn parse_pat<'a>(src: &str, tokens: &'a [Token]) -> Option<(Pat, &'a [Token])> {
    match tokens.first()? {
        t if t.kind == TokenKind::Ident && !is_reserved(t.text(src)) => {
            Some((Pat::Ident(t.text(src).to_string()), &tokens[1..]))
        }
        t if t.is_punct(src, "{") => {
            let close = matching_close(src, tokens, 0)?;
            let props = parse_pat_props(src, &tokens[1..close])?;
            Some((Pat::Object(props), &tokens[close + 1..]))
        }
        _ => None,
    }
}

fn parse_pat_props(src: &str, tokens: &[Token]) -> Option<Vec<PatProp>> {
    let mut props = Vec::new();
    for slice in split_top_level(src, tokens, ",") {
        if slice.is_empty() {
            continue; // trailing comma
        }
        props.push(parse_pat_prop(src, slice)?);
    }
    Some(props)
}

fn parse_pat_prop(src: &str, tokens: &[Token]) -> Option<PatProp> {
    if tokens[0].is_punct(src, "...") {
        let name = tokens.get(1).filter(|t| t.kind == TokenKind::Ident)?;
        if tokens.len() != 2 {
            return None;
        }
        return Some(PatProp {
            key: name.text(src).to_string(),
            value: PatPropValue::Rest,
        });
    }

    let key = tokens
        .first()
        .filter(|t| t.kind == TokenKind::Ident)?
        .text(src)
        .to_string();
    match &tokens[1..] {
        [] => Some(PatProp {
            key,
            value: PatPropValue::Shorthand,
        }),
        [colon, rest @ ..] if colon.is_punct(src, ":") => match rest {
            [t] if t.kind == TokenKind::Ident => Some(PatProp {
                key,
                value: PatPropValue::Alias(t.text(src).to_string()),
            }),
            [open, ..] if open.is_punct(src, "{") => {
                let close = matching_close(src, rest, 0)?;
                if close != rest.len() - 1 {
                    return None;
                }
                let inner = parse_pat_props(src, &rest[1..close])?;
                Some(PatProp {
                    key,
                    value: PatPropValue::Nested(inner),
                })
            }
            _ => None,
        },
        // Default values and anything else are out of scope for the rules.
        _ => None,
    }
}

// ------------------------------------------------------------------ imports

fn parse_import(src: &str, tokens: &[Token]) -> Option<StmtKind> {
    let body = strip_semi(src, tokens);
    let mut decl = ImportDecl {
        default: None,
        namespace: None,
        named: Vec::new(),
        source: Str::new(""),
    };
    let mut i = 1usize;

    match body.get(i)? {
        t if matches!(t.kind, TokenKind::Str { .. }) => {
            decl.source = str_lit(src, t);
            return (i + 1 == body.len()).then_some(StmtKind::Import(decl));
        }
        t if t.kind == TokenKind::Ident && t.text(src) != "from" => {
            decl.default = Some(t.text(src).to_string());
            i += 1;
            if body.get(i).is_some_and(|t| t.is_punct(src, ",")) {
                i += 1;
                i = parse_import_clause(src, body, i, &mut decl)?;
            }
        }
        _ => {
            i = parse_import_clause(src, body, i, &mut decl)?;
        }
    }

    if !body.get(i)?.is_ident(src, "from") {
        return None;
    }
    let source = body.get(i + 1)?;
    if !matches!(source.kind, TokenKind::Str { .. }) || i + 2 != body.len() {
        return None;
    }
    decl.source = str_lit(src, source);
    Some(StmtKind::Import(decl))
}

/// Parse `* as name` or `{ a, b as c }` starting at `i`; returns the index
/// after the clause.
fn parse_import_clause(
    src: &str,
    tokens: &[Token],
    i: usize,
    decl: &mut ImportDecl,
) -> Option<usize> {
    match tokens.get(i)? {
        t if t.is_punct(src, "*") => {
            if !tokens.get(i + 1)?.is_ident(src, "as") {
                return None;
            }
            let local = tokens.get(i + 2).filter(|t| t.kind == TokenKind::Ident)?;
            decl.namespace = Some(local.text(src).to_string());
            Some(i + 3)
        }
        t if t.is_punct(src, "{") => {
            let close = i + matching_close(src, &tokens[i..], 0)?;
            for slice in split_top_level(src, &tokens[i + 1..close], ",") {
                match slice {
                    [] => continue,
                    [t] if t.kind == TokenKind::Ident => {
                        let name = t.text(src);
                        decl.named.push(ImportSpecifier::new(name, name));
                    }
                    [imp, as_kw, loc]
                        if imp.kind == TokenKind::Ident
                            && as_kw.is_ident(src, "as")
                            && loc.kind == TokenKind::Ident =>
                    {
                        decl.named
                            .push(ImportSpecifier::new(imp.text(src), loc.text(src)));
                    }
                    _ => return None,
                }
            }
            Some(close + 1)
        }
        _ => None,
    }
}

// ------------------------------------------------------------------ exports

fn parse_export(src: &str, tokens: &[Token]) -> Option<StmtKind> {
    let body = strip_semi(src, tokens);
    match body.get(1)? {
        t if t.is_punct(src, "{") => {
            let close = 1 + matching_close(src, &body[1..], 0)?;
            if close + 1 != body.len() {
                return None; // `export { … } from '…'` re-export, unmodeled
            }
            let mut specifiers = Vec::new();
            for slice in split_top_level(src, &body[2..close], ",") {
                match slice {
                    [] => continue,
                    [t] if t.kind == TokenKind::Ident => {
                        let name = t.text(src);
                        specifiers.push(ExportSpecifier {
                            local: name.to_string(),
                            exported: name.to_string(),
                        });
                    }
                    [loc, as_kw, exp]
                        if loc.kind == TokenKind::Ident
                            && as_kw.is_ident(src, "as")
                            && exp.kind == TokenKind::Ident =>
                    {
                        specifiers.push(ExportSpecifier {
                            local: loc.text(src).to_string(),
                            exported: exp.text(src).to_string(),
                        });
                    }
                    _ => return None,
                }
            }
            Some(StmtKind::ExportNamed(ExportNamed { specifiers }))
        }
        t if t.is_ident(src, "default") => {
            let rest = &body[2..];
            if rest.is_empty() {
                return None;
            }
            Some(StmtKind::ExportDefault(ExportDefault {
                value: parse_expr(src, rest),
            }))
        }
        _ => None, // `export const …` etc. stay raw
    }
}

// -------------------------------------------------------------- expressions

/// Recognize an expression shape; falls back to `Expr::Raw` over the slice's
/// verbatim text.
pub fn parse_expr(src: &str, tokens: &[Token]) -> Expr {
    let raw = || Expr::Raw(slice_text(src, tokens).to_string());
    if tokens.is_empty() {
        return Expr::Raw(String::new());
    }

    // Assignment with a plain member-chain target.
    if let Some(eq) = find_top_level(src, tokens, "=") {
        if let Some(target) = parse_member_chain(src, &tokens[..eq]) {
            if eq + 1 < tokens.len() {
                let value = parse_expr(src, &tokens[eq + 1..]);
                return Expr::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                };
            }
        }
        return raw();
    }

    match parse_postfix_chain(src, tokens) {
        Some((expr, rest)) if rest.is_empty() => expr,
        _ => raw(),
    }
}

/// `a`, `a.b`, `a.b.c`, nothing else.
fn parse_member_chain(src: &str, tokens: &[Token]) -> Option<Expr> {
    let first = tokens.first()?;
    if first.kind != TokenKind::Ident {
        return None;
    }
    let mut expr = Expr::Ident(first.text(src).to_string());
    let mut i = 1;
    while i < tokens.len() {
        if !tokens[i].is_punct(src, ".") {
            return None;
        }
        let prop = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Ident)?;
        expr = Expr::member(expr, prop.text(src));
        i += 2;
    }
    Some(expr)
}

fn parse_postfix_chain<'a>(src: &str, tokens: &'a [Token]) -> Option<(Expr, &'a [Token])> {
    let (mut expr, mut rest) = parse_primary(src, tokens)?;
    loop {
        match rest.first() {
            Some(t) if t.is_punct(src, ".") => {
                let prop = rest.get(1).filter(|t| t.kind == TokenKind::Ident)?;
                expr = Expr::member(expr, prop.text(src));
                rest = &rest[2..];
            }
            Some(t) if t.is_punct(src, "(") => {
                let close = matching_close(src, rest, 0)?;
                let mut args = Vec::new();
                for slice in split_top_level(src, &rest[1..close], ",") {
                    if slice.is_empty() {
                        continue;
                    }
                    args.push(parse_expr(src, slice));
                }
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
                rest = &rest[close + 1..];
            }
            // Computed access, optional chaining, operators: unmodeled.
            Some(_) => return Some((expr, rest)),
            None => return Some((expr, rest)),
        }
    }
}

fn parse_primary<'a>(src: &str, tokens: &'a [Token]) -> Option<(Expr, &'a [Token])> {
    let first = tokens.first()?;
    match &first.kind {
        TokenKind::Str { .. } => Some((Expr::Str(str_lit(src, first)), &tokens[1..])),
        TokenKind::Num => Some((Expr::Num(first.text(src).to_string()), &tokens[1..])),
        TokenKind::Ident => match first.text(src) {
            "function" => parse_function_expr(src, tokens, false),
            "async" if tokens.get(1).is_some_and(|t| t.is_ident(src, "function")) => {
                parse_function_expr(src, tokens, true)
            }
            name if !is_reserved(name) => Some((Expr::Ident(name.to_string()), &tokens[1..])),
            _ => None,
        },
        TokenKind::Punct if first.is_punct(src, "{") => {
            let close = matching_close(src, tokens, 0)?;
            let props = parse_obj_props(src, &tokens[1..close]);
            Some((Expr::Object(props), &tokens[close + 1..]))
        }
        _ => None,
    }
}

fn parse_function_expr<'a>(
    src: &str,
    tokens: &'a [Token],
    is_async: bool,
) -> Option<(Expr, &'a [Token])> {
    let mut i = if is_async { 2 } else { 1 };
    let is_generator = tokens.get(i).is_some_and(|t| t.is_punct(src, "*"));
    if is_generator {
        i += 1;
    }
    let name = tokens
        .get(i)
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text(src).to_string());
    if name.is_some() {
        i += 1;
    }

    if !tokens.get(i)?.is_punct(src, "(") {
        return None;
    }
    let params_close = i + matching_close(src, &tokens[i..], 0)?;
    let params = slice_text(src, &tokens[i + 1..params_close]).to_string();

    let body_open = params_close + 1;
    if !tokens.get(body_open)?.is_punct(src, "{") {
        return None;
    }
    let body_close = body_open + matching_close(src, &tokens[body_open..], 0)?;
    let body = src[tokens[body_open].start..tokens[body_close].end].to_string();

    Some((
        Expr::Function(FunctionExpr {
            name,
            is_async,
            is_generator,
            params,
            body,
        }),
        &tokens[body_close + 1..],
    ))
}

fn parse_obj_props(src: &str, tokens: &[Token]) -> Vec<ObjProp> {
    let mut props = Vec::new();
    for slice in split_top_level(src, tokens, ",") {
        if slice.is_empty() {
            continue;
        }
        props.push(parse_obj_prop(src, slice));
    }
    props
}

fn parse_obj_prop(src: &str, tokens: &[Token]) -> ObjProp {
    let text = slice_text(src, tokens).to_string();
    let first = &tokens[0];

    if first.is_punct(src, "...") {
        return ObjProp::Spread(text);
    }
    if first.is_punct(src, "[") {
        return ObjProp::Computed(text);
    }
    if first.kind != TokenKind::Ident {
        return ObjProp::Other(text);
    }

    // get/set/async/generator method heads
    if matches!(first.text(src), "get" | "set" | "async")
        && tokens.get(1).is_some_and(|t| t.kind == TokenKind::Ident)
    {
        return ObjProp::Method(text);
    }

    match tokens.get(1) {
        None => ObjProp::Shorthand(first.text(src).to_string()),
        Some(t) if t.is_punct(src, "(") => ObjProp::Method(text),
        Some(t) if t.is_punct(src, ":") => {
            let value = parse_expr(src, &tokens[2..]);
            ObjProp::KeyValue {
                key: first.text(src).to_string(),
                value,
            }
        }
        Some(_) => ObjProp::Other(text),
    }
}

// ------------------------------------------------------------------ helpers

fn str_lit(src: &str, token: &Token) -> Str {
    match &token.kind {
        TokenKind::Str { value } => Str::new(value.clone()),
        _ => Str::new(token.text(src)),
    }
}

fn slice_text<'a>(src: &'a str, tokens: &[Token]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(a), Some(b)) => &src[a.start..b.end],
        _ => "",
    }
}

/// Index of the closer matching the opener at `open` (same bracket family as
/// whatever opens there).
fn matching_close(src: &str, tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (k, t) in tokens.iter().enumerate().skip(open) {
        if t.kind == TokenKind::Punct {
            match t.text(src) {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(k);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Split a slice at depth-0 occurrences of `sep`.
fn split_top_level<'a>(src: &str, tokens: &'a [Token], sep: &str) -> Vec<&'a [Token]> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (k, t) in tokens.iter().enumerate() {
        if t.kind == TokenKind::Punct {
            match t.text(src) {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth -= 1,
                s if s == sep && depth == 0 => {
                    out.push(&tokens[start..k]);
                    start = k + 1;
                }
                _ => {}
            }
        }
    }
    out.push(&tokens[start..]);
    if out.len() == 1 && out[0].is_empty() {
        out.clear();
    }
    out
}

/// First depth-0 occurrence of punctuation `p`.
fn find_top_level(src: &str, tokens: &[Token], p: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (k, t) in tokens.iter().enumerate() {
        if t.kind == TokenKind::Punct {
            match t.text(src) {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth -= 1,
                s if s == p && depth == 0 => return Some(k),
                _ => {}
            }
        }
    }
    None
}

fn is_reserved(word: &str) -> bool {
    matches!(
        word,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "export"
            | "extends"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "let"
    )
}
