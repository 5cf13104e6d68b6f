//! Top-level binding index and fresh-name generation.
//!
//! Any rule that synthesizes a binding consults `top_level_names` first and
//! inserts each generated name back into the live set before generating the
//! next one, so collision checks always see the names minted earlier in the
//! same run.

use remod_parser::{Module, Pat, PatProp, PatPropValue, StmtKind};
use rustc_hash::FxHashSet;

/// Fallback base when a specifier yields no usable identifier characters.
const FALLBACK_BASE: &str = "mod";

/// Collect every name bound at the top level of the unit: variable
/// declarators (including destructuring patterns), function and class
/// declaration names, and import locals.
pub fn top_level_names(module: &Module) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for stmt in &module.stmts {
        match &stmt.kind {
            StmtKind::Var(decl) => {
                for d in &decl.declarators {
                    collect_pat(&d.pat, &mut names);
                }
            }
            StmtKind::Function(f) => {
                names.insert(f.name.clone());
            }
            StmtKind::Class(c) => {
                names.insert(c.name.clone());
            }
            StmtKind::Import(decl) => {
                for local in decl.locals() {
                    names.insert(local.to_string());
                }
            }
            _ => {}
        }
    }
    names
}

fn collect_pat(pat: &Pat, names: &mut FxHashSet<String>) {
    match pat {
        Pat::Ident(name) => {
            names.insert(name.clone());
        }
        Pat::Object(props) => collect_props(props, names),
    }
}

fn collect_props(props: &[PatProp], names: &mut FxHashSet<String>) {
    for prop in props {
        match &prop.value {
            PatPropValue::Nested(inner) => collect_props(inner, names),
            _ => {
                if let Some(name) = prop.bound_name() {
                    names.insert(name.to_string());
                }
            }
        }
    }
}

/// Derive a fresh top-level name from a module specifier.
///
/// Base = last path segment, minus a module-file suffix, minus anything
/// outside `[A-Za-z0-9_$]`; `mod` when that leaves nothing usable as an
/// identifier. Numeric suffixes `1, 2, …` resolve collisions.
pub fn fresh_name(specifier: &str, taken: &FxHashSet<String>) -> String {
    let segment = specifier
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(specifier);
    let segment = [".mjs", ".cjs", ".js"]
        .iter()
        .find_map(|suffix| segment.strip_suffix(suffix))
        .unwrap_or(segment);

    let mut base: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base = FALLBACK_BASE.to_string();
    }

    if !taken.contains(&base) {
        return base;
    }
    let mut i = 1u32;
    loop {
        let candidate = format!("{base}{i}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}
