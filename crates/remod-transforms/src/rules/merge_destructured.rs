//! Merge named imports of default-less modules into one default import plus
//! one destructure.
//!
//! ```text
//! import { a } from './mod.js';
//! import { b as c } from './mod.js';
//! ```
//!
//! when `./mod.js` has no default export becomes
//!
//! ```text
//! import mod from './mod.js';
//! const { a, b: c } = mod;
//! ```
//!
//! An existing default import of the same specifier is reused instead of
//! minting a new local, hand-written destructures of that local are folded
//! into the merged statement, and exactly one destructure is inserted
//! immediately after the import.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use crate::scope::{fresh_name, top_level_names};
use indexmap::IndexMap;
use remod_parser::{
    Declarator, Expr, Module, Pat, PatProp, PatPropValue, Stmt, StmtKind, VarDecl, VarKind,
};
use rustc_hash::FxHashSet;

pub const NAME: &str = "merge-destructured-default";

pub struct MergeDestructuredDefault;

struct Entry {
    /// Local name of the default import for this specifier.
    local: String,
    /// Statement index of the import the destructure goes after.
    import_idx: usize,
    /// local name -> imported name, in first-seen order.
    pairs: IndexMap<String, String>,
}

impl Rule for MergeDestructuredDefault {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let path = module.path.clone();
        let mut names = top_level_names(&module);
        let mut entries: IndexMap<String, Entry> = IndexMap::new();
        let mut removed: FxHashSet<usize> = FxHashSet::default();

        // Convert qualifying named-only imports and collect their bindings.
        for i in 0..module.stmts.len() {
            let Some(decl) = module.stmts[i].import() else {
                continue;
            };
            if decl.default.is_some() || decl.namespace.is_some() || decl.named.is_empty() {
                continue;
            }
            let specifier = decl.source.value.clone();
            if !specifier.starts_with('.') {
                continue;
            }
            if cx.shapes.resolve(&specifier, &path).has_default {
                continue;
            }
            let named = decl.named.clone();

            let existing = module.stmts.iter().enumerate().find_map(|(k, s)| {
                let d = s.import()?;
                if k != i && d.source.value == specifier {
                    d.default.clone().map(|local| (k, local))
                } else {
                    None
                }
            });

            if !entries.contains_key(&specifier) {
                let entry = match existing {
                    Some((k, local)) => {
                        removed.insert(i);
                        Entry {
                            local,
                            import_idx: k,
                            pairs: IndexMap::new(),
                        }
                    }
                    None => {
                        let local = fresh_name(&specifier, &names);
                        names.insert(local.clone());
                        let stmt = &mut module.stmts[i];
                        if let Some(d) = stmt.import_mut() {
                            d.named.clear();
                            d.default = Some(local.clone());
                        }
                        stmt.mark_edited();
                        Entry {
                            local,
                            import_idx: i,
                            pairs: IndexMap::new(),
                        }
                    }
                };
                cx.sink.log(
                    NAME,
                    None,
                    format!("importing default of '{specifier}' as `{}`", entry.local),
                );
                entries.insert(specifier.clone(), entry);
            } else {
                // A later named import of a specifier handled this run.
                removed.insert(i);
            }

            let entry = &mut entries[&specifier];
            for s in named {
                entry.pairs.insert(s.local, s.imported);
            }
        }

        if entries.is_empty() {
            return RewriteResult::Unchanged(module);
        }

        // Fold hand-written destructures of the default locals into the
        // merged statement.
        for i in 0..module.stmts.len() {
            if removed.contains(&i) {
                continue;
            }
            let Some(absorbed) = absorb_destructure(&module.stmts[i], &entries) else {
                continue;
            };
            let (specifier, pairs) = absorbed;
            let entry = &mut entries[&specifier];
            for (local, imported) in pairs {
                entry.pairs.insert(local, imported);
            }
            removed.insert(i);
        }

        // Rebuild the statement list: drop removed statements, insert one
        // destructure right after each entry's import.
        let old = std::mem::take(&mut module.stmts);
        for (i, stmt) in old.into_iter().enumerate() {
            if !removed.contains(&i) {
                module.stmts.push(stmt);
            }
            if let Some(entry) = entries.values().find(|e| e.import_idx == i) {
                if !entry.pairs.is_empty() {
                    module.stmts.push(merged_destructure(entry));
                }
            }
        }

        RewriteResult::Changed(module)
    }
}

/// `const { … } = local;` over a flat pattern, when `local` is one of the
/// merged default imports. Returns the owning specifier and the bindings.
fn absorb_destructure(
    stmt: &Stmt,
    entries: &IndexMap<String, Entry>,
) -> Option<(String, Vec<(String, String)>)> {
    let decl = stmt.var()?;
    let [d] = decl.declarators.as_slice() else {
        return None;
    };
    let source = d.init.as_ref()?.as_ident()?;
    let (specifier, _) = entries.iter().find(|(_, e)| e.local == source)?;
    let Pat::Object(props) = &d.pat else {
        return None;
    };

    let mut pairs = Vec::with_capacity(props.len());
    for p in props {
        match &p.value {
            PatPropValue::Shorthand => pairs.push((p.key.clone(), p.key.clone())),
            PatPropValue::Alias(local) => pairs.push((local.clone(), p.key.clone())),
            // Nested or rest patterns cannot be merged; keep the statement.
            PatPropValue::Nested(_) | PatPropValue::Rest => return None,
        }
    }
    Some((specifier.clone(), pairs))
}

fn merged_destructure(entry: &Entry) -> Stmt {
    let props = entry
        .pairs
        .iter()
        .map(|(local, imported)| {
            if local == imported {
                PatProp {
                    key: imported.clone(),
                    value: PatPropValue::Shorthand,
                }
            } else {
                PatProp {
                    key: imported.clone(),
                    value: PatPropValue::Alias(local.clone()),
                }
            }
        })
        .collect();
    Stmt::synthetic(StmtKind::Var(VarDecl {
        kind: VarKind::Const,
        declarators: vec![Declarator {
            pat: Pat::Object(props),
            init: Some(Expr::ident(entry.local.clone())),
        }],
    }))
}
