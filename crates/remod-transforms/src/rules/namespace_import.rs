//! Upgrade default imports of default-less modules to namespace imports.
//!
//! ```text
//! import mod from './mod.js';
//! ```
//!
//! when `./mod.js` has named exports but no default becomes
//!
//! ```text
//! import * as mod from './mod.js';
//! ```
//!
//! A mixed `import d, { a } from …` of such a module keeps the named
//! bindings through a destructure off the namespace object, inserted right
//! after the import.

use crate::pipeline::{RewriteResult, Rule, RuleCx};
use remod_parser::{
    Declarator, Expr, Module, Pat, PatProp, PatPropValue, Stmt, StmtKind, VarDecl, VarKind,
};

pub const NAME: &str = "namespace-import-if-no-default";

pub struct NamespaceImport;

impl Rule for NamespaceImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let path = module.path.clone();
        let mut changed = false;
        let mut i = 0usize;

        while i < module.stmts.len() {
            let Some(decl) = module.stmts[i].import() else {
                i += 1;
                continue;
            };
            let Some(local) = decl.default.clone() else {
                i += 1;
                continue;
            };
            let specifier = decl.source.value.clone();
            let relative = specifier.starts_with("./") || specifier.starts_with("../");
            let suffixed = [".js", ".mjs", ".cjs"].iter().any(|s| specifier.ends_with(s));
            if !relative || !suffixed {
                i += 1;
                continue;
            }

            let shape = cx.shapes.resolve(&specifier, &path);
            if shape.has_default || !shape.has_named {
                i += 1;
                continue;
            }

            cx.sink.log(
                NAME,
                None,
                format!("'{specifier}' has no default export; importing namespace as `{local}`"),
            );
            let stmt = &mut module.stmts[i];
            let named = {
                let d = stmt.import_mut().expect("import shape was just matched");
                d.default = None;
                d.namespace = Some(local.clone());
                std::mem::take(&mut d.named)
            };
            stmt.mark_edited();
            changed = true;

            if !named.is_empty() {
                let props = named
                    .iter()
                    .map(|s| {
                        if s.imported == s.local {
                            PatProp {
                                key: s.imported.clone(),
                                value: PatPropValue::Shorthand,
                            }
                        } else {
                            PatProp {
                                key: s.imported.clone(),
                                value: PatPropValue::Alias(s.local.clone()),
                            }
                        }
                    })
                    .collect();
                let destructure = Stmt::synthetic(StmtKind::Var(VarDecl {
                    kind: VarKind::Const,
                    declarators: vec![Declarator {
                        pat: Pat::Object(props),
                        init: Some(Expr::ident(local)),
                    }],
                }));
                module.stmts.insert(i + 1, destructure);
                i += 1;
            }
            i += 1;
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}
