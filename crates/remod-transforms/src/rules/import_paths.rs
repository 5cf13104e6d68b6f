//! Add explicit file suffixes to relative import specifiers.
//!
//! `import x from './lib'` becomes `'./lib.js'` when that file exists, or
//! `'./lib/index.js'` when the specifier names a directory with an index
//! file. Specifiers that resolve to nothing either way are left alone; this
//! rule never fabricates a path.

use crate::export_shape::{append_suffix, resolve_specifier};
use crate::pipeline::{RewriteResult, Rule, RuleCx};
use remod_parser::{Module, StmtKind};

pub const NAME: &str = "add-import-path-suffix";

const FILE_SUFFIX: &str = ".js";
const INDEX_SUFFIX: &str = "/index.js";

pub struct ImportPathSuffix;

impl Rule for ImportPathSuffix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let path = module.path.clone();
        let mut changed = false;

        for stmt in &mut module.stmts {
            let StmtKind::Import(decl) = &mut stmt.kind else {
                continue;
            };
            let specifier = decl.source.value.clone();
            if !specifier.starts_with("./") && !specifier.starts_with("../") {
                continue;
            }
            if [".js", ".mjs", ".cjs"].iter().any(|s| specifier.ends_with(s)) {
                continue;
            }

            let resolved = resolve_specifier(&path, &specifier);
            let suffix = if cx.host.exists(&resolved) {
                if cx.host.is_dir(&resolved) {
                    let index = resolved.join("index.js");
                    if cx.host.exists(&index) && !cx.host.is_dir(&index) {
                        Some(INDEX_SUFFIX)
                    } else {
                        None
                    }
                } else {
                    // Already an existing file without the conventional
                    // suffix; leave it as written.
                    None
                }
            } else {
                let with_js = append_suffix(&resolved, FILE_SUFFIX);
                if cx.host.exists(&with_js) && !cx.host.is_dir(&with_js) {
                    Some(FILE_SUFFIX)
                } else {
                    None
                }
            };

            if let Some(suffix) = suffix {
                cx.sink.log(
                    NAME,
                    None,
                    format!("resolved import path {specifier} -> {specifier}{suffix}"),
                );
                decl.source.value.push_str(suffix);
                stmt.mark_edited();
                changed = true;
            }
        }

        if changed {
            RewriteResult::Changed(module)
        } else {
            RewriteResult::Unchanged(module)
        }
    }
}
