//! Convert the `module.exports = …` assignment to export declarations.
//!
//! An object-literal right-hand side becomes named exports: shorthand and
//! `key: key` properties re-export the existing binding, other values are
//! hoisted into fresh `const` declarations ahead of the export list. Any
//! other right-hand side becomes `export default`.
//!
//! More than one `module.exports =` assignment is ambiguous; the rule aborts
//! the unit and leaves it untouched.

use crate::pipeline::{stmt_line, RewriteResult, Rule, RuleCx};
use crate::scope::top_level_names;
use remod_parser::{
    Declarator, Expr, ExportDefault, ExportNamed, ExportSpecifier, Module, ObjProp, Pat, Stmt,
    StmtKind, VarDecl, VarKind,
};

pub const NAME: &str = "module-exports-to-exports";

pub struct ExportsObject;

impl Rule for ExportsObject {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, mut module: Module, cx: &RuleCx<'_>) -> RewriteResult {
        let assignments: Vec<usize> = module
            .stmts
            .iter()
            .enumerate()
            .filter(|(_, s)| exports_assignment(s).is_some())
            .map(|(i, _)| i)
            .collect();

        match assignments.as_slice() {
            [] => return RewriteResult::Unchanged(module),
            [_] => {}
            [_, second, ..] => {
                let line = stmt_line(&module, &module.stmts[*second]);
                let reason =
                    "more than one module.exports assignment; the export target is ambiguous";
                cx.sink.error(NAME, line, reason);
                return RewriteResult::Aborted {
                    module,
                    reason: reason.to_string(),
                };
            }
        }

        let idx = assignments[0];
        let value = exports_assignment(&module.stmts[idx])
            .expect("assignment shape was just matched")
            .clone();
        let line = stmt_line(&module, &module.stmts[idx]);
        let leading = module.stmts[idx].leading.clone();

        let replacements = match value {
            Expr::Object(props) => {
                let mut declared = top_level_names(&module);
                let mut consts: Vec<Stmt> = Vec::new();
                let mut specifiers: Vec<ExportSpecifier> = Vec::new();

                for prop in props {
                    match prop {
                        ObjProp::Shorthand(name) => specifiers.push(ExportSpecifier {
                            local: name.clone(),
                            exported: name,
                        }),
                        ObjProp::KeyValue { key, value } => {
                            if value.as_ident() == Some(key.as_str()) {
                                specifiers.push(ExportSpecifier {
                                    local: key.clone(),
                                    exported: key,
                                });
                                continue;
                            }
                            let mut internal = key.clone();
                            while declared.contains(&internal) {
                                internal.push('_');
                            }
                            declared.insert(internal.clone());
                            consts.push(Stmt::synthetic(StmtKind::Var(VarDecl {
                                kind: VarKind::Const,
                                declarators: vec![Declarator {
                                    pat: Pat::Ident(internal.clone()),
                                    init: Some(value),
                                }],
                            })));
                            specifiers.push(ExportSpecifier {
                                local: internal,
                                exported: key,
                            });
                        }
                        ObjProp::Spread(text) => {
                            cx.sink
                                .log(NAME, line, format!("skipping spread property `{text}`"));
                        }
                        ObjProp::Computed(text) => {
                            cx.sink
                                .log(NAME, line, format!("skipping computed property `{text}`"));
                        }
                        ObjProp::Method(text) | ObjProp::Other(text) => {
                            cx.sink.log(
                                NAME,
                                line,
                                format!("skipping unsupported property `{text}`"),
                            );
                        }
                    }
                }

                let mut stmts = consts;
                stmts.push(Stmt::synthetic(StmtKind::ExportNamed(ExportNamed {
                    specifiers,
                })));
                stmts
            }
            value => vec![Stmt::synthetic(StmtKind::ExportDefault(ExportDefault {
                value,
            }))],
        };

        module.stmts.splice(idx..=idx, replacements);
        module.stmts[idx].leading = leading;
        RewriteResult::Changed(module)
    }
}

/// The right-hand side of `module.exports = …`, if this statement is one.
fn exports_assignment(stmt: &Stmt) -> Option<&Expr> {
    let StmtKind::Expr(Expr::Assign { target, value }) = &stmt.kind else {
        return None;
    };
    let Expr::Member { obj, prop } = &**target else {
        return None;
    };
    (prop == "exports" && obj.as_ident() == Some("module")).then_some(&**value)
}
