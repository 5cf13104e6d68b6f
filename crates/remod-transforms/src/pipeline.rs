//! Rule trait and the per-unit pipeline.
//!
//! Each rule is a pure tree-to-tree step: it consumes the module produced by
//! its predecessor and returns the next one. Rules never talk to each other;
//! ordering is the only coordination. A rule that finds nothing to do returns
//! the tree unchanged, and a rule that refuses to guess returns `Aborted`
//! with the tree exactly as it received it; the pipeline records the reason
//! and moves on (or stops, when configured to halt on abort).

use crate::export_shape::ShapeResolver;
use crate::rules;
use remod_common::{line_of_offset, Diagnostic, DiagnosticSink, Host};
use remod_parser::{parse, print, Module, Stmt};
use std::path::Path;

pub enum RewriteResult {
    Changed(Module),
    Unchanged(Module),
    /// The rule declined to transform the unit; `module` is the tree exactly
    /// as the rule received it.
    Aborted { module: Module, reason: String },
}

pub trait Rule {
    fn name(&self) -> &'static str;
    fn apply(&self, module: Module, cx: &RuleCx<'_>) -> RewriteResult;
}

/// Read-only capabilities handed to every rule.
pub struct RuleCx<'a> {
    pub host: &'a dyn Host,
    pub sink: &'a DiagnosticSink,
    pub shapes: &'a ShapeResolver<'a>,
}

/// Which rules run, and in what order.
#[derive(Debug, Clone)]
pub struct Config {
    pub rules: Vec<String>,
    pub halt_on_abort: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rules: rules::default_rule_names()
                .iter()
                .map(|n| n.to_string())
                .collect(),
            halt_on_abort: false,
        }
    }
}

/// Result of transforming one unit.
#[derive(Debug)]
pub struct Outcome {
    pub text: String,
    pub changed: bool,
    /// `(rule name, reason)` for every rule that aborted on this unit.
    pub aborted: Vec<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transform one unit. Unknown rule names are reported and skipped; when no
/// rule changes the tree the input text is returned verbatim.
pub fn transform(source: &str, path: &Path, config: &Config, host: &dyn Host) -> Outcome {
    let sink = DiagnosticSink::new();
    let shapes = ShapeResolver::new(host);
    let cx = RuleCx {
        host,
        sink: &sink,
        shapes: &shapes,
    };

    let mut module = parse(source, path);
    let mut changed = false;
    let mut aborted = Vec::new();

    for name in &config.rules {
        let Some(rule) = rules::rule_by_name(name) else {
            sink.warn("pipeline", None, format!("unknown rule `{name}`"));
            continue;
        };
        tracing::debug!(rule = rule.name(), path = %path.display(), "applying rule");
        match rule.apply(module, &cx) {
            RewriteResult::Changed(next) => {
                module = next;
                changed = true;
            }
            RewriteResult::Unchanged(next) => module = next,
            RewriteResult::Aborted {
                module: next,
                reason,
            } => {
                aborted.push((rule.name().to_string(), reason));
                module = next;
                if config.halt_on_abort {
                    break;
                }
            }
        }
    }

    let text = if changed {
        print(&module)
    } else {
        source.to_string()
    };
    Outcome {
        text,
        changed,
        aborted,
        diagnostics: sink.take(),
    }
}

/// 1-based line of a statement, for diagnostics.
pub fn stmt_line(module: &Module, stmt: &Stmt) -> Option<u32> {
    stmt.span
        .map(|(start, _)| line_of_offset(&module.source, start))
}
