//! Advisory diagnostics emitted by transform rules.
//!
//! Rules never fail the run; they record what they skipped, split, or refused
//! to touch. Every record is forwarded to `tracing` at the matching level so
//! the CLI's subscriber decides what the user sees, while the collected
//! records stay available to callers (and tests) after a unit finishes.

use std::cell::RefCell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Log,
    Warning,
    Error,
}

/// One advisory record attached to a unit's transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the rule that produced the record.
    pub rule: &'static str,
    /// 1-based source line of the offending construct, when known.
    pub line: Option<u32>,
    pub message: String,
}

/// Collects diagnostics for a single unit.
///
/// Interior mutability keeps the sink shareable by reference alongside the
/// tree a rule is rewriting.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    records: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink {
            records: RefCell::new(Vec::new()),
        }
    }

    pub fn log(&self, rule: &'static str, line: Option<u32>, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(rule, line, "{message}");
        self.push(Severity::Log, rule, line, message);
    }

    pub fn warn(&self, rule: &'static str, line: Option<u32>, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(rule, line, "{message}");
        self.push(Severity::Warning, rule, line, message);
    }

    pub fn error(&self, rule: &'static str, line: Option<u32>, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(rule, line, "{message}");
        self.push(Severity::Error, rule, line, message);
    }

    fn push(&self, severity: Severity, rule: &'static str, line: Option<u32>, message: String) {
        self.records.borrow_mut().push(Diagnostic {
            severity,
            rule,
            line,
            message,
        });
    }

    /// Drain all collected records.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    /// Snapshot of collected records without draining.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn has_errors(&self) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_order_and_severity() {
        let sink = DiagnosticSink::new();
        sink.log("rule-a", Some(3), "skipped a thing");
        sink.warn("rule-b", None, "split a declaration");
        sink.error("rule-b", Some(9), "refused to guess");

        let records = sink.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].severity, Severity::Log);
        assert_eq!(records[1].severity, Severity::Warning);
        assert_eq!(records[2].severity, Severity::Error);
        assert_eq!(records[2].line, Some(9));
        assert!(sink.has_errors());
    }

    #[test]
    fn take_drains() {
        let sink = DiagnosticSink::new();
        sink.log("rule", None, "one");
        assert_eq!(sink.take().len(), 1);
        assert!(sink.records().is_empty());
        assert!(!sink.has_errors());
    }
}
