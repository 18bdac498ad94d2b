//! Violation values and report assembly.
//!
//! A violation is a plain value, never an error: rules create them, the
//! engine orders them, and [`ReportBuilder`] folds them into a [`Report`]
//! with a pass/fail verdict. Nothing mutates a violation after creation.

use std::collections::HashSet;

use serde::Serialize;

use crate::document::LineRange;

/// One instance of a document failing one style rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    /// Canonical name of the rule that produced the finding.
    pub rule: String,
    pub line_range: LineRange,
    pub message: String,
}

impl Violation {
    pub fn new(rule: impl Into<String>, line_range: LineRange, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            line_range,
            message: message.into(),
        }
    }

    /// One-line rendering: `<line_range>: [<rule>] <message>`.
    pub fn render(&self) -> String {
        format!("{}: [{}] {}", self.line_range, self.rule, self.message)
    }
}

/// Aggregated result of checking one document. Created once per run and
/// handed back to the caller; nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub violations: Vec<Violation>,
    /// True iff the deduplicated violation sequence is empty.
    pub passed: bool,
}

impl Report {
    /// Plain-text listing, one violation per line, in report order.
    pub fn render_text(&self) -> String {
        self.violations
            .iter()
            .map(Violation::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collects violations for one run and builds the final [`Report`].
///
/// Building drops exact duplicates (same rule, line range, and message),
/// keeping the first occurrence. Near-duplicates under different rule
/// names are distinct findings and are never merged.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    violations: Vec<Violation>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    pub fn build(self) -> Report {
        let mut seen = HashSet::new();
        let mut violations = Vec::with_capacity(self.violations.len());
        for violation in self.violations {
            if seen.insert(violation.clone()) {
                violations.push(violation);
            }
        }
        let passed = violations.is_empty();
        Report { violations, passed }
    }
}
