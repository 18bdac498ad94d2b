//! Rule engine: selects rules, evaluates them over a parsed document, and
//! assembles the report.
//!
//! The order rules are supplied in is the registration order, and it is
//! the tie-break for violations on the same line. Rules run independently,
//! so registration order never changes which violations exist, only how
//! equal-line ties sort.

use std::fmt;

use crate::config::Config;
use crate::document::{self, Document, ParseError};
use crate::report::{Report, ReportBuilder, Violation};
use crate::rules::{self, Rule};

/// Rule selection or threshold problem, surfaced at engine construction
/// before any document is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownRule(String),
    InvalidThreshold { field: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownRule(name) => write!(f, "unknown rule '{}'", name),
            ConfigError::InvalidThreshold { field, message } => {
                write!(f, "invalid threshold '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Evaluates an ordered rule set over parsed documents.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl RuleEngine {
    /// Engine with the config's `rules.enable` list, or the full registry
    /// in default order when the list is empty.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.rules.enable.is_empty() {
            Ok(Self {
                rules: rules::default_rules(config),
            })
        } else {
            Self::with_rules(&config.rules.enable, config)
        }
    }

    /// Engine with an explicit ordered name list. The list order becomes
    /// the registration order.
    pub fn with_rules(names: &[String], config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            match rules::build_rule(name, config) {
                Some(rule) => selected.push(rule),
                None => return Err(ConfigError::UnknownRule(name.clone())),
            }
        }
        Ok(Self { rules: selected })
    }

    /// Engine over arbitrary rule values, for tests and embedders.
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Registered rule names in registration order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule over the document and return violations ordered by
    /// ascending line, ties broken by registration order.
    pub fn evaluate(&self, doc: &Document) -> Vec<Violation> {
        let mut violations: Vec<Violation> = Vec::new();
        for rule in &self.rules {
            violations.extend(rule.check(doc));
        }
        // Stable sort keeps registration order among equal line starts.
        violations.sort_by_key(|v| v.line_range.start);
        violations
    }

    /// Full pipeline for one document: parse, evaluate, build. A parse
    /// failure aborts this document only and yields no violations.
    pub fn check(&self, text: &str) -> Result<Report, ParseError> {
        let doc = document::parse(text)?;
        let mut builder = ReportBuilder::new();
        builder.extend(self.evaluate(&doc));
        Ok(builder.build())
    }
}
