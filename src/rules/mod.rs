//! Style rules and the built-in registry.
//!
//! A rule is a stateless predicate over a parsed document: it inspects the
//! block sequence and returns zero or more violations. Rules never mutate
//! the document and never see each other's output, so the set of violations
//! is independent of evaluation order.

use crate::config::Config;
use crate::document::Document;
use crate::report::Violation;

pub mod annotations;
pub mod backticks;
pub mod blank_lines;
pub mod code_language;
pub mod frontmatter;
pub mod sentences;

pub use annotations::AnnotationPairing;
pub use backticks::BacktickedCodeReference;
pub use blank_lines::{BlankLineAroundHeader, BlankLineAroundList};
pub use code_language::FencedCodeLanguage;
pub use frontmatter::YamlFrontmatter;
pub use sentences::OneSentencePerLine;

/// A single style check over a parsed document.
pub trait Rule {
    /// Canonical rule name as it appears in config, reports, and the CLI.
    fn name(&self) -> &'static str;

    /// One-line summary for `labcheck rules`.
    fn description(&self) -> &'static str;

    /// Inspect the document and return every violation found.
    fn check(&self, doc: &Document) -> Vec<Violation>;
}

/// Canonical rule names in default registration order.
pub const RULE_NAMES: &[&str] = &[
    "YamlFrontmatter",
    "BlankLineAroundHeader",
    "BlankLineAroundList",
    "OneSentencePerLine",
    "BacktickedCodeReference",
    "FencedCodeLanguage",
    "AnnotationPairing",
];

/// Construct one built-in rule by canonical name. Heuristic thresholds come
/// from the config. Returns `None` for an unknown name.
pub fn build_rule(name: &str, config: &Config) -> Option<Box<dyn Rule>> {
    match name {
        "YamlFrontmatter" => Some(Box::new(YamlFrontmatter)),
        "BlankLineAroundHeader" => Some(Box::new(BlankLineAroundHeader)),
        "BlankLineAroundList" => Some(Box::new(BlankLineAroundList)),
        "OneSentencePerLine" => Some(Box::new(OneSentencePerLine::new(
            config.thresholds.max_sentences_per_line,
        ))),
        "BacktickedCodeReference" => Some(Box::new(BacktickedCodeReference::new(
            config.thresholds.backtick_ignore.clone(),
        ))),
        "FencedCodeLanguage" => Some(Box::new(FencedCodeLanguage)),
        "AnnotationPairing" => Some(Box::new(AnnotationPairing)),
        _ => None,
    }
}

/// All built-in rules in default registration order.
pub fn default_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    RULE_NAMES
        .iter()
        .filter_map(|name| build_rule(name, config))
        .collect()
}
