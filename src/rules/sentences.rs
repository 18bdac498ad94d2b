//! One-sentence-per-line rule.

use regex::Regex;

use crate::document::{BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

/// Sentence boundary heuristic: terminal punctuation, an optional run of
/// closing quotes or brackets, whitespace, then an uppercase letter or
/// digit (opening quotes and brackets tolerated). Not a grammar parse;
/// abbreviations can false-positive and the threshold is the escape hatch.
const BOUNDARY_PATTERN: &str = r#"[.!?]["')\]]*\s+["'(\[]*[A-Z0-9]"#;

/// Each paragraph line may hold at most `max_sentences` sentences.
pub struct OneSentencePerLine {
    max_sentences: usize,
}

impl OneSentencePerLine {
    pub fn new(max_sentences: usize) -> Self {
        Self { max_sentences }
    }
}

impl Rule for OneSentencePerLine {
    fn name(&self) -> &'static str {
        "OneSentencePerLine"
    }

    fn description(&self) -> &'static str {
        "paragraph lines hold at most one sentence"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let re = match Regex::new(BOUNDARY_PATTERN) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        let mut violations = Vec::new();

        for block in &doc.blocks {
            if block.kind != BlockKind::Paragraph {
                continue;
            }

            for (offset, line) in block.raw_text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let sentences = re.find_iter(line).count() + 1;
                if sentences > self.max_sentences {
                    violations.push(Violation::new(
                        self.name(),
                        LineRange::single(block.line_range.start + offset),
                        format!(
                            "line holds {} sentences (max {})",
                            sentences, self.max_sentences
                        ),
                    ));
                }
            }
        }

        violations
    }
}
