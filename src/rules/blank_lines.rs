//! Blank-line separation rules for headers and list runs.
//!
//! Blocks never contain blank lines, so two blocks are separated by at
//! least one blank line exactly when `next.start > prev.end + 1`. Document
//! boundaries are exempt: a header on line 1 has no predecessor to check.

use crate::document::{Block, BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

fn touches(prev: &Block, next: &Block) -> bool {
    next.line_range.start == prev.line_range.end + 1
}

/// Every header needs a blank line before and after it. Two adjacent
/// headers are exempt, matching the stacked-heading style of lab preambles.
pub struct BlankLineAroundHeader;

impl Rule for BlankLineAroundHeader {
    fn name(&self) -> &'static str {
        "BlankLineAroundHeader"
    }

    fn description(&self) -> &'static str {
        "headers are separated from neighboring content by blank lines"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, block) in doc.blocks.iter().enumerate() {
            if block.kind != BlockKind::Header {
                continue;
            }

            if i > 0 {
                let prev = &doc.blocks[i - 1];
                if prev.kind != BlockKind::Header && touches(prev, block) {
                    violations.push(Violation::new(
                        self.name(),
                        block.line_range,
                        "header is not preceded by a blank line",
                    ));
                }
            }

            if let Some(next) = doc.blocks.get(i + 1) {
                if next.kind != BlockKind::Header && touches(block, next) {
                    violations.push(Violation::new(
                        self.name(),
                        block.line_range,
                        "header is not followed by a blank line",
                    ));
                }
            }
        }

        violations
    }
}

/// Same contract at the boundary of each maximal list run. Header
/// neighbors are left to [`BlankLineAroundHeader`] so one missing blank
/// line is not reported from both sides.
pub struct BlankLineAroundList;

impl Rule for BlankLineAroundList {
    fn name(&self) -> &'static str {
        "BlankLineAroundList"
    }

    fn description(&self) -> &'static str {
        "list runs are separated from neighboring content by blank lines"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, block) in doc.blocks.iter().enumerate() {
            if block.kind != BlockKind::List {
                continue;
            }

            if i > 0 {
                let prev = &doc.blocks[i - 1];
                if prev.kind != BlockKind::Header && touches(prev, block) {
                    violations.push(Violation::new(
                        self.name(),
                        LineRange::single(block.line_range.start),
                        "list is not preceded by a blank line",
                    ));
                }
            }

            if let Some(next) = doc.blocks.get(i + 1) {
                if next.kind != BlockKind::Header && touches(block, next) {
                    violations.push(Violation::new(
                        self.name(),
                        LineRange::single(block.line_range.end),
                        "list is not followed by a blank line",
                    ));
                }
            }
        }

        violations
    }
}
