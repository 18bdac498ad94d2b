//! Annotation pairing rule.
//!
//! Lab code blocks carry numbered callout markers (`x <- 1  # fit <1>` or a
//! bare trailing `<1>`), each of which must be explained by a numbered
//! `<n>` line directly after the block. Markers and explanations both run
//! 1..n in order with no gaps; only the first problem per code block is
//! reported.

use regex::Regex;

use crate::document::{annotation_index, BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

/// Marker at end of a code line, optional trailing whitespace tolerated.
const MARKER_PATTERN: &str = r"<(\d+)>\s*$";

pub struct AnnotationPairing;

impl Rule for AnnotationPairing {
    fn name(&self) -> &'static str {
        "AnnotationPairing"
    }

    fn description(&self) -> &'static str {
        "code annotation markers pair with numbered explanations in order"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let marker_re = match Regex::new(MARKER_PATTERN) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        let mut violations = Vec::new();

        for (i, block) in doc.blocks.iter().enumerate() {
            if block.kind != BlockKind::CodeBlock {
                continue;
            }

            let markers = collect_markers(block.raw_text.lines(), block.line_range.start, &marker_re);
            if markers.is_empty() {
                continue;
            }

            if let Some(violation) = self.check_one(doc, i, &markers) {
                violations.push(violation);
            }
        }

        violations
    }
}

impl AnnotationPairing {
    /// Validate one code block's markers against its trailing explanation
    /// run. Returns the first problem found, if any.
    fn check_one(
        &self,
        doc: &Document,
        block_index: usize,
        markers: &[(u32, usize)],
    ) -> Option<Violation> {
        let block = &doc.blocks[block_index];

        for (position, (marker, line)) in markers.iter().enumerate() {
            let expected = (position + 1) as u32;
            if *marker != expected {
                return Some(Violation::new(
                    self.name(),
                    LineRange::single(*line),
                    format!(
                        "annotation marker <{}> out of sequence; expected <{}>",
                        marker, expected
                    ),
                ));
            }
        }

        // Explanations are the Annotation blocks immediately after the code
        // block; any other kind ends the run.
        let explanations: Vec<(Option<u32>, LineRange)> = doc.blocks[block_index + 1..]
            .iter()
            .take_while(|b| b.kind == BlockKind::Annotation)
            .map(|b| (annotation_index(&b.raw_text), b.line_range))
            .collect();

        for (position, (marker, _)) in markers.iter().enumerate() {
            match explanations.get(position) {
                None => {
                    return Some(Violation::new(
                        self.name(),
                        block.line_range,
                        format!("missing explanation for annotation <{}>", marker),
                    ));
                }
                Some((found, range)) => {
                    if *found != Some(*marker) {
                        return Some(Violation::new(
                            self.name(),
                            *range,
                            format!(
                                "explanation <{}> out of order; expected <{}>",
                                found.map_or_else(|| "?".to_string(), |n| n.to_string()),
                                marker
                            ),
                        ));
                    }
                }
            }
        }

        if let Some((found, range)) = explanations.get(markers.len()) {
            return Some(Violation::new(
                self.name(),
                *range,
                format!(
                    "unexpected explanation <{}>; code block has {} annotation(s)",
                    found.map_or_else(|| "?".to_string(), |n| n.to_string()),
                    markers.len()
                ),
            ));
        }

        None
    }
}

/// Marker numbers with their absolute line numbers, fence lines excluded.
fn collect_markers<'a>(
    lines: impl Iterator<Item = &'a str>,
    first_line: usize,
    marker_re: &Regex,
) -> Vec<(u32, usize)> {
    lines
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("```"))
        .filter_map(|(offset, line)| {
            let captures = marker_re.captures(line)?;
            let number = captures.get(1)?.as_str().parse().ok()?;
            Some((number, first_line + offset))
        })
        .collect()
}
