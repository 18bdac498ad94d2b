//! Fenced code language rule.

use crate::document::{BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

/// Every fenced code block declares a language on its opening fence, so
/// lab snippets render with highlighting.
pub struct FencedCodeLanguage;

impl Rule for FencedCodeLanguage {
    fn name(&self) -> &'static str {
        "FencedCodeLanguage"
    }

    fn description(&self) -> &'static str {
        "fenced code blocks declare a language tag"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        doc.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::CodeBlock && b.language.is_none())
            .map(|b| {
                Violation::new(
                    self.name(),
                    LineRange::single(b.line_range.start),
                    "code fence has no language tag",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn test_tagged_fence_passes() {
        let doc = parse("```r\nx <- 1\n```\n").unwrap();
        assert!(FencedCodeLanguage.check(&doc).is_empty());
    }

    #[test]
    fn test_bare_fence_is_flagged_at_opening_line() {
        let doc = parse("intro\n\n```\nx <- 1\n```\n").unwrap();
        let violations = FencedCodeLanguage.check(&doc);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line_range, LineRange::single(3));
        assert_eq!(violations[0].message, "code fence has no language tag");
    }

    #[test]
    fn test_each_bare_fence_counts() {
        let doc = parse("```\na\n```\n\n```\nb\n```\n").unwrap();
        assert_eq!(FencedCodeLanguage.check(&doc).len(), 2);
    }
}
