//! YAML front matter rule.

use crate::document::{BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

/// Every lab document opens with YAML front matter that parses as a
/// mapping and carries a `title` key. One violation per failed aspect.
pub struct YamlFrontmatter;

impl Rule for YamlFrontmatter {
    fn name(&self) -> &'static str {
        "YamlFrontmatter"
    }

    fn description(&self) -> &'static str {
        "document opens with YAML front matter carrying a title"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let Some(first) = doc.blocks.first() else {
            return vec![Violation::new(
                self.name(),
                LineRange::single(1),
                "document has no YAML front matter",
            )];
        };

        if first.kind != BlockKind::YamlHeader {
            return vec![Violation::new(
                self.name(),
                LineRange::single(1),
                "document has no YAML front matter",
            )];
        }

        // Drop the `---` delimiter lines; what remains is the YAML body.
        let yaml: String = first
            .raw_text
            .lines()
            .skip(1)
            .take(first.raw_text.lines().count().saturating_sub(2))
            .collect::<Vec<_>>()
            .join("\n");

        let value: serde_yaml::Value = match serde_yaml::from_str(&yaml) {
            Ok(v) => v,
            Err(e) => {
                return vec![Violation::new(
                    self.name(),
                    first.line_range,
                    format!("invalid YAML front matter: {}", e),
                )];
            }
        };

        let mut violations = Vec::new();
        match value.as_mapping() {
            Some(mapping) => {
                if mapping.get("title").is_none() {
                    violations.push(Violation::new(
                        self.name(),
                        first.line_range,
                        "front matter is missing 'title'",
                    ));
                }
            }
            None => {
                violations.push(Violation::new(
                    self.name(),
                    first.line_range,
                    "front matter is not a YAML mapping",
                ));
            }
        }

        violations
    }
}
