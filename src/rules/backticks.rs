//! Backticked code reference rule.
//!
//! Scans paragraph prose for tokens shaped like code identifiers and flags
//! any that are not wrapped in inline backticks. Inline code spans are
//! stripped before tokenizing, so backticked references never match.

use regex::Regex;

use crate::document::{BlockKind, Document, LineRange};
use crate::report::Violation;
use crate::rules::Rule;

/// Function-call shape: `gevfit()`.
const CALL_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*\(\)$";
/// Annotation-token shape: `@param`.
const AT_PATTERN: &str = r"^@[A-Za-z0-9_][A-Za-z0-9_.-]*$";
/// Filename shape: identifier stem plus a short extension, `gev_fit.R`.
const FILE_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_]*\.[A-Za-z0-9]{1,5}$";

/// Code-identifier tokens in prose must be backtick-wrapped. Tokens listed
/// in `thresholds.backtick_ignore` are exempted by exact match.
pub struct BacktickedCodeReference {
    ignore: Vec<String>,
}

impl BacktickedCodeReference {
    pub fn new(ignore: Vec<String>) -> Self {
        Self { ignore }
    }
}

impl Rule for BacktickedCodeReference {
    fn name(&self) -> &'static str {
        "BacktickedCodeReference"
    }

    fn description(&self) -> &'static str {
        "code identifiers in prose are wrapped in backticks"
    }

    fn check(&self, doc: &Document) -> Vec<Violation> {
        let (call_re, at_re, file_re) = match (
            Regex::new(CALL_PATTERN),
            Regex::new(AT_PATTERN),
            Regex::new(FILE_PATTERN),
        ) {
            (Ok(c), Ok(a), Ok(f)) => (c, a, f),
            _ => return Vec::new(),
        };

        let mut violations = Vec::new();

        for block in &doc.blocks {
            if block.kind != BlockKind::Paragraph {
                continue;
            }

            for (offset, line) in block.raw_text.lines().enumerate() {
                let stripped = strip_inline_code(line);
                for raw_token in stripped.split_whitespace() {
                    let token = trim_token(raw_token);
                    if token.is_empty() || self.ignore.iter().any(|t| t == token) {
                        continue;
                    }

                    let is_code = call_re.is_match(token)
                        || at_re.is_match(token)
                        || (file_re.is_match(token) && has_identifier_stem(token));

                    if is_code {
                        violations.push(Violation::new(
                            self.name(),
                            LineRange::single(block.line_range.start + offset),
                            format!("code reference '{}' should be wrapped in backticks", token),
                        ));
                    }
                }
            }
        }

        violations
    }
}

/// Replace inline code spans (and their delimiters) with spaces. An
/// unpaired backtick swallows the rest of the line, which errs on the
/// quiet side.
fn strip_inline_code(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_code = false;
    for c in line.chars() {
        if c == '`' {
            in_code = !in_code;
            out.push(' ');
        } else if in_code {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Trim edge punctuation from a whitespace-split token, keeping a trailing
/// call marker `()` intact.
fn trim_token(token: &str) -> &str {
    let mut t = token
        .trim_start_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '@' || c == '_'));
    loop {
        if t.ends_with("()") {
            break;
        }
        let Some(last) = t.chars().last() else { break };
        if last.is_ascii_alphanumeric() || last == '_' {
            break;
        }
        t = &t[..t.len() - last.len_utf8()];
    }
    t
}

/// A filename stem only counts as code when it carries snake_case or
/// CamelCase structure; `fig.1`-style prose stays unflagged.
fn has_identifier_stem(token: &str) -> bool {
    let stem = token.rsplit_once('.').map(|(s, _)| s).unwrap_or(token);
    if stem.contains('_') {
        return true;
    }
    let mut prev_lower = false;
    for c in stem.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            return true;
        }
        prev_lower = c.is_ascii_lowercase();
    }
    false
}
