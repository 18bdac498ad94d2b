//! Document model: raw Markdown text parsed into an ordered sequence of
//! typed blocks.
//!
//! Parsing is a single forward scan over lines. Every block carries its
//! verbatim source text and the 1-based inclusive line range it occupies,
//! so rules and reports can always point back into the original document.
//! Blank lines belong to no block, which makes "is there a blank line
//! between these two blocks" a pure line-range question.

use std::fmt;

use serde::Serialize;

/// 1-based inclusive range of source lines occupied by a block or named
/// by a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self { start: line, end: line }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Structural classification of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Leading `---` delimited YAML front matter. Only recognized when the
    /// document opens with it.
    YamlHeader,
    /// ATX header: one to six `#` followed by whitespace.
    Header,
    /// Maximal run of plain non-blank lines.
    Paragraph,
    /// Maximal contiguous run of list items, indented continuations
    /// included.
    List,
    /// Fenced code block, fence lines included.
    CodeBlock,
    /// A `<n> ...` explanation line. One block per line.
    Annotation,
}

/// One structural unit of a parsed document. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Verbatim source text, delimiter and fence lines included, without a
    /// trailing newline.
    pub raw_text: String,
    pub line_range: LineRange,
    /// First token of the fence info string for code blocks; `None` for a
    /// bare fence and for every other kind.
    pub language: Option<String>,
}

/// A parsed document: blocks in source order. Each call to [`parse`]
/// returns a fresh value; no parser state survives between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Structural parse failure. The only fatal shape is a code fence that
/// opens and never closes; everything else falls back to Paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnterminatedFence { line: usize },
}

impl ParseError {
    /// Line the failing construct starts on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnterminatedFence { line } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnterminatedFence { line } => {
                write!(f, "unterminated code fence at line {}", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse raw document text into typed blocks.
///
/// Recognized structures, in classification order: YAML front matter (only
/// at line 1), fenced code blocks, headers, annotation lines, list runs.
/// Whatever remains groups into paragraphs. Leading whitespace is ignored
/// for classification; whitespace-only lines count as blank.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    // Front matter must open the document. An unclosed leading delimiter
    // is ordinary content, not an error.
    if !lines.is_empty() && lines[0].trim_end() == "---" {
        if let Some(close) = lines.iter().skip(1).position(|l| l.trim_end() == "---") {
            let end = close + 1;
            blocks.push(Block {
                kind: BlockKind::YamlHeader,
                raw_text: lines[0..=end].join("\n"),
                line_range: LineRange::new(1, end + 1),
                language: None,
            });
            i = end + 1;
        }
    }

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if trimmed.starts_with("```") {
            let open = i;
            let mut j = i + 1;
            while j < lines.len() && !lines[j].trim_start().starts_with("```") {
                j += 1;
            }
            if j == lines.len() {
                return Err(ParseError::UnterminatedFence { line: open + 1 });
            }
            let info = trimmed.trim_start_matches('`').trim();
            let language = info.split_whitespace().next().map(|s| s.to_string());
            blocks.push(Block {
                kind: BlockKind::CodeBlock,
                raw_text: lines[open..=j].join("\n"),
                line_range: LineRange::new(open + 1, j + 1),
                language,
            });
            i = j + 1;
            continue;
        }

        if is_header(trimmed) {
            blocks.push(Block {
                kind: BlockKind::Header,
                raw_text: line.to_string(),
                line_range: LineRange::single(i + 1),
                language: None,
            });
            i += 1;
            continue;
        }

        if annotation_index(line).is_some() {
            blocks.push(Block {
                kind: BlockKind::Annotation,
                raw_text: line.to_string(),
                line_range: LineRange::single(i + 1),
                language: None,
            });
            i += 1;
            continue;
        }

        if is_list_item(trimmed) {
            let start = i;
            i += 1;
            while i < lines.len() {
                let t = lines[i].trim_start();
                if t.is_empty() || t.starts_with("```") {
                    break;
                }
                let continues = is_list_item(t)
                    || lines[i].starts_with(' ')
                    || lines[i].starts_with('\t');
                if !continues {
                    break;
                }
                i += 1;
            }
            blocks.push(Block {
                kind: BlockKind::List,
                raw_text: lines[start..i].join("\n"),
                line_range: LineRange::new(start + 1, i),
                language: None,
            });
            continue;
        }

        // Paragraph: maximal run of lines that open no other block kind.
        let start = i;
        i += 1;
        while i < lines.len() {
            let t = lines[i].trim_start();
            if t.is_empty()
                || t.starts_with("```")
                || is_header(t)
                || annotation_index(lines[i]).is_some()
                || is_list_item(t)
            {
                break;
            }
            i += 1;
        }
        blocks.push(Block {
            kind: BlockKind::Paragraph,
            raw_text: lines[start..i].join("\n"),
            line_range: LineRange::new(start + 1, i),
            language: None,
        });
    }

    Ok(Document { blocks })
}

/// ATX header: 1-6 `#` then whitespace. Seven or more, or a missing
/// space, is paragraph text.
fn is_header(trimmed: &str) -> bool {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes)
        && matches!(trimmed[hashes..].chars().next(), Some(' ') | Some('\t'))
}

/// Bulleted (`-`, `*`, `+`) or numbered (`1.`, `1)`) item marker followed
/// by whitespace.
fn is_list_item(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some('-') | Some('*') | Some('+') => matches!(chars.next(), Some(' ') | Some('\t')),
        Some(c) if c.is_ascii_digit() => {
            let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
            let mut rest = trimmed[digits..].chars();
            matches!(rest.next(), Some('.') | Some(')'))
                && matches!(rest.next(), Some(' ') | Some('\t'))
        }
        _ => false,
    }
}

/// Index of an annotation line: `<N>` at the start (after indentation),
/// followed by whitespace or end of line. `None` when the line is not an
/// annotation or the index does not fit.
pub(crate) fn annotation_index(line: &str) -> Option<u32> {
    let rest = line.trim_start().strip_prefix('<')?;
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let tail = rest[digits..].strip_prefix('>')?;
    if !(tail.is_empty() || tail.starts_with(' ') || tail.starts_with('\t')) {
        return None;
    }
    rest[..digits].parse().ok()
}
