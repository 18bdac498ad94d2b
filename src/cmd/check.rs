//! The `check` command: discover documents, run the pipeline on each, and
//! render results.
//!
//! Discovery and rendering live here; the core never touches the
//! filesystem. Each document runs independently, so one parse failure is
//! reported and its siblings still get checked.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use labcheck::config::Config;
use labcheck::engine::RuleEngine;
use labcheck::report::Report;

/// Output format for `labcheck check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFormat {
    Text,
    Json,
}

/// Outcome of checking one document: a report, or the reason the document
/// could not be processed.
struct DocumentOutcome {
    path: PathBuf,
    result: std::result::Result<Report, String>,
}

pub fn cmd_check(
    paths: &[String],
    rule_overrides: &[String],
    format: CheckFormat,
    config_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Unknown rule names abort here, before any document is read.
    let engine = if rule_overrides.is_empty() {
        RuleEngine::new(&config)
    } else {
        RuleEngine::with_rules(rule_overrides, &config)
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let files = discover_documents(paths)?;
    if files.is_empty() {
        println!("No markdown documents found.");
        return Ok(());
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let result = match fs::read_to_string(&path) {
            Ok(text) => match engine.check(&text) {
                Ok(report) => Ok(report),
                Err(e) => Err(format!("document could not be parsed: {}", e)),
            },
            Err(e) => Err(format!("could not read document: {}", e)),
        };
        outcomes.push(DocumentOutcome { path, result });
    }

    let any_failed = outcomes
        .iter()
        .any(|o| !matches!(&o.result, Ok(report) if report.passed));

    match format {
        CheckFormat::Text => render_text(&outcomes, quiet),
        CheckFormat::Json => render_json(&outcomes)?,
    }

    if any_failed {
        std::process::exit(1);
    }
    Ok(())
}

fn render_text(outcomes: &[DocumentOutcome], quiet: bool) {
    let tty = atty::is(atty::Stream::Stdout);
    let (pass_mark, fail_mark) = if tty { ("✓", "✗") } else { ("ok", "FAIL") };

    let mut passed = 0;
    let mut failed = 0;
    let mut total_violations = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) if report.passed => {
                passed += 1;
                if !quiet {
                    println!("{} {}", pass_mark.green(), outcome.path.display());
                }
            }
            Ok(report) => {
                failed += 1;
                total_violations += report.violations.len();
                println!("{} {}", fail_mark.red(), outcome.path.display());
                for violation in &report.violations {
                    println!(
                        "  {}: [{}] {}",
                        violation.line_range,
                        violation.rule.cyan(),
                        violation.message
                    );
                }
            }
            Err(reason) => {
                failed += 1;
                println!("{} {}: {}", fail_mark.red(), outcome.path.display(), reason);
            }
        }
    }

    println!(
        "\n{} checked, {} passed, {} failed, {} {}.",
        outcomes.len(),
        passed,
        failed,
        total_violations,
        if total_violations == 1 {
            "violation"
        } else {
            "violations"
        }
    );
}

fn render_json(outcomes: &[DocumentOutcome]) -> Result<()> {
    let mut documents = Vec::with_capacity(outcomes.len());
    let mut passed = 0;
    let mut failed = 0;
    let mut total_violations = 0;

    for outcome in outcomes {
        let entry = match &outcome.result {
            Ok(report) => {
                if report.passed {
                    passed += 1;
                } else {
                    failed += 1;
                }
                total_violations += report.violations.len();
                serde_json::json!({
                    "path": outcome.path.display().to_string(),
                    "passed": report.passed,
                    "violations": report.violations,
                    "error": null,
                })
            }
            Err(reason) => {
                failed += 1;
                serde_json::json!({
                    "path": outcome.path.display().to_string(),
                    "passed": false,
                    "violations": [],
                    "error": reason,
                })
            }
        };
        documents.push(entry);
    }

    let output = serde_json::json!({
        "documents": documents,
        "summary": {
            "checked": outcomes.len(),
            "passed": passed,
            "failed": failed,
            "violations": total_violations,
        },
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Expand paths into a sorted, deduplicated list of markdown files.
/// Directories are walked recursively for `*.md`; anything that is not an
/// existing file or directory is tried as a glob pattern.
fn discover_documents(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for raw in paths {
        let path = Path::new(raw);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            collect_markdown(path, &mut files)
                .with_context(|| format!("Failed to walk directory {}", path.display()))?;
        } else {
            let mut matched = false;
            for entry in glob::glob(raw)
                .with_context(|| format!("Invalid glob pattern '{}'", raw))?
            {
                let entry = entry?;
                if entry.is_file() {
                    files.push(entry);
                    matched = true;
                }
            }
            if !matched {
                anyhow::bail!("Path not found: {}", raw);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden {
            continue;
        }
        if path.is_dir() {
            collect_markdown(&path, files)?;
        } else if path.extension().map(|e| e == "md").unwrap_or(false) {
            files.push(path);
        }
    }
    Ok(())
}
