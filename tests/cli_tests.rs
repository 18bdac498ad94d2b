//! End-to-end tests for the labcheck binary: exit codes, output formats,
//! and batch isolation.

mod support;

use support::harness::TestHarness;

const CLEAN_DOC: &str = "\
---
title: GEV Lab
---

# Introduction

One sentence per line.
";

const HEADER_VIOLATION_DOC: &str = "## Title\nText right after.\n";

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_clean_tree_exits_zero() {
    let harness = TestHarness::new();
    harness.write_doc("lab.md", CLEAN_DOC);

    let output = harness.run(&["check", "."]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 checked, 1 passed, 0 failed"));
}

#[test]
fn test_violations_exit_one_and_name_the_rule() {
    let harness = TestHarness::new();
    harness.write_doc("lab.md", HEADER_VIOLATION_DOC);

    let output = harness.run(&["check", "."]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("BlankLineAroundHeader"));
    assert!(out.contains("header is not followed by a blank line"));
}

#[test]
fn test_quiet_suppresses_pass_lines() {
    let harness = TestHarness::new();
    harness.write_doc("lab.md", CLEAN_DOC);

    let output = harness.run(&["check", "--quiet", "."]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(!out.contains("lab.md"));
    assert!(out.contains("1 checked, 1 passed"));
}

#[test]
fn test_json_output_shape() {
    let harness = TestHarness::new();
    harness.write_doc("bad.md", HEADER_VIOLATION_DOC);
    harness.write_doc("good.md", CLEAN_DOC);

    let output = harness.run(&["check", "--format", "json", "."]);
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output is valid JSON");

    assert_eq!(value["summary"]["checked"], 2);
    assert_eq!(value["summary"]["passed"], 1);
    assert_eq!(value["summary"]["failed"], 1);

    let documents = value["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);

    let bad = documents
        .iter()
        .find(|d| d["path"].as_str().unwrap().ends_with("bad.md"))
        .unwrap();
    assert_eq!(bad["passed"], false);
    let violations = bad["violations"].as_array().unwrap();
    assert!(!violations.is_empty());
    assert!(violations
        .iter()
        .any(|v| v["rule"] == "BlankLineAroundHeader"));
    assert!(violations[0]["line_range"]["start"].is_number());
}

#[test]
fn test_parse_failure_does_not_abort_siblings() {
    let harness = TestHarness::new();
    harness.write_doc("broken.md", "```r\nnever closed\n");
    harness.write_doc("good.md", CLEAN_DOC);

    let output = harness.run(&["check", "."]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("document could not be parsed: unterminated code fence at line 1"));
    assert!(out.contains("2 checked, 1 passed, 1 failed"));
}

#[test]
fn test_unknown_rule_aborts_before_checking() {
    let harness = TestHarness::new();
    harness.write_doc("lab.md", CLEAN_DOC);

    let output = harness.run(&["check", "--rule", "NoSuchRule", "."]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown rule 'NoSuchRule'"));
    assert!(!stdout(&output).contains("checked"));
}

#[test]
fn test_rule_flags_select_an_ordered_subset() {
    let harness = TestHarness::new();
    // No front matter and a bare code reference; only the backtick rule
    // is enabled, so the front matter problem stays unreported.
    harness.write_doc("lab.md", "Call gevfit() to begin.\n");

    let output = harness.run(&["check", "--rule", "BacktickedCodeReference", "."]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("BacktickedCodeReference"));
    assert!(!out.contains("YamlFrontmatter"));
}

#[test]
fn test_rule_flag_still_validates_thresholds() {
    let harness = TestHarness::new();
    harness.write_config("thresholds:\n  max_sentences_per_line: 0\n");
    harness.write_doc("lab.md", "One sentence only.\n");

    let output = harness.run(&["check", "--rule", "OneSentencePerLine", "."]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid threshold 'max_sentences_per_line'"));
    assert!(!stdout(&output).contains("checked"));
}

#[test]
fn test_project_config_thresholds_apply() {
    let harness = TestHarness::new();
    harness.write_config("thresholds:\n  max_sentences_per_line: 2\n");
    harness.write_doc(
        "lab.md",
        "---\ntitle: Lab\n---\n\nTwo sentences. Allowed here.\n",
    );

    let output = harness.run(&["check", "."]);
    assert!(output.status.success());
}

#[test]
fn test_config_enable_list_is_honored() {
    let harness = TestHarness::new();
    harness.write_config("rules:\n  enable:\n    - OneSentencePerLine\n");
    harness.write_doc("lab.md", "First thing. Second thing.\n");

    let output = harness.run(&["check", "."]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("OneSentencePerLine"));
    assert!(!out.contains("YamlFrontmatter"));
}

#[test]
fn test_rules_command_lists_registry() {
    let harness = TestHarness::new();

    let output = harness.run(&["rules"]);
    assert!(output.status.success());

    let out = stdout(&output);
    for name in [
        "YamlFrontmatter",
        "BlankLineAroundHeader",
        "BlankLineAroundList",
        "OneSentencePerLine",
        "BacktickedCodeReference",
        "FencedCodeLanguage",
        "AnnotationPairing",
    ] {
        assert!(out.contains(name), "missing rule {} in listing", name);
    }
}

#[test]
fn test_rules_listing_downgrades_markers_off_tty() {
    let harness = TestHarness::new();
    harness.write_config("rules:\n  enable:\n    - OneSentencePerLine\n");

    let output = harness.run(&["rules"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("on "));
    assert!(out.contains("off "));
    assert!(out.contains("note:"));
    assert!(!out.contains('✓'));
    assert!(!out.contains('•'));
    assert!(!out.contains('ℹ'));
}

#[test]
fn test_config_validate_downgrades_markers_off_tty() {
    let harness = TestHarness::new();
    harness.write_config("rules:\n  enable:\n    - Bogus\n");

    let output = harness.run(&["config", "--validate"]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("FAIL"));
    assert!(!out.contains('✗'));
    assert!(!out.contains('✓'));
    assert!(!out.contains('•'));
}

#[test]
fn test_config_validate_accepts_good_config() {
    let harness = TestHarness::new();
    harness.write_config("rules:\n  enable:\n    - BlankLineAroundHeader\n");

    let output = harness.run(&["config", "--validate"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration is valid"));
}

#[test]
fn test_config_validate_rejects_unknown_rule() {
    let harness = TestHarness::new();
    harness.write_config("rules:\n  enable:\n    - Bogus\n");

    let output = harness.run(&["config", "--validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("unknown rule 'Bogus'"));
}

#[test]
fn test_explicit_file_argument() {
    let harness = TestHarness::new();
    let path = harness.write_doc("lab.md", CLEAN_DOC);
    harness.write_doc("broken.md", "```r\nnever closed\n");

    let output = harness.run(&["check", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 checked"));
}

#[test]
fn test_missing_path_is_an_error() {
    let harness = TestHarness::new();

    let output = harness.run(&["check", "does-not-exist.md"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Path not found"));
}

#[test]
fn test_version_output() {
    let harness = TestHarness::new();

    let output = harness.run(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("labcheck "));

    let verbose = harness.run(&["version", "--verbose"]);
    assert!(stdout(&verbose).contains("commit:"));
    assert!(stdout(&verbose).contains("built:"));
}
