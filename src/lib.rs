//! # labcheck - Style conformance checking for teaching-lab documents
//!
//! labcheck validates Markdown teaching-lab documents (statistics and
//! hydrology labs with YAML front matter, fenced code blocks, and numbered
//! annotation callouts) against a fixed set of authoring conventions.
//!
//! ## Overview
//!
//! The core is a pure pipeline: raw text is parsed into typed blocks, an
//! ordered rule set is evaluated over the blocks, and the violations are
//! folded into a report with a pass/fail verdict. The core performs no
//! I/O; file discovery and rendering belong to the CLI layer.
//!
//! ## Modules
//!
//! - [`document`] - Structural parse of raw text into typed blocks
//! - [`rules`] - Style rules and the built-in registry
//! - [`engine`] - Rule selection and ordered evaluation
//! - [`report`] - Violation values, deduplication, and report assembly
//! - [`config`] - Thresholds and rule selection from YAML config files
//!
//! ## Example
//!
//! ```
//! use labcheck::config::Config;
//! use labcheck::engine::RuleEngine;
//!
//! let engine = RuleEngine::new(&Config::default()).unwrap();
//!
//! let text = "---\ntitle: GEV Lab\n---\n\n# Introduction\n\nFit the model with `gevfit()`.\n";
//! let report = engine.check(text).unwrap();
//! assert!(report.passed);
//!
//! let report = engine.check("## Title\nText right after.\n").unwrap();
//! assert!(!report.passed);
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod report;
pub mod rules;
