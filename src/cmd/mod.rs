//! Command implementations for the labcheck CLI.
//!
//! Commands own everything the core does not: file discovery, config
//! loading, terminal rendering, and exit codes.

pub mod check;
pub mod config;
pub mod rules;
