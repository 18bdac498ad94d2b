//! Config command for validating labcheck configuration

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use labcheck::config::{global_config_path, Config};
use labcheck::engine::ConfigError;
use labcheck::rules;

/// Pass, fail, and bullet marks, downgraded to plain ASCII off-TTY.
fn marks() -> (&'static str, &'static str, &'static str) {
    if atty::is(atty::Stream::Stdout) {
        ("✓", "✗", "•")
    } else {
        ("ok", "FAIL", "-")
    }
}

/// Validate config semantically and report issues
pub fn cmd_config_validate(config_path: Option<&Path>) -> Result<()> {
    println!("{}", "Validating labcheck configuration...".bold());
    println!();

    show_sources(config_path);

    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut errors = 0;

    errors += check_thresholds(&config);
    errors += check_rule_names(&config);

    println!();
    let (pass_mark, fail_mark, _) = marks();
    if errors == 0 {
        println!("{} Configuration is valid", pass_mark.green());
        Ok(())
    } else {
        println!("{} Found {} error(s)", fail_mark.red(), errors);
        std::process::exit(1);
    }
}

/// Show which config files the merge will read
fn show_sources(config_path: Option<&Path>) {
    println!("{}", "Config sources...".dimmed());
    let (_, _, bullet) = marks();

    if let Some(path) = config_path {
        println!("  {} {} (--config)", bullet.cyan(), path.display());
        return;
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            println!("  {} {} (global)", bullet.cyan(), global.display());
        } else {
            println!("  {} no global config ({})", bullet.dimmed(), global.display());
        }
    }

    let project = Path::new(".labcheck.yml");
    if project.exists() {
        println!("  {} {} (project)", bullet.cyan(), project.display());
    } else {
        println!("  {} no project config (.labcheck.yml)", bullet.dimmed());
    }
}

fn check_thresholds(config: &Config) -> usize {
    println!("{}", "Checking thresholds...".dimmed());
    let (pass_mark, fail_mark, _) = marks();

    let mut errors = 0;

    if config.thresholds.max_sentences_per_line >= 1 {
        println!(
            "  {} max_sentences_per_line: {}",
            pass_mark.green(),
            config.thresholds.max_sentences_per_line
        );
    } else {
        println!(
            "  {} max_sentences_per_line must be at least 1",
            fail_mark.red()
        );
        errors += 1;
    }

    if !config.thresholds.backtick_ignore.is_empty() {
        println!(
            "  {} backtick_ignore: {} token(s)",
            pass_mark.green(),
            config.thresholds.backtick_ignore.len()
        );
    }

    errors
}

fn check_rule_names(config: &Config) -> usize {
    println!("{}", "Checking enabled rules...".dimmed());
    let (pass_mark, fail_mark, _) = marks();

    if config.rules.enable.is_empty() {
        println!(
            "  {} all {} registry rules enabled",
            pass_mark.green(),
            rules::RULE_NAMES.len()
        );
        return 0;
    }

    let mut errors = 0;
    for name in &config.rules.enable {
        if rules::RULE_NAMES.contains(&name.as_str()) {
            println!("  {} {}", pass_mark.green(), name);
        } else {
            println!(
                "  {} {}",
                fail_mark.red(),
                ConfigError::UnknownRule(name.clone())
            );
            errors += 1;
        }
    }

    errors
}
