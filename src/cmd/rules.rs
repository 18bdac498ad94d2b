//! The `rules` command: list the registry with enablement markers.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use labcheck::config::Config;
use labcheck::rules;

pub fn cmd_rules(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    let enable = &config.rules.enable;
    let tty = atty::is(atty::Stream::Stdout);
    let (on_mark, off_mark, note_mark) = if tty { ("✓", "•", "ℹ") } else { ("on", "off", "note:") };

    println!("{}", "Registered rules:".bold());
    for rule in rules::default_rules(&config) {
        let enabled = enable.is_empty() || enable.iter().any(|n| n == rule.name());
        let marker = if enabled {
            on_mark.green()
        } else {
            off_mark.yellow()
        };
        println!(
            "  {} {:<26} {}",
            marker,
            rule.name(),
            rule.description().dimmed()
        );
    }

    if !enable.is_empty() {
        println!(
            "\n{} Enabled subset (registration order): {}",
            note_mark.cyan(),
            enable.join(", ")
        );
    }

    Ok(())
}
