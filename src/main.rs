//! CLI entry point and command dispatch for labcheck.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "labcheck")]
#[command(version)]
#[command(about = "Style conformance checker for Markdown teaching-lab documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documents against the style rules
    Check {
        /// Files, directories, or glob patterns to check
        #[arg(value_name = "PATH", default_value = ".")]
        paths: Vec<String>,
        /// Enable only this rule, in the order given (can be specified multiple times)
        #[arg(long = "rule", value_name = "NAME")]
        rules: Vec<String>,
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Config file to use instead of the global/project merge
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Suppress per-document pass lines
        #[arg(short, long)]
        quiet: bool,
    },
    /// List registered rules
    Rules {
        /// Config file to use instead of the global/project merge
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Validate configuration
    Config {
        /// Validate config semantically (thresholds, rule names)
        #[arg(long)]
        validate: bool,
        /// Config file to use instead of the global/project merge
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Show additional build information
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            paths,
            rules,
            format,
            config,
            quiet,
        } => {
            let check_format = match format.to_lowercase().as_str() {
                "json" => cmd::check::CheckFormat::Json,
                "text" => cmd::check::CheckFormat::Text,
                _ => {
                    eprintln!("Error: Invalid format '{}'. Use 'text' or 'json'.", format);
                    std::process::exit(1);
                }
            };
            cmd::check::cmd_check(&paths, &rules, check_format, config.as_deref(), quiet)
        }
        Commands::Rules { config } => cmd::rules::cmd_rules(config.as_deref()),
        Commands::Config { validate, config } => {
            if validate {
                cmd::config::cmd_config_validate(config.as_deref())
            } else {
                println!("Usage: labcheck config --validate");
                Ok(())
            }
        }
        Commands::Completion { shell } => cmd_completion(shell),
        Commands::Version { verbose } => cmd_version(verbose),
    }
}

/// Generate shell completion script
fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "labcheck", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("labcheck {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}
