//! Configuration for labcheck runs.
//!
//! Settings come from YAML: a global file at
//! `~/.config/labcheck/config.yml` merged under a project-level
//! `.labcheck.yml`, project values winning field by field. Both files are
//! optional; defaults apply when neither exists. `parse` is pure, the
//! `load*` functions do the file I/O.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::ConfigError;
use crate::rules;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(default_max_sentences_per_line, usize, 1);

/// Thresholds for rule heuristics. The heuristics are formalizations of
/// judgment calls, so their knobs live in config rather than in code.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    /// Max sentences allowed on one paragraph line (default: 1)
    #[serde(default = "default_max_sentences_per_line")]
    pub max_sentences_per_line: usize,
    /// Tokens exempted from BacktickedCodeReference by exact match
    #[serde(default)]
    pub backtick_ignore: Vec<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_sentences_per_line: default_max_sentences_per_line(),
            backtick_ignore: vec![],
        }
    }
}

/// Rule selection. An empty enable list means the full registry in
/// default order; a non-empty list is both the subset and the
/// registration order.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(default)]
    pub enable: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/labcheck/config.yml)
    /// 2. Project config (.labcheck.yml)
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(".labcheck.yml"),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config")
    }

    /// Load merged configuration from the given global and project paths.
    /// Either file may be absent; project values override global values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = if project_path.exists() {
            PartialConfig::load_from(project_path)?
        } else {
            PartialConfig::default()
        };

        Ok(global_config.merge_with(project_config))
    }

    /// Semantic validation: every enabled rule name must be registered and
    /// every threshold must be usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.max_sentences_per_line == 0 {
            return Err(ConfigError::InvalidThreshold {
                field: "max_sentences_per_line",
                message: "must be at least 1".to_string(),
            });
        }
        for name in &self.rules.enable {
            if !rules::RULE_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }
        Ok(())
    }
}

/// Returns the path to the global config file at ~/.config/labcheck/config.yml
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/labcheck/config.yml"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub thresholds: Option<PartialThresholds>,
    pub rules: Option<RulesConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialThresholds {
    pub max_sentences_per_line: Option<usize>,
    pub backtick_ignore: Option<Vec<String>>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Merge this global config with a project config, returning the merged
    /// result. Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_thresholds = self.thresholds.unwrap_or_default();
        let project_thresholds = project.thresholds.unwrap_or_default();

        Config {
            thresholds: Thresholds {
                // Project value > global value > default
                max_sentences_per_line: project_thresholds
                    .max_sentences_per_line
                    .or(global_thresholds.max_sentences_per_line)
                    .unwrap_or_else(default_max_sentences_per_line),
                backtick_ignore: project_thresholds
                    .backtick_ignore
                    .or(global_thresholds.backtick_ignore)
                    .unwrap_or_default(),
            },
            // Rule selection: project overrides global, or use default
            rules: project.rules.or(self.rules).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.thresholds.max_sentences_per_line, 1);
        assert!(config.thresholds.backtick_ignore.is_empty());
        assert!(config.rules.enable.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = "\
thresholds:
  max_sentences_per_line: 2
  backtick_ignore:
    - e.g.
rules:
  enable:
    - BlankLineAroundHeader
    - OneSentencePerLine
";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.thresholds.max_sentences_per_line, 2);
        assert_eq!(config.thresholds.backtick_ignore, vec!["e.g."]);
        assert_eq!(
            config.rules.enable,
            vec!["BlankLineAroundHeader", "OneSentencePerLine"]
        );
    }

    #[test]
    fn test_parse_rejects_invalid_yaml() {
        assert!(Config::parse("thresholds: [not a mapping").is_err());
    }

    #[test]
    fn test_merge_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.yml");
        let project = dir.path().join(".labcheck.yml");

        fs::write(
            &global,
            "thresholds:\n  max_sentences_per_line: 3\n  backtick_ignore: [e.g.]\n",
        )
        .unwrap();
        fs::write(&project, "thresholds:\n  max_sentences_per_line: 2\n").unwrap();

        let config = Config::load_merged_from(Some(&global), &project).unwrap();
        assert_eq!(config.thresholds.max_sentences_per_line, 2);
        // Untouched project field falls back to the global value.
        assert_eq!(config.thresholds.backtick_ignore, vec!["e.g."]);
    }

    #[test]
    fn test_merge_with_no_files_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config =
            Config::load_merged_from(None, &dir.path().join(".labcheck.yml")).unwrap();
        assert_eq!(config.thresholds.max_sentences_per_line, 1);
        assert!(config.rules.enable.is_empty());
    }

    #[test]
    fn test_validate_rejects_unknown_rule() {
        let mut config = Config::default();
        config.rules.enable = vec!["NoSuchRule".to_string()];
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "unknown rule 'NoSuchRule'");
    }

    #[test]
    fn test_validate_rejects_zero_sentence_threshold() {
        let mut config = Config::default();
        config.thresholds.max_sentences_per_line = 0;
        assert!(config.validate().is_err());
    }
}
