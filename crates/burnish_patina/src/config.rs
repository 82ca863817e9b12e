//! Lint configuration.
//!
//! [`LintConfig`] is the file format (`burnish.config.json` or a `.toml`
//! file); [`RuleConfiguration`] is the validated, resolved form the rules
//! read from.
//!
//! ```json
//! {
//!   "rules": {
//!     "ordering/property-order": { "enabled": true, "severity": "warning" },
//!     "style/max-line-length": "off"
//!   },
//!   "maxLineLength": 100
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use burnish_carton::{CompactString, FxHashMap};
use serde::Deserialize;

use crate::diagnostic::Severity;
use crate::rule::{RuleCategory, RuleMeta};

/// Default config file names, looked up in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["burnish.config.json", "burnish.config.toml"];

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("invalid severity `{value}` for rule `{rule}` (expected off, warning, error or fatal)")]
    InvalidSeverity { rule: String, value: String },

    #[error("rule `{0}` is always fatal")]
    AlwaysFatal(String),

    #[error("invalid base file pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// How lines of a modifier's nested descendants are accounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierDescendants {
    /// Count toward the component the modifier belongs to
    #[default]
    Owner,
    /// Count toward a separate unit named after the modifier selector
    Modifier,
}

/// Per-rule setting: `"off" | "warn" | "warning" | "error" | "fatal"` or an object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Level(CompactString),
    Options {
        #[serde(default = "enabled_by_default")]
        enabled: bool,
        #[serde(default)]
        severity: Option<CompactString>,
    },
}

fn enabled_by_default() -> bool {
    true
}

/// Configuration file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LintConfig {
    pub rules: BTreeMap<String, RuleSetting>,
    pub max_line_length: Option<usize>,
    pub indent_width: Option<usize>,
    pub max_component_file_lines: Option<usize>,
    pub blank_lines_between_blocks: Option<usize>,
    pub base_files: Option<Vec<String>>,
    pub modifier_descendants: Option<ModifierDescendants>,
}

impl LintConfig {
    /// Load a config file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&text).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Find a default config file in `dir`
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Validated configuration shared read-only by every rule
#[derive(Debug, Clone)]
pub struct RuleConfiguration {
    pub max_line_length: usize,
    pub indent_width: usize,
    pub max_component_file_lines: usize,
    pub blank_lines_between_blocks: usize,
    pub modifier_descendants: ModifierDescendants,
    base_files: Vec<glob::Pattern>,
    /// Rule id to severity; `None` disables the rule
    overrides: FxHashMap<CompactString, Option<Severity>>,
}

impl RuleConfiguration {
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;
    pub const DEFAULT_INDENT_WIDTH: usize = 2;
    pub const DEFAULT_MAX_COMPONENT_FILE_LINES: usize = 300;
    pub const DEFAULT_BLANK_LINES_BETWEEN_BLOCKS: usize = 2;
    pub const DEFAULT_BASE_FILES: [&'static str; 3] =
        ["**/base/**", "**/_base.scss", "**/base.scss"];

    /// Resolve a config file against the known rules
    pub fn from_config(config: &LintConfig, rules: &[&'static RuleMeta]) -> Result<Self, ConfigError> {
        let mut resolved = Self::default();

        if let Some(value) = config.max_line_length {
            resolved.max_line_length = value;
        }
        if let Some(value) = config.indent_width {
            resolved.indent_width = value;
        }
        if let Some(value) = config.max_component_file_lines {
            resolved.max_component_file_lines = value;
        }
        if let Some(value) = config.blank_lines_between_blocks {
            resolved.blank_lines_between_blocks = value;
        }
        if let Some(value) = config.modifier_descendants {
            resolved.modifier_descendants = value;
        }
        if let Some(patterns) = &config.base_files {
            resolved.base_files = compile_patterns(patterns.iter().map(String::as_str))?;
        }

        for (rule, setting) in &config.rules {
            let Some(meta) = rules.iter().find(|meta| meta.name == rule.as_str()) else {
                return Err(ConfigError::UnknownRule(rule.clone()));
            };
            let severity = match setting {
                RuleSetting::Level(level) => parse_level(rule, level)?,
                RuleSetting::Options { enabled: false, .. } => None,
                RuleSetting::Options {
                    severity: Some(level),
                    ..
                } => parse_level(rule, level)?,
                // Enabled with the default severity
                RuleSetting::Options { severity: None, .. } => continue,
            };
            if meta.category == RuleCategory::Fatal {
                if severity != Some(Severity::Fatal) {
                    return Err(ConfigError::AlwaysFatal(rule.clone()));
                }
                continue;
            }
            resolved.overrides.insert(rule.as_str().into(), severity);
        }

        Ok(resolved)
    }

    /// Severity a rule runs with, or `None` when it is disabled
    pub fn severity_for(&self, meta: &RuleMeta) -> Option<Severity> {
        match self.overrides.get(meta.name) {
            Some(severity) => *severity,
            None => Some(meta.default_severity),
        }
    }

    /// Override one rule's severity (`None` disables it)
    pub fn set_severity(&mut self, rule: &str, severity: Option<Severity>) {
        self.overrides.insert(rule.into(), severity);
    }

    /// Whether element selectors are allowed in this file
    pub fn is_base_file(&self, path: &str) -> bool {
        let path = path.strip_prefix("./").unwrap_or(path);
        let path = path.replace('\\', "/");
        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..Default::default()
        };
        self.base_files
            .iter()
            .any(|pattern| pattern.matches_with(&path, options))
    }
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            max_line_length: Self::DEFAULT_MAX_LINE_LENGTH,
            indent_width: Self::DEFAULT_INDENT_WIDTH,
            max_component_file_lines: Self::DEFAULT_MAX_COMPONENT_FILE_LINES,
            blank_lines_between_blocks: Self::DEFAULT_BLANK_LINES_BETWEEN_BLOCKS,
            modifier_descendants: ModifierDescendants::default(),
            base_files: Self::DEFAULT_BASE_FILES
                .iter()
                .filter_map(|p| glob::Pattern::new(p).ok())
                .collect(),
            overrides: FxHashMap::default(),
        }
    }
}

fn compile_patterns<'p>(
    patterns: impl Iterator<Item = &'p str>,
) -> Result<Vec<glob::Pattern>, ConfigError> {
    patterns
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

/// Parse a severity level; `Ok(None)` means "off"
fn parse_level(rule: &str, level: &str) -> Result<Option<Severity>, ConfigError> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Ok(None),
        "warn" | "warning" => Ok(Some(Severity::Warning)),
        "error" => Ok(Some(Severity::Error)),
        "fatal" => Ok(Some(Severity::Fatal)),
        _ => Err(ConfigError::InvalidSeverity {
            rule: rule.to_string(),
            value: level.to_string(),
        }),
    }
}
