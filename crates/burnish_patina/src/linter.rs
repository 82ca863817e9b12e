//! Main linter entry point.
//!
//! The linter reads and parses one file, builds its [`ComponentFile`], runs
//! every enabled rule over it and returns the findings. Nothing it does for
//! one file is visible to another, so a single `Linter` is shared across
//! worker threads.

use std::path::Path;

use burnish_relief::{Position, SourceLocation};

use crate::component::ComponentFile;
use crate::config::{ConfigError, LintConfig, RuleConfiguration};
use crate::context::LintContext;
use crate::diagnostic::{Finding, Severity};
use crate::disable::DisabledRules;
use crate::rule::{Rule, RuleRegistry};
use crate::rules::{all_metas, IO_ERROR, PARSE_ERROR};

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Path of the file, as given
    pub filename: String,
    /// Source text (empty when the file could not be read)
    pub source: String,
    /// Findings sorted by line, column and rule id
    pub findings: Vec<Finding>,
}

impl LintResult {
    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    #[inline]
    pub fn fatal_count(&self) -> usize {
        self.count(Severity::Fatal)
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Check if there are any fatal or error findings
    #[inline]
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_failure())
    }

    /// Check if there are any findings
    #[inline]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Main linter struct
pub struct Linter {
    registry: RuleRegistry,
    config: RuleConfiguration,
}

impl Linter {
    /// Create a new linter with every built-in rule and default options
    #[inline]
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_recommended(),
            config: RuleConfiguration::default(),
        }
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            config: RuleConfiguration::default(),
        }
    }

    /// Replace the rule configuration
    #[inline]
    pub fn with_config(mut self, config: RuleConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Create a linter with every built-in rule, configured from a config file
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let registry = RuleRegistry::with_recommended();
        let config = RuleConfiguration::from_config(config, &all_metas(&registry))?;
        Ok(Self { registry, config })
    }

    #[inline]
    pub fn config(&self) -> &RuleConfiguration {
        &self.config
    }

    /// Mutable access to the configuration, for command-line overrides
    #[inline]
    pub fn config_mut(&mut self) -> &mut RuleConfiguration {
        &mut self.config
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        self.registry.rules()
    }

    /// Lint SCSS source text
    pub fn lint_source(&self, source: &str, filename: &str) -> LintResult {
        let findings = match burnish_armature::parse(source) {
            Ok(stylesheet) => {
                let file = ComponentFile::build(filename, source, &stylesheet, &self.config);
                self.evaluate(&file)
            }
            Err(error) => {
                tracing::warn!(file = filename, %error, "failed to parse");
                let at = error.position();
                vec![parse_failure(filename, at, error.to_string())]
            }
        };

        LintResult {
            filename: filename.to_string(),
            source: source.to_string(),
            findings,
        }
    }

    /// Read and lint one file. An unreadable file yields a single fatal finding.
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let filename = path.to_string_lossy();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                tracing::debug!(file = %filename, bytes = source.len(), "linting");
                self.lint_source(&source, &filename)
            }
            Err(error) => {
                tracing::warn!(file = %filename, %error, "failed to read");
                LintResult {
                    filename: filename.to_string(),
                    source: String::new(),
                    findings: vec![Finding::fatal(
                        IO_ERROR.name,
                        &*filename,
                        format!("failed to read file: {error}"),
                    )],
                }
            }
        }
    }

    /// Run every enabled rule over a built file
    pub fn evaluate(&self, file: &ComponentFile<'_>) -> Vec<Finding> {
        let mut ctx = LintContext::new(file, &self.config);

        for rule in self.registry.rules() {
            let meta = rule.meta();
            let Some(severity) = self.config.severity_for(meta) else {
                continue;
            };
            ctx.current_rule = meta.name;
            ctx.current_severity = severity;
            rule.check(&mut ctx);
        }

        let mut findings = ctx.into_findings();
        let disabled = DisabledRules::parse(file.source);
        if !disabled.is_empty() {
            findings.retain(|f| !disabled.is_disabled(f.rule_id, f.line));
        }
        findings.sort_by(|a, b| {
            (a.line, a.column, a.rule_id).cmp(&(b.line, b.column, b.rule_id))
        });

        tracing::debug!(file = file.path, findings = findings.len(), "evaluated");
        findings
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a built file with every built-in rule
pub fn evaluate(file: &ComponentFile<'_>, config: &RuleConfiguration) -> Vec<Finding> {
    Linter::new().with_config(config.clone()).evaluate(file)
}

fn parse_failure(filename: &str, at: Position, message: String) -> Finding {
    Finding::new(
        PARSE_ERROR.name,
        Severity::Fatal,
        filename,
        &SourceLocation::new(at, at),
        message,
    )
}
