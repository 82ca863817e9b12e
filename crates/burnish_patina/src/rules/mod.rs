//! Lint rules for SCSS component files.
//!
//! Rules are grouped by what they look at:
//!
//! - **classify**: naming grammar violations raised while classifying selectors
//! - **naming**: class naming conventions
//! - **ordering**: file sections and property order
//! - **style**: formatting conventions and advisory size limits
//!
//! `io-error` and `parse-error` are not rules in the registry. They are
//! produced by the linter itself for files that never reach the rules.

pub mod classify;
pub mod naming;
pub mod ordering;
pub mod style;

use crate::diagnostic::Severity;
use crate::rule::{RuleCategory, RuleMeta, RuleRegistry};

/// Unreadable file
pub static IO_ERROR: RuleMeta = RuleMeta {
    name: "io-error",
    description: "File could not be read",
    category: RuleCategory::Fatal,
    default_severity: Severity::Fatal,
};

/// Parser rejected the file
pub static PARSE_ERROR: RuleMeta = RuleMeta {
    name: "parse-error",
    description: "File could not be parsed",
    category: RuleCategory::Fatal,
    default_severity: Severity::Fatal,
};

/// Metadata of every rule a report can mention, registry rules first
pub fn all_metas(registry: &RuleRegistry) -> Vec<&'static RuleMeta> {
    let mut metas = registry.metas();
    metas.push(&IO_ERROR);
    metas.push(&PARSE_ERROR);
    metas
}
