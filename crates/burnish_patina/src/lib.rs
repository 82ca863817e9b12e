//! # burnish_patina
//!
//! Patina - The style guide checker for Burnish.
//! Linter for component-oriented SCSS.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the film that forms on a worked surface over
//! time. A good patina is even and consistent, which is exactly what a style
//! guide asks of a stylesheet. `burnish_patina` checks that every selector,
//! declaration and block follows the same conventions.
//!
//! ## Pipeline
//!
//! 1. The source is parsed by `burnish_armature` into a `burnish_relief` tree.
//! 2. Every rule selector is classified (component, modifier, state, utility,
//!    js hook or base) against the components declared before it.
//! 3. Each enabled [`Rule`] evaluates the classified file and reports
//!    [`Finding`]s.
//! 4. Findings of all files are merged by [`aggregate`] into one ordered,
//!    deduplicated [`Report`].
//!
//! ## Usage
//!
//! ```rust
//! use burnish_patina::{aggregate, format_summary, Linter};
//!
//! let linter = Linter::new();
//! let source = ".card {\n  width: 1px;\n  color: red;\n}\n";
//! let result = linter.lint_source(source, "card.scss");
//!
//! let report = aggregate(result.findings.clone()).with_file_count(1);
//! assert_eq!(report.exit_code(), 1);
//! println!("{}", format_summary(&report.summary));
//! ```
//!
//! ## Rules
//!
//! ### Classification (error)
//! - `classify/malformed-selector` - Selector that fits no kind of the naming grammar
//! - `classify/orphan-modifier` - `mod-` class without a component in the same compound
//! - `classify/orphan-state` - `is-` class without a component in the same compound
//! - `classify/nested-utility` - Utility placeholder nested inside a rule
//! - `classify/styled-js-hook` - Declarations on a `js-` selector
//!
//! ### Naming (error)
//! - `naming/lowercase-hyphen` - Lowercase, hyphen-separated class names
//! - `naming/descendant-chain` - Descendants extend their owner's name
//! - `naming/no-id-or-element` - No ids, and elements only in base files
//!
//! ### Ordering (error)
//! - `ordering/section-order` - Sections appear in the prescribed order
//! - `ordering/property-order` - Properties sorted alphabetically
//!
//! ### Style (warning)
//! - `style/declaration-per-line` - One declaration per line
//! - `style/blank-lines` - Blank lines between top-level blocks
//! - `style/colon-spacing` - One space after `:` and none before
//! - `style/indentation` - Space indentation per nesting level
//! - `style/max-line-length` - Line length limit
//! - `style/trailing-whitespace` - No trailing whitespace
//! - `style/shorthand` - Shortest shorthand for box properties
//! - `style/max-file-lines` - File length limit
//! - `style/component-size` - Per-component length limit

pub mod batch;
pub mod classify;
mod component;
pub mod config;
mod context;
mod diagnostic;
mod disable;
mod linter;
pub mod output;
pub mod report;
mod rule;
pub mod rules;
pub mod selector;

pub use batch::{lint_batch, BatchOutcome, CancelToken};
pub use classify::{classify, ClassifiedSelector, ClassifyError, ClassifyErrorKind, SelectorKind};
pub use component::{ComponentFile, Section};
pub use config::{ConfigError, LintConfig, ModifierDescendants, RuleConfiguration};
pub use context::LintContext;
pub use diagnostic::{Finding, LintSummary, Severity};
pub use linter::{evaluate, LintResult, Linter};
pub use output::{format_json, format_report, format_summary, format_text, OutputFormat};
pub use report::{aggregate, Report};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry};

/// Lint one SCSS source with the built-in rules and default configuration
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_source(source, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_function() {
        let result = lint(".card {\n  width: 1px;\n  color: red;\n}\n", "card.scss");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].rule_id, "ordering/property-order");
    }

    #[test]
    fn test_lint_clean() {
        let result = lint(".card {\n  color: red;\n}\n", "card.scss");
        assert!(!result.has_findings());
    }
}
