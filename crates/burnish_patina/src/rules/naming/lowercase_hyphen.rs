//! naming/lowercase-hyphen
//!
//! Class and placeholder names are lowercase words separated by single
//! hyphens.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .global--header { }
//! .-header { }
//! .header- { }
//! .2col { }
//! .globalHeader .global-header-logo { }
//! ```
//!
//! ### Valid
//! ```scss
//! .global-header .global-header-logo { }
//! ```

use burnish_carton::{format_compact, FxHashSet};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::selector::SelectorToken;

use super::own_ancestor_compounds;

static META: RuleMeta = RuleMeta {
    name: "naming/lowercase-hyphen",
    description: "Enforce lowercase, single-hyphen class names",
    category: RuleCategory::Naming,
    default_severity: Severity::Error,
};

/// Enforce lowercase-hyphen class names
pub struct LowercaseHyphen;

impl Rule for LowercaseHyphen {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        let mut seen = FxHashSet::default();

        for selector in &file.selectors {
            // A part nested in a selector list is classified once per parent
            if !seen.insert((selector.loc.start.offset, selector.part)) {
                continue;
            }
            // Uppercase and underscores in the rightmost compound already
            // failed classification
            let rightmost = selector
                .tokens
                .iter()
                .find_map(|token| hyphen_problem(token).map(|reason| (token, reason)));

            let ancestors = own_ancestor_compounds(&selector.written);
            let problem = rightmost.or_else(|| {
                ancestors
                    .iter()
                    .flat_map(|c| c.tokens.iter())
                    .find_map(|token| case_problem(token).map(|reason| (token, reason)))
            });

            if let Some((token, reason)) = problem {
                let sigil = if token.placeholder { '%' } else { '.' };
                let finding = ctx
                    .finding(
                        format_compact!(
                            "`{}{}` in `{}` {}",
                            sigil,
                            token.raw,
                            selector.written,
                            reason
                        ),
                        &selector.loc,
                    )
                    .with_subject(token.raw.clone())
                    .with_help("Use lowercase words joined by single hyphens");
                ctx.report_finding(finding);
            }
        }
    }
}

/// Hyphen and digit problems; interpolated names are not checked
fn hyphen_problem(token: &SelectorToken) -> Option<&'static str> {
    if token.interpolated {
        return None;
    }
    let name = token.raw.as_str();
    if name.starts_with('-') {
        Some("starts with a hyphen")
    } else if name.ends_with('-') {
        Some("ends with a hyphen")
    } else if name.contains("--") {
        Some("contains an empty segment")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        Some("starts with a digit")
    } else {
        None
    }
}

/// Any naming problem, for compounds classification never looked at
fn case_problem(token: &SelectorToken) -> Option<&'static str> {
    if token.has_uppercase() {
        Some("contains uppercase characters")
    } else if token.has_underscore() {
        Some("contains underscores")
    } else {
        hyphen_problem(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(LowercaseHyphen));
        Linter::with_registry(registry).lint_source(source, "test.scss")
    }

    #[test]
    fn test_valid() {
        let result = lint(".global-header {\n  .global-header-logo {\n    float: left;\n  }\n}\n");
        assert!(!result.has_findings());
    }

    #[test]
    fn test_hyphen_problems() {
        for (selector, reason) in [
            (".global--header", "contains an empty segment"),
            (".-header", "starts with a hyphen"),
            (".header-", "ends with a hyphen"),
            (".2col", "starts with a digit"),
        ] {
            let result = lint(&format!("{selector} {{\n  color: red;\n}}\n"));
            assert_eq!(result.error_count(), 1, "{selector}");
            assert!(result.findings[0].message.ends_with(reason), "{selector}");
        }
    }

    #[test]
    fn test_ancestor_compound_case() {
        let result = lint(".globalHeader .global-header-logo {\n  float: left;\n}\n");
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`.globalHeader` in `.globalHeader .global-header-logo` contains uppercase characters"
        );
    }

    #[test]
    fn test_interpolation_is_skipped() {
        let result = lint(".icon-#{$name} {\n  color: red;\n}\n");
        assert!(!result.has_findings());
    }
}
