//! naming/descendant-chain
//!
//! A component descendant is named after the component it is nested in,
//! with one more hyphen-joined word for each level of nesting.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .global-header {
//!   .logo { }              // must start with `global-header-`
//! }
//! .a {
//!   .a-b {
//!     .a-c { }             // must start with `a-b-`
//!   }
//! }
//! ```
//!
//! ### Valid
//! ```scss
//! .global-header {
//!   .global-header-logo { }
//! }
//! ```

use burnish_carton::format_compact;

use crate::classify::{ClassifiedSelector, SelectorKind};
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "naming/descendant-chain",
    description: "Enforce component descendant names that extend their ancestor's name",
    category: RuleCategory::Naming,
    default_severity: Severity::Error,
};

/// Enforce `component-descendant-descendant` naming
pub struct DescendantChain;

impl Rule for DescendantChain {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        let selectors = &file.selectors;

        // Resolutions of one written part against each parent part are adjacent
        let mut start = 0;
        while start < selectors.len() {
            let key = written_key(&selectors[start]);
            let end = selectors[start..]
                .iter()
                .position(|s| written_key(s) != key)
                .map_or(selectors.len(), |n| start + n);
            check_part(ctx, &selectors[start..end]);
            start = end;
        }
    }
}

fn written_key(selector: &ClassifiedSelector) -> (u32, usize) {
    (selector.loc.start.offset, selector.part)
}

/// Report a written part only when it fits none of the parents it is nested in
fn check_part(ctx: &mut LintContext<'_>, resolutions: &[ClassifiedSelector]) {
    let mut problem = None;
    for selector in resolutions {
        if selector.kind != SelectorKind::Component {
            continue;
        }
        let Some(name) = selector.base.as_deref() else {
            continue;
        };
        if selector.tokens.iter().any(|t| t.interpolated) {
            continue;
        }

        match chain_problem(selector, name) {
            Some(message) => {
                if problem.is_none() {
                    problem = Some((selector, name, message));
                }
            }
            None => return,
        }
    }

    if let Some((selector, name, message)) = problem {
        let finding = ctx
            .finding(message, &selector.loc)
            .with_subject(name)
            .with_help("Prefix descendant classes with the name of the component they are nested in");
        ctx.report_finding(finding);
    }
}

fn chain_problem(selector: &ClassifiedSelector, name: &str) -> Option<String> {
    // Nearest enclosing compound that names a component
    let owner = selector
        .ancestors
        .iter()
        .rev()
        .find_map(|c| c.plain_classes().next())?;
    if owner.interpolated {
        return None;
    }

    let prefix = format_compact!("{}-", owner.raw);
    if !name.starts_with(prefix.as_str()) {
        return Some(format!(
            "`.{}` is nested under `.{}` but does not start with `{}`",
            name, owner.raw, prefix
        ));
    }

    let segments = name.split('-').count();
    let required = selector.depth as usize + 1;
    if segments < required {
        return Some(format!(
            "`.{}` is nested {} levels deep but has {} segments (expected at least {})",
            name, selector.depth, segments, required
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(DescendantChain));
        Linter::with_registry(registry).lint_source(source, "test.scss")
    }

    #[test]
    fn test_valid_chain() {
        let source = ".a {\n  .a-b {\n    .a-b-c {\n      color: red;\n    }\n  }\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_valid_under_modifier() {
        let source = ".a-b {\n  &.mod-x {\n    .a-b-c {\n      color: red;\n    }\n  }\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_missing_prefix() {
        let source = ".global-header {\n  .logo {\n    float: left;\n  }\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`.logo` is nested under `.global-header` but does not start with `global-header-`"
        );
        assert_eq!(result.findings[0].line, 2);
    }

    #[test]
    fn test_skipped_level() {
        let source = ".a {\n  .a-b {\n    .a-c {\n      color: red;\n    }\n  }\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].line, 3);
    }

    #[test]
    fn test_too_few_segments() {
        // `.b` breaks the chain, so `.b-c` is one segment short for its depth
        let source = ".a {\n  .b {\n    .b-c {\n      color: red;\n    }\n  }\n}\n";
        let result = lint(source);
        let lines: Vec<_> = result.findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(
            result.findings[1].message,
            "`.b-c` is nested 2 levels deep but has 2 segments (expected at least 3)"
        );
    }

    #[test]
    fn test_under_element_is_not_a_component() {
        let source = ".a {\n  li {\n    .label {\n      color: red;\n    }\n  }\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_selector_list_parent() {
        let source = ".a,\n.b {\n  color: red;\n\n  .b-title {\n    color: blue;\n  }\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_selector_list_parent_fits_neither() {
        let source = ".a,\n.b {\n  color: red;\n\n  .title {\n    color: blue;\n  }\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`.title` is nested under `.a` but does not start with `a-`"
        );
        assert_eq!(result.findings[0].line, 5);
    }

    #[test]
    fn test_flat_descendant() {
        let result = lint(".global-header .logo {\n  float: left;\n}\n");
        assert_eq!(result.error_count(), 1);
    }
}
