//! naming/no-id-or-element
//!
//! Disallow ids and bare element selectors in component files. Element
//! defaults belong in base files (see `baseFiles` in the configuration).
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! #main .global-header { }
//! .global-header li .global-header-link { }
//! ```
//!
//! ### Valid
//! ```scss
//! .global-header .global-header-link { }
//! ```

use burnish_carton::FxHashSet;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::selector::Compound;

use super::own_ancestor_compounds;

static META: RuleMeta = RuleMeta {
    name: "naming/no-id-or-element",
    description: "Disallow id and element selectors outside base files",
    category: RuleCategory::Naming,
    default_severity: Severity::Error,
};

/// Disallow ids and bare elements outside base files
pub struct NoIdOrElement;

impl Rule for NoIdOrElement {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        if file.is_base {
            return;
        }

        let mut seen = FxHashSet::default();
        for selector in &file.selectors {
            if !seen.insert((selector.loc.start.offset, selector.part)) {
                continue;
            }
            let compounds = own_ancestor_compounds(&selector.written);
            let Some(message) = compounds.iter().find_map(offense) else {
                continue;
            };
            let finding = ctx
                .finding(format!("{} in `{}`", message, selector.written), &selector.loc)
                .with_subject(selector.written.clone())
                .with_help("Select elements through a component class, or move the rule to a base file");
            ctx.report_finding(finding);
        }
    }
}

fn offense(compound: &Compound) -> Option<String> {
    if let Some(id) = compound.ids.first() {
        return Some(format!("id selector `#{}`", id));
    }
    let interpolated = compound
        .element
        .as_deref()
        .is_some_and(|e| e.starts_with("#{"));
    if compound.is_element_only() && !interpolated {
        return Some(format!("element selector `{}`", compound.raw));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str, path: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoIdOrElement));
        Linter::with_registry(registry).lint_source(source, path)
    }

    #[test]
    fn test_id_ancestor() {
        let result = lint("#main .global-header {\n  color: red;\n}\n", "header.scss");
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "id selector `#main` in `#main .global-header`"
        );
    }

    #[test]
    fn test_element_ancestor() {
        let source = ".global-header li .global-header-link {\n  color: red;\n}\n";
        let result = lint(source, "header.scss");
        assert_eq!(result.error_count(), 1);
        assert!(result.findings[0].message.starts_with("element selector `li`"));
    }

    #[test]
    fn test_base_file_allowed() {
        let result = lint("ul li a {\n  color: red;\n}\n", "styles/base/_lists.scss");
        assert!(!result.has_findings());
    }

    #[test]
    fn test_parent_reference_ignored() {
        let source = ".a {\n  & + & {\n    margin: 0;\n  }\n}\n";
        assert!(!lint(source, "a.scss").has_findings());
    }
}
