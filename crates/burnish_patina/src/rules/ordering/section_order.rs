//! ordering/section-order
//!
//! A component file is laid out in sections: base and descendant rules,
//! then modifiers, then states, then media queries. Section marker comments
//! such as `/* Modifiers */` count as the start of their section. The same
//! order applies inside every rule and at-rule block.
//!
//! Inside a block, declarations come before nested rules.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .card.is-open { }
//! .card.mod-wide { }      // modifiers after state
//!
//! .card {
//!   .card-title { }
//!   color: red;           // declaration after a nested rule
//! }
//! ```

use burnish_carton::format_compact;
use burnish_relief::Node;

use crate::component::SectionItem;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "ordering/section-order",
    description: "Enforce base, modifier, state, media query section order",
    category: RuleCategory::Ordering,
    default_severity: Severity::Error,
};

/// Enforce section order
pub struct SectionOrder;

impl Rule for SectionOrder {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        for scope in &file.scopes {
            let mut latest: Option<&SectionItem> = None;
            for item in &scope.items {
                match latest {
                    Some(prev) if item.section < prev.section => {
                        let message = format_compact!(
                            "`{}` ({}) appears after the {} section",
                            item.label.trim(),
                            item.section.as_str(),
                            prev.section.as_str()
                        );
                        let finding = ctx
                            .finding(message, &item.loc)
                            .with_subject(item.label.trim())
                            .with_help("Order sections as base, modifiers, state, media queries");
                        ctx.report_finding(finding);
                    }
                    Some(prev) if item.section == prev.section => {}
                    _ => latest = Some(item),
                }
            }
        }

        for info in &file.blocks {
            let mut nested_seen = false;
            for child in &info.block.children {
                match child {
                    Node::Declaration(decl) if nested_seen => {
                        let message = format_compact!(
                            "declaration `{}` appears after a nested block in `{}`",
                            decl.property,
                            info.label
                        );
                        let finding = ctx
                            .finding(message, &decl.property_loc())
                            .with_subject(decl.property.clone())
                            .with_help("Move declarations above nested rules");
                        ctx.report_finding(finding);
                        break;
                    }
                    _ if child.block().is_some() => nested_seen = true,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(SectionOrder));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_valid_order() {
        let source = ".card {\n}\n.card-title {\n}\n.card.mod-wide {\n}\n.card.is-open {\n}\n@media print {\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_modifier_after_state() {
        let source = ".card {\n}\n.card.is-open {\n}\n.card.mod-wide {\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`.card.mod-wide` (modifiers) appears after the state section"
        );
        assert_eq!(result.findings[0].line, 5);
    }

    #[test]
    fn test_marker_opens_section() {
        let source = ".card {\n}\n/* Media Queries */\n.card.mod-wide {\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].line, 4);
    }

    #[test]
    fn test_descendant_after_modifier() {
        let source = ".card {\n}\n.card.mod-wide {\n}\n.card-title {\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].line, 5);
    }

    #[test]
    fn test_declaration_after_nested_block() {
        let source = ".card {\n  .card-title {\n    color: red;\n  }\n  color: blue;\n  margin: 0;\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].line, 5);
        assert_eq!(result.findings[0].column, 3);
    }

    #[test]
    fn test_nested_modifier_after_state() {
        let source = ".card {\n  color: red;\n\n  &.is-open {\n    display: block;\n  }\n\n  &.mod-wide {\n    width: 100%;\n  }\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`&.mod-wide` (modifiers) appears after the state section"
        );
        assert_eq!(result.findings[0].line, 8);
    }

    #[test]
    fn test_nested_order_is_per_block() {
        let source = ".card.is-open {\n}\n.card-title {\n  &.mod-wide {\n  }\n}\n";
        let result = lint(source);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].line, 3);
    }
}
