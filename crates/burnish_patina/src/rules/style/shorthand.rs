//! style/shorthand
//!
//! Prefer the shortest form of box-model shorthands, and a shorthand over
//! all four of its longhands.
//!
//! Values are compared as text, so `0` and `0px` count as different. The
//! check under-reports rather than guessing at value semantics; values with
//! functions, interpolation or `!important` are skipped.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .card {
//!   margin: 0 0 0 0;        // margin: 0
//!   padding: 4px 8px 4px 8px; // padding: 4px 8px
//! }
//! ```

use burnish_relief::DeclarationNode;
use phf::phf_set;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/shorthand",
    description: "Prefer collapsed shorthand values",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Properties taking one to four top/right/bottom/left values
static BOX_SHORTHANDS: phf::Set<&'static str> = phf_set! {
    "margin",
    "padding",
    "border-width",
    "border-color",
    "border-style",
    "inset",
    "scroll-margin",
    "scroll-padding",
};

/// Shorthands whose four longhands are `<name>-top` ... `<name>-left`
const LONGHAND_GROUPS: [&str; 2] = ["margin", "padding"];
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Prefer shorthand values
pub struct Shorthand;

impl Rule for Shorthand {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        for info in &file.blocks {
            for decl in info.block.declarations() {
                let property = decl.property.to_ascii_lowercase();
                if !BOX_SHORTHANDS.contains(property.as_str()) {
                    continue;
                }
                let Some(values) = box_values(&decl.value) else {
                    continue;
                };
                let collapsed = collapse(&values);
                if collapsed.len() < values.len() {
                    let shorter = collapsed.join(" ");
                    let message = format!(
                        "`{}: {}` can be written as `{}: {}`",
                        decl.property, decl.value, decl.property, shorter
                    );
                    let finding = ctx
                        .finding(message, &decl.loc)
                        .with_subject(decl.property.clone());
                    ctx.report_finding(finding);
                }
            }

            for group in LONGHAND_GROUPS {
                let longhands: Vec<&DeclarationNode> = SIDES
                    .iter()
                    .filter_map(|side| {
                        info.block
                            .declarations()
                            .find(|d| is_longhand(&d.property, group, side))
                    })
                    .collect();
                if longhands.len() < SIDES.len() {
                    continue;
                }
                let Some(first) = longhands.iter().min_by_key(|d| d.loc.start.offset) else {
                    continue;
                };
                let finding = ctx
                    .finding(
                        format!(
                            "`{group}-top`, `{group}-right`, `{group}-bottom` and `{group}-left` can be combined into `{group}`"
                        ),
                        &first.loc,
                    )
                    .with_subject(group);
                ctx.report_finding(finding);
            }
        }
    }
}

fn is_longhand(property: &str, group: &str, side: &str) -> bool {
    property.len() == group.len() + 1 + side.len()
        && property.starts_with(group)
        && property[group.len()..].starts_with('-')
        && property.ends_with(side)
}

/// Split a value into its whitespace-separated parts, if it is simple enough
fn box_values(value: &str) -> Option<Vec<&str>> {
    if value.contains(['(', '#', '!', '/', ',']) {
        return None;
    }
    let values: Vec<&str> = value.split_whitespace().collect();
    (1..=4).contains(&values.len()).then_some(values)
}

/// Shortest equivalent form of top/right/bottom/left values
fn collapse<'v>(values: &[&'v str]) -> Vec<&'v str> {
    let (top, right, bottom, left) = match *values {
        [all] => (all, all, all, all),
        [vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
        [top, horizontal, bottom] => (top, horizontal, bottom, horizontal),
        [top, right, bottom, left] => (top, right, bottom, left),
        _ => return values.to_vec(),
    };

    if right != left {
        vec![top, right, bottom, left]
    } else if top != bottom {
        vec![top, right, bottom]
    } else if top != right {
        vec![top, right]
    } else {
        vec![top]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Shorthand));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse(&["0", "0", "0", "0"]), vec!["0"]);
        assert_eq!(collapse(&["1px", "2px", "1px", "2px"]), vec!["1px", "2px"]);
        assert_eq!(collapse(&["1px", "2px", "3px", "2px"]), vec!["1px", "2px", "3px"]);
        assert_eq!(collapse(&["1px", "2px", "1px"]), vec!["1px", "2px"]);
        assert_eq!(collapse(&["1px", "1px"]), vec!["1px"]);
        assert_eq!(
            collapse(&["1px", "2px", "3px", "4px"]),
            vec!["1px", "2px", "3px", "4px"]
        );
    }

    #[test]
    fn test_equal_values() {
        let result = lint(".card {\n  margin: 0 0 0 0;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "`margin: 0 0 0 0` can be written as `margin: 0`"
        );
    }

    #[test]
    fn test_already_short() {
        let source = ".card {\n  margin: 0 auto;\n  padding: 1px 2px 3px;\n  inset: calc(1px + 2px) 0 0 0;\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_four_longhands() {
        let source = ".card {\n  padding-bottom: 1px;\n  padding-left: 2px;\n  padding-right: 2px;\n  padding-top: 1px;\n}\n";
        let result = lint(source);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].line, 2);
        assert_eq!(result.findings[0].subject.as_deref(), Some("padding"));
    }

    #[test]
    fn test_three_longhands() {
        let source = ".card {\n  margin-bottom: 1px;\n  margin-left: 2px;\n  margin-top: 1px;\n}\n";
        assert!(!lint(source).has_findings());
    }
}
