//! style/component-size
//!
//! A component, with its descendants, modifiers and states, should stay
//! within `maxComponentFileLines` lines (300 by default). Advisory only.
//!
//! Lines are attributed to the outermost component a rule's selector
//! names, so a file holding several components is measured per component.
//! Descendants nested under a modifier, such as
//! `.global-header-nav-item.mod-sign-up .global-header-nav-item-text`, count
//! toward the modifier's owner by default. With
//! `"modifierDescendants": "modifier"` they are measured as a unit of their
//! own, named after the modifier compound.

use burnish_carton::{format_compact, CompactString};
use burnish_relief::{Node, SourceLocation};

use crate::classify::{ClassifiedSelector, SelectorKind};
use crate::component::ComponentFile;
use crate::config::ModifierDescendants;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::selector::PrefixKind;

static META: RuleMeta = RuleMeta {
    name: "style/component-size",
    description: "Warn about components longer than the configured limit",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Warn about oversized components
pub struct ComponentSize;

impl Rule for ComponentSize {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        let max = ctx.config.max_component_file_lines;

        let mut sizer = Sizer::new(file, ctx.config.modifier_descendants);
        sizer.walk(&file.stylesheet.nodes, None);

        for unit in sizer.finish() {
            if unit.lines > max {
                let message = format!(
                    "`{}` spans {} lines, maximum is {}",
                    unit.name, unit.lines, max
                );
                let finding = ctx
                    .finding(message, &unit.loc)
                    .with_subject(unit.name)
                    .with_help("Split the component into smaller components");
                ctx.report_finding(finding);
            }
        }
    }
}

#[derive(Debug)]
struct Unit {
    name: CompactString,
    lines: usize,
    /// Selector of the first rule counted toward the unit
    loc: SourceLocation,
}

struct Sizer<'f> {
    file: &'f ComponentFile<'f>,
    mode: ModifierDescendants,
    /// Top-level component names, in file order
    components: Vec<&'f str>,
    units: Vec<Unit>,
    /// Unit owning each line, indexed by line number; the innermost rule wins
    owners: Vec<Option<usize>>,
}

impl<'f> Sizer<'f> {
    fn new(file: &'f ComponentFile<'f>, mode: ModifierDescendants) -> Self {
        let components = file
            .selectors
            .iter()
            .filter(|s| s.kind == SelectorKind::Component && s.ancestors.is_empty())
            .filter_map(|s| s.base.as_deref())
            .collect();
        Self {
            file,
            mode,
            components,
            units: Vec::new(),
            owners: vec![None; file.index.line_count() + 2],
        }
    }

    fn walk(&mut self, nodes: &'f [Node], parent: Option<usize>) {
        for node in nodes {
            let Some(block) = node.block() else {
                continue;
            };
            let unit = match node {
                Node::Rule(rule) => self
                    .file
                    .classification(rule)
                    .and_then(|selector| self.unit_name(selector))
                    .map(|name| self.unit(name, rule.selector_loc))
                    .or(parent),
                _ => parent,
            };

            let loc = node.loc();
            for line in loc.start.line..=loc.end.line {
                if let Some(owner) = self.owners.get_mut(line as usize) {
                    *owner = unit;
                }
            }

            self.walk(&block.children, unit);
        }
    }

    fn unit_name(&self, selector: &ClassifiedSelector) -> Option<CompactString> {
        if self.mode == ModifierDescendants::Modifier {
            if let Some(modifier) = selector
                .ancestors
                .iter()
                .find(|c| c.find_prefix(PrefixKind::Modifier).is_some())
            {
                return Some(modifier.raw.clone());
            }
        }

        let root = selector
            .ancestors
            .iter()
            .find_map(|c| c.plain_classes().next())
            .or_else(|| selector.tokens.iter().find(|t| t.is_plain_class()))?;
        let root = root.raw.as_str();

        let owner = self
            .components
            .iter()
            .filter(|name| {
                root == **name
                    || root
                        .strip_prefix(**name)
                        .is_some_and(|rest| rest.starts_with('-'))
            })
            .min_by_key(|name| name.len())
            .copied()
            .unwrap_or(root);
        Some(format_compact!(".{}", owner))
    }

    /// Units with their line counts, in first-seen order
    fn finish(mut self) -> Vec<Unit> {
        for &owner in self.owners.iter().flatten() {
            self.units[owner].lines += 1;
        }
        self.units
    }

    /// Index of the named unit, created on first use
    fn unit(&mut self, name: CompactString, loc: SourceLocation) -> usize {
        if let Some(index) = self.units.iter().position(|u| u.name == name) {
            return index;
        }
        self.units.push(Unit {
            name,
            lines: 0,
            loc,
        });
        self.units.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfiguration;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    const NESTED_MODIFIER: &str =
        ".a {\n  color: red;\n  &.mod-x {\n    .a-b {\n      color: blue;\n    }\n  }\n}\n";

    fn lint(source: &str, max: usize, mode: ModifierDescendants) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(ComponentSize));
        let mut config = RuleConfiguration::default();
        config.max_component_file_lines = max;
        config.modifier_descendants = mode;
        Linter::with_registry(registry)
            .with_config(config)
            .lint_source(source, "a.scss")
    }

    #[test]
    fn test_owner_mode() {
        let result = lint(NESTED_MODIFIER, 5, ModifierDescendants::Owner);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].message, "`.a` spans 8 lines, maximum is 5");
    }

    #[test]
    fn test_modifier_mode() {
        assert!(!lint(NESTED_MODIFIER, 5, ModifierDescendants::Modifier).has_findings());

        let result = lint(NESTED_MODIFIER, 2, ModifierDescendants::Modifier);
        let messages: Vec<_> = result.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "`.a` spans 5 lines, maximum is 2",
                "`.a.mod-x` spans 3 lines, maximum is 2",
            ]
        );
    }

    #[test]
    fn test_nested_blocks_sharing_a_line() {
        let source = ".a { .a-b { color: red; } .a-c { color: blue; } }\n";
        assert!(!lint(source, 1, ModifierDescendants::Owner).has_findings());

        let result = lint(source, 0, ModifierDescendants::Owner);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].message, "`.a` spans 1 lines, maximum is 0");
    }

    #[test]
    fn test_components_measured_separately() {
        let source = ".a {\n  color: red;\n}\n\n\n.a-b {\n  color: red;\n}\n\n\n.c {\n  color: red;\n}\n";
        let result = lint(source, 5, ModifierDescendants::Owner);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].message, "`.a` spans 6 lines, maximum is 5");
    }
}
