//! classify/*
//!
//! Naming grammar violations found while building the component file.
//! Each classification failure becomes exactly one finding at the selector
//! of the offending rule; the rest of the file is still classified.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .mod-small { padding: 0; }          // classify/orphan-modifier
//! .js-open-menu { display: none; }    // classify/styled-js-hook
//! #header { color: red; }             // classify/malformed-selector
//! ```

use crate::classify::ClassifyErrorKind;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static MALFORMED_SELECTOR: RuleMeta = RuleMeta {
    name: "classify/malformed-selector",
    description: "Selectors must be made of lowercase-hyphen class names",
    category: RuleCategory::Classify,
    default_severity: Severity::Error,
};

static ORPHAN_MODIFIER: RuleMeta = RuleMeta {
    name: "classify/orphan-modifier",
    description: "Modifiers must attach to a component declared earlier in the file",
    category: RuleCategory::Classify,
    default_severity: Severity::Error,
};

static ORPHAN_STATE: RuleMeta = RuleMeta {
    name: "classify/orphan-state",
    description: "States must attach to a component declared earlier in the file",
    category: RuleCategory::Classify,
    default_severity: Severity::Error,
};

static NESTED_UTILITY: RuleMeta = RuleMeta {
    name: "classify/nested-utility",
    description: "Disallow rules nested inside utility or mixin placeholders",
    category: RuleCategory::Classify,
    default_severity: Severity::Error,
};

static STYLED_JS_HOOK: RuleMeta = RuleMeta {
    name: "classify/styled-js-hook",
    description: "Disallow declarations on js- hook classes",
    category: RuleCategory::Classify,
    default_severity: Severity::Error,
};

/// Reports classification failures of one kind
pub struct Classification(pub ClassifyErrorKind);

impl Classification {
    fn help(&self) -> &'static str {
        match self.0 {
            ClassifyErrorKind::MalformedSelector => {
                "Use lowercase, hyphen-separated class names; ids and bare elements belong in base files"
            }
            ClassifyErrorKind::OrphanModifier => {
                "Write the modifier next to its component, e.g. `.component.mod-name`"
            }
            ClassifyErrorKind::OrphanState => {
                "Write the state next to its component, e.g. `.component.is-name`"
            }
            ClassifyErrorKind::NestedUtility => "Placeholders must not contain nested rules",
            ClassifyErrorKind::StyledJsHook => {
                "Style the component class instead and keep `js-` classes for behavior only"
            }
        }
    }
}

impl Rule for Classification {
    fn meta(&self) -> &'static RuleMeta {
        match self.0 {
            ClassifyErrorKind::MalformedSelector => &MALFORMED_SELECTOR,
            ClassifyErrorKind::OrphanModifier => &ORPHAN_MODIFIER,
            ClassifyErrorKind::OrphanState => &ORPHAN_STATE,
            ClassifyErrorKind::NestedUtility => &NESTED_UTILITY,
            ClassifyErrorKind::StyledJsHook => &STYLED_JS_HOOK,
        }
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        for failure in file.failures.iter().filter(|f| f.error.kind() == self.0) {
            let finding = ctx
                .finding(failure.error.to_string(), &failure.loc)
                .with_subject(failure.error.selector())
                .with_help(self.help());
            ctx.report_finding(finding);
        }
    }
}
