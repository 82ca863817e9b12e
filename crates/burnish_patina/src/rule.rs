//! Rule trait and registry for lint rules.

use crate::classify::ClassifyErrorKind;
use crate::context::LintContext;
use crate::diagnostic::Severity;

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCategory {
    /// Naming grammar violations found while classifying selectors
    Classify,
    /// Class naming conventions
    Naming,
    /// Section and property order
    Ordering,
    /// Formatting conventions
    Style,
    /// Files that could not be read or parsed
    Fatal,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Naming => "naming",
            Self::Ordering => "ordering",
            Self::Style => "style",
            Self::Fatal => "fatal",
        }
    }
}

/// Rule metadata
#[derive(Debug)]
pub struct RuleMeta {
    /// Rule name (e.g., "ordering/property-order")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    pub category: RuleCategory,
    pub default_severity: Severity,
}

/// Rule trait for implementing lint rules.
///
/// Rules are stateless. Each one reads the classified file from the context
/// and reports findings through it.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Check one file
    fn check(&self, ctx: &mut LintContext<'_>);
}

/// Registry holding all lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Find a rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.meta().name == name)
            .map(|rule| rule.as_ref())
    }

    /// Metadata of every registered rule
    pub fn metas(&self) -> Vec<&'static RuleMeta> {
        self.rules.iter().map(|rule| rule.meta()).collect()
    }

    /// Create registry with every built-in rule
    pub fn with_recommended() -> Self {
        use crate::rules::{classify, naming, ordering, style};

        let mut registry = Self::new();

        // ============================================
        // Classification (Error)
        // ============================================

        registry.register(Box::new(classify::Classification(
            ClassifyErrorKind::MalformedSelector,
        )));
        registry.register(Box::new(classify::Classification(
            ClassifyErrorKind::OrphanModifier,
        )));
        registry.register(Box::new(classify::Classification(
            ClassifyErrorKind::OrphanState,
        )));
        registry.register(Box::new(classify::Classification(
            ClassifyErrorKind::NestedUtility,
        )));
        registry.register(Box::new(classify::Classification(
            ClassifyErrorKind::StyledJsHook,
        )));

        // ============================================
        // Naming (Error)
        // ============================================

        registry.register(Box::new(naming::LowercaseHyphen));
        registry.register(Box::new(naming::DescendantChain));
        registry.register(Box::new(naming::NoIdOrElement));

        // ============================================
        // Ordering (Error)
        // ============================================

        registry.register(Box::new(ordering::SectionOrder));
        registry.register(Box::new(ordering::PropertyOrder));

        // ============================================
        // Style (Warning)
        // ============================================
        // Formatting conventions and advisory size limits.

        registry.register(Box::new(style::DeclarationPerLine));
        registry.register(Box::new(style::BlankLines));
        registry.register(Box::new(style::ColonSpacing));
        registry.register(Box::new(style::Indentation));
        registry.register(Box::new(style::MaxLineLength));
        registry.register(Box::new(style::TrailingWhitespace));
        registry.register(Box::new(style::Shorthand));
        registry.register(Box::new(style::MaxFileLines));
        registry.register(Box::new(style::ComponentSize));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}
