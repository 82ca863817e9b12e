//! Selector classification.
//!
//! Every rule selector is classified by its rightmost compound into one of
//! the [`SelectorKind`]s of the naming grammar. Violations of the grammar
//! are returned as [`ClassifyError`]s; the caller turns each into exactly one
//! finding and carries on with the rest of the file.

use burnish_carton::{CompactString, FxHashSet};
use burnish_relief::SourceLocation;
use serde::Serialize;

use crate::selector::{parse_compounds, Compound, PrefixKind, SelectorToken};

/// Kind of a classified selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectorKind {
    /// Bare element or pseudo-class defaults
    Base,
    /// Namespaced, hyphen-chained class
    Component,
    /// `.component.mod-x`
    Modifier,
    /// `.component.is-x`
    State,
    /// `%m-x` / `%u-x` placeholder
    Utility,
    /// `.js-x`, behavior only
    JsHook,
}

impl SelectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Component => "component",
            Self::Modifier => "modifier",
            Self::State => "state",
            Self::Utility => "utility",
            Self::JsHook => "js hook",
        }
    }

    /// Kinds that carry a component name
    #[inline]
    pub fn is_component_like(self) -> bool {
        matches!(self, Self::Component | Self::Modifier | Self::State)
    }
}

/// Discriminant of [`ClassifyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifyErrorKind {
    MalformedSelector,
    OrphanModifier,
    OrphanState,
    NestedUtility,
    StyledJsHook,
}

/// Naming grammar violation found while classifying a selector
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("malformed selector `{selector}`: {reason}")]
    MalformedSelector {
        selector: CompactString,
        reason: &'static str,
    },

    #[error("modifier `.{token}` in `{selector}` is not attached to a component declared earlier in this file")]
    OrphanModifier {
        selector: CompactString,
        token: CompactString,
    },

    #[error("state `.{token}` in `{selector}` is not attached to a component declared earlier in this file")]
    OrphanState {
        selector: CompactString,
        token: CompactString,
    },

    #[error("`{selector}` is nested inside the placeholder `{placeholder}`")]
    NestedUtility {
        selector: CompactString,
        placeholder: CompactString,
    },

    #[error("JS hook `.{token}` must not be styled, but `{selector}` declares `{property}`")]
    StyledJsHook {
        selector: CompactString,
        token: CompactString,
        property: CompactString,
    },
}

impl ClassifyError {
    pub fn kind(&self) -> ClassifyErrorKind {
        match self {
            Self::MalformedSelector { .. } => ClassifyErrorKind::MalformedSelector,
            Self::OrphanModifier { .. } => ClassifyErrorKind::OrphanModifier,
            Self::OrphanState { .. } => ClassifyErrorKind::OrphanState,
            Self::NestedUtility { .. } => ClassifyErrorKind::NestedUtility,
            Self::StyledJsHook { .. } => ClassifyErrorKind::StyledJsHook,
        }
    }

    /// Selector the error was raised for
    pub fn selector(&self) -> &str {
        match self {
            Self::MalformedSelector { selector, .. }
            | Self::OrphanModifier { selector, .. }
            | Self::OrphanState { selector, .. }
            | Self::NestedUtility { selector, .. }
            | Self::StyledJsHook { selector, .. } => selector,
        }
    }

    fn malformed(selector: &str, reason: &'static str) -> Self {
        Self::MalformedSelector {
            selector: selector.into(),
            reason,
        }
    }
}

/// An enclosing rule, as seen by a nested selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub selector: CompactString,
    /// `None` when the ancestor itself failed classification
    pub kind: Option<SelectorKind>,
    pub base: Option<CompactString>,
    pub depth: u32,
}

/// Everything the classifier looks at for one selector
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'s> {
    /// Selector text with `&` already resolved
    pub selector: &'s str,
    /// Enclosing rules, nearest last
    pub ancestors: &'s [Ancestor],
    /// Non-variable properties declared directly in the rule
    pub properties: &'s [CompactString],
    pub is_base_file: bool,
    pub depth: u32,
    pub loc: SourceLocation,
}

/// Component names declared so far in one file
#[derive(Debug, Clone, Default)]
pub struct KnownComponents {
    names: FxHashSet<CompactString>,
}

impl KnownComponents {
    #[inline]
    pub fn insert(&mut self, name: impl Into<CompactString>) {
        self.names.insert(name.into());
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A selector that passed classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSelector {
    /// Selector text after `&` resolution
    pub selector: CompactString,
    /// The list part as written in the rule
    pub written: CompactString,
    /// Index of the part in the rule's selector list
    pub part: usize,
    /// Component name the selector belongs to, if any
    pub base: Option<CompactString>,
    pub kind: SelectorKind,
    /// Number of enclosing selectors in the source tree
    pub depth: u32,
    /// Declared property names, in source order
    pub properties: Vec<CompactString>,
    /// Tokens of the rightmost compound
    pub tokens: Vec<SelectorToken>,
    /// Compounds left of the rightmost one
    pub ancestors: Vec<Compound>,
    pub loc: SourceLocation,
}

/// Classify one resolved selector.
///
/// `known` holds the components declared before this selector in the same
/// file; modifiers and states must attach to one of them.
pub fn classify(
    input: &ClassifyInput<'_>,
    known: &KnownComponents,
) -> Result<ClassifiedSelector, ClassifyError> {
    let selector = input.selector.trim();
    let mut compounds = parse_compounds(selector);
    let Some(last) = compounds.pop() else {
        return Err(ClassifyError::malformed(selector, "empty selector"));
    };

    if last.empty_class {
        return Err(ClassifyError::malformed(selector, "empty class name"));
    }
    if !last.ids.is_empty() {
        return Err(ClassifyError::malformed(
            selector,
            "id selectors are not allowed",
        ));
    }
    if last.tokens.iter().any(SelectorToken::has_uppercase) {
        return Err(ClassifyError::malformed(
            selector,
            "class names must not contain uppercase characters",
        ));
    }
    if last.tokens.iter().any(SelectorToken::has_underscore) {
        return Err(ClassifyError::malformed(
            selector,
            "class names must not contain underscores",
        ));
    }

    if let Some(utility) = input
        .ancestors
        .iter()
        .rev()
        .find(|a| a.kind == Some(SelectorKind::Utility))
    {
        return Err(ClassifyError::NestedUtility {
            selector: selector.into(),
            placeholder: utility.selector.clone(),
        });
    }

    let (kind, base) = if last.tokens.is_empty() {
        if !input.is_base_file {
            return Err(ClassifyError::malformed(
                selector,
                "element selectors belong in base files",
            ));
        }
        (SelectorKind::Base, None)
    } else if let Some(placeholder) = last.placeholders().next() {
        (SelectorKind::Utility, Some(placeholder.raw.clone()))
    } else if let Some(hook) = last.find_prefix(PrefixKind::JsHook) {
        if let Some(property) = input.properties.first() {
            return Err(ClassifyError::StyledJsHook {
                selector: selector.into(),
                token: hook.raw.clone(),
                property: property.clone(),
            });
        }
        (SelectorKind::JsHook, hook.parent.clone())
    } else if let Some(state) = last.find_prefix(PrefixKind::State) {
        match owning_component(state, known) {
            Some(owner) => (SelectorKind::State, Some(owner)),
            None => {
                return Err(ClassifyError::OrphanState {
                    selector: selector.into(),
                    token: state.raw.clone(),
                })
            }
        }
    } else if let Some(modifier) = last.find_prefix(PrefixKind::Modifier) {
        match owning_component(modifier, known) {
            Some(owner) => (SelectorKind::Modifier, Some(owner)),
            None => {
                return Err(ClassifyError::OrphanModifier {
                    selector: selector.into(),
                    token: modifier.raw.clone(),
                })
            }
        }
    } else {
        // Only plain classes are left
        let name = last.plain_classes().next().map(|t| t.raw.clone());
        let under_element = compounds.last().is_some_and(Compound::is_element_only);
        if under_element {
            (SelectorKind::Base, name)
        } else {
            (SelectorKind::Component, name)
        }
    };

    Ok(ClassifiedSelector {
        selector: selector.into(),
        written: selector.into(),
        part: 0,
        base,
        kind,
        depth: input.depth,
        properties: input.properties.to_vec(),
        tokens: last.tokens,
        ancestors: compounds,
        loc: input.loc,
    })
}

fn owning_component(token: &SelectorToken, known: &KnownComponents) -> Option<CompactString> {
    token.parent.as_ref().filter(|p| known.contains(p)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'s>(selector: &'s str, ancestors: &'s [Ancestor]) -> ClassifyInput<'s> {
        ClassifyInput {
            selector,
            ancestors,
            properties: &[],
            is_base_file: false,
            depth: ancestors.len() as u32,
            loc: SourceLocation::default(),
        }
    }

    fn known(names: &[&str]) -> KnownComponents {
        let mut known = KnownComponents::default();
        for name in names {
            known.insert(*name);
        }
        known
    }

    #[test]
    fn test_component_chain() {
        let k = known(&[]);
        let a = classify(&input(".a", &[]), &k).unwrap();
        assert_eq!(a.kind, SelectorKind::Component);
        assert_eq!(a.base.as_deref(), Some("a"));
        assert_eq!(a.depth, 0);

        let parent = [Ancestor {
            selector: ".a".into(),
            kind: Some(SelectorKind::Component),
            base: Some("a".into()),
            depth: 0,
        }];
        let ab = classify(&input(".a .a-b", &parent), &k).unwrap();
        assert_eq!(ab.kind, SelectorKind::Component);
        assert_eq!(ab.depth, 1);
        assert_eq!(ab.ancestors.len(), 1);
    }

    #[test]
    fn test_modifier_and_state() {
        let k = known(&["a-b"]);
        let m = classify(&input(".a-b.mod-x", &[]), &k).unwrap();
        assert_eq!(m.kind, SelectorKind::Modifier);
        assert_eq!(m.base.as_deref(), Some("a-b"));

        let s = classify(&input(".a-b.is-open", &[]), &k).unwrap();
        assert_eq!(s.kind, SelectorKind::State);
    }

    #[test]
    fn test_orphans() {
        let k = known(&[]);
        assert_eq!(
            classify(&input(".a-b.mod-x", &[]), &k).unwrap_err().kind(),
            ClassifyErrorKind::OrphanModifier
        );
        assert_eq!(
            classify(&input(".mod-small", &[]), &k).unwrap_err().kind(),
            ClassifyErrorKind::OrphanModifier
        );
        assert_eq!(
            classify(&input(".is-open", &[]), &k).unwrap_err().kind(),
            ClassifyErrorKind::OrphanState
        );
    }

    #[test]
    fn test_malformed() {
        let k = known(&[]);
        for selector in ["", ".", "#header", ".fooBar", ".foo_bar", "div"] {
            let err = classify(&input(selector, &[]), &k).unwrap_err();
            assert_eq!(err.kind(), ClassifyErrorKind::MalformedSelector, "{selector}");
        }
    }

    #[test]
    fn test_base() {
        let k = known(&[]);
        let mut base = input("li:hover", &[]);
        base.is_base_file = true;
        assert_eq!(classify(&base, &k).unwrap().kind, SelectorKind::Base);

        let under_element = classify(&input("li .label", &[]), &k).unwrap();
        assert_eq!(under_element.kind, SelectorKind::Base);
    }

    #[test]
    fn test_js_hook() {
        let k = known(&[]);
        let hook = classify(&input(".js-open-menu", &[]), &k).unwrap();
        assert_eq!(hook.kind, SelectorKind::JsHook);

        let properties = [CompactString::from("display")];
        let mut styled = input(".js-open-menu", &[]);
        styled.properties = &properties;
        let err = classify(&styled, &k).unwrap_err();
        assert_eq!(err.kind(), ClassifyErrorKind::StyledJsHook);
        assert_eq!(
            err.to_string(),
            "JS hook `.js-open-menu` must not be styled, but `.js-open-menu` declares `display`"
        );
    }

    #[test]
    fn test_utility() {
        let k = known(&[]);
        let utility = classify(&input("%u-clearfix", &[]), &k).unwrap();
        assert_eq!(utility.kind, SelectorKind::Utility);

        let parent = [Ancestor {
            selector: "%u-clearfix".into(),
            kind: Some(SelectorKind::Utility),
            base: Some("u-clearfix".into()),
            depth: 0,
        }];
        let err = classify(&input("%u-clearfix .inner", &parent), &k).unwrap_err();
        assert_eq!(err.kind(), ClassifyErrorKind::NestedUtility);
    }
}
