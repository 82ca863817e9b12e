//! Selector text analysis.
//!
//! Splits selector lists into parts, parts into compound selectors, and
//! compounds into the class, placeholder and id tokens the naming grammar
//! is expressed in. Nothing here judges a selector; see [`crate::classify`].

use std::borrow::Cow;

use burnish_carton::{is_name_char, CompactString};

/// Naming prefix of a class or placeholder token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixKind {
    None,
    /// `.mod-x`
    Modifier,
    /// `.is-x`
    State,
    /// `.js-x`
    JsHook,
    /// `%m-x`
    Mixin,
    /// `%u-x`
    Utility,
}

impl PrefixKind {
    fn of_class(name: &str) -> Self {
        if name.starts_with("mod-") {
            Self::Modifier
        } else if name.starts_with("is-") {
            Self::State
        } else if name.starts_with("js-") {
            Self::JsHook
        } else {
            Self::None
        }
    }

    fn of_placeholder(name: &str) -> Self {
        if name.starts_with("m-") {
            Self::Mixin
        } else if name.starts_with("u-") {
            Self::Utility
        } else {
            Self::None
        }
    }
}

/// One class (`.name`) or placeholder (`%name`) from a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorToken {
    /// Name without the leading `.` or `%`
    pub raw: CompactString,
    pub prefix: PrefixKind,
    /// `%name` rather than `.name`
    pub placeholder: bool,
    /// Contains `#{...}` interpolation
    pub interpolated: bool,
    /// Non-prefixed sibling in the same compound, for prefixed tokens
    pub parent: Option<CompactString>,
}

impl SelectorToken {
    fn new(raw: &str, placeholder: bool) -> Self {
        let prefix = if placeholder {
            PrefixKind::of_placeholder(raw)
        } else {
            PrefixKind::of_class(raw)
        };
        Self {
            raw: raw.into(),
            prefix,
            placeholder,
            interpolated: raw.contains("#{"),
            parent: None,
        }
    }

    /// Hyphen-separated segments of the name
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('-')
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Name text with interpolation removed, for character checks
    pub fn literal(&self) -> Cow<'_, str> {
        strip_interpolation(&self.raw)
    }

    /// A class without any naming prefix
    #[inline]
    pub fn is_plain_class(&self) -> bool {
        !self.placeholder && self.prefix == PrefixKind::None
    }

    /// Uppercase letters in the literal part of the name
    pub fn has_uppercase(&self) -> bool {
        self.literal().chars().any(char::is_uppercase)
    }

    /// Underscores in the literal part of the name
    pub fn has_underscore(&self) -> bool {
        self.literal().contains('_')
    }
}

/// A compound selector: everything between two combinators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub raw: CompactString,
    /// Element name or `*`
    pub element: Option<CompactString>,
    /// Classes and placeholders in source order
    pub tokens: Vec<SelectorToken>,
    /// Id names (without `#`)
    pub ids: Vec<CompactString>,
    pub pseudo: bool,
    pub attribute: bool,
    /// Contains `&`
    pub parent_ref: bool,
    /// Contains a `.` not followed by a name
    pub empty_class: bool,
}

impl Compound {
    /// No class, placeholder or id: `a`, `li:hover`, `*`, `[type=text]`
    pub fn is_element_only(&self) -> bool {
        self.tokens.is_empty() && self.ids.is_empty() && !self.empty_class && !self.parent_ref
    }

    /// Plain class tokens (no prefix, not placeholders)
    pub fn plain_classes(&self) -> impl Iterator<Item = &SelectorToken> {
        self.tokens.iter().filter(|t| t.is_plain_class())
    }

    /// First token with the given prefix
    pub fn find_prefix(&self, prefix: PrefixKind) -> Option<&SelectorToken> {
        self.tokens
            .iter()
            .find(|t| !t.placeholder && t.prefix == prefix)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &SelectorToken> {
        self.tokens.iter().filter(|t| t.placeholder)
    }
}

/// Split a selector list on top-level commas. Parts are trimmed; empty
/// parts are kept so callers can report them.
pub fn split_list(selector: &str) -> Vec<&str> {
    split_list_spans(selector)
        .into_iter()
        .map(|(_, part)| part)
        .collect()
}

/// Like [`split_list`], with the byte offset of each trimmed part
pub fn split_list_spans(selector: &str) -> Vec<(usize, &str)> {
    let bytes = selector.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'\\' => i += 1,
            b',' if depth == 0 => {
                parts.push(trimmed_span(selector, start, i));
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(trimmed_span(selector, start, bytes.len()));
    parts
}

fn trimmed_span(text: &str, start: usize, end: usize) -> (usize, &str) {
    let raw = &text[start..end];
    let lead = raw.len() - raw.trim_start().len();
    (start + lead, raw.trim())
}

/// Split one selector (no commas) into compound selectors, left to right
pub fn parse_compounds(selector: &str) -> Vec<Compound> {
    let bytes = selector.as_bytes();
    let mut compounds = Vec::new();
    let mut current = Compound::default();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'+' | b'~' => {
                push_compound(&mut compounds, &mut current, &selector[start..i]);
                i += 1;
                start = i;
            }
            b'.' => {
                let end = read_name(bytes, i + 1);
                if end == i + 1 {
                    current.empty_class = true;
                } else {
                    current
                        .tokens
                        .push(SelectorToken::new(&selector[i + 1..end], false));
                }
                i = end;
            }
            b'%' => {
                let end = read_name(bytes, i + 1);
                if end == i + 1 {
                    current.empty_class = true;
                } else {
                    current
                        .tokens
                        .push(SelectorToken::new(&selector[i + 1..end], true));
                }
                i = end;
            }
            b'#' if bytes.get(i + 1) == Some(&b'{') => {
                let end = read_name(bytes, i);
                if current.element.is_none() {
                    current.element = Some(selector[i..end].into());
                }
                i = end;
            }
            b'#' => {
                let end = read_name(bytes, i + 1);
                current.ids.push(selector[i + 1..end].into());
                i = end;
            }
            b':' => {
                current.pseudo = true;
                i = skip_pseudo(bytes, i);
            }
            b'[' => {
                current.attribute = true;
                i = skip_balanced(bytes, i, b'[', b']');
            }
            b'&' => {
                current.parent_ref = true;
                i = read_name(bytes, i + 1);
            }
            b'*' => {
                current.element = Some("*".into());
                i += 1;
            }
            c if is_name_char(c) => {
                let end = read_name(bytes, i);
                current.element = Some(selector[i..end].into());
                i = end;
            }
            b'\\' => i = skip_escape(bytes, i),
            _ => i += 1,
        }
    }
    push_compound(&mut compounds, &mut current, &selector[start..]);

    compounds
}

fn push_compound(compounds: &mut Vec<Compound>, current: &mut Compound, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    let mut compound = std::mem::take(current);
    compound.raw = raw.into();
    link_prefixed_tokens(&mut compound);
    compounds.push(compound);
}

/// Link prefixed tokens to the first plain sibling class
fn link_prefixed_tokens(compound: &mut Compound) {
    let owner = compound.plain_classes().next().map(|t| t.raw.clone());
    for token in &mut compound.tokens {
        if !token.placeholder && token.prefix != PrefixKind::None {
            token.parent = owner.clone();
        }
    }
}

/// End of a class/element name starting at `i`, including `#{...}` interpolation
fn read_name(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'#' && bytes.get(i + 1) == Some(&b'{') {
            i = skip_balanced(bytes, i + 1, b'{', b'}');
        } else if c == b'\\' {
            i = skip_escape(bytes, i);
        } else if is_name_char(c) {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Skip a backslash and the character it escapes
fn skip_escape(bytes: &[u8], i: usize) -> usize {
    let mut j = (i + 2).min(bytes.len());
    while j < bytes.len() && bytes[j] & 0xC0 == 0x80 {
        j += 1;
    }
    j
}

/// Skip `:name`, `::name` and an optional `(...)` argument
fn skip_pseudo(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i) == Some(&b':') {
        i += 1;
    }
    i = read_name(bytes, i);
    if bytes.get(i) == Some(&b'(') {
        i = skip_balanced(bytes, i, b'(', b')');
    }
    i
}

/// Skip from an opening delimiter at `i` past its matching close
fn skip_balanced(bytes: &[u8], mut i: usize, open: u8, close: u8) -> usize {
    let mut depth = 0u32;
    while i < bytes.len() {
        let c = bytes[i];
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return i + 1;
            }
        } else if c == b'"' || c == b'\'' {
            i = skip_string(bytes, i);
        }
        i += 1;
    }
    bytes.len()
}

/// Index of the closing quote of the string starting at `i`
fn skip_string(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
        if bytes[j] == b'\\' {
            j += 2;
            continue;
        }
        if bytes[j] == quote {
            return j;
        }
        j += 1;
    }
    bytes.len().saturating_sub(1)
}

/// Remove `#{...}` interpolation from a name
pub fn strip_interpolation(text: &str) -> Cow<'_, str> {
    if !text.contains("#{") {
        return Cow::Borrowed(text);
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' && bytes.get(i + 1) == Some(&b'{') {
            i = skip_balanced(bytes, i + 1, b'{', b'}');
            continue;
        }
        let ch_len = text[i..].chars().next().map_or(1, char::len_utf8);
        out.push_str(&text[i..i + ch_len]);
        i += ch_len;
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(".a, .b"), vec![".a", ".b"]);
        assert_eq!(split_list(":is(.a, .b) .c"), vec![":is(.a, .b) .c"]);
        assert_eq!(split_list(".a,"), vec![".a", ""]);
        assert_eq!(split_list(""), vec![""]);
    }

    #[test]
    fn test_split_list_spans() {
        assert_eq!(
            split_list_spans(".mod-a,\n  .mod-b"),
            vec![(0, ".mod-a"), (10, ".mod-b")]
        );
        assert_eq!(split_list_spans(".a,"), vec![(0, ".a"), (3, "")]);
    }

    #[test]
    fn test_parse_compounds() {
        let compounds = parse_compounds(".global-header > li:hover .global-header-nav.mod-small");
        assert_eq!(compounds.len(), 3);
        assert_eq!(compounds[0].tokens[0].raw, "global-header");
        assert!(compounds[1].is_element_only());
        assert!(compounds[1].pseudo);
        assert_eq!(compounds[1].element.as_deref(), Some("li"));

        let last = &compounds[2];
        assert_eq!(last.tokens.len(), 2);
        let modifier = last.find_prefix(PrefixKind::Modifier).unwrap();
        assert_eq!(modifier.raw, "mod-small");
        assert_eq!(modifier.parent.as_deref(), Some("global-header-nav"));
    }

    #[test]
    fn test_ids_and_placeholders() {
        let compounds = parse_compounds("#main %u-clearfix");
        assert_eq!(compounds[0].ids, vec![CompactString::from("main")]);
        let placeholder = &compounds[1].tokens[0];
        assert!(placeholder.placeholder);
        assert_eq!(placeholder.prefix, PrefixKind::Utility);
    }

    #[test]
    fn test_interpolation_is_not_an_id() {
        let compounds = parse_compounds(".icon-#{$name}");
        assert_eq!(compounds.len(), 1);
        assert!(compounds[0].ids.is_empty());
        let token = &compounds[0].tokens[0];
        assert!(token.interpolated);
        assert_eq!(token.literal(), "icon-");
    }

    #[test]
    fn test_empty_class() {
        let compounds = parse_compounds(".");
        assert!(compounds[0].empty_class);
        assert!(!compounds[0].is_element_only());
    }

    #[test]
    fn test_token_checks() {
        let compounds = parse_compounds(".fooBar.foo_bar.a-b-c");
        let tokens = &compounds[0].tokens;
        assert!(tokens[0].has_uppercase());
        assert!(tokens[1].has_underscore());
        assert_eq!(tokens[2].segment_count(), 3);
    }
}
