//! Component file construction.
//!
//! A [`ComponentFile`] is one parsed stylesheet with every rule selector
//! resolved through its nesting, classified, and placed in a section. It is
//! built once per file and read by every rule.

use burnish_carton::{format_compact, CompactString, FxHashMap, LineIndex};
use burnish_relief::{AtRuleNode, Block, Node, Position, RuleNode, SourceLocation, Stylesheet};

use crate::classify::{
    classify, Ancestor, ClassifiedSelector, ClassifyError, ClassifyInput, KnownComponents,
    SelectorKind,
};
use crate::config::RuleConfiguration;
use crate::selector::{split_list, split_list_spans};

/// File sections, in the order they must appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    /// Base and component descendant rules
    Base,
    Modifiers,
    State,
    MediaQueries,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Modifiers => "modifiers",
            Self::State => "state",
            Self::MediaQueries => "media queries",
        }
    }

    /// Section a classified rule belongs to
    pub fn of_kind(kind: SelectorKind) -> Option<Self> {
        match kind {
            SelectorKind::Base | SelectorKind::Component => Some(Self::Base),
            SelectorKind::Modifier => Some(Self::Modifiers),
            SelectorKind::State => Some(Self::State),
            SelectorKind::Utility | SelectorKind::JsHook => None,
        }
    }

    /// Section named by a marker comment such as `/* Modifiers */` or `// == State ==`
    pub fn from_marker(text: &str) -> Option<Self> {
        let letters: String = text
            .chars()
            .map(|c| if c.is_alphabetic() { c.to_ascii_lowercase() } else { ' ' })
            .collect();
        let words: Vec<&str> = letters.split_whitespace().collect();
        match words.as_slice() {
            ["base"] => Some(Self::Base),
            ["modifier"] | ["modifiers"] => Some(Self::Modifiers),
            ["state"] | ["states"] => Some(Self::State),
            ["media"] | ["media", "query"] | ["media", "queries"] => Some(Self::MediaQueries),
            _ => None,
        }
    }
}

/// One entry in a section sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    pub section: Section,
    pub loc: SourceLocation,
    /// Selector, `@media` prelude or marker text
    pub label: CompactString,
    /// Comment marker rather than a rule
    pub marker: bool,
}

/// Section sequence of one nesting level (the file's top level or one block)
#[derive(Debug, Clone, Default)]
pub struct SectionScope {
    pub items: Vec<SectionItem>,
}

/// A `{ ... }` block and what owns it
#[derive(Debug, Clone)]
pub struct BlockInfo<'a> {
    /// Selector or at-rule prelude
    pub label: CompactString,
    pub block: &'a Block,
    /// Number of braces enclosing the block's contents
    pub depth: u32,
    pub rule: Option<&'a RuleNode>,
}

/// Classification failure, kept with the location of the rule's selector
#[derive(Debug, Clone)]
pub struct ClassifyFailure {
    pub error: ClassifyError,
    pub loc: SourceLocation,
}

/// One file's classified selectors and structure
#[derive(Debug)]
pub struct ComponentFile<'a> {
    pub path: &'a str,
    pub source: &'a str,
    pub stylesheet: &'a Stylesheet,
    pub index: LineIndex<'a>,
    /// Element selectors are allowed
    pub is_base: bool,
    /// Classified selectors in file order (one per selector list part)
    pub selectors: Vec<ClassifiedSelector>,
    pub failures: Vec<ClassifyFailure>,
    /// Top-level scope first, then one per block in file order
    pub scopes: Vec<SectionScope>,
    pub blocks: Vec<BlockInfo<'a>>,
    /// Selector start offset to the index of the rule's first classified part
    by_rule: FxHashMap<u32, usize>,
}

impl<'a> ComponentFile<'a> {
    /// Resolve, classify and section every rule in a parsed stylesheet
    pub fn build(
        path: &'a str,
        source: &'a str,
        stylesheet: &'a Stylesheet,
        config: &RuleConfiguration,
    ) -> Self {
        let mut file = Self {
            path,
            source,
            stylesheet,
            index: LineIndex::new(source),
            is_base: config.is_base_file(path),
            selectors: Vec::new(),
            failures: Vec::new(),
            scopes: Vec::new(),
            blocks: Vec::new(),
            by_rule: FxHashMap::default(),
        };

        let mut builder = Builder::default();
        file.scopes.push(SectionScope::default());
        let top = builder.walk(&mut file, &stylesheet.nodes, 0);
        file.scopes[0] = top;

        tracing::trace!(
            file = path,
            selectors = file.selectors.len(),
            failures = file.failures.len(),
            components = builder.known.len(),
            "built component file"
        );
        file
    }

    /// Classification of a rule's first selector part
    pub fn classification(&self, rule: &RuleNode) -> Option<&ClassifiedSelector> {
        self.by_rule
            .get(&rule.selector_loc.start.offset)
            .and_then(|&i| self.selectors.get(i))
    }

    /// Top-level rule nodes
    pub fn top_level_rules(&self) -> impl Iterator<Item = &'a RuleNode> {
        self.stylesheet.rules()
    }
}

/// Enclosing rule during the walk
#[derive(Debug, Default)]
struct Frame {
    /// Every resolution of every selector list part
    parts: Vec<FramePart>,
}

#[derive(Debug)]
struct FramePart {
    text: CompactString,
    depth: u32,
    /// Enclosing rules this part was resolved through, itself last
    ancestors: Vec<Ancestor>,
}

/// A written selector part resolved against one enclosing part
#[derive(Debug)]
struct Resolution {
    text: CompactString,
    depth: u32,
    ancestors: Vec<Ancestor>,
}

#[derive(Debug, Default)]
struct Builder {
    known: KnownComponents,
    frames: Vec<Frame>,
}

impl Builder {
    /// Walk one nesting level and return its section scope
    fn walk<'a>(
        &mut self,
        file: &mut ComponentFile<'a>,
        nodes: &'a [Node],
        depth: u32,
    ) -> SectionScope {
        let mut scope = SectionScope::default();

        for node in nodes {
            match node {
                Node::Rule(rule) => {
                    let kind = self.rule(file, rule, depth);
                    if let Some(section) = kind.and_then(Section::of_kind) {
                        scope.items.push(SectionItem {
                            section,
                            loc: rule.selector_loc,
                            label: rule.selector.clone(),
                            marker: false,
                        });
                    }
                }
                Node::AtRule(at_rule) => {
                    if let Some(block) = &at_rule.block {
                        self.at_rule(file, at_rule, block, depth, &mut scope);
                    }
                }
                Node::Comment(comment) => {
                    if let Some(section) = Section::from_marker(&comment.text) {
                        scope.items.push(SectionItem {
                            section,
                            loc: comment.loc,
                            label: comment.text.clone(),
                            marker: true,
                        });
                    }
                }
                Node::Declaration(_) => {}
            }
        }

        scope
    }

    /// Classify a rule's selector parts, then walk its block.
    ///
    /// Returns the kind of the first part.
    fn rule<'a>(
        &mut self,
        file: &mut ComponentFile<'a>,
        rule: &'a RuleNode,
        depth: u32,
    ) -> Option<SelectorKind> {
        let properties: Vec<CompactString> = rule
            .block
            .declarations()
            .filter(|d| !d.is_variable())
            .map(|d| d.property.clone())
            .collect();

        let written = split_list(&rule.selector);
        let locs = part_locations(file, rule, written.len());

        let mut first_kind = None;
        let mut frame = Frame::default();
        for (part, (written, loc)) in written.iter().zip(&locs).enumerate() {
            for resolution in resolve_part(self.frames.last(), written) {
                let input = ClassifyInput {
                    selector: &resolution.text,
                    ancestors: &resolution.ancestors,
                    properties: &properties,
                    is_base_file: file.is_base,
                    depth: resolution.depth,
                    loc: *loc,
                };

                let (kind, base) = match classify(&input, &self.known) {
                    Ok(mut classified) => {
                        classified.written = (*written).into();
                        classified.part = part;
                        if classified.kind == SelectorKind::Component {
                            if let Some(base) = &classified.base {
                                self.known.insert(base.clone());
                            }
                        }
                        let outcome = (Some(classified.kind), classified.base.clone());
                        if part == 0 && frame.parts.is_empty() {
                            file.by_rule
                                .insert(rule.selector_loc.start.offset, file.selectors.len());
                        }
                        file.selectors.push(classified);
                        outcome
                    }
                    Err(error) => {
                        tracing::trace!(
                            selector = resolution.text.as_str(),
                            %error,
                            "classification failed"
                        );
                        // One failure per written part, however many parents it resolves against
                        let repeat = file
                            .failures
                            .iter()
                            .any(|f| f.loc == *loc && f.error.kind() == error.kind());
                        if !repeat {
                            file.failures.push(ClassifyFailure { error, loc: *loc });
                        }
                        (None, None)
                    }
                };

                if part == 0 && frame.parts.is_empty() {
                    first_kind = kind;
                }
                let mut ancestors = resolution.ancestors;
                ancestors.push(Ancestor {
                    selector: resolution.text.clone(),
                    kind,
                    base,
                    depth: resolution.depth,
                });
                frame.parts.push(FramePart {
                    text: resolution.text,
                    depth: resolution.depth,
                    ancestors,
                });
            }
        }

        self.frames.push(frame);
        file.blocks.push(BlockInfo {
            label: rule.selector.clone(),
            block: &rule.block,
            depth: depth + 1,
            rule: Some(rule),
        });
        let scope = self.walk(file, &rule.block.children, depth + 1);
        file.scopes.push(scope);
        self.frames.pop();

        first_kind
    }

    /// At-rule blocks are transparent for nesting; `@media` starts the media section
    fn at_rule<'a>(
        &mut self,
        file: &mut ComponentFile<'a>,
        at_rule: &'a AtRuleNode,
        block: &'a Block,
        depth: u32,
        scope: &mut SectionScope,
    ) {
        let label = if at_rule.params.is_empty() {
            format_compact!("@{}", at_rule.name)
        } else {
            format_compact!("@{} {}", at_rule.name, at_rule.params)
        };

        if at_rule.is_media() {
            scope.items.push(SectionItem {
                section: Section::MediaQueries,
                loc: at_rule.loc,
                label: label.clone(),
                marker: false,
            });
        }

        file.blocks.push(BlockInfo {
            label,
            block,
            depth: depth + 1,
            rule: None,
        });
        let inner = self.walk(file, &block.children, depth + 1);
        file.scopes.push(inner);
    }
}

/// Location of each selector list part as written in the source.
///
/// Falls back to the whole selector when the source text does not split
/// into the same number of parts (a comment containing a comma).
fn part_locations(file: &ComponentFile<'_>, rule: &RuleNode, count: usize) -> Vec<SourceLocation> {
    let base = rule.selector_loc.start.offset as usize;
    let spans = file
        .source
        .get(rule.selector_loc.range())
        .map(split_list_spans)
        .unwrap_or_default();

    if spans.len() != count {
        return vec![rule.selector_loc; count];
    }
    spans
        .into_iter()
        .map(|(offset, text)| {
            let start = base + offset;
            SourceLocation::new(
                Position::at(&file.index, start),
                Position::at(&file.index, start + text.len()),
            )
        })
        .collect()
}

/// Resolve one selector list part against every part of its enclosing rule.
///
/// `&` is replaced by the parent part and keeps the parent's depth;
/// anything else is a descendant one level deeper.
fn resolve_part(parent: Option<&Frame>, part: &str) -> Vec<Resolution> {
    let Some(parent) = parent else {
        return vec![Resolution {
            text: part.into(),
            depth: 0,
            ancestors: Vec::new(),
        }];
    };

    parent
        .parts
        .iter()
        .map(|p| {
            let (text, depth) = if part.contains('&') {
                (part.replace('&', &p.text).into(), p.depth)
            } else {
                (format_compact!("{} {}", p.text, part), p.depth + 1)
            };
            Resolution {
                text,
                depth,
                ancestors: p.ancestors.clone(),
            }
        })
        .collect()
}
