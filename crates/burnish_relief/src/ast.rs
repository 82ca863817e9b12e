//! Stylesheet syntax tree node types.

use burnish_carton::{CompactString, LineIndex};
use serde::Serialize;

/// Node type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum NodeType {
    Rule = 0,
    Declaration = 1,
    AtRule = 2,
    Comment = 3,
}

/// Source position in the stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub struct Position {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Resolve a byte offset against a line index
    #[inline]
    pub fn at(index: &LineIndex<'_>, offset: usize) -> Self {
        let lc = index.line_col(offset);
        Self::new(offset as u32, lc.line, lc.column)
    }
}

/// Source location span [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Byte range covered by this location
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

/// Parsed stylesheet (one file)
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    /// Top-level rule nodes
    pub fn rules(&self) -> impl Iterator<Item = &RuleNode> {
        self.nodes.iter().filter_map(Node::as_rule)
    }
}

/// Any node that can appear in a stylesheet or a block
#[derive(Debug, Clone)]
pub enum Node {
    Rule(RuleNode),
    Declaration(DeclarationNode),
    AtRule(AtRuleNode),
    Comment(CommentNode),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Rule(_) => NodeType::Rule,
            Self::Declaration(_) => NodeType::Declaration,
            Self::AtRule(_) => NodeType::AtRule,
            Self::Comment(_) => NodeType::Comment,
        }
    }

    pub fn loc(&self) -> &SourceLocation {
        match self {
            Self::Rule(n) => &n.loc,
            Self::Declaration(n) => &n.loc,
            Self::AtRule(n) => &n.loc,
            Self::Comment(n) => &n.loc,
        }
    }

    /// Block owned by this node, if any
    pub fn block(&self) -> Option<&Block> {
        match self {
            Self::Rule(n) => Some(&n.block),
            Self::AtRule(n) => n.block.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_rule(&self) -> Option<&RuleNode> {
        match self {
            Self::Rule(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_declaration(&self) -> Option<&DeclarationNode> {
        match self {
            Self::Declaration(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_at_rule(&self) -> Option<&AtRuleNode> {
        match self {
            Self::AtRule(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_comment(&self) -> Option<&CommentNode> {
        match self {
            Self::Comment(n) => Some(n),
            _ => None,
        }
    }
}

/// A `{ ... }` block
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Position of `{`
    pub open: Position,
    /// Position of `}`
    pub close: Position,
    pub children: Vec<Node>,
}

impl Block {
    /// Declarations directly inside this block, in source order
    pub fn declarations(&self) -> impl Iterator<Item = &DeclarationNode> {
        self.children.iter().filter_map(Node::as_declaration)
    }

    /// Check whether the block contains nested rules or at-rule blocks
    pub fn has_nested_blocks(&self) -> bool {
        self.children.iter().any(|c| c.block().is_some())
    }
}

/// Style rule: `selector { ... }`
#[derive(Debug, Clone)]
pub struct RuleNode {
    /// Selector text with comments removed and whitespace runs collapsed
    pub selector: CompactString,
    /// Location of the selector text
    pub selector_loc: SourceLocation,
    pub block: Block,
    /// From the selector start to the closing brace (inclusive)
    pub loc: SourceLocation,
}

/// Declaration: `property: value` (including `$variable: value`)
#[derive(Debug, Clone)]
pub struct DeclarationNode {
    pub property: CompactString,
    pub value: CompactString,
    /// Raw declaration text without the trailing `;`
    pub raw: CompactString,
    /// Position of the `:` separating property and value
    pub colon: Position,
    /// Whether the declaration was terminated by `;`
    pub terminated: bool,
    pub loc: SourceLocation,
}

impl DeclarationNode {
    /// `$name: value` declarations define variables, not properties
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.property.starts_with('$')
    }

    /// Location of the property name
    pub fn property_loc(&self) -> SourceLocation {
        let start = self.loc.start;
        let len = self.property.len() as u32;
        SourceLocation::new(
            start,
            Position::new(start.offset + len, start.line, start.column + len),
        )
    }
}

/// At-rule: `@name params;` or `@name params { ... }`
#[derive(Debug, Clone)]
pub struct AtRuleNode {
    /// Name without the leading `@`
    pub name: CompactString,
    pub params: CompactString,
    pub block: Option<Block>,
    pub loc: SourceLocation,
}

impl AtRuleNode {
    /// `@media` blocks form the media query section of a component file
    #[inline]
    pub fn is_media(&self) -> bool {
        self.name.eq_ignore_ascii_case("media")
    }
}

/// Comment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommentKind {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

/// Comment that stands on its own between statements
#[derive(Debug, Clone)]
pub struct CommentNode {
    /// Comment text without delimiters
    pub text: CompactString,
    pub kind: CommentKind,
    pub loc: SourceLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at() {
        let index = LineIndex::new(".a {\n  color: red;\n}");
        let pos = Position::at(&index, 7);
        assert_eq!(pos, Position::new(7, 2, 3));
    }

    #[test]
    fn test_property_loc() {
        let decl = DeclarationNode {
            property: "color".into(),
            value: "red".into(),
            raw: "color: red".into(),
            colon: Position::new(12, 2, 8),
            terminated: true,
            loc: SourceLocation::new(Position::new(7, 2, 3), Position::new(17, 2, 13)),
        };
        let loc = decl.property_loc();
        assert_eq!(loc.end, Position::new(12, 2, 8));
        assert!(!decl.is_variable());
    }
}
