//! Structural SCSS parser.
//!
//! Builds a [`Stylesheet`] from the token stream. Statements are collected
//! until a `;`, `{` or `}` decides what they are:
//!
//! - text before `{` is a rule selector, or an at-rule prelude when it starts with `@`
//! - text before `;` or `}` is a declaration, or a block-less at-rule
//! - comments that start a statement become [`CommentNode`]s; comments inside
//!   a statement are dropped from its text

use std::ops::Range;

use burnish_carton::{CompactString, LineIndex};
use burnish_relief::{
    AtRuleNode, Block, CommentKind, CommentNode, DeclarationNode, Node, ParseError, Position,
    RuleNode, SourceLocation, Stylesheet,
};

use crate::tokenizer::{Token, TokenKind, Tokenizer};

/// SCSS parser for a single file
pub struct Parser<'a> {
    source: &'a str,
    index: LineIndex<'a>,
    tokens: Vec<Token>,
    cursor: usize,
}

/// Statement text collected so far
#[derive(Debug, Default)]
struct Statement {
    /// Offset of the first non-whitespace character
    start: Option<usize>,
    /// Offset just past the last non-whitespace character
    end: usize,
    colon: Option<usize>,
    comments: Vec<Range<usize>>,
}

impl Statement {
    fn push_text(&mut self, source: &str, token: Token) {
        let text = &source[token.start..token.end];
        let trimmed = text.trim_start();
        if trimmed.trim_end().is_empty() {
            return;
        }
        if self.start.is_none() {
            self.start = Some(token.start + (text.len() - trimmed.len()));
        }
        self.end = token.start + text.trim_end().len();
        if self.colon.is_none() {
            self.colon = token.colon;
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            index: LineIndex::new(source),
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    /// Parse the whole source
    pub fn parse(mut self) -> Result<Stylesheet, ParseError> {
        let tokens = Tokenizer::new(&self.index).tokenize()?;
        self.tokens = tokens;
        let (nodes, _) = self.parse_nodes(None)?;
        Ok(Stylesheet { nodes })
    }

    /// Parse nodes until the `}` matching `open`, or end of input at top level.
    /// Returns the nodes and the offset of the closing brace.
    fn parse_nodes(&mut self, open: Option<usize>) -> Result<(Vec<Node>, usize), ParseError> {
        let mut nodes = Vec::new();
        let mut stmt = Statement::default();

        while let Some(token) = self.tokens.get(self.cursor).copied() {
            self.cursor += 1;
            match token.kind {
                TokenKind::Text => stmt.push_text(self.source, token),
                TokenKind::BlockComment | TokenKind::LineComment => {
                    if stmt.start.is_some() {
                        stmt.comments.push(token.start..token.end);
                    } else {
                        nodes.push(Node::Comment(self.comment(token)));
                    }
                }
                TokenKind::Semicolon => {
                    if let Some(node) = self.statement(std::mem::take(&mut stmt), true)? {
                        nodes.push(node);
                    }
                }
                TokenKind::OpenBrace => {
                    let node = self.block_node(std::mem::take(&mut stmt), token.start)?;
                    nodes.push(node);
                }
                TokenKind::CloseBrace => {
                    if open.is_none() {
                        return Err(ParseError::UnexpectedCloseBrace {
                            at: self.position(token.start),
                        });
                    }
                    if let Some(node) = self.statement(std::mem::take(&mut stmt), false)? {
                        nodes.push(node);
                    }
                    return Ok((nodes, token.start));
                }
            }
        }

        if let Some(open) = open {
            return Err(ParseError::UnclosedBlock {
                at: self.position(open),
            });
        }
        if let Some(node) = self.statement(stmt, false)? {
            nodes.push(node);
        }
        Ok((nodes, self.source.len()))
    }

    /// Turn a statement ended by `;`, `}` or end of input into a node
    fn statement(&self, stmt: Statement, terminated: bool) -> Result<Option<Node>, ParseError> {
        let Some(start) = stmt.start else {
            return Ok(None);
        };
        let end = stmt.end;
        let raw = &self.source[start..end];
        let loc = self.loc(start, end);

        if raw.starts_with('@') {
            let (name, params) = split_at_rule(&self.clean(&stmt, start, end));
            return Ok(Some(Node::AtRule(AtRuleNode {
                name,
                params,
                block: None,
                loc,
            })));
        }

        let property = stmt
            .colon
            .map(|colon| collapse_whitespace(&self.clean(&stmt, start, colon)))
            .filter(|property| !property.is_empty());
        let (Some(colon), Some(property)) = (stmt.colon, property) else {
            return Err(ParseError::ExpectedDeclaration {
                text: collapse_whitespace(&self.clean(&stmt, start, end)).into(),
                at: self.position(start),
            });
        };

        Ok(Some(Node::Declaration(DeclarationNode {
            property,
            value: collapse_whitespace(&self.clean(&stmt, colon + 1, end)),
            raw: raw.into(),
            colon: self.position(colon),
            terminated,
            loc,
        })))
    }

    /// Parse the block opened at `open` and attach it to the statement before it
    fn block_node(&mut self, stmt: Statement, open: usize) -> Result<Node, ParseError> {
        let (children, close) = self.parse_nodes(Some(open))?;
        let block = Block {
            open: self.position(open),
            close: self.position(close),
            children,
        };

        let start = stmt.start.unwrap_or(open);
        let prelude_end = if stmt.start.is_some() { stmt.end } else { open };
        let prelude = self.clean(&stmt, start, prelude_end);
        let loc = self.loc(start, close + 1);

        if prelude.starts_with('@') {
            let (name, params) = split_at_rule(&prelude);
            return Ok(Node::AtRule(AtRuleNode {
                name,
                params,
                block: Some(block),
                loc,
            }));
        }

        Ok(Node::Rule(RuleNode {
            selector: collapse_whitespace(&prelude),
            selector_loc: self.loc(start, prelude_end),
            block,
            loc,
        }))
    }

    fn comment(&self, token: Token) -> CommentNode {
        let (kind, text) = match token.kind {
            TokenKind::LineComment => (CommentKind::Line, &self.source[token.start + 2..token.end]),
            _ => (
                CommentKind::Block,
                &self.source[token.start + 2..token.end - 2],
            ),
        };
        CommentNode {
            text: text.trim().into(),
            kind,
            loc: self.loc(token.start, token.end),
        }
    }

    /// Source text of `from..to` with the statement's comments blanked out
    fn clean(&self, stmt: &Statement, from: usize, to: usize) -> String {
        let mut out = String::with_capacity(to.saturating_sub(from));
        let mut cursor = from;
        for comment in &stmt.comments {
            if comment.start >= to {
                break;
            }
            if comment.start < cursor {
                continue;
            }
            out.push_str(&self.source[cursor..comment.start]);
            out.push(' ');
            cursor = comment.end;
        }
        if cursor < to {
            out.push_str(&self.source[cursor..to]);
        }
        out
    }

    #[inline]
    fn position(&self, offset: usize) -> Position {
        Position::at(&self.index, offset)
    }

    #[inline]
    fn loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(self.position(start), self.position(end))
    }
}

/// Split `@name params` into its name (without `@`) and parameters
fn split_at_rule(prelude: &str) -> (CompactString, CompactString) {
    let body = prelude.trim().trim_start_matches('@');
    let name_len = body
        .bytes()
        .position(|b| !burnish_carton::is_name_char(b))
        .unwrap_or(body.len());
    (
        CompactString::from(&body[..name_len]),
        collapse_whitespace(&body[name_len..]),
    )
}

fn collapse_whitespace(text: &str) -> CompactString {
    let mut out = CompactString::default();
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
