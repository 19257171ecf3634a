//! Thin adapter around tree-sitter.
//!
//! Parsing stays a capability this crate consumes, not something it
//! reimplements: source text goes in, a concrete syntax tree with byte spans,
//! row/column positions and parent/child/sibling navigation comes out. Nodes
//! borrow from the tree that produced them and never outlive the source
//! buffer they index into.

use crate::grammar::Language;
use std::collections::VecDeque;
use thiserror::Error;
use tree_sitter::{Node, Parser as TsParser, Tree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load {language} grammar: {source}")]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },
    #[error("failed to parse {language} source")]
    Parse { language: &'static str },
}

/// Language-bound parser producing syntax trees for the excision engine.
pub struct SourceParser {
    parser: TsParser,
    language: Language,
}

impl SourceParser {
    pub fn new(language: Language) -> Result<Self, ParseError> {
        let mut parser = TsParser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|source| ParseError::Grammar { language: language.display_name(), source })?;
        Ok(Self { parser, language })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn parse(&mut self, contents: &str) -> Result<Tree, ParseError> {
        self.parser
            .parse(contents, None)
            .ok_or(ParseError::Parse { language: self.language.display_name() })
    }
}

/// Extract the text a node spans.
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Level-order traversal over every node in the tree, tokens included.
pub fn level_order(root: Node) -> LevelOrder {
    LevelOrder { queue: VecDeque::from([root]), named_only: false }
}

/// Level-order traversal over named nodes only.
pub fn named_level_order(root: Node) -> LevelOrder {
    LevelOrder { queue: VecDeque::from([root]), named_only: true }
}

pub struct LevelOrder<'tree> {
    queue: VecDeque<Node<'tree>>,
    named_only: bool,
}

impl<'tree> Iterator for LevelOrder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if self.named_only {
            for i in 0..node.named_child_count() {
                if let Some(child) = node.named_child(i) {
                    self.queue.push_back(child);
                }
            }
        } else {
            for i in 0..node.child_count() {
                if let Some(child) = node.child(i) {
                    self.queue.push_back(child);
                }
            }
        }
        Some(node)
    }
}

/// First immediate child whose kind is in `kinds`, tokens included.
pub fn first_child_of_kinds<'tree>(node: Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| kinds.contains(&child.kind()));
    found
}

/// First immediate child of exactly `kind`.
pub fn first_child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}
