//! Usage scanning and usage excision.
//!
//! `find_usages` is the pure, read-only half: it classifies every occurrence
//! of a name as a declaration or an identifier reference. `delete_usage`
//! removes live references to a type whose declaration is already gone,
//! excising the smallest syntactically safe enclosing construct.

use super::names::qualified_name;
use super::AstEditor;
use crate::parser::{self, ParseError};
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// The occurrence names the declaration itself (or the subject of a
    /// reopening block).
    Declaration,
    /// Any other reference to the name.
    Identifier,
}

/// One occurrence of a name in a file. Lines are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub line: usize,
    pub kind: UsageKind,
}

/// Byte range slated for removal, with the rows it spanned in the original
/// text. Spans are applied back-to-front so earlier offsets stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ByteSpan {
    start: usize,
    end: usize,
    start_row: usize,
}

impl ByteSpan {
    fn of(node: Node) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            start_row: node.start_position().row,
        }
    }

    fn contains(&self, other: &ByteSpan) -> bool {
        *self != *other && self.start <= other.start && other.end <= self.end
    }
}

impl AstEditor {
    /// Finds all usages of `type_name` in `contents`.
    ///
    /// Pure and order-stable: repeated calls on identical input yield
    /// identical results, in level-order traversal order.
    pub fn find_usages(
        &mut self,
        contents: &str,
        type_name: &str,
    ) -> Result<Vec<Usage>, ParseError> {
        let tree = self.parser.parse(contents)?;
        let root = tree.root_node();
        let mut usages = Vec::new();

        for node in parser::level_order(root) {
            if self.is_name_position(node, root) {
                if qualified_name(self.profile, node, contents) == type_name {
                    usages.push(Usage {
                        line: node.start_position().row + 1,
                        kind: UsageKind::Declaration,
                    });
                }
            } else if self.profile.is_identifier(node.kind())
                && parser::node_text(node, contents) == type_name
            {
                usages.push(Usage {
                    line: node.start_position().row + 1,
                    kind: UsageKind::Identifier,
                });
            }
        }

        Ok(usages)
    }

    /// Removes references to `type_name`, escalating each occurrence to the
    /// smallest enclosing construct that can go with it. Returns the
    /// rewritten source, or `None` when the file holds no references.
    ///
    /// Assumes the declaration of `type_name` has already been deleted;
    /// declaration deletion must run first.
    pub fn delete_usage(
        &mut self,
        contents: &str,
        type_name: &str,
    ) -> Result<Option<String>, ParseError> {
        let tree = self.parser.parse(contents)?;
        let root = tree.root_node();

        let mut spans: Vec<ByteSpan> = Vec::new();
        for node in parser::level_order(root) {
            if !self.profile.is_identifier(node.kind())
                || parser::node_text(node, contents) != type_name
            {
                continue;
            }
            let target = self.removal_target(node).unwrap_or(node);
            spans.push(ByteSpan::of(target));
        }

        if spans.is_empty() {
            return Ok(None);
        }

        spans.sort_by(|a, b| b.start.cmp(&a.start).then(a.end.cmp(&b.end)));
        spans.dedup();
        // A span nested inside a wider span would splice stale offsets.
        let spans: Vec<ByteSpan> = spans
            .iter()
            .filter(|span| !spans.iter().any(|other| other.contains(span)))
            .copied()
            .collect();

        let mut result = contents.to_string();
        for span in &spans {
            result = remove_span(&result, span);
        }

        // Preserve the file's trailing-newline convention.
        if contents.ends_with('\n') && !result.ends_with('\n') {
            result.push('\n');
        } else if !contents.ends_with('\n') {
            while result.ends_with('\n') {
                result.pop();
            }
        }

        Ok(Some(result))
    }

    /// True when `node` is the name of an enclosing declaration: the first
    /// identifier child of a declaration node, or the reopened-type subject
    /// of a reopening block.
    fn is_name_position(&self, node: Node, root: Node) -> bool {
        if node == root {
            return false;
        }
        let Some(parent) = node.parent() else {
            return false;
        };
        if !self.profile.is_declaration(parent.kind()) {
            return false;
        }

        if let Some(name) = parser::first_child_of_kinds(parent, self.profile.identifier_kinds) {
            if name == node {
                return true;
            }
        }
        if let Some(kind) = self.profile.reopened_subject_kind {
            if let Some(subject) = parser::first_child_of_kind(parent, kind) {
                return subject == node;
            }
        }
        false
    }

    /// Decides what to remove for one identifier occurrence.
    ///
    /// Walks upward to the nearest allowed construct, stopping without a
    /// result at structural boundaries. Member accesses escalate to the call
    /// they belong to, and a call that is the sole statement of an `if` body
    /// escalates to the whole `if`. `None` means the caller falls back to
    /// removing the bare identifier.
    fn removal_target<'tree>(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            let kind = ancestor.kind();
            if self.profile.is_boundary(kind) {
                return None;
            }

            if self.profile.is_member_access(kind) {
                let call = if self.profile.is_call(kind) {
                    Some(ancestor)
                } else {
                    ancestor.parent().filter(|p| self.profile.is_call(p.kind()))
                };
                let Some(call) = call else {
                    return Some(ancestor);
                };
                if let Some(conditional) = self.sole_statement_conditional(call) {
                    return Some(conditional);
                }
                return Some(call);
            }

            if self.profile.is_excisable(kind) {
                return Some(ancestor);
            }

            current = ancestor.parent();
        }
        None
    }

    /// The enclosing `if` statement when `call` is the only statement in its
    /// body; removing the call alone would leave a vacuous conditional.
    fn sole_statement_conditional<'tree>(&self, call: Node<'tree>) -> Option<Node<'tree>> {
        let mut branch = call;
        let mut current = call.parent();
        while let Some(ancestor) = current {
            if self.profile.is_conditional(ancestor.kind()) {
                return self.branch_holds_only(branch, call).then_some(ancestor);
            }
            if !self.profile.is_block(ancestor.kind()) {
                return None;
            }
            branch = ancestor;
            current = ancestor.parent();
        }
        None
    }

    /// True when `branch` contains `stmt` as its only statement: every
    /// wrapper level on the way down has a single named, non-comment child.
    fn branch_holds_only(&self, branch: Node, stmt: Node) -> bool {
        let mut node = branch;
        loop {
            if node == stmt {
                return true;
            }
            let mut sole_child = None;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if self.profile.is_comment(child.kind()) {
                    continue;
                }
                if sole_child.replace(child).is_some() {
                    return false;
                }
            }
            match sole_child {
                Some(next) => node = next,
                None => return false,
            }
        }
    }
}

/// Splices one span out of `text` and tidies the line it collapsed onto: a
/// line left holding only indentation becomes empty, and a blank line
/// directly after another blank line is dropped.
fn remove_span(text: &str, span: &ByteSpan) -> String {
    let mut spliced = String::with_capacity(text.len());
    spliced.push_str(&text[..span.start]);
    spliced.push_str(&text[span.end..]);

    let row = span.start_row;
    let mut lines: Vec<&str> = spliced.split('\n').collect();
    let mut blanked = false;
    if let Some(line) = lines.get(row) {
        if !line.is_empty() && line.trim().is_empty() {
            blanked = true;
        }
    }

    if row < lines.len()
        && (blanked || lines[row].is_empty())
        && row > 0
        && lines[row - 1].trim().is_empty()
    {
        lines.remove(row);
    } else if blanked {
        lines[row] = "";
    }

    lines.join("\n")
}
