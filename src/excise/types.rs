//! Type excision: removing a declaration (or reopening block) from a file.

use super::names::qualified_name;
use super::AstEditor;
use crate::parser::{self, ParseError};
use tree_sitter::Node;

/// Outcome of a type-deletion pass over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeletion {
    /// The type was not declared in this file; the pass is a no-op.
    Unchanged,
    /// The declaration was removed and the rest of the file remains.
    Modified(String),
    /// Only comments and imports remain; the file itself should be deleted.
    DeleteFile,
}

/// Inclusive range of rows slated for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowRange {
    start: usize,
    end: usize,
}

impl AstEditor {
    /// Removes the declaration of `type_name` from `contents`.
    ///
    /// Matches declarations by fully-qualified name, so `Outer.Inner` removes
    /// only the nested type. A reopening block whose subject resolves to the
    /// target is removed as a whole; an immediately preceding comment is
    /// treated as attached documentation and removed with its declaration.
    pub fn delete_type(
        &mut self,
        contents: &str,
        type_name: &str,
    ) -> Result<TypeDeletion, ParseError> {
        let tree = self.parser.parse(contents)?;
        let mut ranges: Vec<RowRange> = Vec::new();

        for node in parser::named_level_order(tree.root_node()) {
            if self.profile.is_declaration(node.kind()) {
                let name_node = parser::first_child_of_kinds(node, self.profile.identifier_kinds);
                if let Some(name_node) = name_node {
                    if qualified_name(self.profile, name_node, contents) == type_name {
                        mark_node(self, node, &mut ranges);
                        continue;
                    }
                }
            }

            if let Some(subject) = self.reopened_subject(node) {
                if qualified_name(self.profile, subject, contents) == type_name {
                    mark_node(self, node, &mut ranges);
                }
            }
        }

        if ranges.is_empty() {
            return Ok(TypeDeletion::Unchanged);
        }

        let modified = remove_rows(contents, &ranges);
        let new_tree = self.parser.parse(&modified)?;
        if self.only_comments_and_imports(new_tree.root_node()) {
            return Ok(TypeDeletion::DeleteFile);
        }
        Ok(TypeDeletion::Modified(modified))
    }

    /// The reopened-type subject of `node`, when `node` is a reopening block
    /// such as a Swift `extension`.
    fn reopened_subject<'tree>(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        let marker = self.profile.reopening_marker?;
        let subject_kind = self.profile.reopened_subject_kind?;
        if !self.profile.is_declaration(node.kind()) {
            return None;
        }
        parser::first_child_of_kind(node, marker)?;
        parser::first_child_of_kind(node, subject_kind)
    }

    /// True when every top-level node is comment- or import-kind, i.e. the
    /// file holds nothing but header boilerplate.
    fn only_comments_and_imports(&self, root: Node) -> bool {
        let mut cursor = root.walk();
        let all_boilerplate = root.named_children(&mut cursor)
            .all(|child| self.profile.is_comment_or_import(child.kind()));
        all_boilerplate
    }
}

/// Marks the node's rows, plus an immediately preceding comment sibling.
fn mark_node(editor: &AstEditor, node: Node, ranges: &mut Vec<RowRange>) {
    ranges.push(RowRange {
        start: node.start_position().row,
        end: node.end_position().row,
    });

    if let Some(prev) = node.prev_named_sibling() {
        if editor.profile.is_comment(prev.kind()) {
            ranges.push(RowRange {
                start: prev.start_position().row,
                end: prev.end_position().row,
            });
        }
    }
}

/// Removes the marked rows in one pass. A blank row immediately following a
/// removed range is removed with it, so the deletion does not leave a double
/// gap behind.
fn remove_rows(contents: &str, ranges: &[RowRange]) -> String {
    let lines: Vec<&str> = contents.split('\n').collect();
    let mut removed = vec![false; lines.len()];

    for range in ranges {
        let end = range.end.min(lines.len() - 1);
        for row in range.start..=end {
            removed[row] = true;
        }

        let next = end + 1;
        if next < lines.len() && !removed[next] && lines[next].trim().is_empty() {
            removed[next] = true;
        }
    }

    let kept: Vec<&str> = lines
        .iter()
        .zip(&removed)
        .filter(|(_, removed)| !**removed)
        .map(|(line, _)| *line)
        .collect();
    kept.join("\n")
}
