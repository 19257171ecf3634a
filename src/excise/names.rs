//! Fully-qualified name resolution.

use crate::grammar::GrammarProfile;
use crate::parser::{first_child_of_kind, first_child_of_kinds, node_text};
use tree_sitter::Node;

/// Builds the dotted fully-qualified name for a node, e.g. `Outer.Inner`.
///
/// Starts from the node's own text and walks the ancestor chain, prepending
/// the name of each enclosing declaration. A declaration names itself through
/// its first identifier child; a reopening block (`extension Outer { ... }`)
/// names itself through its reopened-type subject, which may itself be a
/// dotted name. File-scope declarations resolve to their bare name.
pub fn qualified_name(profile: &GrammarProfile, node: Node, source: &str) -> String {
    let mut name = node_text(node, source).to_string();
    let mut current = node;
    let mut parent = parent_declaration(profile, node);

    while let Some(decl) = parent {
        let ident = first_child_of_kinds(decl, profile.identifier_kinds);
        let subject = profile
            .reopened_subject_kind
            .and_then(|kind| first_child_of_kind(decl, kind));

        if let Some(ident) = ident.filter(|n| *n != current) {
            name = format!("{}.{}", node_text(ident, source), name);
            current = ident;
        } else if let Some(subject) = subject.filter(|n| *n != current) {
            name = format!("{}.{}", node_text(subject, source), name);
            current = subject;
        }

        parent = parent_declaration(profile, decl);
    }

    name
}

/// Nearest ancestor that is a declaration-kind node, if any.
fn parent_declaration<'tree>(profile: &GrammarProfile, node: Node<'tree>) -> Option<Node<'tree>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if profile.is_declaration(ancestor.kind()) {
            return Some(ancestor);
        }
        current = ancestor.parent();
    }
    None
}
