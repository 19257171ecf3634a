//! Per-language grammar tables.
//!
//! The excision engine itself is language-agnostic; everything it needs to
//! know about Swift, Kotlin or Java syntax lives in a [`GrammarProfile`]: the
//! tree-sitter node kinds that play each syntactic role. Profiles are
//! immutable `'static` tables selected by [`Language`] at construction time.

use std::path::Path;

/// Source language handled by the excision engine. Closed set; anything else
/// is skipped at file-discovery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Swift,
    Kotlin,
    Java,
}

impl Language {
    /// Determine the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "swift" => Some(Language::Swift),
            "kt" | "kts" => Some(Language::Kotlin),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Swift => tree_sitter_swift::language(),
            Language::Kotlin => tree_sitter_kotlin::language(),
            Language::Java => tree_sitter_java::language(),
        }
    }

    pub fn profile(&self) -> &'static GrammarProfile {
        match self {
            Language::Swift => &SWIFT,
            Language::Kotlin => &KOTLIN,
            Language::Java => &JAVA,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Java => "java",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Target platform of the project being cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Languages whose source files this platform contributes.
    pub fn languages(&self) -> &'static [Language] {
        match self {
            Platform::Ios => &[Language::Swift],
            Platform::Android => &[Language::Kotlin, Language::Java],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Whether projects on this platform track files in a build-system
    /// manifest that must be kept in sync when files are deleted.
    pub fn has_project_manifest(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Node-kind vocabulary for one language.
///
/// `declaration_kinds`, `identifier_kinds` and the comment/import kinds drive
/// type deletion and usage scanning. The remaining sets drive usage excision:
/// the allowed enclosing constructs, the escalation kinds (member access,
/// call, conditional) and the structural boundaries the upward walk must
/// never cross.
#[derive(Debug)]
pub struct GrammarProfile {
    /// Named type definitions (class/interface/protocol-like constructs).
    pub declaration_kinds: &'static [&'static str],
    /// Name references, both declaration names and usages.
    pub identifier_kinds: &'static [&'static str],
    pub comment_kinds: &'static [&'static str],
    pub import_kinds: &'static [&'static str],

    /// Keyword child marking a reopening block (`extension Foo { ... }`).
    pub reopening_marker: Option<&'static str>,
    /// Node kind naming the reopened type inside such a block.
    pub reopened_subject_kind: Option<&'static str>,

    pub variable_kinds: &'static [&'static str],
    pub parameter_kinds: &'static [&'static str],
    pub type_annotation_kinds: &'static [&'static str],
    pub argument_kinds: &'static [&'static str],
    pub member_access_kinds: &'static [&'static str],
    pub call_kinds: &'static [&'static str],
    pub conditional_kinds: &'static [&'static str],
    /// Body blocks and statement wrappers sitting between a call and its
    /// enclosing conditional.
    pub block_kinds: &'static [&'static str],
    /// Structural containers that stop the usage-excision walk.
    pub boundary_kinds: &'static [&'static str],
}

impl GrammarProfile {
    pub fn is_declaration(&self, kind: &str) -> bool {
        self.declaration_kinds.contains(&kind)
    }

    pub fn is_identifier(&self, kind: &str) -> bool {
        self.identifier_kinds.contains(&kind)
    }

    pub fn is_comment(&self, kind: &str) -> bool {
        self.comment_kinds.contains(&kind)
    }

    pub fn is_comment_or_import(&self, kind: &str) -> bool {
        self.comment_kinds.contains(&kind) || self.import_kinds.contains(&kind)
    }

    pub fn is_member_access(&self, kind: &str) -> bool {
        self.member_access_kinds.contains(&kind)
    }

    pub fn is_call(&self, kind: &str) -> bool {
        self.call_kinds.contains(&kind)
    }

    pub fn is_conditional(&self, kind: &str) -> bool {
        self.conditional_kinds.contains(&kind)
    }

    pub fn is_block(&self, kind: &str) -> bool {
        self.block_kinds.contains(&kind)
    }

    pub fn is_boundary(&self, kind: &str) -> bool {
        self.boundary_kinds.contains(&kind)
    }

    /// Constructs that may be removed wholesale when they reference a deleted
    /// type: variable declarations, parameters, type annotations, call
    /// arguments and imports. Member accesses are handled separately because
    /// they escalate.
    pub fn is_excisable(&self, kind: &str) -> bool {
        self.variable_kinds.contains(&kind)
            || self.parameter_kinds.contains(&kind)
            || self.type_annotation_kinds.contains(&kind)
            || self.argument_kinds.contains(&kind)
            || self.import_kinds.contains(&kind)
    }
}

static SWIFT: GrammarProfile = GrammarProfile {
    // struct/enum/actor declarations all surface as class_declaration.
    declaration_kinds: &["class_declaration", "protocol_declaration"],
    identifier_kinds: &["simple_identifier", "type_identifier", "qualified_name", "identifier"],
    comment_kinds: &["comment", "multiline_comment"],
    import_kinds: &["import_declaration"],
    reopening_marker: Some("extension"),
    reopened_subject_kind: Some("user_type"),
    variable_kinds: &["property_declaration"],
    parameter_kinds: &["parameter"],
    type_annotation_kinds: &["type_annotation"],
    argument_kinds: &["value_argument"],
    member_access_kinds: &["navigation_expression"],
    call_kinds: &["call_expression"],
    conditional_kinds: &["if_statement"],
    block_kinds: &["statements"],
    boundary_kinds: &["class_declaration", "protocol_declaration", "function_declaration"],
};

static KOTLIN: GrammarProfile = GrammarProfile {
    declaration_kinds: &["class_declaration", "object_declaration"],
    identifier_kinds: &["simple_identifier", "type_identifier", "qualified_name", "identifier"],
    comment_kinds: &["comment", "line_comment", "multiline_comment"],
    import_kinds: &["import_list", "import_header", "package_header"],
    reopening_marker: None,
    reopened_subject_kind: None,
    variable_kinds: &["property_declaration"],
    parameter_kinds: &["parameter", "class_parameter"],
    type_annotation_kinds: &[],
    argument_kinds: &["value_argument"],
    member_access_kinds: &["navigation_expression"],
    call_kinds: &["call_expression"],
    conditional_kinds: &["if_expression"],
    block_kinds: &["control_structure_body", "statements", "block"],
    boundary_kinds: &["class_declaration", "object_declaration", "function_declaration"],
};

static JAVA: GrammarProfile = GrammarProfile {
    declaration_kinds: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
    ],
    identifier_kinds: &["identifier", "type_identifier", "scoped_identifier"],
    comment_kinds: &["line_comment", "block_comment"],
    import_kinds: &["import_declaration", "package_declaration"],
    reopening_marker: None,
    reopened_subject_kind: None,
    variable_kinds: &["local_variable_declaration", "field_declaration"],
    parameter_kinds: &["formal_parameter"],
    type_annotation_kinds: &[],
    // Java has no per-argument node; bare identifiers in argument lists fall
    // back to identifier-only removal.
    argument_kinds: &[],
    member_access_kinds: &["field_access", "method_invocation"],
    call_kinds: &["method_invocation"],
    conditional_kinds: &["if_statement"],
    block_kinds: &["block", "expression_statement"],
    boundary_kinds: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "method_declaration",
        "constructor_declaration",
    ],
};
