//! reaper - cross-file dead code excision for Swift, Kotlin and Java
//!
//! Given confirmed-dead type names from a dead-code analysis export, this
//! library locates every declaration and usage of each type across a source
//! tree and removes them while keeping the surrounding code syntactically
//! valid.
//!
//! # Architecture
//!
//! The excision pipeline consists of:
//! 1. **File Discovery** - find the platform's source files
//! 2. **Grammar Profiles** - per-language node-kind vocabularies
//! 3. **Type Excision** - delete declarations (and reopening blocks)
//! 4. **Usage Scanning** - classify remaining occurrences of a name
//! 5. **Usage Excision** - remove live references to deleted types
//! 6. **Orchestration** - drive both phases across the whole project
//!
//! Surgery is best-effort and purely syntactic: no semantic analysis is
//! performed and the output is not guaranteed to compile.

pub mod config;
pub mod discovery;
pub mod excise;
pub mod grammar;
pub mod parser;
pub mod project;

pub use config::Config;
pub use discovery::{FileFinder, SourceFile};
pub use excise::{AstEditor, TypeDeletion, Usage, UsageKind};
pub use grammar::{GrammarProfile, Language, Platform};
pub use project::{CodeDeleter, DeadCodeExport, DeadTypeRecord, FileReference, ProjectManifest};
