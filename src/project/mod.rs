//! Project-level orchestration: record parsing, path resolution, and the
//! two-phase deletion drive across a whole source tree.

mod deleter;
mod manifest;
mod records;
mod type_name;

pub use deleter::CodeDeleter;
pub use manifest::{FileReference, ProjectManifest};
pub use records::{DeadCodeExport, DeadTypeRecord};
pub use type_name::parse_type_name;
