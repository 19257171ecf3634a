use miette::Result;
use std::path::{Path, PathBuf};

/// A file reference tracked by a build-system project manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Path as recorded in the manifest, relative to the project root.
    pub path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Build-system manifest that tracks which files belong to a target, such
/// as an Xcode project on iOS.
///
/// The manifest is owned by the embedding tool; this crate only removes
/// references for files it deletes and asks for the result to be persisted.
/// Manifest updates are best-effort: a failed update is logged and the file
/// deletion stands. There is no rollback, so a crash between the file
/// deletion and the persist can leave a stale reference behind.
pub trait ProjectManifest {
    /// Every file reference currently tracked by the manifest.
    fn file_references(&self) -> Vec<FileReference>;

    /// Remove the reference for `path` (relative to the project root).
    fn remove_reference(&mut self, path: &Path) -> Result<()>;

    /// Write the modified manifest back to disk.
    fn persist(&mut self) -> Result<()>;
}
