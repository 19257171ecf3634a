use crate::config::Config;
use crate::discovery::{FileFinder, SourceFile};
use crate::excise::{AstEditor, TypeDeletion, UsageKind};
use crate::grammar::{Language, Platform};
use crate::project::manifest::ProjectManifest;
use crate::project::records::DeadTypeRecord;
use crate::project::type_name::parse_type_name;
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Drives the two-phase excision, declarations then usages, for every
/// confirmed-dead type across a project tree.
///
/// Each type runs to completion independently: a failing file or type is
/// logged and skipped, never fatal to the rest of the run. Declaration
/// deletion always finishes before usage deletion starts, because usage
/// deletion treats every remaining occurrence of the name as a removable
/// reference.
pub struct CodeDeleter<'a> {
    project_root: PathBuf,
    platform: Platform,
    config: &'a Config,
    manifest: Option<Box<dyn ProjectManifest>>,
}

impl<'a> CodeDeleter<'a> {
    pub fn new(project_root: impl Into<PathBuf>, platform: Platform, config: &'a Config) -> Self {
        let project_root = project_root.into();
        debug!("Initialized deleter with project root: {}", project_root.display());
        Self { project_root, platform, config, manifest: None }
    }

    /// Attach the platform's project manifest, kept in sync when whole files
    /// are deleted.
    pub fn with_manifest(mut self, manifest: Box<dyn ProjectManifest>) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Entry point: processes every record, isolating per-type failures.
    pub fn delete_types(&mut self, records: &[DeadTypeRecord], skip_usage_deletion: bool) {
        for record in records {
            let type_name = parse_type_name(&record.class_name, self.platform);
            info!("Deleting {}", type_name);
            if let Err(e) = self.delete_one_type(record, &type_name, skip_usage_deletion) {
                error!("Failed to delete {}: {}", type_name, e);
            }
        }
    }

    fn delete_one_type(
        &mut self,
        record: &DeadTypeRecord,
        type_name: &str,
        skip_usage_deletion: bool,
    ) -> Result<()> {
        let candidates = self.locate(record, type_name);
        if candidates.is_empty() {
            warn!("No files found declaring {}", type_name);
            return Ok(());
        }

        for path in &candidates {
            if let Err(e) = self.delete_declaration(path, type_name) {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }

        if skip_usage_deletion {
            debug!("Skipping usage deletion for {}", type_name);
            return Ok(());
        }
        self.delete_usages(type_name)
    }

    /// Files expected to declare the type: the record's candidate paths when
    /// it carries any, otherwise a whole-project declaration scan.
    fn locate(&self, record: &DeadTypeRecord, type_name: &str) -> Vec<PathBuf> {
        if let Some(paths) = record.paths.as_ref().filter(|p| !p.is_empty()) {
            let mut resolved = Vec::new();
            for raw in paths {
                let trimmed = strip_line_suffix(raw);
                match self.resolve_path(trimmed) {
                    Some(path) => resolved.push(path),
                    None => {
                        warn!("Could not resolve {} under {}", trimmed, self.project_root.display())
                    }
                }
            }
            return resolved;
        }

        self.scan_for_declarations(type_name)
    }

    /// Resolve a project-relative path, falling back to a recursive search
    /// by file name when the recorded location has gone stale.
    fn resolve_path(&self, relative: &str) -> Option<PathBuf> {
        let relative = relative.trim_start_matches('/');
        let direct = self.project_root.join(relative);
        if direct.exists() {
            return Some(direct);
        }

        let file_name = Path::new(relative).file_name()?.to_owned();
        let matches: Vec<PathBuf> = self
            .source_files()
            .into_iter()
            .map(|f| f.path)
            .filter(|p| p.file_name() == Some(file_name.as_os_str()))
            .collect();

        match matches.len() {
            0 => None,
            1 => matches.into_iter().next(),
            n => {
                warn!("{} files match {}, using the first", n, relative);
                matches.into_iter().next()
            }
        }
    }

    /// Whole-project scan for files declaring the type. Read-only, so each
    /// file scans in parallel.
    fn scan_for_declarations(&self, type_name: &str) -> Vec<PathBuf> {
        let files = self.source_files();
        let mut matches: Vec<PathBuf> = files
            .par_iter()
            .filter_map(|file| {
                let usages = scan_file(file, type_name)?;
                usages
                    .iter()
                    .any(|u| u.kind == UsageKind::Declaration)
                    .then(|| file.path.clone())
            })
            .collect();
        matches.sort();
        matches
    }

    fn delete_declaration(&mut self, path: &Path, type_name: &str) -> Result<()> {
        let Some(language) = Language::from_path(path) else {
            warn!("Unsupported file type: {}", path.display());
            return Ok(());
        };

        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let mut editor = AstEditor::new(language).into_diagnostic()?;

        match editor.delete_type(&contents, type_name).into_diagnostic()? {
            TypeDeletion::DeleteFile => {
                std::fs::remove_file(path).into_diagnostic()?;
                info!("Deleted {} and removed {}", type_name, path.display());
                self.remove_manifest_reference(path);
            }
            TypeDeletion::Modified(new_contents) => {
                std::fs::write(path, new_contents).into_diagnostic()?;
                info!("Deleted {} from {}", type_name, path.display());
            }
            TypeDeletion::Unchanged => {
                warn!("No declaration of {} found in {}", type_name, path.display());
            }
        }
        Ok(())
    }

    fn remove_manifest_reference(&mut self, path: &Path) {
        let Some(manifest) = self.manifest.as_mut() else {
            return;
        };
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        if let Err(e) = manifest.remove_reference(relative) {
            warn!("Failed to remove manifest reference for {}: {}", relative.display(), e);
            return;
        }
        if let Err(e) = manifest.persist() {
            warn!("Failed to persist project manifest: {}", e);
        }
    }

    /// Second phase: remove remaining references to a now-deleted type
    /// everywhere in the project. The scan is parallel and read-only; the
    /// writes that follow run sequentially.
    fn delete_usages(&self, type_name: &str) -> Result<()> {
        let files = self.source_files();
        let with_usages: Vec<&SourceFile> = files
            .par_iter()
            .filter(|file| match scan_file(file, type_name) {
                Some(usages) => usages.iter().any(|u| u.kind == UsageKind::Identifier),
                None => false,
            })
            .collect();

        debug!("{} files still reference {}", with_usages.len(), type_name);

        for file in with_usages {
            if let Err(e) = self.delete_usages_in_file(file, type_name) {
                warn!("Skipping {}: {}", file.path.display(), e);
            }
        }
        Ok(())
    }

    fn delete_usages_in_file(&self, file: &SourceFile, type_name: &str) -> Result<()> {
        let contents = file.read_contents()?;
        let mut editor = AstEditor::new(file.language).into_diagnostic()?;

        if let Some(new_contents) = editor.delete_usage(&contents, type_name).into_diagnostic()? {
            if new_contents != contents {
                std::fs::write(&file.path, new_contents).into_diagnostic()?;
                info!("Removed usages of {} from {}", type_name, file.path.display());
            }
        }
        Ok(())
    }

    fn source_files(&self) -> Vec<SourceFile> {
        FileFinder::new(self.config).find_source_files(&self.project_root, self.platform)
    }
}

/// Scan one file for usages, logging and swallowing per-file failures.
fn scan_file(file: &SourceFile, type_name: &str) -> Option<Vec<crate::excise::Usage>> {
    let contents = match std::fs::read_to_string(&file.path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read {}: {}", file.path.display(), e);
            return None;
        }
    };
    let mut editor = match AstEditor::new(file.language) {
        Ok(editor) => editor,
        Err(e) => {
            warn!("Failed to initialize {} parser: {}", file.language, e);
            return None;
        }
    };
    match editor.find_usages(&contents, type_name) {
        Ok(usages) => Some(usages),
        Err(e) => {
            warn!("Failed to parse {}: {}", file.path.display(), e);
            None
        }
    }
}

/// Strips a trailing `:line` suffix from a candidate path.
fn strip_line_suffix(path: &str) -> &str {
    match path.rsplit_once(':') {
        Some((file, line)) if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) => file,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_suffix() {
        assert_eq!(strip_line_suffix("Sources/Foo.swift:12"), "Sources/Foo.swift");
        assert_eq!(strip_line_suffix("Sources/Foo.swift"), "Sources/Foo.swift");
        assert_eq!(strip_line_suffix("Foo.swift:"), "Foo.swift:");
        assert_eq!(strip_line_suffix("a:b/Foo.swift"), "a:b/Foo.swift");
    }
}
