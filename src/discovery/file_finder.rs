use crate::config::Config;
use crate::grammar::{Language, Platform};
use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A discovered source file with its detected language.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
}

impl SourceFile {
    pub fn new(path: PathBuf, language: Language) -> Self {
        Self { path, language }
    }

    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).into_diagnostic()
    }
}

/// File finder for discovering source files in a project.
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all source files for the platform's languages under `root`.
    pub fn find_source_files(&self, root: &Path, platform: Platform) -> Vec<SourceFile> {
        debug!("Scanning for {} sources in: {}", platform, root.display());

        let targets = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut files: Vec<SourceFile> = targets
            .iter()
            .flat_map(|target| self.scan_directory(target, platform))
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Found {} source files", files.len());
        files
    }

    fn scan_directory(&self, dir: &Path, platform: Platform) -> Vec<SourceFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let language = Language::from_path(path)?;
                if !platform.languages().contains(&language) {
                    return None;
                }

                trace!("Found {}: {}", language, path.display());
                Some(SourceFile::new(path.to_path_buf(), language))
            })
            .collect()
    }
}
