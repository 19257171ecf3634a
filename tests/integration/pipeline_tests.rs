//! End-to-end tests for the two-phase excision pipeline.
//!
//! These tests build small projects on disk and drive the orchestrator the
//! way the CLI does.

use reaper::{CodeDeleter, Config, DeadTypeRecord, FileReference, Platform, ProjectManifest};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// In-memory manifest standing in for the platform's project file.
#[derive(Clone, Default)]
struct FakeManifest {
    references: Arc<Mutex<Vec<PathBuf>>>,
    persist_count: Arc<Mutex<usize>>,
}

impl FakeManifest {
    fn with_references(paths: &[&str]) -> Self {
        Self {
            references: Arc::new(Mutex::new(paths.iter().map(PathBuf::from).collect())),
            persist_count: Arc::new(Mutex::new(0)),
        }
    }

    fn references(&self) -> Vec<PathBuf> {
        self.references.lock().unwrap().clone()
    }

    fn persist_count(&self) -> usize {
        *self.persist_count.lock().unwrap()
    }
}

impl ProjectManifest for FakeManifest {
    fn file_references(&self) -> Vec<FileReference> {
        self.references().into_iter().map(FileReference::new).collect()
    }

    fn remove_reference(&mut self, path: &Path) -> miette::Result<()> {
        self.references.lock().unwrap().retain(|p| p != path);
        Ok(())
    }

    fn persist(&mut self) -> miette::Result<()> {
        *self.persist_count.lock().unwrap() += 1;
        Ok(())
    }
}

#[test]
fn test_ios_two_file_pipeline() {
    let dir = TempDir::new().unwrap();

    let debugger = write_file(
        dir.path(),
        "Sources/NetworkDebugger.swift",
        "\
import Foundation

struct Keeper {
  let name: String
}

// Prints out interesting stats for a URLResponse!
class NetworkDebugger {
  static func printStats(for response: URLResponse) {
  }
}
",
    );
    let api = write_file(
        dir.path(),
        "Sources/HNApi.swift",
        "\
import Foundation

class HNApi {
  func fetchTopStories() {
    if Flags.isEnabled(.networkDebugger) {
      NetworkDebugger.printStats(for: response)
    }
    load()
  }
}
",
    );

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    let records = vec![DeadTypeRecord::new("HackerNews.NetworkDebugger", None)];
    deleter.delete_types(&records, false);

    let debugger_contents = read_file(&debugger);
    assert!(!debugger_contents.contains("NetworkDebugger"));
    assert!(debugger_contents.contains("struct Keeper"));

    let api_contents = read_file(&api);
    assert!(!api_contents.contains("NetworkDebugger"));
    assert!(!api_contents.contains("if Flags.isEnabled"));
    assert!(api_contents.contains("load()"));
}

#[test]
fn test_whole_file_deletion_updates_manifest() {
    let dir = TempDir::new().unwrap();

    let doomed = write_file(
        dir.path(),
        "Sources/Doomed.swift",
        "\
//
//  Doomed.swift
//

import Foundation

class Doomed {
  func unused() {
  }
}
",
    );
    write_file(dir.path(), "Sources/Keeper.swift", "class Keeper {\n}\n");

    let manifest = FakeManifest::with_references(&["Sources/Doomed.swift", "Sources/Keeper.swift"]);
    let handle = manifest.clone();

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config)
        .with_manifest(Box::new(manifest));
    let records = vec![DeadTypeRecord::new("App.Doomed", None)];
    deleter.delete_types(&records, false);

    assert!(!doomed.exists());
    assert_eq!(handle.references(), vec![PathBuf::from("Sources/Keeper.swift")]);
    assert_eq!(handle.persist_count(), 1);
}

#[test]
fn test_android_candidate_paths_with_line_suffix() {
    let dir = TempDir::new().unwrap();

    let tracker = write_file(
        dir.path(),
        "app/src/main/java/com/example/Tracker.kt",
        "\
package com.example

class Tracker {
    fun track() {}
}
",
    );
    let main = write_file(
        dir.path(),
        "app/src/main/java/com/example/Main.kt",
        "\
package com.example

import com.example.Tracker

class Main {
    val tracker = Tracker()
    val name = \"main\"
}
",
    );

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Android, &config);
    let records = vec![DeadTypeRecord::new(
        "com.example.Tracker (Tracker.kt)",
        Some(vec!["app/src/main/java/com/example/Tracker.kt:3".to_string()]),
    )];
    deleter.delete_types(&records, false);

    // The declaration file held nothing else, so it is gone.
    assert!(!tracker.exists());

    let main_contents = read_file(&main);
    assert!(!main_contents.contains("Tracker"));
    assert!(main_contents.contains("val name = \"main\""));
}

#[test]
fn test_skip_usage_deletion_leaves_references() {
    let dir = TempDir::new().unwrap();

    write_file(
        dir.path(),
        "Sources/Doomed.swift",
        "class Doomed {\n}\n\nclass Keeper {\n}\n",
    );
    let caller = write_file(
        dir.path(),
        "Sources/Caller.swift",
        "\
class Caller {
  func run() {
    Doomed.ping()
  }
}
",
    );

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    let records = vec![DeadTypeRecord::new("App.Doomed", None)];
    deleter.delete_types(&records, true);

    assert!(read_file(&caller).contains("Doomed.ping()"));
}

#[test]
fn test_stale_record_is_a_noop() {
    let dir = TempDir::new().unwrap();

    let keeper = write_file(dir.path(), "Sources/Keeper.swift", "class Keeper {\n}\n");

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    let records = vec![DeadTypeRecord::new(
        "App.LongGone",
        Some(vec!["Sources/Keeper.swift".to_string()]),
    )];
    deleter.delete_types(&records, false);

    assert_eq!(read_file(&keeper), "class Keeper {\n}\n");
}

#[test]
fn test_failing_type_does_not_abort_the_run() {
    let dir = TempDir::new().unwrap();

    let doomed = write_file(dir.path(), "Sources/Doomed.swift", "class Doomed {\n}\n\nclass Keeper {\n}\n");

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    let records = vec![
        DeadTypeRecord::new("App.Missing", Some(vec!["Sources/Nowhere.swift".to_string()])),
        DeadTypeRecord::new("App.Doomed", None),
    ];
    deleter.delete_types(&records, false);

    assert!(!read_file(&doomed).contains("Doomed"));
}

#[test]
fn test_ambiguous_path_uses_first_match() {
    let dir = TempDir::new().unwrap();

    let first = write_file(
        dir.path(),
        "Sources/A/Doomed.swift",
        "class Doomed {\n}\n\nclass KeeperA {\n}\n",
    );
    let second = write_file(
        dir.path(),
        "Sources/B/Doomed.swift",
        "class Doomed {\n}\n\nclass KeeperB {\n}\n",
    );

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    let records = vec![DeadTypeRecord::new(
        "App.Doomed",
        Some(vec!["Doomed.swift".to_string()]),
    )];
    deleter.delete_types(&records, true);

    // Deterministic ordering picks Sources/A; Sources/B is untouched.
    assert!(!read_file(&first).contains("Doomed"));
    assert!(read_file(&second).contains("Doomed"));
}

#[test]
fn test_stale_path_falls_back_to_file_name_search() {
    let dir = TempDir::new().unwrap();

    let moved = write_file(
        dir.path(),
        "Sources/Feature/Doomed.swift",
        "class Doomed {\n}\n\nclass Keeper {\n}\n",
    );

    let config = Config::default();
    let mut deleter = CodeDeleter::new(dir.path(), Platform::Ios, &config);
    // The recorded location predates a file move.
    let records = vec![DeadTypeRecord::new(
        "App.Doomed",
        Some(vec!["Sources/Old/Doomed.swift".to_string()]),
    )];
    deleter.delete_types(&records, false);

    let contents = read_file(&moved);
    assert!(!contents.contains("Doomed"));
    assert!(contents.contains("Keeper"));
}
