//! Filesystem capability consumed by cross-file analysis.
//!
//! Export-shape resolution and import-path probing only ever read; the trait
//! keeps them testable against an in-memory tree and makes the read-only
//! contract explicit.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

pub trait Host {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// Best-effort text read; `None` for missing or unreadable files.
    fn read_text(&self, path: &Path) -> Option<String>;
}

/// Real filesystem host.
#[derive(Debug, Default)]
pub struct OsHost;

impl Host for OsHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_text(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// In-memory host for tests: a map of file paths to contents.
///
/// Directories are implied by the files under them.
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost {
            files: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl Host for MemoryHost {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.keys().any(|p| p.starts_with(path) && p != path)
    }

    fn read_text(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }
}
