//! Include file resolution.
//!
//! The pipeline never touches the filesystem directly; it goes through
//! [`PathResolver`] so the invoking build decides where project-relative
//! include paths actually live (and tests substitute in-memory files).

use std::io;
use std::path::PathBuf;

/// Resolves a user-given project-relative path to file contents.
pub trait PathResolver {
    /// Read the file at `path`, relative to the project root.
    fn resolve(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Filesystem-backed resolver rooted at the project directory.
#[derive(Debug, Clone)]
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    /// Create a resolver for the given project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathResolver for DirResolver {
    fn resolve(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(path))
    }
}
