//! On-disk layout of one library root.
//!
//! # Invariants
//! - Every path is derived from `root`; nothing reads the process cwd here.

use std::path::{Path, PathBuf};

pub const BOOKS_DIR_NAME: &str = "books";
pub const DATABASE_DIR_NAME: &str = "database";
pub const DATABASE_FILE_NAME: &str = "library.json";
pub const LOGS_DIR_NAME: &str = "logs";

/// Resolved paths for one library root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    root: PathBuf,
}

impl CatalogLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `books/`: one container directory per list.
    pub fn books_dir(&self) -> PathBuf {
        self.root.join(BOOKS_DIR_NAME)
    }

    pub fn database_dir(&self) -> PathBuf {
        self.root.join(DATABASE_DIR_NAME)
    }

    /// `database/library.json`.
    pub fn database_file(&self) -> PathBuf {
        self.database_dir().join(DATABASE_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR_NAME)
    }
}
