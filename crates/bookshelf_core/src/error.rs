//! Catalog error taxonomy.
//!
//! # Invariants
//! - Precondition variants are returned before any side effect.
//! - I/O variants may follow a completed filesystem side effect; callers
//!   must not assume rollback.

use crate::links::LinkError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by registry and service operations.
#[derive(Debug)]
pub enum CatalogError {
    /// Source path is missing or not a regular file.
    InvalidSource { path: PathBuf, reason: &'static str },
    /// Link or copy could not be created in the list container.
    LinkCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Existing link, copy or container could not be removed.
    LinkRemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// List container could not be read during an audit.
    ContainerScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Durable save failed.
    StorageError(StoreError),
    /// List name already exists or is blank.
    DuplicateList(String),
    /// List name cannot be used as a container directory name.
    InvalidListName(String),
    ListNotFound(String),
    /// Refused to delete the only remaining list.
    LastListProtected(String),
    /// Refused to delete the active list.
    ActiveListProtected(String),
    /// Entry is missing, or neither its source nor its link exists on disk.
    BookNotFound { list: String, name: String },
    /// Entry key already present in the list.
    DuplicateEntry { list: String, name: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSource { path, reason } => {
                write!(f, "invalid source `{}`: {reason}", path.display())
            }
            Self::LinkCreationFailed { path, source } => {
                write!(f, "failed to create link `{}`: {source}", path.display())
            }
            Self::LinkRemovalFailed { path, source } => {
                write!(f, "failed to remove `{}`: {source}", path.display())
            }
            Self::ContainerScanFailed { path, source } => {
                write!(f, "failed to read container `{}`: {source}", path.display())
            }
            Self::StorageError(err) => write!(f, "{err}"),
            Self::DuplicateList(name) if name.trim().is_empty() => {
                write!(f, "list name cannot be empty")
            }
            Self::DuplicateList(name) => write!(f, "list already exists: `{name}`"),
            Self::InvalidListName(name) => write!(f, "invalid list name: `{name}`"),
            Self::ListNotFound(name) => write!(f, "list not found: `{name}`"),
            Self::LastListProtected(name) => {
                write!(f, "cannot delete `{name}`: it is the last remaining list")
            }
            Self::ActiveListProtected(name) => {
                write!(f, "cannot delete `{name}`: it is the active list")
            }
            Self::BookNotFound { list, name } => {
                write!(f, "book not found: `{name}` in list `{list}`")
            }
            Self::DuplicateEntry { list, name } => {
                write!(f, "entry `{name}` already present in list `{list}`")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LinkCreationFailed { source, .. } => Some(source),
            Self::LinkRemovalFailed { source, .. } => Some(source),
            Self::ContainerScanFailed { source, .. } => Some(source),
            Self::StorageError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::StorageError(value)
    }
}

impl From<LinkError> for CatalogError {
    fn from(value: LinkError) -> Self {
        match value {
            LinkError::InvalidSource { path, reason } => Self::InvalidSource { path, reason },
            LinkError::CreationFailed { path, source } => Self::LinkCreationFailed { path, source },
            LinkError::RemovalFailed { path, source } => Self::LinkRemovalFailed { path, source },
            LinkError::ScanFailed { path, source } => Self::ContainerScanFailed { path, source },
            LinkError::InvalidContainerName(name) => Self::InvalidListName(name),
        }
    }
}
