//! Durable catalog storage.
//!
//! # Responsibility
//! - Load and save the catalog document at a fixed path.
//! - Recover from missing or corrupt documents without surfacing errors.
//!
//! # Invariants
//! - `load` never fails; it degrades to `Catalog::default()`.
//! - `save` writes a complete document or returns `StoreError`.
//! - A corrupt document is left untouched until the next successful save.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::model::catalog::Catalog;

mod json_store;

pub use json_store::JsonCatalogStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write catalog `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize catalog: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Storage contract for the catalog document.
pub trait CatalogStore {
    /// Reads persisted state, or the default catalog when none is usable.
    fn load(&self) -> Catalog;
    /// Persists the full catalog. Called after every mutating operation.
    fn save(&self, catalog: &Catalog) -> StoreResult<()>;
}
