//! JSON-file implementation of `CatalogStore`.
//!
//! # Invariants
//! - Output is pretty-printed JSON with `lists` then `current_list`.
//! - The parent directory is created on save when missing.
//! - No temp-file rename: the last successful save wins.

use super::{CatalogStore, StoreError, StoreResult};
use crate::model::catalog::Catalog;
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Catalog store bound to one JSON document path.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<Catalog>, String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("read_failed: {err}")),
        };
        serde_json::from_str::<Catalog>(&text)
            .map(Some)
            .map_err(|err| format!("parse_failed: {err}"))
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> Catalog {
        match self.read_document() {
            Ok(Some(mut catalog)) => {
                catalog.normalize();
                info!(
                    "event=catalog_load module=store status=ok lists={} active={}",
                    catalog.list_count(),
                    catalog.active_list()
                );
                catalog
            }
            Ok(None) => {
                info!(
                    "event=catalog_load module=store status=ok source=default reason=missing path={}",
                    self.path.display()
                );
                Catalog::default()
            }
            Err(reason) => {
                warn!(
                    "event=catalog_load module=store status=recovered source=default path={} error={}",
                    self.path.display(),
                    reason
                );
                Catalog::default()
            }
        }
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let started_at = Instant::now();
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let document = serde_json::to_string_pretty(catalog)?;
        let result = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(io_error)
            }
            _ => Ok(()),
        }
        .and_then(|()| fs::write(&self.path, document).map_err(io_error));

        match &result {
            Ok(()) => info!(
                "event=catalog_save module=store status=ok lists={} duration_ms={}",
                catalog.list_count(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=catalog_save module=store status=error duration_ms={} error_code=save_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::JsonCatalogStore;
    use crate::model::catalog::Catalog;
    use crate::store::CatalogStore;

    #[test]
    fn save_writes_historical_document_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonCatalogStore::new(dir.path().join("database").join("library.json"));

        store.save(&Catalog::default()).expect("save should succeed");

        let text = std::fs::read_to_string(store.path()).expect("document should exist");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["current_list"], "default");
        assert!(value["lists"]["default"].as_object().expect("object").is_empty());
        assert!(text.contains("\n  \"lists\""));
    }

    #[test]
    fn load_of_missing_document_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonCatalogStore::new(dir.path().join("library.json"));
        assert_eq!(store.load(), Catalog::default());
        assert!(!store.path().exists());
    }
}
