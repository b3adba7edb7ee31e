//! Catalog use-case service.
//!
//! # Responsibility
//! - Run each user operation as filesystem effect, index mutation, save.
//! - Resolve which path a launcher should open for an entry.
//!
//! # Invariants
//! - Every mutating operation ends with exactly one `CatalogStore::save`.
//! - Precondition failures happen before any filesystem effect.
//! - Links are removed before index entries, never the other way round.
//! - A successful link is not rolled back when the following save fails.

use crate::error::{CatalogError, CatalogResult};
use crate::layout::CatalogLayout;
use crate::links::LinkManager;
use crate::model::catalog::{Catalog, DEFAULT_LIST_NAME};
use crate::model::entry::Entry;
use crate::registry::{ListRegistry, ListSummary};
use crate::service::reconcile::ReconcileReport;
use crate::store::{CatalogStore, StoreError};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Catalog service facade over a store and a link manager.
pub struct CatalogService<S: CatalogStore> {
    store: S,
    links: LinkManager,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a service from an already configured link manager.
    pub fn new(store: S, links: LinkManager) -> Self {
        Self { store, links }
    }

    /// Prepares a library root and loads its catalog.
    ///
    /// # Side effects
    /// - Creates `books/`, `books/default/` and `database/` when missing.
    /// - Probes symlink support once and fixes the link strategy.
    /// - Never writes the catalog document.
    pub fn open(layout: &CatalogLayout, store: S) -> CatalogResult<(Self, Catalog)> {
        let books_dir = layout.books_dir();
        let default_dir = books_dir.join(DEFAULT_LIST_NAME);
        fs::create_dir_all(&default_dir).map_err(|source| CatalogError::LinkCreationFailed {
            path: default_dir.clone(),
            source,
        })?;
        let database_dir = layout.database_dir();
        fs::create_dir_all(&database_dir).map_err(|source| {
            CatalogError::StorageError(StoreError::Io {
                path: database_dir.clone(),
                source,
            })
        })?;

        let links = LinkManager::probe(books_dir);
        let catalog = store.load();
        info!(
            "event=catalog_open module=service status=ok root={} strategy={} active={}",
            layout.root().display(),
            links.strategy().as_str(),
            catalog.active_list()
        );
        Ok((Self::new(store, links), catalog))
    }

    pub fn links(&self) -> &LinkManager {
        &self.links
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn registry(&self) -> ListRegistry<'_> {
        ListRegistry::new(&self.links)
    }

    fn save(&self, catalog: &Catalog, event: &str) -> CatalogResult<()> {
        self.store.save(catalog).map_err(|err| {
            error!(
                "event={} module=service status=error error_code=save_failed error={}",
                event, err
            );
            CatalogError::from(err)
        })
    }

    /// Adds a file to the active list.
    ///
    /// # Contract
    /// - The entry name is the link name chosen by `LinkManager::create_link`.
    /// - The size label is computed once, here.
    /// - When link creation fails nothing is added and nothing is saved.
    pub fn add_book(
        &self,
        catalog: &mut Catalog,
        source: impl AsRef<Path>,
    ) -> CatalogResult<Entry> {
        let active = catalog.active_list().to_string();
        let container = self.links.ensure_container(&active)?;

        let created = {
            let existing = catalog.list(&active);
            self.links.create_link(source.as_ref(), &container, |name| {
                existing.is_some_and(|list| list.contains(name))
            })?
        };

        let entry = Entry::new(
            created.link_name,
            format_size(created.size_bytes),
            created.source_path,
            created.kind,
        );
        self.registry().add_entry(catalog, &active, entry.clone())?;
        self.save(catalog, "book_add")?;

        info!(
            "event=book_add module=service status=ok list={} name={} size={} link_kind={}",
            active,
            entry.display_name,
            entry.size_label,
            entry.link_kind.as_str()
        );
        Ok(entry)
    }

    /// Removes an entry and its link. Removing an absent entry is a no-op.
    ///
    /// Returns the removed entry when one existed.
    pub fn delete_book(
        &self,
        catalog: &mut Catalog,
        list_name: &str,
        display_name: &str,
    ) -> CatalogResult<Option<Entry>> {
        if !catalog.contains_list(list_name) {
            return Err(CatalogError::ListNotFound(list_name.to_string()));
        }

        let container = self.links.container_dir(list_name);
        let link_removed = self.links.remove_link(&container, display_name)?;
        let removed = self.registry().remove_entry(catalog, list_name, display_name)?;
        self.save(catalog, "book_delete")?;

        info!(
            "event=book_delete module=service status=ok list={} name={} indexed={} link_removed={}",
            list_name,
            display_name,
            removed.is_some(),
            link_removed
        );
        Ok(removed)
    }

    /// Creates a list and persists it. Returns the registered name.
    pub fn add_list(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<String> {
        let registered = self.registry().add_list(catalog, name)?;
        self.save(catalog, "list_add")?;
        Ok(registered)
    }

    /// Deletes a list, its container and every link in it.
    pub fn remove_list(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<()> {
        self.registry().remove_list(catalog, name)?;
        self.save(catalog, "list_remove")
    }

    pub fn switch_active(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<()> {
        self.registry().switch_active(catalog, name)?;
        self.save(catalog, "list_switch")
    }

    pub fn list_entries(&self, catalog: &Catalog, list_name: &str) -> CatalogResult<Vec<Entry>> {
        self.registry().list_entries(catalog, list_name)
    }

    pub fn list_summaries(&self, catalog: &Catalog) -> Vec<ListSummary> {
        self.registry().list_summaries(catalog)
    }

    /// Picks the path a launcher should open for one entry.
    ///
    /// Prefers the original file, then the link, and fails with
    /// `BookNotFound` when neither exists. Launches nothing.
    pub fn resolve_open_target(
        &self,
        catalog: &Catalog,
        list_name: &str,
        display_name: &str,
    ) -> CatalogResult<PathBuf> {
        let list = catalog
            .list(list_name)
            .ok_or_else(|| CatalogError::ListNotFound(list_name.to_string()))?;
        let not_found = || CatalogError::BookNotFound {
            list: list_name.to_string(),
            name: display_name.to_string(),
        };
        let entry = list.get(display_name).ok_or_else(not_found)?;

        if entry.source_path.exists() {
            return Ok(entry.source_path.clone());
        }
        let link_path = self.links.container_dir(list_name).join(&entry.display_name);
        if link_path.exists() {
            return Ok(link_path);
        }

        info!(
            "event=book_resolve module=service status=missing list={} name={}",
            list_name, display_name
        );
        Err(not_found())
    }

    /// Compares a list container with the index without changing either.
    pub fn audit_list(
        &self,
        catalog: &Catalog,
        list_name: &str,
    ) -> CatalogResult<ReconcileReport> {
        let list = catalog
            .list(list_name)
            .ok_or_else(|| CatalogError::ListNotFound(list_name.to_string()))?;
        let on_disk = self.links.scan_container(list_name)?;
        let report = ReconcileReport::compare(list_name, list.names(), on_disk);
        info!(
            "event=list_audit module=service status=ok list={} orphans={} missing={}",
            list_name,
            report.orphan_links.len(),
            report.missing_links.len()
        );
        Ok(report)
    }
}

/// Formats a byte count with 1024-based units and one decimal place.
///
/// `0` is `"0 B"`; values stop scaling at `TB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn format_size_matches_reference_values() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn format_size_stops_at_terabytes() {
        assert_eq!(format_size(1024_u64.pow(4)), "1.0 TB");
        assert_eq!(format_size(2048 * 1024_u64.pow(4)), "2048.0 TB");
    }
}
