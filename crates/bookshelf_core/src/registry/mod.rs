//! List registry over an owned catalog.
//!
//! # Responsibility
//! - Create, delete and select lists.
//! - Insert, remove and enumerate entries of one list.
//!
//! # Invariants
//! - Precondition failures leave the catalog and the filesystem untouched.
//! - The catalog never loses its last list or its active list.
//! - A list container is created before the list is registered, and removed
//!   before the list is unregistered.
//!
//! Persistence is not handled here; see `service::catalog_service`.

use crate::error::{CatalogError, CatalogResult};
use crate::links::{is_plain_name, LinkManager};
use crate::model::catalog::Catalog;
use crate::model::entry::Entry;
use log::info;

/// Read-only projection of one list for selection menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub name: String,
    pub entry_count: usize,
    pub is_active: bool,
}

/// Structural operations on lists and entries.
pub struct ListRegistry<'a> {
    links: &'a LinkManager,
}

impl<'a> ListRegistry<'a> {
    pub fn new(links: &'a LinkManager) -> Self {
        Self { links }
    }

    /// Registers a new empty list and creates its container.
    ///
    /// Returns the trimmed name actually registered.
    ///
    /// # Errors
    /// - `DuplicateList` when the name is blank or already registered.
    /// - `InvalidListName` when the name is not a plain directory name.
    /// - `LinkCreationFailed` when the container cannot be created.
    pub fn add_list(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<String> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(CatalogError::DuplicateList(name.to_string()));
        }
        if !is_plain_name(normalized) {
            return Err(CatalogError::InvalidListName(normalized.to_string()));
        }
        if catalog.contains_list(normalized) {
            return Err(CatalogError::DuplicateList(normalized.to_string()));
        }

        self.links.ensure_container(normalized)?;
        catalog.insert_list(normalized.to_string());
        info!(
            "event=list_add module=registry status=ok list={} lists={}",
            normalized,
            catalog.list_count()
        );
        Ok(normalized.to_string())
    }

    /// Deletes a list together with its container and every link in it.
    ///
    /// # Errors
    /// - `ListNotFound` when the list does not exist.
    /// - `ActiveListProtected` when it is the active list. The only list is
    ///   always active, so this also covers the last list.
    /// - `LastListProtected` when it is the only list.
    pub fn remove_list(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<()> {
        if !catalog.contains_list(name) {
            return Err(CatalogError::ListNotFound(name.to_string()));
        }
        if catalog.active_list() == name {
            return Err(CatalogError::ActiveListProtected(name.to_string()));
        }
        if catalog.list_count() <= 1 {
            return Err(CatalogError::LastListProtected(name.to_string()));
        }

        self.links.remove_container(name)?;
        let removed = catalog.remove_list(name);
        info!(
            "event=list_remove module=registry status=ok list={} entries={}",
            name,
            removed.map(|list| list.len()).unwrap_or(0)
        );
        Ok(())
    }

    /// Moves the active cursor. The cursor is unchanged on error.
    pub fn switch_active(&self, catalog: &mut Catalog, name: &str) -> CatalogResult<()> {
        if !catalog.contains_list(name) {
            return Err(CatalogError::ListNotFound(name.to_string()));
        }
        catalog.set_active(name);
        info!("event=list_switch module=registry status=ok list={}", name);
        Ok(())
    }

    /// Inserts an entry whose `display_name` is already disambiguated.
    pub fn add_entry(
        &self,
        catalog: &mut Catalog,
        list_name: &str,
        entry: Entry,
    ) -> CatalogResult<()> {
        let list = catalog
            .list_mut(list_name)
            .ok_or_else(|| CatalogError::ListNotFound(list_name.to_string()))?;
        if list.contains(&entry.display_name) {
            return Err(CatalogError::DuplicateEntry {
                list: list_name.to_string(),
                name: entry.display_name,
            });
        }
        list.insert(entry);
        Ok(())
    }

    /// Removes an entry. An absent entry is a no-op and yields `None`.
    pub fn remove_entry(
        &self,
        catalog: &mut Catalog,
        list_name: &str,
        display_name: &str,
    ) -> CatalogResult<Option<Entry>> {
        let list = catalog
            .list_mut(list_name)
            .ok_or_else(|| CatalogError::ListNotFound(list_name.to_string()))?;
        Ok(list.remove(display_name))
    }

    /// Insertion-ordered snapshot of one list.
    pub fn list_entries(&self, catalog: &Catalog, list_name: &str) -> CatalogResult<Vec<Entry>> {
        catalog
            .list(list_name)
            .map(|list| list.entries().cloned().collect())
            .ok_or_else(|| CatalogError::ListNotFound(list_name.to_string()))
    }

    /// Every list in insertion order with its size and active flag.
    pub fn list_summaries(&self, catalog: &Catalog) -> Vec<ListSummary> {
        catalog
            .lists()
            .map(|(name, list)| ListSummary {
                name: name.to_string(),
                entry_count: list.len(),
                is_active: name == catalog.active_list(),
            })
            .collect()
    }
}
