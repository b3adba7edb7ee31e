//! Catalog aggregate and list model.
//!
//! # Responsibility
//! - Own every list and entry of one library root.
//! - Repair aggregate invariants after a document is read from disk.
//!
//! # Invariants
//! - `lists` is never empty.
//! - `active_list` is always a key of `lists`.
//! - Every list name is a single plain path component.
//! - List and entry maps keep insertion order.

use crate::links::is_plain_name;
use crate::model::entry::Entry;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// Name of the list every fresh catalog starts with.
pub const DEFAULT_LIST_NAME: &str = "default";

/// Named, insertion-ordered collection of entries.
///
/// The list name is the key under which the list is stored in `Catalog`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookList {
    entries: IndexMap<String, Entry>,
}

impl BookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.entries.contains_key(display_name)
    }

    pub fn get(&self, display_name: &str) -> Option<&Entry> {
        self.entries.get(display_name)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Entry keys in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.display_name.clone(), entry);
    }

    /// Removes one entry and keeps the order of the remaining ones.
    pub(crate) fn remove(&mut self, display_name: &str) -> Option<Entry> {
        self.entries.shift_remove(display_name)
    }
}

/// Root aggregate persisted as `database/library.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    lists: IndexMap<String, BookList>,
    #[serde(rename = "current_list", default = "default_list_name")]
    active_list: String,
}

fn default_list_name() -> String {
    DEFAULT_LIST_NAME.to_string()
}

impl Default for Catalog {
    /// Single empty `default` list, selected as active.
    fn default() -> Self {
        let mut lists = IndexMap::new();
        lists.insert(DEFAULT_LIST_NAME.to_string(), BookList::new());
        Self {
            lists,
            active_list: DEFAULT_LIST_NAME.to_string(),
        }
    }
}

impl Catalog {
    /// Name of the list new entries are added to.
    pub fn active_list(&self) -> &str {
        &self.active_list
    }

    pub fn list(&self, name: &str) -> Option<&BookList> {
        self.lists.get(name)
    }

    pub fn contains_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// List names in insertion order.
    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// `(name, list)` pairs in insertion order.
    pub fn lists(&self) -> impl Iterator<Item = (&str, &BookList)> {
        self.lists.iter().map(|(name, list)| (name.as_str(), list))
    }

    pub(crate) fn list_mut(&mut self, name: &str) -> Option<&mut BookList> {
        self.lists.get_mut(name)
    }

    pub(crate) fn insert_list(&mut self, name: String) {
        self.lists.insert(name, BookList::new());
    }

    pub(crate) fn remove_list(&mut self, name: &str) -> Option<BookList> {
        self.lists.shift_remove(name)
    }

    pub(crate) fn set_active(&mut self, name: &str) {
        self.active_list = name.to_string();
    }

    /// Repairs aggregate invariants of a freshly parsed document.
    ///
    /// Returns `true` when something had to change.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut repaired = false;

        let unsafe_names: Vec<String> = self
            .lists
            .keys()
            .filter(|name| !is_plain_name(name))
            .cloned()
            .collect();
        for name in unsafe_names {
            let dropped = self.lists.shift_remove(&name).map(|list| list.len());
            warn!(
                "event=catalog_normalize module=model status=repaired reason=invalid_list_name list={:?} entries={}",
                name,
                dropped.unwrap_or(0)
            );
            repaired = true;
        }

        if self.lists.is_empty() {
            warn!("event=catalog_normalize module=model status=repaired reason=no_lists");
            self.lists
                .insert(DEFAULT_LIST_NAME.to_string(), BookList::new());
            repaired = true;
        }

        if !self.lists.contains_key(&self.active_list) {
            let fallback = if self.lists.contains_key(DEFAULT_LIST_NAME) {
                DEFAULT_LIST_NAME.to_string()
            } else {
                // Non-empty after the repair above.
                self.lists
                    .keys()
                    .next()
                    .cloned()
                    .unwrap_or_else(default_list_name)
            };
            warn!(
                "event=catalog_normalize module=model status=repaired reason=unknown_active_list active={} fallback={}",
                self.active_list, fallback
            );
            self.active_list = fallback;
            repaired = true;
        }

        repaired
    }
}
