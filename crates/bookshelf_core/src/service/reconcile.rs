//! Read-only comparison of a list container with its index entries.

use std::collections::BTreeSet;

/// Differences between `books/<list>/` and the list's index keys.
///
/// Produced by `CatalogService::audit_list`; nothing is repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub list: String,
    /// Present in the container, absent from the index.
    pub orphan_links: Vec<String>,
    /// Present in the index, absent from the container.
    pub missing_links: Vec<String>,
}

impl ReconcileReport {
    /// Builds a report; both name sets come back sorted.
    pub fn compare<'a>(
        list: &str,
        indexed: impl IntoIterator<Item = &'a str>,
        on_disk: impl IntoIterator<Item = String>,
    ) -> Self {
        let indexed: BTreeSet<&str> = indexed.into_iter().collect();
        let on_disk: BTreeSet<String> = on_disk.into_iter().collect();

        let orphan_links = on_disk
            .iter()
            .filter(|name| !indexed.contains(name.as_str()))
            .cloned()
            .collect();
        let missing_links = indexed
            .iter()
            .filter(|name| !on_disk.contains(**name))
            .map(|name| name.to_string())
            .collect();

        Self {
            list: list.to_string(),
            orphan_links,
            missing_links,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.orphan_links.is_empty() && self.missing_links.is_empty()
    }
}
