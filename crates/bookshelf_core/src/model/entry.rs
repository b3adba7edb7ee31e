//! Catalog entry model.
//!
//! # Responsibility
//! - Define one cataloged file reference and how it serializes.
//!
//! # Invariants
//! - `display_name` equals the file name of the link created for the entry.
//! - `source_path` is absolute and never mutated after creation.
//! - `size_label` is computed once at add time and never re-derived.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How an entry is materialized inside its list container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Symbolic link pointing at `source_path`.
    #[default]
    Symlink,
    /// Full byte copy of the source file.
    ///
    /// Removing it deletes the copy's bytes, not just a reference.
    Copy,
}

impl LinkKind {
    /// Stable lowercase label used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symlink => "symlink",
            Self::Copy => "copy",
        }
    }

    fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }
}

/// One cataloged file reference.
///
/// Field names on disk keep the historical document shape
/// (`name`, `size`, `location`, `added_date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Link file name, unique within the owning list.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Human-readable size captured at add time.
    #[serde(rename = "size")]
    pub size_label: String,
    /// Absolute path to the original file.
    #[serde(rename = "location")]
    pub source_path: PathBuf,
    /// Local wall-clock time the entry was added. Absent in some older documents.
    #[serde(
        rename = "added_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub added_at: Option<NaiveDateTime>,
    /// Omitted from the document for symlinks.
    #[serde(default, skip_serializing_if = "LinkKind::is_symlink")]
    pub link_kind: LinkKind,
}

impl Entry {
    /// Creates an entry stamped with the current local time.
    pub fn new(
        display_name: impl Into<String>,
        size_label: impl Into<String>,
        source_path: impl Into<PathBuf>,
        link_kind: LinkKind,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            size_label: size_label.into(),
            source_path: source_path.into(),
            added_at: Some(Local::now().naive_local()),
            link_kind,
        }
    }

    /// Returns whether removing this entry's link also removes file bytes.
    pub fn is_copy(&self) -> bool {
        self.link_kind == LinkKind::Copy
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, LinkKind};

    #[test]
    fn symlink_kind_is_omitted_from_document() {
        let entry = Entry::new("dune.epub", "1.0 KB", "/books/dune.epub", LinkKind::Symlink);
        let value = serde_json::to_value(&entry).expect("entry should serialize");
        assert!(value.get("link_kind").is_none());
        assert_eq!(value["name"], "dune.epub");
        assert_eq!(value["size"], "1.0 KB");
        assert_eq!(value["location"], "/books/dune.epub");
    }

    #[test]
    fn copy_kind_is_written_and_read_back() {
        let entry = Entry::new("dune.epub", "1.0 KB", "/books/dune.epub", LinkKind::Copy);
        let text = serde_json::to_string(&entry).expect("entry should serialize");
        assert!(text.contains(r#""link_kind":"copy""#));

        let parsed: Entry = serde_json::from_str(&text).expect("entry should parse");
        assert!(parsed.is_copy());
    }

    #[test]
    fn parses_document_without_link_kind_and_with_microsecond_timestamp() {
        let raw = r#"{
            "name": "dune.epub",
            "size": "2.3 MB",
            "location": "/home/reader/dune.epub",
            "added_date": "2025-08-10T14:03:59.123456"
        }"#;
        let parsed: Entry = serde_json::from_str(raw).expect("legacy entry should parse");
        assert_eq!(parsed.link_kind, LinkKind::Symlink);
        let added_at = parsed.added_at.expect("added_date should parse");
        assert_eq!(added_at.format("%Y-%m-%d %H:%M").to_string(), "2025-08-10 14:03");
    }

    #[test]
    fn parses_entry_without_added_date() {
        let raw = r#"{"name": "dune.epub", "size": "2.3 MB", "location": "/home/reader/dune.epub"}"#;
        let parsed: Entry = serde_json::from_str(raw).expect("entry without date should parse");
        assert!(parsed.added_at.is_none());

        let value = serde_json::to_value(&parsed).expect("entry should serialize");
        assert!(value.get("added_date").is_none());
    }
}
