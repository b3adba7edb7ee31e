//! Terminal text for lists, entries and reports.

use bookshelf_core::{Entry, ListSummary, ReconcileReport};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

pub fn banner(out: &mut impl Write, active_list: &str) -> io::Result<()> {
    let rule = "═".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "  Bookshelf {}  ·  your personal e-book library",
        bookshelf_core::core_version()
    )?;
    writeln!(out, "  Current list: {active_list}")?;
    writeln!(out, "{rule}")
}

/// Full listing with size, location and added date.
pub fn entries(out: &mut impl Write, list_name: &str, entries: &[Entry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No books in list '{list_name}'");
    }

    writeln!(out, "Books in '{list_name}':")?;
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
    for (index, entry) in entries.iter().enumerate() {
        writeln!(out, "{:2}. {}", index + 1, entry.display_name)?;
        writeln!(out, "     Size: {}", entry.size_label)?;
        writeln!(out, "     Location: {}", entry.source_path.display())?;
        if let Some(added_at) = entry.added_at {
            writeln!(out, "     Added: {}", added_at.format("%Y-%m-%d %H:%M"))?;
        }
        if entry.is_copy() {
            writeln!(out, "     Stored as a copy")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Numbered `name (size)` lines for selection prompts.
pub fn entry_choices(out: &mut impl Write, entries: &[Entry]) -> io::Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({})",
            index + 1,
            entry.display_name,
            entry.size_label
        )?;
    }
    Ok(())
}

/// Numbered lists with book counts; the active one is marked.
pub fn summaries(out: &mut impl Write, summaries: &[ListSummary]) -> io::Result<()> {
    for (index, summary) in summaries.iter().enumerate() {
        let marker = if summary.is_active { " (current)" } else { "" };
        writeln!(
            out,
            "{}. {} ({} books){marker}",
            index + 1,
            summary.name,
            summary.entry_count
        )?;
    }
    Ok(())
}

pub fn audit(out: &mut impl Write, report: &ReconcileReport) -> io::Result<()> {
    if report.is_consistent() {
        return writeln!(out, "List '{}' is consistent with its folder", report.list);
    }
    for name in &report.orphan_links {
        writeln!(out, "orphan link (not in catalog): {name}")?;
    }
    for name in &report.missing_links {
        writeln!(out, "missing link (catalog only): {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{entries, summaries};
    use bookshelf_core::{Entry, LinkKind, ListSummary};

    #[test]
    fn empty_list_has_single_line() {
        let mut out = Vec::new();
        entries(&mut out, "scifi", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No books in list 'scifi'\n");
    }

    #[test]
    fn entries_show_size_location_and_copy_marker() {
        let mut out = Vec::new();
        let entry = Entry::new("dune.epub", "1.5 KB", "/src/dune.epub", LinkKind::Copy);
        entries(&mut out, "scifi", &[entry]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 1. dune.epub"));
        assert!(text.contains("Size: 1.5 KB"));
        assert!(text.contains("Location: /src/dune.epub"));
        assert!(text.contains("Stored as a copy"));
    }

    #[test]
    fn entries_without_added_date_skip_that_line() {
        let mut out = Vec::new();
        let mut entry = Entry::new("dune.epub", "1.5 KB", "/src/dune.epub", LinkKind::Symlink);
        entry.added_at = None;
        entries(&mut out, "scifi", &[entry]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Size: 1.5 KB"));
        assert!(!text.contains("Added:"));
    }

    #[test]
    fn summaries_mark_current_list() {
        let mut out = Vec::new();
        let rows = vec![
            ListSummary {
                name: "default".to_string(),
                entry_count: 0,
                is_active: false,
            },
            ListSummary {
                name: "scifi".to_string(),
                entry_count: 2,
                is_active: true,
            },
        ];
        summaries(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1. default (0 books)\n2. scifi (2 books) (current)\n");
    }
}
