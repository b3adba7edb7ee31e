//! One-shot subcommand handlers.
//!
//! Each handler runs a single catalog operation and prints its outcome.
//! Catalog errors propagate so the process exits non-zero.

use crate::opener::{open_with_default_app, OpenStatus};
use crate::{render, Service};
use anyhow::{bail, Context, Result};
use bookshelf_core::Catalog;
use std::io::Write;
use std::path::Path;

fn list_or_active<'a>(catalog: &'a Catalog, list: Option<&'a str>) -> &'a str {
    list.unwrap_or_else(|| catalog.active_list())
}

pub fn add(
    out: &mut impl Write,
    service: &Service,
    catalog: &mut Catalog,
    path: &Path,
) -> Result<()> {
    let active = catalog.active_list().to_string();
    let entry = service
        .add_book(catalog, path)
        .with_context(|| format!("failed to add `{}` to list `{active}`", path.display()))?;
    if entry.is_copy() {
        writeln!(out, "Note: created a copy instead of a symlink")?;
    }
    writeln!(
        out,
        "Added '{}' ({}) to '{active}'",
        entry.display_name, entry.size_label
    )?;
    Ok(())
}

pub fn delete(
    out: &mut impl Write,
    service: &Service,
    catalog: &mut Catalog,
    name: &str,
    list: Option<&str>,
) -> Result<()> {
    let list_name = list_or_active(catalog, list).to_string();
    let removed = service
        .delete_book(catalog, &list_name, name)
        .with_context(|| format!("failed to delete `{name}` from list `{list_name}`"))?;
    match removed {
        Some(entry) => writeln!(out, "Deleted '{}' from '{list_name}'", entry.display_name)?,
        None => writeln!(out, "'{name}' was not in '{list_name}'")?,
    }
    Ok(())
}

pub fn show(
    out: &mut impl Write,
    service: &Service,
    catalog: &Catalog,
    list: Option<&str>,
) -> Result<()> {
    let list_name = list_or_active(catalog, list);
    let entries = service.list_entries(catalog, list_name)?;
    render::entries(out, list_name, &entries)?;
    Ok(())
}

pub fn lists(out: &mut impl Write, service: &Service, catalog: &Catalog) -> Result<()> {
    render::summaries(out, &service.list_summaries(catalog))?;
    Ok(())
}

pub fn new_list(
    out: &mut impl Write,
    service: &Service,
    catalog: &mut Catalog,
    name: &str,
) -> Result<()> {
    let registered = service.add_list(catalog, name)?;
    writeln!(out, "Created list '{registered}'")?;
    Ok(())
}

pub fn delete_list(
    out: &mut impl Write,
    service: &Service,
    catalog: &mut Catalog,
    name: &str,
) -> Result<()> {
    service.remove_list(catalog, name)?;
    writeln!(out, "Deleted list '{name}'")?;
    Ok(())
}

pub fn switch(
    out: &mut impl Write,
    service: &Service,
    catalog: &mut Catalog,
    name: &str,
) -> Result<()> {
    service.switch_active(catalog, name)?;
    writeln!(out, "Switched to list '{name}'")?;
    Ok(())
}

pub fn open(
    out: &mut impl Write,
    service: &Service,
    catalog: &Catalog,
    name: &str,
    list: Option<&str>,
) -> Result<()> {
    let list_name = list_or_active(catalog, list);
    let target = service
        .resolve_open_target(catalog, list_name, name)
        .context("the file may have been moved or deleted")?;

    writeln!(out, "Opening '{name}'...")?;
    match open_with_default_app(&target) {
        OpenStatus::Opened => {
            writeln!(out, "Book opened successfully!")?;
            Ok(())
        }
        OpenStatus::Failed(reason) => {
            bail!("{reason}; open it manually at {}", target.display())
        }
    }
}

pub fn audit(
    out: &mut impl Write,
    service: &Service,
    catalog: &Catalog,
    list: Option<&str>,
) -> Result<()> {
    let list_name = list_or_active(catalog, list);
    let report = service.audit_list(catalog, list_name)?;
    render::audit(out, &report)?;
    Ok(())
}
