//! Interactive numbered menu.
//!
//! Reads one answer per line. End of input leaves the menu like `Exit`.
//! Catalog errors are printed and the loop continues.

use crate::opener::OpenStatus;
use crate::{render, Service};
use anyhow::Result;
use bookshelf_core::{Catalog, CatalogResult, Entry};
use std::io::{BufRead, Write};
use std::path::Path;

const MENU: &str = "
MAIN MENU
1. Add Book
2. Delete Book
3. Add List
4. Delete List
5. Switch Lists
6. Show All Books
7. Open Book
8. Exit
";

pub struct Menu<'a, R, W, O> {
    service: &'a Service,
    catalog: &'a mut Catalog,
    input: R,
    out: W,
    open: O,
}

impl<'a, R, W, O> Menu<'a, R, W, O>
where
    R: BufRead,
    W: Write,
    O: Fn(&Path) -> OpenStatus,
{
    pub fn new(
        service: &'a Service,
        catalog: &'a mut Catalog,
        input: R,
        out: W,
        open: O,
    ) -> Self {
        Self {
            service,
            catalog,
            input,
            out,
            open,
        }
    }

    pub fn run(mut self) -> Result<()> {
        render::banner(&mut self.out, self.catalog.active_list())?;
        loop {
            write!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an option (1-8): ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.add_book()?,
                "2" => self.delete_book()?,
                "3" => self.add_list()?,
                "4" => self.delete_list()?,
                "5" => self.switch_list()?,
                "6" => self.show_books()?,
                "7" => self.open_book()?,
                "8" => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid option, choose 1-8.")?,
            }
        }
    }

    fn add_book(&mut self) -> Result<()> {
        writeln!(self.out, "Adding book to list '{}'", self.catalog.active_list())?;
        let Some(path) = self.prompt("Enter the full path to the book file: ")? else {
            return Ok(());
        };
        if path.is_empty() {
            writeln!(self.out, "No path provided!")?;
            return Ok(());
        }

        let result = self.service.add_book(self.catalog, Path::new(&path));
        self.report(result, |out, entry| {
            if entry.is_copy() {
                writeln!(out, "Note: created a copy instead of a symlink")?;
            }
            writeln!(out, "Added '{}' ({})", entry.display_name, entry.size_label)
        })
    }

    fn delete_book(&mut self) -> Result<()> {
        let active = self.catalog.active_list().to_string();
        let Some(entry) = self.select_entry(&active, "delete")? else {
            return Ok(());
        };
        let result = self
            .service
            .delete_book(self.catalog, &active, &entry.display_name);
        self.report(result, |out, _| writeln!(out, "Deleted '{}'", entry.display_name))
    }

    fn add_list(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter new list name: ")? else {
            return Ok(());
        };
        let result = self.service.add_list(self.catalog, &name);
        self.report(result, |out, name| writeln!(out, "Created list '{name}'"))
    }

    fn delete_list(&mut self) -> Result<()> {
        if self.catalog.list_count() <= 1 {
            writeln!(self.out, "Cannot delete the last remaining list!")?;
            return Ok(());
        }
        let Some(name) = self.select_list("delete")? else {
            return Ok(());
        };
        let result = self.service.remove_list(self.catalog, &name);
        self.report(result, |out, ()| writeln!(out, "Deleted list '{name}'"))
    }

    fn switch_list(&mut self) -> Result<()> {
        if self.catalog.list_count() == 1 {
            writeln!(
                self.out,
                "Only one list available: '{}'",
                self.catalog.active_list()
            )?;
            return Ok(());
        }
        let Some(name) = self.select_list("switch to")? else {
            return Ok(());
        };
        let result = self.service.switch_active(self.catalog, &name);
        self.report(result, |out, ()| writeln!(out, "Switched to list '{name}'"))
    }

    fn show_books(&mut self) -> Result<()> {
        let active = self.catalog.active_list().to_string();
        let entries = self.service.list_entries(self.catalog, &active)?;
        render::entries(&mut self.out, &active, &entries)?;
        Ok(())
    }

    fn open_book(&mut self) -> Result<()> {
        let active = self.catalog.active_list().to_string();
        let Some(entry) = self.select_entry(&active, "open")? else {
            return Ok(());
        };
        let target = match self
            .service
            .resolve_open_target(self.catalog, &active, &entry.display_name)
        {
            Ok(target) => target,
            Err(err) => {
                writeln!(self.out, "Error: {err}")?;
                writeln!(self.out, "The file may have been moved or deleted.")?;
                return Ok(());
            }
        };

        writeln!(self.out, "Opening '{}'...", entry.display_name)?;
        match (self.open)(&target) {
            OpenStatus::Opened => writeln!(self.out, "Book opened successfully!")?,
            OpenStatus::Failed(reason) => {
                writeln!(self.out, "Failed to open the book: {reason}")?;
                writeln!(self.out, "You can open it manually at: {}", target.display())?;
            }
        }
        Ok(())
    }

    fn select_entry(&mut self, list_name: &str, verb: &str) -> Result<Option<Entry>> {
        let entries = self.service.list_entries(self.catalog, list_name)?;
        if entries.is_empty() {
            writeln!(self.out, "No books in list '{list_name}'")?;
            return Ok(None);
        }
        writeln!(self.out, "Select a book to {verb} from '{list_name}':")?;
        render::entry_choices(&mut self.out, &entries)?;
        Ok(self
            .choose(entries.len())?
            .map(|index| entries[index].clone()))
    }

    fn select_list(&mut self, verb: &str) -> Result<Option<String>> {
        let summaries = self.service.list_summaries(self.catalog);
        writeln!(self.out, "Available lists:")?;
        render::summaries(&mut self.out, &summaries)?;
        writeln!(self.out, "Select a list to {verb}:")?;
        Ok(self
            .choose(summaries.len())?
            .map(|index| summaries[index].name.clone()))
    }

    /// Zero-based index of a 1-based answer, or `None` after a message.
    fn choose(&mut self, count: usize) -> Result<Option<usize>> {
        let Some(answer) = self.prompt(&format!("Enter a number (1-{count}): "))? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(number) if (1..=count).contains(&number) => Ok(Some(number - 1)),
            Ok(_) => {
                writeln!(self.out, "Invalid selection!")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.out, "Please enter a number!")?;
                Ok(None)
            }
        }
    }

    /// Trimmed next line, or `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report<T>(
        &mut self,
        result: CatalogResult<T>,
        on_ok: impl FnOnce(&mut W, T) -> std::io::Result<()>,
    ) -> Result<()> {
        match result {
            Ok(value) => on_ok(&mut self.out, value)?,
            Err(err) => writeln!(self.out, "Error: {err}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Menu;
    use crate::opener::OpenStatus;
    use bookshelf_core::{CatalogLayout, CatalogService, JsonCatalogStore};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    fn run_script(root: &Path, script: &str, opened: &RefCell<Vec<PathBuf>>) -> String {
        let layout = CatalogLayout::new(root);
        let (service, mut catalog) =
            CatalogService::open(&layout, JsonCatalogStore::new(layout.database_file())).unwrap();
        let mut out = Vec::new();
        Menu::new(
            &service,
            &mut catalog,
            script.as_bytes(),
            &mut out,
            |path: &Path| {
                opened.borrow_mut().push(path.to_path_buf());
                OpenStatus::Opened
            },
        )
        .run()
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_session_adds_switches_and_opens() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("dune.epub");
        std::fs::write(&source, b"spice").unwrap();
        let opened = RefCell::new(Vec::new());
        let script = format!("3\nscifi\n5\n2\n1\n{}\n6\n7\n1\n8\n", source.display());

        let text = run_script(&dir.path().join("root"), &script, &opened);

        assert!(text.contains("Created list 'scifi'"));
        assert!(text.contains("Switched to list 'scifi'"));
        assert!(text.contains("Added 'dune.epub' (5.0 B)"));
        assert!(text.contains("Books in 'scifi':"));
        assert!(text.contains("Goodbye!"));
        assert_eq!(opened.borrow().as_slice(), &[source]);
    }

    #[test]
    fn protected_deletes_and_bad_input_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let opened = RefCell::new(Vec::new());

        let text = run_script(dir.path(), "4\n3\nscifi\n4\n1\n5\nx\n9\n", &opened);

        assert!(text.contains("Cannot delete the last remaining list!"));
        assert!(text.contains("cannot delete `default`: it is the active list"));
        assert!(text.contains("Please enter a number!"));
        assert!(text.contains("Invalid option, choose 1-8."));
        assert!(opened.borrow().is_empty());
    }
}
