//! `bookshelf` command line.
//!
//! # Responsibility
//! - Resolve the library root and start file logging under it.
//! - Open the catalog once and dispatch one command against it.
//!
//! Without a subcommand the interactive menu runs.

use anyhow::{Context, Result};
use bookshelf_core::{
    default_log_level, init_logging, CatalogLayout, CatalogService, JsonCatalogStore, LogConfig,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

mod commands;
mod menu;
mod opener;
mod render;

pub(crate) type Service = CatalogService<JsonCatalogStore>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for bookshelf_core::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "bookshelf",
    about = "Personal e-book lists backed by symlinks",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Library root holding `books/`, `database/` and `logs/`
    #[clap(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log level (defaults to debug in debug builds, info otherwise)
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a file to the current list
    Add { path: PathBuf },
    /// Remove a book and its link
    Delete {
        name: String,
        #[clap(long)]
        list: Option<String>,
    },
    /// Show the books of a list
    Show {
        #[clap(long)]
        list: Option<String>,
    },
    /// Show every list with its book count
    Lists,
    /// Create an empty list
    NewList { name: String },
    /// Delete a list with all of its links
    DeleteList { name: String },
    /// Make another list current
    Switch { name: String },
    /// Open a book with the default application
    Open {
        name: String,
        #[clap(long)]
        list: Option<String>,
    },
    /// Compare a list folder with the catalog
    Audit {
        #[clap(long)]
        list: Option<String>,
    },
    /// Interactive menu
    Menu,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = std::path::absolute(&cli.root)
        .with_context(|| format!("invalid library root `{}`", cli.root.display()))?;
    let layout = CatalogLayout::new(root);

    let level = cli
        .log_level
        .map(bookshelf_core::LogLevel::from)
        .unwrap_or_else(default_log_level);
    let log_config = LogConfig {
        level,
        dir: layout.logs_dir(),
    };
    if let Err(err) = init_logging(&log_config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = JsonCatalogStore::new(layout.database_file());
    let (service, mut catalog) = CatalogService::open(&layout, store)
        .with_context(|| format!("failed to open library at `{}`", layout.root().display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let catalog = &mut catalog;
    match cli.command.unwrap_or(Command::Menu) {
        Command::Add { path } => commands::add(&mut out, &service, catalog, &path)?,
        Command::Delete { name, list } => {
            commands::delete(&mut out, &service, catalog, &name, list.as_deref())?
        }
        Command::Show { list } => commands::show(&mut out, &service, catalog, list.as_deref())?,
        Command::Lists => commands::lists(&mut out, &service, catalog)?,
        Command::NewList { name } => commands::new_list(&mut out, &service, catalog, &name)?,
        Command::DeleteList { name } => commands::delete_list(&mut out, &service, catalog, &name)?,
        Command::Switch { name } => commands::switch(&mut out, &service, catalog, &name)?,
        Command::Open { name, list } => {
            commands::open(&mut out, &service, catalog, &name, list.as_deref())?
        }
        Command::Audit { list } => commands::audit(&mut out, &service, catalog, list.as_deref())?,
        Command::Menu => {
            let stdin = io::stdin();
            menu::Menu::new(
                &service,
                catalog,
                stdin.lock(),
                &mut out,
                opener::open_with_default_app,
            )
            .run()?
        }
    }
    out.flush()?;
    Ok(())
}
