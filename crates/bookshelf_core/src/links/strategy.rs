//! Link strategy selection.

use crate::model::entry::LinkKind;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

const PROBE_LINK_NAME: &str = ".bookshelf-link-probe";

/// How entries are materialized inside list containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Symbolic link to the absolute source path.
    Symlink,
    /// Byte-for-byte copy, used where symlinks cannot be created.
    Copy,
}

impl LinkStrategy {
    pub fn as_str(self) -> &'static str {
        self.link_kind().as_str()
    }

    /// Entry marker recorded for links created with this strategy.
    pub fn link_kind(self) -> LinkKind {
        match self {
            Self::Symlink => LinkKind::Symlink,
            Self::Copy => LinkKind::Copy,
        }
    }

    /// Checks whether symlinks can be created inside `books_dir`.
    ///
    /// Creates and removes one probe link. Any failure, including missing
    /// privilege, selects `Copy`.
    pub fn probe(books_dir: &Path) -> Self {
        let strategy = match try_symlink_probe(books_dir) {
            Ok(()) => Self::Symlink,
            Err(err) => {
                warn!(
                    "event=link_probe module=links status=fallback strategy=copy error={}",
                    err
                );
                Self::Copy
            }
        };
        info!(
            "event=link_probe module=links status=ok strategy={} platform={}",
            strategy.as_str(),
            std::env::consts::OS
        );
        strategy
    }
}

fn try_symlink_probe(books_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(books_dir)?;
    let probe = books_dir.join(PROBE_LINK_NAME);
    if probe.symlink_metadata().is_ok() {
        fs::remove_file(&probe)?;
    }
    create_symlink(books_dir, &probe)?;
    fs::remove_file(&probe)
}

/// Creates a file symlink at `link` pointing to `target`.
pub(crate) fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, link);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symbolic links are not supported on this platform",
        ))
    }
}
