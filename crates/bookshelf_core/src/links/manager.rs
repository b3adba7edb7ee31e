//! Link creation and removal inside list containers.

use super::strategy::create_symlink;
use super::{is_plain_name, LinkError, LinkResult, LinkStrategy};
use crate::model::entry::LinkKind;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Result of one successful `create_link` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    /// Final file name inside the container, including any `_N` suffix.
    pub link_name: String,
    /// Full path of the created link or copy.
    pub path: PathBuf,
    /// Absolute path of the source file the link refers to.
    pub source_path: PathBuf,
    /// Source size in bytes at creation time.
    pub size_bytes: u64,
    /// `Copy` when the bytes were duplicated instead of linked.
    pub kind: LinkKind,
}

/// Owns the `books/` root and the process-wide link strategy.
#[derive(Debug, Clone)]
pub struct LinkManager {
    books_dir: PathBuf,
    strategy: LinkStrategy,
}

impl LinkManager {
    pub fn new(books_dir: impl Into<PathBuf>, strategy: LinkStrategy) -> Self {
        Self {
            books_dir: books_dir.into(),
            strategy,
        }
    }

    /// Builds a manager whose strategy comes from `LinkStrategy::probe`.
    pub fn probe(books_dir: impl Into<PathBuf>) -> Self {
        let books_dir = books_dir.into();
        let strategy = LinkStrategy::probe(&books_dir);
        Self::new(books_dir, strategy)
    }

    pub fn strategy(&self) -> LinkStrategy {
        self.strategy
    }

    pub fn books_dir(&self) -> &Path {
        &self.books_dir
    }

    /// Container path for one list. Pure path computation.
    ///
    /// Filesystem operations go through `checked_container_dir`.
    pub fn container_dir(&self, list_name: &str) -> PathBuf {
        self.books_dir.join(list_name)
    }

    fn checked_container_dir(&self, list_name: &str) -> LinkResult<PathBuf> {
        if !is_plain_name(list_name) {
            return Err(LinkError::InvalidContainerName(list_name.to_string()));
        }
        Ok(self.container_dir(list_name))
    }

    /// Creates the list container when absent.
    pub fn ensure_container(&self, list_name: &str) -> LinkResult<PathBuf> {
        let dir = self.checked_container_dir(list_name)?;
        fs::create_dir_all(&dir).map_err(|source| LinkError::CreationFailed {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Recursively deletes a list container and every link or copy in it.
    ///
    /// Symlinks are removed, never followed.
    pub fn remove_container(&self, list_name: &str) -> LinkResult<()> {
        let dir = self.checked_container_dir(list_name)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                info!(
                    "event=container_remove module=links status=ok list={}",
                    list_name
                );
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LinkError::RemovalFailed { path: dir, source }),
        }
    }

    /// Places a link to `source` inside `container_dir` under a free name.
    ///
    /// A name is taken when anything of that name exists in the container,
    /// dangling symlinks included, or when `is_reserved` returns `true`.
    ///
    /// # Errors
    /// - `InvalidSource` when `source` is missing or not a regular file.
    /// - `CreationFailed` when the link or copy cannot be written.
    pub fn create_link(
        &self,
        source: &Path,
        container_dir: &Path,
        is_reserved: impl Fn(&str) -> bool,
    ) -> LinkResult<CreatedLink> {
        let metadata = match fs::metadata(source) {
            Ok(metadata) => metadata,
            Err(_) => return Err(invalid_source(source, "file does not exist")),
        };
        if !metadata.is_file() {
            return Err(invalid_source(source, "path is not a regular file"));
        }

        let source_path = std::path::absolute(source).map_err(|_| {
            invalid_source(source, "path cannot be made absolute")
        })?;
        let base_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| invalid_source(source, "file name is not valid UTF-8"))?;

        let is_taken =
            |name: &str| is_reserved(name) || container_dir.join(name).symlink_metadata().is_ok();
        let link_name = free_link_name(base_name, is_taken).ok_or_else(|| {
            LinkError::CreationFailed {
                path: container_dir.join(base_name),
                source: io::Error::other("no free link name available"),
            }
        })?;
        let link_path = container_dir.join(&link_name);

        let written = match self.strategy {
            LinkStrategy::Symlink => create_symlink(&source_path, &link_path),
            LinkStrategy::Copy => fs::copy(&source_path, &link_path).map(|_| ()).map_err(|err| {
                // Drop the partial copy.
                let _ = fs::remove_file(&link_path);
                err
            }),
        };
        if let Err(source) = written {
            warn!(
                "event=link_create module=links status=error strategy={} link={} error={}",
                self.strategy.as_str(),
                link_name,
                source
            );
            return Err(LinkError::CreationFailed {
                path: link_path,
                source,
            });
        }

        debug!(
            "event=link_create module=links status=ok strategy={} link={} renamed={}",
            self.strategy.as_str(),
            link_name,
            link_name != base_name
        );
        Ok(CreatedLink {
            link_name,
            path: link_path,
            source_path,
            size_bytes: metadata.len(),
            kind: self.strategy.link_kind(),
        })
    }

    /// Deletes one link or copy.
    ///
    /// Returns `false` when nothing was there. Names that are not a single
    /// path component are never resolved.
    pub fn remove_link(&self, container_dir: &Path, link_name: &str) -> LinkResult<bool> {
        if !is_plain_name(link_name) {
            return Ok(false);
        }
        let path = container_dir.join(link_name);
        if path.symlink_metadata().is_err() {
            return Ok(false);
        }
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(LinkError::RemovalFailed { path, source }),
        }
    }

    /// Sorted names currently present in a list container.
    ///
    /// A missing container reads as empty.
    pub fn scan_container(&self, list_name: &str) -> LinkResult<Vec<String>> {
        let dir = self.checked_container_dir(list_name)?;
        let read_error = |source| LinkError::ScanFailed {
            path: dir.clone(),
            source,
        };
        let reader = match fs::read_dir(&dir) {
            Ok(reader) => reader,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(read_error(err)),
        };

        let mut names = Vec::new();
        for item in reader {
            let item = item.map_err(read_error)?;
            names.push(item.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// First free name among `base`, `stem_1.ext`, `stem_2.ext`, ...
///
/// The extension is the part after the last dot, as in `Path::extension`.
pub fn free_link_name(base: &str, is_taken: impl Fn(&str) -> bool) -> Option<String> {
    if !is_taken(base) {
        return Some(base.to_string());
    }

    let path = Path::new(base);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(base);
    let extension = path.extension().and_then(|ext| ext.to_str());

    (1u64..)
        .map(|counter| match extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        })
        .find(|candidate| !is_taken(candidate.as_str()))
}

fn invalid_source(path: &Path, reason: &'static str) -> LinkError {
    LinkError::InvalidSource {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::free_link_name;

    #[test]
    fn free_name_keeps_base_when_unused() {
        assert_eq!(
            free_link_name("dune.epub", |_| false).as_deref(),
            Some("dune.epub")
        );
    }

    #[test]
    fn free_name_counts_up_from_one() {
        let taken = ["dune.epub", "dune_1.epub"];
        assert_eq!(
            free_link_name("dune.epub", |name| taken.contains(&name)).as_deref(),
            Some("dune_2.epub")
        );
    }

    #[test]
    fn free_name_fills_first_gap() {
        let taken = ["dune.epub", "dune_2.epub"];
        assert_eq!(
            free_link_name("dune.epub", |name| taken.contains(&name)).as_deref(),
            Some("dune_1.epub")
        );
    }

    #[test]
    fn free_name_suffixes_only_last_extension() {
        assert_eq!(
            free_link_name("backup.tar.gz", |name| name == "backup.tar.gz").as_deref(),
            Some("backup.tar_1.gz")
        );
        assert_eq!(
            free_link_name("README", |name| name == "README").as_deref(),
            Some("README_1")
        );
        assert_eq!(
            free_link_name(".hidden", |name| name == ".hidden").as_deref(),
            Some(".hidden_1")
        );
    }
}
