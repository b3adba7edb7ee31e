//! Filesystem links that place catalog entries inside list containers.
//!
//! # Responsibility
//! - Select the link strategy once per process via a capability probe.
//! - Create collision-free link names and the links themselves.
//! - Remove links and whole list containers.
//!
//! # Invariants
//! - Link names are `stem.ext`, then `stem_1.ext`, `stem_2.ext`, ... in order.
//! - Removal of a missing link or container is not an error.
//! - Nothing outside `books/<list>/` is ever created or removed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod manager;
mod strategy;

pub use manager::{free_link_name, CreatedLink, LinkManager};
pub use strategy::LinkStrategy;

pub type LinkResult<T> = Result<T, LinkError>;

/// Returns whether `name` is a single path component safe to join under
/// `books/` or a list container.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[derive(Debug)]
pub enum LinkError {
    /// Source path is missing or not a regular file.
    InvalidSource { path: PathBuf, reason: &'static str },
    /// Creating a link, copy or container failed.
    CreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Removing a link, copy or container failed.
    RemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// List name is not a single plain path component.
    InvalidContainerName(String),
    /// Listing a container failed.
    ScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSource { path, reason } => {
                write!(f, "invalid source `{}`: {reason}", path.display())
            }
            Self::CreationFailed { path, source } => {
                write!(f, "failed to create `{}`: {source}", path.display())
            }
            Self::RemovalFailed { path, source } => {
                write!(f, "failed to remove `{}`: {source}", path.display())
            }
            Self::ScanFailed { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::InvalidContainerName(name) => write!(f, "invalid container name: `{name}`"),
        }
    }
}

impl Error for LinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSource { .. } | Self::InvalidContainerName(_) => None,
            Self::CreationFailed { source, .. }
            | Self::RemovalFailed { source, .. }
            | Self::ScanFailed { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_plain_name;

    #[test]
    fn plain_names_reject_traversal() {
        assert!(is_plain_name("scifi"));
        assert!(is_plain_name("to read.2025"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("a/b"));
        assert!(!is_plain_name("a\\b"));
    }
}
