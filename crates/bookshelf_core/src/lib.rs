//! Core catalog engine for Bookshelf.
//! This crate is the single source of truth for catalog invariants.

pub mod error;
pub mod layout;
pub mod links;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use layout::CatalogLayout;
pub use links::{CreatedLink, LinkError, LinkManager, LinkStrategy};
pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LogLevel, LoggingError,
};
pub use model::catalog::{BookList, Catalog, DEFAULT_LIST_NAME};
pub use model::entry::{Entry, LinkKind};
pub use registry::{ListRegistry, ListSummary};
pub use service::catalog_service::{format_size, CatalogService};
pub use service::reconcile::ReconcileReport;
pub use store::{CatalogStore, JsonCatalogStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
