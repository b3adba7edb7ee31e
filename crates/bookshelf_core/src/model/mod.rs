//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records persisted in `database/library.json`.
//! - Keep the aggregate invariants of the catalog in one place.
//!
//! # Invariants
//! - A catalog always holds at least one list.
//! - The active list always names an existing list.
//! - Entry keys equal the link file names inside the list container.

pub mod catalog;
pub mod entry;
