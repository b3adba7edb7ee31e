//! Core use-case services.
//!
//! # Responsibility
//! - Compose links, registry and store into the operations callers invoke.
//! - Keep CLI and launcher layers decoupled from storage details.

pub mod catalog_service;
pub mod reconcile;
