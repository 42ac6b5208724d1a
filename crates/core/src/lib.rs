//! `stockage-core` — shared domain foundation.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod collection;
pub mod error;

pub use collection::CollectionId;
pub use error::{DomainError, DomainResult};
