//! Canonical storage naming for media containers, tables, and queues.
//!
//! This module provides:
//! - Closed content-section and asset-type enumerations
//! - Deterministic resolvers from (section, asset type) to storage names
//! - Per-resource-kind name validators with rule-identifying errors
//! - Best-effort sanitizers that never fail

mod error;
mod resolve;
mod sanitize;
mod types;
mod validate;

pub use error::NamingError;
pub use resolve::{resolve_container_name, resolve_queue_name, resolve_table_name};
pub use sanitize::{sanitize_container_name, sanitize_queue_name, sanitize_table_name};
pub use types::{AssetType, ContentSection, NamingContext};
pub use validate::{validate_container_name, validate_queue_name, validate_table_name};
