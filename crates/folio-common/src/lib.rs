//! Folio common types and errors.
//!
//! This crate provides the foundational types shared by the report crates:
//! - Dataset labels with a canonical composition separator
//! - Immutable tables backed by Arrow record batches
//! - The recognized storage formats
//! - Filename sanitization for page paths
//! - Common error types

pub mod error;
pub mod format;
pub mod label;
pub mod sanitize;
pub mod table;

pub use error::{Error, Result};
pub use format::StorageFormat;
pub use label::Label;
pub use sanitize::sanitize;
pub use table::Table;
